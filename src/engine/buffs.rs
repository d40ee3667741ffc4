//! Buff windows, stack counters and delayed charges.
//!
//! A buff window is a float expiry in tick units: active while
//! `tick < expiry`. Re-triggering replaces the expiry — duration never
//! accumulates — while designated triggers extend it by a fixed increment.
//! Counters and charges are independent mechanisms; none of the three touch
//! each other unless a config rule explicitly couples them.

use crate::config::{CounterRule, CounterSpend};

/// A timed buff window with reset-not-stack semantics.
#[derive(Debug, Clone, Default)]
pub struct BuffWindow {
    expiry: f64,
}

impl BuffWindow {
    pub fn new() -> Self {
        Self { expiry: 0.0 }
    }

    pub fn active(&self, tick: u64) -> bool {
        (tick as f64) < self.expiry
    }

    /// Open (or re-open) the window. Replaces any existing expiry.
    pub fn open(&mut self, start_tick: u64, duration: f64) {
        self.expiry = start_tick as f64 + duration;
    }

    /// Push the expiry out by a fixed increment.
    pub fn extend(&mut self, ticks: f64) {
        self.expiry += ticks;
    }

    /// True exactly on the tick during which the window runs out — the spot
    /// where a terminal effect fires once.
    pub fn closes_at(&self, tick: u64) -> bool {
        self.active(tick) && !self.active(tick + 1)
    }
}

/// The per-trial values behind a config's ordered `CounterRule` list.
#[derive(Debug, Clone, Default)]
pub struct StackCounters {
    values: Vec<u32>,
}

impl StackCounters {
    pub fn new(count: usize) -> Self {
        Self {
            values: vec![0; count],
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn get(&self, index: usize) -> u32 {
        self.values[index]
    }

    /// A basic attack landed: bump every counter that counts basics.
    pub fn record_basic(&mut self, rules: &[CounterRule]) {
        for (value, rule) in self.values.iter_mut().zip(rules) {
            if rule.counts_basics {
                *value += 1;
            }
        }
    }

    /// Consume a fired counter per its spend rule.
    pub fn spend(&mut self, index: usize, rule: &CounterRule) {
        match rule.spend {
            CounterSpend::ResetToZero => self.values[index] = 0,
            CounterSpend::SubtractThreshold => {
                self.values[index] = self.values[index].saturating_sub(rule.threshold)
            }
        }
    }

    /// One counter feeding another (+1 on fire).
    pub fn feed(&mut self, index: usize) {
        self.values[index] += 1;
    }
}

/// Pending delayed charges, stored as absolute detonation ticks.
#[derive(Debug, Clone, Default)]
pub struct ChargeQueue {
    pending: Vec<u64>,
}

impl ChargeQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn bank(&mut self, detonation_tick: u64) {
        self.pending.push(detonation_tick);
    }

    /// Remove and count every charge due at or before `tick`.
    pub fn take_due(&mut self, tick: u64) -> usize {
        let before = self.pending.len();
        self.pending.retain(|&at| at > tick);
        before - self.pending.len()
    }

    /// Drain everything (instant burst). Returns how many were pending.
    pub fn burst(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActionKind;

    #[test]
    fn test_retrigger_replaces_expiry() {
        let mut buff = BuffWindow::new();
        buff.open(0, 10.0);
        // Re-trigger at tick 6: expiry becomes 16, not 20.
        buff.open(6, 10.0);
        assert!(buff.active(15));
        assert!(!buff.active(16));
    }

    #[test]
    fn test_total_active_time_never_exceeds_one_duration() {
        // The reset law: two triggers inside one window yield at most one
        // duration of remaining buff time, measured from the second trigger.
        let mut buff = BuffWindow::new();
        buff.open(0, 7.0);
        buff.open(3, 7.0);
        let active_ticks = (0..30).filter(|&t| buff.active(t)).count();
        assert_eq!(active_ticks, 10); // ticks 0..=9, i.e. 3 + one duration
    }

    #[test]
    fn test_extend_adds_instead_of_replacing() {
        let mut buff = BuffWindow::new();
        buff.open(0, 5.0);
        buff.extend(2.5);
        assert!(buff.active(7));
        assert!(!buff.active(8));
    }

    #[test]
    fn test_fractional_expiry() {
        let mut buff = BuffWindow::new();
        buff.open(0, 2.5);
        assert!(buff.active(2));
        assert!(!buff.active(3));
        assert!(buff.closes_at(2));
    }

    #[test]
    fn test_closes_at_fires_once() {
        let mut buff = BuffWindow::new();
        buff.open(0, 3.0);
        let closing: Vec<u64> = (0..10).filter(|&t| buff.closes_at(t)).collect();
        assert_eq!(closing, vec![2]);
    }

    #[test]
    fn test_inactive_window_never_closes() {
        let buff = BuffWindow::new();
        assert!((0..10).all(|t| !buff.closes_at(t)));
    }

    fn rule(threshold: u32, spend: CounterSpend, counts_basics: bool) -> CounterRule {
        CounterRule {
            threshold,
            spend,
            fires: ActionKind::Skill2,
            mult: 1.0,
            counts_basics,
            feeds: None,
            extend_ticks: 0.0,
            crit_mana: 0.0,
            after_rates: false,
        }
    }

    #[test]
    fn test_counters_bump_and_reset() {
        let rules = vec![rule(3, CounterSpend::ResetToZero, true)];
        let mut counters = StackCounters::new(1);
        for _ in 0..3 {
            counters.record_basic(&rules);
        }
        assert_eq!(counters.get(0), 3);
        counters.spend(0, &rules[0]);
        assert_eq!(counters.get(0), 0);
    }

    #[test]
    fn test_counters_subtract_keeps_overflow() {
        let rules = vec![rule(5, CounterSpend::SubtractThreshold, true)];
        let mut counters = StackCounters::new(1);
        for _ in 0..7 {
            counters.record_basic(&rules);
        }
        counters.spend(0, &rules[0]);
        assert_eq!(counters.get(0), 2);
    }

    #[test]
    fn test_fed_counter_ignores_basics() {
        let rules = vec![
            rule(3, CounterSpend::SubtractThreshold, false),
            rule(5, CounterSpend::SubtractThreshold, true),
        ];
        let mut counters = StackCounters::new(2);
        counters.record_basic(&rules);
        counters.feed(0);
        assert_eq!(counters.get(0), 1);
        assert_eq!(counters.get(1), 1);
    }

    #[test]
    fn test_charges_due_and_burst() {
        let mut queue = ChargeQueue::new();
        queue.bank(5);
        queue.bank(8);
        assert_eq!(queue.take_due(4), 0);
        assert_eq!(queue.take_due(5), 1);
        assert_eq!(queue.len(), 1);
        queue.bank(9);
        queue.bank(10);
        assert_eq!(queue.burst(), 3);
        assert!(queue.is_empty());
    }
}
