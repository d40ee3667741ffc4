//! Single-trial driver.
//!
//! `Engine::run_trial` steps one trial through its ticks: forced multi-tick
//! states first (channel, lockout, opening stacks, reloads, chains), then
//! the resolver's priority policy, then damage evaluation and end-of-tick
//! bookkeeping. Trials never share state; the RNG stream is the only thing
//! carried from one trial to the next.

use rand::Rng;
use serde::Serialize;

use crate::config::{ActionKind, AmmoRule, ChannelCrit, ManaReset, SimConfig, UltStyle};
use crate::engine::buffs::{BuffWindow, ChargeQueue, StackCounters};
use crate::engine::damage;
use crate::engine::mana::ManaPool;
use crate::engine::resolver::{self, Choice};
use crate::error::ConfigError;

/// Damage summed per action category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DamageBreakdown {
    pub basic: f64,
    pub skill1: f64,
    pub skill2: f64,
    pub skill3: f64,
    pub ult: f64,
}

impl DamageBreakdown {
    pub fn add(&mut self, kind: ActionKind, amount: f64) {
        match kind {
            ActionKind::Basic => self.basic += amount,
            ActionKind::Skill1 => self.skill1 += amount,
            ActionKind::Skill2 => self.skill2 += amount,
            ActionKind::Skill3 => self.skill3 += amount,
            ActionKind::Ult => self.ult += amount,
        }
    }

    pub fn get(&self, kind: ActionKind) -> f64 {
        match kind {
            ActionKind::Basic => self.basic,
            ActionKind::Skill1 => self.skill1,
            ActionKind::Skill2 => self.skill2,
            ActionKind::Skill3 => self.skill3,
            ActionKind::Ult => self.ult,
        }
    }

    pub fn total(&self) -> f64 {
        self.basic + self.skill1 + self.skill2 + self.skill3 + self.ult
    }

    pub fn accumulate(&mut self, other: &DamageBreakdown) {
        self.basic += other.basic;
        self.skill1 += other.skill1;
        self.skill2 += other.skill2;
        self.skill3 += other.skill3;
        self.ult += other.ult;
    }

    pub fn scaled(&self, factor: f64) -> DamageBreakdown {
        DamageBreakdown {
            basic: self.basic * factor,
            skill1: self.skill1 * factor,
            skill2: self.skill2 * factor,
            skill3: self.skill3 * factor,
            ult: self.ult * factor,
        }
    }
}

/// How many times each action category was executed in one trial.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CastCounts {
    pub basic: u64,
    pub skill1: u64,
    pub skill2: u64,
    pub skill3: u64,
    pub ult: u64,
}

impl CastCounts {
    pub fn add(&mut self, kind: ActionKind) {
        match kind {
            ActionKind::Basic => self.basic += 1,
            ActionKind::Skill1 => self.skill1 += 1,
            ActionKind::Skill2 => self.skill2 += 1,
            ActionKind::Skill3 => self.skill3 += 1,
            ActionKind::Ult => self.ult += 1,
        }
    }
}

/// Outcome of one trial. Immutable once produced.
#[derive(Debug, Clone, Default)]
pub struct TrialResult {
    pub damage: DamageBreakdown,
    pub casts: CastCounts,
    /// Ticks actually simulated — skills can extend the trial past the
    /// requested count.
    pub ticks_run: u64,
}

/// Everything owned by one trial. Reset at trial start, discarded at end.
#[derive(Debug)]
struct TrialState {
    tick: u64,
    /// Float so skills can extend the trial by fractional ticks.
    end_time: f64,
    mana: ManaPool,
    pending_reset: bool,
    counters: StackCounters,
    buff: BuffWindow,
    chain_active: bool,
    channel_left: u64,
    channel_crit_mult: f64,
    lockout_left: u64,
    dot_left: f64,
    charges: ChargeQueue,
    ammo: u32,
    next_reload: u64,
    opening_left: u32,
    combo_casts: u32,
    last_skill1: Option<u64>,
    last_skill2: Option<u64>,
}

impl TrialState {
    fn new(cfg: &SimConfig, ticks: u64) -> Self {
        Self {
            tick: 0,
            end_time: ticks as f64,
            mana: ManaPool::new(),
            pending_reset: false,
            counters: StackCounters::new(cfg.counters.len()),
            buff: BuffWindow::new(),
            chain_active: false,
            channel_left: 0,
            channel_crit_mult: 1.0,
            lockout_left: 0,
            dot_left: 0.0,
            charges: ChargeQueue::new(),
            ammo: 0,
            next_reload: cfg.ammo.as_ref().map_or(u64::MAX, |a| a.interval_ticks),
            opening_left: cfg.opening.as_ref().map_or(0, |o| o.stacks),
            combo_casts: 0,
            last_skill1: None,
            last_skill2: None,
        }
    }
}

/// What this tick will do, once forced states and ammo interception have had
/// their say.
enum Act {
    Resolved(Choice),
    AmmoShot { mult: f64 },
}

fn roll_ammo_load(rng: &mut impl Rng, rule: &AmmoRule) -> u32 {
    if rng.gen::<f64>() * 100.0 < rule.full_rate {
        rule.capacity
    } else {
        rng.gen_range(1..=rule.capacity)
    }
}

/// A validated configuration, ready to run trials.
#[derive(Debug, Clone)]
pub struct Engine {
    cfg: SimConfig,
}

impl Engine {
    pub fn new(cfg: SimConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    fn effective_attack_power(&self, buffed: bool) -> f64 {
        if buffed {
            if let Some(ap) = self.cfg.buff.as_ref().and_then(|b| b.attack_power) {
                return ap;
            }
        }
        self.cfg.stats.attack_power
    }

    fn damage_scale(&self, buffed: bool) -> f64 {
        if buffed {
            self.cfg.buff.as_ref().map_or(1.0, |b| b.damage_scale)
        } else {
            1.0
        }
    }

    fn book_kind(&self, buffed: bool, kind: ActionKind) -> ActionKind {
        if buffed && self.cfg.buff.as_ref().is_some_and(|b| b.credit_to_ult) {
            ActionKind::Ult
        } else {
            kind
        }
    }

    fn skill_index(&self, kind: ActionKind) -> Option<usize> {
        self.cfg.skills.iter().position(|s| s.kind == kind)
    }

    /// Run one trial of `ticks` ticks (possibly extended mid-flight).
    pub fn run_trial(&self, ticks: u64, rng: &mut impl Rng) -> TrialResult {
        let cfg = &self.cfg;
        let mut st = TrialState::new(cfg, ticks);
        let mut out = TrialResult::default();

        while (st.tick as f64) < st.end_time {
            let t = st.tick;

            if st.pending_reset {
                st.mana.reset();
                st.pending_reset = false;
            }

            // Banked charges detonate before anything else, channels included.
            if let Some(rule) = &cfg.charges {
                let due = st.charges.take_due(t);
                for _ in 0..due {
                    let hit = damage::roll_hit(
                        rng,
                        cfg.stats.attack_power * rule.mult,
                        cfg.stats.crit_rate,
                        cfg.stats.crit_dmg,
                    );
                    out.damage.add(rule.skill, hit.damage);
                }
            }

            // Forced multi-tick states own the whole tick: no action choice,
            // no mana gain.
            if st.channel_left > 0 {
                self.channel_tick(&mut st, &mut out, rng);
                st.tick += 1;
                continue;
            }
            if st.lockout_left > 0 {
                st.lockout_left -= 1;
                st.tick += 1;
                continue;
            }
            if let Some(rule) = &cfg.opening {
                if st.opening_left > 0 {
                    let mult = rule.mult * (1.0 + st.opening_left as f64 * rule.per_stack_bonus);
                    let hit = damage::roll_hit(
                        rng,
                        cfg.stats.attack_power * mult,
                        cfg.stats.crit_rate,
                        cfg.stats.crit_dmg,
                    );
                    out.damage.add(ActionKind::Ult, hit.damage);
                    out.casts.add(ActionKind::Ult);
                    st.opening_left -= 1;
                }
                // Idle once the stacks run out. Either way: no mana economy.
                st.tick += 1;
                continue;
            }

            let buffed = st.buff.active(t);
            let mut was_basic = false;
            let mut skip_regen = false;

            if t == st.next_reload {
                // The reload consumes the tick; regen still applies.
                if let Some(rule) = &cfg.ammo {
                    st.ammo = roll_ammo_load(rng, rule);
                    st.next_reload += rule.interval_ticks;
                }
            } else {
                let act = self.select(&mut st, buffed, rng);
                match act {
                    Act::Resolved(Choice::Ult) => {
                        skip_regen = self.cast_ult(&mut st, &mut out, rng, t);
                    }
                    Act::Resolved(Choice::Counter(index)) => {
                        self.fire_counter(index, &mut st, &mut out, rng, buffed);
                    }
                    Act::Resolved(Choice::Skill(index)) => {
                        self.cast_skill(index, &mut st, &mut out, rng, t, buffed);
                    }
                    Act::Resolved(Choice::Basic) => {
                        let base = self.effective_attack_power(buffed)
                            * cfg.basic_mult
                            * self.damage_scale(buffed);
                        let hit =
                            damage::roll_hit(rng, base, cfg.stats.crit_rate, cfg.stats.crit_dmg);
                        out.damage
                            .add(self.book_kind(buffed, ActionKind::Basic), hit.damage);
                        out.casts.add(ActionKind::Basic);
                        st.counters.record_basic(&cfg.counters);
                        was_basic = true;
                    }
                    Act::AmmoShot { mult } => {
                        st.ammo -= 1;
                        let base =
                            self.effective_attack_power(buffed) * mult * self.damage_scale(buffed);
                        let hit =
                            damage::roll_hit(rng, base, cfg.stats.crit_rate, cfg.stats.crit_dmg);
                        out.damage
                            .add(self.book_kind(buffed, ActionKind::Skill1), hit.damage);
                        out.casts.add(ActionKind::Skill1);
                        // A loaded shot is still a basic attack to counters.
                        st.counters.record_basic(&cfg.counters);
                    }
                }
            }

            // Damage-over-time window ticks after the action, cast tick
            // included; a fractional tail is prorated.
            if let Some(rule) = &cfg.dot {
                if st.dot_left > 0.0 && rule.tick_mult > 0.0 {
                    let active = st.dot_left.min(1.0);
                    let hit = damage::roll_hit(
                        rng,
                        cfg.stats.attack_power * rule.tick_mult * active,
                        cfg.stats.crit_rate,
                        cfg.stats.crit_dmg,
                    );
                    out.damage.add(rule.skill, hit.damage);
                }
                st.dot_left -= 1.0;
            }

            // Terminal effects fire exactly once, on the tick the window
            // closes; they precede the (possibly suspended) regen.
            if let Some(rule) = &cfg.buff {
                if st.buff.closes_at(t) {
                    if let Some(mult) = rule.expiry_burst_mult {
                        let hit = damage::roll_hit(
                            rng,
                            cfg.stats.attack_power * mult,
                            cfg.stats.crit_rate,
                            cfg.stats.crit_dmg,
                        );
                        out.damage.add(ActionKind::Ult, hit.damage);
                    }
                    if rule.expiry_resets_mana {
                        st.mana.reset();
                    }
                }
                // Post-action check so a cast that just opened the window
                // already suspends its own tick.
                if rule.suspend_regen && st.buff.active(t) {
                    skip_regen = true;
                }
            }

            if !skip_regen {
                st.mana
                    .gain(cfg.mana.end_of_tick_gain(cfg.stats.attack_speed, was_basic));
            }
            st.tick += 1;
        }

        out.ticks_run = st.tick;
        out
    }

    /// Chain continuation and ammo interception, then the resolver.
    fn select(&self, st: &mut TrialState, buffed: bool, rng: &mut impl Rng) -> Act {
        let cfg = &self.cfg;

        if st.chain_active {
            st.chain_active = false;
            if let Some(rule) = &cfg.chain {
                let yields = rule.yields_to_ult
                    && resolver::ult_ready(cfg, st.mana.current(), buffed);
                if !yields {
                    if let Some(index) = self.skill_index(rule.skill) {
                        return Act::Resolved(Choice::Skill(index));
                    }
                }
            }
        }

        if st.ammo > 0 {
            if let Some(rule) = &cfg.ammo {
                // Only a ready ultimate outranks a loaded shot; no rate
                // draw happens while rounds remain.
                return if resolver::ult_ready(cfg, st.mana.current(), buffed) {
                    Act::Resolved(Choice::Ult)
                } else {
                    Act::AmmoShot { mult: rule.mult }
                };
            }
        }

        Act::Resolved(resolver::choose(
            cfg,
            st.mana.current(),
            st.counters.values(),
            buffed,
            rng,
        ))
    }

    /// Returns true when the cast tick must not gain mana.
    fn cast_ult(
        &self,
        st: &mut TrialState,
        out: &mut TrialResult,
        rng: &mut impl Rng,
        t: u64,
    ) -> bool {
        let cfg = &self.cfg;
        let Some(rule) = &cfg.ult else {
            return false;
        };
        let crit_rate = rule.crit_rate_override.unwrap_or(cfg.stats.crit_rate);
        let mut skip_regen = false;
        out.casts.add(ActionKind::Ult);

        match rule.style {
            UltStyle::Strike => {
                let hit = damage::roll_hit(
                    rng,
                    cfg.stats.attack_power * rule.mult,
                    crit_rate,
                    cfg.stats.crit_dmg,
                );
                out.damage.add(ActionKind::Ult, hit.damage);
            }
            UltStyle::Lockout { ticks } => {
                let hit = damage::roll_hit(
                    rng,
                    cfg.stats.attack_power * rule.mult,
                    crit_rate,
                    cfg.stats.crit_dmg,
                );
                out.damage.add(ActionKind::Ult, hit.damage);
                st.lockout_left = ticks;
            }
            UltStyle::Channel { ticks, crit } => {
                st.channel_left = ticks;
                if crit == ChannelCrit::Once {
                    st.channel_crit_mult =
                        damage::crit_multiplier(rng, crit_rate, cfg.stats.crit_dmg);
                }
                st.mana.reset();
                // First channel tick lands on the cast tick itself.
                self.channel_tick(st, out, rng);
                skip_regen = true;
            }
            UltStyle::Empower => {
                skip_regen = true;
            }
        }

        if !matches!(rule.style, UltStyle::Channel { .. }) {
            if let Some(buff) = &cfg.buff {
                let start = if buff.starts_next_tick { t + 1 } else { t };
                st.buff.open(start, buff.duration_ticks);
            }
        }

        match rule.reset {
            ManaReset::Immediate => st.mana.reset(),
            ManaReset::NextTick => st.pending_reset = true,
            ManaReset::AtBuffExpiry => {}
        }

        skip_regen
    }

    fn channel_tick(&self, st: &mut TrialState, out: &mut TrialResult, rng: &mut impl Rng) {
        let cfg = &self.cfg;
        let Some(rule) = &cfg.ult else {
            return;
        };
        let UltStyle::Channel { ticks, crit } = rule.style else {
            return;
        };
        let per_tick = cfg.stats.attack_power * rule.mult / ticks as f64;
        let crit_rate = rule.crit_rate_override.unwrap_or(cfg.stats.crit_rate);
        let dealt = match crit {
            ChannelCrit::PerTick => {
                damage::roll_hit(rng, per_tick, crit_rate, cfg.stats.crit_dmg).damage
            }
            ChannelCrit::Once => per_tick * st.channel_crit_mult,
        };
        out.damage.add(ActionKind::Ult, dealt);
        st.channel_left -= 1;
        if st.channel_left == 0 {
            st.mana.reset();
        }
    }

    fn fire_counter(
        &self,
        index: usize,
        st: &mut TrialState,
        out: &mut TrialResult,
        rng: &mut impl Rng,
        buffed: bool,
    ) {
        let cfg = &self.cfg;
        let rule = &cfg.counters[index];
        st.counters.spend(index, rule);

        let base = self.effective_attack_power(buffed) * rule.mult * self.damage_scale(buffed);
        let hit = damage::roll_hit(rng, base, cfg.stats.crit_rate, cfg.stats.crit_dmg);
        out.damage.add(self.book_kind(buffed, rule.fires), hit.damage);
        out.casts.add(rule.fires);

        if hit.crit && rule.crit_mana > 0.0 {
            st.mana.gain(cfg.mana.scaled(rule.crit_mana));
        }
        if let Some(target) = rule.feeds {
            st.counters.feed(target);
        }
        if rule.extend_ticks > 0.0 {
            st.end_time += rule.extend_ticks;
        }
    }

    fn cast_skill(
        &self,
        index: usize,
        st: &mut TrialState,
        out: &mut TrialResult,
        rng: &mut impl Rng,
        t: u64,
        buffed: bool,
    ) {
        let cfg = &self.cfg;
        let skill = &cfg.skills[index];
        out.casts.add(skill.kind);

        let is_dot = cfg.dot.as_ref().is_some_and(|d| d.skill == skill.kind);
        let is_charge = cfg.charges.as_ref().is_some_and(|c| c.skill == skill.kind);

        if is_dot {
            if let Some(rule) = &cfg.dot {
                // Re-application resets the window; it never stacks.
                st.dot_left = rule.duration_ticks;
            }
        } else if is_charge {
            if let Some(rule) = &cfg.charges {
                st.charges.bank(t + rule.delay_ticks);
                if st.charges.len() >= rule.burst_at {
                    let count = st.charges.burst();
                    for _ in 0..count {
                        let hit = damage::roll_hit(
                            rng,
                            cfg.stats.attack_power * rule.burst_mult,
                            cfg.stats.crit_rate,
                            cfg.stats.crit_dmg,
                        );
                        out.damage.add(skill.kind, hit.damage);
                    }
                }
            }
        } else if skill.extend_ticks > 0.0 {
            st.end_time += skill.extend_ticks;
        } else {
            let scale = if buffed {
                cfg.buff.as_ref().map_or(1.0, |b| b.skill_mult_scale)
            } else {
                1.0
            };
            let base = self.effective_attack_power(buffed)
                * skill.mult
                * scale
                * self.damage_scale(buffed);
            let hit = damage::roll_hit(rng, base, cfg.stats.crit_rate, cfg.stats.crit_dmg);
            out.damage.add(self.book_kind(buffed, skill.kind), hit.damage);
        }

        if skill.mana_on_cast > 0.0 {
            st.mana.gain(cfg.mana.scaled(skill.mana_on_cast));
        }

        if buffed {
            if let Some(ext) = cfg.buff.as_ref().and_then(|b| b.extend.as_ref()) {
                if ext.on_skills.contains(&skill.kind) {
                    st.buff.extend(ext.ticks);
                }
            }
        }

        if let Some(chain) = &cfg.chain {
            if chain.skill == skill.kind {
                st.chain_active = rng.gen::<f64>() * 100.0 < chain.react_rate;
            }
        }

        if let Some(combo) = &cfg.combo {
            match skill.kind {
                ActionKind::Skill1 => st.last_skill1 = Some(t),
                ActionKind::Skill2 => st.last_skill2 = Some(t),
                _ => {}
            }
            st.combo_casts += 1;
            if st.combo_casts % combo.every == 0 {
                let mut mult = combo.mult;
                if let Some(last) = st.last_skill1 {
                    if (t - last) as f64 <= combo.lookback_ticks {
                        mult += combo.skill1_bonus;
                    }
                }
                if let Some(last) = st.last_skill2 {
                    if (t - last) as f64 <= combo.lookback_ticks {
                        mult += combo.skill2_bonus;
                    }
                }
                let hit = damage::roll_hit(
                    rng,
                    cfg.stats.attack_power * mult,
                    cfg.stats.crit_rate,
                    cfg.stats.crit_dmg,
                );
                out.damage.add(ActionKind::Skill3, hit.damage);
                out.casts.add(ActionKind::Skill3);
                if buffed {
                    if let Some(ext) = cfg.buff.as_ref().and_then(|b| b.extend.as_ref()) {
                        if ext.on_combo {
                            st.buff.extend(ext.ticks);
                        }
                    }
                }
            }
        }
    }
}
