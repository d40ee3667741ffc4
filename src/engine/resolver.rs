//! Per-tick action selection.
//!
//! Implements the priority policy for a tick that is *not* inside a forced
//! multi-tick state (channels, lockouts, chains, ammo phases are handled by
//! the trial driver before this runs):
//!
//! 1. ultimate, if the pool has reached its threshold (a threshold of zero
//!    fires every tick; an absent rule never fires),
//! 2. the first ready stack counter, in config order,
//! 3. one uniform draw over the cumulative skill rates,
//! 4. basic attack — after first offering the draw to counters flagged
//!    `after_rates`.
//!
//! Draw economy: ticks with at least one configured skill slot consume
//! exactly one uniform draw when they reach step 3; ticks resolved earlier,
//! or with no skill slots at all, consume none.

use rand::Rng;

use crate::config::SimConfig;

/// What the policy picked for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Ult,
    /// Index into `SimConfig::counters`.
    Counter(usize),
    /// Index into `SimConfig::skills`.
    Skill(usize),
    Basic,
}

/// Is the ultimate castable right now?
pub fn ult_ready(cfg: &SimConfig, mana: f64, buff_active: bool) -> bool {
    let Some(ult) = &cfg.ult else {
        return false;
    };
    if buff_active && cfg.buff.as_ref().is_some_and(|b| b.block_ult) {
        return false;
    }
    mana >= ult.mana_cost
}

pub fn choose(
    cfg: &SimConfig,
    mana: f64,
    counter_values: &[u32],
    buff_active: bool,
    rng: &mut impl Rng,
) -> Choice {
    if ult_ready(cfg, mana, buff_active) {
        return Choice::Ult;
    }

    for (index, rule) in cfg.counters.iter().enumerate() {
        if !rule.after_rates && counter_values[index] >= rule.threshold {
            return Choice::Counter(index);
        }
    }

    if !cfg.skills.is_empty() {
        let bonus = if buff_active {
            cfg.buff.as_ref().map_or(0.0, |b| b.rate_bonus)
        } else {
            0.0
        };
        let weights: Vec<f64> = cfg.skills.iter().map(|s| s.rate + bonus).collect();
        let skill_mass: f64 = weights.iter().sum();
        // Rate bonuses can push the sum past 100; basic then has zero mass
        // and the draw is taken over the inflated total.
        let basic_mass = (100.0 - skill_mass).max(0.0);
        let mut roll = rng.gen::<f64>() * (skill_mass + basic_mass);
        for (index, weight) in weights.iter().enumerate() {
            if roll < *weight {
                return Choice::Skill(index);
            }
            roll -= weight;
        }
    }

    for (index, rule) in cfg.counters.iter().enumerate() {
        if rule.after_rates && counter_values[index] >= rule.threshold {
            return Choice::Counter(index);
        }
    }

    Choice::Basic
}
