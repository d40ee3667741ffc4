//! Error taxonomy for the simulator.
//!
//! Every failure here is a caller input problem. Configurations are checked
//! once, before the first tick of the first trial; nothing is retried or
//! silently replaced with a default.

use thiserror::Error;

/// A rejected character configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("attack_speed must be > 0 (got {0})")]
    NonPositiveAttackSpeed(f64),

    #[error("{name} must be within 0..=100 (got {value})")]
    RateOutOfRange { name: &'static str, value: f64 },

    #[error("skill rates sum to {0}, which exceeds 100")]
    RatesExceedBudget(f64),

    #[error("{name} must be >= 0 (got {value})")]
    NegativeValue { name: &'static str, value: f64 },

    #[error("{name} must be >= 1 (got {value})")]
    ZeroInterval { name: &'static str, value: u64 },

    #[error("counter {index} feeds counter {target}, which does not exist")]
    BadCounterFeed { index: usize, target: usize },

    #[error("{rule} references skill slot {slot:?}, which is not configured")]
    MissingSkillSlot {
        rule: &'static str,
        slot: crate::config::ActionKind,
    },

    #[error("mana reset is AtBuffExpiry but no buff window resets mana")]
    DanglingManaReset,

    #[error("{name} extends the trial faster than it elapses; the trial would never end")]
    DivergentExtension { name: &'static str },
}

/// A rejected simulation invocation.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("trials must be >= 1")]
    NoTrials,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
