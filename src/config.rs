//! Simulation configuration: one declarative rule table per character.
//!
//! A `SimConfig` carries everything a trial needs — derived stats, the
//! probability-triggered skill slots, the ultimate rule, the mana economy,
//! stack counters, and the narrowly-scoped hook rules for mechanics that
//! cannot be expressed as plain table entries. Adding a character means
//! building a new config row (see `roster`), not adding control flow.
//!
//! Configs are immutable for the duration of a trial batch and validated
//! once, up front.

use serde::Serialize;

use crate::error::ConfigError;

/// Damage categories tracked in the per-trial breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionKind {
    Basic,
    Skill1,
    Skill2,
    Skill3,
    Ult,
}

/// Derived combat stats, produced by the (external) stat derivation layer.
///
/// One tick corresponds to one attack, so `attack_speed` only enters the
/// simulation through mana regeneration and time-window lengths.
#[derive(Debug, Clone, Copy)]
pub struct CombatStats {
    pub attack_power: f64,
    /// Attacks per second. Must be > 0.
    pub attack_speed: f64,
    /// Percent, 0..=100.
    pub crit_rate: f64,
    /// Multiplier applied on a critical hit (e.g. 2.5).
    pub crit_dmg: f64,
}

impl CombatStats {
    pub fn new(attack_power: f64, attack_speed: f64, crit_rate: f64, crit_dmg: f64) -> Self {
        Self {
            attack_power,
            attack_speed,
            crit_rate,
            crit_dmg,
        }
    }
}

/// A probability-triggered skill slot.
#[derive(Debug, Clone)]
pub struct SkillRule {
    /// Category the cast is booked under.
    pub kind: ActionKind,
    /// Trigger chance per eligible tick, percent 0..=100.
    pub rate: f64,
    /// Damage multiplier. Zero is legal (a zero-damage cast still rolls its
    /// crit; utility slots use `extend_ticks` instead).
    pub mult: f64,
    /// If > 0 the cast deals no damage and prolongs the trial end-time by
    /// this many ticks instead.
    pub extend_ticks: f64,
    /// Flat mana granted per cast, before the regen multiplier.
    pub mana_on_cast: f64,
}

impl SkillRule {
    pub fn new(kind: ActionKind, rate: f64, mult: f64) -> Self {
        Self {
            kind,
            rate,
            mult,
            extend_ticks: 0.0,
            mana_on_cast: 0.0,
        }
    }
}

/// When the mana pool is forced back to zero after an ultimate cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManaReset {
    /// On the cast tick, before end-of-tick regen.
    Immediate,
    /// At the start of the following tick (cast-tick regen survives).
    NextTick,
    /// Only when the ultimate's buff window expires.
    AtBuffExpiry,
}

/// How a channeled ultimate rolls its crits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelCrit {
    /// Independent roll every channel tick.
    PerTick,
    /// One roll at cast, applied to the whole channel.
    Once,
}

/// Cast shape of the ultimate.
#[derive(Debug, Clone, Copy)]
pub enum UltStyle {
    /// One damage event on the cast tick.
    Strike,
    /// Total damage spread evenly over `ticks` ticks starting on the cast
    /// tick; no other action and no regen until the channel ends, then the
    /// pool is zeroed.
    Channel { ticks: u64, crit: ChannelCrit },
    /// Full strike on the cast tick, then `ticks` dead ticks with no action
    /// and no regen.
    Lockout { ticks: u64 },
    /// No damage event; the cast only opens the buff window. The cast tick
    /// gains no mana.
    Empower,
}

/// The ultimate rule. Absent entirely (`SimConfig::ult == None`) when the
/// ultimate can never fire — there is no numeric "unreachable" sentinel.
#[derive(Debug, Clone)]
pub struct UltRule {
    /// Pool threshold. A threshold of 0 fires on every tick.
    pub mana_cost: f64,
    pub mult: f64,
    /// Some characters crit their ultimate at a fixed rate regardless of
    /// stats.
    pub crit_rate_override: Option<f64>,
    pub style: UltStyle,
    pub reset: ManaReset,
}

impl UltRule {
    pub fn strike(mana_cost: f64, mult: f64) -> Self {
        Self {
            mana_cost,
            mult,
            crit_rate_override: None,
            style: UltStyle::Strike,
            reset: ManaReset::Immediate,
        }
    }
}

/// Which ticks earn the passive 1/attack_speed share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegenMode {
    /// Every tick, whatever the action was.
    EveryTick,
    /// Only ticks whose action was a basic attack.
    BasicTickOnly,
    /// Character has no mana economy at all.
    None,
}

/// Mana regeneration rule.
#[derive(Debug, Clone)]
pub struct ManaRule {
    pub regen: RegenMode,
    /// Extra flat gain on basic-attack ticks.
    pub basic_bonus: f64,
    /// External regen multiplier applied to every gain.
    pub multiplier: f64,
}

impl Default for ManaRule {
    fn default() -> Self {
        Self {
            regen: RegenMode::EveryTick,
            basic_bonus: 0.0,
            multiplier: 1.0,
        }
    }
}

impl ManaRule {
    /// End-of-tick gain for a tick whose action was (or was not) a basic
    /// attack. Returns 0 when regeneration is suspended elsewhere.
    pub fn end_of_tick_gain(&self, attack_speed: f64, was_basic: bool) -> f64 {
        let passive = match self.regen {
            RegenMode::EveryTick => 1.0 / attack_speed,
            RegenMode::BasicTickOnly if was_basic => 1.0 / attack_speed,
            RegenMode::BasicTickOnly => 0.0,
            RegenMode::None => return 0.0,
        };
        let bonus = if was_basic { self.basic_bonus } else { 0.0 };
        (passive + bonus) * self.multiplier
    }

    /// Scale a flat grant (skill cast bonus, crit bonus) by the multiplier.
    pub fn scaled(&self, amount: f64) -> f64 {
        amount * self.multiplier
    }
}

/// How a counter is consumed when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterSpend {
    ResetToZero,
    SubtractThreshold,
}

/// A stack counter that forces a skill once it reaches its threshold.
///
/// Counters are checked in config order; the first ready counter wins.
#[derive(Debug, Clone)]
pub struct CounterRule {
    pub threshold: u32,
    pub spend: CounterSpend,
    /// Category of the forced cast.
    pub fires: ActionKind,
    pub mult: f64,
    /// Incremented by every basic attack (loaded ammo shots included).
    pub counts_basics: bool,
    /// Another counter to bump by one when this one fires.
    pub feeds: Option<usize>,
    /// Prolong the trial end-time by this many ticks when fired.
    pub extend_ticks: f64,
    /// Flat mana granted when the forced cast crits.
    pub crit_mana: f64,
    /// Check this counter only after the probability roll has already landed
    /// on "basic" (one character interleaves its counter below its rate
    /// skills).
    pub after_rates: bool,
}

impl CounterRule {
    pub fn basic_counter(threshold: u32, fires: ActionKind, mult: f64) -> Self {
        Self {
            threshold,
            spend: CounterSpend::ResetToZero,
            fires,
            mult,
            counts_basics: true,
            feeds: None,
            extend_ticks: 0.0,
            crit_mana: 0.0,
            after_rates: false,
        }
    }
}

/// Extension triggers for an active buff window.
#[derive(Debug, Clone)]
pub struct BuffExtend {
    pub ticks: f64,
    /// Skill categories whose casts extend the window.
    pub on_skills: Vec<ActionKind>,
    /// Combo procs extend the window too.
    pub on_combo: bool,
}

/// A timed buff window opened by the ultimate.
///
/// Re-triggering replaces the expiry (duration never accumulates); the
/// designated extension triggers add a fixed increment instead.
#[derive(Debug, Clone)]
pub struct BuffRule {
    /// Window length in ticks. Fractional values are legal and never rounded
    /// here — each character rounds (or doesn't) when building its config.
    pub duration_ticks: f64,
    /// Window opens on the tick after the cast rather than on the cast tick.
    pub starts_next_tick: bool,
    /// Flat percentage added to every skill trigger rate while active.
    pub rate_bonus: f64,
    /// Multiplies skill damage multipliers while active (basic unaffected).
    pub skill_mult_scale: f64,
    /// Replaces attack power while active.
    pub attack_power: Option<f64>,
    /// Scales every damage event dealt while active.
    pub damage_scale: f64,
    /// Book damage dealt while active under the ultimate category.
    pub credit_to_ult: bool,
    /// No mana regeneration while active.
    pub suspend_regen: bool,
    /// The ultimate cannot be re-cast while active.
    pub block_ult: bool,
    pub extend: Option<BuffExtend>,
    /// One strike at this multiplier when the window closes.
    pub expiry_burst_mult: Option<f64>,
    /// Force the pool to zero when the window closes.
    pub expiry_resets_mana: bool,
}

impl Default for BuffRule {
    fn default() -> Self {
        Self {
            duration_ticks: 0.0,
            starts_next_tick: false,
            rate_bonus: 0.0,
            skill_mult_scale: 1.0,
            attack_power: None,
            damage_scale: 1.0,
            credit_to_ult: false,
            suspend_regen: false,
            block_ult: false,
            extend: None,
            expiry_burst_mult: None,
            expiry_resets_mana: false,
        }
    }
}

/// Chain hook: after a given skill, re-cast it next tick with probability
/// `react_rate`, repeating until a roll fails.
#[derive(Debug, Clone)]
pub struct ChainRule {
    pub skill: ActionKind,
    /// Percent 0..=100.
    pub react_rate: f64,
    /// A ready ultimate breaks the chain instead of being delayed by it.
    pub yields_to_ult: bool,
}

/// Damage-over-time hook: the skill applies a window instead of hitting.
/// Each tick inside the window deals `tick_mult` with its own crit roll; a
/// fractional final tick deals the prorated fraction. Re-application resets
/// the window.
#[derive(Debug, Clone)]
pub struct DotRule {
    pub skill: ActionKind,
    pub duration_ticks: f64,
    pub tick_mult: f64,
}

/// Delayed-charge hook: the skill banks a charge that detonates
/// `delay_ticks` later. Banking the `burst_at`-th charge while the others
/// are still pending detonates all of them immediately at `burst_mult` each.
#[derive(Debug, Clone)]
pub struct ChargeRule {
    pub skill: ActionKind,
    pub delay_ticks: u64,
    pub mult: f64,
    pub burst_at: usize,
    pub burst_mult: f64,
}

/// Ammo hook: every `interval_ticks` a reload consumes the whole tick and
/// loads 1..=capacity rounds (`full_rate`% chance of a full load, otherwise
/// uniform). While rounds remain, every non-ultimate tick fires a loaded
/// shot that still counts as a basic attack for stack counters.
#[derive(Debug, Clone)]
pub struct AmmoRule {
    pub interval_ticks: u64,
    pub capacity: u32,
    /// Percent 0..=100.
    pub full_rate: f64,
    pub mult: f64,
}

/// Combo hook: every `every`-th probability-rolled skill cast procs a bonus
/// hit on the same tick (no tick consumed). The proc multiplier grows by the
/// slot bonuses when that slot landed within the lookback window, the
/// current tick included.
#[derive(Debug, Clone)]
pub struct ComboRule {
    pub every: u32,
    pub mult: f64,
    pub lookback_ticks: f64,
    pub skill1_bonus: f64,
    pub skill2_bonus: f64,
}

/// Opening-stacks hook: the trial opens with `stacks` pre-banked empowered
/// strikes, one per tick, each scaling with the stacks remaining at the
/// moment of the strike. Once exhausted the character idles; there is no
/// mana economy.
#[derive(Debug, Clone)]
pub struct OpeningStacksRule {
    pub stacks: u32,
    pub per_stack_bonus: f64,
    pub mult: f64,
}

/// Rounding applied when a caller supplies a duration in seconds instead of
/// a tick count. Character kits disagree on this; each config keeps its own
/// rule rather than unifying them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationRounding {
    Floor,
    Round,
}

/// The full rule table for one character.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub stats: CombatStats,
    pub basic_mult: f64,
    /// Probability-triggered skills, in roll order.
    pub skills: Vec<SkillRule>,
    /// `None` means the ultimate can never fire.
    pub ult: Option<UltRule>,
    pub mana: ManaRule,
    /// Stack counters, in check order.
    pub counters: Vec<CounterRule>,
    pub buff: Option<BuffRule>,
    pub chain: Option<ChainRule>,
    pub dot: Option<DotRule>,
    pub charges: Option<ChargeRule>,
    pub ammo: Option<AmmoRule>,
    pub combo: Option<ComboRule>,
    pub opening: Option<OpeningStacksRule>,
    pub duration_rounding: DurationRounding,
}

impl SimConfig {
    /// A bare config: basic attacks only, no ultimate, default mana rule.
    pub fn new(stats: CombatStats) -> Self {
        Self {
            stats,
            basic_mult: 1.0,
            skills: Vec::new(),
            ult: None,
            mana: ManaRule::default(),
            counters: Vec::new(),
            buff: None,
            chain: None,
            dot: None,
            charges: None,
            ammo: None,
            combo: None,
            opening: None,
            duration_rounding: DurationRounding::Round,
        }
    }

    /// Convert a duration in seconds to ticks using this config's rounding
    /// rule (`ticks = rounding(seconds * attack_speed)`).
    pub fn ticks_for_duration(&self, seconds: f64) -> u64 {
        let raw = seconds * self.stats.attack_speed;
        let ticks = match self.duration_rounding {
            DurationRounding::Floor => raw.floor(),
            DurationRounding::Round => raw.round(),
        };
        if ticks <= 0.0 {
            0
        } else {
            ticks as u64
        }
    }

    fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&value) {
            return Err(ConfigError::RateOutOfRange { name, value });
        }
        Ok(())
    }

    fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
        if value < 0.0 {
            return Err(ConfigError::NegativeValue { name, value });
        }
        Ok(())
    }

    fn has_skill_slot(&self, kind: ActionKind) -> bool {
        self.skills.iter().any(|s| s.kind == kind)
    }

    /// Validate the whole table. Called by `Engine::new`; nothing runs on an
    /// invalid config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stats.attack_speed <= 0.0 {
            return Err(ConfigError::NonPositiveAttackSpeed(self.stats.attack_speed));
        }
        Self::check_rate("crit_rate", self.stats.crit_rate)?;
        Self::check_non_negative("crit_dmg", self.stats.crit_dmg)?;
        Self::check_non_negative("attack_power", self.stats.attack_power)?;
        Self::check_non_negative("basic_mult", self.basic_mult)?;

        let mut rate_sum = 0.0;
        for skill in &self.skills {
            Self::check_rate("skill rate", skill.rate)?;
            Self::check_non_negative("skill mult", skill.mult)?;
            Self::check_non_negative("skill extend_ticks", skill.extend_ticks)?;
            Self::check_non_negative("skill mana_on_cast", skill.mana_on_cast)?;
            // A cast extends the trial by extend_ticks with probability
            // rate/100; an expected extension of a tick or more per tick
            // means the end-time outruns the cursor forever.
            if skill.extend_ticks > 0.0 && skill.rate / 100.0 * skill.extend_ticks >= 1.0 {
                return Err(ConfigError::DivergentExtension {
                    name: "skill extend_ticks",
                });
            }
            rate_sum += skill.rate;
        }
        if rate_sum > 100.0 {
            return Err(ConfigError::RatesExceedBudget(rate_sum));
        }

        if let Some(ult) = &self.ult {
            Self::check_non_negative("ult mana_cost", ult.mana_cost)?;
            Self::check_non_negative("ult mult", ult.mult)?;
            if let Some(rate) = ult.crit_rate_override {
                Self::check_rate("ult crit_rate_override", rate)?;
            }
            match ult.style {
                UltStyle::Channel { ticks, .. } => {
                    if ticks == 0 {
                        return Err(ConfigError::ZeroInterval {
                            name: "channel ticks",
                            value: ticks,
                        });
                    }
                }
                UltStyle::Strike | UltStyle::Lockout { .. } | UltStyle::Empower => {}
            }
            if ult.reset == ManaReset::AtBuffExpiry {
                let ok = self
                    .buff
                    .as_ref()
                    .map(|b| b.expiry_resets_mana)
                    .unwrap_or(false);
                if !ok {
                    return Err(ConfigError::DanglingManaReset);
                }
            }
        }

        Self::check_non_negative("mana basic_bonus", self.mana.basic_bonus)?;
        Self::check_non_negative("mana multiplier", self.mana.multiplier)?;

        for (index, counter) in self.counters.iter().enumerate() {
            if counter.threshold == 0 {
                return Err(ConfigError::ZeroInterval {
                    name: "counter threshold",
                    value: 0,
                });
            }
            Self::check_non_negative("counter mult", counter.mult)?;
            Self::check_non_negative("counter extend_ticks", counter.extend_ticks)?;
            Self::check_non_negative("counter crit_mana", counter.crit_mana)?;
            // A counter needs threshold feeding ticks between fires, so an
            // extension at or above the threshold can outrun the cursor.
            if counter.extend_ticks >= counter.threshold as f64 {
                return Err(ConfigError::DivergentExtension {
                    name: "counter extend_ticks",
                });
            }
            if let Some(target) = counter.feeds {
                if target >= self.counters.len() || target == index {
                    return Err(ConfigError::BadCounterFeed { index, target });
                }
            }
        }

        if let Some(buff) = &self.buff {
            Self::check_non_negative("buff duration_ticks", buff.duration_ticks)?;
            Self::check_non_negative("buff rate_bonus", buff.rate_bonus)?;
            Self::check_non_negative("buff skill_mult_scale", buff.skill_mult_scale)?;
            Self::check_non_negative("buff damage_scale", buff.damage_scale)?;
            if let Some(ap) = buff.attack_power {
                Self::check_non_negative("buff attack_power", ap)?;
            }
            if let Some(mult) = buff.expiry_burst_mult {
                Self::check_non_negative("buff expiry_burst_mult", mult)?;
            }
            if let Some(extend) = &buff.extend {
                Self::check_non_negative("buff extend ticks", extend.ticks)?;
            }
        }

        if let Some(chain) = &self.chain {
            Self::check_rate("chain react_rate", chain.react_rate)?;
            if !self.has_skill_slot(chain.skill) {
                return Err(ConfigError::MissingSkillSlot {
                    rule: "chain",
                    slot: chain.skill,
                });
            }
        }
        if let Some(dot) = &self.dot {
            Self::check_non_negative("dot duration_ticks", dot.duration_ticks)?;
            Self::check_non_negative("dot tick_mult", dot.tick_mult)?;
            if !self.has_skill_slot(dot.skill) {
                return Err(ConfigError::MissingSkillSlot {
                    rule: "dot",
                    slot: dot.skill,
                });
            }
        }
        if let Some(charges) = &self.charges {
            Self::check_non_negative("charge mult", charges.mult)?;
            Self::check_non_negative("charge burst_mult", charges.burst_mult)?;
            if charges.burst_at == 0 {
                return Err(ConfigError::ZeroInterval {
                    name: "charge burst_at",
                    value: 0,
                });
            }
            if !self.has_skill_slot(charges.skill) {
                return Err(ConfigError::MissingSkillSlot {
                    rule: "charges",
                    slot: charges.skill,
                });
            }
        }
        if let Some(ammo) = &self.ammo {
            if ammo.interval_ticks == 0 {
                return Err(ConfigError::ZeroInterval {
                    name: "ammo interval_ticks",
                    value: 0,
                });
            }
            if ammo.capacity == 0 {
                return Err(ConfigError::ZeroInterval {
                    name: "ammo capacity",
                    value: 0,
                });
            }
            Self::check_rate("ammo full_rate", ammo.full_rate)?;
            Self::check_non_negative("ammo mult", ammo.mult)?;
        }
        if let Some(combo) = &self.combo {
            if combo.every == 0 {
                return Err(ConfigError::ZeroInterval {
                    name: "combo every",
                    value: 0,
                });
            }
            Self::check_non_negative("combo mult", combo.mult)?;
            Self::check_non_negative("combo lookback_ticks", combo.lookback_ticks)?;
            Self::check_non_negative("combo skill1_bonus", combo.skill1_bonus)?;
            Self::check_non_negative("combo skill2_bonus", combo.skill2_bonus)?;
        }
        if let Some(opening) = &self.opening {
            Self::check_non_negative("opening per_stack_bonus", opening.per_stack_bonus)?;
            Self::check_non_negative("opening mult", opening.mult)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> CombatStats {
        CombatStats::new(100.0, 1.0, 0.0, 2.0)
    }

    #[test]
    fn test_bare_config_is_valid() {
        assert!(SimConfig::new(stats()).validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_attack_speed() {
        let mut cfg = SimConfig::new(stats());
        cfg.stats.attack_speed = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositiveAttackSpeed(_))
        ));
    }

    #[test]
    fn test_rejects_rate_out_of_range() {
        let mut cfg = SimConfig::new(stats());
        cfg.skills
            .push(SkillRule::new(ActionKind::Skill1, 120.0, 2.0));
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::RateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_rates_summing_past_100() {
        let mut cfg = SimConfig::new(stats());
        cfg.skills.push(SkillRule::new(ActionKind::Skill1, 60.0, 2.0));
        cfg.skills.push(SkillRule::new(ActionKind::Skill2, 50.0, 3.0));
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::RatesExceedBudget(_))
        ));
    }

    #[test]
    fn test_rejects_negative_mult() {
        let mut cfg = SimConfig::new(stats());
        cfg.basic_mult = -1.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NegativeValue { .. })
        ));
    }

    #[test]
    fn test_rejects_dangling_chain_slot() {
        let mut cfg = SimConfig::new(stats());
        cfg.chain = Some(ChainRule {
            skill: ActionKind::Skill2,
            react_rate: 50.0,
            yields_to_ult: false,
        });
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingSkillSlot { .. })
        ));
    }

    #[test]
    fn test_rejects_buffless_at_expiry_reset() {
        let mut cfg = SimConfig::new(stats());
        cfg.ult = Some(UltRule {
            reset: ManaReset::AtBuffExpiry,
            ..UltRule::strike(100.0, 10.0)
        });
        assert!(matches!(cfg.validate(), Err(ConfigError::DanglingManaReset)));
    }

    #[test]
    fn test_duration_rounding_rules() {
        let mut cfg = SimConfig::new(CombatStats::new(100.0, 1.5, 0.0, 2.0));
        cfg.duration_rounding = DurationRounding::Floor;
        assert_eq!(cfg.ticks_for_duration(3.0), 4); // 4.5 floored
        cfg.duration_rounding = DurationRounding::Round;
        assert_eq!(cfg.ticks_for_duration(3.0), 5); // 4.5 rounded
    }

    #[test]
    fn test_end_of_tick_gain_modes() {
        let rule = ManaRule {
            regen: RegenMode::EveryTick,
            basic_bonus: 1.0,
            multiplier: 2.0,
        };
        assert_eq!(rule.end_of_tick_gain(2.0, true), 3.0); // (0.5 + 1) * 2
        assert_eq!(rule.end_of_tick_gain(2.0, false), 1.0); // 0.5 * 2

        let basic_only = ManaRule {
            regen: RegenMode::BasicTickOnly,
            basic_bonus: 0.0,
            multiplier: 1.0,
        };
        assert_eq!(basic_only.end_of_tick_gain(2.0, true), 0.5);
        assert_eq!(basic_only.end_of_tick_gain(2.0, false), 0.0);

        let none = ManaRule {
            regen: RegenMode::None,
            basic_bonus: 5.0,
            multiplier: 1.0,
        };
        assert_eq!(none.end_of_tick_gain(2.0, true), 0.0);
    }
}
