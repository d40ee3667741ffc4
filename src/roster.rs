//! Character rule registry.
//!
//! One constructor per character, each returning a `SimConfig` row. The
//! numbers are the characters' unmodified kit values; the caller supplies
//! derived stats (attack power, speed, crit) and the external knobs in
//! `RosterOptions`. Mechanics that cannot be tabulated use the engine's
//! enumerated hook rules — no character gets its own control flow.

use crate::config::{
    ActionKind, AmmoRule, BuffExtend, BuffRule, ChainRule, ChannelCrit, ChargeRule, CombatStats,
    ComboRule, CounterRule, CounterSpend, DotRule, DurationRounding, ManaReset, ManaRule,
    OpeningStacksRule, RegenMode, SimConfig, SkillRule, UltRule, UltStyle,
};

/// Per-character knobs that come from outside the kit table.
#[derive(Debug, Clone)]
pub struct RosterOptions {
    /// External mana-regen multiplier (relics, runes).
    pub mana_regen_mult: f64,
    /// doctor_pulse: deployed robot count.
    pub robots: f64,
    /// watt: stacks banked before the trial starts.
    pub opening_stacks: u32,
    /// hayley: attack power during her empowered window, derived separately
    /// by the stat layer. Defaults to 1.5x base when absent.
    pub buffed_attack_power: Option<f64>,
}

impl Default for RosterOptions {
    fn default() -> Self {
        Self {
            mana_regen_mult: 1.0,
            robots: 1.0,
            opening_stacks: 20,
            buffed_attack_power: None,
        }
    }
}

/// Every roster name `build` accepts.
pub const NAMES: &[&str] = &[
    "chona",
    "rokechuu",
    "captain_roka",
    "roka",
    "ninja",
    "onigami_ninja",
    "masterkun",
    "hayley",
    "awakened_hayley",
    "iam_nyan",
    "doctor_pulse",
    "senchoushi",
    "watt",
    "iron_nyan",
    "mama",
    "batman",
    "king_dian",
    "penguin_musician",
    "frog_reaper",
    "tar",
];

/// Look a character up by name.
pub fn build(name: &str, stats: CombatStats, opts: &RosterOptions) -> Option<SimConfig> {
    let cfg = match name {
        "chona" => chona(stats, opts),
        "rokechuu" => rokechuu(stats, opts),
        "captain_roka" => captain_roka(stats, opts),
        "roka" => roka(stats, opts),
        "ninja" => ninja(stats, opts),
        "onigami_ninja" => onigami_ninja(stats, opts),
        "masterkun" => masterkun(stats),
        "hayley" => hayley(stats, opts),
        "awakened_hayley" => awakened_hayley(stats, opts),
        "iam_nyan" => iam_nyan(stats, opts),
        "doctor_pulse" => doctor_pulse(stats, opts),
        "senchoushi" => senchoushi(stats, opts),
        "watt" => watt(stats, opts),
        "iron_nyan" => iron_nyan(stats, opts),
        "mama" => mama(stats, opts),
        "batman" => batman(stats),
        "king_dian" => king_dian(stats, opts),
        "penguin_musician" => penguin_musician(stats, opts),
        "frog_reaper" => frog_reaper(stats, opts),
        "tar" => tar(stats, opts),
        _ => return None,
    };
    Some(cfg)
}

/// Shared shape for the characters that are pure table rows: rate skills,
/// an optional strike ultimate, regen with a per-basic bonus.
fn standard(
    stats: CombatStats,
    basic_mult: f64,
    skills: &[(ActionKind, f64, f64)],
    ult: Option<(f64, f64)>,
    basic_bonus: f64,
    regen_mult: f64,
) -> SimConfig {
    let mut cfg = SimConfig::new(stats);
    cfg.basic_mult = basic_mult;
    for &(kind, rate, mult) in skills {
        cfg.skills.push(SkillRule::new(kind, rate, mult));
    }
    cfg.ult = ult.map(|(mana_cost, mult)| UltRule::strike(mana_cost, mult));
    cfg.mana = ManaRule {
        regen: RegenMode::EveryTick,
        basic_bonus,
        multiplier: regen_mult,
    };
    cfg.duration_rounding = DurationRounding::Floor;
    cfg
}

/// Vine thrower: every 25th basic attack is replaced by a forced vine lash.
pub fn chona(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let mut cfg = standard(
        stats,
        1.0,
        &[(ActionKind::Skill1, 10.0, 60.0)],
        Some((40.0, 750.0)),
        0.0,
        opts.mana_regen_mult,
    );
    cfg.counters
        .push(CounterRule::basic_counter(25, ActionKind::Skill2, 70.0));
    cfg.duration_rounding = DurationRounding::Round;
    cfg
}

/// Rocket builder: fifteen basics assemble a rocket; mana only flows on
/// basic-attack ticks.
pub fn rokechuu(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let mut cfg = standard(
        stats,
        1.0,
        &[(ActionKind::Skill1, 10.0, 60.0)],
        Some((25.0, 700.0)),
        0.0,
        opts.mana_regen_mult,
    );
    cfg.mana.regen = RegenMode::BasicTickOnly;
    cfg.counters
        .push(CounterRule::basic_counter(15, ActionKind::Skill2, 160.0));
    cfg.duration_rounding = DurationRounding::Round;
    cfg
}

/// Burst marksman: five basics load a burst shot; every third burst becomes
/// a charge shot that also stretches the measured window.
pub fn captain_roka(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let mut cfg = standard(
        stats,
        1.0,
        &[(ActionKind::Skill1, 9.0, 330.0)],
        Some((80.0, 233.333)),
        0.0,
        opts.mana_regen_mult,
    );
    cfg.counters.push(CounterRule {
        threshold: 3,
        spend: CounterSpend::SubtractThreshold,
        fires: ActionKind::Skill3,
        mult: 150.0,
        counts_basics: false,
        feeds: None,
        extend_ticks: 10.0 - 10.0 / 1.15,
        crit_mana: 0.0,
        after_rates: false,
    });
    cfg.counters.push(CounterRule {
        threshold: 5,
        spend: CounterSpend::SubtractThreshold,
        fires: ActionKind::Skill2,
        mult: 40.0,
        counts_basics: true,
        feeds: Some(0),
        extend_ticks: 0.0,
        crit_mana: 0.0,
        after_rates: false,
    });
    cfg.duration_rounding = DurationRounding::Round;
    cfg
}

/// Bombardier: periodic reloads load up to five bombs that ride along on
/// basic attacks; rapid-fire stretches the window instead of dealing damage;
/// the headshot ultimate crits at a flat 50%.
pub fn roka(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let speed = stats.attack_speed;
    let mut cfg = standard(stats, 1.0, &[], Some((50.0, 200.0)), 0.0, opts.mana_regen_mult);
    if let Some(ult) = cfg.ult.as_mut() {
        ult.crit_rate_override = Some(50.0);
    }
    cfg.skills.push(SkillRule {
        kind: ActionKind::Skill2,
        rate: 7.0,
        mult: 0.0,
        extend_ticks: (speed * 10.0 * (1.0 - 1.0 / speed)).max(0.0),
        mana_on_cast: 0.0,
    });
    let mut pierce = CounterRule::basic_counter(15, ActionKind::Skill3, 65.0);
    pierce.after_rates = true;
    cfg.counters.push(pierce);
    cfg.ammo = Some(AmmoRule {
        interval_ticks: ((speed * 10.0).floor() as u64).max(1),
        capacity: 5,
        full_rate: 80.0,
        mult: 1.0 + 20.0,
    });
    cfg.duration_rounding = DurationRounding::Round;
    cfg
}

/// Shuriken thrower whose purge chains into itself while the re-trigger
/// roll keeps succeeding.
pub fn ninja(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let mut cfg = standard(
        stats,
        1.0,
        &[
            (ActionKind::Skill1, 10.0, 40.0),
            (ActionKind::Skill2, 12.0, 50.0),
        ],
        Some((190.0, 180.0)),
        0.0,
        opts.mana_regen_mult,
    );
    cfg.chain = Some(ChainRule {
        skill: ActionKind::Skill2,
        react_rate: 55.0,
        yields_to_ult: false,
    });
    cfg
}

/// Demon-blade ninja: a basic-attack counter forces the signature slash
/// (bonus mana on crit); the purge chain feeds mana per cast and steps
/// aside when the ultimate is up.
pub fn onigami_ninja(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let mut cfg = standard(stats, 1.0, &[], Some((190.0, 180.0)), 0.0, opts.mana_regen_mult);
    let mut slash = CounterRule::basic_counter(15, ActionKind::Skill1, 40.0);
    slash.crit_mana = 16.0;
    cfg.counters.push(slash);
    cfg.skills.push(SkillRule {
        kind: ActionKind::Skill2,
        rate: 12.0,
        mult: 50.0,
        extend_ticks: 0.0,
        mana_on_cast: 4.0,
    });
    cfg.chain = Some(ChainRule {
        skill: ActionKind::Skill2,
        react_rate: 55.0,
        yields_to_ult: true,
    });
    cfg
}

/// Flame spinner: the whirl is a pure damage-over-time window that resets on
/// re-cast; no ultimate, no mana economy.
pub fn masterkun(stats: CombatStats) -> SimConfig {
    let speed = stats.attack_speed;
    let mut cfg = SimConfig::new(stats);
    cfg.skills.push(SkillRule::new(ActionKind::Skill1, 6.0, 0.0));
    cfg.skills.push(SkillRule::new(ActionKind::Skill2, 8.0, 50.0));
    cfg.dot = Some(DotRule {
        skill: ActionKind::Skill1,
        duration_ticks: speed * 10.0,
        tick_mult: 5.5 / (speed * 0.7),
    });
    cfg.mana.regen = RegenMode::None;
    cfg.duration_rounding = DurationRounding::Round;
    cfg
}

/// Star caller: the ultimate swaps her onto an empowered stat line for a
/// fixed window (skills x1.5, no regen) and the pool empties when the
/// window ends. The kit gives the cast itself no damage multiplier, so the
/// cast strikes for zero — and still rolls its crit.
pub fn hayley(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let buffed_ap = opts
        .buffed_attack_power
        .unwrap_or(stats.attack_power * 1.5);
    let mut cfg = standard(
        stats,
        1.0,
        &[
            (ActionKind::Skill1, 10.0, 50.0),
            (ActionKind::Skill2, 12.0, 50.0),
        ],
        None,
        1.0,
        opts.mana_regen_mult,
    );
    cfg.ult = Some(UltRule {
        mana_cost: 250.0,
        mult: 0.0,
        crit_rate_override: None,
        style: UltStyle::Strike,
        reset: ManaReset::AtBuffExpiry,
    });
    cfg.buff = Some(BuffRule {
        duration_ticks: (30.0 * stats.attack_speed).round(),
        skill_mult_scale: 1.5,
        attack_power: Some(buffed_ap),
        suspend_regen: true,
        block_ult: true,
        expiry_resets_mana: true,
        ..BuffRule::default()
    });
    cfg.duration_rounding = DurationRounding::Round;
    cfg
}

/// Awakened star caller: energy injections detonate late (or all at once on
/// the third), and the flare channels its full payout over a speed-scaled
/// window with per-tick crits.
pub fn awakened_hayley(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let speed = stats.attack_speed;
    let delay = (10.0 * speed).round() as u64;
    let mut cfg = standard(
        stats,
        1.0,
        &[
            (ActionKind::Skill1, 10.0, 180.0),
            (ActionKind::Skill2, 15.0, 100.0),
        ],
        None,
        1.0,
        opts.mana_regen_mult,
    );
    cfg.charges = Some(ChargeRule {
        skill: ActionKind::Skill2,
        delay_ticks: delay,
        mult: 100.0,
        burst_at: 3,
        burst_mult: 200.0,
    });
    cfg.ult = Some(UltRule {
        mana_cost: 250.0,
        mult: 1125.0,
        crit_rate_override: None,
        style: UltStyle::Channel {
            ticks: delay + 1,
            crit: ChannelCrit::PerTick,
        },
        reset: ManaReset::Immediate,
    });
    cfg.duration_rounding = DurationRounding::Round;
    cfg
}

/// Cat gunner: the ultimate knocks her out of action for a speed-scaled
/// cooldown during which nothing happens, mana included.
pub fn iam_nyan(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let mut cfg = standard(
        stats,
        1.0,
        &[
            (ActionKind::Skill1, 7.0, 180.0),
            (ActionKind::Skill2, 7.0, 100.0),
        ],
        None,
        1.0,
        opts.mana_regen_mult,
    );
    cfg.ult = Some(UltRule {
        mana_cost: 300.0,
        mult: 1000.0,
        crit_rate_override: None,
        style: UltStyle::Lockout {
            ticks: (stats.attack_speed * 3.0).floor() as u64,
        },
        reset: ManaReset::Immediate,
    });
    cfg
}

/// Robot surgeon: everything scales with deployed robots; overheat deals
/// nothing up front but quintuples the next window (booked as ultimate
/// damage) and detonates when it ends.
pub fn doctor_pulse(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let robots = opts.robots;
    let mut cfg = standard(
        stats,
        10.0 * robots,
        &[(ActionKind::Skill1, 10.0, 70.0 * robots)],
        None,
        robots,
        opts.mana_regen_mult,
    );
    cfg.ult = Some(UltRule {
        mana_cost: 550.0,
        mult: 0.0,
        crit_rate_override: None,
        style: UltStyle::Empower,
        reset: ManaReset::Immediate,
    });
    cfg.buff = Some(BuffRule {
        duration_ticks: (10.0 * stats.attack_speed).round().max(1.0),
        starts_next_tick: true,
        damage_scale: 5.0,
        credit_to_ult: true,
        suspend_regen: true,
        block_ult: true,
        expiry_burst_mult: Some(120.0 * robots),
        expiry_resets_mana: true,
        ..BuffRule::default()
    });
    cfg.duration_rounding = DurationRounding::Round;
    cfg
}

/// Bird tamer: the finale raises both skill rates for an unrounded
/// speed-scaled window; circles (and every third trick token) stretch it;
/// the pool empties on the tick after the cast. Trick tokens remember which
/// skills landed recently and hit harder for it.
pub fn senchoushi(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let speed = stats.attack_speed;
    let mut cfg = standard(
        stats,
        1.0,
        &[
            (ActionKind::Skill1, 11.0, 330.0),
            (ActionKind::Skill2, 10.0, 160.0),
        ],
        None,
        1.0,
        opts.mana_regen_mult,
    );
    cfg.ult = Some(UltRule {
        mana_cost: 250.0,
        mult: 300.0,
        crit_rate_override: None,
        style: UltStyle::Strike,
        reset: ManaReset::NextTick,
    });
    cfg.buff = Some(BuffRule {
        duration_ticks: 12.0 * speed + 1.0,
        rate_bonus: 5.0,
        extend: Some(BuffExtend {
            ticks: 0.8 * speed,
            on_skills: vec![ActionKind::Skill2],
            on_combo: true,
        }),
        ..BuffRule::default()
    });
    cfg.combo = Some(ComboRule {
        every: 3,
        mult: 5.0,
        lookback_ticks: 5.0 * speed,
        skill1_bonus: 5.0,
        skill2_bonus: 1.1,
    });
    cfg
}

/// Battery: opens with a bank of charged shots whose damage decays as the
/// stacks drain, then stands idle.
pub fn watt(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    let mut cfg = SimConfig::new(stats);
    cfg.opening = Some(OpeningStacksRule {
        stacks: opts.opening_stacks,
        per_stack_bonus: 0.05,
        mult: 20.0,
    });
    cfg.mana.regen = RegenMode::None;
    cfg.duration_rounding = DurationRounding::Floor;
    cfg
}

/// Iron cat: a plain table row with a heavy basic swing.
pub fn iron_nyan(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    standard(
        stats,
        5.0,
        &[(ActionKind::Skill1, 8.0, 40.0)],
        Some((200.0, 180.0)),
        1.0,
        opts.mana_regen_mult,
    )
}

/// Mama: heavy basic, gentle skill, modest ultimate.
pub fn mama(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    standard(
        stats,
        5.0,
        &[(ActionKind::Skill1, 8.0, 15.0)],
        Some((200.0, 20.0)),
        1.0,
        opts.mana_regen_mult,
    )
}

/// Batman: basics grant no bonus mana and the kit regenerates at the flat
/// rate, ignoring external regen multipliers.
pub fn batman(stats: CombatStats) -> SimConfig {
    standard(
        stats,
        1.0,
        &[(ActionKind::Skill1, 12.0, 40.0)],
        Some((190.0, 70.0)),
        0.0,
        1.0,
    )
}

/// King Dian: no skills at all — basics until the crown drops.
pub fn king_dian(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    standard(
        stats,
        7.5,
        &[],
        Some((200.0, 1000.0)),
        1.0,
        opts.mana_regen_mult,
    )
}

/// Penguin musician: the opening act deals nothing (and still rolls its
/// crit); no ultimate in the kit.
pub fn penguin_musician(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    standard(
        stats,
        1.0,
        &[
            (ActionKind::Skill1, 10.0, 0.0),
            (ActionKind::Skill2, 15.0, 60.0),
        ],
        None,
        1.0,
        opts.mana_regen_mult,
    )
}

/// Frog reaper: two strong rate skills, no ultimate.
pub fn frog_reaper(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    standard(
        stats,
        1.0,
        &[
            (ActionKind::Skill1, 8.0, 120.0),
            (ActionKind::Skill2, 12.0, 90.0),
        ],
        None,
        1.0,
        opts.mana_regen_mult,
    )
}

/// Tar: twin rate skills and a mid-size ultimate.
pub fn tar(stats: CombatStats, opts: &RosterOptions) -> SimConfig {
    standard(
        stats,
        1.0,
        &[
            (ActionKind::Skill1, 12.0, 200.0),
            (ActionKind::Skill2, 12.0, 50.0),
        ],
        Some((200.0, 195.0)),
        1.0,
        opts.mana_regen_mult,
    )
}
