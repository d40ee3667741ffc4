//! Damage simulator CLI.
//!
//! Run Monte Carlo damage estimates for a single roster character.
//!
//! Usage:
//!   cargo run --bin simulate -- --character chona [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate -- --list
//!   cargo run --bin simulate -- -c ninja --attack-power 120000 --seed 42
//!   cargo run --bin simulate -- -c doctor_pulse --robots 3 --duration-sec 90

use std::env;
use std::process;

use dps_sim::config::CombatStats;
use dps_sim::roster::{self, RosterOptions};
use dps_sim::runner::run_simulation;
use tracing_subscriber::EnvFilter;

struct CliOptions {
    character: Option<String>,
    attack_power: f64,
    attack_speed: f64,
    crit_rate: f64,
    crit_dmg: f64,
    ticks: Option<u64>,
    duration_sec: f64,
    trials: u32,
    seed: u64,
    roster: RosterOptions,
    json: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            character: None,
            attack_power: 100_000.0,
            attack_speed: 1.5,
            crit_rate: 5.0,
            crit_dmg: 2.5,
            ticks: None,
            duration_sec: 60.0,
            trials: 1000,
            seed: 1,
            roster: RosterOptions::default(),
            json: false,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    let Some(character) = options.character.as_deref() else {
        eprintln!("error: --character is required (try --list)");
        process::exit(2);
    };

    let stats = CombatStats::new(
        options.attack_power,
        options.attack_speed,
        options.crit_rate,
        options.crit_dmg,
    );
    let Some(config) = roster::build(character, stats, &options.roster) else {
        eprintln!("error: unknown character {character:?}");
        eprintln!("known characters: {}", roster::NAMES.join(", "));
        process::exit(2);
    };

    // Tick count wins over duration; duration converts with the character's
    // own rounding rule.
    let ticks = options
        .ticks
        .unwrap_or_else(|| config.ticks_for_duration(options.duration_sec));

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                     DAMAGE SIMULATOR                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Character:     {character}");
    println!("Attack Power:  {}", options.attack_power);
    println!("Attack Speed:  {}", options.attack_speed);
    println!("Crit:          {}% x{}", options.crit_rate, options.crit_dmg);
    println!("Ticks:         {ticks}");
    println!("Trials:        {}", options.trials);
    println!("Seed:          {}", options.seed);
    println!();

    let report = match run_simulation(config, ticks, options.trials, options.seed) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    println!("{}", report.to_text());

    // One tick lasts 1/attack_speed seconds.
    let duration = ticks as f64 / options.attack_speed;
    if duration > 0.0 {
        println!("Mean DPS: {:.3}", report.mean_total / duration);
    }

    if options.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {filename}"),
            Err(err) => {
                eprintln!("error: failed to write JSON report: {err}");
                process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--character" => options.character = Some(take_value(args, &mut i)),
            "--attack-power" => options.attack_power = parse_value(args, &mut i),
            "--attack-speed" => options.attack_speed = parse_value(args, &mut i),
            "--crit-rate" => options.crit_rate = parse_value(args, &mut i),
            "--crit-dmg" => options.crit_dmg = parse_value(args, &mut i),
            "-t" | "--ticks" => options.ticks = Some(parse_value(args, &mut i)),
            "--duration-sec" => options.duration_sec = parse_value(args, &mut i),
            "-n" | "--trials" => options.trials = parse_value(args, &mut i),
            "-s" | "--seed" => options.seed = parse_value(args, &mut i),
            "--robots" => options.roster.robots = parse_value(args, &mut i),
            "--stacks" => options.roster.opening_stacks = parse_value(args, &mut i),
            "--mana-regen-mult" => options.roster.mana_regen_mult = parse_value(args, &mut i),
            "--buffed-attack-power" => {
                options.roster.buffed_attack_power = Some(parse_value(args, &mut i))
            }
            "--json" => options.json = true,
            "--list" => {
                for name in roster::NAMES {
                    println!("{name}");
                }
                process::exit(0);
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => {
                eprintln!("error: unknown flag {other:?} (see --help)");
                process::exit(2);
            }
        }
        i += 1;
    }

    options
}

fn take_value(args: &[String], i: &mut usize) -> String {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("error: {flag} expects a value");
            process::exit(2);
        }
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> T {
    let flag = args[*i].clone();
    let raw = take_value(args, i);
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("error: {flag} got unparseable value {raw:?}");
            process::exit(2);
        }
    }
}

fn print_help() {
    println!("Damage Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- --character <NAME> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --character <NAME>       Roster character to simulate");
    println!("    --list                       Print roster names and exit");
    println!("    --attack-power <F>           Derived attack power (default: 100000)");
    println!("    --attack-speed <F>           Attacks per second (default: 1.5)");
    println!("    --crit-rate <F>              Crit chance percent (default: 5)");
    println!("    --crit-dmg <F>               Crit multiplier (default: 2.5)");
    println!("    -t, --ticks <N>              Ticks per trial (wins over duration)");
    println!("    --duration-sec <F>           Seconds per trial (default: 60);");
    println!("                                 converted per character rounding rule");
    println!("    -n, --trials <N>             Monte Carlo trials (default: 1000)");
    println!("    -s, --seed <N>               RNG seed (default: 1)");
    println!("    --robots <F>                 doctor_pulse: robot count");
    println!("    --stacks <N>                 watt: opening stacks");
    println!("    --mana-regen-mult <F>        External mana regen multiplier");
    println!("    --buffed-attack-power <F>    hayley: attack power while empowered");
    println!("    --json                       Save a timestamped JSON report");
    println!("    -h, --help                   Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate -- --list");
    println!("    cargo run --bin simulate -- -c chona --seed 42");
    println!("    cargo run --bin simulate -- -c watt --stacks 30 -t 600");
    println!("    cargo run --bin simulate -- -c senchoushi --duration-sec 90 --json");
}
