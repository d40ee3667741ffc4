//! Tick-based Monte Carlo damage simulator.
//!
//! Estimates expected damage output for game characters by running many
//! independent discrete-tick trials and averaging the results. One
//! table-driven engine serves every character: the per-character rule rows
//! live in `roster`, the per-tick machine in `engine`, and the batch driver
//! plus statistics in `runner` and `report`.
//!
//! ```no_run
//! use dps_sim::config::CombatStats;
//! use dps_sim::roster::{self, RosterOptions};
//! use dps_sim::runner::run_simulation;
//!
//! let stats = CombatStats::new(100_000.0, 1.5, 20.0, 2.5);
//! let cfg = roster::build("chona", stats, &RosterOptions::default()).unwrap();
//! let report = run_simulation(cfg, 90_000, 1000, 1).unwrap();
//! println!("{}", report.to_text());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod roster;
pub mod runner;

pub use config::{CombatStats, SimConfig};
pub use engine::{DamageBreakdown, Engine, TrialResult};
pub use error::{ConfigError, RunError};
pub use report::SimReport;
pub use runner::run_simulation;
