//! Monte Carlo experiments on poker tournament pacing.
//!
//! The crate drives many simulated No-Limit Hold'em tournaments on top
//! of the [`rs_poker`] arena, varying how fast blinds escalate and how
//! long each decision takes, then collects game durations and player
//! elimination curves for plotting.
//!
//! Hand mechanics (dealing, betting legality, pot settlement) belong to
//! the engine. This crate contributes the decision policy behind every
//! seat, the tournament clock and blind schedule, the parameter sweep
//! machinery, and the JSON report at the plotting boundary.
//!
//! # Example
//!
//! Run one tournament with the default setup:
//!
//! ```no_run
//! use tourney_lab::config::TournamentConfig;
//! use tourney_lab::simulator::simulate_tournament;
//!
//! let config = TournamentConfig::default();
//! let result = simulate_tournament(42, 15.0, 20.0, &config).unwrap();
//! println!(
//!     "lasted {:.1} minutes over {} hands",
//!     result.duration_minutes(),
//!     result.survivors.len()
//! );
//! ```

pub mod config;
pub mod errors;
pub mod experiment;
pub mod moves;
pub mod policy;
pub mod report;
pub mod simulator;
pub mod table;

pub use config::{BlindLevel, TournamentConfig};
pub use errors::{SimError, SimResult};
pub use experiment::{ExperimentRunner, SweepPoint};
pub use moves::{ActionChoice, ActionKind, LegalMoveSet};
pub use policy::{ConservativePolicy, DecisionPolicy, PolicyAgent};
pub use report::ExperimentReport;
pub use simulator::{SurvivorSeries, TournamentResult, TournamentSimulator, simulate_tournament};
pub use table::{HandSummary, HoldemTable, TableEngine};
