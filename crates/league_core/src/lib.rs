//! # league_core - Monte Carlo Qualification Odds
//!
//! Estimates how often each team of a win/loss league finishes inside a
//! qualifying cutoff by completing the season many times at random.
//!
//! ## Features
//! - Three-level tie-break cascade (wins, group head-to-head, strength of victory)
//!   with a coin flip only when every criterion is level
//! - Tracks trials where that coin flip decided the cutoff rank
//! - Deterministic given seed, trial count and worker count
//! - Parallel workers with private tallies and a single reduction

pub mod config;
pub mod error;
pub mod report;
pub mod schedule;
pub mod simulation;

pub use config::SimulationConfig;
pub use error::{ConfigError, Result, ScheduleError, SimError};
pub use report::{SimulationReport, TeamOdds};
pub use schedule::{Fixture, GameResult, Schedule, ScheduleBuilder, TeamId};
pub use simulation::{resolve_ranking, run_simulation, Ranking, Standings};
