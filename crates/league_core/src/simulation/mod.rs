//! Monte Carlo season completion.
//!
//! - `rng`: per-worker seeded streams
//! - `sampler`: coin flips for remaining games
//! - `standings`: wins, head-to-head, strength of victory
//! - `tiebreak`: cascading tie-break ranking
//! - `driver`: parallel trials and reduction

pub mod driver;
pub mod rng;
pub mod sampler;
pub mod standings;
pub mod tiebreak;

pub use driver::{
    partition_trials, reduce, run_simulation, run_worker, simulate_trial, TrialWorkspace, WorkerTally,
};
pub use rng::{worker_rng, worker_seed};
pub use sampler::{sample_outcomes, sample_outcomes_into};
pub use standings::Standings;
pub use tiebreak::{resolve_ranking, Criterion, Ranking, TieBreaker, CASCADE};
