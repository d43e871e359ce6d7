//! Simulation driver - fans trials out to workers and reduces their tallies
//!
//! Each worker owns a private [`WorkerTally`] and its own random stream. The
//! only shared write is the final reduction, done on the calling thread after
//! every worker has returned.

use log::{debug, info, warn};
use rand::Rng;
use rayon::prelude::*;
use std::time::Instant;

use super::rng::worker_rng;
use super::sampler::sample_outcomes_into;
use super::standings::Standings;
use super::tiebreak::{resolve_ranking, Ranking};
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::report::SimulationReport;
use crate::schedule::{GameResult, Schedule};

/// Counters owned by one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerTally {
    /// Per team, trials in which it finished inside the cutoff
    pub qualified: Vec<u64>,
    /// Trials whose cutoff rank was settled by a shuffle
    pub cutoff_coinflips: u64,
    pub trials: u64,
}

impl WorkerTally {
    pub fn new(team_count: usize) -> Self {
        Self { qualified: vec![0; team_count], cutoff_coinflips: 0, trials: 0 }
    }

    pub fn record(&mut self, ranking: &Ranking, cutoff: usize) {
        for team in ranking.top(cutoff) {
            self.qualified[team] += 1;
        }
        if ranking.cutoff_coinflip {
            self.cutoff_coinflips += 1;
        }
        self.trials += 1;
    }

    pub fn merge(&mut self, other: &WorkerTally) {
        for (total, count) in self.qualified.iter_mut().zip(&other.qualified) {
            *total += count;
        }
        self.cutoff_coinflips += other.cutoff_coinflips;
        self.trials += other.trials;
    }
}

/// Sum worker tallies into one.
pub fn reduce(team_count: usize, tallies: &[WorkerTally]) -> WorkerTally {
    tallies.iter().fold(WorkerTally::new(team_count), |mut total, tally| {
        total.merge(tally);
        total
    })
}

/// Scratch buffers reused across a worker's trials.
#[derive(Debug, Clone)]
pub struct TrialWorkspace {
    sampled: Vec<GameResult>,
    standings: Standings,
}

impl TrialWorkspace {
    pub fn new(schedule: &Schedule) -> Self {
        Self {
            sampled: Vec::with_capacity(schedule.remaining().len()),
            standings: Standings::new(schedule.team_count()),
        }
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }
}

/// One season completion: sample, tabulate, rank.
pub fn simulate_trial<R: Rng>(
    schedule: &Schedule,
    cutoff: usize,
    workspace: &mut TrialWorkspace,
    rng: &mut R,
) -> Ranking {
    sample_outcomes_into(schedule.remaining(), rng, &mut workspace.sampled);
    workspace
        .standings
        .recompute(schedule.played().iter().chain(workspace.sampled.iter()));
    resolve_ranking(&workspace.standings, cutoff, rng)
}

/// Run `trials` trials sequentially on one stream.
pub fn run_worker<R: Rng>(schedule: &Schedule, cutoff: usize, trials: u64, rng: &mut R) -> WorkerTally {
    let mut tally = WorkerTally::new(schedule.team_count());
    let mut workspace = TrialWorkspace::new(schedule);

    for _ in 0..trials {
        let ranking = simulate_trial(schedule, cutoff, &mut workspace, rng);
        tally.record(&ranking, cutoff);
    }

    tally
}

/// Split `trials` into `workers` contiguous shares, earlier workers taking the remainder.
pub fn partition_trials(trials: u64, workers: usize) -> Vec<u64> {
    if workers == 0 {
        return Vec::new();
    }
    let base = trials / workers as u64;
    let extra = (trials % workers as u64) as usize;
    (0..workers).map(|w| base + u64::from(w < extra)).collect()
}

/// Run the whole simulation described by `config`.
///
/// Results depend only on the schedule, trial count, cutoff, worker count
/// and seed, never on thread scheduling.
pub fn run_simulation(schedule: &Schedule, config: &SimulationConfig) -> Result<SimulationReport> {
    config.validate()?;

    let seed = config.resolve_seed();
    let cutoff = config.cutoff;
    let team_count = schedule.team_count();

    if cutoff == 0 {
        warn!("cutoff is 0: no team can qualify and cutoff tracking is off");
    } else if cutoff > team_count {
        warn!(
            "cutoff {} exceeds roster size {}: every team qualifies and cutoff tracking is off",
            cutoff, team_count
        );
    }

    info!(
        "simulating {} trials over {} remaining games ({} teams, top-{}, {} workers, seed {})",
        config.trials,
        schedule.remaining().len(),
        team_count,
        cutoff,
        config.workers,
        seed
    );

    let start = Instant::now();
    let shares = partition_trials(config.trials, config.workers);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.workers).build()?;

    let tallies: Vec<WorkerTally> = pool.install(|| {
        shares
            .par_iter()
            .enumerate()
            .map(|(worker, &trials)| {
                let mut rng = worker_rng(seed, worker);
                let tally = run_worker(schedule, cutoff, trials, &mut rng);
                debug!(
                    "worker {} finished {} trials ({} cutoff coinflips)",
                    worker, tally.trials, tally.cutoff_coinflips
                );
                tally
            })
            .collect()
    });

    let total = reduce(team_count, &tallies);
    info!(
        "simulation finished in {} ms ({} cutoff coinflips)",
        start.elapsed().as_millis(),
        total.cutoff_coinflips
    );

    Ok(SimulationReport::from_tally(schedule, config, seed, &total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Four teams, two played games, the rest open.
    fn small_league() -> Schedule {
        let mut builder = Schedule::builder();
        for name in ["A", "B", "C", "D"] {
            builder.add_team(name).unwrap();
        }
        builder.add_played("A", "B", "A").unwrap();
        builder.add_played("C", "D", "D").unwrap();
        for (home, away) in [("A", "C"), ("A", "D"), ("B", "C"), ("B", "D"), ("C", "A"), ("D", "B")] {
            builder.add_remaining(home, away).unwrap();
        }
        builder.build()
    }

    fn config(trials: u64, cutoff: usize, workers: usize, seed: u64) -> SimulationConfig {
        SimulationConfig { trials, cutoff, workers, seed: Some(seed) }
    }

    #[test]
    fn test_partition_trials() {
        assert_eq!(partition_trials(10, 3), vec![4, 3, 3]);
        assert_eq!(partition_trials(2, 4), vec![1, 1, 0, 0]);
        assert_eq!(partition_trials(9, 1), vec![9]);
        assert!(partition_trials(9, 0).is_empty());
        assert_eq!(partition_trials(1_000_003, 8).iter().sum::<u64>(), 1_000_003);
    }

    #[test]
    fn test_trial_uses_played_and_sampled_games() {
        let schedule = small_league();
        let mut workspace = TrialWorkspace::new(&schedule);
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        let ranking = simulate_trial(&schedule, 2, &mut workspace, &mut rng);

        let total_wins: u32 = ranking.entries.iter().map(|&(_, wins)| wins).sum();
        assert_eq!(total_wins as usize, schedule.played().len() + schedule.remaining().len());
        assert_eq!(ranking.len(), 4);
        // A's played win is always there
        assert!(workspace.standings().head_to_head(0, 1) >= 1);
    }

    #[test]
    fn test_worker_tally_totals() {
        let schedule = small_league();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let tally = run_worker(&schedule, 2, 500, &mut rng);

        assert_eq!(tally.trials, 500);
        assert_eq!(tally.qualified.iter().sum::<u64>(), 500 * 2);
        assert!(tally.cutoff_coinflips <= 500);
    }

    #[test]
    fn test_reduce_sums_workers() {
        let a = WorkerTally { qualified: vec![3, 1, 0], cutoff_coinflips: 1, trials: 2 };
        let b = WorkerTally { qualified: vec![1, 2, 1], cutoff_coinflips: 0, trials: 2 };

        let total = reduce(3, &[a.clone(), b.clone()]);
        assert_eq!(total, WorkerTally { qualified: vec![4, 3, 1], cutoff_coinflips: 1, trials: 4 });
        assert_eq!(reduce(3, &[b, a]), total);
        assert_eq!(reduce(3, &[]), WorkerTally::new(3));
    }

    #[test]
    fn test_same_seed_same_counts() {
        let schedule = small_league();

        let first = run_simulation(&schedule, &config(4_000, 2, 3, 99)).unwrap();
        let second = run_simulation(&schedule, &config(4_000, 2, 3, 99)).unwrap();

        assert_eq!(first.teams, second.teams);
        assert_eq!(first.cutoff_coinflips, second.cutoff_coinflips);
        assert_eq!(first.seed, 99);
    }

    #[test]
    fn test_qualified_total_matches_trials_times_cutoff() {
        let schedule = small_league();

        for workers in [1, 2, 5] {
            let report = run_simulation(&schedule, &config(1_001, 3, workers, 7)).unwrap();
            let total: u64 = report.teams.iter().map(|t| t.qualified).sum();
            assert_eq!(total, 1_001 * 3, "workers = {}", workers);
        }

        // cutoff larger than the roster: everyone qualifies every time
        let report = run_simulation(&schedule, &config(100, 8, 2, 7)).unwrap();
        assert!(report.teams.iter().all(|t| t.qualified == 100));
        assert_eq!(report.cutoff_coinflips, 0);
    }

    #[test]
    fn test_decided_league_is_deterministic() {
        let mut builder = Schedule::builder();
        for name in ["A", "B", "C"] {
            builder.add_team(name).unwrap();
        }
        builder.add_played("A", "B", "A").unwrap();
        builder.add_played("A", "C", "A").unwrap();
        builder.add_played("B", "C", "B").unwrap();
        let schedule = builder.build();

        let report = run_simulation(&schedule, &config(250, 1, 2, 1)).unwrap();

        assert_eq!(report.team("A").map(|t| t.qualified), Some(250));
        assert_eq!(report.team("B").map(|t| t.qualified), Some(0));
        assert_eq!(report.cutoff_coinflips, 0);
    }

    #[test]
    fn test_empty_roster_is_not_an_error() {
        let schedule = Schedule::builder().build();
        let report = run_simulation(&schedule, &config(10, 8, 2, 1)).unwrap();

        assert!(report.teams.is_empty());
        assert_eq!(report.cutoff_coinflips, 0);
        assert_eq!(report.trials, 10);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let schedule = small_league();
        assert!(run_simulation(&schedule, &config(0, 2, 1, 1)).is_err());
        assert!(run_simulation(&schedule, &config(10, 2, 0, 1)).is_err());
    }
}
