//! Final odds for a completed simulation run.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::schedule::Schedule;
use crate::simulation::WorkerTally;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamOdds {
    pub team: String,
    /// Trials in which the team finished inside the cutoff
    pub qualified: u64,
    /// `qualified / trials × 100`
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub trials: u64,
    pub cutoff: usize,
    pub workers: usize,
    /// Seed actually used, so the run can be replayed
    pub seed: u64,
    pub cutoff_coinflips: u64,
    /// Roster order
    pub teams: Vec<TeamOdds>,
    pub created_at: String,
}

impl SimulationReport {
    pub fn from_tally(schedule: &Schedule, config: &SimulationConfig, seed: u64, tally: &WorkerTally) -> Self {
        let teams = schedule
            .teams()
            .iter()
            .zip(&tally.qualified)
            .map(|(team, &qualified)| TeamOdds {
                team: team.clone(),
                qualified,
                percentage: percentage(qualified, config.trials),
            })
            .collect();

        Self {
            trials: config.trials,
            cutoff: config.cutoff,
            workers: config.workers,
            seed,
            cutoff_coinflips: tally.cutoff_coinflips,
            teams,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn team(&self, name: &str) -> Option<&TeamOdds> {
        self.teams.iter().find(|odds| odds.team == name)
    }

    /// Share of trials whose cutoff was settled by a coin flip, in percent.
    pub fn coinflip_rate(&self) -> f64 {
        percentage(self.cutoff_coinflips, self.trials)
    }

    /// Most likely qualifiers first, ties by name.
    pub fn ranked(&self) -> Vec<&TeamOdds> {
        let mut ranked: Vec<&TeamOdds> = self.teams.iter().collect();
        ranked.sort_by(|a, b| b.qualified.cmp(&a.qualified).then_with(|| a.team.cmp(&b.team)));
        ranked
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn percentage(count: u64, trials: u64) -> f64 {
    if trials == 0 {
        0.0
    } else {
        count as f64 * 100.0 / trials as f64
    }
}
