//! # Simulation Configuration
//!
//! ```rust,ignore
//! let config = SimulationConfig::load("runs/top8.json")?;
//! let report = run_simulation(&schedule, &config)?;
//! ```
//!
//! Every field has a default, so a config file only needs the values it
//! changes. `LEAGUE_MC_CONFIG_PATH` may point at such a file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "LEAGUE_MC_CONFIG_PATH";

pub const DEFAULT_TRIALS: u64 = 1_000_000;
pub const DEFAULT_CUTOFF: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of simulated season completions
    #[serde(default = "default_trials")]
    pub trials: u64,

    /// 1-based qualifying rank (top-N)
    #[serde(default = "default_cutoff")]
    pub cutoff: usize,

    /// Parallel workers, each with its own random stream
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Base seed. `None` means derive one from the clock at run time.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_trials() -> u64 {
    DEFAULT_TRIALS
}

fn default_cutoff() -> usize {
    DEFAULT_CUTOFF
}

fn default_workers() -> usize {
    rayon::current_num_threads().max(1)
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            cutoff: default_cutoff(),
            workers: default_workers(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Config named by `LEAGUE_MC_CONFIG_PATH`, or `None` when the variable is unset or blank.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(None);
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }

        Self::load(path).map(Some)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::Validation("trials must be at least 1".to_string()));
        }
        if self.workers == 0 {
            return Err(ConfigError::Validation("workers must be at least 1".to_string()));
        }
        Ok(())
    }

    /// The explicit seed, or one taken from the current time.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            let now = chrono::Utc::now();
            now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp()) as u64
        })
    }
}
