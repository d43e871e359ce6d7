//! League MC front end
//!
//! Schedule file → `league_core` simulation → table / JSON report

pub mod report_table;
pub mod schedule_file;

use anyhow::{Context, Result};
use league_core::SimulationConfig;
use std::path::Path;

pub use report_table::{render_report, render_schedule_summary, save_report_json};
pub use schedule_file::{load_schedule, parse_schedule, ScheduleRecord};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub trials: Option<u64>,
    pub cutoff: Option<usize>,
    pub workers: Option<usize>,
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(cutoff) = self.cutoff {
            config.cutoff = cutoff;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

/// defaults < config file (`path`, else `LEAGUE_MC_CONFIG_PATH`) < overrides
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<SimulationConfig> {
    let base = match path {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SimulationConfig::from_env()
            .context("Failed to load config from LEAGUE_MC_CONFIG_PATH")?
            .unwrap_or_default(),
    };

    let config = overrides.apply(base);
    config.validate().context("Invalid simulation config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "trials": 500, "cutoff": 4, "seed": 1 }}"#).unwrap();

        let overrides = ConfigOverrides { cutoff: Some(6), seed: Some(9), ..Default::default() };
        let config = resolve_config(Some(file.path()), &overrides).unwrap();

        assert_eq!(config.trials, 500);
        assert_eq!(config.cutoff, 6);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let overrides = ConfigOverrides { workers: Some(0), ..Default::default() };
        assert!(resolve_config(Some(file.path()), &overrides).is_err());
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let config = SimulationConfig { trials: 3, cutoff: 2, workers: 1, seed: None };
        assert_eq!(ConfigOverrides::default().apply(config.clone()), config);
    }
}
