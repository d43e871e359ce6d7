use thiserror::Error;

/// Problems found while assembling a [`Schedule`](crate::schedule::Schedule).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Team name must not be empty")]
    EmptyTeamName,

    #[error("Duplicate team: {name}")]
    DuplicateTeam { name: String },

    #[error("Unknown team: {name}")]
    UnknownTeam { name: String },

    #[error("Team {team} cannot play itself")]
    SelfMatch { team: String },

    #[error("Winner {winner} did not play in {home} vs {away}")]
    WinnerNotParticipant { winner: String, home: String, away: String },
}

/// Errors that can occur when loading/validating a [`SimulationConfig`](crate::config::SimulationConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SimError>;
