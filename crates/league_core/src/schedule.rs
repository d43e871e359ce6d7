//! Schedule - roster plus played and remaining games
//!
//! Teams are addressed by a dense [`TeamId`] (position in the roster) so the
//! per-trial tables can be plain vectors. Names are only needed at the edges.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Index of a team in the roster.
pub type TeamId = usize;

/// A game whose winner is not known yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixture {
    pub home: TeamId,
    pub away: TeamId,
}

impl Fixture {
    pub fn new(home: TeamId, away: TeamId) -> Self {
        Self { home, away }
    }

    /// Settle the fixture. `home_wins` picks the winner.
    pub fn decide(self, home_wins: bool) -> GameResult {
        let winner = if home_wins { self.home } else { self.away };
        GameResult { home: self.home, away: self.away, winner }
    }
}

/// A game with a winner, either played for real or sampled for one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameResult {
    pub home: TeamId,
    pub away: TeamId,
    pub winner: TeamId,
}

impl GameResult {
    pub fn loser(&self) -> TeamId {
        if self.winner == self.home {
            self.away
        } else {
            self.home
        }
    }
}

/// Validated league schedule.
///
/// Read-only for the whole simulation, shared by every worker.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    teams: Vec<String>,
    index: FxHashMap<String, TeamId>,
    played: Vec<GameResult>,
    remaining: Vec<Fixture>,
}

impl Schedule {
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::default()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Roster in declaration order.
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn team_name(&self, id: TeamId) -> &str {
        &self.teams[id]
    }

    pub fn team_id(&self, name: &str) -> Option<TeamId> {
        self.index.get(name).copied()
    }

    pub fn played(&self) -> &[GameResult] {
        &self.played
    }

    pub fn remaining(&self) -> &[Fixture] {
        &self.remaining
    }

    /// (wins, losses) per team over played games only.
    pub fn played_records(&self) -> Vec<(u32, u32)> {
        let mut records = vec![(0u32, 0u32); self.teams.len()];
        for game in &self.played {
            records[game.winner].0 += 1;
            records[game.loser()].1 += 1;
        }
        records
    }
}

/// Incremental, validating constructor for [`Schedule`].
#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    schedule: Schedule,
}

impl ScheduleBuilder {
    /// Register a team. Roster order follows call order.
    pub fn add_team(&mut self, name: &str) -> Result<TeamId, ScheduleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScheduleError::EmptyTeamName);
        }
        if self.schedule.index.contains_key(name) {
            return Err(ScheduleError::DuplicateTeam { name: name.to_string() });
        }

        let id = self.schedule.teams.len();
        self.schedule.teams.push(name.to_string());
        self.schedule.index.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn add_played(&mut self, home: &str, away: &str, winner: &str) -> Result<(), ScheduleError> {
        let fixture = self.fixture(home, away)?;
        let winner_id = self.lookup(winner)?;
        if winner_id != fixture.home && winner_id != fixture.away {
            return Err(ScheduleError::WinnerNotParticipant {
                winner: winner.trim().to_string(),
                home: home.trim().to_string(),
                away: away.trim().to_string(),
            });
        }
        self.schedule.played.push(fixture.decide(winner_id == fixture.home));
        Ok(())
    }

    pub fn add_remaining(&mut self, home: &str, away: &str) -> Result<(), ScheduleError> {
        let fixture = self.fixture(home, away)?;
        self.schedule.remaining.push(fixture);
        Ok(())
    }

    pub fn build(self) -> Schedule {
        self.schedule
    }

    fn fixture(&self, home: &str, away: &str) -> Result<Fixture, ScheduleError> {
        let home_id = self.lookup(home)?;
        let away_id = self.lookup(away)?;
        if home_id == away_id {
            return Err(ScheduleError::SelfMatch { team: home.trim().to_string() });
        }
        Ok(Fixture::new(home_id, away_id))
    }

    fn lookup(&self, name: &str) -> Result<TeamId, ScheduleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScheduleError::EmptyTeamName);
        }
        self.schedule
            .team_id(name)
            .ok_or_else(|| ScheduleError::UnknownTeam { name: name.to_string() })
    }
}
