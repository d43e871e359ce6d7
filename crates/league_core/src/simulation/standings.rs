//! Standings snapshot for one trial: wins, head-to-head and strength of victory.

use crate::schedule::{GameResult, TeamId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standings {
    team_count: usize,
    wins: Vec<u32>,
    /// Row-major `team_count × team_count`; `[w * n + l]` is w's wins over l.
    head_to_head: Vec<u32>,
    strength_of_victory: Vec<u64>,
}

impl Standings {
    pub fn new(team_count: usize) -> Self {
        Self {
            team_count,
            wins: vec![0; team_count],
            head_to_head: vec![0; team_count * team_count],
            strength_of_victory: vec![0; team_count],
        }
    }

    /// Build standings from every decided game of a trial.
    pub fn compute<'a, I>(team_count: usize, games: I) -> Self
    where
        I: IntoIterator<Item = &'a GameResult> + Clone,
    {
        let mut standings = Self::new(team_count);
        standings.recompute(games);
        standings
    }

    /// Reset and refill in place.
    ///
    /// `games` is walked twice: strength of victory needs final win totals.
    pub fn recompute<'a, I>(&mut self, games: I)
    where
        I: IntoIterator<Item = &'a GameResult> + Clone,
    {
        let n = self.team_count;
        self.wins.fill(0);
        self.head_to_head.fill(0);
        self.strength_of_victory.fill(0);

        for game in games.clone() {
            let loser = game.loser();
            self.wins[game.winner] += 1;
            self.head_to_head[game.winner * n + loser] += 1;
        }

        for game in games {
            self.strength_of_victory[game.winner] += u64::from(self.wins[game.loser()]);
        }
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    pub fn wins(&self, team: TeamId) -> u32 {
        self.wins[team]
    }

    /// Games `team` won against `opponent`.
    pub fn head_to_head(&self, team: TeamId, opponent: TeamId) -> u32 {
        self.head_to_head[team * self.team_count + opponent]
    }

    /// Wins of `team` against the other members of `group`.
    pub fn head_to_head_within(&self, team: TeamId, group: &[TeamId]) -> u32 {
        group
            .iter()
            .filter(|&&other| other != team)
            .map(|&other| self.head_to_head(team, other))
            .sum()
    }

    pub fn strength_of_victory(&self, team: TeamId) -> u64 {
        self.strength_of_victory[team]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(home: TeamId, away: TeamId, winner: TeamId) -> GameResult {
        GameResult { home, away, winner }
    }

    #[test]
    fn test_wins_and_head_to_head() {
        let games = vec![game(0, 1, 0), game(1, 0, 0), game(1, 2, 1), game(2, 0, 2)];
        let standings = Standings::compute(4, &games);

        assert_eq!(standings.wins(0), 2);
        assert_eq!(standings.wins(1), 1);
        assert_eq!(standings.wins(2), 1);
        assert_eq!(standings.head_to_head(0, 1), 2);
        assert_eq!(standings.head_to_head(1, 0), 0);
        assert_eq!(standings.head_to_head(2, 0), 1);
    }

    #[test]
    fn test_team_without_games_is_zero_everywhere() {
        let standings = Standings::compute(3, &[game(0, 1, 1)]);

        assert_eq!(standings.wins(2), 0);
        assert_eq!(standings.strength_of_victory(2), 0);
        assert_eq!(standings.head_to_head(2, 0), 0);
        assert_eq!(standings.head_to_head(0, 2), 0);
    }

    #[test]
    fn test_strength_of_victory_is_one_level_deep() {
        // 0 beats 1, 1 beats 2 twice, 2 beats 3
        let games = vec![game(0, 1, 0), game(1, 2, 1), game(2, 1, 1), game(2, 3, 2)];
        let standings = Standings::compute(4, &games);

        // 0 beat team 1 (2 wins); team 1's own SoV does not leak in
        assert_eq!(standings.strength_of_victory(0), 2);
        // 1 beat team 2 twice, team 2 has 1 win
        assert_eq!(standings.strength_of_victory(1), 2);
        assert_eq!(standings.strength_of_victory(2), 0);
        assert_eq!(standings.strength_of_victory(3), 0);
    }

    #[test]
    fn test_head_to_head_within_group() {
        let games = vec![game(0, 1, 0), game(0, 2, 0), game(0, 3, 0), game(1, 2, 1)];
        let standings = Standings::compute(4, &games);

        assert_eq!(standings.head_to_head_within(0, &[0, 1]), 1);
        assert_eq!(standings.head_to_head_within(0, &[0, 1, 2, 3]), 3);
        assert_eq!(standings.head_to_head_within(1, &[0, 1]), 0);
    }

    #[test]
    fn test_recompute_matches_fresh_compute() {
        let first = vec![game(0, 1, 0), game(1, 2, 2)];
        let second = vec![game(2, 0, 0)];

        let mut standings = Standings::compute(3, &first);
        standings.recompute(&second);

        assert_eq!(standings, Standings::compute(3, &second));
    }

    #[test]
    fn test_chained_played_and_sampled() {
        let played = vec![game(0, 1, 0)];
        let sampled = vec![game(1, 0, 1), game(1, 2, 1)];
        let standings = Standings::compute(3, played.iter().chain(sampled.iter()));

        assert_eq!(standings.wins(0), 1);
        assert_eq!(standings.wins(1), 2);
    }
}
