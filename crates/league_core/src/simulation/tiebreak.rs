//! TieBreaker - full league ranking from one trial's standings
//!
//! Teams are grouped by a fixed cascade of criteria, each applied only inside
//! the bucket left tied by the previous one:
//!
//! 1. wins
//! 2. head-to-head wins against the other members of the tied wins group
//! 3. strength of victory (league-wide)
//!
//! A bucket still tied after the last criterion is shuffled. If that bucket
//! covers the qualifying cutoff rank, the ranking is marked as decided by a
//! coin flip at the cutoff.

use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::standings::Standings;
use crate::schedule::TeamId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Wins,
    HeadToHead,
    StrengthOfVictory,
}

/// Order in which criteria break ties.
pub const CASCADE: [Criterion; 3] = [Criterion::Wins, Criterion::HeadToHead, Criterion::StrengthOfVictory];

impl Criterion {
    /// Higher is better. `group` is the bucket currently being split.
    pub fn score(self, team: TeamId, group: &[TeamId], standings: &Standings) -> u64 {
        match self {
            Criterion::Wins => u64::from(standings.wins(team)),
            Criterion::HeadToHead => u64::from(standings.head_to_head_within(team, group)),
            Criterion::StrengthOfVictory => standings.strength_of_victory(team),
        }
    }
}

/// Strict total order over the roster for one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    /// (team, wins), best first
    pub entries: Vec<(TeamId, u32)>,
    /// A shuffle decided who holds the cutoff rank
    pub cutoff_coinflip: bool,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn teams(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.entries.iter().map(|&(team, _)| team)
    }

    /// The best `n` teams, or everyone when the roster is smaller.
    pub fn top(&self, n: usize) -> impl Iterator<Item = TeamId> + '_ {
        self.teams().take(n)
    }

    /// 0-based position of `team`.
    pub fn position(&self, team: TeamId) -> Option<usize> {
        self.teams().position(|t| t == team)
    }
}

/// Rank every team in `standings`.
///
/// `cutoff` is the 1-based qualifying rank. 0 or anything past the roster
/// turns cutoff tracking off.
pub fn resolve_ranking<R: Rng>(standings: &Standings, cutoff: usize, rng: &mut R) -> Ranking {
    let team_count = standings.team_count();
    let breaker = TieBreaker::new(standings, cutoff);

    let roster: Vec<TeamId> = (0..team_count).collect();
    let (order, cutoff_coinflip) = breaker.resolve_group(roster, &CASCADE, 0, rng);

    let entries = order.into_iter().map(|team| (team, standings.wins(team))).collect();
    Ranking { entries, cutoff_coinflip }
}

pub struct TieBreaker<'a> {
    standings: &'a Standings,
    /// 0-based rank whose holder decides qualification
    cutoff_index: Option<usize>,
}

impl<'a> TieBreaker<'a> {
    pub fn new(standings: &'a Standings, cutoff: usize) -> Self {
        let cutoff_index = if cutoff == 0 || cutoff > standings.team_count() {
            None
        } else {
            Some(cutoff - 1)
        };
        Self { standings, cutoff_index }
    }

    pub fn cutoff_index(&self) -> Option<usize> {
        self.cutoff_index
    }

    /// Order `group`, whose first member will sit at rank `start_rank`.
    ///
    /// Returns the ordered members and whether a shuffle at this level or
    /// below covered the cutoff rank.
    pub fn resolve_group<R: Rng>(
        &self,
        mut group: Vec<TeamId>,
        criteria: &[Criterion],
        start_rank: usize,
        rng: &mut R,
    ) -> (Vec<TeamId>, bool) {
        let Some((&criterion, rest)) = criteria.split_first() else {
            if group.len() <= 1 {
                return (group, false);
            }
            let touches_cutoff = self.covers_cutoff(start_rank, group.len());
            group.shuffle(rng);
            return (group, touches_cutoff);
        };

        let mut ordered = Vec::with_capacity(group.len());
        let mut rank = start_rank;
        let mut cutoff_coinflip = false;

        for bucket in self.partition(&group, criterion) {
            let size = bucket.len();
            if size == 1 {
                ordered.extend(bucket);
            } else {
                let (resolved, flag) = self.resolve_group(bucket, rest, rank, rng);
                ordered.extend(resolved);
                cutoff_coinflip |= flag;
            }
            rank += size;
        }

        (ordered, cutoff_coinflip)
    }

    /// Buckets of equal score, best score first. Members keep their input order.
    fn partition(&self, group: &[TeamId], criterion: Criterion) -> Vec<Vec<TeamId>> {
        let mut buckets: BTreeMap<Reverse<u64>, Vec<TeamId>> = BTreeMap::new();
        for &team in group {
            let score = criterion.score(team, group, self.standings);
            buckets.entry(Reverse(score)).or_default().push(team);
        }
        buckets.into_values().collect()
    }

    fn covers_cutoff(&self, start_rank: usize, size: usize) -> bool {
        self.cutoff_index
            .is_some_and(|cutoff| cutoff >= start_rank && cutoff < start_rank + size)
    }
}
