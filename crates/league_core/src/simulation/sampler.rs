//! Coin-flip outcomes for undecided games.

use rand::Rng;

use crate::schedule::{Fixture, GameResult};

/// Decide every fixture with a fair coin, one draw per game in order.
pub fn sample_outcomes<R: Rng>(remaining: &[Fixture], rng: &mut R) -> Vec<GameResult> {
    let mut out = Vec::with_capacity(remaining.len());
    sample_outcomes_into(remaining, rng, &mut out);
    out
}

/// Same as [`sample_outcomes`] but reuses `out`'s allocation across trials.
pub fn sample_outcomes_into<R: Rng>(
    remaining: &[Fixture],
    rng: &mut R,
    out: &mut Vec<GameResult>,
) {
    out.clear();
    out.extend(remaining.iter().map(|fixture| fixture.decide(rng.gen_bool(0.5))));
}
