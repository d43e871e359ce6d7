//! Per-worker random streams.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Odd 64-bit golden-ratio constant used to spread worker indices.
const WORKER_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seed for worker `worker` given the run's base seed.
pub fn worker_seed(base_seed: u64, worker: usize) -> u64 {
    base_seed ^ (worker as u64).wrapping_mul(WORKER_MIX)
}

/// Independent, reproducible stream for one worker.
pub fn worker_rng(base_seed: u64, worker: usize) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(worker_seed(base_seed, worker))
}
