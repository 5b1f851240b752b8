//! Seeded random number generators.
//!
//! Every run is reproducible from a single `u64` seed. Workers of a
//! distributed run draw from distinct streams derived from the same seed.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the crate's standard generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates the generator for worker `rank` of a distributed run.
///
/// Rank 0 gets the same stream as [`create_rng`]; other ranks get
/// independent streams.
pub fn worker_rng(seed: u64, rank: usize) -> StdRng {
    create_rng(seed.wrapping_add((rank as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)))
}
