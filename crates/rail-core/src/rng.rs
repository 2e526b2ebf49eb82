//! Deterministic per-train RNG.
//!
//! # Determinism strategy
//!
//! Each train gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (train_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive train ids uniformly across the seed space.
//! A train's stop times and entry delay therefore do not depend on how many
//! other trains exist, and a train created by a split draws from a fresh
//! stream without disturbing its parent's.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::TrainId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── TrainRng ──────────────────────────────────────────────────────────────────

/// Per-train deterministic RNG.
#[derive(Clone, Debug)]
pub struct TrainRng(SmallRng);

impl TrainRng {
    /// Seed deterministically from the run's global seed and a train id.
    pub fn new(global_seed: u64, train: TrainId) -> Self {
        let seed = global_seed ^ (train.0 as u64).wrapping_mul(MIXING_CONSTANT);
        TrainRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
