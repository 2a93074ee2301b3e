//! Deterministic RNG seed hierarchy.
//!
//! A master seed generates deterministic sub-seeds for each trial index.
//! Sub-seeds are derived via BLAKE3 hashing, independently of thread
//! scheduling order, so batch results are identical regardless of thread
//! count. Each run constructs its own generator; no process-wide RNG.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Expands a master seed into per-trial sub-seeds.
///
/// Derivation is hash-based (not order-dependent): deriving trial 5 before
/// trial 0 produces the same seeds as the reverse order.
#[derive(Debug, Clone, Copy)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a deterministic sub-seed for a trial index.
    pub fn sub_seed(&self, trial: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(&trial.to_le_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Create a seeded StdRng for a trial.
    pub fn rng_for(&self, trial: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(trial))
    }
}
