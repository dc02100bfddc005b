// Random pattern - every block is filled with fresh pseudo-random bytes
//
// The generator is a statistical PRNG seeded once per run from the wall clock.
// It is chosen for throughput, not unpredictability: output is NOT suitable where
// an adversary must be unable to reconstruct the written stream. Erasure strength
// comes from overwriting, not from the secrecy of the pattern.

use super::PatternSource;
use crate::BLOCK_SIZE;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct RandomPattern {
    rng: StdRng,
    block: [u8; BLOCK_SIZE],
}

impl RandomPattern {
    /// Seed from the current wall-clock time
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(nanos)
    }

    /// Deterministic stream, used for reproducible runs and tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            block: [0u8; BLOCK_SIZE],
        }
    }
}

impl Default for RandomPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternSource for RandomPattern {
    fn next_block(&mut self, len: usize) -> &[u8] {
        debug_assert!(len <= BLOCK_SIZE, "block length {} exceeds BLOCK_SIZE", len);
        let block = &mut self.block[..len];
        self.rng.fill_bytes(block);
        block
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
