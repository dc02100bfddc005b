// Zero pattern - every block is all zeros
//
// The buffer never changes, so a single block is shared across every call.

use super::PatternSource;
use crate::BLOCK_SIZE;

pub struct ZeroPattern {
    block: [u8; BLOCK_SIZE],
}

impl ZeroPattern {
    pub fn new() -> Self {
        Self {
            block: [0u8; BLOCK_SIZE],
        }
    }
}

impl Default for ZeroPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternSource for ZeroPattern {
    fn next_block(&mut self, len: usize) -> &[u8] {
        debug_assert!(len <= BLOCK_SIZE, "block length {} exceeds BLOCK_SIZE", len);
        &self.block[..len]
    }

    fn name(&self) -> &'static str {
        "zero"
    }
}
