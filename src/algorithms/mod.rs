//! Block patterns written by each overwrite pass.

pub mod random;
pub mod zero;


pub use random::RandomPattern;
pub use zero::ZeroPattern;

/// Produces the bytes for one block write.
///
/// `next_block` is called once per block, in device order. `len` never exceeds
/// [`crate::BLOCK_SIZE`]; it is shorter only for the final block of a device whose
/// size is not a multiple of the block size.
pub trait PatternSource {
    fn next_block(&mut self, len: usize) -> &[u8];

    /// Name used in log output
    fn name(&self) -> &'static str;
}

/// Select the pattern for a run
pub fn pattern_for(randomize: bool) -> Box<dyn PatternSource> {
    if randomize {
        Box::new(RandomPattern::new())
    } else {
        Box::new(ZeroPattern::new())
    }
}
