//! Device capability seam.
//!
//! The wipe engine only ever needs two operations from a device: a positioned
//! write and a final close. Keeping the seam this narrow lets the engine run
//! against a real device node ([`FileDevice`]) or an in-memory simulation
//! ([`MemoryDevice`]) without any change.

pub mod memory;
pub mod platform_specific;

#[cfg(test)]
mod tests;

// Re-exports
pub use memory::{MemoryDevice, MemoryStorage};
pub use platform_specific::FileDevice;

use std::io;

/// Minimal write capability over an exclusively owned device handle
pub trait BlockDevice: Send {
    /// Write `buf` at `offset`, returning how many bytes were accepted.
    ///
    /// A return value smaller than `buf.len()` is a short write; the caller is
    /// responsible for resubmitting the remainder.
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize>;

    /// Flush outstanding writes and release the handle
    fn close(self: Box<Self>) -> io::Result<()>;
}
