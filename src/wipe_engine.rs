// Wipe Engine - full-coverage overwrite passes over a resolved device
//
// Passes are strictly sequential and every pass covers [0, size) exactly once in
// BLOCK_SIZE steps, with a truncated final block when the size is not a multiple
// of the block size. A block is the unit of retry: short writes are resubmitted
// until the whole block is on the device, and interruption is only honoured
// between blocks.

use crate::algorithms::{pattern_for, PatternSource};
use crate::drives::DeviceDescriptor;
use crate::io::BlockDevice;
use crate::{WipeError, WipeResult, BLOCK_SIZE};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

/// Progress snapshot delivered after every completed block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WipeProgress {
    /// 1-based index of the running pass
    pub cycle: u32,
    pub cycles: u32,
    pub pass_bytes_written: u64,
    pub size_bytes: u64,
    pub total_bytes_written: u64,
}

impl WipeProgress {
    /// Completion of the current pass, 0.0..=100.0
    pub fn pass_percent(&self) -> f64 {
        if self.size_bytes == 0 {
            return 100.0;
        }
        (self.pass_bytes_written as f64 / self.size_bytes as f64) * 100.0
    }
}

pub struct WipeEngine {
    interrupt_check: Box<dyn Fn() -> bool>,
    progress: Option<Box<dyn FnMut(&WipeProgress)>>,
}

impl Default for WipeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WipeEngine {
    /// Engine that stops on the process-wide interrupt flag
    pub fn new() -> Self {
        Self {
            interrupt_check: Box::new(crate::is_interrupted),
            progress: None,
        }
    }

    /// Replace the interrupt source. Consulted before each block is started.
    pub fn with_interrupt_check(mut self, check: impl Fn() -> bool + 'static) -> Self {
        self.interrupt_check = Box::new(check);
        self
    }

    pub fn with_progress(mut self, callback: impl FnMut(&WipeProgress) + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Overwrite the device `cycles` times with zeros, or with random data when
    /// `randomize` is set. Returns the total bytes written (`cycles * size`).
    pub fn run(
        &mut self,
        descriptor: DeviceDescriptor,
        cycles: u32,
        randomize: bool,
    ) -> WipeResult<u64> {
        let mut pattern = pattern_for(randomize);
        self.run_with_pattern(descriptor, cycles, &mut *pattern)
    }

    /// Same as [`WipeEngine::run`] with a caller-supplied pattern
    pub fn run_with_pattern(
        &mut self,
        descriptor: DeviceDescriptor,
        cycles: u32,
        pattern: &mut dyn PatternSource,
    ) -> WipeResult<u64> {
        let (path, size_bytes, mut handle) = descriptor.into_parts();
        let start = Instant::now();

        let result = if cycles < 1 {
            Err(WipeError::Configuration(format!(
                "cycles must be at least 1, got {}",
                cycles
            )))
        } else {
            self.write_passes(&path, size_bytes, &mut *handle, cycles, pattern)
        };

        // The handle is released here on every path
        let close_result = handle.close();

        match (result, close_result) {
            (Ok(total), Ok(())) => {
                tracing::info!(
                    device = %path.display(),
                    bytes_written = total,
                    elapsed = %humantime::format_duration(start.elapsed()),
                    "Wipe completed"
                );
                Ok(total)
            }
            (Ok(total), Err(source)) => {
                tracing::error!(
                    device = %path.display(),
                    error = %source,
                    "Failed to flush device after final pass"
                );
                Err(WipeError::Flush {
                    bytes_written: total,
                    source,
                })
            }
            (Err(e), close_result) => {
                if let Err(close_err) = close_result {
                    tracing::warn!(
                        device = %path.display(),
                        error = %close_err,
                        "Failed to close device after aborted wipe"
                    );
                }
                Err(e)
            }
        }
    }

    fn write_passes(
        &mut self,
        path: &Path,
        size_bytes: u64,
        handle: &mut dyn BlockDevice,
        cycles: u32,
        pattern: &mut dyn PatternSource,
    ) -> WipeResult<u64> {
        let mut total = 0u64;

        for cycle in 1..=cycles {
            tracing::info!(
                device = %path.display(),
                cycle = cycle,
                cycles = cycles,
                pattern = pattern.name(),
                "Starting pass"
            );

            let mut offset = 0u64;
            while offset < size_bytes {
                if (self.interrupt_check)() {
                    tracing::warn!(
                        device = %path.display(),
                        cycle = cycle,
                        offset = offset,
                        bytes_written = total,
                        "Wipe interrupted; device is only partially overwritten"
                    );
                    return Err(WipeError::Interrupted {
                        bytes_written: total,
                    });
                }

                let len = (size_bytes - offset).min(BLOCK_SIZE as u64) as usize;
                let block = pattern.next_block(len);
                Self::write_block(handle, block, offset, &mut total)?;
                offset += len as u64;

                if let Some(callback) = self.progress.as_mut() {
                    callback(&WipeProgress {
                        cycle,
                        cycles,
                        pass_bytes_written: offset,
                        size_bytes,
                        total_bytes_written: total,
                    });
                }
            }

            tracing::info!(
                device = %path.display(),
                cycle = cycle,
                cycles = cycles,
                "Pass complete"
            );
        }

        Ok(total)
    }

    /// Write one whole block at `offset`, resubmitting the unwritten remainder
    /// after short writes. `total` only ever grows by bytes the device accepted.
    fn write_block(
        handle: &mut dyn BlockDevice,
        block: &[u8],
        offset: u64,
        total: &mut u64,
    ) -> WipeResult<()> {
        let mut done = 0usize;

        while done < block.len() {
            let at = offset + done as u64;
            match handle.write_at(&block[done..], at) {
                Ok(0) => {
                    tracing::error!(offset = at, "Device accepted no bytes");
                    return Err(WipeError::Io {
                        offset: at,
                        bytes_written: *total,
                        source: std::io::Error::from(ErrorKind::WriteZero),
                    });
                }
                Ok(n) => {
                    let n = n.min(block.len() - done);
                    done += n;
                    *total += n as u64;
                    if done < block.len() {
                        tracing::debug!(
                            offset = at,
                            written = n,
                            remaining = block.len() - done,
                            "Short write, retrying remainder"
                        );
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {
                    tracing::debug!(offset = at, "Write interrupted by signal, retrying");
                }
                Err(source) => {
                    tracing::error!(offset = at, error = %source, "Write failed");
                    return Err(WipeError::Io {
                        offset: at,
                        bytes_written: *total,
                        source,
                    });
                }
            }
        }

        Ok(())
    }
}
