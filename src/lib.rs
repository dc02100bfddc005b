pub mod algorithms;
pub mod drives;
pub mod io;
pub mod settings;
pub mod ui;
pub mod wipe_engine;
pub mod wipe_orchestrator;

// Re-export the main entry points for convenience
pub use drives::{BlockDeviceResolver, DeviceDescriptor, DeviceResolver};
pub use wipe_engine::{WipeEngine, WipeProgress};
pub use wipe_orchestrator::{NoShutdown, ShutdownAction, SystemShutdown, WipeOrchestrator};

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Size of a single positioned write. Matches the smallest common sector size.
pub const BLOCK_SIZE: usize = 512;

// Global flag for handling Ctrl+C interrupts
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Set the interrupt flag (called by signal handler)
pub fn set_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Check if an interrupt has been received
pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Reset the interrupt flag (primarily for testing)
pub fn reset_interrupted() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

#[derive(Error, Debug)]
pub enum WipeError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Device not found: {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a block or character device: {}", path.display())]
    NotABlockDevice { path: PathBuf },

    #[error("Unable to determine device size of {}: {source}", path.display())]
    SizeUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Device reports a size of 0 bytes: {}", path.display())]
    EmptyDevice { path: PathBuf },

    #[error("Write failed at offset {offset} after {bytes_written} bytes were overwritten: {source}")]
    Io {
        offset: u64,
        bytes_written: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("All {bytes_written} bytes were written but flushing the device failed: {source}")]
    Flush {
        bytes_written: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation interrupted by user after {bytes_written} bytes were overwritten")]
    Interrupted { bytes_written: u64 },
}

impl WipeError {
    /// Bytes overwritten before the run stopped, for failures that happen mid-run.
    pub fn bytes_written(&self) -> Option<u64> {
        match self {
            WipeError::Io { bytes_written, .. }
            | WipeError::Flush { bytes_written, .. }
            | WipeError::Interrupted { bytes_written } => Some(*bytes_written),
            _ => None,
        }
    }

    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            WipeError::Configuration(_) => 2,
            WipeError::NotFound { .. }
            | WipeError::NotABlockDevice { .. }
            | WipeError::SizeUnavailable { .. }
            | WipeError::EmptyDevice { .. } => 3,
            WipeError::Io { .. } | WipeError::Flush { .. } => 4,
            WipeError::Interrupted { .. } => 130,
        }
    }
}

pub type WipeResult<T> = Result<T, WipeError>;

/// Immutable description of one wipe run.
///
/// Built once (from CLI flags layered over [`settings::Settings`]) and handed to the
/// orchestrator by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WipeConfiguration {
    target_path: PathBuf,
    randomize: bool,
    cycles: u32,
    shutdown_after: bool,
}

impl WipeConfiguration {
    pub fn new(
        target_path: impl Into<PathBuf>,
        randomize: bool,
        cycles: u32,
        shutdown_after: bool,
    ) -> WipeResult<Self> {
        let target_path = target_path.into();
        if target_path.as_os_str().is_empty() {
            return Err(WipeError::Configuration(
                "a target drive is required".to_string(),
            ));
        }
        if cycles < 1 {
            return Err(WipeError::Configuration(format!(
                "cycles must be at least 1, got {}",
                cycles
            )));
        }

        Ok(Self {
            target_path,
            randomize,
            cycles,
            shutdown_after,
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    pub fn randomize(&self) -> bool {
        self.randomize
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn shutdown_after(&self) -> bool {
        self.shutdown_after
    }
}
