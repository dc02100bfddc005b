use crate::io::{BlockDevice, FileDevice};
use crate::{WipeError, WipeResult};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

/// A verified device ready to be wiped.
///
/// The size is measured once during resolution and trusted for the whole run.
/// The handle is owned exclusively by whoever holds the descriptor; dropping or
/// consuming the descriptor releases it.
pub struct DeviceDescriptor {
    path: PathBuf,
    size_bytes: u64,
    handle: Box<dyn BlockDevice>,
}

impl DeviceDescriptor {
    pub fn new(
        path: impl Into<PathBuf>,
        size_bytes: u64,
        handle: Box<dyn BlockDevice>,
    ) -> WipeResult<Self> {
        let path = path.into();
        if size_bytes == 0 {
            return Err(WipeError::EmptyDevice { path });
        }
        Ok(Self {
            path,
            size_bytes,
            handle,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Split into path, size and the owned handle
    pub fn into_parts(self) -> (PathBuf, u64, Box<dyn BlockDevice>) {
        (self.path, self.size_bytes, self.handle)
    }
}

impl fmt::Debug for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceDescriptor")
            .field("path", &self.path)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// Turns a target path into a [`DeviceDescriptor`]
pub trait DeviceResolver {
    fn resolve(&self, path: &Path) -> WipeResult<DeviceDescriptor>;
}

/// Resolver for real device nodes.
///
/// Only block and character devices are accepted; regular files and directories
/// are never wipe targets.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockDeviceResolver;

impl BlockDeviceResolver {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn is_device_node(file_type: &fs::FileType) -> bool {
        file_type.is_block_device() || file_type.is_char_device()
    }
}

impl DeviceResolver for BlockDeviceResolver {
    fn resolve(&self, path: &Path) -> WipeResult<DeviceDescriptor> {
        let metadata = fs::metadata(path).map_err(|source| WipeError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        if !Self::is_device_node(&metadata.file_type()) {
            return Err(WipeError::NotABlockDevice {
                path: path.to_path_buf(),
            });
        }

        let mut device = FileDevice::open(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                WipeError::NotFound {
                    path: path.to_path_buf(),
                    source,
                }
            } else {
                WipeError::SizeUnavailable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let size_bytes = device
            .seek_size()
            .map_err(|source| WipeError::SizeUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            device = %path.display(),
            size_bytes = size_bytes,
            "Resolved target device"
        );

        DeviceDescriptor::new(path, size_bytes, Box::new(device))
    }
}
