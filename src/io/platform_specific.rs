// Real device handle backed by a file descriptor

use super::BlockDevice;
use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom};
use std::os::unix::fs::FileExt;
use std::path::Path;

pub struct FileDevice {
    file: File,
}

impl FileDevice {
    /// Open a device node (or any file) for writing
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().write(true).open(path)?;
        Ok(Self { file })
    }

    /// Byte extent of the device, measured by seeking to its end.
    ///
    /// Device nodes commonly report a length of 0 through metadata, so the
    /// seek is the only reliable measurement. The cursor position is irrelevant
    /// afterwards since every write is positioned.
    pub fn seek_size(&mut self) -> io::Result<u64> {
        self.file.seek(SeekFrom::End(0))
    }
}

impl BlockDevice for FileDevice {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        // pwrite; does not move the file cursor
        FileExt::write_at(&self.file, buf, offset)
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        match self.file.sync_all() {
            Ok(()) => Ok(()),
            // Some character devices don't support fsync
            Err(e) if e.raw_os_error() == Some(libc::EINVAL) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
