// In-memory simulated device
//
// Storage is shared behind an Arc so a caller can keep a `MemoryStorage` handle
// and inspect the contents after the engine has consumed and closed the device.

use super::BlockDevice;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub struct MemoryDevice {
    storage: MemoryStorage,
}

/// Inspection handle onto a [`MemoryDevice`]'s contents
#[derive(Clone)]
pub struct MemoryStorage {
    bytes: Arc<Mutex<Vec<u8>>>,
    closed: Arc<AtomicBool>,
}

impl MemoryDevice {
    /// Device of `size` bytes pre-filled with 0xAB to simulate old data
    pub fn new(size: usize) -> Self {
        Self::with_contents(vec![0xAB; size])
    }

    pub fn with_contents(contents: Vec<u8>) -> Self {
        Self {
            storage: MemoryStorage {
                bytes: Arc::new(Mutex::new(contents)),
                closed: Arc::new(AtomicBool::new(false)),
            },
        }
    }

    pub fn storage(&self) -> MemoryStorage {
        self.storage.clone()
    }
}

impl MemoryStorage {
    /// Copy of the current contents
    pub fn snapshot(&self) -> Vec<u8> {
        match self.bytes.lock() {
            Ok(bytes) => bytes.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.bytes.lock() {
            Ok(bytes) => bytes.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the owning device has been closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl BlockDevice for MemoryDevice {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        let mut bytes = self
            .storage
            .bytes
            .lock()
            .map_err(|_| io::Error::other("memory device lock poisoned"))?;

        let len = bytes.len() as u64;
        if offset >= len {
            return Ok(0);
        }

        let start = offset as usize;
        let count = buf.len().min(bytes.len() - start);
        bytes[start..start + count].copy_from_slice(&buf[..count]);
        Ok(count)
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        self.storage.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
