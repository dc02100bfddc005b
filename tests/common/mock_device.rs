/// Fault-injecting simulated device
///
/// Wraps a `MemoryDevice` and can cap how many bytes each write call accepts,
/// fail hard at a given offset, and records every accepted write.
use diskwipe::io::{BlockDevice, MemoryDevice, MemoryStorage};
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedWrite {
    pub offset: u64,
    pub len: usize,
}

pub struct FaultyDevice {
    inner: MemoryDevice,
    max_per_call: Option<usize>,
    fail_at_offset: Option<u64>,
    writes: Arc<Mutex<Vec<AcceptedWrite>>>,
}

/// Handles kept by the test after the device has been handed to the engine
pub struct DeviceProbe {
    pub storage: MemoryStorage,
    writes: Arc<Mutex<Vec<AcceptedWrite>>>,
}

impl DeviceProbe {
    pub fn writes(&self) -> Vec<AcceptedWrite> {
        self.writes.lock().unwrap().clone()
    }
}

impl FaultyDevice {
    pub fn new(size: usize) -> Self {
        Self {
            inner: MemoryDevice::new(size),
            max_per_call: None,
            fail_at_offset: None,
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every write call accepts at most `max` bytes
    pub fn short_writes(mut self, max: usize) -> Self {
        self.max_per_call = Some(max);
        self
    }

    /// Writes starting at `offset` fail with a hard error
    pub fn fail_at(mut self, offset: u64) -> Self {
        self.fail_at_offset = Some(offset);
        self
    }

    pub fn probe(&self) -> DeviceProbe {
        DeviceProbe {
            storage: self.inner.storage(),
            writes: self.writes.clone(),
        }
    }
}

impl BlockDevice for FaultyDevice {
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        if self.fail_at_offset == Some(offset) {
            return Err(io::Error::other("simulated media error"));
        }

        let len = self.max_per_call.map_or(buf.len(), |max| max.min(buf.len()));
        let written = self.inner.write_at(&buf[..len], offset)?;
        self.writes.lock().unwrap().push(AcceptedWrite {
            offset,
            len: written,
        });
        Ok(written)
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        let this = *self;
        Box::new(this.inner).close()
    }
}
