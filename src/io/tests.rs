#[cfg(test)]
mod tests {
    use crate::io::*;
    use std::io::{Read, Write};
    use tempfile::NamedTempFile;

    type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

    #[test]
    fn test_file_device_positioned_write() -> Result<()> {
        let mut temp = NamedTempFile::new()?;
        temp.write_all(&[0xFF; 2048])?;
        temp.flush()?;

        let mut device = FileDevice::open(temp.path())?;
        let written = device.write_at(&[0x00; 512], 1024)?;
        assert_eq!(written, 512);
        Box::new(device).close()?;

        let mut contents = Vec::new();
        std::fs::File::open(temp.path())?.read_to_end(&mut contents)?;
        assert_eq!(contents.len(), 2048);
        assert!(contents[..1024].iter().all(|&b| b == 0xFF));
        assert!(contents[1024..1536].iter().all(|&b| b == 0x00));
        assert!(contents[1536..].iter().all(|&b| b == 0xFF));
        Ok(())
    }

    #[test]
    fn test_file_device_seek_size() -> Result<()> {
        let mut temp = NamedTempFile::new()?;
        temp.write_all(&[0x11; 1000])?;
        temp.flush()?;

        let mut device = FileDevice::open(temp.path())?;
        assert_eq!(device.seek_size()?, 1000);

        // Positioned writes are unaffected by the cursor left at the end
        device.write_at(&[0x22; 10], 0)?;
        assert_eq!(device.seek_size()?, 1000);
        Ok(())
    }

    #[test]
    fn test_file_device_open_missing_path() {
        let result = FileDevice::open(std::path::Path::new("/nonexistent/diskwipe/device"));
        assert!(result.is_err());
    }

    #[test]
    fn test_memory_device_write_and_inspect() -> Result<()> {
        let mut device = MemoryDevice::new(1024);
        let storage = device.storage();

        assert_eq!(device.write_at(&[0x00; 512], 512)?, 512);
        let contents = storage.snapshot();
        assert!(contents[..512].iter().all(|&b| b == 0xAB));
        assert!(contents[512..].iter().all(|&b| b == 0x00));
        Ok(())
    }

    #[test]
    fn test_memory_device_truncates_at_end() -> Result<()> {
        let mut device = MemoryDevice::new(600);
        assert_eq!(device.write_at(&[0x00; 512], 512)?, 88);
        assert_eq!(device.write_at(&[0x00; 512], 600)?, 0);
        Ok(())
    }

    #[test]
    fn test_memory_device_close_is_observable() -> Result<()> {
        let device = MemoryDevice::new(16);
        let storage = device.storage();
        assert!(!storage.is_closed());
        Box::new(device).close()?;
        assert!(storage.is_closed());
        assert_eq!(storage.len(), 16);
        Ok(())
    }
}
