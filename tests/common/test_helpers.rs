/// Common test helper functions
use std::fs;
use std::io::{Read, Write};
use tempfile::NamedTempFile;

/// Temporary file of `size` bytes filled with 0xAB to simulate existing data
pub fn used_file(size: usize) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(&vec![0xAB; size])?;
    file.flush()?;
    Ok(file)
}

/// Verify that a file contains only zeros
pub fn verify_all_zeros(path: &std::path::Path) -> std::io::Result<bool> {
    let mut file = fs::File::open(path)?;
    let mut buffer = vec![0u8; 4096];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }

        if buffer[..bytes_read].iter().any(|&byte| byte != 0) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Count bytes still holding the 0xAB fill
pub fn count_original_bytes(contents: &[u8]) -> usize {
    contents.iter().filter(|&&b| b == 0xAB).count()
}
