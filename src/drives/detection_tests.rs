/// Tests for device resolution
/// Tests cover rejection of non-device paths and size handling of device nodes

#[cfg(test)]
mod device_resolution_tests {
    use super::super::detection::{BlockDeviceResolver, DeviceDescriptor, DeviceResolver};
    use crate::io::MemoryDevice;
    use crate::WipeError;
    use std::io::Write;
    use std::path::Path;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_missing_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-device");

        let err = BlockDeviceResolver::new().resolve(&missing).unwrap_err();
        assert!(matches!(err, WipeError::NotFound { .. }), "got {:?}", err);
    }

    #[test]
    fn test_regular_file_is_rejected() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[0xAB; 4096]).unwrap();
        temp.flush().unwrap();

        let err = BlockDeviceResolver::new().resolve(temp.path()).unwrap_err();
        assert!(
            matches!(err, WipeError::NotABlockDevice { .. }),
            "got {:?}",
            err
        );

        // Nothing was written
        let contents = std::fs::read(temp.path()).unwrap();
        assert!(contents.iter().all(|&b| b == 0xAB));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = TempDir::new().unwrap();

        let err = BlockDeviceResolver::new().resolve(dir.path()).unwrap_err();
        assert!(
            matches!(err, WipeError::NotABlockDevice { .. }),
            "got {:?}",
            err
        );
    }

    #[test]
    fn test_zero_sized_device_node_is_empty() {
        // /dev/null is a character device whose seek-to-end reports 0
        let null = Path::new("/dev/null");
        if !null.exists() {
            return;
        }

        let err = BlockDeviceResolver::new().resolve(null).unwrap_err();
        assert!(matches!(err, WipeError::EmptyDevice { .. }), "got {:?}", err);
    }

    #[test]
    fn test_unseekable_device_node_has_no_size() {
        // /dev/ptmx opens for writing but rejects seeks with ESPIPE
        let ptmx = Path::new("/dev/ptmx");
        if !ptmx.exists() {
            return;
        }

        let err = BlockDeviceResolver::new().resolve(ptmx).unwrap_err();
        assert!(
            matches!(err, WipeError::SizeUnavailable { .. }),
            "got {:?}",
            err
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_is_device_node_for_regular_file() {
        let temp = NamedTempFile::new().unwrap();
        let file_type = std::fs::metadata(temp.path()).unwrap().file_type();
        assert!(!BlockDeviceResolver::is_device_node(&file_type));
    }

    #[test]
    fn test_descriptor_rejects_zero_size() {
        let err = DeviceDescriptor::new("/dev/sim", 0, Box::new(MemoryDevice::new(0))).unwrap_err();
        assert!(matches!(err, WipeError::EmptyDevice { .. }));
    }

    #[test]
    fn test_descriptor_accessors() {
        let descriptor =
            DeviceDescriptor::new("/dev/sim", 2048, Box::new(MemoryDevice::new(2048))).unwrap();
        assert_eq!(descriptor.path(), Path::new("/dev/sim"));
        assert_eq!(descriptor.size_bytes(), 2048);
        assert!(format!("{:?}", descriptor).contains("2048"));

        let (path, size, _handle) = descriptor.into_parts();
        assert_eq!(path, Path::new("/dev/sim"));
        assert_eq!(size, 2048);
    }
}
