// Device resolution
//
// - detection.rs: turns a path into a verified, sized and opened device
// - detection_tests.rs: resolver tests against real filesystem entries

pub mod detection;

#[cfg(test)]
mod detection_tests;

pub use detection::{BlockDeviceResolver, DeviceDescriptor, DeviceResolver};
