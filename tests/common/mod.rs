//! Common test utilities and mock infrastructure
//!
//! This module provides shared functionality for integration tests including:
//! - A fault-injecting simulated device
//! - File fixtures and content checks

#![allow(dead_code)]

pub mod mock_device;
pub mod test_helpers;
