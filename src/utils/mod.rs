//! Utilities Module
//!
//! Logging and network configuration shared across the crate.

pub mod logging;
pub mod network_config;

pub use network_config::{validate_endpoint, AccessConfig, EndpointValidation, Network};
