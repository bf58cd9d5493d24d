//! hls-edge - device-aware HLS master playlist proxy
//!
//! This library crate exposes the proxy building blocks for integration testing.

pub mod config;
pub mod device;
pub mod origin;
pub mod rewrite;
pub mod server;
