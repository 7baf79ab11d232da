//! HandOrbit Common Utilities
//!
//! Shared infrastructure for all HandOrbit crates:
//! - Error types and result aliases
//! - Clocks for real-time and replayed sessions
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
