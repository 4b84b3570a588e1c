//! progdock-common — Shared configuration, errors and CLI plumbing used by
//! the progressive docking command-line tools.

pub mod error;
pub mod config;
pub mod logging;
pub mod legacy_args;

// Re-export commonly used types
pub use config::{Config, ExtractionSettings};
pub use error::ConfigError;
