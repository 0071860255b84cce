//! cancelkit Settings Crate
//!
//! Handles the configuration file: processing options and output naming.

pub mod config;
pub mod error;

pub use config::{Config, OutputSettings, ProcessingSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
