//! Climate API Core Library
//!
//! Shared utilities for the climate query service:
//! - Configuration loading (XDG-compliant)
//! - Dataset file checks
//! - Common constants

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::{require_file, FsError};

/// Application name used for XDG paths
pub const APP_NAME: &str = "climate-api";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default location of the climate dataset
pub const DEFAULT_DATABASE_PATH: &str = "./Resources/hawaii.sqlite";
