//! Configuration file discovery and loading
//!
//! Values are layered in priority order:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Config file (searched in standard locations)
//! 4. Built-in defaults (lowest priority)
//!
//! This module only covers the config file layer; CLI and environment values
//! are merged on top by the binary.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::APP_NAME;

/// Describes where a configuration was loaded from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Explicit path provided via CLI or env var
    Explicit(PathBuf),
    /// Found in current working directory
    CurrentDir(PathBuf),
    /// Found in XDG config home (~/.config/climate-api/)
    XdgConfig(PathBuf),
    /// Found in system config (/etc/climate-api/)
    System(PathBuf),
    /// No config file found, using defaults
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// Find a configuration file in standard locations
///
/// Search order:
/// 1. Environment variable (e.g. `CLIMATE_API_CONFIG`)
/// 2. Current directory
/// 3. XDG config home (`$XDG_CONFIG_HOME/climate-api/` or `~/.config/climate-api/`)
/// 4. System config (`/etc/climate-api/`)
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    let explicit = env::var(env_var).ok().map(PathBuf::from);

    let candidates = [
        explicit.map(ConfigSource::Explicit),
        Some(ConfigSource::CurrentDir(PathBuf::from(filename))),
        Some(ConfigSource::XdgConfig(xdg_config_path(filename))),
        Some(ConfigSource::System(
            PathBuf::from("/etc").join(APP_NAME).join(filename),
        )),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|source| source.path().is_some_and(|p| p.exists()))
        .unwrap_or(ConfigSource::Defaults)
}

fn xdg_config_path(filename: &str) -> PathBuf {
    let base = match (env::var("XDG_CONFIG_HOME"), env::var("HOME")) {
        (Ok(xdg), _) => PathBuf::from(xdg),
        (Err(_), Ok(home)) => PathBuf::from(home).join(".config"),
        // won't exist, which just skips this location
        _ => PathBuf::from(".config"),
    };
    base.join(APP_NAME).join(filename)
}

/// Load and parse a TOML configuration file.
///
/// Returns `T::default()` when the source is [`ConfigSource::Defaults`].
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    let Some(path) = source.path() else {
        return Ok(T::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}
