//! Layered run settings.
//!
//! Precedence, lowest first: built-in defaults, the settings file (the platform
//! config dir's `diskwipe.toml`, or an explicit path), `DISKWIPE_*` environment
//! variables, and finally command-line flags via [`Settings::into_configuration`].
//!
//! `shutdown_after` is only reachable through the file or the environment.

use crate::{WipeConfiguration, WipeError, WipeResult};
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CYCLES: i64 = 3;

const SETTINGS_FILE: &str = "diskwipe.toml";
const ENV_PREFIX: &str = "DISKWIPE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub randomize: bool,
    pub cycles: i64,
    pub shutdown_after: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            randomize: false,
            cycles: DEFAULT_CYCLES,
            shutdown_after: false,
        }
    }
}

/// Flags given explicitly on the command line; `None` leaves the layered value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub randomize: Option<bool>,
    pub cycles: Option<i64>,
}

impl Settings {
    /// Default settings file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "diskwipe").map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load defaults, then the settings file, then the environment.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> WipeResult<Self> {
        let mut builder = Config::builder()
            .set_default("randomize", false)
            .and_then(|b| b.set_default("cycles", DEFAULT_CYCLES))
            .and_then(|b| b.set_default("shutdown_after", false))
            .map_err(config_error)?;

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(default_path) = Self::default_path() {
                    builder = builder.add_source(File::from(default_path).required(false));
                }
            }
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize::<Settings>())
            .map_err(config_error)
    }

    /// Apply command-line overrides and validate into the immutable configuration
    pub fn into_configuration(
        self,
        target_path: impl Into<PathBuf>,
        overrides: &Overrides,
    ) -> WipeResult<WipeConfiguration> {
        let cycles = overrides.cycles.unwrap_or(self.cycles);
        let cycles = u32::try_from(cycles).map_err(|_| {
            WipeError::Configuration(format!(
                "cycles must be between 1 and {}, got {}",
                u32::MAX,
                cycles
            ))
        })?;

        WipeConfiguration::new(
            target_path,
            overrides.randomize.unwrap_or(self.randomize),
            cycles,
            self.shutdown_after,
        )
    }
}

fn config_error(err: config::ConfigError) -> WipeError {
    WipeError::Configuration(err.to_string())
}
