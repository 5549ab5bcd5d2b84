// Copyright 2025 Martin Pool

//! Configuration files for cwlens.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use jiff::tz::TimeZone;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// Default configuration file name, relative to home.
static DEFAULT_CONFIG_FILE: &str = ".config/cwlens.toml";

/// Streams listed for a log group in browse mode, unless configured.
pub static DEFAULT_STREAM_LIMIT: usize = 50;

/// Configuration for cwlens.
///
/// This is by default read from `~/.config/cwlens.toml`, or from the file specified by
/// `--config`. Command line options override it.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// AWS region to use without asking, like "eu-west-1".
    pub region: Option<String>,

    /// Number of most recently active log streams to offer when browsing a log group.
    pub stream_limit: Option<usize>,

    /// IANA time zone name for displayed times, like "Australia/Sydney". Defaults to the
    /// system time zone.
    pub time_zone: Option<String>,

    /// Shared AWS credentials file to read and update, instead of `~/.aws/credentials`.
    pub credentials_file: Option<PathBuf>,
}

impl Config {
    /// Load from a file, or load from the default location, or use builtin defaults.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = config_path {
            return Self::from_file(config_path);
        }
        #[allow(deprecated)]
        let Some(home) = std::env::home_dir() else {
            debug!("No home directory, using default config");
            return Ok(Self::default());
        };
        let default_path = home.join(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::from_file(&default_path)
        } else {
            debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub(crate) fn from_file(config_path: &Path) -> Result<Self> {
        debug!(?config_path, "Loading config from file");
        let config_str = std::fs::read_to_string(config_path).map_err(|err| {
            Error::Config(format!(
                "Failed to load config file {}: {err}",
                config_path.display()
            ))
        })?;
        config_str.parse().map_err(|err| {
            Error::Config(format!(
                "Failed to parse config file {}: {err}",
                config_path.display()
            ))
        })
    }

    pub fn stream_limit_or_default(&self) -> usize {
        self.stream_limit.unwrap_or(DEFAULT_STREAM_LIMIT)
    }

    /// The configured time zone, or the system zone.
    pub fn time_zone(&self) -> Result<TimeZone> {
        match &self.time_zone {
            Some(name) => TimeZone::get(name)
                .map_err(|err| Error::Config(format!("Unknown time zone {name:?}: {err}"))),
            None => Ok(TimeZone::system()),
        }
    }
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        toml::from_str(s)
    }
}
