//! Handles settings for the command line. Values are layered: the optional
//! TOML file first, then `SPESE_*` environment variables, then CLI flags.
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_PATH: &str = "config/spese.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level for `spese` and `engine` targets.
    pub level: String,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty: false,
        }
    }
}

/// Overrides coming from the command line.
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub config: Option<&'a str>,
    pub level: Option<&'a str>,
    pub pretty: bool,
}

impl Settings {
    pub fn load(overrides: &Overrides<'_>) -> Result<Self> {
        let path = overrides.config.unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(overrides.config.is_some()))
            .add_source(config::Environment::with_prefix("SPESE"))
            .build()?
            .try_deserialize()?;

        if let Some(level) = overrides.level {
            settings.level = level.to_string();
        }
        if overrides.pretty {
            settings.pretty = true;
        }

        Ok(settings)
    }
}
