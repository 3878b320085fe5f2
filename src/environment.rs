//! Environment resolution
//!
//! Maps the `DEV` flag to the base URL of the plugin server. The flag value
//! is passed in by the caller; nothing here reads the process environment.

use crate::config::PluginConfig;
use crate::error::ConfigError;

/// Name of the environment variable selecting the plugin deployment
pub const DEV_ENV_VAR: &str = "DEV";

/// Plugin deployment the agent talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Interpret the raw flag value. Only the exact string `"true"` selects
    /// development; an absent flag is an error rather than a default.
    pub fn from_flag(flag: Option<&str>) -> Result<Self, ConfigError> {
        match flag {
            Some("true") => Ok(Self::Development),
            Some(_) => Ok(Self::Production),
            None => Err(ConfigError::MissingEnv(DEV_ENV_VAR.to_string())),
        }
    }

    pub fn base_url<'a>(&self, config: &'a PluginConfig) -> &'a str {
        match self {
            Self::Development => &config.dev_url,
            Self::Production => &config.prod_url,
        }
    }
}

/// Resolve the plugin base URL for a `DEV` flag value
pub fn resolve_base_url(flag: Option<&str>, config: &PluginConfig) -> Result<String, ConfigError> {
    let env = Environment::from_flag(flag)?;
    Ok(env.base_url(config).to_string())
}
