use serde::{Deserialize, Serialize};

use crate::pushbullet::API_BASE_URL;

/// Main configuration structure for spush
///
/// Every section and field is optional in the TOML file; anything left out
/// takes its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pushbullet: PushbulletConfig,
    pub logging: LoggingConfig,
}

/// Pushbullet account and endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushbulletConfig {
    /// Used when neither `--token` nor `PUSHBULLET_TOKEN` is given
    pub access_token: Option<String>,
    pub api_base: String,
}

impl Default for PushbulletConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base: API_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. "warn" or "spush=debug"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
