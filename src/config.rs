use crate::errors::{AppError, AppResult, ErrorContextExt};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

// Re-export shared types for convenience
pub use crate::shared::config::{Config, LoggingConfig, PushbulletConfig};

/// Configuration manager for spush
///
/// Loads the optional TOML configuration file. The file is never written:
/// a missing file at the default location simply means defaults.
///
/// # Configuration Location
///
/// 1. **Explicit**: the path given with `--config` (or `SPUSH_CONFIG`);
///    it must exist
/// 2. **Default**: `config.toml` in the platform config directory for
///    `spush`, e.g. `~/.config/spush/config.toml` on Linux
///
/// # Example
///
/// ```rust,no_run
/// use spush::config::ConfigManager;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config_manager = ConfigManager::new(None)?;
///     println!("API base: {}", config_manager.config().pushbullet.api_base);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Option<PathBuf>,
    loaded: bool,
    config: Config,
}

impl ConfigManager {
    /// Load configuration from `explicit_path`, or from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit path was given and does not exist
    /// - The file cannot be read
    /// - The file is not valid TOML for [`Config`]
    pub fn new(explicit_path: Option<PathBuf>) -> AppResult<Self> {
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(AppError::ConfigNotFound { path });
            }
            let config = Self::load(&path)?;
            return Ok(Self {
                config_path: Some(path),
                loaded: true,
                config,
            });
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => {
                let config = Self::load(&path)?;
                Ok(Self {
                    config_path: Some(path),
                    loaded: true,
                    config,
                })
            }
            path => Ok(Self {
                config_path: path,
                loaded: false,
                config: Config::default(),
            }),
        }
    }

    /// Wrap an in-memory configuration
    pub fn from_config(config: Config) -> Self {
        Self {
            config_path: None,
            loaded: false,
            config,
        }
    }

    /// Default configuration file location, if the platform has a config directory
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spush").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn load(path: &Path) -> AppResult<Config> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path).in_file_operation(path, "read config file")?;
        let config: Config = toml::from_str(&content)?;
        Url::parse(&config.pushbullet.api_base).map_err(|e| {
            AppError::config_with_source(
                format!("invalid api_base '{}'", config.pushbullet.api_base),
                e,
            )
        })?;
        Ok(config)
    }

    /// Returns an immutable reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path the configuration was (or would have been) loaded from
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Whether a file was actually read
    pub fn is_loaded_from_file(&self) -> bool {
        self.loaded
    }

    /// Token from the config file, if one is set and non-empty
    pub fn access_token(&self) -> Option<&str> {
        self.config
            .pushbullet
            .access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }
}
