//! CLI context: loaded configuration plus logging setup

use spush::config::ConfigManager;
use spush::errors::{AppError, AppResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// CLI execution context containing shared dependencies and configuration
#[derive(Clone)]
pub struct CliContext {
    pub verbose: bool,
    pub config_manager: Arc<ConfigManager>,
}

impl CliContext {
    /// Load configuration from `config_path` (or the default location)
    pub fn new(config_path: Option<PathBuf>, verbose: bool) -> AppResult<Self> {
        let config_manager = Arc::new(ConfigManager::new(config_path)?);
        Ok(Self {
            verbose,
            config_manager,
        })
    }

    #[cfg(test)]
    pub fn from_manager(config_manager: ConfigManager, verbose: bool) -> Self {
        Self {
            verbose,
            config_manager: Arc::new(config_manager),
        }
    }

    /// Initialize logging to stderr based on verbosity and configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let log_level = self.log_level();

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(
                    log_level
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::WARN.into()),
                ),
            )
            .try_init()
            .map_err(|e| AppError::Other {
                message: format!("failed to initialise logging: {e}"),
                source: None,
            })?;

        if self.verbose {
            tracing::debug!("Verbose logging enabled");
            tracing::debug!(
                "Config file: {:?} (loaded: {})",
                self.config_manager.config_path(),
                self.config_manager.is_loaded_from_file()
            );
        }

        Ok(())
    }

    fn log_level(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.config_manager.config().logging.level
        }
    }
}
