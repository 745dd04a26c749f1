//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{
    error::{ConfigError, Result},
    types::{AppConfig, StorageBackend},
};

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            env_prefix: "TASKBOARD".to_string(),
        }
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            ..Self::new()
        }
    }

    /// Use a different environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get default config path
    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskboard")
            .join("config.toml")
    }

    /// Load configuration from the file (if present) and environment, then validate
    pub fn load_config(&self) -> Result<AppConfig> {
        debug!("Loading configuration from {}", self.config_path.display());

        let builder = Config::builder()
            .add_source(
                File::from(self.config_path.clone())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        self.validate_config(&app_config)?;
        Ok(app_config)
    }

    /// Write configuration as TOML, creating parent directories
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let toml = toml::to_string(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate_config(&self, config: &AppConfig) -> Result<()> {
        if config.server.port == 0 {
            return Err(ConfigError::Validation(
                "Server port must be greater than 0".to_string(),
            ));
        }

        let prefix = &config.server.api_prefix;
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "API prefix must look like `/api`, got `{}`",
                prefix
            )));
        }

        if EnvFilter::try_new(&config.logging.level).is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid log level `{}`",
                config.logging.level
            )));
        }

        let storage = &config.storage;
        if storage.backend == StorageBackend::Surreal
            && storage.is_remote()
            && (storage.username.is_none() || storage.password.is_none())
        {
            return Err(ConfigError::Validation(
                "Remote SurrealDB storage requires username and password".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
