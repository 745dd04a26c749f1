//! Taskboard Configuration Management
//!
//! Loads the server configuration from an optional TOML file layered under
//! `TASKBOARD_<SECTION>__<KEY>` environment variables, and validates the result.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{AppConfig, LoggingConfig, ServerConfig, StorageBackend, StorageConfig};
