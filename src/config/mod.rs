//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, DatabaseConfig, HashAlgorithm, HashingConfig, LogFormat, LoggingConfig,
    ServerConfig, StorageBackend, StorageConfig,
};
