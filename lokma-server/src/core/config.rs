//! Server configuration

use std::path::PathBuf;

/// Core layer configuration
///
/// # Environment variables
///
/// Every setting can be overridden via environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/lokma | Working directory (database, logs) |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | Log level filter |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/lokma LOG_LEVEL=debug cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log level filter
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/lokma".to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Path of the embedded database under the working directory
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("lokma.db")
    }

    /// Path of the log directory under the working directory
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_under_work_dir() {
        let config = Config {
            work_dir: "/tmp/lokma-test".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
        };
        assert_eq!(config.db_path(), PathBuf::from("/tmp/lokma-test/lokma.db"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/lokma-test/logs"));
        assert!(!config.is_production());
    }
}
