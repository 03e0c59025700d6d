use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// 配置驗證錯誤
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("缺少必要配置項: {0}")]
    MissingField(String),

    #[error("無效的配置值: {0}")]
    InvalidValue(String),
}

/// 配置驗證器trait
pub trait Validator {
    /// 驗證配置
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 應用程序配置結構
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

impl Validator for ApplicationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證各個部分的配置
        self.database.validate()?;
        self.log.validate()?;

        Ok(())
    }
}

/// 數據庫配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime_secs: u64,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Validator for DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.host.trim().is_empty() {
            return Err(ValidationError::MissingField("database.host".to_string()));
        }
        if self.database.trim().is_empty() {
            return Err(ValidationError::MissingField(
                "database.database".to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(ValidationError::InvalidValue(
                "database.max_connections 必須大於 0".to_string(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidValue(
                "database.min_connections 不得大於 max_connections".to_string(),
            ));
        }

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // 驗證日誌級別
        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue(format!(
                "log.level 的值 {} 不是有效選項: {:?}",
                self.level, LEVELS
            )));
        }

        // 驗證日誌格式
        const FORMATS: &[&str] = &["pretty", "json"];
        if !FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue(format!(
                "log.format 的值 {} 不是有效選項: {:?}",
                self.format, FORMATS
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_database_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            username: "recency_user".to_string(),
            password: "recency_pass".to_string(),
            database: "recency".to_string(),
            max_connections: 10,
            min_connections: 1,
            max_lifetime_secs: 1800,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }

    #[test]
    fn test_valid_database_config_passes() {
        assert!(valid_database_config().validate().is_ok());
    }

    #[test]
    fn test_empty_host_is_missing_field() {
        let mut config = valid_database_config();
        config.host = "  ".to_string();

        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingField(_))
        ));
    }

    #[test]
    fn test_pool_bounds_are_checked() {
        let mut config = valid_database_config();
        config.min_connections = 20;

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_log_config_validation() {
        let config = LogConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        };
        assert!(config.validate().is_ok());

        let config = LogConfig {
            level: "verbose".to_string(),
            format: "pretty".to_string(),
        };
        assert!(config.validate().is_err());

        let config = LogConfig {
            level: "info".to_string(),
            format: "xml".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
