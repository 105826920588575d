//! 配置管理模塊
//!
//! 配置只從環境變量讀取（前綴 `PQSIG_`），不引入額外的命令行標誌：
//!
//! | 環境變量 | 默認值 | 說明 |
//! |----------|--------|------|
//! | `PQSIG_LOG_LEVEL` | `warn` | 日誌級別 (trace, debug, info, warn, error) |
//! | `PQSIG_ALGORITHM` | `dilithium2` | 簽名算法，每次命令執行時解析 |
//! | `PQSIG_ATOMIC_KEYGEN` | `true` | 兩個密鑰文件全部寫出或全部不寫 |

use crate::error::{Result, ToolError};
use config::{Config, Environment};
use serde::Deserialize;

/// 環境變量前綴
pub const ENV_PREFIX: &str = "PQSIG";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 工具配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// 日誌級別
    pub log_level: String,
    /// 簽名算法名（未知名稱在打開方案時報 `InitFailure`）
    pub algorithm: String,
    /// 密鑰生成是否全有或全無
    pub atomic_keygen: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            algorithm: pqc_signer::Algorithm::default().name().to_string(),
            atomic_keygen: true,
        }
    }
}

impl ToolConfig {
    /// 解析後的日誌級別
    pub fn tracing_level(&self) -> tracing::Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "error" => tracing::Level::ERROR,
            _ => tracing::Level::WARN,
        }
    }
}

/// 從進程環境變量加載配置
pub fn load_config() -> Result<ToolConfig> {
    load_config_from(Environment::with_prefix(ENV_PREFIX))
}

/// 從給定的環境變量源加載配置
///
/// 測試中用 `Environment::source` 傳入固定的變量表，避免修改進程環境。
pub fn load_config_from(env: Environment) -> Result<ToolConfig> {
    let defaults = ToolConfig::default();

    let config = Config::builder()
        .set_default("log_level", defaults.log_level)?
        .set_default("algorithm", defaults.algorithm)?
        .set_default("atomic_keygen", defaults.atomic_keygen)?
        .add_source(env.try_parsing(true))
        .build()
        .map_err(|e| ToolError::Config(format!("Failed to load env vars: {}", e)))?;

    let tool_config: ToolConfig = config
        .try_deserialize()
        .map_err(|e| ToolError::Config(format!("Failed to parse env config: {}", e)))?;

    validate_config(&tool_config)?;

    Ok(tool_config)
}

/// 驗證配置的有效性
///
/// 算法名不在這裡檢查：它屬於簽名方案初始化失敗。
fn validate_config(config: &ToolConfig) -> Result<()> {
    if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
        return Err(ToolError::Config(format!(
            "Unknown log level: {} (expected one of {})",
            config.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.algorithm.trim().is_empty() {
        return Err(ToolError::Config("algorithm must not be empty".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_with(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ToolConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.algorithm, "Dilithium2");
        assert!(config.atomic_keygen);
    }

    #[test]
    fn test_load_defaults_from_empty_env() {
        let config = load_config_from(env_with(&[])).unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = load_config_from(env_with(&[
            ("PQSIG_LOG_LEVEL", "debug"),
            ("PQSIG_ALGORITHM", "falcon512"),
            ("PQSIG_ATOMIC_KEYGEN", "false"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
        assert_eq!(config.algorithm, "falcon512");
        assert!(!config.atomic_keygen);
    }

    #[test]
    fn test_invalid_log_level() {
        let result = load_config_from(env_with(&[("PQSIG_LOG_LEVEL", "loud")]));
        match result {
            Err(ToolError::Config(msg)) => assert!(msg.contains("Unknown log level")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_algorithm() {
        let mut config = ToolConfig::default();
        config.algorithm = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }
}
