//! 統一錯誤類型定義
//!
//! 文件 I/O、簽名提供者與命令行解析的失敗都匯入 `ToolError`，
//! 由調度器轉換為操作員可讀的消息與非零退出碼。

use pqc_signer::CryptoError;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 文件讀寫錯誤
///
/// 每個變體都帶有出錯的文件路徑
#[derive(Error, Debug)]
pub enum IoError {
    /// 文件不存在
    #[error("file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 文件存在但無法完整讀取
    #[error("failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 目標無法打開、寫入或替換
    #[error("failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IoError {
    /// 出錯的文件路徑
    pub fn path(&self) -> &Path {
        match self {
            IoError::NotFound { path, .. }
            | IoError::ReadFailure { path, .. }
            | IoError::WriteFailure { path, .. } => path,
        }
    }

    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            IoError::NotFound {
                path: path.to_path_buf(),
                source,
            }
        } else {
            IoError::ReadFailure {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        IoError::WriteFailure {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// 命令行用法錯誤（在任何文件 I/O 之前檢出）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// 未提供命令
    #[error("{usage}")]
    MissingCommand { usage: String },

    /// 無法識別的命令名
    #[error("Invalid mode '{command}'. Use 'keygen', 'sign', or 'verify'.\n\n{usage}")]
    UnknownCommand { command: String, usage: String },

    /// 命令的位置參數數量不對
    #[error("{usage}")]
    WrongArity { usage: String },
}

/// 命令執行中的步驟，用於錯誤上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    InitScheme,
    GenerateKeypair,
    WritePublicKey,
    WritePrivateKey,
    ReadMessage,
    ReadPrivateKey,
    ReadSignature,
    ReadPublicKey,
    Sign,
    WriteSignature,
    Verify,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Step::InitScheme => "Failed to open signature scheme",
            Step::GenerateKeypair => "Failed to generate key pair",
            Step::WritePublicKey => "Failed to save public key",
            Step::WritePrivateKey => "Failed to save private key",
            Step::ReadMessage => "Failed to read message",
            Step::ReadPrivateKey => "Failed to read private key",
            Step::ReadSignature => "Failed to read signature",
            Step::ReadPublicKey => "Failed to read public key",
            Step::Sign => "Failed to sign message",
            Step::WriteSignature => "Failed to save signature",
            Step::Verify => "Failed to verify signature",
        };
        f.write_str(text)
    }
}

/// 工具錯誤類型
///
/// 涵蓋一次命令調用可能遇到的所有失敗：
/// - 用法錯誤（命令名或參數數量）
/// - 文件讀寫
/// - 簽名提供者（初始化、密鑰生成、簽名、驗證）
/// - 密鑰生成後只寫出一半密鑰文件
/// - 配置錯誤
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("{step}: {source}")]
    Io {
        step: Step,
        #[source]
        source: IoError,
    },

    #[error("{step}: {source}")]
    Crypto {
        step: Step,
        #[source]
        source: CryptoError,
    },

    /// 公鑰已寫出但私鑰未寫出（或反之），且未能回滾
    #[error(
        "Key generation incomplete: {} was written but the key pair is not complete: {source}",
        written.display()
    )]
    PartialKeygen {
        written: PathBuf,
        #[source]
        source: IoError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ToolError {
    /// 為 `map_err` 構造帶步驟的 I/O 錯誤
    pub fn io(step: Step) -> impl FnOnce(IoError) -> ToolError {
        move |source| ToolError::Io { step, source }
    }

    /// 為 `map_err` 構造帶步驟的密碼學錯誤
    pub fn crypto(step: Step) -> impl FnOnce(CryptoError) -> ToolError {
        move |source| ToolError::Crypto { step, source }
    }

    /// 簽名未通過驗證（預期中的否定結果，而非工具故障）
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            ToolError::Crypto { source, .. } if source.is_verification_failure()
        )
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, ToolError::Usage(_))
    }

    /// 失敗所在的步驟（如有）
    pub fn step(&self) -> Option<Step> {
        match self {
            ToolError::Io { step, .. } | ToolError::Crypto { step, .. } => Some(*step),
            ToolError::PartialKeygen { .. } => Some(Step::WritePrivateKey),
            ToolError::Usage(_) | ToolError::Config(_) => None,
        }
    }
}

/// Result 類型別名
pub type Result<T> = std::result::Result<T, ToolError>;

/// 從配置錯誤轉換
impl From<config::ConfigError> for ToolError {
    fn from(err: config::ConfigError) -> Self {
        ToolError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = IoError::read(
            Path::new("missing_key.bin"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, IoError::NotFound { .. }));
        assert_eq!(err.path(), Path::new("missing_key.bin"));

        let tool = ToolError::io(Step::ReadPrivateKey)(err);
        let text = tool.to_string();
        assert!(text.starts_with("Failed to read private key"));
        assert!(text.contains("missing_key.bin"));
    }

    #[test]
    fn test_read_failure_kind() {
        let err = IoError::read(
            Path::new("msg.bin"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, IoError::ReadFailure { .. }));
    }

    #[test]
    fn test_verification_failure_is_distinguished() {
        let rejected = ToolError::crypto(Step::Verify)(CryptoError::VerificationFailed(
            "mismatch".to_string(),
        ));
        let broken = ToolError::crypto(Step::InitScheme)(CryptoError::InitFailure(
            "unsupported".to_string(),
        ));

        assert!(rejected.is_verification_failure());
        assert!(!broken.is_verification_failure());
        assert_eq!(rejected.step(), Some(Step::Verify));
    }

    #[test]
    fn test_init_failure_message_names_cause_once() {
        let err = ToolError::crypto(Step::InitScheme)(CryptoError::InitFailure(
            "Unsupported algorithm: rsa".to_string(),
        ));

        assert_eq!(
            err.to_string(),
            "Failed to open signature scheme: Scheme unavailable: Unsupported algorithm: rsa"
        );
    }

    #[test]
    fn test_partial_keygen_message() {
        let err = ToolError::PartialKeygen {
            written: PathBuf::from("pub.bin"),
            source: IoError::write(
                Path::new("priv.bin"),
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            ),
        };
        let text = err.to_string();

        assert!(text.contains("pub.bin"));
        assert!(text.contains("priv.bin"));
        assert!(text.starts_with("Key generation incomplete"));
    }
}
