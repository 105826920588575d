//! 後量子簽名命令行工具
//!
//! 本 crate 實現三個一次性命令，所有輸入輸出都是原始二進制文件:
//! 1. `keygen`: 生成密鑰對，保存公鑰與私鑰
//! 2. `sign`: 用私鑰簽名消息文件，保存簽名
//! 3. `verify`: 用公鑰驗證消息文件的簽名
//!
//! # 架構
//!
//! ```text
//!        ┌──────────┐
//!        │   cli    │  ← 命令名與參數數量檢查
//!        └────┬─────┘
//!             ▼
//!        ┌──────────┐
//!        │ commands │  ← 調度：讀取 → 簽名提供者 → 寫出
//!        └────┬─────┘
//!        ┌────┴──────────┐
//!        ▼               ▼
//!     blob_io      pqc_signer::SignatureScheme
//! ```
//!
//! # 示例用法
//!
//! ```no_run
//! use pqsig::{config::ToolConfig, run};
//!
//! let config = ToolConfig::default();
//! let outcome = run(["pqsig", "keygen", "pub.bin", "priv.bin"], &config)?;
//! println!("{}", outcome);
//! # Ok::<(), pqsig::ToolError>(())
//! ```

pub mod blob_io;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

// Re-export 常用類型
pub use cli::Command;
pub use commands::{execute, run, Outcome};
pub use error::{IoError, Result, Step, ToolError, UsageError};
