//! 原始字節文件讀寫
//!
//! 密鑰、消息與簽名都是無格式的二進制文件：沒有頭部、沒有編碼。
//!
//! 寫入先落到目標目錄中的暫存文件，同步到磁盤、設置權限後再以
//! rename 原子替換目標，失敗時不會留下被截斷的目標文件。
//!
//! # 文件權限（Unix/Linux）
//!
//! - 私鑰文件設置為 `0o600`（僅所有者可讀寫）
//! - 其他文件設置為 `0o644`（所有者可讀寫，其他人只讀）

use crate::error::IoError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// 寫出文件的權限類別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// 公鑰、簽名 (0o644)
    Public,
    /// 私鑰 (0o600)
    Secret,
}

impl FileMode {
    pub fn bits(self) -> u32 {
        match self {
            FileMode::Public => 0o644,
            FileMode::Secret => 0o600,
        }
    }
}

/// 讀取整個文件
///
/// 要麼返回完整內容，要麼返回錯誤；不存在部分讀取成功的情況。
///
/// # 錯誤
/// - `IoError::NotFound`: 文件不存在
/// - `IoError::ReadFailure`: 其他打開或讀取失敗
pub fn read_file(path: &Path) -> Result<Vec<u8>, IoError> {
    let bytes = fs::read(path).map_err(|e| IoError::read(path, e))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// 創建或替換文件，寫入恰好 `bytes.len()` 個字節（權限 644）
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), IoError> {
    StagedBlob::stage(path, bytes, FileMode::Public)?.commit()?;
    Ok(())
}

/// 與 `write_file` 相同，但權限為 600
pub fn write_secret_file(path: &Path, bytes: &[u8]) -> Result<(), IoError> {
    StagedBlob::stage(path, bytes, FileMode::Secret)?.commit()?;
    Ok(())
}

/// 已寫入暫存文件、尚未替換目標的數據
///
/// 未 `commit()` 就被丟棄時，暫存文件會被刪除，目標保持不變。
#[derive(Debug)]
pub struct StagedBlob {
    temp: NamedTempFile,
    /// 調用方給出的路徑（用於錯誤消息）
    path: PathBuf,
    /// 解析符號鏈接後的目標
    target: PathBuf,
}

impl StagedBlob {
    /// 把 `bytes` 寫入 `path` 同目錄下的暫存文件
    ///
    /// # 錯誤
    /// - `IoError::WriteFailure`: 目錄不存在、無寫權限、寫入不完整
    pub fn stage(path: &Path, bytes: &[u8], mode: FileMode) -> Result<Self, IoError> {
        let target = resolve_write_target(path)?;
        let dir = parent_dir(&target);

        let mut temp = tempfile::Builder::new()
            .prefix(".pqsig-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| IoError::write(path, e))?;

        temp.write_all(bytes).map_err(|e| IoError::write(path, e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| IoError::write(path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            temp.as_file()
                .set_permissions(fs::Permissions::from_mode(mode.bits()))
                .map_err(|e| IoError::write(path, e))?;
        }

        #[cfg(not(unix))]
        if mode == FileMode::Secret {
            warn!(
                "File permissions not set (non-Unix system). Ensure {} is protected manually!",
                path.display()
            );
        }

        Ok(Self {
            temp,
            path: path.to_path_buf(),
            target,
        })
    }

    /// 以 rename 原子替換目標文件，返回實際寫入的路徑（符號鏈接已解析）
    pub fn commit(self) -> Result<PathBuf, IoError> {
        let Self { temp, path, target } = self;
        let len = temp
            .as_file()
            .metadata()
            .map(|m| m.len())
            .unwrap_or_default();

        temp.persist(&target)
            .map_err(|e| IoError::write(&path, e.error))?;

        debug!("Wrote {} bytes to {}", len, target.display());
        Ok(target)
    }
}

/// 符號鏈接的最大跟隨層數
const MAX_SYMLINK_DEPTH: usize = 40;

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// 跟隨符號鏈接找到真正要替換的文件
///
/// rename 會替換鏈接本身，所以暫存文件必須放在鏈接指向的文件旁邊。
/// 懸空鏈接解析到它指向的（尚不存在的）路徑。
fn resolve_write_target(path: &Path) -> Result<PathBuf, IoError> {
    let mut resolved = path.to_path_buf();

    for _ in 0..MAX_SYMLINK_DEPTH {
        match fs::symlink_metadata(&resolved) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = fs::read_link(&resolved).map_err(|e| IoError::write(path, e))?;
                resolved = if link.is_absolute() {
                    link
                } else {
                    parent_dir(&resolved).join(link)
                };
            }
            _ => return Ok(resolved),
        }
    }

    Err(IoError::write(
        path,
        std::io::Error::new(
            std::io::ErrorKind::Other,
            "too many levels of symbolic links",
        ),
    ))
}

/// 私鑰文件權限不是 600 時發出警告（僅 Unix）
pub fn warn_if_insecure_secret(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        if let Ok(metadata) = fs::metadata(path) {
            let mode = metadata.permissions().mode() & 0o777;
            if mode & 0o077 != 0 {
                warn!(
                    "Private key file {} has insecure permissions: {:o} (should be 0o600)",
                    path.display(),
                    mode
                );
                warn!("Run: chmod 600 {}", path.display());
            }
        }
    }

    #[cfg(not(unix))]
    let _ = path;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");

        let bytes: Vec<u8> = (0..=255u8).cycle().take(5000).collect();
        write_file(&path, &bytes).unwrap();

        assert_eq!(read_file(&path).unwrap(), bytes);
    }

    #[test]
    fn test_write_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");

        write_file(&path, &[1u8; 100]).unwrap();
        write_file(&path, &[2u8; 3]).unwrap();

        assert_eq!(read_file(&path).unwrap(), vec![2u8; 3]);
    }

    #[test]
    fn test_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bin");

        write_file(&path, &[]).unwrap();
        assert!(read_file(&path).unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");

        match read_file(&path) {
            Err(IoError::NotFound { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_read_directory_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_file(dir.path()),
            Err(IoError::ReadFailure { .. })
        ));
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.bin");

        match write_file(&path, b"data") {
            Err(IoError::WriteFailure { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected WriteFailure, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_dropped_stage_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.bin");
        write_file(&path, b"original").unwrap();

        let staged = StagedBlob::stage(&path, b"replacement", FileMode::Public).unwrap();
        drop(staged);

        assert_eq!(read_file(&path).unwrap(), b"original");
        // 暫存文件已被清理
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    #[cfg(unix)]
    fn test_write_through_symlink() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let real_dir = dir.path().join("real");
        fs::create_dir(&real_dir).unwrap();
        let real = real_dir.join("sig.bin");
        fs::write(&real, b"old").unwrap();

        let link = dir.path().join("sig.bin");
        symlink(&real, &link).unwrap();

        write_file(&link, b"new signature").unwrap();

        // 鏈接保留，指向的文件被更新
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&real).unwrap(), b"new signature");
        assert_eq!(read_file(&link).unwrap(), b"new signature");
    }

    #[test]
    #[cfg(unix)]
    fn test_relative_and_dangling_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("keys")).unwrap();

        // 相對鏈接，目標尚不存在
        let link = dir.path().join("priv.bin");
        symlink("keys/priv.bin", &link).unwrap();

        let staged = StagedBlob::stage(&link, b"secret", FileMode::Secret).unwrap();
        let written = staged.commit().unwrap();

        assert_eq!(written, dir.path().join("keys").join("priv.bin"));
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(dir.path().join("keys/priv.bin")).unwrap(), b"secret");
    }

    #[test]
    #[cfg(unix)]
    fn test_symlink_loop_is_write_failure() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        symlink(&b, &a).unwrap();
        symlink(&a, &b).unwrap();

        match write_file(&a, b"data") {
            Err(IoError::WriteFailure { path, .. }) => assert_eq!(path, a),
            other => panic!("Expected WriteFailure, got {:?}", other),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let secret = dir.path().join("priv.bin");
        let public = dir.path().join("pub.bin");

        write_secret_file(&secret, b"secret").unwrap();
        write_file(&public, b"public").unwrap();

        let mode = fs::metadata(&secret).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "Secret key should have 0o600 permissions");

        let mode = fs::metadata(&public).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644, "Public files should have 0o644 permissions");
    }
}
