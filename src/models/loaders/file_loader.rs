use crate::error::{AppError, AppResult, FileError};
use crate::models::file::{MediaType, SelectedFile};
use std::path::Path;
use tokio::fs;

/// 从磁盘读取文件并构造 SelectedFile
///
/// 声明类型由扩展名推断，是否允许由 Uploader 判断
pub async fn load_selected_file(path: &Path) -> AppResult<SelectedFile> {
    if !path.exists() {
        return Err(AppError::File(FileError::NotFound {
            path: path.display().to_string(),
        }));
    }

    let bytes = fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let declared_type = path
        .extension()
        .and_then(|s| s.to_str())
        .map(MediaType::mime_for_extension)
        .unwrap_or_default();

    tracing::debug!(
        "已读取文件 {} ({} 字节, 类型: {:?})",
        name,
        bytes.len(),
        declared_type
    );

    Ok(SelectedFile::new(name, declared_type, bytes))
}
