//! 上传校验服务 - 业务能力层
//!
//! 只负责"这个文件能不能收"，不持有会话状态

use tracing::{info, warn};

use crate::error::{AppError, AppResult, FileError};
use crate::models::file::{MediaType, SelectedFile};

/// 上传校验服务
#[derive(Debug, Default, Clone, Copy)]
pub struct Uploader;

impl Uploader {
    pub fn new() -> Self {
        Self
    }

    /// 校验声明类型是否在允许列表中
    ///
    /// # 返回
    /// 允许时返回解析后的媒体类型
    pub fn validate(&self, file: &SelectedFile) -> AppResult<MediaType> {
        match file.media_type() {
            Some(media_type) => {
                info!(
                    "📄 已接受文件 {} ({}, {} 字节)",
                    file.name,
                    media_type,
                    file.size()
                );
                if media_type == MediaType::LegacyWord {
                    warn!("⚠️ {} 是旧版 Word 文件，生成时无法提取文本", file.name);
                }
                Ok(media_type)
            }
            None => {
                warn!(
                    "⚠️ 拒绝文件 {}: 类型 {:?} 不在允许列表中",
                    file.name, file.declared_type
                );
                Err(AppError::File(FileError::InvalidType {
                    declared_type: file.declared_type.clone(),
                }))
            }
        }
    }
}
