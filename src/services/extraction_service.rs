//! 文本提取服务 - 业务能力层
//!
//! 纯文本在本地解码，PDF / DOCX 交给远程服务

use tracing::{debug, info};

use crate::clients::QuizApiClient;
use crate::error::{AppError, AppResult, ExtractionError};
use crate::models::file::{MediaType, SelectedFile};
use crate::utils::logging::truncate_text;

/// 文本提取服务
#[derive(Clone)]
pub struct ExtractionService {
    client: QuizApiClient,
}

impl ExtractionService {
    pub fn new(client: QuizApiClient) -> Self {
        Self { client }
    }

    /// 从已接受的文件中取出文本
    pub async fn extract_text(
        &self,
        file: &SelectedFile,
        media_type: MediaType,
    ) -> AppResult<String> {
        let text = self.read_text(file, media_type).await?;
        debug!("文本预览: {}", truncate_text(&text, 80));
        Ok(text)
    }

    async fn read_text(&self, file: &SelectedFile, media_type: MediaType) -> AppResult<String> {
        match media_type {
            MediaType::PlainText => {
                let text = String::from_utf8_lossy(&file.bytes).into_owned();
                info!("📝 直接读取文本文件，共 {} 个字符", text.chars().count());
                Ok(text)
            }
            MediaType::Pdf | MediaType::WordXml => {
                info!("📤 正在远程提取 {} 文本...", media_type);
                let text = self.client.extract_text(media_type, &file.bytes).await?;
                info!("✓ 提取完成，共 {} 个字符", text.chars().count());
                Ok(text)
            }
            MediaType::LegacyWord => {
                Err(AppError::Extraction(ExtractionError::LegacyWordUnsupported))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn service() -> ExtractionService {
        // 指向不可达地址，确保纯文本路径不会发请求
        let config = Config {
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 1,
            ..Config::default()
        };
        ExtractionService::new(QuizApiClient::new(&config).unwrap())
    }

    #[tokio::test]
    async fn test_plain_text_is_read_locally() {
        let file = SelectedFile::new("a.txt", "text/plain", "héllo".as_bytes().to_vec());
        let text = service()
            .extract_text(&file, MediaType::PlainText)
            .await
            .unwrap();
        assert_eq!(text, "héllo");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let file = SelectedFile::new("a.txt", "text/plain", vec![b'a', 0xff, b'b']);
        let text = service()
            .extract_text(&file, MediaType::PlainText)
            .await
            .unwrap();
        assert_eq!(text, "a\u{fffd}b");
    }

    #[tokio::test]
    async fn test_legacy_word_is_flagged() {
        let file = SelectedFile::new("old.doc", "application/msword", vec![0xd0, 0xcf]);
        let err = service()
            .extract_text(&file, MediaType::LegacyWord)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Extraction(ExtractionError::LegacyWordUnsupported)
        ));
    }
}
