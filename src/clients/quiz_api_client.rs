/// 提取/生成服务客户端
///
/// 封装所有与远程服务相关的 HTTP 调用
use crate::config::Config;
use crate::error::{AppError, AppResult, ExtractionError, GenerationError};
use crate::models::file::MediaType;
use crate::models::question::{GenerationSettings, Question};
use crate::models::wire::{
    ErrorBody, ExtractRequest, ExtractResponse, GenerateQuizRequest, GenerateQuizResponse,
    HealthResponse,
};
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use std::time::Duration;
use tracing::{debug, warn};

pub const EXTRACT_PDF_PATH: &str = "/api/extract-pdf";
pub const EXTRACT_DOCX_PATH: &str = "/api/extract-docx";
pub const GENERATE_QUIZ_PATH: &str = "/api/generate-quiz";
pub const HEALTH_PATH: &str = "/health";

/// 远程服务客户端
#[derive(Clone)]
pub struct QuizApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuizApiClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Other(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 提取 PDF / DOCX 文本
    ///
    /// # 参数
    /// - `media_type`: 文件类型，只接受 PDF 与 Word-XML
    /// - `bytes`: 文件原始字节
    ///
    /// # 返回
    /// 返回服务端提取出的文本
    pub async fn extract_text(
        &self,
        media_type: MediaType,
        bytes: &[u8],
    ) -> Result<String, ExtractionError> {
        let path = match media_type {
            MediaType::Pdf => EXTRACT_PDF_PATH,
            MediaType::WordXml => EXTRACT_DOCX_PATH,
            MediaType::LegacyWord => return Err(ExtractionError::LegacyWordUnsupported),
            MediaType::PlainText => {
                return Err(ExtractionError::RequestFailed {
                    media_type,
                    endpoint: String::new(),
                    reason: "纯文本不需要远程提取".to_string(),
                })
            }
        };

        let fail = |reason: String| {
            warn!("{} 提取失败: {}", media_type, reason);
            ExtractionError::RequestFailed {
                media_type,
                endpoint: path.to_string(),
                reason,
            }
        };

        let body = ExtractRequest {
            file: BASE64_STANDARD.encode(bytes),
        };

        debug!(
            "正在请求 {}，文件 {} 字节，编码后 {} 字节",
            path,
            bytes.len(),
            body.file.len()
        );

        let response = self
            .http
            .post(self.endpoint(path))
            .json(&body)
            .send()
            .await
            .map_err(|e| fail(format!("请求失败: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fail(format!("状态码 {}", status.as_u16())));
        }

        let data: ExtractResponse = response
            .json()
            .await
            .map_err(|e| fail(format!("响应无法解析: {}", e)))?;

        let text = data
            .text
            .ok_or_else(|| fail("响应缺少 text 字段".to_string()))?;

        debug!("{} 提取成功，共 {} 个字符", media_type, text.chars().count());

        Ok(text)
    }

    /// 请求生成测验
    ///
    /// # 参数
    /// - `content`: 提取出的文本
    /// - `settings`: 题目数量、难度、题型
    ///
    /// # 返回
    /// 返回服务端生成的题目列表
    pub async fn generate_quiz(
        &self,
        content: &str,
        settings: &GenerationSettings,
    ) -> Result<Vec<Question>, GenerationError> {
        let body = GenerateQuizRequest::new(content, settings);

        debug!(
            "正在请求 {}: {} 题, 难度 {}, 题型 {}",
            GENERATE_QUIZ_PATH, body.num_questions, body.difficulty, body.question_type
        );

        let response = self
            .http
            .post(self.endpoint(GENERATE_QUIZ_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("生成接口请求失败: {}", e);
                GenerationError::RequestFailed { source: e }
            })?;

        let status = response.status();
        if !status.is_success() {
            // 错误体不是 JSON 时视为没有错误信息
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error);
            warn!("生成接口返回 {}: {:?}", status.as_u16(), message);
            return Err(GenerationError::BadResponse {
                status: status.as_u16(),
                message,
            });
        }

        let data: GenerateQuizResponse =
            response
                .json()
                .await
                .map_err(|e| GenerationError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        debug!("生成接口返回 {} 道题目", data.questions.len());

        Ok(data.questions)
    }

    /// 检查服务是否可用
    pub async fn health_check(&self) -> AppResult<bool> {
        let response = self.http.get(self.endpoint(HEALTH_PATH)).send().await?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let health: HealthResponse = response.json().await?;
        Ok(health.status == "ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = Config {
            api_base_url: "http://localhost:5000/".to_string(),
            ..Config::default()
        };
        let client = QuizApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.endpoint(GENERATE_QUIZ_PATH), "http://localhost:5000/api/generate-quiz");
    }

    #[tokio::test]
    async fn test_legacy_word_has_no_extraction_branch() {
        let client = QuizApiClient::new(&Config::default()).unwrap();
        let err = client
            .extract_text(MediaType::LegacyWord, b"\xd0\xcf\x11\xe0")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::LegacyWordUnsupported));
    }
}
