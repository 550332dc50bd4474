//! 远程接口的请求/响应结构
//!
//! 字段名与服务端 JSON 保持一致

use serde::{Deserialize, Serialize};

use crate::models::question::{GenerationSettings, Question};

/// `/api/extract-pdf` 与 `/api/extract-docx` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// base64 编码的文件内容
    pub file: String,
}

/// 提取接口响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractResponse {
    #[serde(default)]
    pub text: Option<String>,
}

/// `/api/generate-quiz` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    pub content: String,
    pub num_questions: u32,
    pub difficulty: String,
    pub question_type: String,
}

impl GenerateQuizRequest {
    pub fn new(content: &str, settings: &GenerationSettings) -> Self {
        Self {
            content: content.to_string(),
            num_questions: settings.num_questions,
            difficulty: settings.difficulty.clone(),
            question_type: settings.question_type.clone(),
        }
    }
}

/// 生成接口成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQuizResponse {
    pub questions: Vec<Question>,
}

/// 失败响应中可能携带的错误信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// `/health` 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
