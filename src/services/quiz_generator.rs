//! 测验生成服务 - 业务能力层
//!
//! 本地检查内容长度，再调用远程生成接口

use tracing::{info, warn};

use crate::clients::QuizApiClient;
use crate::error::{AppError, AppResult, GenerationError};
use crate::models::question::{GenerationSettings, Quiz};

/// 生成测验所需的最少字符数
pub const MIN_CONTENT_CHARS: usize = 100;

/// 测验生成服务
#[derive(Clone)]
pub struct QuizGenerator {
    client: QuizApiClient,
}

impl QuizGenerator {
    pub fn new(client: QuizApiClient) -> Self {
        Self { client }
    }

    /// 检查内容长度，不足时不发请求
    pub fn check_content(content: &str) -> AppResult<()> {
        let length = content.chars().count();
        if length < MIN_CONTENT_CHARS {
            warn!("⚠️ 内容只有 {} 个字符，跳过生成请求", length);
            return Err(AppError::Generation(GenerationError::ContentTooShort {
                length,
                min: MIN_CONTENT_CHARS,
            }));
        }
        Ok(())
    }

    /// 生成测验
    ///
    /// # 参数
    /// - `content`: 提取出的文本
    /// - `settings`: 生成参数
    ///
    /// # 返回
    /// 返回非空的测验
    pub async fn generate(&self, content: &str, settings: &GenerationSettings) -> AppResult<Quiz> {
        Self::check_content(content)?;

        info!(
            "🤖 正在生成 {} 道题目 (难度: {}, 题型: {})...",
            settings.num_questions, settings.difficulty, settings.question_type
        );

        let questions = self.client.generate_quiz(content, settings).await?;
        let quiz = Quiz::new(questions).ok_or(GenerationError::EmptyQuiz)?;

        info!("✓ 生成完成，共 {} 道题目", quiz.len());

        Ok(quiz)
    }
}
