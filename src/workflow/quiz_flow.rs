//! 测验流程 - 流程层
//!
//! 核心职责：把"选文件 → 提取 → 生成"串起来
//!
//! - 会话状态只由 `QuizSession` 持有
//! - 网络能力只来自 services
//! - 每个动作完整结束后才处理下一个

use std::path::Path;

use tracing::info;

use crate::clients::QuizApiClient;
use crate::config::Config;
use crate::error::{AppResult, SessionError};
use crate::models::loaders::load_selected_file;
use crate::models::question::Quiz;
use crate::services::{ExtractionService, QuizGenerator};
use crate::workflow::session::{Phase, QuizSession};

/// 测验会话控制器
pub struct QuizFlow {
    client: QuizApiClient,
    session: QuizSession,
    extraction: ExtractionService,
    generator: QuizGenerator,
}

impl QuizFlow {
    /// 创建新的控制器
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = QuizApiClient::new(config)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: QuizApiClient, config: &Config) -> Self {
        Self {
            session: QuizSession::new(config.generation_settings()),
            extraction: ExtractionService::new(client.clone()),
            generator: QuizGenerator::new(client.clone()),
            client,
        }
    }

    /// 远程服务客户端，健康检查等直接调用
    pub fn client(&self) -> &QuizApiClient {
        &self.client
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// 导航、作答等同步动作直接作用于会话
    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    /// 从磁盘选择文件
    ///
    /// 只在上传阶段读取文件，其余阶段直接返回错误，不记录到会话
    pub async fn open_file(&mut self, path: &Path) -> AppResult<()> {
        if self.session.phase() != Phase::Uploading {
            return Err(SessionError::NotUploading.into());
        }

        let file = match load_selected_file(path).await {
            Ok(file) => file,
            Err(e) => return Err(self.session.record_error(e)),
        };
        self.session.select_file(file)
    }

    /// 生成测验
    ///
    /// # 返回
    /// - `Ok(true)`: 已进入答题阶段
    /// - `Ok(false)`: 结果已过期被丢弃
    /// - `Err(e)`: 失败，错误信息已记录在会话中
    pub async fn generate(&mut self) -> AppResult<bool> {
        let ticket = self.session.begin_generation()?;
        let outcome = self.produce_quiz().await;
        self.session.finish_generation(ticket, outcome)
    }

    async fn produce_quiz(&self) -> AppResult<Quiz> {
        let accepted = self
            .session
            .selected_file()
            .ok_or(SessionError::NoFileSelected)?;

        info!(
            "🚀 开始处理 {} ({})",
            accepted.file.name, accepted.media_type
        );

        let text = self
            .extraction
            .extract_text(&accepted.file, accepted.media_type)
            .await?;

        self.generator.generate(&text, self.session.settings()).await
    }
}
