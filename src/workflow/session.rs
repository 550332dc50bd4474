//! 测验会话状态 - 流程层
//!
//! 所有会话数据集中在 `QuizSession` 中，只能通过显式的状态转换方法修改：
//!
//! ```text
//! Uploading ──生成成功──▶ Answering(0..N-1) ──submit(最后一题)──▶ Reviewing
//!     ▲                                                              │
//!     └─────────────────────────── retake ───────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, SessionError};
use crate::models::file::{MediaType, SelectedFile};
use crate::models::question::{GenerationSettings, Quiz};
use crate::services::{QuizResults, Scorer, Uploader};

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 选择文件、等待生成
    Uploading,
    /// 答题中
    Answering,
    /// 查看结果
    Reviewing,
}

/// 已通过校验的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFile {
    pub file: SelectedFile,
    pub media_type: MediaType,
}

/// 生成请求凭证
///
/// 更换文件或重置后，旧凭证失效，其结果会被丢弃
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket(u64);

/// 测验会话
#[derive(Debug)]
pub struct QuizSession {
    uploader: Uploader,
    scorer: Scorer,
    settings: GenerationSettings,
    selected_file: Option<AcceptedFile>,
    quiz: Option<Quiz>,
    answers: Vec<Option<usize>>,
    position: usize,
    phase: Phase,
    results: Option<QuizResults>,
    error: Option<String>,
    loading: bool,
    epoch: u64,
}

impl QuizSession {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            uploader: Uploader::new(),
            scorer: Scorer::new(),
            settings,
            selected_file: None,
            quiz: None,
            answers: Vec::new(),
            position: 0,
            phase: Phase::Uploading,
            results: None,
            error: None,
            loading: false,
            epoch: 0,
        }
    }

    // ========== 只读访问 ==========

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn selected_file(&self) -> Option<&AcceptedFile> {
        self.selected_file.as_ref()
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn results(&self) -> Option<&QuizResults> {
        self.results.as_ref()
    }

    /// 当前行内错误信息
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 是否可以点击"生成"
    pub fn can_generate(&self) -> bool {
        self.phase == Phase::Uploading && self.selected_file.is_some() && !self.loading
    }

    // ========== 上传阶段 ==========

    /// 选择文件
    ///
    /// 类型不允许时记录错误，之前的状态保持不变
    pub fn select_file(&mut self, file: SelectedFile) -> AppResult<()> {
        self.require_phase(Phase::Uploading, SessionError::NotUploading)?;

        let media_type = match self.uploader.validate(&file) {
            Ok(media_type) => media_type,
            Err(e) => return Err(self.record_error(e)),
        };

        self.selected_file = Some(AcceptedFile { file, media_type });
        self.answers.clear();
        self.position = 0;
        self.error = None;
        self.invalidate_pending();
        Ok(())
    }

    /// 更换文件：回到未上传状态
    pub fn change_file(&mut self) -> AppResult<()> {
        self.require_phase(Phase::Uploading, SessionError::NotUploading)?;

        if let Some(accepted) = self.selected_file.take() {
            info!("🔄 已移除文件 {}", accepted.file.name);
        }
        self.answers.clear();
        self.position = 0;
        self.invalidate_pending();
        Ok(())
    }

    pub fn set_settings(&mut self, settings: GenerationSettings) {
        debug!("生成参数已更新: {:?}", settings);
        self.settings = settings;
    }

    /// 开始一次生成请求
    ///
    /// 设置加载状态并清除旧错误，返回本次请求的凭证
    pub fn begin_generation(&mut self) -> AppResult<GenerationTicket> {
        self.require_phase(Phase::Uploading, SessionError::NotUploading)?;

        if self.selected_file.is_none() {
            return Err(self.record_error(SessionError::NoFileSelected.into()));
        }

        self.invalidate_pending();
        self.loading = true;
        self.error = None;
        Ok(GenerationTicket(self.epoch))
    }

    /// 结束生成请求
    ///
    /// # 返回
    /// - `Ok(true)`: 测验已载入，进入答题阶段
    /// - `Ok(false)`: 凭证已过期，结果被丢弃
    /// - `Err(e)`: 生成失败，错误信息已记录
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        outcome: AppResult<Quiz>,
    ) -> AppResult<bool> {
        if ticket.0 != self.epoch {
            warn!("⚠️ 丢弃过期的生成结果 (凭证 {}，当前 {})", ticket.0, self.epoch);
            return Ok(false);
        }

        self.loading = false;

        match outcome {
            Ok(quiz) => {
                info!("✓ 测验已载入，共 {} 道题目", quiz.len());
                self.answers = vec![None; quiz.len()];
                self.position = 0;
                self.quiz = Some(quiz);
                self.results = None;
                self.error = None;
                self.phase = Phase::Answering;
                Ok(true)
            }
            Err(e) => Err(self.record_error(e)),
        }
    }

    // ========== 答题阶段 ==========

    /// 为当前题目选择选项
    pub fn select_answer(&mut self, index: usize) -> AppResult<()> {
        self.require_phase(Phase::Answering, SessionError::NotAnswering)?;

        let count = self
            .current_question_option_count()
            .ok_or(SessionError::NotAnswering)?;
        if index >= count {
            return Err(SessionError::OptionOutOfRange { index, count }.into());
        }

        self.answers[self.position] = Some(index);
        debug!("第 {} 题选择了选项 {}", self.position + 1, index);
        Ok(())
    }

    /// 上一题，第一题时不动
    pub fn previous(&mut self) -> bool {
        if self.phase != Phase::Answering || self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// 下一题，最后一题时不动
    pub fn next(&mut self) -> bool {
        let Some(last) = self.quiz.as_ref().map(Quiz::last_position) else {
            return false;
        };
        if self.phase != Phase::Answering || self.position >= last {
            return false;
        }
        self.position += 1;
        true
    }

    /// 提交答案并评分，只能在最后一题提交
    pub fn submit(&mut self) -> AppResult<&QuizResults> {
        self.require_phase(Phase::Answering, SessionError::NotAnswering)?;

        let quiz = self.quiz.as_ref().ok_or(SessionError::NotAnswering)?;
        if self.position != quiz.last_position() {
            return Err(SessionError::SubmitBeforeLastQuestion {
                position: self.position,
                total: quiz.len(),
            }
            .into());
        }

        let results = self.scorer.score(quiz, &self.answers);
        info!(
            "🏁 已提交: {}/{} ({}%)",
            results.correct, results.total, results.percentage
        );

        self.phase = Phase::Reviewing;
        let results: &QuizResults = self.results.insert(results);
        Ok(results)
    }

    // ========== 结果阶段 ==========

    /// 重新开始：清空文件、测验、答案与位置
    pub fn retake(&mut self) -> AppResult<()> {
        self.require_phase(Phase::Reviewing, SessionError::NotReviewing)?;

        self.selected_file = None;
        self.quiz = None;
        self.answers.clear();
        self.position = 0;
        self.results = None;
        self.error = None;
        self.loading = false;
        self.phase = Phase::Uploading;
        self.invalidate_pending();
        info!("🔁 会话已重置");
        Ok(())
    }

    // ========== 辅助方法 ==========

    /// 记录行内错误信息并原样返回错误
    pub fn record_error(&mut self, err: AppError) -> AppError {
        self.error = Some(err.user_message());
        err
    }

    fn require_phase(&self, expected: Phase, err: SessionError) -> AppResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(err.into())
        }
    }

    fn current_question_option_count(&self) -> Option<usize> {
        self.quiz
            .as_ref()
            .and_then(|q| q.get(self.position))
            .map(|q| q.option_count())
    }

    /// 使所有未完成的生成请求失效
    fn invalidate_pending(&mut self) {
        self.epoch += 1;
        self.loading = false;
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(GenerationSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FileError, GenerationError};
    use crate::models::question::{Question, QuestionType};

    fn txt_file() -> SelectedFile {
        SelectedFile::new("notes.txt", "text/plain", b"some text".to_vec())
    }

    fn quiz(n: usize) -> Quiz {
        let questions = (0..n)
            .map(|i| Question {
                kind: QuestionType::MultipleChoice,
                question: format!("Question {}", i + 1),
                options: vec!["A".into(), "B".into(), "C".into()],
                correct_answer: i % 3,
                explanation: None,
            })
            .collect();
        Quiz::new(questions).unwrap()
    }

    fn answering(n: usize) -> QuizSession {
        let mut session = QuizSession::default();
        session.select_file(txt_file()).unwrap();
        let ticket = session.begin_generation().unwrap();
        assert!(session.finish_generation(ticket, Ok(quiz(n))).unwrap());
        session
    }

    #[test]
    fn test_invalid_file_leaves_state_unchanged() {
        let mut session = QuizSession::default();
        session.select_file(txt_file()).unwrap();

        let err = session
            .select_file(SelectedFile::new("pic.png", "image/png", vec![1]))
            .unwrap_err();

        assert!(matches!(err, AppError::File(FileError::InvalidType { .. })));
        assert_eq!(session.selected_file().unwrap().file.name, "notes.txt");
        assert!(session.error().unwrap().starts_with("Invalid file type."));
        assert!(session.can_generate());
    }

    #[test]
    fn test_rejected_first_file_stores_nothing() {
        let mut session = QuizSession::default();
        assert!(session
            .select_file(SelectedFile::new("a.exe", "application/octet-stream", vec![]))
            .is_err());
        assert!(session.selected_file().is_none());
        assert!(!session.can_generate());
    }

    #[test]
    fn test_accepting_file_clears_error() {
        let mut session = QuizSession::default();
        let _ = session.select_file(SelectedFile::new("a.png", "image/png", vec![]));
        assert!(session.error().is_some());

        session.select_file(txt_file()).unwrap();
        assert!(session.error().is_none());
        assert!(session.can_generate());
    }

    #[test]
    fn test_generate_without_file() {
        let mut session = QuizSession::default();
        let err = session.begin_generation().unwrap_err();
        assert!(matches!(err, AppError::Session(SessionError::NoFileSelected)));
        assert_eq!(session.error(), Some("Please select a file first."));
    }

    #[test]
    fn test_successful_generation_initializes_answers() {
        let session = answering(4);
        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(session.answers(), &[None, None, None, None]);
        assert_eq!(session.position(), 0);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_failed_generation_stays_in_upload() {
        let mut session = QuizSession::default();
        session.select_file(txt_file()).unwrap();
        let ticket = session.begin_generation().unwrap();
        assert!(session.is_loading());

        let err = session
            .finish_generation(
                ticket,
                Err(GenerationError::BadResponse {
                    status: 500,
                    message: Some("rate limited".to_string()),
                }
                .into()),
            )
            .unwrap_err();

        assert!(matches!(err, AppError::Generation(_)));
        assert_eq!(session.phase(), Phase::Uploading);
        assert_eq!(session.error(), Some("rate limited"));
        assert!(!session.is_loading());
        assert!(session.can_generate());
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut session = QuizSession::default();
        session.select_file(txt_file()).unwrap();
        let ticket = session.begin_generation().unwrap();

        session.change_file().unwrap();

        assert!(!session.finish_generation(ticket, Ok(quiz(2))).unwrap());
        assert_eq!(session.phase(), Phase::Uploading);
        assert!(session.quiz().is_none());
        assert!(session.selected_file().is_none());
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut session = answering(3);

        assert!(!session.previous());
        assert_eq!(session.position(), 0);

        assert!(session.next());
        assert!(session.next());
        assert!(!session.next());
        assert_eq!(session.position(), 2);

        assert!(session.previous());
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn test_answers_survive_navigation() {
        let mut session = answering(2);
        session.select_answer(2).unwrap();
        session.select_answer(1).unwrap();
        session.next();
        session.previous();
        assert_eq!(session.answers()[0], Some(1));
        assert_eq!(session.answers()[1], None);
    }

    #[test]
    fn test_out_of_range_option_is_rejected() {
        let mut session = answering(1);
        let err = session.select_answer(3).unwrap_err();
        assert!(matches!(
            err,
            AppError::Session(SessionError::OptionOutOfRange { index: 3, count: 3 })
        ));
        assert_eq!(session.answers()[0], None);
    }

    #[test]
    fn test_submit_only_from_last_question() {
        let mut session = answering(2);
        assert!(matches!(
            session.submit(),
            Err(AppError::Session(SessionError::SubmitBeforeLastQuestion { .. }))
        ));

        session.select_answer(0).unwrap();
        session.next();
        session.select_answer(1).unwrap();
        let results = session.submit().unwrap();

        assert_eq!(results.correct, 2);
        assert_eq!(results.percentage, 100);
        assert_eq!(session.phase(), Phase::Reviewing);
    }

    #[test]
    fn test_retake_resets_everything() {
        let mut session = answering(1);
        session.submit().unwrap();
        session.retake().unwrap();

        assert_eq!(session.phase(), Phase::Uploading);
        assert!(session.selected_file().is_none());
        assert!(session.quiz().is_none());
        assert!(session.answers().is_empty());
        assert!(session.results().is_none());
        assert!(!session.can_generate());
    }

    #[test]
    fn test_selection_outside_upload_phase_is_rejected() {
        let mut session = answering(1);
        assert!(matches!(
            session.select_file(txt_file()),
            Err(AppError::Session(SessionError::NotUploading))
        ));
        assert_eq!(session.answers().len(), 1);
    }
}
