//! 声明式视图
//!
//! 视图只由当前会话状态计算得出，前端每次都整体重绘

use crate::models::question::GenerationSettings;
use crate::services::scorer::ResultDetail;
use crate::workflow::session::{Phase, QuizSession};

/// 当前应展示的界面
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Upload(UploadView),
    Question(QuestionView),
    Results(ResultsView),
}

/// 上传界面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    /// `File: <name>`，未选择文件时为 None
    pub file_label: Option<String>,
    pub generate_enabled: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub settings: GenerationSettings,
}

/// 单个选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// 答题界面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// `<n> of <N>`
    pub counter: String,
    pub type_label: &'static str,
    /// `<n>. <question>`
    pub text: String,
    pub options: Vec<OptionView>,
    pub previous_enabled: bool,
    pub show_next: bool,
    pub show_submit: bool,
}

/// 结果中的单题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItemView {
    /// `Q<n>: <question>`
    pub heading: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

impl ResultItemView {
    /// 样式标签
    pub fn tag(&self) -> &'static str {
        if self.is_correct {
            "correct"
        } else {
            "incorrect"
        }
    }
}

impl From<&ResultDetail> for ResultItemView {
    fn from(detail: &ResultDetail) -> Self {
        Self {
            heading: format!("Q{}: {}", detail.number, detail.question),
            user_answer: detail.user_answer_text().to_string(),
            correct_answer: detail.correct_answer.clone(),
            is_correct: detail.is_correct,
            explanation: detail.explanation.clone(),
        }
    }
}

/// 结果界面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    /// `<p>%`
    pub percentage: String,
    pub score_text: String,
    pub items: Vec<ResultItemView>,
}

impl QuizSession {
    /// 根据当前状态计算视图
    pub fn view(&self) -> View {
        match self.phase() {
            Phase::Uploading => View::Upload(self.upload_view()),
            Phase::Answering => match self.question_view() {
                Some(view) => View::Question(view),
                None => View::Upload(self.upload_view()),
            },
            Phase::Reviewing => match self.results() {
                Some(results) => View::Results(ResultsView {
                    percentage: format!("{}%", results.percentage),
                    score_text: results.score_text(),
                    items: results.details.iter().map(ResultItemView::from).collect(),
                }),
                None => View::Upload(self.upload_view()),
            },
        }
    }

    fn upload_view(&self) -> UploadView {
        UploadView {
            file_label: self
                .selected_file()
                .map(|accepted| format!("File: {}", accepted.file.name)),
            generate_enabled: self.can_generate(),
            loading: self.is_loading(),
            error: self.error().map(str::to_string),
            settings: self.settings().clone(),
        }
    }

    fn question_view(&self) -> Option<QuestionView> {
        let quiz = self.quiz()?;
        let position = self.position();
        let question = quiz.get(position)?;
        let chosen = self.answers().get(position).copied().flatten();
        let is_last = position == quiz.last_position();

        Some(QuestionView {
            counter: format!("{} of {}", position + 1, quiz.len()),
            type_label: question.kind.label(),
            text: format!("{}. {}", position + 1, question.question),
            options: question
                .option_labels()
                .into_iter()
                .enumerate()
                .map(|(index, label)| OptionView {
                    index,
                    label: label.to_string(),
                    selected: chosen == Some(index),
                })
                .collect(),
            previous_enabled: position > 0,
            show_next: !is_last,
            show_submit: is_last,
        })
    }
}
