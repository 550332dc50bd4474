//! 评分服务 - 业务能力层
//!
//! 逐题比较用户答案与正确答案，不修改任何状态

use serde::Serialize;

use crate::models::question::Quiz;

/// 未作答时展示的文本
pub const NOT_ANSWERED: &str = "Not answered";

/// 单题评分明细
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultDetail {
    /// 题号（从1开始）
    pub number: usize,
    pub question: String,
    /// 用户所选选项文本，未作答为 None
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

impl ResultDetail {
    /// 用户答案的展示文本
    pub fn user_answer_text(&self) -> &str {
        self.user_answer.as_deref().unwrap_or(NOT_ANSWERED)
    }
}

/// 整体评分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResults {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub details: Vec<ResultDetail>,
}

impl QuizResults {
    pub fn score_text(&self) -> String {
        format!("You scored {} out of {}", self.correct, self.total)
    }
}

/// 评分服务
#[derive(Debug, Default, Clone, Copy)]
pub struct Scorer;

impl Scorer {
    pub fn new() -> Self {
        Self
    }

    /// 计算得分
    ///
    /// # 参数
    /// - `quiz`: 测验
    /// - `answers`: 与测验等长的答案列表
    pub fn score(&self, quiz: &Quiz, answers: &[Option<usize>]) -> QuizResults {
        let details: Vec<ResultDetail> = quiz
            .questions()
            .iter()
            .enumerate()
            .map(|(idx, question)| {
                let answer = answers.get(idx).copied().flatten();
                ResultDetail {
                    number: idx + 1,
                    question: question.question.clone(),
                    user_answer: answer
                        .map(|a| question.option_text(a).unwrap_or_default().to_string()),
                    correct_answer: question.correct_option_text().unwrap_or_default().to_string(),
                    is_correct: question.is_correct(answer),
                    explanation: question.explanation.clone(),
                }
            })
            .collect();

        let correct = details.iter().filter(|d| d.is_correct).count();
        let total = details.len();

        QuizResults {
            correct,
            total,
            percentage: percentage(correct, total),
            details,
        }
    }
}

/// round(correct / total × 100)，0.5 向上取整
fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}
