use serde::{Deserialize, Serialize};

/// 判断题固定选项
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// 判断题
    TrueFalse,
    /// 选择题
    MultipleChoice,
    /// 其他题型，按自身选项渲染
    #[serde(other)]
    Other,
}

impl QuestionType {
    /// 展示用标签
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::TrueFalse => "True/False",
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::Other => "Question",
        }
    }
}

/// 生成服务返回的单个题目
///
/// 客户端只读取，不修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// 渲染用选项：判断题合成 True/False，其余使用自身选项
    pub fn option_labels(&self) -> Vec<&str> {
        match self.kind {
            QuestionType::TrueFalse => TRUE_FALSE_OPTIONS.to_vec(),
            QuestionType::MultipleChoice | QuestionType::Other => {
                self.options.iter().map(String::as_str).collect()
            }
        }
    }

    /// 选项数量
    pub fn option_count(&self) -> usize {
        match self.kind {
            QuestionType::TrueFalse => TRUE_FALSE_OPTIONS.len(),
            QuestionType::MultipleChoice | QuestionType::Other => self.options.len(),
        }
    }

    /// 按索引取选项文本
    pub fn option_text(&self, index: usize) -> Option<&str> {
        match self.kind {
            QuestionType::TrueFalse => TRUE_FALSE_OPTIONS.get(index).copied(),
            QuestionType::MultipleChoice | QuestionType::Other => {
                self.options.get(index).map(String::as_str)
            }
        }
    }

    /// 正确选项文本
    pub fn correct_option_text(&self) -> Option<&str> {
        self.option_text(self.correct_answer)
    }

    pub fn is_correct(&self, answer: Option<usize>) -> bool {
        answer == Some(self.correct_answer)
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题目内容以便显示（最多80个字符）
        let preview = if self.question.chars().count() > 80 {
            self.question.chars().take(80).collect::<String>() + "..."
        } else {
            self.question.clone()
        };
        write!(f, "[{}] {}", self.kind.label(), preview)
    }
}

/// 一次生成得到的测验，收到后不再变化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    /// 空题目列表返回 None
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            None
        } else {
            Some(Self { questions })
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// 恒为 false，保留以配合 `len`
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn last_position(&self) -> usize {
        self.questions.len() - 1
    }
}

/// 生成参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    /// 题目数量
    pub num_questions: u32,
    /// 难度
    pub difficulty: String,
    /// 题型
    pub question_type: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            num_questions: 5,
            difficulty: "mixed".to_string(),
            question_type: "mixed".to_string(),
        }
    }
}
