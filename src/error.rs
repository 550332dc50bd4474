use thiserror::Error;

use crate::models::file::MediaType;

/// 无效文件类型提示
pub const INVALID_FILE_TYPE_MESSAGE: &str =
    "Invalid file type. Please upload PDF, DOCX, DOC, or TXT files.";
/// 未选择文件提示
pub const NO_FILE_SELECTED_MESSAGE: &str = "Please select a file first.";
/// 内容过短提示
pub const CONTENT_TOO_SHORT_MESSAGE: &str =
    "File content is too short. Please upload a file with more content.";
/// 服务端未给出错误信息时的生成失败提示
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate quiz";
/// 网络错误或响应不可读时的生成失败提示
pub const GENERATION_RETRY_MESSAGE: &str = "Failed to generate quiz. Please try again.";
/// 生成结果为空时的提示
pub const EMPTY_QUIZ_MESSAGE: &str = "The generated quiz contains no questions.";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 本地文件错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 文本提取错误
    #[error("提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// 测验生成错误
    #[error("生成错误: {0}")]
    Generation(#[from] GenerationError),
    /// 会话状态错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 本地文件错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 声明的媒体类型不在允许列表中
    #[error("不支持的文件类型: {declared_type:?}")]
    InvalidType { declared_type: String },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 文本提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 提取接口请求失败（网络、状态码或响应体）
    #[error("{media_type} 提取失败 ({endpoint}): {reason}")]
    RequestFailed {
        media_type: MediaType,
        endpoint: String,
        reason: String,
    },
    /// 旧版 Word 文件没有提取通道
    #[error("旧版 Word (.doc) 文件无法提取文本")]
    LegacyWordUnsupported,
}

/// 测验生成错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 内容过短，未发起请求
    #[error("内容过短: {length} 个字符 (至少 {min} 个)")]
    ContentTooShort { length: usize, min: usize },
    /// 服务端返回非成功状态
    #[error("生成接口返回错误状态 {status}: {message:?}")]
    BadResponse { status: u16, message: Option<String> },
    /// 网络请求失败
    #[error("生成接口请求失败: {source}")]
    RequestFailed {
        #[source]
        source: reqwest::Error,
    },
    /// 成功响应但内容无法解析
    #[error("生成接口响应无法解析: {reason}")]
    MalformedResponse { reason: String },
    /// 生成结果为空
    #[error("生成结果不包含任何题目")]
    EmptyQuiz,
}

/// 会话状态错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// 尚未选择文件
    #[error("尚未选择文件")]
    NoFileSelected,
    /// 当前不在上传阶段
    #[error("当前不在上传阶段")]
    NotUploading,
    /// 当前不在答题阶段
    #[error("当前不在答题阶段")]
    NotAnswering,
    /// 选项索引超出范围
    #[error("选项索引 {index} 超出范围 (共 {count} 个选项)")]
    OptionOutOfRange { index: usize, count: usize },
    /// 只能在最后一题提交
    #[error("只能在最后一题提交 (当前第 {position} 题，共 {total} 题)")]
    SubmitBeforeLastQuestion { position: usize, total: usize },
    /// 当前不在结果阶段
    #[error("当前不在结果阶段")]
    NotReviewing,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 无效的 API 地址
    #[error("无效的 API 地址: {url}")]
    InvalidBaseUrl { url: String },
}

// ========== 从常见错误类型转换 ==========

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: err,
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: err,
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Generation(GenerationError::RequestFailed { source: err })
    }
}

// ========== 用户可见信息 ==========

impl AppError {
    /// 返回展示给用户的行内错误信息
    pub fn user_message(&self) -> String {
        match self {
            AppError::File(e) => e.user_message(),
            AppError::Extraction(e) => e.user_message().to_string(),
            AppError::Generation(e) => e.user_message(),
            AppError::Session(e) => e.user_message(),
            AppError::Config(e) => e.to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }
}

impl ExtractionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractionError::RequestFailed {
                media_type: MediaType::Pdf,
                ..
            } => "Error reading PDF file. Please try a TXT or DOCX file.",
            ExtractionError::RequestFailed { .. } => {
                "Error reading DOCX file. Please try a TXT file."
            }
            ExtractionError::LegacyWordUnsupported => {
                "Legacy Word (.doc) files cannot be read. Please save the document as DOCX or TXT."
            }
        }
    }
}

impl FileError {
    pub fn user_message(&self) -> String {
        match self {
            FileError::NotFound { path } => format!("File not found: {}", path),
            FileError::ReadFailed { path, .. } => format!("Could not read file: {}", path),
            FileError::InvalidType { .. } => INVALID_FILE_TYPE_MESSAGE.to_string(),
            FileError::TomlParseFailed { .. } => self.to_string(),
        }
    }
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::NoFileSelected => NO_FILE_SELECTED_MESSAGE.to_string(),
            SessionError::NotUploading => {
                "Finish or retake the current quiz before choosing a new file.".to_string()
            }
            SessionError::NotAnswering => "No quiz is in progress.".to_string(),
            SessionError::OptionOutOfRange { count, .. } => {
                format!("Choose an option between 1 and {}.", count)
            }
            SessionError::SubmitBeforeLastQuestion { .. } => {
                "Answers can be submitted from the last question.".to_string()
            }
            SessionError::NotReviewing => "Retake is available after submitting.".to_string(),
        }
    }
}

impl GenerationError {
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::ContentTooShort { .. } => CONTENT_TOO_SHORT_MESSAGE.to_string(),
            GenerationError::BadResponse {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            GenerationError::BadResponse { .. } => GENERATION_FAILED_MESSAGE.to_string(),
            GenerationError::RequestFailed { .. } | GenerationError::MalformedResponse { .. } => {
                GENERATION_RETRY_MESSAGE.to_string()
            }
            GenerationError::EmptyQuiz => EMPTY_QUIZ_MESSAGE.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
