//! # Doc Quiz
//!
//! 从文档生成测验并在终端中作答的客户端
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 题目、测验、上传文件以及远程接口的请求/响应结构
//! - `loaders` - 从磁盘读取文件，按扩展名推断声明类型
//!
//! ### ② 客户端层（Clients）
//! - `QuizApiClient` - 唯一发起 HTTP 请求的地方
//!   （`/api/extract-pdf`、`/api/extract-docx`、`/api/generate-quiz`、`/health`）
//!
//! ### ③ 业务能力层（Services）
//! - `Uploader` - 文件类型白名单校验
//! - `ExtractionService` - 纯文本本地读取，PDF / DOCX 远程提取
//! - `QuizGenerator` - 内容长度检查 + 远程生成
//! - `Scorer` - 逐题评分
//!
//! ### ④ 流程层（Workflow）
//! - `QuizSession` - 唯一的会话状态，显式状态转换（Uploading → Answering → Reviewing）
//! - `View` - 由会话状态推导出的声明式视图
//! - `QuizFlow` - 选文件 → 提取 → 生成 的编排
//!
//! ### ⑤ 界面层
//! - `app` / `render` - 终端命令解析与文本渲染
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod render;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::QuizApiClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{GenerationSettings, MediaType, Question, QuestionType, Quiz, SelectedFile};
pub use services::{QuizResults, Scorer};
pub use workflow::{Phase, QuizFlow, QuizSession, View};
