use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::models::question::GenerationSettings;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 提取/生成服务地址
    pub api_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 默认题目数量
    pub num_questions: u32,
    /// 默认难度
    pub difficulty: String,
    /// 默认题型
    pub question_type: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        let settings = GenerationSettings::default();
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 120,
            num_questions: settings.num_questions,
            difficulty: settings.difficulty,
            question_type: settings.question_type,
            verbose_logging: false,
        }
    }
}

/// TOML 配置文件内容，缺失字段使用默认值
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    num_questions: Option<u32>,
    difficulty: Option<String>,
    question_type: Option<String>,
    verbose_logging: Option<bool>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> Self {
        Self {
            api_base_url: std::env::var("QUIZ_API_BASE_URL").unwrap_or(self.api_base_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            num_questions: std::env::var("NUM_QUESTIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.num_questions),
            difficulty: std::env::var("DIFFICULTY").unwrap_or(self.difficulty),
            question_type: std::env::var("QUESTION_TYPE").unwrap_or(self.question_type),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 从 TOML 文件加载配置
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(Self::default().merge(file))
    }

    pub async fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        let file: ConfigFile = toml::from_str(&content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        Ok(Self::default().merge(file))
    }

    /// 按 `QUIZ_CONFIG` 指定的文件加载，再用环境变量覆盖
    pub async fn load() -> AppResult<Self> {
        let config = match std::env::var("QUIZ_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))
                .await?
                .with_env_overrides(),
            Err(_) => Self::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(AppError::Config(ConfigError::InvalidBaseUrl {
                url: self.api_base_url.clone(),
            }));
        }
        Ok(())
    }

    /// 当前配置对应的生成参数
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            num_questions: self.num_questions,
            difficulty: self.difficulty.clone(),
            question_type: self.question_type.clone(),
        }
    }

    fn merge(self, file: ConfigFile) -> Self {
        Self {
            api_base_url: file.api_base_url.unwrap_or(self.api_base_url),
            request_timeout_secs: file.request_timeout_secs.unwrap_or(self.request_timeout_secs),
            num_questions: file.num_questions.unwrap_or(self.num_questions),
            difficulty: file.difficulty.unwrap_or(self.difficulty),
            question_type: file.question_type.unwrap_or(self.question_type),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_partial_overrides_defaults() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "http://quiz.local:8080"
            num_questions = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "http://quiz.local:8080");
        assert_eq!(config.num_questions, 10);
        assert_eq!(config.difficulty, "mixed");
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("num_questions = \"many\"").unwrap_err();
        assert!(matches!(err, AppError::File(FileError::TomlParseFailed { .. })));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = Config {
            api_base_url: "ftp://example.com".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_generation_settings_from_config() {
        let settings = Config::default().generation_settings();
        assert_eq!(settings, GenerationSettings::default());
    }
}
