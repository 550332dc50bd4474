/// 日志工具模块
///
/// 提供启动与结果日志的辅助函数
use tracing::info;

use crate::config::Config;
use crate::services::QuizResults;

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 测验客户端启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 服务地址: {}", config.api_base_url);
    info!(
        "📊 默认参数: {} 题, 难度 {}, 题型 {}",
        config.num_questions, config.difficulty, config.question_type
    );
    info!("{}", "=".repeat(60));
}

/// 记录评分结果
///
/// # 参数
/// - `results`: 评分结果
pub fn log_results(results: &QuizResults) {
    info!("\n{}", "─".repeat(60));
    info!("📊 测验完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 正确: {}/{}", results.correct, results.total);
    info!("❌ 错误或未答: {}", results.total - results.correct);
    info!("🎯 得分: {}%", results.percentage);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("题目内容很长", 2), "题目...");
    }
}
