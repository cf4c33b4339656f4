//! 日志工具模块
//!
//! 提供日志初始化和输出格式的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志输出
///
/// # 参数
/// - `verbose`: 是否启用 debug 级别日志（可被 RUST_LOG 覆盖）
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "shuati_bao=debug"
    } else {
        "shuati_bao=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `bank_total`: 题库总数
/// - `missed_total`: 错题数
pub fn log_startup(bank_total: usize, missed_total: usize) {
    info!("{}", "=".repeat(60));
    info!("🧬 考研刷题宝启动 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("📊 题库总数: {} | 错题数: {}", bank_total, missed_total);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于列表 / 日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
