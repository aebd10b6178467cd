// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别与输出格式
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 输出 JSON 格式日志的环境变量
pub const LOG_JSON_ENV: &str = "HOTEL_RMS_LOG_JSON";

fn json_enabled() -> bool {
    std::env::var(LOG_JSON_ENV)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=hotel_rms=trace
/// - HOTEL_RMS_LOG_JSON=1: 输出 JSON 行日志
///
/// 日志写入 stderr，stdout 留给命令输出
///
/// # 示例
/// ```no_run
/// use hotel_rms::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // 重复初始化时忽略（例如被嵌入到其它程序）
    if json_enabled() {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
