// ==========================================
// 日志系统初始化
// ==========================================
// tracing + tracing-subscriber
// RUST_LOG 控制过滤（默认 info），ENGORDA_PRO_LOG_JSON=1 切换 JSON 输出
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// JSON 输出开关
pub const LOG_JSON_ENV: &str = "ENGORDA_PRO_LOG_JSON";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var(LOG_JSON_ENV) {
            Ok(v) if v.trim() == "1" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// 初始化日志系统（重复调用无副作用）
///
/// ```no_run
/// engorda_pro::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match LogFormat::from_env() {
        LogFormat::Json => {
            let _ = fmt()
                .with_env_filter(filter)
                .json()
                .with_current_span(true)
                .try_init();
        }
        LogFormat::Pretty => {
            let _ = fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_line_number(true)
                .try_init();
        }
    }
}

/// 测试用：debug 级别，输出交给测试框架捕获
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
