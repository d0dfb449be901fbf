//! 日志初始化
//!
//! 使用 `tracing-subscriber` 输出到终端，级别由 `RUST_LOG` 控制，默认 `info`

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅者
///
/// 重复调用是安全的（测试里每个用例都可能调用一次）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
