//! System-level modules
//!
//! - 日志初始化
//! - panic 处理

pub mod logging;
pub mod panic_handler;

pub use logging::init_logging;
pub use panic_handler::{RunMode, install_panic_hook};
