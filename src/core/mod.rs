//! memlog 核心模块
//!
//! 包含级别模型、值模型与序列化器、过滤决策、日志存储、日志器句柄和上下文。

pub mod context;
pub mod filter;
pub mod level;
pub mod line;
pub mod logger;
pub mod serializer;
pub mod store;
pub mod value;

// 重新导出核心类型
pub use context::LogContext;
pub use level::Level;
pub use logger::Logger;
pub use value::{Number, Value};
