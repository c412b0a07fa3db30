//! memlog - 进程内分层日志库
//!
//! memlog 提供按名称创建的日志器、按名称与通配符命名空间的级别过滤，
//! 并把每一条日志保留在内存中，以便事后按日志器或通配符 dump。
//!
//! 日志行格式为 `[HH:MM:SS ][<name>] <LEVEL> <args>`，
//! 参数会被递归序列化为稳定、可读的文本。
//!
//! # 快速开始
//!
//! ```rust
//! use memlog::{ConfigUpdate, LogContext, MemorySink, Value};
//!
//! let sink = MemorySink::new();
//! let context = LogContext::with_config(
//!     ConfigUpdate::new()
//!         .root_logger("WARN")
//!         .level("Controller::*", "DEBUG")
//!         .show_time(false)
//!         .sink(sink.clone()),
//! );
//!
//! let people = context.get_logger("Controller::people").unwrap();
//! let db = context.get_logger("Model::db").unwrap();
//!
//! people.debug(vec![Value::from("loaded"), Value::mapping([("count", 3)])]);
//! db.info(["connected"]); // 已存储，但 INFO < WARN，不会转发
//!
//! assert_eq!(sink.lines(), vec![r#"[Controller::people] DEBUG loaded {"count":3}"#]);
//! assert_eq!(context.all_lines().len(), 2);
//! ```
//!
//! # 事后检索
//!
//! ```rust
//! use memlog::{ConfigUpdate, LogContext, MemorySink};
//!
//! let sink = MemorySink::new();
//! let context = LogContext::with_config(ConfigUpdate::new().root_logger("NONE").sink(sink.clone()));
//!
//! context.get_logger("Controller::a").unwrap().info(["one"]);
//! context.get_logger("Model::b").unwrap().info(["two"]);
//! context.get_logger("Controller::c").unwrap().info(["three"]);
//! assert!(sink.is_empty());
//!
//! context.dump("Controller::*");
//! assert_eq!(sink.dispatch_count(), 1);
//! assert_eq!(sink.lines().len(), 2);
//! ```

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod env_config;
pub mod error;
pub mod sinks;

// 重新导出主要类型
pub use config::{
    load_config_from_file, load_config_from_str, validate_config, ConfigUpdate, Configuration,
    Output, Threshold,
};
pub use diagnostics::DiagnosticsSnapshot;
pub use env_config::EnvConfig;
pub use error::{MemLogError, Result};

// 重新导出核心功能
pub use crate::core::context::LogContext;
pub use crate::core::level::Level;
pub use crate::core::logger::Logger;
pub use crate::core::serializer::{render, serialize, Context, Rendered};
pub use crate::core::value::{Number, Value};
pub use sinks::{MemorySink, Sink, SinkError, SinkResult, StdoutSink};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
