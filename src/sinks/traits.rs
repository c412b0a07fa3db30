//! memlog Sink Traits
//!
//! 定义输出能力接口。日志行在存储之后，如果通过过滤，
//! 或在 dump 时，会以有序行序列的形式交给 [`Sink`]。
//!
//! # 使用示例
//!
//! ```rust
//! use memlog::sinks::traits::{Sink, SinkResult};
//!
//! #[derive(Debug)]
//! struct CountingSink;
//!
//! impl Sink for CountingSink {
//!     fn write(&self, lines: &[String]) -> SinkResult<()> {
//!         eprintln!("received {} line(s)", lines.len());
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "counting"
//!     }
//! }
//! ```

use std::fmt::Debug;

/// 输出能力
///
/// `lines` 按产生顺序排列；单条转发的日志是只含一行的切片。
pub trait Sink: Send + Sync + Debug {
    /// 写出一组日志行
    fn write(&self, lines: &[String]) -> SinkResult<()>;

    /// 获取 sink 的名称
    ///
    /// 用于诊断日志
    fn name(&self) -> &'static str;
}

/// 通用 Sink 错误类型
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// I/O 错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// sink 已关闭
    #[error("Sink closed: {0}")]
    Closed(String),

    /// 通用错误
    #[error("Generic error: {0}")]
    Generic(String),
}

/// Sink 操作结果类型
pub type SinkResult<T> = std::result::Result<T, SinkError>;
