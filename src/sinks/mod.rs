//! memlog Sinks 模块
//!
//! 日志行的输出目标：默认标准输出、闭包适配器和内存捕获。

pub mod function;
pub mod memory;
pub mod stdout;
pub mod traits;

// 重新导出主要类型
pub use function::FunctionSink;
pub use memory::MemorySink;
pub use stdout::{StdoutSink, StdoutTarget};
pub use traits::{Sink, SinkError, SinkResult};
