//! 默认标准输出 Sink 实现
//!
//! 单行原样输出，多行以换行符连接后输出。

use crate::sinks::traits::{Sink, SinkResult};
use std::io::{self, Write};

/// 标准输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdoutTarget {
    /// 标准输出
    #[default]
    Stdout,
    /// 标准错误
    Stderr,
}

/// A sink that prints lines to the process console
#[derive(Debug, Clone, Default)]
pub struct StdoutSink {
    target: StdoutTarget,
}

impl StdoutSink {
    /// Creates a sink writing to standard output
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink writing to the given stream
    pub fn with_target(target: StdoutTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> StdoutTarget {
        self.target
    }

    /// Formats lines the way they appear on the console
    fn format_lines(lines: &[String]) -> String {
        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl Sink for StdoutSink {
    fn write(&self, lines: &[String]) -> SinkResult<()> {
        if lines.is_empty() {
            return Ok(());
        }
        let output = Self::format_lines(lines);
        match self.target {
            StdoutTarget::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(output.as_bytes())?;
                out.flush()?;
            }
            StdoutTarget::Stderr => {
                let mut out = io::stderr().lock();
                out.write_all(output.as_bytes())?;
                out.flush()?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        match self.target {
            StdoutTarget::Stdout => "stdout",
            StdoutTarget::Stderr => "stderr",
        }
    }
}
