//! 定义 memlog 的内部诊断与指标。
//!
//! 每个 [`LogContext`](crate::LogContext) 持有自己的计数器，
//! 用于观察存储、转发、抑制和 dump 的情况。

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 内部诊断与指标数据结构。
///
/// 使用原子操作确保线程安全。
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// 创建时间
    start_time: Option<Instant>,

    /// 已创建的日志器数量
    loggers_created: AtomicU64,

    /// 已存储的日志行数
    lines_stored: AtomicU64,

    /// 发送到 sink 的日志行数
    lines_forwarded: AtomicU64,

    /// 因过滤而未发送的日志行数（仍然被存储）
    lines_suppressed: AtomicU64,

    /// 实际产生分发的 dump 次数
    dumps: AtomicU64,

    /// dump 分发的日志行数
    lines_dumped: AtomicU64,

    /// Sink 写入失败次数
    sink_errors: AtomicU64,
}

/// 诊断数据的快照，用于外部查询。
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsSnapshot {
    pub uptime: Option<Duration>,
    pub loggers_created: u64,
    pub lines_stored: u64,
    pub lines_forwarded: u64,
    pub lines_suppressed: u64,
    pub dumps: u64,
    pub lines_dumped: u64,
    pub sink_errors: u64,
    /// 转发比例（百分比），未存储任何行时为 100
    pub forward_rate_percent: f64,
}

impl Diagnostics {
    /// 创建新的诊断实例。
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn increment_loggers_created(&self) {
        self.loggers_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lines_stored(&self) {
        self.lines_stored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lines_forwarded(&self) {
        self.lines_forwarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lines_suppressed(&self) {
        self.lines_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次 dump 及其行数。
    pub fn record_dump(&self, lines: usize) {
        self.dumps.fetch_add(1, Ordering::Relaxed);
        self.lines_dumped.fetch_add(lines as u64, Ordering::Relaxed);
    }

    pub fn increment_sink_errors(&self) {
        self.sink_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取诊断数据的快照。
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        let lines_stored = self.lines_stored.load(Ordering::Relaxed);
        let lines_forwarded = self.lines_forwarded.load(Ordering::Relaxed);

        let forward_rate_percent = if lines_stored > 0 {
            (lines_forwarded as f64 / lines_stored as f64) * 100.0
        } else {
            100.0
        };

        DiagnosticsSnapshot {
            uptime: self.start_time.map(|start| start.elapsed()),
            loggers_created: self.loggers_created.load(Ordering::Relaxed),
            lines_stored,
            lines_forwarded,
            lines_suppressed: self.lines_suppressed.load(Ordering::Relaxed),
            dumps: self.dumps.load(Ordering::Relaxed),
            lines_dumped: self.lines_dumped.load(Ordering::Relaxed),
            sink_errors: self.sink_errors.load(Ordering::Relaxed),
            forward_rate_percent,
        }
    }

    /// 重置所有计数器（主要用于测试）。
    pub fn reset(&self) {
        self.loggers_created.store(0, Ordering::Relaxed);
        self.lines_stored.store(0, Ordering::Relaxed);
        self.lines_forwarded.store(0, Ordering::Relaxed);
        self.lines_suppressed.store(0, Ordering::Relaxed);
        self.dumps.store(0, Ordering::Relaxed);
        self.lines_dumped.store(0, Ordering::Relaxed);
        self.sink_errors.store(0, Ordering::Relaxed);
    }
}
