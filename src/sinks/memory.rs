//! 内存捕获 Sink
//!
//! 记录每一次分发的行序列，主要用于测试和嵌入方检查输出。

use crate::sinks::traits::{Sink, SinkResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Records every dispatched batch. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    batches: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Vec<String>>> {
        self.batches.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every batch received so far, in dispatch order.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.guard().clone()
    }

    /// All received lines, flattened.
    pub fn lines(&self) -> Vec<String> {
        self.guard().iter().flatten().cloned().collect()
    }

    /// Number of dispatches received.
    pub fn dispatch_count(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, lines: &[String]) -> SinkResult<()> {
        self.guard().push(lines.to_vec());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
