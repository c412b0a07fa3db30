//! 日志存储
//!
//! 只追加的日志历史：每个日志器一个序列，外加接收所有行的 `all` 序列。
//! 存储与过滤无关，每条产生的日志都会被保存，且从不清理。

use std::collections::HashMap;

use crate::core::line::TagMatcher;

/// Append-only per-logger and global line history.
#[derive(Debug, Default)]
pub struct LogStore {
    all: Vec<String>,
    by_name: HashMap<String, Vec<String>>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the empty sequence for `name`; returns `false` when it
    /// already existed.
    pub fn register(&mut self, name: &str) -> bool {
        if self.by_name.contains_key(name) {
            return false;
        }
        self.by_name.insert(name.to_string(), Vec::new());
        true
    }

    /// Appends `line` to both `all` and the sequence of `name`.
    pub fn append(&mut self, name: &str, line: String) {
        self.by_name
            .entry(name.to_string())
            .or_default()
            .push(line.clone());
        self.all.push(line);
    }

    pub fn all(&self) -> &[String] {
        &self.all
    }

    pub fn lines(&self, name: &str) -> Option<&[String]> {
        self.by_name.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Lines of `all` accepted by `matcher`, in emission order.
    pub fn matching(&self, matcher: &TagMatcher) -> Vec<String> {
        self.all
            .iter()
            .filter(|line| matcher.matches(line))
            .cloned()
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
