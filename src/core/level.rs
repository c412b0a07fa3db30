//! 日志级别模型
//!
//! 级别按 `DEBUG < INFO < WARN < ERROR` 排序，序号越小越详细。

use std::fmt;
use std::str::FromStr;

/// Severity of an emitted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// All levels, most verbose first.
    pub const ALL: [Level; 4] = [Level::Debug, Level::Info, Level::Warn, Level::Error];

    /// Position of this level in [`Level::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks a level up by its exact upper-case name.
    ///
    /// Configured values are matched verbatim, so `"info"` is not a level.
    pub fn index_of(name: &str) -> Option<usize> {
        Self::ALL.iter().position(|level| level.as_str() == name)
    }

    /// `index(a) - index(b)`: non-negative when `a` is at least as severe as `b`.
    pub fn compare(a: Level, b: Level) -> isize {
        a.index() as isize - b.index() as isize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::index_of(s)
            .map(|index| Self::ALL[index])
            .ok_or_else(|| format!("Invalid log level: {}", s))
    }
}
