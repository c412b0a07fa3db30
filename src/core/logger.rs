//! Named logger handles.

use std::fmt;
use std::sync::Arc;

use crate::core::context::{LogContext, Shared};
use crate::core::level::Level;
use crate::core::value::Value;

/// Registry entry for one logger name.
#[derive(Debug)]
pub(crate) struct LoggerCore {
    pub(crate) name: String,
}

/// A named handle with one emit method per [`Level`].
///
/// Handles are cheap to clone. Every handle for the same name obtained from
/// the same [`LogContext`] compares equal.
///
/// ```rust
/// use memlog::{LogContext, Value};
///
/// let context = LogContext::new();
/// let log = context.get_logger("Controller::people").unwrap();
/// log.info(["Person object was", "Ada"]);
/// log.debug(vec![Value::from("count"), Value::from(3)]);
/// memlog::warn!(log, "array of data was", [1, 2, 3], true);
/// ```
#[derive(Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
    shared: Arc<Shared>,
}

impl Logger {
    pub(crate) fn new(core: Arc<LoggerCore>, shared: Arc<Shared>) -> Self {
        Self { core, shared }
    }

    pub fn name(&self) -> &str {
        &self.core.name
    }

    /// Emits one line at `level`. Each argument is serialized on its own and
    /// the results are joined with single spaces.
    pub fn log<I>(&self, level: Level, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        self.shared.emit(&self.core.name, level, &args);
    }

    pub fn debug<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(Level::Debug, args)
    }

    pub fn info<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(Level::Info, args)
    }

    pub fn warn<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(Level::Warn, args)
    }

    pub fn error<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(Level::Error, args)
    }

    /// The context this logger writes into.
    pub fn context(&self) -> LogContext {
        LogContext::from_shared(self.shared.clone())
    }

    /// True when both handles refer to the same registry entry.
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.core, &b.core)
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Logger::ptr_eq(self, other)
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("name", &self.core.name).finish()
    }
}

/// Emits one line, converting every argument with `Value::from`.
///
/// ```rust
/// use memlog::{LogContext, Level};
///
/// let context = LogContext::new();
/// let log = context.get_logger("App").unwrap();
/// memlog::log!(log, Level::Info, "started in", 1.5, "seconds");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(, $arg:expr)* $(,)?) => {{
        let args: ::std::vec::Vec<$crate::Value> = ::std::vec![$($crate::Value::from($arg)),*];
        $logger.log($level, args)
    }};
}

#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Debug $(, $arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Info $(, $arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Warn $(, $arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Level::Error $(, $arg)*)
    };
}
