//! 日志上下文
//!
//! [`LogContext`] 拥有配置、日志器注册表和日志存储，是整个库唯一的状态入口。
//! 通常在启动时创建一次，然后克隆句柄分发给各个组件。
//!
//! 所有共享状态由同一把互斥锁保护：注册表的"检查后创建"是原子的，
//! 一次追加会同时写入 `all` 和对应日志器的序列。写入 sink 时不持有锁，
//! 因此 sink 可以安全地再次调用日志接口。

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{ConfigUpdate, Configuration};
use crate::core::filter::should_forward;
use crate::core::level::Level;
use crate::core::line::{render_line, time_prefix, TagMatcher};
use crate::core::logger::{Logger, LoggerCore};
use crate::core::serializer::render;
use crate::core::store::LogStore;
use crate::core::value::Value;
use crate::diagnostics::{Diagnostics, DiagnosticsSnapshot};
use crate::error::{MemLogError, Result};
use crate::sinks::traits::Sink;

#[derive(Debug, Default)]
struct State {
    config: Configuration,
    loggers: HashMap<String, Arc<LoggerCore>>,
    store: LogStore,
}

#[derive(Debug)]
pub(crate) struct Shared {
    state: Mutex<State>,
    diagnostics: Diagnostics,
}

impl Shared {
    // Emission must not panic because another thread panicked while
    // holding the lock; the state stays consistent between appends.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serializes, stores and, if the filter allows it, forwards one line.
    pub(crate) fn emit(&self, name: &str, level: Level, args: &[Value]) {
        let rendered: Vec<String> = args.iter().map(render).collect();

        let (line, sink) = {
            let mut state = self.state();
            let time = state.config.show_time.then(time_prefix);
            let line = render_line(time.as_deref(), name, level, &rendered);
            state.store.append(name, line.clone());
            let sink = should_forward(&state.config, level, name).then(|| state.config.out.resolve());
            (line, sink)
        };
        self.diagnostics.increment_lines_stored();

        match sink {
            Some(sink) => {
                self.diagnostics.increment_lines_forwarded();
                self.dispatch(sink.as_ref(), &[line]);
            }
            None => self.diagnostics.increment_lines_suppressed(),
        }
    }

    fn dispatch(&self, sink: &dyn Sink, lines: &[String]) {
        if let Err(e) = sink.write(lines) {
            self.diagnostics.increment_sink_errors();
            tracing::warn!(
                "Failed to write {} line(s) to sink {}: {}",
                lines.len(),
                sink.name(),
                e
            );
        }
    }

    fn dump_lines(&self, sink: Arc<dyn Sink>, lines: Vec<String>) {
        self.diagnostics.record_dump(lines.len());
        self.dispatch(sink.as_ref(), &lines);
    }
}

/// 进程级日志上下文
///
/// ```rust
/// use memlog::{ConfigUpdate, LogContext, MemorySink};
///
/// let sink = MemorySink::new();
/// let context = LogContext::with_config(
///     ConfigUpdate::new().root_logger("WARN").show_time(false).sink(sink.clone()),
/// );
///
/// let log = context.get_logger("X").unwrap();
/// log.info(["hi"]);
///
/// // 已存储但未转发
/// assert_eq!(context.lines("X").unwrap(), vec!["[X] INFO hi"]);
/// assert!(sink.is_empty());
///
/// context.dump("X");
/// assert_eq!(sink.lines(), vec!["[X] INFO hi"]);
/// ```
#[derive(Clone, Debug)]
pub struct LogContext {
    shared: Arc<Shared>,
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new()
    }
}

impl LogContext {
    /// 使用默认配置创建上下文
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                diagnostics: Diagnostics::new(),
            }),
        }
    }

    /// 创建上下文并立即合并一次配置
    pub fn with_config(update: ConfigUpdate) -> Self {
        let context = Self::new();
        context.config(update);
        context
    }

    pub(crate) fn from_shared(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// 获取日志器，不存在时创建。
    ///
    /// 相同名称总是返回同一个日志器，其存储序列只创建一次。
    pub fn get_logger(&self, name: &str) -> Result<Logger> {
        if name.is_empty() {
            return Err(MemLogError::InvalidName);
        }

        let mut state = self
            .shared
            .state
            .lock()
            .map_err(|_| MemLogError::internal("logger registry lock poisoned"))?;

        if let Some(core) = state.loggers.get(name) {
            return Ok(Logger::new(core.clone(), self.shared.clone()));
        }

        let core = Arc::new(LoggerCore {
            name: name.to_string(),
        });
        state.loggers.insert(name.to_string(), core.clone());
        state.store.register(name);
        drop(state);

        self.shared.diagnostics.increment_loggers_created();
        tracing::debug!(logger = name, "created logger");
        Ok(Logger::new(core, self.shared.clone()))
    }

    /// 合并配置更新
    pub fn config(&self, update: ConfigUpdate) {
        if update.is_empty() {
            return;
        }
        tracing::debug!(?update, "merging configuration");
        self.shared.state().config.merge(update);
    }

    /// 当前配置的副本
    pub fn configuration(&self) -> Configuration {
        self.shared.state().config.clone()
    }

    /// 供外部远程传输组件读取的端口
    pub fn remote_logging_port(&self) -> u16 {
        self.shared.state().config.remote_logging_port
    }

    /// 将所有日志按产生顺序发送到输出
    pub fn dump_all(&self) {
        let (sink, lines) = {
            let state = self.shared.state();
            (state.config.out.resolve(), state.store.all().to_vec())
        };
        self.shared.dump_lines(sink, lines);
    }

    /// 按名称或通配符发送日志。
    ///
    /// - 存在同名日志器时发送其全部日志（即使为空）
    /// - `Controller::*` 形式的通配符发送所有 `[Controller::...]` 标签的日志，
    ///   没有匹配时不发送
    /// - 其它情况什么都不做
    pub fn dump(&self, name: &str) {
        let (sink, lines) = {
            let state = self.shared.state();
            let lines = if let Some(lines) = state.store.lines(name) {
                lines.to_vec()
            } else if let Some(matcher) = TagMatcher::from_wildcard(name) {
                let matched = state.store.matching(&matcher);
                if matched.is_empty() {
                    return;
                }
                matched
            } else {
                return;
            };
            (state.config.out.resolve(), lines)
        };
        self.shared.dump_lines(sink, lines);
    }

    /// 所有已存储的日志
    pub fn all_lines(&self) -> Vec<String> {
        self.shared.state().store.all().to_vec()
    }

    /// 指定日志器的日志；日志器不存在时为 `None`
    pub fn lines(&self, name: &str) -> Option<Vec<String>> {
        self.shared.state().store.lines(name).map(<[String]>::to_vec)
    }

    /// 匹配通配符的日志；`pattern` 不是通配符时为空
    pub fn matching(&self, pattern: &str) -> Vec<String> {
        match TagMatcher::from_wildcard(pattern) {
            Some(matcher) => self.shared.state().store.matching(&matcher),
            None => Vec::new(),
        }
    }

    /// 已创建的日志器名称（排序后）
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .shared
            .state()
            .loggers
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn has_logger(&self, name: &str) -> bool {
        self.shared.state().loggers.contains_key(name)
    }

    /// 诊断数据快照
    pub fn diagnostics(&self) -> DiagnosticsSnapshot {
        self.shared.diagnostics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Output;
    use crate::sinks::memory::MemorySink;
    use crate::sinks::traits::{SinkError, SinkResult};
    use std::thread;

    fn context_with_sink() -> (LogContext, MemorySink) {
        let sink = MemorySink::new();
        let context =
            LogContext::with_config(ConfigUpdate::new().show_time(false).sink(sink.clone()));
        (context, sink)
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let context = LogContext::new();
        assert!(matches!(
            context.get_logger(""),
            Err(MemLogError::InvalidName)
        ));
        assert!(context.logger_names().is_empty());
    }

    #[test]
    fn test_storage_created_with_logger() {
        let (context, _sink) = context_with_sink();
        assert!(context.lines("A").is_none());
        context.get_logger("A").unwrap();
        assert_eq!(context.lines("A"), Some(vec![]));
        assert!(context.has_logger("A"));
        assert_eq!(context.diagnostics().loggers_created, 1);

        context.get_logger("A").unwrap();
        assert_eq!(context.diagnostics().loggers_created, 1);
    }

    #[test]
    fn test_suppressed_lines_are_still_stored() {
        let (context, sink) = context_with_sink();
        context.config(ConfigUpdate::new().root_logger("WARN"));
        let log = context.get_logger("X").unwrap();
        log.info(["hi"]);

        assert_eq!(context.all_lines(), vec!["[X] INFO hi"]);
        assert_eq!(context.lines("X").unwrap(), vec!["[X] INFO hi"]);
        assert!(sink.is_empty());

        let diagnostics = context.diagnostics();
        assert_eq!(diagnostics.lines_stored, 1);
        assert_eq!(diagnostics.lines_suppressed, 1);
        assert_eq!(diagnostics.lines_forwarded, 0);
    }

    #[test]
    fn test_forwarded_line_is_single_element_batch() {
        let (context, sink) = context_with_sink();
        context.get_logger("X").unwrap().error(["boom"]);
        assert_eq!(sink.batches(), vec![vec!["[X] ERROR boom"]]);
    }

    #[test]
    fn test_show_time_prefix() {
        let sink = MemorySink::new();
        let context = LogContext::with_config(ConfigUpdate::new().sink(sink.clone()));
        context.get_logger("T").unwrap().info(["tick"]);

        let line = &context.all_lines()[0];
        assert!(line.ends_with(" [T] INFO tick"));
        let time = &line[..8];
        assert_eq!(time.as_bytes()[2], b':');
        assert_eq!(time.as_bytes()[5], b':');
    }

    #[test]
    fn test_dump_all_in_emission_order() {
        let (context, sink) = context_with_sink();
        let a = context.get_logger("A").unwrap();
        let b = context.get_logger("B").unwrap();
        a.info(["1"]);
        b.info(["2"]);
        a.info(["3"]);
        sink.clear();

        context.dump_all();
        assert_eq!(
            sink.batches(),
            vec![vec!["[A] INFO 1", "[B] INFO 2", "[A] INFO 3"]]
        );
    }

    #[test]
    fn test_dump_exact_name() {
        let (context, sink) = context_with_sink();
        context.get_logger("A").unwrap().info(["1"]);
        context.get_logger("B").unwrap().info(["2"]);
        sink.clear();

        context.dump("A");
        assert_eq!(sink.batches(), vec![vec!["[A] INFO 1"]]);
    }

    #[test]
    fn test_dump_existing_empty_logger_dispatches_empty_batch() {
        let (context, sink) = context_with_sink();
        context.get_logger("Silent").unwrap();
        context.dump("Silent");
        assert_eq!(sink.batches(), vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_dump_unknown_name_is_noop() {
        let (context, sink) = context_with_sink();
        context.get_logger("A").unwrap().info(["1"]);
        sink.clear();

        context.dump("NoSuchLogger");
        context.dump("Nope::*");
        assert!(sink.is_empty());
        assert_eq!(context.diagnostics().dumps, 0);
    }

    #[test]
    fn test_dump_wildcard_without_time() {
        let (context, sink) = context_with_sink();
        context.get_logger("A::x").unwrap().info(["ax"]);
        context.get_logger("B::z").unwrap().info(["bz"]);
        context.get_logger("A::y").unwrap().info(["ay"]);
        sink.clear();

        context.dump("A::*");
        assert_eq!(sink.batches(), vec![vec!["[A::x] INFO ax", "[A::y] INFO ay"]]);
        assert_eq!(context.matching("A::*").len(), 2);
        assert!(context.matching("A").is_empty());
    }

    #[test]
    fn test_dump_uses_current_output() {
        let (context, first) = context_with_sink();
        context.get_logger("A").unwrap().info(["1"]);

        let second = MemorySink::new();
        context.config(ConfigUpdate::new().sink(second.clone()));
        context.dump_all();

        assert_eq!(first.dispatch_count(), 1);
        assert_eq!(second.lines(), vec!["[A] INFO 1"]);
    }

    #[derive(Debug)]
    struct BrokenSink;

    impl Sink for BrokenSink {
        fn write(&self, _lines: &[String]) -> SinkResult<()> {
            Err(SinkError::Closed("gone".to_string()))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[test]
    fn test_sink_failure_is_counted_not_raised() {
        let context = LogContext::with_config(
            ConfigUpdate::new()
                .show_time(false)
                .out(Output::sink(BrokenSink)),
        );
        let log = context.get_logger("A").unwrap();
        log.info(["still stored"]);

        assert_eq!(context.lines("A").unwrap(), vec!["[A] INFO still stored"]);
        assert_eq!(context.diagnostics().sink_errors, 1);
    }

    #[test]
    fn test_sink_may_log_reentrantly() {
        let context = LogContext::new();
        let inner = context.clone();
        context.config(ConfigUpdate::new().show_time(false).out(Output::function(
            move |lines: &[String]| {
                if lines.iter().any(|l| l.starts_with("[Main]")) {
                    if let Ok(log) = inner.get_logger("Audit") {
                        log.info(["saw", "outer"]);
                    }
                }
            },
        )));

        context.get_logger("Main").unwrap().info(["outer"]);
        assert_eq!(context.lines("Audit").unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_emission_keeps_all_consistent() {
        let (context, _sink) = context_with_sink();
        let mut handles = vec![];

        for worker in 0..8 {
            let context = context.clone();
            handles.push(thread::spawn(move || {
                let name = format!("W::{}", worker);
                let log = context.get_logger(&name).unwrap();
                for i in 0..50 {
                    log.debug(vec![i]);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let all = context.all_lines();
        assert_eq!(all.len(), 400);
        for worker in 0..8 {
            let name = format!("W::{}", worker);
            let own = context.lines(&name).unwrap();
            let tag = format!("[{}] ", name);
            let from_all: Vec<_> = all.iter().filter(|l| l.starts_with(&tag)).cloned().collect();
            assert_eq!(own, from_all);
        }
    }

    #[test]
    fn test_concurrent_get_logger_memoizes() {
        let context = LogContext::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let context = context.clone();
                thread::spawn(move || context.get_logger("Shared").unwrap())
            })
            .collect();
        let loggers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(loggers.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(context.diagnostics().loggers_created, 1);
    }

    #[test]
    fn test_remote_logging_port_is_stored() {
        let context = LogContext::new();
        assert_eq!(context.remote_logging_port(), 1337);
        context.config(ConfigUpdate::new().remote_logging_port(9999));
        assert_eq!(context.remote_logging_port(), 9999);
    }
}
