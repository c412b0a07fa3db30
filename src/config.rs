//! 定义 memlog 日志框架的配置结构体。
//!
//! 配置是进程级的可变状态，每次更新都是合并而不是替换：
//! 后出现的键覆盖先前的值，未出现的键保持原值。
//! 保留的控制键为 `rootLogger`、`showTime`、`out` 和 `remoteLoggingPort`，
//! 其它任何键都被视为按日志器名称或通配符（如 `Controller::*`）设置的级别覆盖。

use indexmap::IndexMap;
use serde_json::Value as Json;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::core::level::Level;
use crate::core::line::WILDCARD_SUFFIX;
use crate::error::{MemLogError, Result};
use crate::sinks::function::FunctionSink;
use crate::sinks::stdout::StdoutSink;
use crate::sinks::traits::Sink;

/// 关闭日志输出的伪级别
pub const NONE: &str = "NONE";

/// 保留的控制键
pub const ROOT_LOGGER_KEY: &str = "rootLogger";
pub const SHOW_TIME_KEY: &str = "showTime";
pub const OUT_KEY: &str = "out";
pub const REMOTE_LOGGING_PORT_KEY: &str = "remoteLoggingPort";

/// 默认输出的文本标记
pub const CONSOLE: &str = "console";

// --- 辅助函数，用于提供配置项的默认值 ---
fn default_root_logger() -> Threshold {
    Threshold::Level(Level::Debug)
}
fn default_true() -> bool {
    true
}
fn default_remote_logging_port() -> u16 {
    1337
}

/// 配置中的级别取值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Threshold {
    /// 有效级别
    Level(Level),
    /// `NONE`：关闭该范围的输出
    Off,
    /// 无法识别的取值，过滤时该层被跳过
    Unrecognized(String),
}

impl Threshold {
    /// 解析配置文本，从不失败
    pub fn parse(value: &str) -> Self {
        if value == NONE {
            return Threshold::Off;
        }
        match value.parse::<Level>() {
            Ok(level) => Threshold::Level(level),
            Err(_) => Threshold::Unrecognized(value.to_string()),
        }
    }

    /// Forwarding decision for a message at `level`, or `None` when this
    /// value cannot decide and the next tier must.
    pub fn decide(&self, level: Level) -> Option<bool> {
        match self {
            Threshold::Level(threshold) => Some(Level::compare(level, *threshold) >= 0),
            Threshold::Off => Some(false),
            Threshold::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Threshold::Unrecognized(_))
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Level(level) => write!(f, "{}", level),
            Threshold::Off => f.write_str(NONE),
            Threshold::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

impl From<Level> for Threshold {
    fn from(level: Level) -> Self {
        Threshold::Level(level)
    }
}

impl From<&str> for Threshold {
    fn from(value: &str) -> Self {
        Threshold::parse(value)
    }
}

impl From<String> for Threshold {
    fn from(value: String) -> Self {
        Threshold::parse(&value)
    }
}

/// 输出能力
#[derive(Clone, Default)]
pub enum Output {
    /// 标准输出
    #[default]
    Console,
    /// 自定义 sink
    Sink(Arc<dyn Sink>),
}

impl Output {
    /// 使用闭包作为输出
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        Output::Sink(Arc::new(FunctionSink::new(f)))
    }

    pub fn sink<S: Sink + 'static>(sink: S) -> Self {
        Output::Sink(Arc::new(sink))
    }

    /// 解析为可写入的 sink
    pub fn resolve(&self) -> Arc<dyn Sink> {
        match self {
            Output::Console => Arc::new(StdoutSink::new()),
            Output::Sink(sink) => sink.clone(),
        }
    }

    pub fn is_console(&self) -> bool {
        matches!(self, Output::Console)
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Console => f.write_str("Console"),
            Output::Sink(sink) => f.debug_tuple("Sink").field(&sink.name()).finish(),
        }
    }
}

/// memlog 的顶层配置结构体。
#[derive(Debug, Clone)]
pub struct Configuration {
    /// 默认级别，`NONE` 表示关闭
    pub root_logger: Threshold,
    /// 是否在每行前加 `HH:MM:SS`
    pub show_time: bool,
    pub out: Output,
    /// 仅保存，供外部传输组件读取
    pub remote_logging_port: u16,
    /// 按名称或通配符设置的级别覆盖，保持插入顺序
    pub overrides: IndexMap<String, Threshold>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            root_logger: default_root_logger(),
            show_time: default_true(),
            out: Output::default(),
            remote_logging_port: default_remote_logging_port(),
            overrides: IndexMap::new(),
        }
    }
}

impl Configuration {
    /// 合并一次配置更新
    pub fn merge(&mut self, update: ConfigUpdate) {
        if let Some(root_logger) = update.root_logger {
            self.root_logger = root_logger;
        }
        if let Some(show_time) = update.show_time {
            self.show_time = show_time;
        }
        if let Some(out) = update.out {
            self.out = out;
        }
        if let Some(port) = update.remote_logging_port {
            self.remote_logging_port = port;
        }
        for (key, threshold) in update.overrides {
            self.overrides.insert(key, threshold);
        }
    }

    /// 名称或通配符对应的覆盖项
    pub fn override_for(&self, key: &str) -> Option<&Threshold> {
        self.overrides.get(key)
    }
}

/// 一次部分配置更新，未设置的字段保持原值。
///
/// ```rust
/// use memlog::{ConfigUpdate, Level};
///
/// let update = ConfigUpdate::new()
///     .root_logger("WARN")
///     .show_time(false)
///     .level("Controller::*", Level::Debug)
///     .level("Controller::noisy", "NONE");
/// assert_eq!(update.overrides.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub root_logger: Option<Threshold>,
    pub show_time: Option<bool>,
    pub out: Option<Output>,
    pub remote_logging_port: Option<u16>,
    pub overrides: IndexMap<String, Threshold>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_logger<T: Into<Threshold>>(mut self, threshold: T) -> Self {
        self.root_logger = Some(threshold.into());
        self
    }

    pub fn show_time(mut self, show_time: bool) -> Self {
        self.show_time = Some(show_time);
        self
    }

    pub fn out(mut self, out: Output) -> Self {
        self.out = Some(out);
        self
    }

    pub fn sink<S: Sink + 'static>(self, sink: S) -> Self {
        self.out(Output::sink(sink))
    }

    pub fn remote_logging_port(mut self, port: u16) -> Self {
        self.remote_logging_port = Some(port);
        self
    }

    /// 为日志器名称或通配符键设置级别
    pub fn level<K: Into<String>, T: Into<Threshold>>(mut self, key: K, threshold: T) -> Self {
        self.overrides.insert(key.into(), threshold.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.root_logger.is_none()
            && self.show_time.is_none()
            && self.out.is_none()
            && self.remote_logging_port.is_none()
            && self.overrides.is_empty()
    }

    /// 从键值对象构建更新，对应松散类型的 `config(options)` 调用。
    ///
    /// 非文本的级别取值会变成 [`Threshold::Unrecognized`]；
    /// 控制键的类型错误返回 `ConfigError`。
    pub fn from_json(options: Json) -> Result<Self> {
        let Json::Object(map) = options else {
            return Err(MemLogError::config("配置必须是键值对象"));
        };

        let mut update = Self::new();
        for (key, value) in map {
            match key.as_str() {
                ROOT_LOGGER_KEY => update.root_logger = Some(threshold_from_json(&value)),
                SHOW_TIME_KEY => {
                    let show_time = value.as_bool().ok_or_else(|| {
                        MemLogError::config(format!("{} 必须是布尔值: {}", SHOW_TIME_KEY, value))
                    })?;
                    update.show_time = Some(show_time);
                }
                OUT_KEY => match value.as_str() {
                    Some(CONSOLE) => update.out = Some(Output::Console),
                    _ => {
                        return Err(MemLogError::config(format!(
                            "{} 只能从配置文本设置为 \"{}\": {}",
                            OUT_KEY, CONSOLE, value
                        )))
                    }
                },
                REMOTE_LOGGING_PORT_KEY => {
                    let port = value
                        .as_u64()
                        .and_then(|port| u16::try_from(port).ok())
                        .ok_or_else(|| {
                            MemLogError::config(format!(
                                "{} 必须是 0-65535 的整数: {}",
                                REMOTE_LOGGING_PORT_KEY, value
                            ))
                        })?;
                    update.remote_logging_port = Some(port);
                }
                _ => {
                    update.overrides.insert(key, threshold_from_json(&value));
                }
            }
        }
        Ok(update)
    }
}

fn threshold_from_json(value: &Json) -> Threshold {
    match value {
        Json::String(text) => Threshold::parse(text),
        other => Threshold::Unrecognized(other.to_string()),
    }
}

/// 用于从 TOML 文件加载配置更新的辅助函数。
pub fn load_config_from_file(path: &Path) -> Result<ConfigUpdate> {
    use std::fs;

    if !path.exists() {
        return Err(MemLogError::ConfigFileMissing(
            path.to_string_lossy().into_owned(),
        ));
    }

    let config_str = fs::read_to_string(path)?;
    load_config_from_str(&config_str)
}

/// 用于从 TOML 字符串加载配置更新的辅助函数。
///
/// ```rust
/// let update = memlog::config::load_config_from_str(r#"
///     rootLogger = "INFO"
///     showTime = false
///     "Controller::*" = "DEBUG"
/// "#).unwrap();
/// assert_eq!(update.show_time, Some(false));
/// ```
pub fn load_config_from_str(config_str: &str) -> Result<ConfigUpdate> {
    let table: toml::Table = toml::from_str(config_str)
        .map_err(|e| MemLogError::ConfigError(format!("TOML解析失败: {}", e)))?;
    let options = serde_json::to_value(table)?;
    ConfigUpdate::from_json(options)
}

/// 验证配置的有效性。
///
/// 仅用于提示：过滤逻辑本身会跳过无法识别的级别，不会报错。
pub fn validate_config(config: &Configuration) -> Result<()> {
    if let Threshold::Unrecognized(raw) = &config.root_logger {
        return Err(MemLogError::InvalidLogLevel(raw.clone()));
    }

    for (key, threshold) in &config.overrides {
        if key.trim().is_empty() {
            return Err(MemLogError::validation("日志器名称不能为空"));
        }
        if key.ends_with(WILDCARD_SUFFIX) && key.len() == WILDCARD_SUFFIX.len() {
            return Err(MemLogError::validation(format!("通配符缺少命名空间: {}", key)));
        }
        if let Threshold::Unrecognized(raw) = threshold {
            tracing::warn!(key = %key, value = %raw, "override does not name a level");
            return Err(MemLogError::InvalidLogLevel(raw.clone()));
        }
    }

    Ok(())
}
