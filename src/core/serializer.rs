//! 消息序列化器
//!
//! 将任意 [`Value`] 递归转换为可读文本。顶层参数被渲染为字符串；
//! 嵌套在映射或序列中的值保持结构化（`serde_json::Value`），
//! 以便外层容器统一编码为紧凑的 JSON 文本。

use serde_json::Value as Json;

use crate::core::value::{Number, Value};

/// Marker found in the source of built-in callables.
pub const NATIVE_MARKER: &str = "[native code]";

/// Replacement for everything after a callable's parameter list.
pub const CALLABLE_PLACEHOLDER: &str = ") { [awesome code] }";

pub const NULL_TAG: &str = "[object Null]";
pub const UNDEFINED_TAG: &str = "[object Undefined]";
pub const BOOLEAN_PREFIX: &str = "(Boolean)";

/// Where a value sits relative to the argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// A logging argument itself.
    TopLevel,
    /// A property of a mapping.
    NestedObject,
    /// An element of a sequence.
    NestedArray,
}

/// Output of [`serialize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Text(String),
    Nested(Json),
}

impl Rendered {
    /// Text form; nested structures use their compact encoding.
    pub fn into_text(self) -> String {
        match self {
            Rendered::Text(text) => text,
            Rendered::Nested(Json::String(s)) => s,
            Rendered::Nested(json) => json.to_string(),
        }
    }
}

/// Serializes `value` for the given context.
pub fn serialize(value: &Value, context: Context) -> Rendered {
    match context {
        Context::TopLevel => Rendered::Text(render(value)),
        Context::NestedObject | Context::NestedArray => Rendered::Nested(nested(value)),
    }
}

/// Renders a top-level logging argument.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_text(*n),
        Value::Boolean(b) => format!("{}{}", BOOLEAN_PREFIX, b),
        Value::Null => NULL_TAG.to_string(),
        Value::Undefined => UNDEFINED_TAG.to_string(),
        Value::Callable(source) => summarize_callable(source),
        Value::Sequence(items) => {
            let encoded = Json::Array(items.iter().map(nested).collect()).to_string();
            strip_brackets(&encoded).to_string()
        }
        Value::Mapping(_) => nested(value).to_string(),
    }
}

/// Serializes a value found inside a mapping or a sequence.
///
/// Booleans stay raw here while a top-level boolean gets the `(Boolean)`
/// prefix.
fn nested(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::String(s.clone()),
        Value::Number(n) => number_json(*n),
        Value::Boolean(b) => Json::Bool(*b),
        Value::Null => Json::String(NULL_TAG.to_string()),
        Value::Undefined => Json::String(UNDEFINED_TAG.to_string()),
        Value::Callable(source) => Json::String(summarize_callable(source)),
        Value::Sequence(items) => Json::Array(items.iter().map(nested).collect()),
        Value::Mapping(map) => Json::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), nested(value)))
                .collect(),
        ),
    }
}

/// First line of a callable's source with its body elided.
pub fn summarize_callable(source: &str) -> String {
    let first_line = source.split('\n').next().unwrap_or_default();
    if first_line.contains(NATIVE_MARKER) {
        return first_line.to_string();
    }
    match first_line.find(')') {
        Some(end) => format!("{}{}", &first_line[..end], CALLABLE_PLACEHOLDER),
        None => first_line.to_string(),
    }
}

fn strip_brackets(encoded: &str) -> &str {
    encoded
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(encoded)
}

// Floats print like a script runtime would: integral values have no
// fraction and non-finite values are spelled out.
fn number_text(n: Number) -> String {
    match n {
        Number::Int(i) => i.to_string(),
        Number::UInt(u) => u.to_string(),
        Number::Float(f) if f.is_nan() => "NaN".to_string(),
        Number::Float(f) if f.is_infinite() && f > 0.0 => "Infinity".to_string(),
        Number::Float(f) if f.is_infinite() => "-Infinity".to_string(),
        Number::Float(f) if f == 0.0 => "0".to_string(),
        Number::Float(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Number::Float(f) => f.to_string(),
    }
}

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_json(n: Number) -> Json {
    match n {
        Number::Int(i) => Json::from(i),
        Number::UInt(u) => Json::from(u),
        Number::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
            Json::from(f as i64)
        }
        Number::Float(f) => serde_json::Number::from_f64(f)
            .map(Json::Number)
            .unwrap_or(Json::Null),
    }
}
