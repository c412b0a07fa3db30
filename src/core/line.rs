//! Rendered log lines and logger-name namespaces.
//!
//! A line has the shape `[<HH:MM:SS> ]?[<name>] <LEVEL> <args>`; sinks and
//! any transport layered on top treat that text as the wire format.

use crate::core::level::Level;

/// Separator between a namespace and the rest of a logger name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Suffix marking a wildcard key, e.g. `Controller::*`.
pub const WILDCARD_SUFFIX: &str = "::*";

/// Current local wall-clock time as `HH:MM:SS`.
pub fn time_prefix() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Builds the text of one log line from already rendered arguments.
pub fn render_line(time: Option<&str>, name: &str, level: Level, args: &[String]) -> String {
    let mut line = String::new();
    if let Some(time) = time {
        line.push_str(time);
        line.push(' ');
    }
    line.push('[');
    line.push_str(name);
    line.push_str("] ");
    line.push_str(level.as_str());
    line.push(' ');
    line.push_str(&args.join(" "));
    line
}

/// The wildcard key covering `name`: `Controller::people` gives
/// `Controller::*`. Names without a namespace have none.
pub fn wildcard_key(name: &str) -> Option<String> {
    name.find(NAMESPACE_SEPARATOR)
        .map(|end| format!("{}{}", &name[..end], WILDCARD_SUFFIX))
}

/// Namespace segment of a wildcard pattern (`A::*` gives `A`), or `None`
/// when `pattern` is not wildcard-shaped.
pub fn wildcard_segment(pattern: &str) -> Option<&str> {
    pattern
        .strip_suffix(WILDCARD_SUFFIX)
        .filter(|segment| !segment.is_empty())
}

/// Matches rendered lines whose `[name]` tag lies inside one namespace.
///
/// The tag must open the line or follow a space, and a `] ` must close it.
#[derive(Debug, Clone)]
pub struct TagMatcher {
    open: String,
}

impl TagMatcher {
    /// Builds a matcher from a wildcard pattern such as `Controller::*`.
    pub fn from_wildcard(pattern: &str) -> Option<Self> {
        wildcard_segment(pattern).map(|segment| Self {
            open: format!("[{}{}", segment, NAMESPACE_SEPARATOR),
        })
    }

    pub fn matches(&self, line: &str) -> bool {
        line.match_indices(&self.open).any(|(start, _)| {
            let at_boundary = start == 0 || line[..start].ends_with(' ');
            at_boundary && line[start + self.open.len()..].contains("] ")
        })
    }
}
