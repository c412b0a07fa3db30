//! 过滤决策
//!
//! 决定一条已存储的日志是否立即发送到 sink。按以下顺序逐层判断，
//! 只有上一层无法决定时才查询下一层：
//!
//! 1. 与日志器名称完全相同的覆盖项
//! 2. 名称对应的通配符覆盖项（如 `Controller::*`）
//! 3. `rootLogger` 为 `NONE` 时不转发
//! 4. 与 `rootLogger` 比较
//!
//! 无法识别的级别取值会让该层失效并落入下一层，从不报错。

use crate::config::{Configuration, Threshold};
use crate::core::level::Level;
use crate::core::line::wildcard_key;

/// Whether a message at `level` from logger `name` goes to the sink.
pub fn should_forward(config: &Configuration, level: Level, name: &str) -> bool {
    if let Some(decision) = config
        .override_for(name)
        .and_then(|threshold| threshold.decide(level))
    {
        return decision;
    }

    if let Some(decision) = wildcard_key(name)
        .and_then(|key| config.override_for(&key).cloned())
        .and_then(|threshold| threshold.decide(level))
    {
        return decision;
    }

    match &config.root_logger {
        Threshold::Off => false,
        Threshold::Level(root) => Level::compare(level, *root) >= 0,
        // An unknown root level sorts below every real level.
        Threshold::Unrecognized(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigUpdate;

    fn config_with(update: ConfigUpdate) -> Configuration {
        let mut config = Configuration::default();
        config.merge(update);
        config
    }

    #[test]
    fn test_default_forwards_everything() {
        let config = Configuration::default();
        for level in Level::ALL {
            assert!(should_forward(&config, level, "Any"));
        }
    }

    #[test]
    fn test_root_threshold() {
        let config = config_with(ConfigUpdate::new().root_logger("WARN"));
        assert!(!should_forward(&config, Level::Debug, "X"));
        assert!(!should_forward(&config, Level::Info, "X"));
        assert!(should_forward(&config, Level::Warn, "X"));
        assert!(should_forward(&config, Level::Error, "X"));
    }

    #[test]
    fn test_root_none_disables() {
        let config = config_with(ConfigUpdate::new().root_logger("NONE"));
        assert!(!should_forward(&config, Level::Error, "X"));
    }

    #[test]
    fn test_exact_beats_wildcard_beats_root() {
        let config = config_with(
            ConfigUpdate::new()
                .root_logger("ERROR")
                .level("A::*", "WARN")
                .level("A::b", "DEBUG"),
        );
        assert!(should_forward(&config, Level::Debug, "A::b"));
        assert!(!should_forward(&config, Level::Info, "A::c"));
        assert!(should_forward(&config, Level::Warn, "A::c"));
        assert!(!should_forward(&config, Level::Warn, "B::c"));
    }

    #[test]
    fn test_override_enables_despite_root_none() {
        let config = config_with(
            ConfigUpdate::new()
                .root_logger("NONE")
                .level("Controller::*", "INFO"),
        );
        assert!(should_forward(&config, Level::Info, "Controller::people"));
        assert!(!should_forward(&config, Level::Debug, "Controller::people"));
        assert!(!should_forward(&config, Level::Error, "Model::people"));
    }

    #[test]
    fn test_none_override_silences_scope() {
        let config = config_with(
            ConfigUpdate::new()
                .level("A::*", "NONE")
                .level("A::loud", "ERROR"),
        );
        assert!(!should_forward(&config, Level::Error, "A::quiet"));
        assert!(should_forward(&config, Level::Error, "A::loud"));
        assert!(should_forward(&config, Level::Debug, "B::other"));
    }

    #[test]
    fn test_unrecognized_override_falls_through() {
        let config = config_with(
            ConfigUpdate::new()
                .root_logger("WARN")
                .level("A::b", "LOUD")
                .level("A::*", "INFO"),
        );
        assert!(should_forward(&config, Level::Info, "A::b"));
        assert!(!should_forward(&config, Level::Debug, "A::b"));

        let config = config_with(ConfigUpdate::new().root_logger("WARN").level("X", "LOUD"));
        assert!(!should_forward(&config, Level::Info, "X"));
    }

    #[test]
    fn test_unrecognized_root_is_permissive() {
        let config = config_with(ConfigUpdate::new().root_logger("VERBOSE"));
        assert!(should_forward(&config, Level::Debug, "X"));
    }

    #[test]
    fn test_wildcard_only_for_namespaced_names() {
        let config = config_with(ConfigUpdate::new().root_logger("ERROR").level("Plain::*", "DEBUG"));
        assert!(!should_forward(&config, Level::Debug, "Plain"));
        assert!(should_forward(&config, Level::Debug, "Plain::x"));
    }
}
