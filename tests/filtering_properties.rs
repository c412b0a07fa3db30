//! 过滤与注册表的集成测试

use memlog::{ConfigUpdate, Level, LogContext, MemLogError, MemorySink};
use proptest::prelude::*;

fn context_with_sink() -> (LogContext, MemorySink) {
    let sink = MemorySink::new();
    let context = LogContext::with_config(ConfigUpdate::new().show_time(false).sink(sink.clone()));
    (context, sink)
}

fn level_strategy() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

#[test]
fn test_get_logger_returns_same_handle() {
    let (context, _sink) = context_with_sink();
    let first = context.get_logger("Controller::people").unwrap();
    first.info(["one"]);
    let second = context.get_logger("Controller::people").unwrap();

    assert_eq!(first, second);
    // 再次获取不会重建存储
    assert_eq!(context.lines("Controller::people").unwrap().len(), 1);
    assert_eq!(context.logger_names(), vec!["Controller::people"]);
}

#[test]
fn test_get_logger_rejects_empty_name() {
    let context = LogContext::new();
    let err = context.get_logger("").unwrap_err();
    assert!(matches!(err, MemLogError::InvalidName));
    assert_eq!(err.to_string(), "A Logger must have a name");
}

#[test]
fn test_warn_root_stores_but_does_not_forward_info() {
    let (context, sink) = context_with_sink();
    context.config(ConfigUpdate::new().root_logger("WARN"));
    context.get_logger("X").unwrap().info(["hi"]);

    assert_eq!(context.all_lines(), vec!["[X] INFO hi"]);
    assert_eq!(context.lines("X").unwrap(), vec!["[X] INFO hi"]);
    assert!(sink.is_empty());
}

#[test]
fn test_precedence_exact_then_wildcard_then_root() {
    let (context, sink) = context_with_sink();
    let log = context.get_logger("A::b").unwrap();

    context.config(ConfigUpdate::new().root_logger("ERROR"));
    log.warn(["root"]);
    assert!(sink.is_empty());

    context.config(ConfigUpdate::new().level("A::*", "WARN"));
    log.warn(["wildcard"]);
    log.info(["wildcard-info"]);
    assert_eq!(sink.lines(), vec!["[A::b] WARN wildcard"]);

    context.config(ConfigUpdate::new().level("A::b", "DEBUG"));
    log.debug(["exact"]);
    assert_eq!(sink.lines().last().unwrap(), "[A::b] DEBUG exact");

    // 存储不受过滤影响
    assert_eq!(context.lines("A::b").unwrap().len(), 4);
}

#[test]
fn test_config_merges_instead_of_replacing() {
    let (context, sink) = context_with_sink();
    context.config(ConfigUpdate::new().root_logger("ERROR"));
    context.config(ConfigUpdate::new().level("Other", "DEBUG"));

    let configuration = context.configuration();
    assert!(!configuration.show_time);
    assert!(!configuration.out.is_console());

    context.get_logger("Mine").unwrap().warn(["dropped"]);
    assert!(sink.is_empty());
}

#[test]
fn test_config_from_json_options() {
    let (context, sink) = context_with_sink();
    context.config(
        ConfigUpdate::from_json(serde_json::json!({
            "rootLogger": "NONE",
            "Controller::*": "INFO"
        }))
        .unwrap(),
    );

    context.get_logger("Controller::home").unwrap().info(["shown"]);
    context.get_logger("Model::user").unwrap().error(["hidden"]);
    assert_eq!(sink.lines(), vec!["[Controller::home] INFO shown"]);
}

proptest! {
    #[test]
    fn prop_root_threshold_is_monotonic(root in level_strategy(), level in level_strategy()) {
        let (context, sink) = context_with_sink();
        context.config(ConfigUpdate::new().root_logger(root));
        context.get_logger("P").unwrap().log(level, ["m"]);

        prop_assert_eq!(sink.is_empty(), level < root);
        prop_assert_eq!(context.lines("P").unwrap().len(), 1);
    }

    #[test]
    fn prop_exact_override_wins(
        root in level_strategy(),
        wildcard in level_strategy(),
        exact in level_strategy(),
        level in level_strategy(),
    ) {
        let (context, sink) = context_with_sink();
        context.config(
            ConfigUpdate::new()
                .root_logger(root)
                .level("A::*", wildcard)
                .level("A::b", exact),
        );
        context.get_logger("A::b").unwrap().log(level, ["m"]);
        context.get_logger("A::c").unwrap().log(level, ["m"]);
        context.get_logger("B::c").unwrap().log(level, ["m"]);

        let mut expected = Vec::new();
        if level >= exact {
            expected.push(format!("[A::b] {} m", level));
        }
        if level >= wildcard {
            expected.push(format!("[A::c] {} m", level));
        }
        if level >= root {
            expected.push(format!("[B::c] {} m", level));
        }
        prop_assert_eq!(sink.lines(), expected);
    }

    #[test]
    fn prop_storage_ignores_filtering(levels in prop::collection::vec(level_strategy(), 0..20)) {
        let (context, _sink) = context_with_sink();
        context.config(ConfigUpdate::new().root_logger("NONE"));
        let log = context.get_logger("S").unwrap();
        for level in &levels {
            log.log(*level, ["x"]);
        }
        prop_assert_eq!(context.all_lines().len(), levels.len());
        prop_assert_eq!(context.lines("S").unwrap().len(), levels.len());
    }
}
