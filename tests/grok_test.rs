//! 内置模式库上的 grok 编译与字段校验集成测试

use std::sync::Arc;

use rsgrok::{
    verify_field_names, CompiledPattern, GrokCompiler, GrokError, MetricDefinition,
    PatternDictionary, PatternLoader, StdRegexEngine,
};

fn compiler() -> GrokCompiler {
    let patterns = PatternLoader::load_embedded().expect("内置模式库加载失败");
    GrokCompiler::new(Arc::new(patterns))
}

#[test]
fn test_compile_all_patterns() {
    let compiler = compiler();
    let mut failures = Vec::new();
    for name in compiler.dictionary().names() {
        if let Err(e) = compiler.compile(&format!("%{{{}}}", name)) {
            failures.push(e.to_string());
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn test_compile_unknown_pattern() {
    let err = compiler()
        .compile("%{USER} [a-z] %{SOME_UNKNOWN_PATTERN}.*")
        .unwrap_err();
    assert!(matches!(err, GrokError::UndefinedPattern { .. }));
    assert!(err.to_string().contains("SOME_UNKNOWN_PATTERN"));
}

#[test]
fn test_compile_malformed_placeholder() {
    let compiler = compiler();
    for expression in ["%{USER NAME}", "%{USER:}", "%{NUMBER:val:int}"] {
        let err = compiler.compile(expression).unwrap_err();
        assert!(
            matches!(err, GrokError::InvalidPlaceholder { .. }),
            "{expression}: {err}"
        );
        assert!(err.to_string().contains(expression));
    }
}

#[test]
fn test_std_engine_rejects_atomic_groups() {
    let patterns = Arc::new(PatternLoader::load_embedded().unwrap());
    let std_compiler = GrokCompiler::with_engine(patterns.clone(), StdRegexEngine);

    assert!(std_compiler.compile("%{USERNAME:user}").is_ok());
    // BASE10NUM 使用原子分组
    let err = std_compiler.compile("%{NUMBER:val}").unwrap_err();
    assert!(matches!(err, GrokError::InvalidRegex { .. }));
    assert!(GrokCompiler::new(patterns).compile("%{NUMBER:val}").is_ok());
}

#[test]
fn test_compile_invalid_regexp() {
    // 正则不能以反斜杠结尾
    let err = compiler().compile(r"%{USER} [a-z] \").unwrap_err();
    assert!(matches!(err, GrokError::InvalidRegex { .. }));
    assert!(err.to_string().contains(r"%{USER} [a-z] \"));
}

fn expect(regex: &CompiledPattern, config: &str, is_error_expected: bool) {
    let metric = MetricDefinition::from_yaml(config).unwrap();
    let result = verify_field_names(&metric, regex);
    if is_error_expected {
        assert!(result.is_err(), "expected error for config:{config}");
    } else {
        assert!(result.is_ok(), "expected ok, got {result:?} for config:{config}");
    }
}

#[test]
fn test_verify_capture_group() {
    let regex = compiler()
        .compile("host %{HOSTNAME:host} user %{USER:user} value %{NUMBER:val}.")
        .unwrap();

    expect(
        &regex,
        r#"
            name: test
            value: val
            labels:
            - grok_field_name: user
              prometheus_label: user
            - grok_field_name: host
              prometheus_label: something"#,
        false,
    );
    expect(
        &regex,
        r#"
            name: test"#,
        false,
    );
    expect(
        &regex,
        r#"
            name: test
            value: value
            labels:
            - grok_field_name: user
              prometheus_label: user"#,
        true,
    );
    expect(
        &regex,
        r#"
            name: test
            value: val
            labels:
            - grok_field_name: user2
              prometheus_label: user"#,
        true,
    );

    regex.free();
}

#[test]
fn test_verify_capture_group_matches_line() {
    let regex = compiler()
        .compile("host %{HOSTNAME:host} user %{USER:user} value %{NUMBER:val}.")
        .unwrap();
    let fields = regex
        .captures("host web-01.example.com user alice value 42.5.")
        .unwrap()
        .unwrap();
    assert_eq!(fields["host"], "web-01.example.com");
    assert_eq!(fields["user"], "alice");
    assert_eq!(fields["val"], "42.5");
}

#[test]
fn test_syslog_nested_aliases() {
    let regex = compiler().compile("%{SYSLOGBASE} %{GREEDYDATA:message}").unwrap();
    let names: Vec<&str> = regex.group_names().collect();
    for expected in ["timestamp", "logsource", "program", "pid", "message"] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }

    let fields = regex
        .captures("Mar  7 10:15:02 gateway sshd[4242]: Accepted publickey for root")
        .unwrap()
        .unwrap();
    assert_eq!(fields["timestamp"], "Mar  7 10:15:02");
    assert_eq!(fields["logsource"], "gateway");
    assert_eq!(fields["program"], "sshd");
    assert_eq!(fields["pid"], "4242");
    assert_eq!(fields["message"], "Accepted publickey for root");
}

#[test]
fn test_compile_is_idempotent() {
    let compiler = compiler();
    let expression = "%{COMMONAPACHELOG}";
    let first = compiler.compile(expression).unwrap();
    let second = compiler.compile(expression).unwrap();
    assert_eq!(first.source(), second.source());
    assert_eq!(first.capture_groups(), second.capture_groups());
}

#[test]
fn test_dictionary_shared_across_threads() {
    let compiler = compiler();
    let dictionary: Arc<PatternDictionary> = compiler.dictionary().clone();

    let handles: Vec<_> = ["%{IPV4:ip}", "%{USER:user}", "%{NUMBER:n}"]
        .into_iter()
        .map(|expression| {
            let compiler = compiler.clone();
            std::thread::spawn(move || {
                compiler
                    .compile(expression)
                    .map(|p| p.group_names().map(str::to_string).collect::<Vec<_>>())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap().len(), 1);
    }
    assert_eq!(dictionary.len(), compiler.dictionary().len());
}
