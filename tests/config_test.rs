use std::collections::HashMap;
use std::path::PathBuf;

use evalbatch::config::{Config, DEFAULT_CONCURRENCY};

fn config_from(vars: &[(&str, &str)]) -> evalbatch::error::Result<Config> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn config_loads_required_fields_with_defaults() {
    let config = config_from(&[("INPUT_PATH", "questions.yaml")]).unwrap();

    assert_eq!(config.input_path, PathBuf::from("questions.yaml"));
    assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
    assert_eq!(config.concurrency, 10);
    assert!(config.output_path.is_none());
    assert!(config.runner_config.is_none());
    assert!(config.otel_endpoint.is_none());
    assert_eq!(config.log_level, "warn");
}

#[test]
fn config_reads_optional_fields() {
    let config = config_from(&[
        ("INPUT_PATH", "questions.yaml"),
        ("OUTPUT_PATH", "results.jsonl"),
        ("CONCURRENCY", "20"),
        ("RUNNER_CONFIG", "runner.toml"),
        ("OTEL_ENDPOINT", "http://localhost:4317"),
        ("LOG_LEVEL", "debug"),
    ])
    .unwrap();

    assert_eq!(config.output_path, Some(PathBuf::from("results.jsonl")));
    assert_eq!(config.concurrency, 20);
    assert_eq!(config.runner_config, Some(PathBuf::from("runner.toml")));
    assert_eq!(config.otel_endpoint.as_deref(), Some("http://localhost:4317"));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn config_fails_without_input_path() {
    assert!(config_from(&[]).is_err());
    assert!(config_from(&[("INPUT_PATH", "")]).is_err());
}

#[test]
fn config_rejects_bad_concurrency() {
    for bad in ["0", "-1", "ten", "1.5"] {
        let result = config_from(&[("INPUT_PATH", "q.yaml"), ("CONCURRENCY", bad)]);
        assert!(result.is_err(), "CONCURRENCY={bad} should be rejected");
    }
}

#[test]
fn config_from_env_fails_without_required() {
    unsafe {
        std::env::remove_var("INPUT_PATH");
    }

    assert!(Config::from_env().is_err());
}
