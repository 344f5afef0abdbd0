use config::Environment;
use packshot::{AppConfig, BillingPolicy};
use std::collections::HashMap;
use std::io::Write;

fn env(vars: &[(&str, &str)]) -> Environment {
    let source: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::environment().source(Some(source))
}

fn toml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_defaults_without_file_or_env() {
    let config = AppConfig::load_with_env(None, env(&[])).expect("load defaults");

    assert_eq!(config, AppConfig::default());
    assert_eq!(*config.pipeline().max_edge(), 1024);
    assert_eq!(*config.pipeline().jpeg_quality(), 85);
    assert_eq!(*config.pipeline().billing(), BillingPolicy::RequestedPackSize);
    assert_eq!(config.retry().initial_backoff_ms, 500);
    assert_eq!(*config.rate_limit().rpm(), None);
}

#[test]
fn test_file_overrides_defaults() {
    let file = toml_file(
        r#"
[pipeline]
concurrency_limit = 6
billing = "delivered_images"

[pipeline.models]
render = "custom-image-model"

[retry]
max_attempts = 5

[rate_limit]
rpm = 30
"#,
    );

    let config = AppConfig::load_with_env(Some(file.path()), env(&[])).expect("load file");

    assert_eq!(*config.pipeline().concurrency_limit(), 6);
    assert_eq!(*config.pipeline().billing(), BillingPolicy::DeliveredImages);
    assert_eq!(config.pipeline().models().render(), "custom-image-model");
    assert_eq!(config.pipeline().models().audit(), "gemini-2.5-flash");
    assert_eq!(config.retry().max_attempts, 5);
    assert_eq!(config.retry().max_backoff_ms, 30_000);
    assert_eq!(*config.rate_limit().rpm(), Some(30));
}

#[test]
fn test_environment_overrides_file() {
    let file = toml_file("[pipeline]\nconcurrency_limit = 6\n");

    let config = AppConfig::load_with_env(
        Some(file.path()),
        env(&[
            ("PACKSHOT_PIPELINE__CONCURRENCY_LIMIT", "2"),
            ("PACKSHOT_PIPELINE__MAX_EDGE", "512"),
        ]),
    )
    .expect("load file and env");

    assert_eq!(*config.pipeline().concurrency_limit(), 2);
    assert_eq!(*config.pipeline().max_edge(), 512);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");

    assert!(AppConfig::load_with_env(Some(&missing), env(&[])).is_err());
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let file = toml_file("[pipeline]\njpeg_quality = 0\n");
    let err = AppConfig::load_with_env(Some(file.path()), env(&[])).expect_err("invalid quality");
    assert!(err.message.contains("jpeg_quality"));

    let file = toml_file("[retry]\nmax_attempts = 0\n");
    assert!(AppConfig::load_with_env(Some(file.path()), env(&[])).is_err());
}

#[test]
fn test_bad_backoff_multiplier_is_rejected() {
    for value in ["-1.0", "0.5"] {
        let err = AppConfig::load_with_env(
            None,
            env(&[("PACKSHOT_RETRY__BACKOFF_MULTIPLIER", value)]),
        )
        .expect_err("multiplier below 1.0 or not finite");
        assert!(err.message.contains("backoff_multiplier"), "{value}: {err}");
    }

    for value in ["nan", "inf"] {
        let file = toml_file(&format!("[retry]\nbackoff_multiplier = {value}\n"));
        let err = AppConfig::load_with_env(Some(file.path()), env(&[]))
            .expect_err("non-finite multiplier");
        assert!(err.message.contains("backoff_multiplier"), "{value}: {err}");
    }

    let file = toml_file("[retry]\nbackoff_multiplier = 1.5\n");
    let config = AppConfig::load_with_env(Some(file.path()), env(&[])).expect("valid multiplier");
    assert_eq!(config.retry().backoff_multiplier, 1.5);
}

#[test]
fn test_zero_concurrency_cap_is_rejected() {
    let file = toml_file("[rate_limit]\nmax_concurrent = 0\n");
    let err = AppConfig::load_with_env(Some(file.path()), env(&[])).expect_err("zero cap");
    assert!(err.message.contains("max_concurrent"));

    let err = AppConfig::load_with_env(
        None,
        env(&[("PACKSHOT_RATE_LIMIT__MAX_CONCURRENT", "0")]),
    )
    .expect_err("zero cap from env");
    assert!(err.message.contains("max_concurrent"));

    let config = AppConfig::load_with_env(
        None,
        env(&[("PACKSHOT_RATE_LIMIT__MAX_CONCURRENT", "4")]),
    )
    .expect("positive cap");
    assert_eq!(*config.rate_limit().max_concurrent(), Some(4));
}

#[test]
fn test_rendered_toml_loads_back() {
    let original = AppConfig::load_with_env(
        None,
        env(&[("PACKSHOT_PIPELINE__CONCURRENCY_LIMIT", "7")]),
    )
    .expect("load");
    let file = toml_file(&original.to_toml().expect("render"));

    let reloaded = AppConfig::load_with_env(Some(file.path()), env(&[])).expect("reload");

    assert_eq!(reloaded, original);
}
