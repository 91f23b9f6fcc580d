//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_logcon_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("logcon") && path_str.ends_with("config.toml"),
        "Path should contain 'logcon' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_logcon_log() {
    let path = default_log_path();
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("logcon.log"));
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("logcon_test_config.toml");

    let toml_content = r#"
buffer_capacity = 500
poll_interval_ms = 10
log_file_path = "/tmp/logcon-test.log"
details_placeholder = "(none)"
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.buffer_capacity, Some(500));
    assert_eq!(config.poll_interval_ms, Some(10));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/logcon-test.log"))
    );
    assert_eq!(config.details_placeholder, Some("(none)".to_string()));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("logcon_test_invalid.toml");
    fs::write(&config_path, "this is not valid TOML ][}{").expect("Failed to write test config");

    let result = load_config_file(&config_path);

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_handles_partial_config() {
    let config_path = env::temp_dir().join("logcon_test_partial.toml");
    fs::write(&config_path, "buffer_capacity = 42\n").expect("Failed to write test config");

    let config = load_config_file(&config_path).unwrap().unwrap();
    assert_eq!(config.buffer_capacity, Some(42));
    assert_eq!(config.poll_interval_ms, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"\n");
    assert!(result.is_err(), "Unknown keys should be rejected");
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();

    assert_eq!(config.buffer_capacity, 1000);
    assert_eq!(config.poll_interval_ms, 1);
    assert_eq!(config.details_placeholder, "No details");
    assert_eq!(config.log_file_path, default_log_path());
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let config_file = ConfigFile {
        buffer_capacity: Some(2000),
        poll_interval_ms: Some(5),
        log_file_path: None,
        details_placeholder: Some("-".to_string()),
    };

    let resolved = merge_config(Some(config_file));

    assert_eq!(resolved.buffer_capacity, 2000);
    assert_eq!(resolved.poll_interval_ms, 5);
    assert_eq!(resolved.log_file_path, default_log_path());
    assert_eq!(resolved.details_placeholder, "-");
}

#[test]
fn validate_rejects_zero_capacity() {
    let config = ResolvedConfig {
        buffer_capacity: 0,
        ..ResolvedConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            field: "buffer_capacity",
            ..
        })
    ));
    assert!(ResolvedConfig::default().validate().is_ok());
}

#[test]
fn console_options_carry_resolved_values() {
    let config = ResolvedConfig {
        buffer_capacity: 7,
        poll_interval_ms: 25,
        details_placeholder: "nothing here".to_string(),
        ..ResolvedConfig::default()
    };

    let options = config.console_options();

    assert_eq!(options.buffer_capacity, 7);
    assert_eq!(options.poll_interval, Duration::from_millis(25));
    assert_eq!(options.details_placeholder, "nothing here");
}

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(logcon_env)]
fn apply_env_overrides_reads_capacity_and_interval() {
    let _capacity = EnvGuard::new(ENV_BUFFER_CAPACITY);
    let _interval = EnvGuard::new(ENV_POLL_INTERVAL_MS);
    env::set_var(ENV_BUFFER_CAPACITY, "250");
    env::set_var(ENV_POLL_INTERVAL_MS, " 20 ");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.buffer_capacity, 250);
    assert_eq!(result.poll_interval_ms, 20);
}

#[test]
#[serial(logcon_env)]
fn apply_env_overrides_ignores_unparsable_values() {
    let _capacity = EnvGuard::new(ENV_BUFFER_CAPACITY);
    env::set_var(ENV_BUFFER_CAPACITY, "lots");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(logcon_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _capacity = EnvGuard::new(ENV_BUFFER_CAPACITY);
    let _interval = EnvGuard::new(ENV_POLL_INTERVAL_MS);

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(logcon_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(ENV_CONFIG);
    let temp_dir = env::temp_dir();

    let explicit_path = temp_dir.join("logcon_explicit.toml");
    fs::write(&explicit_path, "buffer_capacity = 11\n").expect("Failed to write explicit config");

    let env_path = temp_dir.join("logcon_env.toml");
    fs::write(&env_path, "buffer_capacity = 22\n").expect("Failed to write env config");
    env::set_var(ENV_CONFIG, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(
        config.buffer_capacity,
        Some(11),
        "Should use explicit path, not LOGCON_CONFIG"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(logcon_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(ENV_CONFIG);
    let env_path = env::temp_dir().join("logcon_env_only.toml");
    fs::write(&env_path, "poll_interval_ms = 9\n").expect("Failed to write env config");
    env::set_var(ENV_CONFIG, &env_path);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.poll_interval_ms, Some(9));

    fs::remove_file(env_path).ok();
}

#[test]
fn apply_cli_overrides_only_touches_set_flags() {
    let base = ResolvedConfig::default();

    assert_eq!(apply_cli_overrides(base.clone(), None, None), base);

    let result = apply_cli_overrides(base.clone(), Some(3), None);
    assert_eq!(result.buffer_capacity, 3);
    assert_eq!(result.poll_interval_ms, base.poll_interval_ms);
}

#[test]
#[serial(logcon_env)]
fn precedence_chain_full_defaults_to_cli() {
    let _capacity = EnvGuard::new(ENV_BUFFER_CAPACITY);
    let _interval = EnvGuard::new(ENV_POLL_INTERVAL_MS);

    let file = ConfigFile {
        buffer_capacity: Some(100),
        poll_interval_ms: Some(50),
        ..ConfigFile::default()
    };
    env::set_var(ENV_BUFFER_CAPACITY, "200");
    env::set_var(ENV_POLL_INTERVAL_MS, "60");

    let merged = merge_config(Some(file));
    assert_eq!(merged.buffer_capacity, 100);

    let with_env = apply_env_overrides(merged);
    assert_eq!(with_env.buffer_capacity, 200);
    assert_eq!(with_env.poll_interval_ms, 60);

    let with_cli = apply_cli_overrides(with_env, Some(300), None);
    assert_eq!(with_cli.buffer_capacity, 300);
    assert_eq!(with_cli.poll_interval_ms, 60);
}
