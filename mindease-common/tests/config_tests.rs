//! Integration tests for configuration loading
//!
//! Covers:
//! - TOML file parsing (full and partial files)
//! - Missing default config file is not fatal
//! - Explicitly named config file must exist
//! - Environment variables override TOML values
//!
//! Note: Uses serial_test to prevent ENV variable race conditions.
//! Tests that manipulate process environment are marked with #[serial].

use mindease_common::config::{
    locate_config_file, CliOverrides, ServerConfig, TomlConfig, CONFIG_PATH_ENV,
};
use mindease_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::time::Duration;

const PROVIDER_VARS: [&str; 7] = [
    "AZURE_KEY",
    "AZURE_TEXT_ENDPOINT",
    "AZURE_VISION_ENDPOINT",
    "AZURE_SPEECH_REGION",
    "AZURE_SPEECH_ENDPOINT",
    "AZURE_OPENAI_ENDPOINT",
    "MINDEASE_PORT",
];

fn clear_env() {
    env::remove_var(CONFIG_PATH_ENV);
    for var in PROVIDER_VARS {
        env::remove_var(var);
    }
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_parse_full_toml() {
    let file = write_config(
        r#"
bind_address = "0.0.0.0"
port = 6100
session_idle_timeout_secs = 600

[logging]
level = "debug"

[azure]
key = "toml-key"
text_endpoint = "https://text.example/"
speech_region = "westus2"
openai_endpoint = "https://openai.example"
gpt_deployment = "gpt-4o"
api_version = "2024-10-21"
request_timeout_secs = 12
"#,
    );

    let toml = TomlConfig::load(file.path()).unwrap();
    let config = ServerConfig::resolve_with(&CliOverrides::default(), &toml, |_| None).unwrap();

    assert_eq!(config.bind_address, "0.0.0.0");
    assert_eq!(config.port, 6100);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.session_idle_timeout, Duration::from_secs(600));
    assert_eq!(config.azure.key.as_deref(), Some("toml-key"));
    assert_eq!(config.azure.text_endpoint.as_deref(), Some("https://text.example"));
    assert_eq!(config.azure.speech_region, "westus2");
    assert_eq!(config.azure.gpt_deployment, "gpt-4o");
    assert_eq!(config.azure.api_version, "2024-10-21");
    assert_eq!(config.azure.request_timeout, Duration::from_secs(12));
    assert!(config.azure.missing_settings().is_empty());
}

#[test]
fn test_partial_toml_uses_defaults() {
    let file = write_config("port = 6200\n");

    let toml = TomlConfig::load(file.path()).unwrap();
    let config = ServerConfig::resolve_with(&CliOverrides::default(), &toml, |_| None).unwrap();

    assert_eq!(config.port, 6200);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.azure.gpt_deployment, "gpt-4");
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = write_config("port = \"not a number\"\n[azure\n");

    let result = TomlConfig::load(file.path());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_explicit_missing_config_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let result = locate_config_file(Some(&missing), |_| None);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_config_path_from_env() {
    clear_env();
    let file = write_config("port = 6300\n");
    env::set_var(CONFIG_PATH_ENV, file.path());

    let config = ServerConfig::resolve(&CliOverrides::default()).unwrap();
    assert_eq!(config.port, 6300);
    assert_eq!(config.config_file.as_deref(), Some(file.path()));

    clear_env();
}

#[test]
#[serial]
fn test_process_env_overrides_toml() {
    clear_env();
    let file = write_config(
        r#"
[azure]
key = "toml-key"
openai_endpoint = "https://toml-openai.example"
"#,
    );
    env::set_var("AZURE_KEY", "env-key");
    env::set_var("AZURE_SPEECH_REGION", "northeurope");

    let cli = CliOverrides {
        config_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let config = ServerConfig::resolve(&cli).unwrap();

    assert_eq!(config.azure.key.as_deref(), Some("env-key"));
    assert_eq!(config.azure.speech_region, "northeurope");
    assert_eq!(
        config.azure.openai_endpoint.as_deref(),
        Some("https://toml-openai.example")
    );

    clear_env();
}
