//! Configuration loading and resolution
//!
//! Bootstrap configuration comes from an optional TOML file plus environment
//! variables. Each value is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file at the default location is not an error; defaults
//! apply and [`ServerConfig::config_file`] stays `None`. Missing provider
//! credentials are not fatal either: the server still starts and reports the
//! gap when a provider is first used.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5780;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SESSION_IDLE_TIMEOUT_SECS: u64 = 3600;
pub const DEFAULT_SPEECH_REGION: &str = "eastus";
pub const DEFAULT_GPT_DEPLOYMENT: &str = "gpt-4";
pub const DEFAULT_API_VERSION: &str = "2025-01-01-preview";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "MINDEASE_CONFIG";

/// Environment variable names for provider settings
pub mod env_vars {
    pub const PORT: &str = "MINDEASE_PORT";
    pub const AZURE_KEY: &str = "AZURE_KEY";
    pub const TEXT_ENDPOINT: &str = "AZURE_TEXT_ENDPOINT";
    pub const VISION_ENDPOINT: &str = "AZURE_VISION_ENDPOINT";
    pub const SPEECH_REGION: &str = "AZURE_SPEECH_REGION";
    pub const SPEECH_ENDPOINT: &str = "AZURE_SPEECH_ENDPOINT";
    pub const OPENAI_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
}

/// Contents of the TOML config file
///
/// Every field is optional so that resolution can tell "absent" from
/// "set to the default value".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub bind_address: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub session_idle_timeout_secs: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub azure: AzureTomlConfig,
}

/// Logging section of the TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
}

/// `[azure]` section of the TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AzureTomlConfig {
    pub key: Option<String>,
    pub text_endpoint: Option<String>,
    pub vision_endpoint: Option<String>,
    pub speech_region: Option<String>,
    pub speech_endpoint: Option<String>,
    pub openai_endpoint: Option<String>,
    pub gpt_deployment: Option<String>,
    pub api_version: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub log_level: String,
    pub session_idle_timeout: Duration,
    pub azure: AzureConfig,
    /// Config file that was loaded, if any
    pub config_file: Option<PathBuf>,
}

/// Resolved provider settings
///
/// Endpoints are stored without a trailing slash.
#[derive(Clone)]
pub struct AzureConfig {
    pub key: Option<String>,
    pub text_endpoint: Option<String>,
    pub vision_endpoint: Option<String>,
    pub speech_region: String,
    pub speech_endpoint: Option<String>,
    pub openai_endpoint: Option<String>,
    pub gpt_deployment: String,
    pub api_version: String,
    pub request_timeout: Duration,
}

// Hand-written so the subscription key never lands in a log line
impl std::fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureConfig")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("text_endpoint", &self.text_endpoint)
            .field("vision_endpoint", &self.vision_endpoint)
            .field("speech_region", &self.speech_region)
            .field("speech_endpoint", &self.speech_endpoint)
            .field("openai_endpoint", &self.openai_endpoint)
            .field("gpt_deployment", &self.gpt_deployment)
            .field("api_version", &self.api_version)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            key: None,
            text_endpoint: None,
            vision_endpoint: None,
            speech_region: DEFAULT_SPEECH_REGION.to_string(),
            speech_endpoint: None,
            openai_endpoint: None,
            gpt_deployment: DEFAULT_GPT_DEPLOYMENT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl AzureConfig {
    /// Vision endpoint, falling back to the text analytics endpoint
    ///
    /// A multi-service cognitive resource serves both APIs from one host.
    pub fn effective_vision_endpoint(&self) -> Option<&str> {
        self.vision_endpoint
            .as_deref()
            .or(self.text_endpoint.as_deref())
    }

    /// Speech endpoint, derived from the region when not set explicitly
    pub fn effective_speech_endpoint(&self) -> String {
        self.speech_endpoint.clone().unwrap_or_else(|| {
            format!("https://{}.stt.speech.microsoft.com", self.speech_region)
        })
    }

    /// Names of required settings that are not configured
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.key.is_none() {
            missing.push(env_vars::AZURE_KEY);
        }
        if self.text_endpoint.is_none() {
            missing.push(env_vars::TEXT_ENDPOINT);
        }
        if self.openai_endpoint.is_none() {
            missing.push(env_vars::OPENAI_ENDPOINT);
        }
        missing
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_TIMEOUT_SECS),
            azure: AzureConfig::default(),
            config_file: None,
        }
    }
}

impl ServerConfig {
    /// Resolve configuration from CLI, process environment and TOML file
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let env = |name: &str| std::env::var(name).ok();
        let config_file = locate_config_file(cli.config_path.as_deref(), &env)?;
        let toml = match &config_file {
            Some(path) => TomlConfig::load(path)?,
            None => TomlConfig::default(),
        };

        let mut config = Self::resolve_with(cli, &toml, env)?;
        config.config_file = config_file;
        Ok(config)
    }

    /// Resolve from explicit sources
    ///
    /// `env` looks up an environment variable by name.
    pub fn resolve_with<F>(cli: &CliOverrides, toml: &TomlConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_value = |name: &str| env(name).filter(|v| is_valid_value(v));
        let toml_value = |value: &Option<String>| value.clone().filter(|v| is_valid_value(v));

        let port = match cli.port {
            Some(port) => port,
            None => match env_value(env_vars::PORT) {
                Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                    Error::Config(format!("{} is not a valid port: {}", env_vars::PORT, raw))
                })?,
                None => toml.port.unwrap_or(DEFAULT_PORT),
            },
        };

        let bind_address = cli
            .bind_address
            .clone()
            .or_else(|| toml_value(&toml.bind_address))
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let log_level = cli
            .log_level
            .clone()
            .or_else(|| toml_value(&toml.logging.level))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let section = &toml.azure;
        let pick = |var: &str, value: &Option<String>| env_value(var).or_else(|| toml_value(value));

        let azure = AzureConfig {
            key: pick(env_vars::AZURE_KEY, &section.key).map(|k| k.trim().to_string()),
            text_endpoint: pick(env_vars::TEXT_ENDPOINT, &section.text_endpoint)
                .map(normalize_endpoint),
            vision_endpoint: pick(env_vars::VISION_ENDPOINT, &section.vision_endpoint)
                .map(normalize_endpoint),
            speech_region: pick(env_vars::SPEECH_REGION, &section.speech_region)
                .unwrap_or_else(|| DEFAULT_SPEECH_REGION.to_string()),
            speech_endpoint: pick(env_vars::SPEECH_ENDPOINT, &section.speech_endpoint)
                .map(normalize_endpoint),
            openai_endpoint: pick(env_vars::OPENAI_ENDPOINT, &section.openai_endpoint)
                .map(normalize_endpoint),
            gpt_deployment: toml_value(&section.gpt_deployment)
                .unwrap_or_else(|| DEFAULT_GPT_DEPLOYMENT.to_string()),
            api_version: toml_value(&section.api_version)
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            request_timeout: Duration::from_secs(
                section
                    .request_timeout_secs
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        };

        let session_idle_timeout = Duration::from_secs(
            toml.session_idle_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_SESSION_IDLE_TIMEOUT_SECS),
        );

        Ok(Self {
            bind_address,
            port,
            log_level,
            session_idle_timeout,
            azure,
            config_file: None,
        })
    }
}

/// Find the config file to load
///
/// An explicitly named file (CLI or `MINDEASE_CONFIG`) must exist. The
/// platform default location is optional.
pub fn locate_config_file<F>(cli_path: Option<&Path>, env: F) -> Result<Option<PathBuf>>
where
    F: Fn(&str) -> Option<String>,
{
    let explicit = cli_path
        .map(Path::to_path_buf)
        .or_else(|| env(CONFIG_PATH_ENV).filter(|v| is_valid_value(v)).map(PathBuf::from));

    if let Some(path) = explicit {
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    Ok(default_config_path().filter(|path| path.exists()))
}

/// Platform default config file location
///
/// `~/.config/mindease/config.toml` on Linux, the platform config directory
/// elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mindease").join("config.toml"))
}

/// Validate a configured value (non-empty, non-whitespace)
pub fn is_valid_value(value: &str) -> bool {
    !value.trim().is_empty()
}

fn normalize_endpoint(endpoint: String) -> String {
    endpoint.trim().trim_end_matches('/').to_string()
}
