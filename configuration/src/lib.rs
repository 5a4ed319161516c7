use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

mod logging;

pub use logging::setup_logging;

pub const CONFIG_PREFIX: &str = "VOICE_TRANSLATOR";
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub staging: StagingConfig,
    #[serde(default)]
    pub recognition: RecognitionConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Whole multipart body; must leave room above `max_upload_bytes`.
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StagingConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    #[serde(default = "default_recognition_url")]
    pub base_url: String,
    #[serde(default = "default_recognition_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Spoken-language hint; `"auto"` leaves detection to the recognizer.
    #[serde(default = "default_recognition_language")]
    pub language: String,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_translation_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_language_aliases")]
    pub language_aliases: HashMap<String, String>,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            max_request_bytes: default_max_request_bytes(),
            max_text_chars: default_max_text_chars(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            base_url: default_recognition_url(),
            model: default_recognition_model(),
            api_key: None,
            language: default_recognition_language(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: default_translation_url(),
            api_key: None,
            source_language: default_source_language(),
            language_aliases: default_language_aliases(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Reads `path`; a missing file yields the defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents, path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Applies `VOICE_TRANSLATOR_*` overrides resolved through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| {
            lookup(&format!("{CONFIG_PREFIX}_{suffix}")).filter(|value| !value.trim().is_empty())
        };

        if let Some(host) = var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("SERVER_PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: format!("{CONFIG_PREFIX}_SERVER_PORT"),
                message: format!("`{port}` is not a valid port"),
            })?;
        }
        if let Some(level) = var("LOGGING_LEVEL") {
            self.logging.level = level;
        }
        if let Some(origins) = var("CORS_ALLOWED_ORIGINS") {
            self.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(dir) = var("STAGING_DIR") {
            self.service.staging.dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = var("RECOGNITION_BASE_URL") {
            self.service.recognition.base_url = url;
        }
        if let Some(model) = var("RECOGNITION_MODEL") {
            self.service.recognition.model = model;
        }
        if let Some(language) = var("RECOGNITION_LANGUAGE") {
            self.service.recognition.language = language;
        }
        if let Some(key) = var("RECOGNITION_API_KEY") {
            self.service.recognition.api_key = Some(key);
        }
        if let Some(url) = var("TRANSLATION_BASE_URL") {
            self.service.translation.base_url = url;
        }
        if let Some(key) = var("TRANSLATION_API_KEY") {
            self.service.translation.api_key = Some(key);
        }
        Ok(())
    }
}

/// Loads the file named by `VOICE_TRANSLATOR_CONFIG` (default
/// `config/default.toml`), then applies environment overrides.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = std::env::var(format!("{CONFIG_PREFIX}_CONFIG"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = AppConfig::load_file(&path)?;
    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_request_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_max_text_chars() -> usize {
    5_000
}

fn default_upstream_timeout_ms() -> u64 {
    30_000
}

fn default_recognition_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_recognition_model() -> String {
    "whisper-1".to_string()
}

fn default_recognition_language() -> String {
    "en".to_string()
}

fn default_translation_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_language_aliases() -> HashMap<String, String> {
    HashMap::from([("zh-cn".to_string(), "zh".to_string())])
}

fn default_connect_timeout_ms() -> u64 {
    3_000
}

fn default_request_timeout_ms() -> u64 {
    30_000
}
