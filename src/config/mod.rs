use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_SESSION_FILE: &str = ".cinema_session.json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_RUST_LOG: &str = "cinema_client=info";

/// Формат логов: человекочитаемый или JSON построчно.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("api_base_url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
    #[error("timeout_seconds must be greater than zero")]
    InvalidTimeout,
}

// Настройки клиента: откуда брать API, где хранить сессию, уровень логов
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub timeout_seconds: u64,
    pub rust_log: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Загружает конфигурацию: значения по умолчанию, затем `cinema.toml`
    /// (если есть), затем переменные окружения `CINEMA_*`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// То же самое, но с явным путём к файлу конфигурации.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("session_file", DEFAULT_SESSION_FILE)?
            .set_default("timeout_seconds", DEFAULT_TIMEOUT_SECONDS)?
            .set_default("rust_log", DEFAULT_RUST_LOG)?
            .set_default("log_format", "text")?;

        builder = match file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name("cinema").required(false)),
        };

        let settings = builder
            .add_source(config::Environment::with_prefix("CINEMA"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validated()
    }

    /// Переопределение базового URL (например, из аргумента командной строки).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.api_base_url = base_url.into();
        self.validated()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        let url = self.api_base_url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        self.api_base_url = url;
        Ok(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            rust_log: DEFAULT_RUST_LOG.to_string(),
            log_format: LogFormat::Text,
        }
    }
}
