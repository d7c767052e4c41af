use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};
use url::Url;

use crate::constants::{DEFAULT_SESSION_TTL_DAYS, DEFAULT_THEME_TTL_DAYS};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Humantime duration, e.g. `30s` or `1m 30s`.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,

    #[serde(default = "default_session_ttl")]
    pub session_ttl_days: i64,

    #[serde(default = "default_theme_ttl")]
    pub theme_ttl_days: i64,

    #[serde(default)]
    pub log_json: bool,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_storage_path() -> PathBuf {
    PathBuf::from(".ulink/state.json")
}
fn default_request_timeout() -> String {
    "30s".to_string()
}
fn default_session_ttl() -> i64 {
    DEFAULT_SESSION_TTL_DAYS
}
fn default_theme_ttl() -> i64 {
    DEFAULT_THEME_TTL_DAYS
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            api_base_url: default_api_base_url(),
            storage_path: default_storage_path(),
            request_timeout: default_request_timeout(),
            session_ttl_days: default_session_ttl(),
            theme_ttl_days: default_theme_ttl(),
            log_json: false,
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.env = env_name;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if Url::parse(&self.api_base_url).is_err() {
            errors.push(format!("API_BASE_URL is not a valid URL: {}", self.api_base_url));
        }
        if humantime::parse_duration(&self.request_timeout).is_err() {
            errors.push(format!("REQUEST_TIMEOUT is not a valid duration: {}", self.request_timeout));
        }
        if self.session_ttl_days <= 0 {
            errors.push("SESSION_TTL_DAYS must be positive".to_string());
        }
        if self.theme_ttl_days <= 0 {
            errors.push("THEME_TTL_DAYS must be positive".to_string());
        }
        if self.storage_path.as_os_str().is_empty() {
            errors.push("STORAGE_PATH cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api_base_url)
            .map_err(|e| ConfigError::Message(format!("Invalid API_BASE_URL: {}", e)))
    }

    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(&self.request_timeout)
            .map_err(|e| ConfigError::Message(format!("Invalid REQUEST_TIMEOUT: {}", e)))
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.session_ttl_days)
    }

    pub fn theme_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.theme_ttl_days)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout().unwrap(), Duration::from_secs(30));
        assert_eq!(config.session_ttl(), chrono::Duration::days(7));
        assert_eq!(config.theme_ttl(), chrono::Duration::days(365));
    }

    #[test]
    fn validate_collects_every_problem() {
        let config = AppConfig {
            api_base_url: "not a url".into(),
            request_timeout: "soon".into(),
            session_ttl_days: 0,
            ..AppConfig::default()
        };

        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("API_BASE_URL"));
        assert!(message.contains("REQUEST_TIMEOUT"));
        assert!(message.contains("SESSION_TTL_DAYS"));
    }

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!(AppEnvironment::from_str("Production").unwrap(), AppEnvironment::Production);
        assert!(AppEnvironment::from_str("staging").is_err());
    }
}
