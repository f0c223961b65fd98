use std::env;
use std::path::PathBuf;

use http::HeaderValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// The single browser origin allowed by CORS, pre-validated as a header value.
    pub allowed_origin: HeaderValue,
    pub cases_path: PathBuf,
    pub last_check_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = value_or_default(&lookup, "SPISOVKA_API_BIND_ADDR", "127.0.0.1:8080");

        let origin = value_or_default(&lookup, "SPISOVKA_ALLOWED_ORIGIN", "http://localhost:5173");
        if !is_http_url(&origin) {
            return Err(ConfigError::Invalid(
                "SPISOVKA_ALLOWED_ORIGIN must start with http:// or https://".to_string(),
            ));
        }
        let allowed_origin = HeaderValue::from_str(trim_trailing(&origin)).map_err(|_| {
            ConfigError::Invalid("SPISOVKA_ALLOWED_ORIGIN is not a valid header value".to_string())
        })?;

        let data_dir = PathBuf::from(value_or_default(&lookup, "SPISOVKA_DATA_DIR", "."));

        Ok(Self {
            bind_addr,
            allowed_origin,
            cases_path: data_dir.join("cases.json"),
            last_check_path: data_dir.join("last_check.json"),
        })
    }
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn trim_trailing(value: &str) -> &str {
    value.trim_end_matches('/')
}
