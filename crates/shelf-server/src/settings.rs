//! Server settings
//!
//! Loaded from process environment variables layered over defaults. Keys are
//! matched case-insensitively, so `FRONTEND_HOST` populates `frontend_host`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use config::builder::{ConfigBuilder, DefaultState};
use config::Config;
use rand::RngCore;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::warn;

/// Placeholder secret that must not reach a deployment
const PLACEHOLDER_SECRET: &str = "changethis";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid BACKEND_CORS_ORIGINS: {0}")]
    InvalidCors(String),

    #[error("The value of {0} is \"changethis\", for security, please change it, at least for deployments.")]
    PlaceholderSecret(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Staging,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub project_name: String,
    pub environment: Environment,
    pub secret_key: String,
    pub frontend_host: String,
    #[serde(default, deserialize_with = "deserialize_origins")]
    pub backend_cors_origins: Vec<String>,
    pub bind_address: String,
    pub database_path: String,
}

impl Settings {
    /// Load settings from the process environment
    pub fn load() -> Result<Self, SettingsError> {
        let config = Self::builder()?
            .add_source(config::Environment::default())
            .build()?;
        Self::from_config(config)
    }

    /// Builder pre-populated with every default
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        Ok(Config::builder()
            .set_default("project_name", "Shelf")?
            .set_default("environment", "local")?
            .set_default("secret_key", generate_secret())?
            .set_default("frontend_host", "http://localhost:5173")?
            .set_default("bind_address", "0.0.0.0:8000")?
            .set_default("database_path", "./data/shelf.db")?)
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.check_placeholder_secret("SECRET_KEY", &settings.secret_key)?;
        Ok(settings)
    }

    /// Backend origins without trailing slashes, followed by the frontend host
    pub fn all_cors_origins(&self) -> Vec<String> {
        self.backend_cors_origins
            .iter()
            .map(|origin| origin.trim_end_matches('/').to_string())
            .chain(std::iter::once(self.frontend_host.clone()))
            .collect()
    }

    fn check_placeholder_secret(&self, name: &'static str, value: &str) -> Result<(), SettingsError> {
        if value != PLACEHOLDER_SECRET {
            return Ok(());
        }
        if self.environment == Environment::Local {
            warn!("{}", SettingsError::PlaceholderSecret(name));
            Ok(())
        } else {
            Err(SettingsError::PlaceholderSecret(name))
        }
    }
}

/// Parse a CORS origin list given either as `a, b, c` or as a JSON array
pub fn parse_cors(raw: &str) -> Result<Vec<String>, SettingsError> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        return serde_json::from_str(raw).map_err(|e| SettingsError::InvalidCors(e.to_string()));
    }
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOrigins {
    List(Vec<String>),
    Text(String),
}

fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawOrigins::deserialize(deserializer)? {
        RawOrigins::List(origins) => Ok(origins),
        RawOrigins::Text(raw) => parse_cors(&raw).map_err(serde::de::Error::custom),
    }
}

/// 32 random bytes, URL-safe base64
fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
