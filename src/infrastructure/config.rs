use serde::{Deserialize, Deserializer};
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::domain::policy::{CoordinatePolicy, WarehouseQueryMode};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub hasura: HasuraConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default, deserialize_with = "deserialize_origins")]
    pub cors_origins: Vec<String>,
}

#[derive(Deserialize, Clone)]
pub struct HasuraConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub admin_secret: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct PolicyConfig {
    #[serde(default)]
    pub market_coordinates: CoordinatePolicy,
    #[serde(default)]
    pub warehouse_query: WarehouseQueryMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for HasuraConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            admin_secret: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl HasuraConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl fmt::Debug for HasuraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HasuraConfig")
            .field("url", &self.url)
            .field("admin_secret", &"[REDACTED]")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("RELAY").separator("__"));
        let cfg = builder.build()?;
        let mut config: Config = cfg.try_deserialize()?;

        if config.hasura.url.trim().is_empty() {
            config.hasura.url = env_fallback(
                &["RELAY__HASURA__URL", "HASURA_URL"],
                "Missing Hasura URL. Set RELAY__HASURA__URL or HASURA_URL.",
            )?;
        }

        if config.hasura.admin_secret.trim().is_empty() {
            config.hasura.admin_secret = env_fallback(
                &["RELAY__HASURA__ADMIN_SECRET", "HASURA_ADMIN_SECRET"],
                "Missing Hasura admin secret. Set RELAY__HASURA__ADMIN_SECRET or HASURA_ADMIN_SECRET.",
            )?;
        }

        if env::var("RELAY__APP__PORT").is_err() {
            if let Ok(port) = env::var("PORT") {
                if !port.trim().is_empty() {
                    config.app.port = port.trim().parse().map_err(|_| {
                        config::ConfigError::Message(format!("Invalid PORT value: {port}"))
                    })?;
                }
            }
        }

        Url::parse(config.hasura.url.trim()).map_err(|err| {
            config::ConfigError::Message(format!(
                "Invalid Hasura URL {}: {err}",
                config.hasura.url
            ))
        })?;

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn env_fallback(keys: &[&str], missing: &str) -> Result<String, config::ConfigError> {
    keys.iter()
        .find_map(|key| match env::var(key) {
            Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
            _ => None,
        })
        .ok_or_else(|| config::ConfigError::Message(missing.into()))
}

/// Accepts a list from config files or a comma-separated string from the environment.
fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Origins {
        List(Vec<String>),
        Csv(String),
    }

    let origins = match Origins::deserialize(deserializer)? {
        Origins::List(list) => list,
        Origins::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };

    Ok(origins
        .into_iter()
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_timeout_seconds() -> u64 {
    30
}
