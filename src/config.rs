use std::{net::SocketAddr, time::Duration};
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://catalog.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_BOT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Process-wide settings, loaded once at start and never mutated.
#[derive(Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub bot_api_url: String,
    pub upstream_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bot_token = std::env::var("BOT_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::Missing("BOT_TOKEN"))?;

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let bot_api_url = std::env::var("BOT_API_URL")
            .unwrap_or_else(|_| DEFAULT_BOT_API_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();

        let upstream_timeout = match std::env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "UPSTREAM_TIMEOUT_SECS",
                value: value.clone(),
            })?,
            Err(_) => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(AppConfig {
            bot_token,
            database_url,
            bind_addr,
            bot_api_url,
            upstream_timeout: Duration::from_secs(upstream_timeout),
        })
    }
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bot_token", &"<redacted>")
            .field("database_url", &self.database_url)
            .field("bind_addr", &self.bind_addr)
            .field("bot_api_url", &self.bot_api_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}
