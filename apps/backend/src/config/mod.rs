//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_TURN_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub redis_url: String,
    pub jwt_secret: String,
    /// How long a seat may sit on its turn before the bot takes over.
    pub turn_timeout: Duration,
}

impl AppConfig {
    /// Load and validate configuration from environment variables.
    /// `REDIS_URL` and `JWT_SECRET` are required; the rest have defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got {raw}"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let redis_url = env::var("REDIS_URL")
            .map_err(|_| AppError::config("REDIS_URL must be set".to_string()))?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::config("JWT_SECRET must be set".to_string()))?;
        if jwt_secret.len() < 16 {
            return Err(AppError::config(
                "JWT_SECRET must be at least 16 bytes".to_string(),
            ));
        }

        let turn_timeout = match env::var("TURN_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    AppError::config(format!(
                        "TURN_TIMEOUT_SECS must be a number of seconds, got {raw}"
                    ))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TURN_TIMEOUT_SECS),
        };

        Ok(Self {
            host,
            port,
            redis_url,
            jwt_secret,
            turn_timeout,
        })
    }
}
