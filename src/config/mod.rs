mod cors;
mod server;
mod url;

pub use cors::CorsConfig;
pub use server::ServerConfig;
pub use url::UrlConfig;

use crate::error::{AppError, AppResult};
use crate::models::ExpiryToken;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub url: UrlConfig,
    pub cors: CorsConfig,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_var(&lookup, "SERVER_PORT", 3000)?;
        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| "dist/public".to_string());
        let max_body_bytes = parse_var(&lookup, "MAX_BODY_BYTES", 64 * 1024)?;

        let short_code_length = parse_var(&lookup, "SHORT_CODE_LENGTH", 8)?;
        let short_code_max_attempts = parse_var(&lookup, "SHORT_CODE_MAX_ATTEMPTS", 10)?;
        let strict_url_validation = parse_var(&lookup, "STRICT_URL_VALIDATION", true)?;
        let default_expiry = match lookup("DEFAULT_EXPIRY") {
            Some(raw) => ExpiryToken::from_str(raw.trim())
                .map_err(|_| AppError::Configuration("Invalid DEFAULT_EXPIRY".to_string()))?,
            None => ExpiryToken::default(),
        };
        let public_domains = lookup("PUBLIC_DOMAINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        // CORS config
        let allowed_origins =
            CorsConfig::parse_origins(&lookup("ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string()));

        let config = Config {
            server: ServerConfig {
                host,
                port,
                static_dir,
                max_body_bytes,
            },
            url: UrlConfig {
                short_code_length,
                short_code_max_attempts,
                public_domains,
                default_expiry,
                strict_url_validation,
            },
            cors: CorsConfig { allowed_origins },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> AppResult<()> {
        self.server.validate().map_err(AppError::Configuration)?;
        self.url.validate().map_err(AppError::Configuration)?;

        if self.cors.allowed_origins.is_empty() {
            return Err(AppError::Configuration(
                "ALLOWED_ORIGINS must list at least one origin".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}
