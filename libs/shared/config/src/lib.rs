use std::env;
use tracing::warn;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://clinic.db?mode=rwc";
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60 * 24;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_URL not set, using {}", DEFAULT_DATABASE_URL);
                    DEFAULT_DATABASE_URL.to_string()
                }),
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            token_ttl_minutes: parse_or("TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES),
            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    /// Tokens cannot be signed without a secret.
    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty() && !self.database_url.is_empty()
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
