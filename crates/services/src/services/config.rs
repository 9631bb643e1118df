use std::env;
use std::str::FromStr;

use tracing::warn;

/// Runtime configuration, read from the environment (after `dotenvy` has
/// loaded any `.env` file in the binary).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub session_ttl_minutes: i64,
    /// Image-count bounds enforced when creating or updating a property.
    pub property_min_images: usize,
    pub property_max_images: usize,
    pub imagekit: ImageKitConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ImageKitConfig {
    pub public_key: Option<String>,
    /// Trusted backend endpoint returning `{signature, expire, token}`.
    pub auth_endpoint: Option<String>,
    /// Bearer credential sent to the auth endpoint.
    pub auth_bearer: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "127.0.0.1"),
            port: env_parse("PORT", 3001),
            database_url: env_or("DATABASE_URL", "sqlite:selectx.db"),
            session_ttl_minutes: env_parse("SESSION_TTL_MINUTES", 480),
            property_min_images: env_parse("PROPERTY_MIN_IMAGES", 0),
            property_max_images: env_parse("PROPERTY_MAX_IMAGES", 20),
            imagekit: ImageKitConfig {
                public_key: env::var("IMAGEKIT_PUBLIC_KEY").ok(),
                auth_endpoint: env::var("IMAGEKIT_AUTH_ENDPOINT").ok(),
                auth_bearer: env::var("IMAGEKIT_AUTH_BEARER").ok(),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("invalid value for {key}: {raw:?}, using default");
            default
        }),
        Err(_) => default,
    }
}
