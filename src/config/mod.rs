use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::security_headers;

const DEFAULT_DATABASE_URL: &str = "sqlite://tickets.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub seed_sample_data: bool,
    pub admin_username: String,
    pub admin_password: String,
    pub session_ttl: Duration,
    pub allowed_origins: Vec<String>,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Invalid values fall back to
    /// their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS),
            bind_addr: parse_or("BIND_ADDR", &lookup, SocketAddr::from(([0, 0, 0, 0], 3001))),
            seed_sample_data: lookup("SEED_SAMPLE_DATA")
                .map(|v| parse_flag("SEED_SAMPLE_DATA", &v, true))
                .unwrap_or(true),
            admin_username: lookup("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
            admin_password: lookup("ADMIN_PASSWORD").unwrap_or_else(|| "admin123".to_string()),
            session_ttl: Duration::from_secs(parse_or(
                "SESSION_TTL_SECS",
                &lookup,
                DEFAULT_SESSION_TTL_SECS,
            )),
            allowed_origins: split_origins(
                &lookup("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            production: lookup("RUST_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        }
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Config: invalid {} '{}', using default", key, raw);
            default
        }),
        None => default,
    }
}

fn parse_flag(key: &str, raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!("Config: invalid {} '{}', using default", key, raw);
            default
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
