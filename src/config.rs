use std::env;

use crate::error::AppError;

/// Which store backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL through `sqlx`; requires `DATABASE_URL`.
    Postgres,
    /// Process-local maps. Data is lost on restart.
    Memory,
}

/// Runtime configuration, read once at startup.
///
/// The JWT secret loaded here is the process-wide signing key. It is never changed while
/// the server runs; restarting with a different secret invalidates every issued token.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub store_backend: StoreBackend,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub jwt_expires_in_secs: i64,
    pub bcrypt_cost: u32,
}

pub const DEFAULT_JWT_EXPIRES_IN_SECS: i64 = 60 * 60 * 24;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
/// Ten years.
const MAX_JWT_EXPIRES_IN_SECS: i64 = 60 * 60 * 24 * 365 * 10;

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "STORE_BACKEND must be 'postgres' or 'memory', got '{}'",
                    other
                )))
            }
        };

        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(AppError::Config("DATABASE_URL must be set".into()));
        }

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| AppError::Config("JWT_SECRET must be set".into()))?;

        let server_port = parse_or(&lookup, "SERVER_PORT", 8080)?;
        let jwt_expires_in_secs =
            parse_or(&lookup, "JWT_EXPIRES_IN_SECS", DEFAULT_JWT_EXPIRES_IN_SECS)?;
        if !(1..=MAX_JWT_EXPIRES_IN_SECS).contains(&jwt_expires_in_secs) {
            return Err(AppError::Config(format!(
                "JWT_EXPIRES_IN_SECS must be between 1 and {}",
                MAX_JWT_EXPIRES_IN_SECS
            )));
        }

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::Config("BCRYPT_COST must be between 4 and 31".into()));
        }

        Ok(Self {
            database_url,
            store_backend,
            server_port,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret,
            jwt_expires_in_secs,
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number", key))),
        None => Ok(default),
    }
}
