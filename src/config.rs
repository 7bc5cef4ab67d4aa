//! Process configuration from environment variables (optionally seeded from `.env`).

use sqlx::postgres::PgConnectOptions;
use std::env;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Same cap a stock JSON body parser applies: 100 KiB.
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Database coordinates. Unset fields fall back to the PostgreSQL client defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DbConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl DbConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        let mut opts = PgConnectOptions::new();
        if let Some(host) = &self.host {
            opts = opts.host(host);
        }
        if let Some(port) = self.port {
            opts = opts.port(port);
        }
        if let Some(user) = &self.user {
            opts = opts.username(user);
        }
        if let Some(password) = &self.password {
            opts = opts.password(password);
        }
        if let Some(database) = &self.database {
            opts = opts.database(database);
        }
        opts
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub db: DbConfig,
    pub host: String,
    pub port: u16,
    pub body_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let db = DbConfig {
            host: get("DB_HOST"),
            port: get("DB_PORT").map(|v| parse_var("DB_PORT", v)).transpose()?,
            user: get("DB_USER"),
            password: get("DB_PASSWORD"),
            database: get("DB_NAME"),
        };
        Ok(Config {
            db,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: get("PORT")
                .map(|v| parse_var("PORT", v))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),
            body_limit: get("BODY_LIMIT_BYTES")
                .map(|v| parse_var("BODY_LIMIT_BYTES", v))
                .transpose()?
                .unwrap_or(DEFAULT_BODY_LIMIT),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}
