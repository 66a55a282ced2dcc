use std::env::VarError;
use std::str::FromStr;
use std::time::Duration;

use anyhow::anyhow;

pub const REQUIRED_VARIABLES: &[&str] = &["DATABASE_URL"];

const DEFAULT_LISTEN_PORT: u16 = 5000;
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_port: u16,
    pub query_timeout: Duration,
    pub max_connections: u32,
}

impl Config {
    pub fn env() -> anyhow::Result<Self> {
        Self::from_vars(|name| std::env::var(name))
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let listen_port = optional(&lookup, "LISTEN_PORT", DEFAULT_LISTEN_PORT)?;
        let timeout_secs = optional(&lookup, "QUERY_TIMEOUT_SECS", DEFAULT_QUERY_TIMEOUT_SECS)?;
        let max_connections = optional(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        if timeout_secs == 0 {
            return Err(anyhow!("QUERY_TIMEOUT_SECS must be greater than zero"));
        }
        if max_connections == 0 {
            return Err(anyhow!("DB_MAX_CONNECTIONS must be greater than zero"));
        }

        Ok(Self {
            database_url,
            listen_port,
            query_timeout: Duration::from_secs(timeout_secs),
            max_connections,
        })
    }

    pub fn log(&self) {
        log::info!("database_url: {}", self.database_url);
        log::info!("listen_port: {}", self.listen_port);
        log::info!("query_timeout: {}s", self.query_timeout.as_secs());
        log::info!("max_connections: {}", self.max_connections);
    }
}

fn required<F>(lookup: &F, name: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    lookup(name).map_err(|e| match e {
        VarError::NotPresent => anyhow!("{name} not set"),
        VarError::NotUnicode(_) => anyhow!("{name} value is not valid unicode"),
    })
}

fn optional<F, T>(lookup: &F, name: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow!("{name} has invalid value {value:?}: {e}")),
        Err(VarError::NotPresent) => Ok(default),
        Err(VarError::NotUnicode(_)) => Err(anyhow!("{name} value is not valid unicode")),
    }
}
