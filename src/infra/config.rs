//! Centralized configuration (environment variables + defaults).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_INDEX_NAME: &str = "index.html";
const DEFAULT_UPLOAD_DIR: &str = "public/images";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_UPLOAD_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("DATABASE_URL must be set when CATALOG_BACKEND=postgres")]
    MissingDatabaseUrl,
}

/// Which catalog backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            other => Err(format!("unknown backend '{}' (expected memory or postgres)", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub index_file: PathBuf,
    /// Must exist before startup; uploads are never written anywhere else.
    pub upload_dir: PathBuf,
    pub backend: StoreBackend,
    /// Connection string for the postgres backend. Never logged.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Seed the in-memory backend with the fixture houses.
    pub seed_fixtures: bool,
    pub backend_timeout: Duration,
    pub upload_timeout: Duration,
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Reads the process environment (after loading `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = parse_or(&lookup, "CATALOG_BACKEND", StoreBackend::Memory)?;
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        if backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let static_dir = path_or(&lookup, "STATIC_DIR", DEFAULT_STATIC_DIR);
        // Without INDEX_FILE the entry document lives inside the static directory.
        let index_file = lookup("INDEX_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| static_dir.join(DEFAULT_INDEX_NAME));

        Ok(Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", default_bind_addr())?,
            static_dir,
            index_file,
            upload_dir: path_or(&lookup, "UPLOAD_DIR", DEFAULT_UPLOAD_DIR),
            backend,
            database_url,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?
                .max(1),
            seed_fixtures: parse_bool_or(&lookup, "SEED_FIXTURES", true)?,
            backend_timeout: Duration::from_millis(parse_or(
                &lookup,
                "BACKEND_TIMEOUT_MS",
                DEFAULT_BACKEND_TIMEOUT_MS,
            )?),
            upload_timeout: Duration::from_millis(parse_or(
                &lookup,
                "UPLOAD_TIMEOUT_MS",
                DEFAULT_UPLOAD_TIMEOUT_MS,
            )?),
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3001))
}

fn path_or<F>(lookup: &F, name: &str, default: &str) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn parse_bool_or<F>(lookup: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).map(|v| v.trim().to_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                name,
                value: v.clone(),
                reason: "expected a boolean".to_string(),
            }),
        },
    }
}
