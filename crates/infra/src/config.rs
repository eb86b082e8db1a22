//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::str::FromStr;

use chrono::Duration;
use sqlx::mysql::MySqlConnectOptions;
use thiserror::Error;

use ballotgate_auth::Password;
use ballotgate_core::VoterId;
use ballotgate_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:8080,http://127.0.0.1:8080";
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = ballotgate_auth::token::DEFAULT_TTL_MINUTES;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Where voter records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// Dev/test mode; everything is lost on exit.
    InMemory,
    /// `DATABASE_URL`.
    Url { url: String, max_connections: u32 },
    /// Assembled from `MYSQL_*` parts.
    Parts {
        user: String,
        password: String,
        host: String,
        port: Option<u16>,
        database: String,
        max_connections: u32,
    },
}

impl DatabaseConfig {
    /// Connect options for the MySQL store, or `None` for the in-memory store.
    pub fn mysql_options(&self) -> Result<Option<(MySqlConnectOptions, u32)>, ConfigError> {
        match self {
            Self::InMemory => Ok(None),
            Self::Url { url, max_connections } => {
                let opts = MySqlConnectOptions::from_str(url)
                    .map_err(|e| ConfigError::invalid("DATABASE_URL", e.to_string()))?;
                Ok(Some((opts, *max_connections)))
            }
            Self::Parts {
                user,
                password,
                host,
                port,
                database,
                max_connections,
            } => {
                let mut opts = MySqlConnectOptions::new()
                    .host(host)
                    .username(user)
                    .password(password)
                    .database(database);
                if let Some(port) = port {
                    opts = opts.port(*port);
                }
                Ok(Some((opts, *max_connections)))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapAdmin {
    pub voter_id: VoterId,
    pub password: Password,
}

#[derive(Clone)]
pub struct AppConfig {
    /// Process-wide token signing secret.
    pub secret_key: String,
    pub database: DatabaseConfig,
    pub token_ttl: Duration,
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<String>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
    pub log_format: LogFormat,
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("secret_key", &"***")
            .field("database", &self.database_kind())
            .field("token_ttl", &self.token_ttl)
            .field("bind_addr", &self.bind_addr)
            .field("allowed_origins", &self.allowed_origins)
            .field("bootstrap_admin", &self.bootstrap_admin.as_ref().map(|b| &b.voter_id))
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret_key = get("SECRET_KEY").ok_or(ConfigError::Missing("SECRET_KEY"))?;

        let log_format = match get("LOG_FORMAT") {
            Some(v) => v
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid("LOG_FORMAT", e.to_string()))?,
            None => LogFormat::default(),
        };

        let token_ttl_minutes = match get("TOKEN_TTL_MINUTES") {
            Some(v) => {
                let minutes: i64 = v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::invalid("TOKEN_TTL_MINUTES", "not an integer"))?;
                if minutes <= 0 {
                    return Err(ConfigError::invalid("TOKEN_TTL_MINUTES", "must be positive"));
                }
                minutes
            }
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };
        let token_ttl = Duration::try_minutes(token_ttl_minutes)
            .ok_or_else(|| ConfigError::invalid("TOKEN_TTL_MINUTES", "too large"))?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid("BIND_ADDR", "expected host:port"))?;

        let allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::invalid("DATABASE_MAX_CONNECTIONS", "must be a positive integer"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let database = database_from(&get, max_connections)?;

        let bootstrap_admin = match (get("BOOTSTRAP_ADMIN_ID"), get("BOOTSTRAP_ADMIN_PASSWORD")) {
            (Some(id), Some(password)) => Some(BootstrapAdmin {
                voter_id: VoterId::parse(id)
                    .map_err(|e| ConfigError::invalid("BOOTSTRAP_ADMIN_ID", e.to_string()))?,
                password: Password::new(password),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("BOOTSTRAP_ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("BOOTSTRAP_ADMIN_ID")),
        };

        Ok(Self {
            secret_key,
            database,
            token_ttl,
            bind_addr,
            allowed_origins,
            bootstrap_admin,
            log_format,
        })
    }

    fn database_kind(&self) -> &'static str {
        match self.database {
            DatabaseConfig::InMemory => "in-memory",
            DatabaseConfig::Url { .. } | DatabaseConfig::Parts { .. } => "mysql",
        }
    }
}

fn database_from<G>(get: &G, max_connections: u32) -> Result<DatabaseConfig, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    if let Some(url) = get("DATABASE_URL") {
        return Ok(DatabaseConfig::Url { url, max_connections });
    }

    let parts = [
        get("MYSQL_USER"),
        get("MYSQL_PASSWORD"),
        get("MYSQL_HOST"),
        get("MYSQL_DB"),
    ];
    if parts.iter().all(Option::is_none) {
        return Ok(DatabaseConfig::InMemory);
    }

    let [user, password, host, database] = parts;
    let user = user.ok_or(ConfigError::Missing("MYSQL_USER"))?;
    // An empty MySQL password is legitimate, so only the key's absence matters
    // once the other parts are present.
    let password = password.unwrap_or_default();
    let host = host.ok_or(ConfigError::Missing("MYSQL_HOST"))?;
    let database = database.ok_or(ConfigError::Missing("MYSQL_DB"))?;

    let (host, port) = match host.rsplit_once(':') {
        Some((h, p)) => {
            let port = p
                .parse::<u16>()
                .map_err(|_| ConfigError::invalid("MYSQL_HOST", "port must be a number"))?;
            (h.to_string(), Some(port))
        }
        None => (host, None),
    };

    Ok(DatabaseConfig::Parts {
        user,
        password,
        host,
        port,
        database,
        max_connections,
    })
}
