//! Runtime configuration for task list sessions.
//!
//! Settings are read from environment variables:
//!
//! - `TASKLIST_DATABASE_URL`: `PostgreSQL` connection URL. When unset the
//!   session runs against the in-memory store.
//! - `TASKLIST_POOL_MAX_SIZE`: maximum pooled connections (default 4).
//! - `TASKLIST_CLEAR_POLICY`: `pessimistic` (default) or `optimistic`.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "TASKLIST_DATABASE_URL";
/// Environment variable holding the maximum pool size.
pub const POOL_MAX_SIZE_VAR: &str = "TASKLIST_POOL_MAX_SIZE";
/// Environment variable holding the clear-completed policy.
pub const CLEAR_POLICY_VAR: &str = "TASKLIST_CLEAR_POLICY";

const DEFAULT_POOL_MAX_SIZE: u32 = 4;
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// How `clear_completed` treats the local list when the store call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ClearCompletedPolicy {
    /// Drop completed todos locally only after the store confirms.
    #[default]
    Pessimistic,
    /// Drop completed todos locally whatever the store returns.
    Optimistic,
}

impl ClearCompletedPolicy {
    /// Returns the canonical configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pessimistic => "pessimistic",
            Self::Optimistic => "optimistic",
        }
    }
}

impl TryFrom<&str> for ClearCompletedPolicy {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pessimistic" => Ok(Self::Pessimistic),
            "optimistic" => Ok(Self::Optimistic),
            _ => Err(ConfigError::InvalidClearPolicy(value.to_owned())),
        }
    }
}

impl fmt::Display for ClearCompletedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The clear policy is not recognised.
    #[error("invalid clear policy '{0}', expected pessimistic or optimistic")]
    InvalidClearPolicy(String),

    /// The pool size is not a positive integer.
    #[error("invalid pool size '{0}', expected a positive integer")]
    InvalidPoolSize(String),

    /// The database URL is set but blank.
    #[error("database URL must not be empty")]
    EmptyDatabaseUrl,
}

/// Connection settings for the `PostgreSQL` store.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    url: String,
    pool_max_size: u32,
    connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates database settings with the default pool size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyDatabaseUrl`] when the URL is blank.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }
        Ok(Self {
            url: trimmed.to_owned(),
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        })
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_pool_max_size(mut self, pool_max_size: u32) -> Self {
        self.pool_max_size = pool_max_size;
        self
    }

    /// Sets how long building the pool waits for its first connections.
    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the maximum pool size.
    #[must_use]
    pub const fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Returns the pool connection timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Connection URLs may carry credentials.
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("pool_max_size", &self.pool_max_size)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Settings for a task list session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListConfig {
    clear_policy: ClearCompletedPolicy,
    database: Option<DatabaseConfig>,
}

impl TaskListConfig {
    /// Creates the default configuration: pessimistic clearing and no
    /// database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let clear_policy = lookup(CLEAR_POLICY_VAR)
            .map(|value| ClearCompletedPolicy::try_from(value.as_str()))
            .transpose()?
            .unwrap_or_default();

        let database = match lookup(DATABASE_URL_VAR) {
            Some(url) => {
                let pool_max_size = lookup(POOL_MAX_SIZE_VAR)
                    .map(|value| parse_pool_size(&value))
                    .transpose()?
                    .unwrap_or(DEFAULT_POOL_MAX_SIZE);
                Some(DatabaseConfig::new(url)?.with_pool_max_size(pool_max_size))
            }
            None => None,
        };

        Ok(Self {
            clear_policy,
            database,
        })
    }

    /// Sets the clear-completed policy.
    #[must_use]
    pub const fn with_clear_policy(mut self, clear_policy: ClearCompletedPolicy) -> Self {
        self.clear_policy = clear_policy;
        self
    }

    /// Sets the database settings.
    #[must_use]
    pub fn with_database(mut self, database: DatabaseConfig) -> Self {
        self.database = Some(database);
        self
    }

    /// Returns the clear-completed policy.
    #[must_use]
    pub const fn clear_policy(&self) -> ClearCompletedPolicy {
        self.clear_policy
    }

    /// Returns the database settings, if a database is configured.
    #[must_use]
    pub const fn database(&self) -> Option<&DatabaseConfig> {
        self.database.as_ref()
    }
}

fn parse_pool_size(value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidPoolSize(value.to_owned())),
    }
}
