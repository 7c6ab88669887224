//! Connection settings and pool construction for the `PostgreSQL` adapters.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool shared by the task and assignment adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Errors raised while loading settings or opening the pool.
#[derive(Debug, Error)]
pub enum PostgresConfigError {
    /// No database URL was configured.
    #[error("missing database URL; set {}", PostgresConfig::DATABASE_URL_ENV)]
    MissingDatabaseUrl,

    /// The pool size is not a positive integer.
    #[error("invalid pool size '{0}', expected a positive integer")]
    InvalidPoolSize(String),

    /// The pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

/// Connection settings for the `PostgreSQL` adapters.
///
/// The pool is built once at process start and cloned into each
/// repository.
///
/// # Examples
///
/// ```
/// use taskroster::task::adapters::postgres::PostgresConfig;
///
/// let config = PostgresConfig::from_lookup(|key| match key {
///     "TASKROSTER_DATABASE_URL" => Some("postgres://localhost/tasks".to_owned()),
///     "TASKROSTER_DB_POOL_SIZE" => Some("4".to_owned()),
///     _ => None,
/// })
/// .expect("valid settings");
/// assert_eq!(config.max_connections, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    /// Connection URL, for example `postgres://user@host/db`.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl PostgresConfig {
    /// Environment variable holding the database URL.
    pub const DATABASE_URL_ENV: &'static str = "TASKROSTER_DATABASE_URL";
    /// Environment variable holding the pool size.
    pub const POOL_SIZE_ENV: &'static str = "TASKROSTER_DB_POOL_SIZE";
    /// Pool size used when none is configured.
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;

    /// Creates settings with the default pool size.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Replaces the pool size.
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`PostgresConfig::from_lookup`].
    pub fn from_env() -> Result<Self, PostgresConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`PostgresConfigError::MissingDatabaseUrl`] when the URL is
    /// absent or blank, and [`PostgresConfigError::InvalidPoolSize`] when the
    /// pool size is present but not a positive integer.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, PostgresConfigError> {
        let database_url = lookup(Self::DATABASE_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .ok_or(PostgresConfigError::MissingDatabaseUrl)?;

        let max_connections = match lookup(Self::POOL_SIZE_ENV) {
            None => Self::DEFAULT_MAX_CONNECTIONS,
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(PostgresConfigError::InvalidPoolSize(raw))?,
        };

        Ok(Self {
            database_url: database_url.trim().to_owned(),
            max_connections,
        })
    }

    /// Opens a connection pool with these settings.
    ///
    /// # Errors
    ///
    /// Returns [`PostgresConfigError::Pool`] when the pool cannot reach the
    /// database.
    pub fn build_pool(&self) -> Result<TaskPgPool, PostgresConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(&self.database_url);
        let pool = Pool::builder()
            .max_size(self.max_connections)
            .build(manager)?;
        Ok(pool)
    }
}
