//! Shared test helpers for `PostgreSQL` integration tests.

use crate::test_helpers::FixedClock;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::TestCluster;
use taskroster::task::{
    adapters::postgres::{
        PostgresAssignmentRepository, PostgresConfig, PostgresTaskRepository, TaskPgPool,
    },
    domain::{NewTask, ProjectId, TaskId, TaskPriority},
    ports::TaskRepository,
};
use tokio::runtime::Runtime;

/// SQL creating the task and assignment tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-19-000000_create_tasks_and_assignments/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "taskroster_test_template";

/// Pooled connections per test database; racing tests need more than one.
const POOL_SIZE: u32 = 4;

/// Creates a multi-threaded runtime for driving the async repositories.
#[must_use]
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error when the template cannot be created or migrated.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), eyre::Report> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_SCHEMA_SQL)
                .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|err| eyre::eyre!("template setup failed: {err}"))
}

/// Drops a test database when the owning test ends, even on panic.
struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(self.db_name.as_str()));
    }
}

/// A migrated database private to one test.
///
/// Field order matters: the pool closes its connections before the guard
/// drops the database.
pub struct TestDatabase {
    pub pool: TaskPgPool,
    _guard: CleanupGuard,
}

impl TestDatabase {
    /// Clones the template into a fresh database named after `label`.
    ///
    /// # Errors
    ///
    /// Returns an error when the template, the database or the pool cannot
    /// be set up.
    pub fn create(cluster: &'static TestCluster, label: &str) -> Result<Self, eyre::Report> {
        ensure_template(cluster)?;
        let db_name = format!("{label}_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
            .map_err(|err| eyre::eyre!("failed to create {db_name}: {err}"))?;
        let guard = CleanupGuard { cluster, db_name };

        let pool = PostgresConfig::new(cluster.connection().database_url(&guard.db_name))
            .with_max_connections(POOL_SIZE)
            .build_pool()?;
        Ok(Self {
            pool,
            _guard: guard,
        })
    }

    /// Returns a task repository over this database.
    #[must_use]
    pub fn tasks(&self) -> PostgresTaskRepository {
        PostgresTaskRepository::new(self.pool.clone())
    }

    /// Returns an assignment repository over this database.
    #[must_use]
    pub fn links(&self) -> PostgresAssignmentRepository {
        PostgresAssignmentRepository::new(self.pool.clone())
    }
}

/// Inserts a low-priority task so that links have a parent row.
///
/// # Errors
///
/// Returns an error when the insert fails.
pub async fn seed_task(
    repository: &PostgresTaskRepository,
    clock: &FixedClock,
    title: &str,
) -> Result<TaskId, eyre::Report> {
    let draft = NewTask::new(title, TaskPriority::Low, ProjectId::new(1)?, clock)?;
    Ok(repository.insert(&draft).await?.id())
}
