//! Shared world state for task assignment BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskroster::task::{
    adapters::memory::{InMemoryAssignmentRepository, InMemoryTaskRepository},
    domain::{Task, UserId},
    services::{AssignmentReconciler, TaskLifecycleError, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Reconciler type used by the BDD world.
pub type TestReconciler = AssignmentReconciler<InMemoryAssignmentRepository, DefaultClock>;

/// Scenario world for task assignment behaviour tests.
pub struct TaskAssignmentWorld {
    pub service: TestTaskService,
    pub reconciler: TestReconciler,
    pub current_task: Option<Task>,
    pub last_create_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskAssignmentWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            service: TaskLifecycleService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::clone(&clock),
            ),
            reconciler: AssignmentReconciler::new(
                Arc::new(InMemoryAssignmentRepository::new()),
                clock,
            ),
            current_task: None,
            last_create_result: None,
        }
    }

    /// Returns the task the scenario works on.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.current_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }
}

impl Default for TaskAssignmentWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskAssignmentWorld {
    TaskAssignmentWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a comma-separated list of user identifiers.
///
/// # Errors
///
/// Returns an error when an entry is not a positive integer.
pub fn parse_users(raw: &str) -> Result<Vec<UserId>, eyre::Report> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<UserId, eyre::Report> {
            Ok(UserId::new(entry.parse::<i64>()?)?)
        })
        .collect()
}
