//! Shared fixtures for in-memory integration tests.

use crate::test_helpers::FixedClock;
use rstest::fixture;
use std::sync::Arc;
use taskroster::task::{
    adapters::memory::{InMemoryAssignmentRepository, InMemoryTaskRepository},
    domain::TaskId,
    services::{AssignmentReconciler, CreateTaskRequest, TaskLifecycleService},
};

/// Task service backed by the in-memory store.
pub type MemoryTaskService = TaskLifecycleService<InMemoryTaskRepository, FixedClock>;

/// Reconciler backed by the in-memory link store.
pub type MemoryReconciler = AssignmentReconciler<InMemoryAssignmentRepository, FixedClock>;

/// Services sharing one clock and one pair of stores.
pub struct Roster {
    pub tasks: MemoryTaskService,
    pub reconciler: MemoryReconciler,
    pub links: Arc<InMemoryAssignmentRepository>,
    pub clock: Arc<FixedClock>,
}

/// Provides fresh stores and services for each test.
#[fixture]
pub fn roster() -> Roster {
    let clock = Arc::new(FixedClock::default());
    let links = Arc::new(InMemoryAssignmentRepository::new());
    Roster {
        tasks: TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&clock),
        ),
        reconciler: AssignmentReconciler::new(Arc::clone(&links), Arc::clone(&clock)),
        links,
        clock,
    }
}

/// Creates a medium-priority task and returns its identifier.
///
/// # Errors
///
/// Returns an error when the service rejects the task.
pub async fn create_task(
    roster: &Roster,
    title: &str,
    project_id: i64,
) -> Result<TaskId, eyre::Report> {
    let task = roster
        .tasks
        .create(CreateTaskRequest::new(title, "Medium", project_id))
        .await?;
    Ok(task.id())
}
