//! Repository port for task-to-user assignment links.

use crate::task::domain::{AssignmentPlan, AssignmentTarget, TaskId, TaskUserLink, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for assignment repository operations.
pub type AssignmentRepositoryResult<T> = Result<T, AssignmentRepositoryError>;

/// Link persistence contract.
///
/// Implementations own the `(task, user)` natural key: at most one row per
/// pair, never physically deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Returns the active links of a task in no particular order.
    async fn find_active_by_task(
        &self,
        task_id: TaskId,
    ) -> AssignmentRepositoryResult<Vec<TaskUserLink>>;

    /// Returns every link row of a task, active or historical.
    async fn find_all_by_task(
        &self,
        task_id: TaskId,
    ) -> AssignmentRepositoryResult<Vec<TaskUserLink>>;

    /// Returns the distinct tasks on which the user holds an active link.
    async fn find_active_task_ids_by_user(
        &self,
        user_id: UserId,
    ) -> AssignmentRepositoryResult<Vec<TaskId>>;

    /// Converges the active links of `task_id` onto `target`.
    ///
    /// Active rows outside the target are deactivated with their timestamp
    /// untouched. Every target user ends with an active row stamped
    /// `assigned_at`, reusing an existing row when one exists.
    ///
    /// The whole reconciliation is one atomic unit: on error no row has
    /// changed. Calls for the same task are serialised; calls for different
    /// tasks may proceed concurrently.
    ///
    /// Returns the plan that was applied.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentRepositoryError::Persistence`] when the store
    /// fails.
    async fn reconcile_links(
        &self,
        task_id: TaskId,
        target: &AssignmentTarget,
        assigned_at: DateTime<Utc>,
    ) -> AssignmentRepositoryResult<AssignmentPlan>;
}

/// Errors returned by assignment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AssignmentRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssignmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
