//! Service layer for converging task assignments onto a target user set.

use crate::task::{
    domain::{AssignmentTarget, TaskId, TaskUserLink, UserId},
    ports::{AssignmentRepository, AssignmentRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for assignment operations.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// The link store rejected a reconciliation. No link changed.
    #[error("failed to reconcile assignments for task {task_id}: {source}")]
    Reconcile {
        /// Task whose links were being reconciled.
        task_id: TaskId,
        /// Underlying store failure.
        #[source]
        source: AssignmentRepositoryError,
    },
    /// Reading the links of a task failed.
    #[error("failed to read assignments of task {task_id}: {source}")]
    TaskLinks {
        /// Task whose links were being read.
        task_id: TaskId,
        /// Underlying store failure.
        #[source]
        source: AssignmentRepositoryError,
    },
    /// Reading the tasks assigned to a user failed.
    #[error("failed to read assignments of user {user_id}: {source}")]
    UserLinks {
        /// User whose assignments were being read.
        user_id: UserId,
        /// Underlying store failure.
        #[source]
        source: AssignmentRepositoryError,
    },
}

/// Result type for assignment service operations.
pub type AssignmentResult<T> = Result<T, AssignmentError>;

/// Keeps the active links of a task equal to a caller-supplied user set.
///
/// The reconciler does not check that the task exists and never touches task
/// rows. Atomicity and per-task ordering are guaranteed by the link store.
#[derive(Clone)]
pub struct AssignmentReconciler<L, C>
where
    L: AssignmentRepository,
    C: Clock + Send + Sync,
{
    links: Arc<L>,
    clock: Arc<C>,
}

impl<L, C> AssignmentReconciler<L, C>
where
    L: AssignmentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new reconciler.
    #[must_use]
    pub const fn new(links: Arc<L>, clock: Arc<C>) -> Self {
        Self { links, clock }
    }

    /// Makes the active users of `task_id` exactly `user_ids`.
    ///
    /// Duplicate identifiers collapse and an empty input unassigns everyone.
    /// Users that stay or become assigned get a fresh assignment time; users
    /// that drop out keep their row as inactive history. Repeating a call
    /// with the same users only refreshes timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::Reconcile`] when the link store fails, in
    /// which case nothing was applied.
    pub async fn reconcile(
        &self,
        task_id: TaskId,
        user_ids: impl IntoIterator<Item = UserId>,
    ) -> AssignmentResult<()> {
        let target: AssignmentTarget = user_ids.into_iter().collect();
        let assigned_at = self.clock.utc();

        let plan = self
            .links
            .reconcile_links(task_id, &target, assigned_at)
            .await
            .map_err(|source| AssignmentError::Reconcile { task_id, source })?;

        tracing::debug!(
            task_id = %task_id,
            target = target.len(),
            deactivated = plan.deactivate().len(),
            reactivated = plan.reactivate().len(),
            refreshed = plan.refresh().len(),
            inserted = plan.insert().len(),
            "assignments reconciled"
        );
        if plan.changes_active_set() {
            tracing::info!(task_id = %task_id, assignees = target.len(), "task assignees changed");
        }
        Ok(())
    }

    /// Returns the active links of a task.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::TaskLinks`] when the lookup fails.
    pub async fn active_links_for_task(
        &self,
        task_id: TaskId,
    ) -> AssignmentResult<Vec<TaskUserLink>> {
        self.links
            .find_active_by_task(task_id)
            .await
            .map_err(|source| AssignmentError::TaskLinks { task_id, source })
    }

    /// Returns the tasks on which the user is currently assigned.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::UserLinks`] when the lookup fails.
    pub async fn active_task_ids_for_user(
        &self,
        user_id: UserId,
    ) -> AssignmentResult<Vec<TaskId>> {
        self.links
            .find_active_task_ids_by_user(user_id)
            .await
            .map_err(|source| AssignmentError::UserLinks { user_id, source })
    }

    /// Returns every link row of a task, including historical ones.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::TaskLinks`] when the lookup fails.
    pub async fn link_history_for_task(
        &self,
        task_id: TaskId,
    ) -> AssignmentResult<Vec<TaskUserLink>> {
        self.links
            .find_all_by_task(task_id)
            .await
            .map_err(|source| AssignmentError::TaskLinks { task_id, source })
    }
}
