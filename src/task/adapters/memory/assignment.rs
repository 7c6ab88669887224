//! In-memory assignment repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, RwLock};

use crate::task::{
    domain::{AssignmentPlan, AssignmentTarget, TaskId, TaskUserLink, UserId},
    ports::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult},
};

/// Link rows of one task keyed by user.
pub(crate) type TaskRows = BTreeMap<UserId, TaskUserLink>;

/// Link rows of one task behind their own lock.
pub(crate) type SharedTaskRows = Arc<Mutex<TaskRows>>;

/// Thread-safe in-memory link repository.
///
/// Every task owns its rows behind a separate mutex. A reconciliation plans
/// and applies while holding only that task's mutex, so it is atomic and
/// serialised against reconciliations of the same task, while other tasks
/// proceed in parallel. The outer map lock is held just long enough to find
/// or create a task's entry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssignmentRepository {
    tasks: Arc<RwLock<HashMap<TaskId, SharedTaskRows>>>,
}

impl InMemoryAssignmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rows of `task_id`, creating an empty entry on first use.
    pub(crate) fn task_rows(&self, task_id: TaskId) -> AssignmentRepositoryResult<SharedTaskRows> {
        if let Some(rows) = self.existing_rows(task_id)? {
            return Ok(rows);
        }
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        Ok(Arc::clone(tasks.entry(task_id).or_default()))
    }

    fn existing_rows(&self, task_id: TaskId) -> AssignmentRepositoryResult<Option<SharedTaskRows>> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        Ok(tasks.get(&task_id).cloned())
    }

    fn collect_links(
        &self,
        task_id: TaskId,
        keep: impl Fn(&TaskUserLink) -> bool,
    ) -> AssignmentRepositoryResult<Vec<TaskUserLink>> {
        let Some(shared) = self.existing_rows(task_id)? else {
            return Ok(Vec::new());
        };
        let rows = shared.lock().map_err(poisoned)?;
        Ok(rows.values().filter(|&link| keep(link)).cloned().collect())
    }
}

fn poisoned(err: impl std::fmt::Display) -> AssignmentRepositoryError {
    AssignmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn apply_plan(
    rows: &mut TaskRows,
    plan: &AssignmentPlan,
    task_id: TaskId,
    assigned_at: DateTime<Utc>,
) {
    for user_id in plan.deactivate() {
        if let Some(link) = rows.get_mut(user_id) {
            link.deactivate();
        }
    }

    for user_id in plan.upsert_existing() {
        rows.entry(user_id)
            .and_modify(|link| link.reactivate(assigned_at))
            .or_insert_with(|| TaskUserLink::assign(task_id, user_id, assigned_at));
    }

    for user_id in plan.insert().iter().copied() {
        rows.insert(user_id, TaskUserLink::assign(task_id, user_id, assigned_at));
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn find_active_by_task(
        &self,
        task_id: TaskId,
    ) -> AssignmentRepositoryResult<Vec<TaskUserLink>> {
        self.collect_links(task_id, TaskUserLink::is_active)
    }

    async fn find_all_by_task(
        &self,
        task_id: TaskId,
    ) -> AssignmentRepositoryResult<Vec<TaskUserLink>> {
        self.collect_links(task_id, |_| true)
    }

    async fn find_active_task_ids_by_user(
        &self,
        user_id: UserId,
    ) -> AssignmentRepositoryResult<Vec<TaskId>> {
        let snapshot: Vec<(TaskId, SharedTaskRows)> = self
            .tasks
            .read()
            .map_err(poisoned)?
            .iter()
            .map(|(task_id, rows)| (*task_id, Arc::clone(rows)))
            .collect();

        let mut task_ids = BTreeSet::new();
        for (task_id, shared) in snapshot {
            let rows = shared.lock().map_err(poisoned)?;
            if rows.get(&user_id).is_some_and(TaskUserLink::is_active) {
                task_ids.insert(task_id);
            }
        }
        Ok(task_ids.into_iter().collect())
    }

    async fn reconcile_links(
        &self,
        task_id: TaskId,
        target: &AssignmentTarget,
        assigned_at: DateTime<Utc>,
    ) -> AssignmentRepositoryResult<AssignmentPlan> {
        let shared = self.task_rows(task_id)?;
        let mut rows = shared.lock().map_err(poisoned)?;
        let existing: Vec<TaskUserLink> = rows.values().cloned().collect();
        let plan = AssignmentPlan::compute(&existing, target);
        apply_plan(&mut rows, &plan, task_id, assigned_at);
        Ok(plan)
    }
}
