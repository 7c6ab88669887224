//! Task-to-user assignment links and the reconciliation planner.
//!
//! A link row exists at most once per `(task, user)` pair. Unassigning a
//! user deactivates the row and reassigning reactivates it, so the full
//! assignment history of a task survives every reconciliation.

use super::{TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single task-to-user assignment record with its own active flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUserLink {
    task_id: TaskId,
    user_id: UserId,
    assigned_at: DateTime<Utc>,
    active: bool,
}

impl TaskUserLink {
    /// Creates a new active link.
    #[must_use]
    pub const fn assign(task_id: TaskId, user_id: UserId, assigned_at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            user_id,
            assigned_at,
            active: true,
        }
    }

    /// Reconstructs a link from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        task_id: TaskId,
        user_id: UserId,
        assigned_at: DateTime<Utc>,
        active: bool,
    ) -> Self {
        Self {
            task_id,
            user_id,
            assigned_at,
            active,
        }
    }

    /// Returns the linked task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the linked user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns when the user was most recently assigned.
    #[must_use]
    pub const fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    /// Returns `true` while the user is currently assigned.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Marks the link as active again and refreshes the assignment time.
    pub const fn reactivate(&mut self, assigned_at: DateTime<Utc>) {
        self.active = true;
        self.assigned_at = assigned_at;
    }

    /// Marks the link as historical. The assignment time is preserved.
    pub const fn deactivate(&mut self) {
        self.active = false;
    }
}

/// The set of users that should be actively assigned to a task.
///
/// Duplicates collapse; an empty target means "unassign everyone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentTarget(BTreeSet<UserId>);

impl AssignmentTarget {
    /// Creates an empty target.
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns `true` when the user belongs to the target.
    #[must_use]
    pub fn contains(&self, user_id: UserId) -> bool {
        self.0.contains(&user_id)
    }

    /// Returns the number of distinct users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no user should remain assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates users in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = UserId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<UserId> for AssignmentTarget {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// State transitions that converge a task's links onto an
/// [`AssignmentTarget`].
///
/// Every user in the target ends up in exactly one of `insert`, `reactivate`
/// or `refresh`. Every currently active user outside the target ends up in
/// `deactivate`. Inactive rows outside the target are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentPlan {
    deactivate: Vec<UserId>,
    reactivate: Vec<UserId>,
    refresh: Vec<UserId>,
    insert: Vec<UserId>,
}

impl AssignmentPlan {
    /// Plans the transitions from every existing link row of one task,
    /// active or not, to the target set.
    #[must_use]
    pub fn compute(existing: &[TaskUserLink], target: &AssignmentTarget) -> Self {
        let mut plan = Self::default();

        for link in existing.iter().filter(|link| link.is_active()) {
            if !target.contains(link.user_id()) {
                plan.deactivate.push(link.user_id());
            }
        }

        for user_id in target.iter() {
            match existing.iter().find(|link| link.user_id() == user_id) {
                Some(link) if link.is_active() => plan.refresh.push(user_id),
                Some(_) => plan.reactivate.push(user_id),
                None => plan.insert.push(user_id),
            }
        }

        plan
    }

    /// Users whose active link becomes historical.
    #[must_use]
    pub fn deactivate(&self) -> &[UserId] {
        &self.deactivate
    }

    /// Users with an inactive row that becomes active again.
    #[must_use]
    pub fn reactivate(&self) -> &[UserId] {
        &self.reactivate
    }

    /// Users already active whose assignment time is refreshed.
    #[must_use]
    pub fn refresh(&self) -> &[UserId] {
        &self.refresh
    }

    /// Users without any row for the task yet.
    #[must_use]
    pub fn insert(&self) -> &[UserId] {
        &self.insert
    }

    /// Users whose existing row must end up active with a fresh timestamp.
    pub fn upsert_existing(&self) -> impl Iterator<Item = UserId> + '_ {
        self.reactivate.iter().chain(self.refresh.iter()).copied()
    }

    /// Returns `true` when applying the plan changes which users are
    /// active. A plan that only refreshes timestamps returns `false`.
    #[must_use]
    pub fn changes_active_set(&self) -> bool {
        !(self.deactivate.is_empty() && self.reactivate.is_empty() && self.insert.is_empty())
    }
}
