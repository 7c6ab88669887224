//! Diesel row models for task and assignment persistence.

use super::schema::{task_users, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned task identifier.
    pub id: i64,
    /// Sanitised title.
    pub title: String,
    /// Optional sanitised description.
    pub description: Option<String>,
    /// Task priority.
    pub priority: String,
    /// Workflow status.
    pub status: String,
    /// Visibility flag.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Owning project identifier.
    pub project_id: i64,
    /// Legacy primary assignee.
    pub assigned_user_id: Option<i64>,
}

/// Insert model for task records. The identifier comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Sanitised title.
    pub title: String,
    /// Optional sanitised description.
    pub description: Option<String>,
    /// Task priority.
    pub priority: String,
    /// Workflow status.
    pub status: String,
    /// Visibility flag.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Owning project identifier.
    pub project_id: i64,
    /// Legacy primary assignee.
    pub assigned_user_id: Option<i64>,
}

/// Full overwrite of the mutable task columns.
///
/// `None` writes `NULL` so that cleared fields are persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Sanitised title.
    pub title: String,
    /// Optional sanitised description.
    pub description: Option<String>,
    /// Task priority.
    pub priority: String,
    /// Workflow status.
    pub status: String,
    /// Visibility flag.
    pub active: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Owning project identifier.
    pub project_id: i64,
    /// Legacy primary assignee.
    pub assigned_user_id: Option<i64>,
}

/// Query result row for assignment links.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LinkRow {
    /// Linked task.
    pub task_id: i64,
    /// Linked user.
    pub user_id: i64,
    /// Most recent assignment timestamp.
    pub assigned_at: DateTime<Utc>,
    /// Whether the user is currently assigned.
    pub active: bool,
}

/// Insert model for assignment links.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_users)]
pub struct NewLinkRow {
    /// Linked task.
    pub task_id: i64,
    /// Linked user.
    pub user_id: i64,
    /// Assignment timestamp.
    pub assigned_at: DateTime<Utc>,
    /// Always `true` for new links.
    pub active: bool,
}
