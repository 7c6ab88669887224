//! Service layer for task creation, updates and lookup.

use crate::task::{
    domain::{NewTask, ProjectId, Task, TaskChanges, TaskDomainError, TaskId, UserId},
    ports::{AssignmentRepository, AssignmentRepositoryError, TaskRepository, TaskRepositoryError},
    validation::{
        ValidationError, ValidationResult, validate_description, validate_priority,
        validate_project_id, validate_status, validate_title, validate_user_id,
    },
};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Raw request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: String,
    status: Option<String>,
    project_id: i64,
    assigned_user_id: Option<i64>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: impl Into<String>, project_id: i64) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: priority.into(),
            status: None,
            project_id,
            assigned_user_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status; `NotStarted` applies otherwise.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the legacy primary assignee.
    #[must_use]
    pub const fn with_assigned_user(mut self, user_id: i64) -> Self {
        self.assigned_user_id = Some(user_id);
        self
    }
}

/// Raw request payload for a field-level task update.
///
/// Only the fields that were set are considered. Blank titles, priorities
/// and statuses are ignored, a blank description clears the description,
/// and a non-positive assignee clears the legacy assignee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    status: Option<String>,
    active: Option<bool>,
    project_id: Option<i64>,
    assigned_user_id: Option<i64>,
}

impl UpdateTaskRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the replacement status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the replacement active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Sets the replacement owning project.
    #[must_use]
    pub const fn with_project(mut self, project_id: i64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the replacement legacy assignee.
    #[must_use]
    pub const fn with_assigned_user(mut self, user_id: i64) -> Self {
        self.assigned_user_id = Some(user_id);
        self
    }

    /// Returns `true` when no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.active.is_none()
            && self.project_id.is_none()
            && self.assigned_user_id.is_none()
    }

    /// Validates the supplied fields into typed changes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyUpdate`] when no field was supplied,
    /// or the first field rule that fails.
    pub fn into_changes(self) -> ValidationResult<TaskChanges> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }

        let title = non_blank(self.title).map(|raw| validate_title(&raw)).transpose()?;
        let description = self
            .description
            .map(|raw| validate_description(&raw))
            .transpose()?;
        let priority = non_blank(self.priority)
            .map(|raw| validate_priority(&raw))
            .transpose()?;
        let status = non_blank(self.status)
            .map(|raw| validate_status(&raw))
            .transpose()?;
        let project_id = self.project_id.map(validate_project_id).transpose()?;
        let assigned_user_id = self
            .assigned_user_id
            .map(|raw| UserId::new(raw).ok());

        Ok(TaskChanges {
            title,
            description,
            priority,
            status,
            active: self.active,
            project_id,
            assigned_user_id,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Inbound field validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Domain invariant check failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Reading the tasks assigned to a user failed.
    #[error("failed to read assignments of user {user_id}: {source}")]
    Assignment {
        /// User whose assignments were being read.
        user_id: UserId,
        /// Underlying store failure.
        #[source]
        source: AssignmentRepositoryError,
    },
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Lookups that miss return `Ok(None)` rather than an error.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates and stores a new active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when a field is rejected or
    /// [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let title = validate_title(&request.title)?;
        let description = request
            .description
            .as_deref()
            .map(validate_description)
            .transpose()?
            .flatten();
        let priority = validate_priority(&request.priority)?;
        let status = request.status.as_deref().map(validate_status).transpose()?;
        let project_id = validate_project_id(request.project_id)?;
        let assigned_user_id = request
            .assigned_user_id
            .map(validate_user_id)
            .transpose()?;

        let mut draft = NewTask::new(title, priority, project_id, &*self.clock)?;
        if let Some(value) = description {
            draft = draft.with_description(value);
        }
        if let Some(value) = status {
            draft = draft.with_status(value);
        }
        if let Some(value) = assigned_user_id {
            draft = draft.with_assigned_user(value);
        }

        let task = self.repository.insert(&draft).await?;
        tracing::info!(task_id = %task.id(), project_id = %task.project_id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier, including soft-deleted tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists every active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_active(&self) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.repository.find_all().await?;
        Ok(tasks.into_iter().filter(Task::is_active).collect())
    }

    /// Lists the active tasks of one project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.repository.find_all().await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.is_active() && task.project_id() == project_id)
            .collect())
    }

    /// Lists the active tasks on which the user holds an active assignment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Assignment`] or
    /// [`TaskLifecycleError::Repository`] when a lookup fails.
    pub async fn list_assigned_to<A>(
        &self,
        assignments: &A,
        user_id: UserId,
    ) -> TaskLifecycleResult<Vec<Task>>
    where
        A: AssignmentRepository + ?Sized,
    {
        let task_ids: BTreeSet<TaskId> = assignments
            .find_active_task_ids_by_user(user_id)
            .await
            .map_err(|source| TaskLifecycleError::Assignment { user_id, source })?
            .into_iter()
            .collect();
        if task_ids.is_empty() {
            return Ok(Vec::new());
        }

        let tasks = self.repository.find_all().await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.is_active() && task_ids.contains(&task.id()))
            .collect())
    }

    /// Applies a field-level update.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the request is empty
    /// or a field is rejected, or [`TaskLifecycleError::Repository`] when
    /// persistence fails.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Option<Task>> {
        let changes = request.into_changes()?;
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        task.apply(changes, &*self.clock)?;
        self.repository.update(&task).await?;
        tracing::info!(task_id = %id, "task updated");
        Ok(Some(task))
    }

    /// Moves a task to a new workflow status.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the status is
    /// rejected or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn change_status(
        &self,
        id: TaskId,
        status: &str,
    ) -> TaskLifecycleResult<Option<Task>> {
        let new_status = validate_status(status)?;
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        task.set_status(new_status, &*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(task_id = %id, status = new_status.as_str(), "task status changed");
        Ok(Some(task))
    }

    /// Soft-deletes a task, keeping its row and workflow status.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn soft_delete(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        task.soft_delete(&*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(task_id = %id, "task soft-deleted");
        Ok(Some(task))
    }
}
