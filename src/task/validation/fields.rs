//! Validation rules for structured task fields.

use super::{ValidationError, ValidationResult, sanitize_rich_text, validate_and_sanitize};
use crate::task::domain::{ProjectId, TaskPriority, TaskStatus, UserId};

/// Validates a workflow status.
///
/// Surrounding whitespace is ignored; the remainder must match one of the
/// canonical names exactly, including case.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyField`] for blank input and
/// [`ValidationError::InvalidStatus`] for any other unknown value.
///
/// # Examples
///
/// ```
/// use taskroster::task::{domain::TaskStatus, validation::validate_status};
///
/// assert_eq!(validate_status(" InProgress "), Ok(TaskStatus::InProgress));
/// assert!(validate_status("inprogress").is_err());
/// ```
pub fn validate_status(status: &str) -> ValidationResult<TaskStatus> {
    let trimmed = status.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty("status"));
    }
    TaskStatus::try_from(trimmed).map_err(|_| ValidationError::InvalidStatus {
        value: trimmed.to_owned(),
    })
}

/// Validates a task priority with the same rules as [`validate_status`].
///
/// # Errors
///
/// Returns [`ValidationError::EmptyField`] for blank input and
/// [`ValidationError::InvalidPriority`] for any other unknown value.
pub fn validate_priority(priority: &str) -> ValidationResult<TaskPriority> {
    let trimmed = priority.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty("priority"));
    }
    TaskPriority::try_from(trimmed).map_err(|_| ValidationError::InvalidPriority {
        value: trimmed.to_owned(),
    })
}

/// Sanitises a task title and requires it to be non-empty.
///
/// # Errors
///
/// Returns [`ValidationError::InjectionDetected`] when the title matches an
/// injection signature, or [`ValidationError::EmptyField`] when nothing is
/// left after sanitisation.
pub fn validate_title(title: &str) -> ValidationResult<String> {
    let cleaned = validate_and_sanitize(title, "title")?;
    if cleaned.is_empty() {
        return Err(ValidationError::empty("title"));
    }
    Ok(cleaned)
}

/// Sanitises an optional task description.
///
/// Blank descriptions, including ones that are blank only after stripping,
/// become `None`.
///
/// # Errors
///
/// Returns [`ValidationError::UnsafeRichText`] when the description still
/// matches an injection signature after stripping.
pub fn validate_description(description: &str) -> ValidationResult<Option<String>> {
    let cleaned = sanitize_rich_text(description)?;
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_owned()))
}

/// Validates an owning project identifier.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidIdentifier`] when the value is not
/// positive.
pub fn validate_project_id(value: i64) -> ValidationResult<ProjectId> {
    ProjectId::new(value).map_err(|_| ValidationError::invalid_identifier("project id", value))
}

/// Validates a user identifier.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidIdentifier`] when the value is not
/// positive.
pub fn validate_user_id(value: i64) -> ValidationResult<UserId> {
    UserId::new(value).map_err(|_| ValidationError::invalid_identifier("user id", value))
}

/// Validates every user identifier in a batch, failing on the first bad one.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidIdentifier`] for the first value that is
/// not positive.
pub fn validate_user_ids(values: &[i64]) -> ValidationResult<Vec<UserId>> {
    values.iter().copied().map(validate_user_id).collect()
}
