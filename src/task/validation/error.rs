//! Validation error types for inbound task fields.

use crate::task::domain::{TaskPriority, TaskStatus};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised when an inbound value breaks a field rule.
///
/// Every variant is recoverable by resubmitting corrected input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The field matched an injection signature.
    #[error("field '{field}' contains disallowed characters or patterns")]
    InjectionDetected {
        /// Label of the rejected field.
        field: String,
    },

    /// Rich text still matched an injection signature after stripping.
    #[error("text contains disallowed patterns")]
    UnsafeRichText,

    /// A required field is empty or whitespace-only.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Label of the empty field.
        field: String,
    },

    /// The status is not one of the accepted values.
    #[error("status '{value}' is not valid; allowed values: {}", allowed_statuses())]
    InvalidStatus {
        /// The trimmed value that was rejected.
        value: String,
    },

    /// The priority is not one of the accepted values.
    #[error("priority '{value}' is not valid; allowed values: {}", allowed_priorities())]
    InvalidPriority {
        /// The trimmed value that was rejected.
        value: String,
    },

    /// The date lies before today while past dates are not allowed.
    #[error("date {date} must not be before today ({today})")]
    DateInPast {
        /// The rejected date.
        date: NaiveDate,
        /// The reference day.
        today: NaiveDate,
    },

    /// The date lies after today while future dates are not allowed.
    #[error("date {date} must not be after today ({today})")]
    DateInFuture {
        /// The rejected date.
        date: NaiveDate,
        /// The reference day.
        today: NaiveDate,
    },

    /// The date lies beyond the forward planning horizon.
    #[error("date {date} is more than {max_years} years ahead (latest allowed {limit})")]
    DateTooFarAhead {
        /// The rejected date.
        date: NaiveDate,
        /// The latest accepted date.
        limit: NaiveDate,
        /// Length of the horizon in years.
        max_years: u32,
    },

    /// The date lies before the earliest accepted year.
    #[error("date {date} is before the year {min_year}")]
    DateBeforeMinimumYear {
        /// The rejected date.
        date: NaiveDate,
        /// The earliest accepted year.
        min_year: i32,
    },

    /// An identifier is zero or negative.
    #[error("{field} must be a positive integer, got {value}")]
    InvalidIdentifier {
        /// Label of the identifier field.
        field: String,
        /// The rejected value.
        value: i64,
    },

    /// An update request carried no field to change.
    #[error("no changes were supplied")]
    EmptyUpdate,
}

impl ValidationError {
    /// Creates an [`InjectionDetected`](Self::InjectionDetected) error.
    #[must_use]
    pub fn injection(field: impl Into<String>) -> Self {
        Self::InjectionDetected {
            field: field.into(),
        }
    }

    /// Creates an [`EmptyField`](Self::EmptyField) error.
    #[must_use]
    pub fn empty(field: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an [`InvalidIdentifier`](Self::InvalidIdentifier) error.
    #[must_use]
    pub fn invalid_identifier(field: impl Into<String>, value: i64) -> Self {
        Self::InvalidIdentifier {
            field: field.into(),
            value,
        }
    }
}

fn allowed_statuses() -> String {
    TaskStatus::ALL.map(TaskStatus::as_str).join(", ")
}

fn allowed_priorities() -> String {
    TaskPriority::ALL.map(TaskPriority::as_str).join(", ")
}
