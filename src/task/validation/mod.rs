//! Input validation and sanitisation for task fields.
//!
//! Every rule is a pure function over one raw value that either returns a
//! cleaned value or a [`ValidationError`] naming the offending field.
//! Services run inbound values through these rules before anything reaches
//! a repository.

mod dates;
mod error;
mod fields;
mod text;

pub use dates::{DateRules, validate_date, validate_date_on};
pub use error::ValidationError;
pub use fields::{
    validate_description, validate_priority, validate_project_id, validate_status, validate_title,
    validate_user_id, validate_user_ids,
};
pub use text::{
    detect_injection_pattern, sanitize_plain_text, sanitize_rich_text, validate_and_sanitize,
};

/// Result type for validation rules.
pub type ValidationResult<T> = Result<T, ValidationError>;
