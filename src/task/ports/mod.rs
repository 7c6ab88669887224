//! Port contracts for task tracking and assignment.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod assignment;
pub mod repository;

pub use assignment::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
