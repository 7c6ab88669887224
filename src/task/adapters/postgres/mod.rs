//! `PostgreSQL` adapters for task and assignment persistence.

mod assignment;
mod config;
mod models;
mod repository;
mod schema;

pub use assignment::PostgresAssignmentRepository;
pub use config::{PostgresConfig, PostgresConfigError, TaskPgPool};
pub use repository::PostgresTaskRepository;
