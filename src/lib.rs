//! Taskroster: task tracking with validated input and reconciled assignment.
//!
//! This crate provides the core of a task tracker: a validation pipeline
//! that cleans and screens every inbound field, a task lifecycle with soft
//! deletion, and an assignment reconciler that converges the users linked
//! to a task onto a desired set without losing history.
//!
//! # Architecture
//!
//! Taskroster follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task records, field validation and user assignment

pub mod task;
