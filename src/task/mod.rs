//! Task tracking with multi-user assignment.
//!
//! Inbound fields pass through [`validation`] before anything reaches a
//! store. Tasks are created, updated and soft-deleted through
//! [`services::TaskLifecycleService`], and the set of users assigned to a
//! task is converged with [`services::AssignmentReconciler`], which keeps
//! unassigned users as inactive history rather than deleting them. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Input rules in [`validation`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;
