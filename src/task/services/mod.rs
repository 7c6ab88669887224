//! Application services for task lifecycle and assignment orchestration.

mod assignment;
mod lifecycle;

pub use assignment::{AssignmentError, AssignmentReconciler, AssignmentResult};
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
