//! Domain model for task tracking and user assignment.
//!
//! Tasks and task-to-user links are pure values here. Timestamps come from
//! an injected clock and identifiers for new tasks come from the store, so
//! nothing in this module touches infrastructure.

mod assignment;
mod error;
mod ids;
mod task;

pub use assignment::{AssignmentPlan, AssignmentTarget, TaskUserLink};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{ProjectId, TaskId, UserId};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges, TaskPriority, TaskStatus};
