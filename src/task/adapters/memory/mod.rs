//! In-memory adapters for tests and embedding.

mod assignment;
mod task;

pub use assignment::InMemoryAssignmentRepository;
pub use task::InMemoryTaskRepository;
