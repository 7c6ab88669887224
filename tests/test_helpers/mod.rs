//! Shared clock and identifier helpers for integration tests.

mod clock;

pub use clock::{FixedClock, base_instant};
use taskroster::task::domain::{AssignmentTarget, UserId};

/// Builds validated user identifiers.
#[must_use]
pub fn users(ids: &[i64]) -> Vec<UserId> {
    ids.iter()
        .map(|id| UserId::new(*id).expect("valid user id"))
        .collect()
}

/// Builds an assignment target from raw identifiers.
#[must_use]
pub fn target(ids: &[i64]) -> AssignmentTarget {
    users(ids).into_iter().collect()
}
