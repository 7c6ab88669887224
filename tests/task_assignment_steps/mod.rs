//! Step definitions for task assignment scenarios.

mod then;
mod when;
pub mod world;
