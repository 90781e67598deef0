//! # circlebench-task
//!
//! Task definitions for the circle-overlap benchmark: how many circles the
//! model must draw, which pairs must overlap, and the prompt text that
//! states those constraints.

mod prompt;
mod task;

pub use prompt::TaskPrompts;
pub use task::{Task, TaskError, COLOR_PALETTE};
