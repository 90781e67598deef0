//! # circlebench-core
//!
//! Orchestrates one benchmark run: build the prompt from a task, obtain
//! markup from a generator, score it, and package the outcome.

mod context;
mod error;
mod outcome;
mod runner;

pub use context::RunContext;
pub use error::RunError;
pub use outcome::RunOutcome;
pub use runner::BenchRunner;
