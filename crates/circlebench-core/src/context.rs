use std::path::PathBuf;
use std::time::{Duration, Instant};

use circlebench_task::Task;

/// Everything one benchmark run needs as input
#[derive(Debug, Clone)]
pub struct RunContext {
    /// The constraint task being benchmarked
    pub task: Task,
    /// Working directory for the generator process
    pub working_dir: PathBuf,
    /// Model to request from the generator, if supported
    pub model: Option<String>,
    /// Generation timeout (None = no limit)
    pub timeout: Option<Duration>,
    /// When the run started
    started_at: Instant,
}

impl RunContext {
    pub fn new(task: Task, working_dir: PathBuf) -> Self {
        Self {
            task,
            working_dir,
            model: None,
            timeout: None,
            started_at: Instant::now(),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn total_duration(&self) -> Duration {
        self.started_at.elapsed()
    }
}
