use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Generator error: {0}")]
    Generator(#[from] circlebench_generator::GeneratorError),

    #[error("Task error: {0}")]
    Task(#[from] circlebench_task::TaskError),
}
