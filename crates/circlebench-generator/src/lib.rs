//! # circlebench-generator
//!
//! Backends that turn a benchmark prompt into raw SVG markup. The real
//! backend shells out to a model CLI; the mock backend returns a canned
//! response and is selected explicitly, never via a global switch.

mod claude;
mod mock;
mod output;
mod spawner;
mod traits;

pub use claude::ClaudeCodeGenerator;
pub use mock::MockGenerator;
pub use output::GeneratorOutput;
pub use spawner::ProcessSpawner;
pub use traits::{Generator, GeneratorConfig, GeneratorError, GeneratorKind};

/// Create a generator by kind.
pub fn create_generator(kind: GeneratorKind) -> Box<dyn Generator> {
    match kind {
        GeneratorKind::ClaudeCode => Box::new(ClaudeCodeGenerator::new()),
        GeneratorKind::Mock => Box::new(MockGenerator::new()),
    }
}
