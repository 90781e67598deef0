use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

use crate::{
    Generator, GeneratorConfig, GeneratorError, GeneratorKind, GeneratorOutput, ProcessSpawner,
};

/// Generator backed by the Claude Code CLI
pub struct ClaudeCodeGenerator {
    binary_path: PathBuf,
}

impl ClaudeCodeGenerator {
    pub fn new() -> Self {
        Self {
            binary_path: PathBuf::from("claude"),
        }
    }

    pub fn with_binary_path(path: PathBuf) -> Self {
        Self { binary_path: path }
    }
}

impl Default for ClaudeCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for ClaudeCodeGenerator {
    fn name(&self) -> &str {
        "Claude Code"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::ClaudeCode
    }

    fn binary_path(&self) -> Option<&Path> {
        Some(&self.binary_path)
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.binary_path)
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    async fn generate(
        &self,
        prompt: &str,
        config: &GeneratorConfig,
    ) -> Result<GeneratorOutput, GeneratorError> {
        debug!(
            generator = self.name(),
            prompt_len = prompt.len(),
            "Requesting generation"
        );

        // Non-interactive mode, output only
        let mut args = vec!["--print"];

        let model_arg;
        if let Some(ref model) = config.model {
            args.push("--model");
            model_arg = model.clone();
            args.push(&model_arg);
        }

        // `--` prevents prompts starting with '-' from being read as options
        args.push("--");
        args.push(prompt);

        ProcessSpawner::spawn(&self.binary_path, &args, config).await
    }
}
