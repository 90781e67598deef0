use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::GeneratorOutput;

/// Errors that can occur while obtaining a generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Failed to spawn generator process: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("Generation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Generator configuration error: {0}")]
    ConfigError(String),

    #[error("Generation failed: {0}")]
    ExecutionFailed(String),
}

/// Configuration for a generation request
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Working directory for the generator process
    pub working_dir: PathBuf,
    /// Optional timeout (None = no limit)
    pub timeout: Option<std::time::Duration>,
    /// Additional environment variables
    pub env_vars: HashMap<String, String>,
    /// Model to use (if the backend supports it)
    pub model: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            working_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            timeout: None,
            env_vars: HashMap::new(),
            model: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_env(mut self, key: String, value: String) -> Self {
        self.env_vars.insert(key, value);
        self
    }
}

/// Supported generator backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    ClaudeCode,
    Mock,
}

impl std::fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorKind::ClaudeCode => write!(f, "claude-code"),
            GeneratorKind::Mock => write!(f, "mock"),
        }
    }
}

impl std::str::FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "claude" | "claude-code" | "claudecode" => Ok(GeneratorKind::ClaudeCode),
            "mock" => Ok(GeneratorKind::Mock),
            _ => Err(format!("Unknown generator kind: {}", s)),
        }
    }
}

/// The core abstraction for generation backends
#[async_trait]
pub trait Generator: Send + Sync {
    /// Human-readable name of the backend (e.g., "Claude Code", "Mock")
    fn name(&self) -> &str;

    /// The backend kind
    fn kind(&self) -> GeneratorKind;

    /// Produce raw markup for the given prompt
    async fn generate(
        &self,
        prompt: &str,
        config: &GeneratorConfig,
    ) -> Result<GeneratorOutput, GeneratorError>;

    /// Check if the backend is usable on this system
    async fn is_available(&self) -> bool;

    /// Path to the backing binary, when the backend shells out to one
    fn binary_path(&self) -> Option<&Path> {
        None
    }
}
