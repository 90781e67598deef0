use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, trace};

use crate::{GeneratorConfig, GeneratorError, GeneratorOutput};

/// Utility for spawning generator processes
pub struct ProcessSpawner;

impl ProcessSpawner {
    /// Spawn a process, capture its output, and enforce the configured
    /// timeout. The child is killed when the timeout fires.
    pub async fn spawn(
        binary: &Path,
        args: &[&str],
        config: &GeneratorConfig,
    ) -> Result<GeneratorOutput, GeneratorError> {
        if !config.working_dir.is_dir() {
            return Err(GeneratorError::ConfigError(format!(
                "working directory does not exist: {}",
                config.working_dir.display()
            )));
        }

        match config.timeout {
            Some(limit) => tokio::time::timeout(limit, Self::spawn_inner(binary, args, config))
                .await
                .map_err(|_| GeneratorError::Timeout(limit))?,
            None => Self::spawn_inner(binary, args, config).await,
        }
    }

    async fn spawn_inner(
        binary: &Path,
        args: &[&str],
        config: &GeneratorConfig,
    ) -> Result<GeneratorOutput, GeneratorError> {
        let start = Instant::now();

        debug!(
            binary = %binary.display(),
            args = ?args,
            working_dir = %config.working_dir.display(),
            "Spawning generator process"
        );

        let mut cmd = Command::new(binary);
        cmd.args(args)
            .current_dir(&config.working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null()) // Non-interactive
            .kill_on_drop(true); // Reap the child if the timeout cancels us

        for (key, value) in &config.env_vars {
            cmd.env(key, value);
        }

        let mut child = cmd.spawn()?;

        let stdout_handle = child
            .stdout
            .take()
            .ok_or_else(|| GeneratorError::ExecutionFailed("stdout not captured".into()))?;
        let stderr_handle = child
            .stderr
            .take()
            .ok_or_else(|| GeneratorError::ExecutionFailed("stderr not captured".into()))?;

        let mut stdout_reader = BufReader::new(stdout_handle).lines();
        let mut stderr_reader = BufReader::new(stderr_handle).lines();

        let mut stdout = String::new();
        let mut stderr = String::new();

        // Read both streams concurrently
        loop {
            tokio::select! {
                biased;

                result = stdout_reader.next_line() => {
                    match result {
                        Ok(Some(line)) => {
                            trace!(line = %line, "stdout");
                            if !stdout.is_empty() {
                                stdout.push('\n');
                            }
                            stdout.push_str(&line);
                        }
                        Ok(None) => {
                            // stdout closed, drain stderr then stop
                            while let Ok(Some(line)) = stderr_reader.next_line().await {
                                trace!(line = %line, "stderr");
                                if !stderr.is_empty() {
                                    stderr.push('\n');
                                }
                                stderr.push_str(&line);
                            }
                            break;
                        }
                        Err(e) => {
                            return Err(GeneratorError::ExecutionFailed(format!(
                                "Failed to read stdout: {}",
                                e
                            )));
                        }
                    }
                }
                result = stderr_reader.next_line() => {
                    match result {
                        Ok(Some(line)) => {
                            trace!(line = %line, "stderr");
                            if !stderr.is_empty() {
                                stderr.push('\n');
                            }
                            stderr.push_str(&line);
                        }
                        Ok(None) => {
                            // stderr closed, keep reading stdout
                        }
                        Err(e) => {
                            return Err(GeneratorError::ExecutionFailed(format!(
                                "Failed to read stderr: {}",
                                e
                            )));
                        }
                    }
                }
            }
        }

        let status = child.wait().await?;
        let duration = start.elapsed();

        debug!(
            exit_code = status.code().unwrap_or(-1),
            duration_ms = duration.as_millis(),
            "Generator process completed"
        );

        Ok(GeneratorOutput::new(
            stdout,
            stderr,
            status.code().unwrap_or(-1),
            duration,
        ))
    }
}
