use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Structured log events for a benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    RunStarted {
        generator: String,
        working_dir: PathBuf,
        circles: usize,
        required_overlaps: usize,
    },
    GenerationStarted {
        generator: String,
        prompt_preview: String,
    },
    GenerationCompleted {
        exit_code: i32,
        duration_secs: f64,
        stdout_lines: usize,
    },
    /// The response could not be parsed as a document and was scored as
    /// zero circles.
    MarkupRejected,
    EvaluationCompleted {
        circle_count: String,
        correct_overlaps: String,
        incorrect_overlaps: usize,
        perfect: bool,
    },
    RunFailed {
        error: String,
    },
}

impl RunEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors and visual structure
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for benchmark events - handles both console output and file logging
pub struct Logger {
    format: LogFormat,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            file_writer: None,
        }
    }

    /// Create a logger with a JSONL file sink in addition to the console
    pub fn with_file(format: LogFormat, log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Self {
            format,
            file_writer: Some(Mutex::new(file)),
        })
    }

    pub fn log(&self, event: &RunEvent) {
        // File sink is always JSON, whatever the console format
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => self.log_compact(event),
        }
    }

    fn log_json(&self, event: &RunEvent) {
        if let Ok(json) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{}", json);
        }
    }

    fn log_pretty(&self, event: &RunEvent) {
        let mut stderr = std::io::stderr();
        match event {
            RunEvent::RunStarted {
                generator,
                working_dir,
                circles,
                required_overlaps,
            } => {
                let _ = writeln!(stderr);
                let _ = writeln!(
                    stderr,
                    "{} {}",
                    "circlebench".bold().bright_white(),
                    format!(
                        "({} circles, {} required overlaps)",
                        circles, required_overlaps
                    )
                    .dimmed()
                );
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "Generator:".dimmed(),
                    generator.bright_cyan()
                );
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "Dir:".dimmed(),
                    working_dir.display().to_string().dimmed()
                );
                let _ = writeln!(stderr);
            }
            RunEvent::GenerationStarted { generator, .. } => {
                let _ = writeln!(
                    stderr,
                    "  {} {} {}",
                    "▶".bright_cyan(),
                    "GENERATE".bright_cyan().bold(),
                    format!("via {}", generator).dimmed()
                );
            }
            RunEvent::GenerationCompleted {
                exit_code,
                duration_secs,
                stdout_lines,
            } => {
                if *exit_code == 0 {
                    let _ = writeln!(
                        stderr,
                        "    {} Done ({:.1}s, {} lines)",
                        "✓".bright_green(),
                        duration_secs,
                        stdout_lines
                    );
                } else {
                    let _ = writeln!(
                        stderr,
                        "    {} Exit {} ({:.1}s)",
                        "✗".bright_red(),
                        exit_code,
                        duration_secs
                    );
                }
                let _ = writeln!(stderr);
            }
            RunEvent::MarkupRejected => {
                let _ = writeln!(
                    stderr,
                    "    {} {}",
                    "⚠".bright_yellow(),
                    "Response was not well-formed SVG; scoring as zero circles".yellow()
                );
            }
            RunEvent::EvaluationCompleted {
                circle_count,
                correct_overlaps,
                incorrect_overlaps,
                perfect,
            } => {
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "▶".bright_magenta(),
                    "EVALUATE".bright_magenta().bold()
                );
                let verdict = if *perfect {
                    "✓ all constraints satisfied".bright_green().to_string()
                } else {
                    format!(
                        "→ circles {}, overlaps {}, extra {}",
                        circle_count, correct_overlaps, incorrect_overlaps
                    )
                    .bright_yellow()
                    .to_string()
                };
                let _ = writeln!(stderr, "    {}", verdict);
                let _ = writeln!(stderr);
            }
            RunEvent::RunFailed { error } => {
                let _ = writeln!(stderr);
                let _ = writeln!(stderr, "{} {}", "✗".bright_red(), error.bright_red());
            }
        }
    }

    fn log_compact(&self, event: &RunEvent) {
        let mut stderr = std::io::stderr();
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        let msg = match event {
            RunEvent::RunStarted {
                circles,
                required_overlaps,
                ..
            } => format!(
                "[{}] run:start c={} o={}",
                timestamp, circles, required_overlaps
            ),
            RunEvent::GenerationStarted { generator, .. } => {
                format!("[{}] gen:start {}", timestamp, generator)
            }
            RunEvent::GenerationCompleted {
                exit_code,
                duration_secs,
                ..
            } => format!(
                "[{}] gen:done exit={} {:.1}s",
                timestamp, exit_code, duration_secs
            ),
            RunEvent::MarkupRejected => format!("[{}] eval:rejected", timestamp),
            RunEvent::EvaluationCompleted {
                circle_count,
                correct_overlaps,
                incorrect_overlaps,
                ..
            } => format!(
                "[{}] eval:done circles={} correct={} extra={}",
                timestamp, circle_count, correct_overlaps, incorrect_overlaps
            ),
            RunEvent::RunFailed { error } => format!("[{}] run:failed {}", timestamp, error),
        };
        let _ = writeln!(stderr, "{}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("fancy").is_err());
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = RunEvent::EvaluationCompleted {
            circle_count: "3/3".into(),
            correct_overlaps: "1/1".into(),
            incorrect_overlaps: 0,
            perfect: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "evaluation_completed");
        assert_eq!(json["circle_count"], "3/3");
    }

    #[test]
    fn test_file_sink_writes_jsonl() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs/run.jsonl");
        let logger = Logger::with_file(LogFormat::Compact, &path).unwrap();

        logger.log(&RunEvent::MarkupRejected);
        logger.log(&RunEvent::RunFailed {
            error: "boom".into(),
        });

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "markup_rejected");
        assert!(first["timestamp"].is_string());
    }
}
