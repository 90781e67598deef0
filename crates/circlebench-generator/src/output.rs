use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output captured from one generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorOutput {
    /// Combined stdout output (the raw markup, possibly with prose)
    pub stdout: String,
    /// Combined stderr output
    pub stderr: String,
    /// Exit code from the process
    pub exit_code: i32,
    /// Duration of the generation
    #[serde(with = "duration_secs")]
    pub duration: Duration,
}

impl GeneratorOutput {
    pub fn new(stdout: String, stderr: String, exit_code: i32, duration: Duration) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
            duration,
        }
    }

    /// Check if the generator exited successfully
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Count lines in stdout
    pub fn stdout_lines(&self) -> usize {
        self.stdout.lines().count()
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_follows_exit_code() {
        let ok = GeneratorOutput::new("svg".into(), String::new(), 0, Duration::from_secs(1));
        let bad = GeneratorOutput::new(String::new(), "err".into(), 1, Duration::from_secs(1));
        assert!(ok.success());
        assert!(!bad.success());
    }

    #[test]
    fn test_duration_round_trips_through_json() {
        let output =
            GeneratorOutput::new("x".into(), String::new(), 0, Duration::from_millis(1500));
        let json = serde_json::to_string(&output).unwrap();
        let back: GeneratorOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.duration, Duration::from_millis(1500));
    }
}
