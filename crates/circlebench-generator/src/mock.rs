use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::{Generator, GeneratorConfig, GeneratorError, GeneratorKind, GeneratorOutput};

/// A canned flawed response: three circles where red and blue overlap as
/// typically required, but green accidentally overlaps blue as well.
const MOCK_RESPONSE: &str = r#"```svg
<svg width="300" height="300">
  <!-- Red Circle -->
  <circle cx="100" cy="100" r="50" fill="Red" />
  <!-- Blue Circle (Overlaps Red) -->
  <circle cx="160" cy="100" r="50" fill="Blue" />
  <!-- Green Circle (Accidentally overlaps Blue) -->
  <circle cx="220" cy="100" r="50" fill="Green" />
</svg>
```"#;

/// Offline generator returning a fixed, deliberately imperfect response.
///
/// Useful for exercising the full pipeline without a model CLI. Selected
/// explicitly through [`GeneratorKind::Mock`]; no code path switches to it
/// implicitly.
pub struct MockGenerator {
    response: String,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            response: MOCK_RESPONSE.to_string(),
        }
    }

    /// Mock generator with a custom canned response.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    fn name(&self) -> &str {
        "Mock"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Mock
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn generate(
        &self,
        prompt: &str,
        _config: &GeneratorConfig,
    ) -> Result<GeneratorOutput, GeneratorError> {
        debug!(prompt_len = prompt.len(), "Returning canned response");

        Ok(GeneratorOutput::new(
            self.response.clone(),
            String::new(),
            0,
            Duration::ZERO,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_canned_svg() {
        let generator = MockGenerator::new();
        let output = generator
            .generate("any prompt", &GeneratorConfig::default())
            .await
            .unwrap();

        assert!(output.success());
        assert!(output.stdout.contains("<svg"));
        assert!(output.stdout.contains("fill=\"Green\""));
    }

    #[test]
    fn test_mock_has_no_binary() {
        assert!(MockGenerator::new().binary_path().is_none());
    }

    #[tokio::test]
    async fn test_mock_with_custom_response() {
        let generator = MockGenerator::with_response("<svg></svg>");
        let output = generator
            .generate("prompt", &GeneratorConfig::default())
            .await
            .unwrap();

        assert_eq!(output.stdout, "<svg></svg>");
    }
}
