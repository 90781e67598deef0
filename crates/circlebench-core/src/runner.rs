use std::sync::Arc;
use tracing::{debug, info};

use circlebench_eval::{evaluate, EvaluationInput};
use circlebench_generator::{Generator, GeneratorConfig};
use circlebench_logging::{Logger, RunEvent};

use crate::{RunContext, RunError, RunOutcome};

/// Runs one task through a generator and scores the result
pub struct BenchRunner<'a> {
    generator: &'a dyn Generator,
    logger: Arc<Logger>,
}

impl<'a> BenchRunner<'a> {
    pub fn new(generator: &'a dyn Generator, logger: Arc<Logger>) -> Self {
        Self { generator, logger }
    }

    /// Execute the full pipeline: prompt → generation → evaluation.
    ///
    /// A generator that exits non-zero is still scored; model CLIs can
    /// print usable markup before failing, and junk output already scores
    /// as a failing report.
    pub async fn run(&self, context: RunContext) -> Result<RunOutcome, RunError> {
        self.logger.log(&RunEvent::RunStarted {
            generator: self.generator.name().to_string(),
            working_dir: context.working_dir.clone(),
            circles: context.task.required_count(),
            required_overlaps: context.task.required_pairs().len(),
        });

        let mut config = GeneratorConfig::new(context.working_dir.clone());
        if let Some(ref model) = context.model {
            config = config.with_model(model.clone());
        }
        if let Some(timeout) = context.timeout {
            config = config.with_timeout(timeout);
        }

        let prompt = context.task.prompt();
        debug!(prompt_len = prompt.len(), "built generation prompt");

        self.logger.log(&RunEvent::GenerationStarted {
            generator: self.generator.name().to_string(),
            prompt_preview: prompt.chars().take(100).collect(),
        });

        let output = self.generator.generate(&prompt, &config).await?;

        self.logger.log(&RunEvent::GenerationCompleted {
            exit_code: output.exit_code,
            duration_secs: output.duration.as_secs_f64(),
            stdout_lines: output.stdout_lines(),
        });

        let report = evaluate(EvaluationInput {
            raw_markup: &output.stdout,
            required_pairs: context.task.required_pairs(),
            expected_count: context.task.required_count(),
        });

        if report.parse_failed {
            self.logger.log(&RunEvent::MarkupRejected);
        }

        self.logger.log(&RunEvent::EvaluationCompleted {
            circle_count: report.circle_count_metric(),
            correct_overlaps: report.correct_overlaps_metric(),
            incorrect_overlaps: report.incorrect_overlaps(),
            perfect: report.is_perfect(),
        });

        info!(
            circles = %report.circle_count_metric(),
            correct = %report.correct_overlaps_metric(),
            incorrect = report.incorrect_overlaps(),
            "run complete"
        );

        Ok(RunOutcome {
            report,
            generator_exit_code: output.exit_code,
            generation_duration_secs: output.duration.as_secs_f64(),
            total_duration_secs: context.total_duration().as_secs_f64(),
        })
    }
}
