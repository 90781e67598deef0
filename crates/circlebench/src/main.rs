mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;

use circlebench_core::{BenchRunner, RunContext, RunOutcome};
use circlebench_generator::{create_generator, GeneratorKind};
use circlebench_logging::{init_tracing, LogFormat, Logger, RunEvent};
use circlebench_task::Task;

use config::ProjectConfig;

#[derive(Parser, Debug)]
#[command(
    name = "circlebench",
    about = "SVG circle-overlap benchmark for generative models",
    version,
    author
)]
struct Cli {
    /// Number of circles the model must draw
    #[arg(short = 'n', long, default_value_t = 3)]
    num_circles: usize,

    /// Circle pairs that must overlap, e.g. 'Red,Blue' 'Blue,Green'
    #[arg(short, long, num_args = 1.., default_values_t = vec!["Red,Blue".to_string()])]
    overlaps: Vec<String>,

    /// Generator backend to query
    #[arg(short, long, value_enum)]
    generator: Option<GeneratorChoice>,

    /// Model to use (if the backend supports it)
    #[arg(short, long)]
    model: Option<String>,

    /// Working directory (default: current directory)
    #[arg(short = 'd', long)]
    working_dir: Option<PathBuf>,

    /// Generation timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,

    /// Print the found/missed/hallucinated pair sets
    #[arg(short, long)]
    verbose: bool,

    /// Output the outcome as JSON
    #[arg(long)]
    json_output: bool,

    /// Show the task and prompt without calling a generator
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GeneratorChoice {
    Claude,
    Mock,
}

impl From<GeneratorChoice> for GeneratorKind {
    fn from(choice: GeneratorChoice) -> Self {
        match choice {
            GeneratorChoice::Claude => GeneratorKind::ClaudeCode,
            GeneratorChoice::Mock => GeneratorKind::Mock,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_format: LogFormat = cli.log_format.into();
    init_tracing("warn", log_format);
    let logger = Arc::new(Logger::new(log_format));

    let result = run(cli, logger.clone()).await;
    if let Err(ref e) = result {
        logger.log(&RunEvent::RunFailed {
            error: format!("{:#}", e),
        });
    }
    std::process::exit(resolve_exit_code(&result));
}

/// Exit code for the process: a scored run exits with its outcome's code
/// (0 perfect, 1 imperfect). Run-level failures such as an invalid task,
/// an unavailable generator, or a spawn error exit 2.
fn resolve_exit_code(result: &Result<i32>) -> i32 {
    match result {
        Ok(code) => *code,
        Err(_) => 2,
    }
}

async fn run(cli: Cli, logger: Arc<Logger>) -> Result<i32> {
    let working_dir = cli
        .working_dir
        .clone()
        .map(Ok)
        .unwrap_or_else(|| std::env::current_dir().context("Failed to get current directory"))?;

    let project = ProjectConfig::load(&working_dir)?.unwrap_or_default();

    // CLI flags win over circlebench.toml
    let kind: GeneratorKind = match cli.generator {
        Some(choice) => choice.into(),
        None => match project.generator.as_deref() {
            Some(name) => name
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Invalid generator in circlebench.toml")?,
            None => GeneratorKind::ClaudeCode,
        },
    };
    let model = cli.model.clone().or(project.model);
    let timeout_secs = cli.timeout_secs.or(project.timeout_secs);

    let overlaps = parse_overlap_args(&cli.overlaps)?;
    let task = Task::new(cli.num_circles, overlaps).context("Invalid task")?;

    if cli.dry_run {
        println!("=== Dry Run ===");
        println!("Circles: {} ({})", task.required_count(), task.labels().join(", "));
        println!("Required overlaps:");
        for pair in task.required_pairs() {
            println!("  - {}", pair);
        }
        println!("Generator: {}", kind);
        println!();
        println!("--- Prompt ---");
        println!("{}", task.prompt());
        return Ok(0);
    }

    let generator = create_generator(kind);
    if !generator.is_available().await {
        let binary = generator
            .binary_path()
            .map(|p| format!(" ({})", p.display()))
            .unwrap_or_default();
        bail!(
            "Generator '{}'{} is not available. Make sure it's installed and in PATH.",
            generator.name(),
            binary
        );
    }

    let mut context = RunContext::new(task, working_dir);
    if let Some(model) = model {
        context = context.with_model(model);
    }
    if let Some(secs) = timeout_secs {
        context = context.with_timeout(Duration::from_secs(secs));
    }

    let runner = BenchRunner::new(generator.as_ref(), logger);
    let outcome = runner.run(context).await?;

    if cli.json_output {
        let json = serde_json::to_string_pretty(&outcome)?;
        println!("{}", json);
    } else {
        print_outcome(&outcome, cli.verbose);
    }

    Ok(outcome.exit_code())
}

/// Parse 'Red,Blue'-style arguments into label pairs
fn parse_overlap_args(args: &[String]) -> Result<Vec<(String, String)>> {
    let mut overlaps = Vec::new();
    for arg in args {
        let parts: Vec<&str> = arg.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [a, b] if !a.is_empty() && !b.is_empty() => {
                overlaps.push((a.to_string(), b.to_string()));
            }
            _ => bail!(
                "Invalid overlap pair '{}'. Expected the form 'Red,Blue'.",
                arg
            ),
        }
    }
    Ok(overlaps)
}

fn print_outcome(outcome: &RunOutcome, verbose: bool) {
    let report = &outcome.report;

    eprintln!();
    if outcome.is_perfect() {
        eprintln!("{}", "=== PASS ===".bright_green().bold());
    } else {
        eprintln!("{}", "=== FAIL ===".bright_red().bold());
    }
    eprintln!("Circle count:       {}", report.circle_count_metric());
    eprintln!("Correct overlaps:   {}", report.correct_overlaps_metric());
    eprintln!("Incorrect overlaps: {}", report.incorrect_overlaps());
    eprintln!("Duration:           {:.1}s", outcome.total_duration_secs);

    if verbose {
        eprintln!();
        eprintln!("Found pairs:        {}", format_pairs(&report.found_pairs));
        eprintln!("Missed pairs:       {}", format_pairs(&report.missed_pairs));
        eprintln!(
            "Hallucinated pairs: {}",
            format_pairs(&report.hallucinated_pairs)
        );
        if report.parse_failed {
            eprintln!();
            eprintln!("{}", "Response was not well-formed SVG.".yellow());
        }
    }
}

fn format_pairs(pairs: &std::collections::BTreeSet<circlebench_eval::Pair>) -> String {
    if pairs.is_empty() {
        "none".to_string()
    } else {
        pairs
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overlap_args() {
        let overlaps = parse_overlap_args(&["Red,Blue".into(), " Blue , Green ".into()]).unwrap();
        assert_eq!(
            overlaps,
            vec![
                ("Red".to_string(), "Blue".to_string()),
                ("Blue".to_string(), "Green".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_overlap_args_rejects_malformed() {
        assert!(parse_overlap_args(&["Red".into()]).is_err());
        assert!(parse_overlap_args(&["Red,Blue,Green".into()]).is_err());
        assert!(parse_overlap_args(&["Red,".into()]).is_err());
    }

    #[test]
    fn test_run_failures_exit_2() {
        assert_eq!(resolve_exit_code(&Err(anyhow::anyhow!("no generator"))), 2);
    }

    #[test]
    fn test_scored_runs_keep_outcome_exit_code() {
        assert_eq!(resolve_exit_code(&Ok(0)), 0);
        assert_eq!(resolve_exit_code(&Ok(1)), 1);
    }
}
