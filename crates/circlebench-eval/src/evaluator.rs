use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::{detect_overlaps, parser, EvalReport, Pair};

/// Inputs required to score one generated document.
#[derive(Clone, Copy)]
pub struct EvaluationInput<'a> {
    /// Raw model output; may contain markdown fences and prose around the SVG.
    pub raw_markup: &'a str,
    /// The overlap pairs the task requires.
    pub required_pairs: &'a BTreeSet<Pair>,
    /// The circle count the task requires.
    pub expected_count: usize,
}

/// Score raw model output against the required overlap structure.
///
/// Never fails: markup that does not parse as a document at all is scored
/// as zero circles with every required pair missed, so a bad generation
/// degrades into a failing result instead of aborting a benchmark run.
pub fn evaluate(input: EvaluationInput<'_>) -> EvalReport {
    let scene = match parser::parse_circles(input.raw_markup) {
        Ok(scene) => scene,
        Err(e) => {
            warn!(error = %e, "markup rejected, scoring as zero circles");
            return EvalReport::parse_failure(input.expected_count, input.required_pairs);
        }
    };

    let found_pairs = detect_overlaps(&scene.by_label());

    debug!(
        circles = scene.circle_count(),
        overlaps = found_pairs.len(),
        "evaluated scene"
    );

    EvalReport::classify(
        scene.circle_count(),
        input.expected_count,
        found_pairs,
        input.required_pairs,
    )
}
