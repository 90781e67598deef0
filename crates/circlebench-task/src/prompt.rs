use std::collections::BTreeSet;
use std::fmt::Write as _;

use circlebench_eval::Pair;

/// Prompt templates for the generation request.
pub struct TaskPrompts;

impl TaskPrompts {
    /// Build the generation prompt for a circle-overlap task.
    ///
    /// Deterministic for a given task: labels in palette order, required
    /// pairs in canonical set order. The enumerated facts (count, colors,
    /// overlap clauses) are the contract; the prose around them is not.
    pub fn build_generation_prompt(labels: &[String], required_pairs: &BTreeSet<Pair>) -> String {
        let mut prompt = format!(
            "Create a valid SVG code block containing exactly {} circles. \
             The circles must be filled with these colors: {}. \n\
             Use standard <circle cx='...' cy='...' r='...' fill='...' /> tags.\n\n\
             CRITICAL GEOMETRY REQUIREMENTS:\n",
            labels.len(),
            labels.join(", "),
        );

        if required_pairs.is_empty() {
            prompt.push_str("- No circles should overlap.\n");
        } else {
            for pair in required_pairs {
                let _ = writeln!(
                    prompt,
                    "- The {} circle MUST overlap with the {} circle.",
                    display_label(labels, pair.first()),
                    display_label(labels, pair.second())
                );
            }
        }

        prompt.push_str("- Any pair of circles not listed above must NOT overlap.\n");
        prompt.push_str("Return only the SVG code.");
        prompt
    }
}

/// Map a normalized pair label back to its display-cased form so the
/// overlap clauses match the color list.
fn display_label<'a>(labels: &'a [String], label: &'a str) -> &'a str {
    labels
        .iter()
        .find(|l| l.eq_ignore_ascii_case(label))
        .map(String::as_str)
        .unwrap_or(label)
}
