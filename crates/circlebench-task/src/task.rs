use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

use circlebench_eval::Pair;

use crate::TaskPrompts;

/// Display-cased colors available for circle labels, in assignment order.
pub const COLOR_PALETTE: &[&str] = &["Red", "Blue", "Green", "Yellow", "Purple", "Orange"];

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("circle count must be at least 1")]
    ZeroCircles,

    #[error("task asks for {requested} circles but only {available} colors are defined")]
    TooManyCircles { requested: usize, available: usize },

    #[error("overlap pair names the same circle twice: {0}")]
    SelfPair(String),

    #[error("overlap pair references a circle not in this task: {0}")]
    UnknownLabel(String),
}

/// A geometric constraint task: draw N labeled circles so that exactly the
/// required pairs overlap.
///
/// Labels are drawn from [`COLOR_PALETTE`] in order; required pairs are
/// normalized to unordered, lowercase form and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    required_count: usize,
    labels: Vec<String>,
    required_pairs: BTreeSet<Pair>,
}

impl Task {
    pub fn new<I, A, B>(required_count: usize, overlaps: I) -> Result<Self, TaskError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        if required_count == 0 {
            return Err(TaskError::ZeroCircles);
        }
        if required_count > COLOR_PALETTE.len() {
            return Err(TaskError::TooManyCircles {
                requested: required_count,
                available: COLOR_PALETTE.len(),
            });
        }

        let labels: Vec<String> = COLOR_PALETTE[..required_count]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let assigned: BTreeSet<String> =
            labels.iter().map(|l| l.to_ascii_lowercase()).collect();

        let mut required_pairs = BTreeSet::new();
        for (a, b) in overlaps {
            let pair = Pair::new(a, b);
            if pair.is_self_pair() {
                return Err(TaskError::SelfPair(pair.first().to_string()));
            }
            for label in [pair.first(), pair.second()] {
                if !assigned.contains(label) {
                    return Err(TaskError::UnknownLabel(label.to_string()));
                }
            }
            required_pairs.insert(pair);
        }

        debug!(
            circles = required_count,
            overlaps = required_pairs.len(),
            "constructed task"
        );

        Ok(Self {
            required_count,
            labels,
            required_pairs,
        })
    }

    /// Number of circles the generated document must contain.
    pub fn required_count(&self) -> usize {
        self.required_count
    }

    /// Assigned color labels, display-cased, in palette order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The normalized, deduplicated set of required overlap pairs.
    pub fn required_pairs(&self) -> &BTreeSet<Pair> {
        &self.required_pairs
    }

    /// The generation prompt stating the task's constraints.
    pub fn prompt(&self) -> String {
        TaskPrompts::build_generation_prompt(&self.labels, &self.required_pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_task() {
        let task = Task::new(3, [("Red", "Blue")]).unwrap();
        assert_eq!(task.required_count(), 3);
        assert_eq!(task.labels(), &["Red", "Blue", "Green"]);
        assert!(task.required_pairs().contains(&Pair::new("red", "blue")));
    }

    #[test]
    fn test_zero_circles_rejected() {
        let result = Task::new(0, [("Red", "Blue")]);
        assert!(matches!(result, Err(TaskError::ZeroCircles)));
    }

    #[test]
    fn test_too_many_circles_rejected() {
        let result = Task::new(7, Vec::<(&str, &str)>::new());
        assert!(matches!(
            result,
            Err(TaskError::TooManyCircles { requested: 7, .. })
        ));
    }

    #[test]
    fn test_self_pair_rejected() {
        let result = Task::new(3, [("Red", "red")]);
        assert!(matches!(result, Err(TaskError::SelfPair(_))));
    }

    #[test]
    fn test_unknown_label_rejected() {
        // Purple exists in the palette but is not among the first three.
        let result = Task::new(3, [("Red", "Purple")]);
        assert!(matches!(result, Err(TaskError::UnknownLabel(_))));
    }

    #[test]
    fn test_pairs_deduplicated_across_order_and_case() {
        let task = Task::new(3, [("Red", "Blue"), ("blue", "RED")]).unwrap();
        assert_eq!(task.required_pairs().len(), 1);
    }

    #[test]
    fn test_no_overlaps_is_valid() {
        let task = Task::new(2, Vec::<(&str, &str)>::new()).unwrap();
        assert!(task.required_pairs().is_empty());
    }
}
