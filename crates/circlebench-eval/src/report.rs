use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::Pair;

/// The scored outcome of evaluating one generated document.
///
/// Classification identities, always:
/// `found_pairs = correct_pairs ∪ hallucinated_pairs` and
/// `required = correct_pairs ∪ missed_pairs`, each union disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Circle elements successfully extracted from the markup.
    pub found_count: usize,
    /// Circle count the task asked for.
    pub expected_count: usize,
    /// Every overlap detected in the document.
    pub found_pairs: BTreeSet<Pair>,
    /// Detected overlaps that were required.
    pub correct_pairs: BTreeSet<Pair>,
    /// Required overlaps absent from the document.
    pub missed_pairs: BTreeSet<Pair>,
    /// Detected overlaps that were not required.
    pub hallucinated_pairs: BTreeSet<Pair>,
    /// True when the markup was rejected outright and scored as zero circles.
    pub parse_failed: bool,
}

impl EvalReport {
    /// Classify detected overlaps against the required set.
    pub fn classify(
        found_count: usize,
        expected_count: usize,
        found_pairs: BTreeSet<Pair>,
        required_pairs: &BTreeSet<Pair>,
    ) -> Self {
        let correct_pairs = found_pairs.intersection(required_pairs).cloned().collect();
        let missed_pairs = required_pairs.difference(&found_pairs).cloned().collect();
        let hallucinated_pairs = found_pairs.difference(required_pairs).cloned().collect();

        Self {
            found_count,
            expected_count,
            found_pairs,
            correct_pairs,
            missed_pairs,
            hallucinated_pairs,
            parse_failed: false,
        }
    }

    /// Report for a document that could not be parsed at all: zero circles,
    /// everything required is missed, nothing hallucinated.
    pub fn parse_failure(expected_count: usize, required_pairs: &BTreeSet<Pair>) -> Self {
        Self {
            found_count: 0,
            expected_count,
            found_pairs: BTreeSet::new(),
            correct_pairs: BTreeSet::new(),
            missed_pairs: required_pairs.clone(),
            hallucinated_pairs: BTreeSet::new(),
            parse_failed: true,
        }
    }

    /// Number of required overlaps.
    pub fn required_count(&self) -> usize {
        self.correct_pairs.len() + self.missed_pairs.len()
    }

    /// `found/expected` circle count metric, e.g. `3/3`.
    pub fn circle_count_metric(&self) -> String {
        format!("{}/{}", self.found_count, self.expected_count)
    }

    /// `found/required` correct-overlap metric, e.g. `1/2`.
    pub fn correct_overlaps_metric(&self) -> String {
        format!("{}/{}", self.correct_pairs.len(), self.required_count())
    }

    /// Number of overlaps present but not asked for.
    pub fn incorrect_overlaps(&self) -> usize {
        self.hallucinated_pairs.len()
    }

    /// Every constraint satisfied: right circle count, all required
    /// overlaps present, no extras.
    pub fn is_perfect(&self) -> bool {
        self.found_count == self.expected_count
            && self.missed_pairs.is_empty()
            && self.hallucinated_pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> BTreeSet<Pair> {
        items.iter().map(|(a, b)| Pair::new(*a, *b)).collect()
    }

    #[test]
    fn test_classification_partitions() {
        let found = pairs(&[("red", "blue"), ("blue", "green")]);
        let required = pairs(&[("red", "blue"), ("red", "green")]);

        let report = EvalReport::classify(3, 3, found.clone(), &required);

        assert_eq!(report.correct_pairs, pairs(&[("red", "blue")]));
        assert_eq!(report.missed_pairs, pairs(&[("red", "green")]));
        assert_eq!(report.hallucinated_pairs, pairs(&[("blue", "green")]));

        // found = correct ∪ hallucinated, required = correct ∪ missed
        let union: BTreeSet<Pair> = report
            .correct_pairs
            .union(&report.hallucinated_pairs)
            .cloned()
            .collect();
        assert_eq!(union, found);
        let req_union: BTreeSet<Pair> = report
            .correct_pairs
            .union(&report.missed_pairs)
            .cloned()
            .collect();
        assert_eq!(req_union, required);
        assert!(report.correct_pairs.is_disjoint(&report.hallucinated_pairs));
        assert!(report.correct_pairs.is_disjoint(&report.missed_pairs));
    }

    #[test]
    fn test_metric_strings() {
        let report = EvalReport::classify(
            2,
            3,
            pairs(&[("red", "blue"), ("blue", "green")]),
            &pairs(&[("red", "blue")]),
        );

        assert_eq!(report.circle_count_metric(), "2/3");
        assert_eq!(report.correct_overlaps_metric(), "1/1");
        assert_eq!(report.incorrect_overlaps(), 1);
        assert!(!report.is_perfect());
    }

    #[test]
    fn test_parse_failure_report() {
        let required = pairs(&[("red", "blue"), ("red", "green")]);
        let report = EvalReport::parse_failure(3, &required);

        assert!(report.parse_failed);
        assert_eq!(report.found_count, 0);
        assert_eq!(report.missed_pairs, required);
        assert!(report.found_pairs.is_empty());
        assert!(report.hallucinated_pairs.is_empty());
    }

    #[test]
    fn test_perfect_report() {
        let required = pairs(&[("red", "blue")]);
        let report = EvalReport::classify(3, 3, required.clone(), &required);
        assert!(report.is_perfect());
    }
}
