use serde::{Deserialize, Serialize};

use circlebench_eval::EvalReport;

/// The final outcome of one benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// The scored evaluation of the generated markup
    pub report: EvalReport,
    /// Exit code of the generator process
    pub generator_exit_code: i32,
    /// Time spent waiting on the generator
    pub generation_duration_secs: f64,
    /// Wall-clock time for the whole run
    pub total_duration_secs: f64,
}

impl RunOutcome {
    /// All constraints satisfied by the generated document
    pub fn is_perfect(&self) -> bool {
        self.report.is_perfect()
    }

    /// Process exit code: 0 when every constraint was met, 1 otherwise.
    /// Run-level failures (generator missing, task invalid) exit 2 from
    /// the binary before an outcome exists.
    pub fn exit_code(&self) -> i32 {
        if self.is_perfect() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use circlebench_eval::Pair;
    use std::collections::BTreeSet;

    fn outcome(found: &[(&str, &str)], required: &[(&str, &str)], count: usize) -> RunOutcome {
        let found: BTreeSet<Pair> = found.iter().map(|(a, b)| Pair::new(*a, *b)).collect();
        let required: BTreeSet<Pair> = required.iter().map(|(a, b)| Pair::new(*a, *b)).collect();
        RunOutcome {
            report: EvalReport::classify(count, count, found, &required),
            generator_exit_code: 0,
            generation_duration_secs: 0.1,
            total_duration_secs: 0.2,
        }
    }

    #[test]
    fn test_perfect_run_exits_0() {
        let outcome = outcome(&[("red", "blue")], &[("red", "blue")], 3);
        assert!(outcome.is_perfect());
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn test_imperfect_run_exits_1() {
        let outcome = outcome(&[("blue", "green")], &[("red", "blue")], 3);
        assert!(!outcome.is_perfect());
        assert_eq!(outcome.exit_code(), 1);
    }
}
