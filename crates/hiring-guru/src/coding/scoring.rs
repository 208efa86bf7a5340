//! Test summaries and submission scoring.

use serde::Serialize;

use super::domain::{SubmissionStatus, TestResult};

const CORRECTNESS_WEIGHT: f64 = 80.0;
const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    /// Percentage of passing cases.
    pub success_rate: f64,
    pub status: SubmissionStatus,
    pub avg_execution_time: Option<f64>,
    pub avg_memory: Option<f64>,
}

impl TestSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let total_tests = results.len();
        let passed_tests = results.iter().filter(|result| result.passed).count();
        let success_rate = if total_tests == 0 {
            0.0
        } else {
            passed_tests as f64 / total_tests as f64 * 100.0
        };
        let status = if total_tests > 0 && passed_tests == total_tests {
            SubmissionStatus::Accepted
        } else {
            SubmissionStatus::Failed
        };

        Self {
            total_tests,
            passed_tests,
            failed_tests: total_tests - passed_tests,
            success_rate,
            status,
            avg_execution_time: mean(results.iter().filter_map(|result| result.execution_time)),
            avg_memory: mean(
                results
                    .iter()
                    .filter_map(|result| result.memory.map(|memory| memory as f64)),
            ),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Step bonus for fast solutions, in points.
pub fn efficiency_bonus(avg_time: f64) -> f64 {
    if avg_time < 0.1 {
        20.0
    } else if avg_time < 0.5 {
        15.0
    } else if avg_time < 1.0 {
        10.0
    } else {
        5.0
    }
}

/// 80 points for correctness plus the efficiency bonus when every case passes, capped at 100.
///
/// The bonus averages reported times over all cases, so a case without timing counts as zero.
pub fn score(results: &[TestResult]) -> f64 {
    let total = results.len();
    if total == 0 {
        return 0.0;
    }

    let passed = results.iter().filter(|result| result.passed).count();
    let base = passed as f64 / total as f64 * CORRECTNESS_WEIGHT;

    let bonus = if passed == total {
        let time_sum: f64 = results.iter().filter_map(|result| result.execution_time).sum();
        efficiency_bonus(time_sum / total as f64)
    } else {
        0.0
    };

    (base + bonus).min(MAX_SCORE)
}
