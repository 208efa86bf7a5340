use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::languages::Language;
use super::scoring::TestSummary;
use crate::clients::judge::ExecutionResult;
use crate::ids::{QuestionId, RoundId, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default)]
    pub input: String,
    pub expected_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Verdict for one test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Accepted,
    Failed,
}

/// Persisted, immutable record of a scored coding submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingSubmission {
    pub id: SubmissionId,
    pub round_id: RoundId,
    pub question_id: QuestionId,
    pub code: String,
    pub language: Language,
    pub status: SubmissionStatus,
    /// Mean seconds over the cases that reported a time.
    pub execution_time: Option<f64>,
    /// Mean kilobytes over the cases that reported memory.
    pub memory_used: Option<f64>,
    pub test_results: Vec<TestResult>,
    pub score: f64,
    pub submitted_at: DateTime<Utc>,
    pub evaluated_at: DateTime<Utc>,
}

impl CodingSubmission {
    #[cfg(test)]
    pub(crate) fn recomputed_score(&self) -> f64 {
        super::scoring::score(&self.test_results)
    }

    pub fn history_entry(&self) -> SubmissionHistoryEntry {
        SubmissionHistoryEntry {
            id: self.id.clone(),
            language: self.language,
            status: self.status,
            score: self.score,
            execution_time: self.execution_time,
            memory_used: self.memory_used,
            submitted_at: self.submitted_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionHistoryEntry {
    pub id: SubmissionId,
    pub language: Language,
    pub status: SubmissionStatus,
    pub score: f64,
    pub execution_time: Option<f64>,
    pub memory_used: Option<f64>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCodeRequest {
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub round_id: Option<RoundId>,
    #[serde(default)]
    pub question_id: Option<QuestionId>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub stdin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCodeRequest {
    pub code: String,
    pub language: String,
    pub round_id: RoundId,
    pub question_id: QuestionId,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// Dry-run outcome: per-case verdicts when test cases were supplied, otherwise one raw run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RunOutcome {
    Cases {
        success: bool,
        results: Vec<TestResult>,
        summary: TestSummary,
    },
    Single {
        success: bool,
        result: ExecutionResult,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub success: bool,
    pub submission_id: SubmissionId,
    pub score: f64,
    pub summary: TestSummary,
    pub test_results: Vec<TestResult>,
}
