//! Builds judge requests and turns judge output into per-case verdicts.

use tracing::debug;

use super::domain::{TestCase, TestResult};
use super::languages::Language;
use crate::clients::judge::{ExecutionRequest, ExecutionResult, JudgeClient, JudgeError};

pub fn execution_request(code: &str, language: Language, stdin: Option<&str>) -> ExecutionRequest {
    ExecutionRequest {
        source_code: code.to_string(),
        language_id: language.judge_id(),
        stdin: stdin.map(str::to_string),
    }
}

/// A case passes only when the judge produced stdout matching the expected output after trimming.
pub fn evaluate_case(case: &TestCase, result: &ExecutionResult) -> TestResult {
    let expected_output = case.expected_output.trim().to_string();
    let actual = result.stdout.as_deref().map(str::trim);

    TestResult {
        input: case.input.clone(),
        passed: actual == Some(expected_output.as_str()),
        actual_output: actual.unwrap_or_default().to_string(),
        expected_output,
        execution_time: result.time_seconds(),
        memory: result.memory,
    }
}

/// Runs every case one after another; the first judge failure aborts the batch.
pub async fn run_test_cases<J>(
    judge: &J,
    code: &str,
    language: Language,
    cases: &[TestCase],
) -> Result<Vec<TestResult>, JudgeError>
where
    J: JudgeClient + ?Sized,
{
    let mut results = Vec::with_capacity(cases.len());
    for (index, case) in cases.iter().enumerate() {
        let request = execution_request(code, language, Some(&case.input));
        let outcome = judge.execute(&request).await?;
        let verdict = evaluate_case(case, &outcome);
        debug!(case = index, passed = verdict.passed, status = %outcome.status, "test case evaluated");
        results.push(verdict);
    }
    Ok(results)
}
