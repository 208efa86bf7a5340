use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use super::domain::{
    CodingSubmission, RunCodeRequest, RunOutcome, SubmissionHistoryEntry, SubmissionReceipt,
    SubmitCodeRequest,
};
use super::execution::{execution_request, run_test_cases};
use super::languages::{Language, UnsupportedLanguage};
use super::repository::SubmissionRepository;
use super::scoring::{score, TestSummary};
use crate::clients::judge::JudgeClient;
use crate::error::ServiceError;
use crate::hiring::repository::HiringProcessRepository;
use crate::ids::{RoundId, SubmissionId, UserId};
use crate::rounds::domain::RoundStatus;
use crate::rounds::repository::QuestionRepository;
use crate::rounds::service::owned_round;

impl From<UnsupportedLanguage> for ServiceError {
    fn from(value: UnsupportedLanguage) -> Self {
        ServiceError::Validation(value.to_string())
    }
}

/// Runs candidate code against the judge and records scored submissions.
pub struct CodingService<P, Q, S, J> {
    processes: Arc<P>,
    questions: Arc<Q>,
    submissions: Arc<S>,
    judge: Arc<J>,
}

impl<P, Q, S, J> CodingService<P, Q, S, J>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    S: SubmissionRepository + 'static,
    J: JudgeClient + 'static,
{
    pub fn new(processes: Arc<P>, questions: Arc<Q>, submissions: Arc<S>, judge: Arc<J>) -> Self {
        Self {
            processes,
            questions,
            submissions,
            judge,
        }
    }

    /// Dry run without persistence or round checks.
    #[instrument(skip_all, fields(language = %request.language, cases = request.test_cases.len()))]
    pub async fn run(&self, request: RunCodeRequest) -> Result<RunOutcome, ServiceError> {
        let language = parse_language(&request.code, &request.language)?;

        if request.test_cases.is_empty() {
            let execution = execution_request(&request.code, language, request.stdin.as_deref());
            let result = self.judge.execute(&execution).await?;
            return Ok(RunOutcome::Single {
                success: true,
                result,
            });
        }

        let results =
            run_test_cases(self.judge.as_ref(), &request.code, language, &request.test_cases)
                .await?;
        let summary = TestSummary::from_results(&results);
        Ok(RunOutcome::Cases {
            success: true,
            results,
            summary,
        })
    }

    #[instrument(skip_all, fields(user = %user, round = %request.round_id))]
    pub async fn submit(
        &self,
        user: &UserId,
        request: SubmitCodeRequest,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let round = owned_round(self.processes.as_ref(), &request.round_id, user)?;

        self.questions
            .fetch_question(&request.question_id)?
            .filter(|question| question.round_id == round.id)
            .ok_or_else(|| ServiceError::not_found("Question not found in this round"))?;

        if round.status != RoundStatus::InProgress {
            return Err(ServiceError::StateConflict(
                "Round is not in progress".to_string(),
            ));
        }

        let language = parse_language(&request.code, &request.language)?;
        if request.test_cases.is_empty() {
            return Err(ServiceError::validation(
                "At least one test case is required",
            ));
        }

        let results =
            run_test_cases(self.judge.as_ref(), &request.code, language, &request.test_cases)
                .await?;
        let summary = TestSummary::from_results(&results);
        let score = score(&results);
        let now = Utc::now();

        let stored = self.submissions.insert(CodingSubmission {
            id: SubmissionId::generate(),
            round_id: round.id,
            question_id: request.question_id,
            code: request.code,
            language,
            status: summary.status,
            execution_time: summary.avg_execution_time,
            memory_used: summary.avg_memory,
            test_results: results,
            score,
            submitted_at: now,
            evaluated_at: now,
        })?;

        info!(
            submission = %stored.id,
            passed = summary.passed_tests,
            total = summary.total_tests,
            score,
            "coding submission scored"
        );

        Ok(SubmissionReceipt {
            success: true,
            submission_id: stored.id,
            score,
            summary,
            test_results: stored.test_results,
        })
    }

    pub fn history(
        &self,
        user: &UserId,
        round_id: &RoundId,
    ) -> Result<Vec<SubmissionHistoryEntry>, ServiceError> {
        owned_round(self.processes.as_ref(), round_id, user)?;
        let submissions = self.submissions.for_round(round_id)?;
        Ok(submissions
            .iter()
            .map(CodingSubmission::history_entry)
            .collect())
    }

    pub fn detail(
        &self,
        user: &UserId,
        submission_id: &SubmissionId,
    ) -> Result<CodingSubmission, ServiceError> {
        let submission = self
            .submissions
            .fetch(submission_id)?
            .ok_or_else(|| ServiceError::not_found("Submission not found"))?;

        owned_round(self.processes.as_ref(), &submission.round_id, user)
            .map_err(|_| ServiceError::not_found("Submission not found"))?;

        Ok(submission)
    }
}

fn parse_language(code: &str, language: &str) -> Result<Language, ServiceError> {
    if code.trim().is_empty() {
        return Err(ServiceError::validation("code must not be empty"));
    }
    Ok(language.parse::<Language>()?)
}
