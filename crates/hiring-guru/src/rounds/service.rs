use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use super::domain::{
    AnswersReceipt, GenerateQuestionsRequest, GeneratedQuestions, InvalidTransition, Question,
    Round, RoundQuestions, RoundResponse, RoundStatus, RoundStatusView, SubmitAnswersRequest,
};
use super::repository::QuestionRepository;
use crate::clients::ai::{
    AiBackend, QuestionGenerationRequest, VerificationItem, VerificationPayload,
};
use crate::error::ServiceError;
use crate::hiring::domain::ProcessStatus;
use crate::hiring::repository::HiringProcessRepository;
use crate::ids::{QuestionId, ResponseId, RoundId, UserId};
use crate::repository::RepositoryError;

const GENERATED_BY: &str = "ai-backend";
const MAX_QUESTIONS: u8 = 50;

impl From<InvalidTransition> for ServiceError {
    fn from(value: InvalidTransition) -> Self {
        ServiceError::StateConflict(value.to_string())
    }
}

fn generation_refused() -> ServiceError {
    ServiceError::StateConflict("Round is not in a state to generate questions".to_string())
}

/// Loads a round and hides it from anyone but its candidate.
pub(crate) fn owned_round<P>(
    processes: &P,
    round_id: &RoundId,
    user: &UserId,
) -> Result<Round, ServiceError>
where
    P: HiringProcessRepository + ?Sized,
{
    processes
        .fetch_round(round_id)?
        .filter(|round| &round.user_id == user)
        .ok_or_else(|| ServiceError::not_found("Round not found"))
}

/// Drives a round through question generation, answering and completion.
pub struct RoundService<P, Q, I> {
    processes: Arc<P>,
    questions: Arc<Q>,
    ai: Arc<I>,
}

impl<P, Q, I> RoundService<P, Q, I>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    I: AiBackend + 'static,
{
    pub fn new(processes: Arc<P>, questions: Arc<Q>, ai: Arc<I>) -> Self {
        Self {
            processes,
            questions,
            ai,
        }
    }

    #[instrument(skip_all, fields(user = %user, round = %request.round_id))]
    pub async fn generate_questions(
        &self,
        user: &UserId,
        request: GenerateQuestionsRequest,
    ) -> Result<GeneratedQuestions, ServiceError> {
        if request.question_count == 0 || request.question_count > MAX_QUESTIONS {
            return Err(ServiceError::validation(format!(
                "questionCount must be between 1 and {MAX_QUESTIONS}"
            )));
        }
        if request.duration == 0 {
            return Err(ServiceError::validation("duration must be at least 1"));
        }

        let round = owned_round(self.processes.as_ref(), &request.round_id, user)?;
        if !round.status.accepts_generation() {
            return Err(generation_refused());
        }

        let generated = self
            .ai
            .generate_questions(&QuestionGenerationRequest {
                round_type: request.round_type,
                difficulty: request.difficulty,
                question_count: request.question_count,
                category: request.category.clone(),
                duration: request.duration,
            })
            .await?;

        // The round may have moved on while the backend was generating.
        let mut round = owned_round(self.processes.as_ref(), &request.round_id, user)?;
        if !round.status.accepts_generation() {
            warn!(status = ?round.status, "round left preparation during generation");
            return Err(generation_refused());
        }
        let expected = round.status;
        let now = Utc::now();
        round.transition(RoundStatus::InPreparation, now)?;
        let round_id = round.id.clone();
        self.save_transition(round, expected)?;

        let prompt = format!(
            "Generated for {} round with difficulty {}",
            request.round_type.label(),
            request.difficulty.label()
        );
        let questions: Vec<Question> = generated
            .questions
            .into_iter()
            .map(|question| Question {
                id: QuestionId::generate(),
                round_id: round_id.clone(),
                content: question.content,
                question_type: question.question_type,
                difficulty: question.difficulty,
                category: question.category,
                options: question.options.unwrap_or_default(),
                correct_answer: question.correct_answer,
                generated_by: GENERATED_BY.to_string(),
                prompt: prompt.clone(),
                created_at: now,
            })
            .collect();
        let stored = self.questions.insert_questions(questions)?;

        info!(stored = stored.len(), "round questions generated");
        Ok(GeneratedQuestions {
            success: true,
            round_id: request.round_id,
            total_questions: stored.len(),
            questions: stored.iter().map(Question::view).collect(),
            estimated_duration: request.duration,
        })
    }

    pub fn start(&self, user: &UserId, round_id: &RoundId) -> Result<RoundStatusView, ServiceError> {
        let mut round = owned_round(self.processes.as_ref(), round_id, user)?;
        let expected = round.status;
        round.transition(RoundStatus::InProgress, Utc::now())?;
        let view = round.status_view();
        self.save_transition(round, expected)?;
        info!(round = %round_id, "round started");
        Ok(view)
    }

    #[instrument(skip_all, fields(user = %user, round = %request.round_id))]
    pub async fn submit_answers(
        &self,
        user: &UserId,
        request: SubmitAnswersRequest,
    ) -> Result<AnswersReceipt, ServiceError> {
        let round = owned_round(self.processes.as_ref(), &request.round_id, user)?;
        if round.status != RoundStatus::InProgress {
            return Err(ServiceError::StateConflict(
                "Round is not in progress".to_string(),
            ));
        }
        if request.answers.is_empty() {
            return Err(ServiceError::validation("At least one answer is required"));
        }

        let questions: HashMap<QuestionId, Question> = self
            .questions
            .questions_for_round(&round.id)?
            .into_iter()
            .map(|question| (question.id.clone(), question))
            .collect();

        let invalid: Vec<&str> = request
            .answers
            .iter()
            .filter(|answer| !questions.contains_key(&answer.question_id))
            .map(|answer| answer.question_id.as_str())
            .collect();
        if !invalid.is_empty() {
            return Err(ServiceError::validation(format!(
                "Invalid question IDs: {}",
                invalid.join(", ")
            )));
        }

        let now = Utc::now();
        let responses: Vec<RoundResponse> = request
            .answers
            .iter()
            .map(|answer| RoundResponse {
                id: ResponseId::generate(),
                round_id: round.id.clone(),
                question_id: answer.question_id.clone(),
                content: answer.answer.clone(),
                time_spent: answer.time_spent,
                submitted_at: now,
            })
            .collect();
        let stored = self.questions.insert_responses(responses)?;
        let submission_id = stored
            .first()
            .map(|response| response.id.clone())
            .ok_or_else(|| ServiceError::validation("At least one answer is required"))?;

        let round_id = round.id.clone();
        self.finish_round(round, Some(request.total_time_spent), now)?;

        let payload = VerificationPayload {
            submission_id: submission_id.clone(),
            round_id: round_id.clone(),
            questions_and_answers: request
                .answers
                .into_iter()
                .filter_map(|answer| {
                    let question = questions.get(&answer.question_id)?;
                    Some(VerificationItem {
                        question_id: answer.question_id,
                        question: question.content.clone(),
                        user_answer: answer.answer,
                        question_type: question.question_type,
                        correct_answer: question.correct_answer.clone(),
                    })
                })
                .collect(),
        };
        self.dispatch_verification(payload);

        Ok(AnswersReceipt {
            success: true,
            round_id,
            submission_id,
            message: "Answers submitted successfully. AI verification in progress.".to_string(),
        })
    }

    /// Completes a round that has no answers to collect, such as a coding round.
    pub fn complete(
        &self,
        user: &UserId,
        round_id: &RoundId,
    ) -> Result<RoundStatusView, ServiceError> {
        let round = owned_round(self.processes.as_ref(), round_id, user)?;
        self.finish_round(round, None, Utc::now())
    }

    pub fn questions(&self, user: &UserId, round_id: &RoundId) -> Result<RoundQuestions, ServiceError> {
        let round = owned_round(self.processes.as_ref(), round_id, user)?;
        let questions = self.questions.questions_for_round(&round.id)?;
        Ok(RoundQuestions {
            success: true,
            round_id: round.id,
            total_questions: questions.len(),
            questions: questions.iter().map(Question::public_view).collect(),
        })
    }

    pub fn status(&self, user: &UserId, round_id: &RoundId) -> Result<RoundStatusView, ServiceError> {
        owned_round(self.processes.as_ref(), round_id, user).map(|round| round.status_view())
    }

    fn finish_round(
        &self,
        mut round: Round,
        time_spent: Option<u32>,
        at: DateTime<Utc>,
    ) -> Result<RoundStatusView, ServiceError> {
        let expected = round.status;
        round.transition(RoundStatus::Completed, at)?;
        if time_spent.is_some() {
            round.time_spent = time_spent;
        }
        let view = round.status_view();
        let process_id = round.process_id.clone();
        self.save_transition(round, expected)?;

        let rounds = self.processes.rounds_for_process(&process_id)?;
        if rounds
            .iter()
            .all(|round| round.status == RoundStatus::Completed)
        {
            if let Some(mut process) = self.processes.fetch_process(&process_id)? {
                if process.status != ProcessStatus::Completed {
                    process.status = ProcessStatus::Completed;
                    process.completed_at = Some(at);
                    self.processes.update_process(process)?;
                    info!(process = %process_id, "hiring process completed");
                }
            }
        }

        Ok(view)
    }

    /// Writes a transitioned round only if nobody changed its status since it was read.
    fn save_transition(&self, round: Round, expected: RoundStatus) -> Result<(), ServiceError> {
        self.processes
            .update_round_if(round, expected)
            .map_err(|err| match err {
                RepositoryError::Conflict => ServiceError::StateConflict(
                    "Round changed while the request was in flight".to_string(),
                ),
                other => other.into(),
            })
    }

    /// Forwards answers for scoring; failures are logged and dropped.
    pub(crate) fn dispatch_verification(&self, payload: VerificationPayload) -> JoinHandle<()> {
        let ai = Arc::clone(&self.ai);
        tokio::spawn(async move {
            if let Err(err) = ai.verify_answers(&payload).await {
                warn!(
                    submission = %payload.submission_id,
                    error = %err,
                    "answer verification dispatch failed"
                );
            }
        })
    }
}
