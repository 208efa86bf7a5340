use std::sync::Arc;

use axum::Router;

use crate::assessments::domain::RoundType;
use crate::hiring::domain::ProcessDetail;
use crate::memory::{InMemoryProcesses, InMemoryQuestions};
use crate::rounds::domain::{
    AnswerInput, GenerateQuestionsRequest, GenerationDifficulty, GenerationRoundType,
    SubmitAnswersRequest,
};
use crate::rounds::{round_router, RoundService};
use crate::ids::{QuestionId, RoundId};
use crate::test_support::{as_user, user, FakeAi, Stores};

pub(super) type TestRoundService = RoundService<InMemoryProcesses, InMemoryQuestions, FakeAi>;

pub(super) struct Harness {
    pub(super) stores: Stores,
    pub(super) ai: Arc<FakeAi>,
    pub(super) service: Arc<TestRoundService>,
    pub(super) process: ProcessDetail,
}

impl Harness {
    /// Candidate "alice" with a fresh process of the given rounds.
    pub(super) fn new(ai: FakeAi, round_types: &[RoundType]) -> Self {
        let stores = Stores::default();
        let process = stores.start_process(&user("alice").id, round_types);
        let ai = Arc::new(ai);
        let service = Arc::new(RoundService::new(
            stores.processes.clone(),
            stores.questions.clone(),
            ai.clone(),
        ));
        Self {
            stores,
            ai,
            service,
            process,
        }
    }

    pub(super) fn round(&self, index: usize) -> RoundId {
        self.process.rounds[index].id.clone()
    }

    pub(super) fn router_for(&self, who: &str) -> Router {
        as_user(round_router(self.service.clone()), user(who))
    }
}

pub(super) fn generation(round_id: &RoundId, count: u8) -> GenerateQuestionsRequest {
    GenerateQuestionsRequest {
        round_id: round_id.clone(),
        round_type: GenerationRoundType::Technical,
        difficulty: GenerationDifficulty::Medium,
        question_count: count,
        category: Some("databases".to_string()),
        duration: 30,
    }
}

pub(super) fn answers(round_id: &RoundId, question_ids: &[QuestionId]) -> SubmitAnswersRequest {
    SubmitAnswersRequest {
        round_id: round_id.clone(),
        answers: question_ids
            .iter()
            .map(|id| AnswerInput {
                question_id: id.clone(),
                answer: format!("answer to {id}"),
                time_spent: 60,
            })
            .collect(),
        total_time_spent: 600,
    }
}

/// Lets spawned verification tasks run on the current-thread test runtime.
pub(super) async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
