use std::sync::Arc;

use axum::Router;

use crate::assessments::domain::RoundType;
use crate::coding::domain::{SubmitCodeRequest, TestCase};
use crate::coding::{coding_router, CodingService};
use crate::ids::{QuestionId, RoundId};
use crate::memory::{InMemoryProcesses, InMemoryQuestions, InMemorySubmissions};
use crate::rounds::domain::RoundStatus;
use crate::test_support::{as_user, user, ScriptedJudge, Stores};

pub(super) type TestCodingService =
    CodingService<InMemoryProcesses, InMemoryQuestions, InMemorySubmissions, ScriptedJudge>;

pub(super) struct Harness {
    pub(super) stores: Stores,
    pub(super) judge: Arc<ScriptedJudge>,
    pub(super) service: Arc<TestCodingService>,
    pub(super) round_id: RoundId,
    pub(super) question_id: QuestionId,
}

impl Harness {
    /// A candidate "alice" with one coding round already in progress.
    pub(super) fn in_progress(judge: ScriptedJudge) -> Self {
        let stores = Stores::default();
        let detail = stores.start_process(&user("alice").id, &[RoundType::Coding]);
        let round_id = detail.rounds[0].id.clone();
        stores.set_round_status(&round_id, RoundStatus::InProgress);
        let question = stores.add_question(&round_id, "Echo the input");

        let judge = Arc::new(judge);
        let service = Arc::new(CodingService::new(
            stores.processes.clone(),
            stores.questions.clone(),
            stores.submissions.clone(),
            judge.clone(),
        ));

        Self {
            stores,
            judge,
            service,
            round_id,
            question_id: question.id,
        }
    }

    pub(super) fn router_for(&self, who: &str) -> Router {
        as_user(coding_router(self.service.clone()), user(who))
    }

    pub(super) fn submission(&self, cases: Vec<TestCase>) -> SubmitCodeRequest {
        SubmitCodeRequest {
            code: "print(input())".to_string(),
            language: "python".to_string(),
            round_id: self.round_id.clone(),
            question_id: self.question_id.clone(),
            test_cases: cases,
        }
    }
}

pub(super) fn case(input: &str, expected: &str) -> TestCase {
    TestCase {
        input: input.to_string(),
        expected_output: expected.to_string(),
        description: None,
    }
}
