//! Fixtures and fakes shared by the component test suites.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::response::Response;
use axum::{Extension, Router};
use chrono::Utc;
use serde_json::Value;

use crate::assessments::domain::{
    Assessment, AssessmentKind, DifficultyLevel, RoundTemplate, RoundType,
};
use crate::assessments::repository::AssessmentRepository;
use crate::config::SessionConfig;
use crate::clients::ai::{
    AiBackend, AiBackendError, GeneratedQuestion, GeneratedQuestionSet, ProfileAnalysisRequest,
    ProfileAnalysisResponse, QuestionGenerationRequest, VerificationPayload,
};
use crate::clients::judge::{ExecutionRequest, ExecutionResult, JudgeClient, JudgeError};
use crate::hiring::domain::{ProcessDetail, StartProcessRequest};
use crate::hiring::repository::HiringProcessRepository;
use crate::hiring::service::HiringProcessService;
use crate::ids::{AssessmentId, QuestionId, RoundId, RoundTemplateId, UserId};
use crate::memory::{
    InMemoryAnalyses, InMemoryAssessments, InMemoryProcesses, InMemoryQuestions,
    InMemorySessions, InMemorySubmissions, InMemoryUsers,
};
use crate::rounds::domain::{Question, QuestionType, RoundStatus};
use crate::rounds::repository::QuestionRepository;
use crate::users::domain::{AuthProvider, User};
use crate::users::session::CurrentUser;
use crate::users::{sign_callback, CALLBACK_SIGNATURE_HEADER};

pub(crate) const CALLBACK_SECRET: &str = "gateway-shared-secret";

/// Session settings with the callback secret the fixtures sign with.
pub(crate) fn session_config() -> SessionConfig {
    SessionConfig {
        callback_secret: CALLBACK_SECRET.to_string(),
        ..SessionConfig::default()
    }
}

pub(crate) fn user(id: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::from(id),
        email: format!("{id}@example.com"),
        name: Some(format!("Candidate {id}")),
        avatar: None,
        auth_provider: AuthProvider::Github,
        auth_provider_id: format!("gh-{id}"),
        github_username: Some(id.to_string()),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn template(round_type: RoundType, sequence: u32, duration: u32) -> RoundTemplate {
    RoundTemplate {
        id: RoundTemplateId::generate(),
        round_type,
        name: format!("{round_type:?} round"),
        description: None,
        duration,
        sequence,
        config: Value::Null,
    }
}

pub(crate) fn predefined(name: &str, round_types: &[RoundType]) -> Assessment {
    let now = Utc::now();
    let rounds: Vec<RoundTemplate> = round_types
        .iter()
        .enumerate()
        .map(|(index, round_type)| template(*round_type, index as u32 + 1, 30))
        .collect();
    Assessment {
        id: AssessmentId::generate(),
        kind: AssessmentKind::Predefined,
        owner: None,
        name: name.to_string(),
        description: None,
        difficulty: DifficultyLevel::Medium,
        total_duration: rounds.iter().map(|round| round.duration).sum(),
        round_count: rounds.len() as u32,
        is_active: true,
        rounds,
        created_at: now,
        updated_at: now,
    }
}

/// Every in-memory store, shared between services under test.
#[derive(Default, Clone)]
pub(crate) struct Stores {
    pub(crate) assessments: Arc<InMemoryAssessments>,
    pub(crate) processes: Arc<InMemoryProcesses>,
    pub(crate) questions: Arc<InMemoryQuestions>,
    pub(crate) submissions: Arc<InMemorySubmissions>,
    pub(crate) users: Arc<InMemoryUsers>,
    pub(crate) sessions: Arc<InMemorySessions>,
    pub(crate) analyses: Arc<InMemoryAnalyses>,
}

impl Stores {
    /// Seeds a predefined assessment with the given rounds and starts a process on it.
    pub(crate) fn start_process(&self, user: &UserId, round_types: &[RoundType]) -> ProcessDetail {
        let assessment = self
            .assessments
            .insert(predefined("Fixture", round_types))
            .expect("assessment stored");
        HiringProcessService::new(self.assessments.clone(), self.processes.clone())
            .start(
                user,
                StartProcessRequest {
                    assessment_type: AssessmentKind::Predefined,
                    predefined_assessment_id: Some(assessment.id),
                    custom_assessment_id: None,
                },
            )
            .expect("process started")
    }

    pub(crate) fn set_round_status(&self, round_id: &RoundId, status: RoundStatus) {
        let mut round = self
            .processes
            .fetch_round(round_id)
            .expect("repository available")
            .expect("round exists");
        round.status = status;
        self.processes.update_round(round).expect("round updated");
    }

    pub(crate) fn round_status(&self, round_id: &RoundId) -> RoundStatus {
        self.processes
            .fetch_round(round_id)
            .expect("repository available")
            .expect("round exists")
            .status
    }

    pub(crate) fn add_question(&self, round_id: &RoundId, content: &str) -> Question {
        let question = Question {
            id: QuestionId::generate(),
            round_id: round_id.clone(),
            content: content.to_string(),
            question_type: QuestionType::Subjective,
            difficulty: "medium".to_string(),
            category: None,
            options: Vec::new(),
            correct_answer: Some("expected".to_string()),
            generated_by: "fixture".to_string(),
            prompt: "fixture".to_string(),
            created_at: Utc::now(),
        };
        self.questions
            .insert_questions(vec![question.clone()])
            .expect("question stored");
        question
    }
}

enum JudgeMode {
    Echo { time: &'static str },
    Fail,
}

/// Judge fake that echoes stdin back as stdout.
pub(crate) struct ScriptedJudge {
    mode: JudgeMode,
    requests: Mutex<Vec<ExecutionRequest>>,
}

impl ScriptedJudge {
    pub(crate) fn echo() -> Self {
        Self::echo_taking("0.05")
    }

    pub(crate) fn echo_taking(time: &'static str) -> Self {
        Self {
            mode: JudgeMode::Echo { time },
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            mode: JudgeMode::Fail,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ExecutionRequest> {
        self.requests.lock().expect("judge mutex").clone()
    }
}

#[async_trait]
impl JudgeClient for ScriptedJudge {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, JudgeError> {
        self.requests
            .lock()
            .expect("judge mutex")
            .push(request.clone());

        match self.mode {
            JudgeMode::Echo { time } => Ok(ExecutionResult {
                status: "Accepted".to_string(),
                stdout: request.stdin.as_ref().map(|stdin| format!("{stdin}\n")),
                time: Some(time.to_string()),
                memory: Some(1024),
                exit_code: Some(0),
                ..ExecutionResult::default()
            }),
            JudgeMode::Fail => Err(JudgeError::Rejected {
                status: 503,
                body: "judge offline".to_string(),
            }),
        }
    }
}

/// AI backend fake that records calls and can be switched offline.
#[derive(Default)]
pub(crate) struct FakeAi {
    offline: bool,
    question_count: usize,
    analysis: Option<ProfileAnalysisResponse>,
    generation_requests: Mutex<Vec<QuestionGenerationRequest>>,
    verifications: Mutex<Vec<VerificationPayload>>,
}

impl FakeAi {
    pub(crate) fn with_questions(count: usize) -> Self {
        Self {
            question_count: count,
            ..Self::default()
        }
    }

    pub(crate) fn analysing(response: ProfileAnalysisResponse) -> Self {
        Self {
            analysis: Some(response),
            ..Self::default()
        }
    }

    pub(crate) fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub(crate) fn generation_requests(&self) -> Vec<QuestionGenerationRequest> {
        self.generation_requests.lock().expect("ai mutex").clone()
    }

    pub(crate) fn verifications(&self) -> Vec<VerificationPayload> {
        self.verifications.lock().expect("ai mutex").clone()
    }

    fn unavailable() -> AiBackendError {
        AiBackendError::Rejected {
            status: 503,
            body: "model offline".to_string(),
        }
    }
}

#[async_trait]
impl AiBackend for FakeAi {
    async fn generate_questions(
        &self,
        request: &QuestionGenerationRequest,
    ) -> Result<GeneratedQuestionSet, AiBackendError> {
        self.generation_requests
            .lock()
            .expect("ai mutex")
            .push(request.clone());
        if self.offline {
            return Err(Self::unavailable());
        }

        let questions = (0..self.question_count)
            .map(|index| {
                if index % 2 == 0 {
                    GeneratedQuestion {
                        content: format!("Question {index}: pick one"),
                        question_type: QuestionType::Mcq,
                        difficulty: "medium".to_string(),
                        category: Some("fundamentals".to_string()),
                        options: Some(vec!["A".to_string(), "B".to_string()]),
                        correct_answer: Some("A".to_string()),
                    }
                } else {
                    GeneratedQuestion {
                        content: format!("Question {index}: explain"),
                        question_type: QuestionType::Subjective,
                        difficulty: "medium".to_string(),
                        category: None,
                        options: None,
                        correct_answer: None,
                    }
                }
            })
            .collect();
        Ok(GeneratedQuestionSet { questions })
    }

    async fn verify_answers(&self, payload: &VerificationPayload) -> Result<(), AiBackendError> {
        self.verifications
            .lock()
            .expect("ai mutex")
            .push(payload.clone());
        if self.offline {
            return Err(Self::unavailable());
        }
        Ok(())
    }

    async fn analyze_profile(
        &self,
        _request: &ProfileAnalysisRequest,
    ) -> Result<ProfileAnalysisResponse, AiBackendError> {
        if self.offline {
            return Err(Self::unavailable());
        }
        self.analysis.clone().ok_or_else(Self::unavailable)
    }
}

/// Injects the session user the guard would normally provide.
pub(crate) fn as_user(router: Router, user: User) -> Router {
    router.layer(Extension(CurrentUser(user)))
}

pub(crate) async fn read_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(crate) fn json_request(method: &str, uri: &str, body: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serializable"),
        ))
        .expect("request builds")
}

pub(crate) fn get_request(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .expect("request builds")
}

/// Login callback signed the way the OAuth gateway signs it.
pub(crate) fn signed_callback(
    provider: AuthProvider,
    body: &Value,
) -> axum::http::Request<axum::body::Body> {
    let bytes = serde_json::to_vec(body).expect("serializable");
    let signature = sign_callback(CALLBACK_SECRET, provider, &bytes).expect("signed");
    axum::http::Request::builder()
        .method("POST")
        .uri(format!("/api/user/auth/{}/callback", provider.label()))
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .header(CALLBACK_SIGNATURE_HEADER, signature)
        .body(axum::body::Body::from(bytes))
        .expect("request builds")
}
