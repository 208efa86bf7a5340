//! Client for the AI backend: question generation, answer verification and profile analysis.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::AiBackendConfig;
use crate::ids::{QuestionId, ResponseId, RoundId};
use crate::rounds::domain::{GenerationDifficulty, GenerationRoundType, QuestionType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionGenerationRequest {
    pub round_type: GenerationRoundType,
    pub difficulty: GenerationDifficulty,
    pub question_count: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratedQuestionSet {
    #[serde(default)]
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub content: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_answer: Option<String>,
}

/// Answers forwarded for asynchronous scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload {
    pub submission_id: ResponseId,
    pub round_id: RoundId,
    pub questions_and_answers: Vec<VerificationItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationItem {
    pub question_id: QuestionId,
    pub question: String,
    pub user_answer: String,
    pub question_type: QuestionType,
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysisRequest {
    pub skills: Vec<String>,
    pub contribution_freq: String,
    pub projects_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_languages: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysisResponse {
    pub target_role: String,
    #[serde(default)]
    pub dream_companies: Vec<String>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub skill_gaps: Vec<String>,
    #[serde(default)]
    pub career_path: Vec<String>,
}

/// Operations delegated to the AI backend.
#[async_trait]
pub trait AiBackend: Send + Sync {
    async fn generate_questions(
        &self,
        request: &QuestionGenerationRequest,
    ) -> Result<GeneratedQuestionSet, AiBackendError>;

    async fn verify_answers(&self, payload: &VerificationPayload) -> Result<(), AiBackendError>;

    async fn analyze_profile(
        &self,
        request: &ProfileAnalysisRequest,
    ) -> Result<ProfileAnalysisResponse, AiBackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AiBackendError {
    #[error("ai backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("ai backend responded with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub struct HttpAiBackend {
    http: Client,
    config: AiBackendConfig,
}

impl HttpAiBackend {
    pub fn new(config: AiBackendConfig) -> Result<Self, AiBackendError> {
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        bearer: Option<&str>,
        timeout: Option<Duration>,
    ) -> RequestBuilder {
        let mut request = self.http.post(self.endpoint(path)).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        request
    }
}

async fn ensure_success(response: Response) -> Result<Response, AiBackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AiBackendError::Rejected {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl AiBackend for HttpAiBackend {
    #[instrument(skip_all, fields(round_type = ?request.round_type, count = request.question_count))]
    async fn generate_questions(
        &self,
        request: &QuestionGenerationRequest,
    ) -> Result<GeneratedQuestionSet, AiBackendError> {
        let response = self
            .post("generate-questions", request, None, None)
            .send()
            .await?;
        let set: GeneratedQuestionSet = ensure_success(response).await?.json().await?;
        debug!(received = set.questions.len(), "questions generated");
        Ok(set)
    }

    #[instrument(skip_all, fields(submission_id = %payload.submission_id))]
    async fn verify_answers(&self, payload: &VerificationPayload) -> Result<(), AiBackendError> {
        let response = self
            .post(
                "verify-answers",
                payload,
                Some(&self.config.verification_token),
                None,
            )
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(skills = request.skills.len()))]
    async fn analyze_profile(
        &self,
        request: &ProfileAnalysisRequest,
    ) -> Result<ProfileAnalysisResponse, AiBackendError> {
        let response = self
            .post(
                "analyze",
                request,
                Some(&self.config.api_key),
                Some(self.config.profile_timeout),
            )
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer, timeout: Duration) -> HttpAiBackend {
        HttpAiBackend::new(AiBackendConfig {
            base_url: server.uri(),
            verification_token: "verify-token".to_string(),
            api_key: "analysis-key".to_string(),
            profile_timeout: timeout,
        })
        .expect("client builds")
    }

    #[tokio::test]
    async fn generate_questions_posts_camel_case_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate-questions"))
            .and(body_json(json!({
                "roundType": "TECHNICAL",
                "difficulty": "medium",
                "questionCount": 2,
                "duration": 30
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "questions": [
                    {
                        "content": "What is ownership?",
                        "type": "SUBJECTIVE",
                        "difficulty": "medium"
                    },
                    {
                        "content": "Which trait enables `?` conversion?",
                        "type": "MCQ",
                        "difficulty": "medium",
                        "category": "rust",
                        "options": ["From", "Into", "AsRef"],
                        "correctAnswer": "From"
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let set = backend_for(&server, Duration::from_secs(5))
            .generate_questions(&QuestionGenerationRequest {
                round_type: GenerationRoundType::Technical,
                difficulty: GenerationDifficulty::Medium,
                question_count: 2,
                category: None,
                duration: 30,
            })
            .await
            .expect("questions returned");

        assert_eq!(set.questions.len(), 2);
        assert_eq!(set.questions[0].question_type, QuestionType::Subjective);
        assert_eq!(set.questions[1].correct_answer.as_deref(), Some("From"));
        assert_eq!(set.questions[1].options.as_ref().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn verify_answers_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/verify-answers"))
            .and(header("Authorization", "Bearer verify-token"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let payload = VerificationPayload {
            submission_id: ResponseId::from("resp-1"),
            round_id: RoundId::from("round-1"),
            questions_and_answers: vec![VerificationItem {
                question_id: QuestionId::from("q-1"),
                question: "Explain borrowing".to_string(),
                user_answer: "References without ownership".to_string(),
                question_type: QuestionType::Subjective,
                correct_answer: None,
            }],
        };

        backend_for(&server, Duration::from_secs(5))
            .verify_answers(&payload)
            .await
            .expect("verification accepted");
    }

    #[tokio::test]
    async fn analyze_profile_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(header("Authorization", "Bearer analysis-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_json(json!({ "targetRole": "Backend Developer" })),
            )
            .mount(&server)
            .await;

        let err = backend_for(&server, Duration::from_millis(50))
            .analyze_profile(&ProfileAnalysisRequest {
                skills: vec!["Rust".to_string()],
                contribution_freq: "daily".to_string(),
                projects_count: 4,
                top_languages: None,
            })
            .await
            .expect_err("times out");

        match err {
            AiBackendError::Http(inner) => assert!(inner.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejected_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model offline"))
            .mount(&server)
            .await;

        let err = backend_for(&server, Duration::from_secs(5))
            .analyze_profile(&ProfileAnalysisRequest {
                skills: Vec::new(),
                contribution_freq: "rarely".to_string(),
                projects_count: 0,
                top_languages: None,
            })
            .await
            .expect_err("rejected");

        assert!(matches!(err, AiBackendError::Rejected { status: 500, .. }));
    }
}
