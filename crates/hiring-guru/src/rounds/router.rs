use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use super::domain::{GenerateQuestionsRequest, SubmitAnswersRequest};
use super::repository::QuestionRepository;
use super::service::RoundService;
use crate::clients::ai::AiBackend;
use crate::error::ServiceError;
use crate::extract::ApiJson;
use crate::hiring::repository::HiringProcessRepository;
use crate::ids::RoundId;
use crate::users::session::CurrentUser;

pub fn round_router<P, Q, I>(service: Arc<RoundService<P, Q, I>>) -> Router
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    I: AiBackend + 'static,
{
    Router::new()
        .route(
            "/api/rounds/generate-questions",
            post(generate_handler::<P, Q, I>),
        )
        .route("/api/rounds/submit-answers", post(submit_handler::<P, Q, I>))
        .route("/api/rounds/:round_id/start", post(start_handler::<P, Q, I>))
        .route(
            "/api/rounds/:round_id/complete",
            post(complete_handler::<P, Q, I>),
        )
        .route(
            "/api/rounds/:round_id/questions",
            get(questions_handler::<P, Q, I>),
        )
        .route("/api/rounds/:round_id/status", get(status_handler::<P, Q, I>))
        .with_state(service)
}

pub(crate) async fn generate_handler<P, Q, I>(
    State(service): State<Arc<RoundService<P, Q, I>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(request): ApiJson<GenerateQuestionsRequest>,
) -> Result<impl IntoResponse, ServiceError>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    I: AiBackend + 'static,
{
    let generated = service.generate_questions(&user.id, request).await?;
    Ok((StatusCode::CREATED, Json(generated)))
}

pub(crate) async fn submit_handler<P, Q, I>(
    State(service): State<Arc<RoundService<P, Q, I>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(request): ApiJson<SubmitAnswersRequest>,
) -> Result<impl IntoResponse, ServiceError>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    I: AiBackend + 'static,
{
    let receipt = service.submit_answers(&user.id, request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub(crate) async fn start_handler<P, Q, I>(
    State(service): State<Arc<RoundService<P, Q, I>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(round_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    I: AiBackend + 'static,
{
    Ok(Json(service.start(&user.id, &RoundId(round_id))?))
}

pub(crate) async fn complete_handler<P, Q, I>(
    State(service): State<Arc<RoundService<P, Q, I>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(round_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    I: AiBackend + 'static,
{
    Ok(Json(service.complete(&user.id, &RoundId(round_id))?))
}

pub(crate) async fn questions_handler<P, Q, I>(
    State(service): State<Arc<RoundService<P, Q, I>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(round_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    I: AiBackend + 'static,
{
    Ok(Json(service.questions(&user.id, &RoundId(round_id))?))
}

pub(crate) async fn status_handler<P, Q, I>(
    State(service): State<Arc<RoundService<P, Q, I>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(round_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    I: AiBackend + 'static,
{
    let round = service.status(&user.id, &RoundId(round_id))?;
    Ok(Json(serde_json::json!({ "success": true, "round": round })))
}
