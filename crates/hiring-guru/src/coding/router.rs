use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use super::domain::{RunCodeRequest, SubmitCodeRequest};
use super::repository::SubmissionRepository;
use super::service::CodingService;
use crate::clients::judge::JudgeClient;
use crate::error::ServiceError;
use crate::extract::ApiJson;
use crate::hiring::repository::HiringProcessRepository;
use crate::ids::{RoundId, SubmissionId};
use crate::rounds::repository::QuestionRepository;
use crate::users::session::CurrentUser;

/// Router builder exposing code execution and submission endpoints.
pub fn coding_router<P, Q, S, J>(service: Arc<CodingService<P, Q, S, J>>) -> Router
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    S: SubmissionRepository + 'static,
    J: JudgeClient + 'static,
{
    Router::new()
        .route("/api/coding/run", post(run_handler::<P, Q, S, J>))
        .route("/api/coding/submit", post(submit_handler::<P, Q, S, J>))
        .route(
            "/api/coding/submissions/:round_id",
            get(history_handler::<P, Q, S, J>),
        )
        .route(
            "/api/coding/submission/:submission_id",
            get(detail_handler::<P, Q, S, J>),
        )
        .with_state(service)
}

pub(crate) async fn run_handler<P, Q, S, J>(
    State(service): State<Arc<CodingService<P, Q, S, J>>>,
    ApiJson(request): ApiJson<RunCodeRequest>,
) -> Result<impl IntoResponse, ServiceError>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    S: SubmissionRepository + 'static,
    J: JudgeClient + 'static,
{
    let outcome = service.run(request).await?;
    Ok(Json(outcome))
}

pub(crate) async fn submit_handler<P, Q, S, J>(
    State(service): State<Arc<CodingService<P, Q, S, J>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(request): ApiJson<SubmitCodeRequest>,
) -> Result<impl IntoResponse, ServiceError>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    S: SubmissionRepository + 'static,
    J: JudgeClient + 'static,
{
    let receipt = service.submit(&user.id, request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub(crate) async fn history_handler<P, Q, S, J>(
    State(service): State<Arc<CodingService<P, Q, S, J>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(round_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    S: SubmissionRepository + 'static,
    J: JudgeClient + 'static,
{
    let history = service.history(&user.id, &RoundId(round_id))?;
    Ok(Json(history))
}

pub(crate) async fn detail_handler<P, Q, S, J>(
    State(service): State<Arc<CodingService<P, Q, S, J>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(submission_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    P: HiringProcessRepository + 'static,
    Q: QuestionRepository + 'static,
    S: SubmissionRepository + 'static,
    J: JudgeClient + 'static,
{
    let submission = service.detail(&user.id, &SubmissionId(submission_id))?;
    Ok(Json(submission))
}
