use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use hiring_guru::assessments::{assessment_router, AssessmentService};
use hiring_guru::clients::{AiBackend, JudgeClient};
use hiring_guru::coding::{coding_router, CodingService};
use hiring_guru::config::SessionConfig;
use hiring_guru::hiring::{hiring_router, HiringProcessService};
use hiring_guru::rounds::{round_router, RoundService};
use hiring_guru::users::{auth_router, guarded, profile_router, AuthService, ProfileService};
use serde_json::json;

use crate::infra::{AppState, Stores};

/// Merges every component router; everything except login, status and logout sits behind the
/// session guard.
pub(crate) fn api_router<J, I>(
    stores: &Stores,
    judge: Arc<J>,
    ai: Arc<I>,
    session: SessionConfig,
) -> Router
where
    J: JudgeClient + 'static,
    I: AiBackend + 'static,
{
    let auth = Arc::new(AuthService::new(
        stores.users.clone(),
        stores.sessions.clone(),
        session,
    ));

    let protected = Router::new()
        .merge(profile_router(Arc::new(ProfileService::new(
            stores.analyses.clone(),
            ai.clone(),
        ))))
        .merge(assessment_router(Arc::new(AssessmentService::new(
            stores.assessments.clone(),
            stores.processes.clone(),
        ))))
        .merge(hiring_router(Arc::new(HiringProcessService::new(
            stores.assessments.clone(),
            stores.processes.clone(),
        ))))
        .merge(round_router(Arc::new(RoundService::new(
            stores.processes.clone(),
            stores.questions.clone(),
            ai,
        ))))
        .merge(coding_router(Arc::new(CodingService::new(
            stores.processes.clone(),
            stores.questions.clone(),
            stores.submissions.clone(),
            judge,
        ))));

    auth_router(auth.clone())
        .merge(guarded(protected, auth))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Acquire);
    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "initializing")
    };

    (status, Json(json!({ "status": label })))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
