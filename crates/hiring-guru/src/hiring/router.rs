use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use super::domain::StartProcessRequest;
use super::repository::HiringProcessRepository;
use super::service::HiringProcessService;
use crate::assessments::repository::AssessmentRepository;
use crate::error::ServiceError;
use crate::extract::ApiJson;
use crate::ids::ProcessId;
use crate::users::session::CurrentUser;

pub fn hiring_router<A, P>(service: Arc<HiringProcessService<A, P>>) -> Router
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    Router::new()
        .route("/api/hiring-processes/start", post(start_handler::<A, P>))
        .route("/api/hiring-processes", get(list_handler::<A, P>))
        .route("/api/hiring-processes/:process_id", get(get_handler::<A, P>))
        .with_state(service)
}

pub(crate) async fn start_handler<A, P>(
    State(service): State<Arc<HiringProcessService<A, P>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(request): ApiJson<StartProcessRequest>,
) -> Result<impl IntoResponse, ServiceError>
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    let detail = service.start(&user.id, request)?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub(crate) async fn list_handler<A, P>(
    State(service): State<Arc<HiringProcessService<A, P>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError>
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    Ok(Json(service.list(&user.id)?))
}

pub(crate) async fn get_handler<A, P>(
    State(service): State<Arc<HiringProcessService<A, P>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(process_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    Ok(Json(service.get(&user.id, &ProcessId(process_id))?))
}
