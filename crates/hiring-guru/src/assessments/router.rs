use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use super::domain::{CreateAssessmentRequest, UpdateAssessmentRequest};
use super::repository::AssessmentRepository;
use super::service::AssessmentService;
use crate::error::ServiceError;
use crate::extract::ApiJson;
use crate::hiring::repository::HiringProcessRepository;
use crate::ids::AssessmentId;
use crate::users::session::CurrentUser;

/// Predefined catalogue and custom assessment authoring endpoints.
pub fn assessment_router<A, P>(service: Arc<AssessmentService<A, P>>) -> Router
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    Router::new()
        .route(
            "/api/predefined-assessments",
            get(predefined_list_handler::<A, P>),
        )
        .route(
            "/api/predefined-assessments/:assessment_id",
            get(predefined_get_handler::<A, P>),
        )
        .route(
            "/api/custom-assessments",
            get(custom_list_handler::<A, P>).post(custom_create_handler::<A, P>),
        )
        .route(
            "/api/custom-assessments/:assessment_id",
            get(custom_get_handler::<A, P>).put(custom_update_handler::<A, P>),
        )
        .with_state(service)
}

pub(crate) async fn predefined_list_handler<A, P>(
    State(service): State<Arc<AssessmentService<A, P>>>,
) -> Result<impl IntoResponse, ServiceError>
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    Ok(Json(service.predefined()?))
}

pub(crate) async fn predefined_get_handler<A, P>(
    State(service): State<Arc<AssessmentService<A, P>>>,
    Path(assessment_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    Ok(Json(service.predefined_by_id(&AssessmentId(assessment_id))?))
}

pub(crate) async fn custom_create_handler<A, P>(
    State(service): State<Arc<AssessmentService<A, P>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(request): ApiJson<CreateAssessmentRequest>,
) -> Result<impl IntoResponse, ServiceError>
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    let created = service.create_custom(&user.id, request)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(crate) async fn custom_list_handler<A, P>(
    State(service): State<Arc<AssessmentService<A, P>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError>
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    Ok(Json(service.custom_for_owner(&user.id)?))
}

pub(crate) async fn custom_get_handler<A, P>(
    State(service): State<Arc<AssessmentService<A, P>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(assessment_id): Path<String>,
) -> Result<impl IntoResponse, ServiceError>
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    Ok(Json(
        service.custom_by_id(&user.id, &AssessmentId(assessment_id))?,
    ))
}

pub(crate) async fn custom_update_handler<A, P>(
    State(service): State<Arc<AssessmentService<A, P>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(assessment_id): Path<String>,
    ApiJson(request): ApiJson<UpdateAssessmentRequest>,
) -> Result<impl IntoResponse, ServiceError>
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    Ok(Json(service.update_custom(
        &user.id,
        &AssessmentId(assessment_id),
        request,
    )?))
}
