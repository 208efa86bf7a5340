use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::CookieJar;
use serde_json::json;

use super::auth::{AuthService, CALLBACK_SIGNATURE_HEADER};
use super::domain::{AnalysisInput, AuthProvider};
use super::profile::ProfileService;
use super::repository::{AnalysisRepository, SessionStore, UserRepository};
use super::session::{session_token, CurrentUser};
use crate::clients::ai::AiBackend;
use crate::error::ServiceError;
use crate::extract::ApiJson;

/// Login callback, auth status and logout; none of these sit behind the session guard. The
/// callback instead requires a gateway signature over its body.
pub fn auth_router<U, S>(service: Arc<AuthService<U, S>>) -> Router
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    Router::new()
        .route(
            "/api/user/auth/:provider/callback",
            post(callback_handler::<U, S>),
        )
        .route("/api/user/auth/status", get(status_handler::<U, S>))
        .route("/api/user/auth/logout", post(logout_handler::<U, S>))
        .with_state(service)
}

/// Session-guarded profile endpoints.
pub fn profile_router<N, I>(service: Arc<ProfileService<N, I>>) -> Router
where
    N: AnalysisRepository + 'static,
    I: AiBackend + 'static,
{
    Router::new()
        .route("/api/user/profile", get(profile_handler))
        .route(
            "/api/user/profile/analysis",
            post(analyze_handler::<N, I>).get(analyses_handler::<N, I>),
        )
        .with_state(service)
}

pub(crate) async fn callback_handler<U, S>(
    State(service): State<Arc<AuthService<U, S>>>,
    jar: CookieJar,
    Path(provider): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    let provider: AuthProvider = provider.parse().map_err(ServiceError::NotFound)?;
    let signature = headers
        .get(CALLBACK_SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    let profile = service.verified_profile(provider, signature, &body)?;
    let (user, session) = service.login(provider, profile)?;
    let jar = jar.add(service.session_cookie(session.token));
    Ok((
        jar,
        Json(json!({ "user": user, "message": "Authentication successful" })),
    ))
}

pub(crate) async fn status_handler<U, S>(
    State(service): State<Arc<AuthService<U, S>>>,
    jar: CookieJar,
) -> impl IntoResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    let token = session_token(&jar, service.cookie_name());
    Json(service.status(token.as_deref()))
}

pub(crate) async fn logout_handler<U, S>(
    State(service): State<Arc<AuthService<U, S>>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ServiceError>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    let token = session_token(&jar, service.cookie_name());
    service.logout(token.as_deref())?;
    let jar = jar.remove(service.removal_cookie());
    Ok((jar, Json(json!({ "message": "Logout successful" }))))
}

pub(crate) async fn profile_handler(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> impl IntoResponse {
    Json(json!({ "user": user, "message": "Authentication successful" }))
}

pub(crate) async fn analyze_handler<N, I>(
    State(service): State<Arc<ProfileService<N, I>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(input): ApiJson<AnalysisInput>,
) -> Result<impl IntoResponse, ServiceError>
where
    N: AnalysisRepository + 'static,
    I: AiBackend + 'static,
{
    let analysis = service.analyze(&user, input).await?;
    Ok((StatusCode::CREATED, Json(analysis)))
}

pub(crate) async fn analyses_handler<N, I>(
    State(service): State<Arc<ProfileService<N, I>>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ServiceError>
where
    N: AnalysisRepository + 'static,
    I: AiBackend + 'static,
{
    Ok(Json(service.recent(&user.id)?))
}
