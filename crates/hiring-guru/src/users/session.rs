//! Session guard for routes that need an authenticated user.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use axum_extra::extract::CookieJar;
use tracing::warn;

use super::auth::AuthService;
use super::domain::User;
use super::repository::{SessionStore, UserRepository};
use crate::error::ServiceError;

/// The authenticated user, inserted into request extensions by [`require_session`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub fn session_token(jar: &CookieJar, cookie_name: &str) -> Option<String> {
    jar.get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

pub async fn require_session<U, S>(
    State(auth): State<Arc<AuthService<U, S>>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    let Some(token) = session_token(&jar, auth.cookie_name()) else {
        warn!(path = %request.uri().path(), "session cookie missing");
        return ServiceError::Unauthenticated.into_response();
    };

    match auth.authenticate(&token) {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Err(err) => {
            warn!(path = %request.uri().path(), error = %err, "session rejected");
            err.into_response()
        }
    }
}

/// Wraps every route of `router` in the session guard.
pub fn guarded<U, S>(router: Router, auth: Arc<AuthService<U, S>>) -> Router
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    router.layer(middleware::from_fn_with_state(auth, require_session::<U, S>))
}
