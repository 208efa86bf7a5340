use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{AuthProvider, AuthStatus, OAuthProfile, Session, User};
use super::repository::{SessionStore, UserRepository};
use crate::config::SessionConfig;
use crate::error::ServiceError;
use crate::ids::UserId;

/// Header carrying the gateway's signature over a login callback body.
pub const CALLBACK_SIGNATURE_HEADER: &str = "x-callback-signature";

type HmacSha256 = Hmac<Sha256>;

fn callback_mac(
    secret: &str,
    provider: AuthProvider,
    body: &[u8],
) -> Result<HmacSha256, ServiceError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| ServiceError::Unauthenticated)?;
    mac.update(provider.label().as_bytes());
    mac.update(b".");
    mac.update(body);
    Ok(mac)
}

/// Base64url HMAC-SHA256 over `provider.body`, as attached by the OAuth gateway after it has
/// completed the provider code exchange.
pub fn sign_callback(
    secret: &str,
    provider: AuthProvider,
    body: &[u8],
) -> Result<String, ServiceError> {
    let mac = callback_mac(secret, provider, body)?;
    Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

/// OAuth user upsert plus cookie-backed sessions.
pub struct AuthService<U, S> {
    users: Arc<U>,
    sessions: Arc<S>,
    config: SessionConfig,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>, config: SessionConfig) -> Self {
        Self {
            users,
            sessions,
            config,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Accepts a callback body only when the gateway signature matches; the profile inside is
    /// then trusted as provider-verified.
    pub fn verified_profile(
        &self,
        provider: AuthProvider,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<OAuthProfile, ServiceError> {
        if self.config.callback_secret.is_empty() {
            warn!(provider = %provider, "login callback refused: no callback secret configured");
            return Err(ServiceError::Unauthenticated);
        }

        let Some(signature) = signature.and_then(|raw| URL_SAFE_NO_PAD.decode(raw.trim()).ok())
        else {
            warn!(provider = %provider, "login callback without a readable signature");
            return Err(ServiceError::Unauthenticated);
        };

        if callback_mac(&self.config.callback_secret, provider, body)?
            .verify_slice(&signature)
            .is_err()
        {
            warn!(provider = %provider, "login callback signature mismatch");
            return Err(ServiceError::Unauthenticated);
        }

        serde_json::from_slice(body)
            .map_err(|err| ServiceError::validation(format!("invalid callback profile: {err}")))
    }

    /// Finds or creates the platform user behind a provider identity.
    ///
    /// A returning identity gets its GitHub username refreshed and `updated_at` touched. A new
    /// identity is refused when its GitHub username or email already belongs to another account.
    #[instrument(skip_all, fields(provider = %provider))]
    pub fn validate_oauth_user(
        &self,
        provider: AuthProvider,
        profile: OAuthProfile,
    ) -> Result<User, ServiceError> {
        if profile.auth_provider_id.trim().is_empty() {
            return Err(ServiceError::validation("authProviderId must not be empty"));
        }
        if !profile.email.contains('@') {
            return Err(ServiceError::validation("email must be a valid address"));
        }

        let github_username = profile
            .github_username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty() && provider == AuthProvider::Github)
            .map(str::to_string);
        let now = Utc::now();

        if let Some(mut user) = self
            .users
            .find_by_provider(provider, &profile.auth_provider_id)?
        {
            if github_username.is_some() && user.github_username != github_username {
                user.github_username = github_username;
            }
            user.updated_at = now;
            self.users.update(user.clone())?;
            return Ok(user);
        }

        if let Some(username) = github_username.as_deref() {
            if self.users.find_by_github_username(username)?.is_some() {
                return Err(ServiceError::Conflict(
                    "GitHub username already exists".to_string(),
                ));
            }
        }

        if self.users.find_by_email(&profile.email)?.is_some() {
            return Err(ServiceError::Conflict(
                "Account with this email already exists with different provider".to_string(),
            ));
        }

        let user = self.users.insert(User {
            id: UserId::generate(),
            email: profile.email,
            name: profile.name,
            avatar: profile.avatar,
            auth_provider: provider,
            auth_provider_id: profile.auth_provider_id,
            github_username,
            is_active: true,
            created_at: now,
            updated_at: now,
        })?;
        info!(user = %user.id, "user created from oauth identity");
        Ok(user)
    }

    pub fn login(
        &self,
        provider: AuthProvider,
        profile: OAuthProfile,
    ) -> Result<(User, Session), ServiceError> {
        let user = self.validate_oauth_user(provider, profile)?;
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            user_id: user.id.clone(),
            created_at: Utc::now(),
        };
        self.sessions.insert(session.clone())?;
        Ok((user, session))
    }

    /// Resolves a cookie token to an active user.
    pub fn authenticate(&self, token: &str) -> Result<User, ServiceError> {
        let session = self
            .sessions
            .fetch(token)?
            .ok_or(ServiceError::Unauthenticated)?;

        self.users
            .fetch(&session.user_id)?
            .filter(|user| user.is_active)
            .ok_or(ServiceError::Unauthenticated)
    }

    pub fn status(&self, token: Option<&str>) -> AuthStatus {
        let user = token.and_then(|token| self.authenticate(token).ok());
        AuthStatus {
            is_authenticated: user.is_some(),
            user,
        }
    }

    pub fn logout(&self, token: Option<&str>) -> Result<(), ServiceError> {
        if let Some(token) = token {
            if self.sessions.remove(token)? {
                info!("session destroyed");
            }
        }
        Ok(())
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.secure_cookie)
            .build()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), String::new()))
            .path("/")
            .build()
    }
}
