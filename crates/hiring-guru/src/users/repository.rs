use super::domain::{AuthProvider, ProfileAnalysis, Session, User};
use crate::ids::UserId;
use crate::repository::RepositoryError;

pub trait UserRepository: Send + Sync {
    fn insert(&self, user: User) -> Result<User, RepositoryError>;
    fn update(&self, user: User) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    fn find_by_provider(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> Result<Option<User>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    fn find_by_github_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
}

/// Server-side session storage keyed by cookie token.
pub trait SessionStore: Send + Sync {
    fn insert(&self, session: Session) -> Result<(), RepositoryError>;
    fn fetch(&self, token: &str) -> Result<Option<Session>, RepositoryError>;
    /// Returns whether a session was removed.
    fn remove(&self, token: &str) -> Result<bool, RepositoryError>;
}

pub trait AnalysisRepository: Send + Sync {
    fn insert(&self, analysis: ProfileAnalysis) -> Result<ProfileAnalysis, RepositoryError>;
    /// Newest first, at most `limit` entries.
    fn recent_for_user(
        &self,
        user: &UserId,
        limit: usize,
    ) -> Result<Vec<ProfileAnalysis>, RepositoryError>;
}
