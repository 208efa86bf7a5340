//! Identity: OAuth user upsert, cookie sessions, the session guard and profile analysis.

pub mod auth;
pub mod domain;
pub mod profile;
pub mod repository;
pub mod router;
pub mod session;

#[cfg(test)]
mod tests;

pub use auth::{sign_callback, AuthService, CALLBACK_SIGNATURE_HEADER};
pub use domain::{
    AnalysisInput, AnalysisView, AuthProvider, AuthStatus, OAuthProfile, ProfileAnalysis,
    Session, User,
};
pub use profile::{fallback_analysis, ProfileService};
pub use repository::{AnalysisRepository, SessionStore, UserRepository};
pub use router::{auth_router, profile_router};
pub use session::{guarded, require_session, CurrentUser};
