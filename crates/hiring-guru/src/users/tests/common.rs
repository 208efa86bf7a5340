use std::sync::Arc;

use axum::Router;

use crate::memory::{InMemoryAnalyses, InMemorySessions, InMemoryUsers};
use crate::test_support::{session_config, FakeAi, Stores};
use crate::users::domain::{AnalysisInput, OAuthProfile};
use crate::users::{auth_router, guarded, profile_router, AuthService, ProfileService};

pub(super) type TestAuthService = AuthService<InMemoryUsers, InMemorySessions>;
pub(super) type TestProfileService = ProfileService<InMemoryAnalyses, FakeAi>;

pub(super) fn auth(stores: &Stores) -> Arc<TestAuthService> {
    Arc::new(AuthService::new(
        stores.users.clone(),
        stores.sessions.clone(),
        session_config(),
    ))
}

pub(super) fn profiles(stores: &Stores, ai: FakeAi) -> Arc<TestProfileService> {
    Arc::new(ProfileService::new(stores.analyses.clone(), Arc::new(ai)))
}

/// Auth routes open, profile routes behind the session guard.
pub(super) fn app(stores: &Stores, ai: FakeAi) -> (Router, Arc<TestAuthService>) {
    let auth = auth(stores);
    let router = auth_router(auth.clone()).merge(guarded(
        profile_router(profiles(stores, ai)),
        auth.clone(),
    ));
    (router, auth)
}

pub(super) fn github_profile(id: &str, email: &str, username: &str) -> OAuthProfile {
    OAuthProfile {
        auth_provider_id: id.to_string(),
        email: email.to_string(),
        name: Some("Ada Lovelace".to_string()),
        avatar: None,
        github_username: Some(username.to_string()),
    }
}

pub(super) fn analysis_input(skills: &[&str]) -> AnalysisInput {
    AnalysisInput {
        github_username: None,
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        contribution_freq: "weekly".to_string(),
        projects_count: 12,
        top_languages: None,
        recent_activity: None,
        repository_stats: None,
    }
}
