use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{AnalysisId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Google,
    Github,
}

impl AuthProvider {
    pub fn label(self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::Github => "github",
        }
    }
}

impl FromStr for AuthProvider {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(AuthProvider::Google),
            "github" => Ok(AuthProvider::Github),
            other => Err(format!("unsupported auth provider: {other}")),
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub auth_provider: AuthProvider,
    pub auth_provider_id: String,
    pub github_username: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity already verified by the OAuth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthProfile {
    pub auth_provider_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "profilePictureUrl")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub github_username: Option<String>,
}

/// Opaque cookie token bound to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

/// Skills and activity a candidate submits for career-fit analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    #[serde(default)]
    pub github_username: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub contribution_freq: String,
    pub projects_count: u32,
    #[serde(default)]
    pub top_languages: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub recent_activity: Option<Value>,
    #[serde(default)]
    pub repository_stats: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAnalysis {
    pub id: AnalysisId,
    pub user_id: UserId,
    pub github_username: Option<String>,
    pub skills: Vec<String>,
    pub contribution_freq: String,
    pub projects_count: u32,
    pub top_languages: Option<BTreeMap<String, f64>>,
    pub recent_activity: Option<Value>,
    pub repository_stats: Option<Value>,
    pub target_role: String,
    pub dream_companies: Vec<String>,
    pub confidence_score: Option<f64>,
    pub reasoning: Option<String>,
    pub skill_gaps: Vec<String>,
    pub career_path: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ProfileAnalysis {
    pub fn view(&self) -> AnalysisView {
        AnalysisView {
            id: self.id.clone(),
            target_role: self.target_role.clone(),
            dream_companies: self.dream_companies.clone(),
            confidence_score: self.confidence_score,
            reasoning: self.reasoning.clone(),
            skill_gaps: self.skill_gaps.clone(),
            career_path: self.career_path.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    pub id: AnalysisId,
    pub target_role: String,
    pub dream_companies: Vec<String>,
    pub confidence_score: Option<f64>,
    pub reasoning: Option<String>,
    pub skill_gaps: Vec<String>,
    pub career_path: Vec<String>,
    pub created_at: DateTime<Utc>,
}
