//! Career-fit analysis through the AI backend with a skills-based fallback.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use super::domain::{AnalysisInput, AnalysisView, ProfileAnalysis, User};
use super::repository::AnalysisRepository;
use crate::clients::ai::{AiBackend, ProfileAnalysisRequest, ProfileAnalysisResponse};
use crate::error::ServiceError;
use crate::ids::{AnalysisId, UserId};

const RECENT_ANALYSES: usize = 10;

const FRONTEND_SKILLS: &[&str] = &["React", "Vue", "Angular", "JavaScript", "TypeScript"];
const BACKEND_SKILLS: &[&str] = &["Node.js", "Python", "Java", "Go", "Rust"];
const ML_SKILLS: &[&str] = &["Python", "TensorFlow", "PyTorch", "Scikit-learn"];
const DEVOPS_SKILLS: &[&str] = &["AWS", "Docker", "Kubernetes", "DevOps"];
const DREAM_COMPANIES: &[&str] = &["Google", "Microsoft", "Amazon", "Meta", "Apple"];

/// Deterministic analysis used whenever the AI backend cannot answer.
///
/// Role buckets are checked in order, so a Python skill lands in the backend bucket before the
/// machine learning one.
pub fn fallback_analysis(request: &ProfileAnalysisRequest) -> ProfileAnalysisResponse {
    let has_any = |bucket: &[&str]| {
        request
            .skills
            .iter()
            .any(|skill| bucket.contains(&skill.as_str()))
    };

    let target_role = if has_any(FRONTEND_SKILLS) {
        "Frontend Developer"
    } else if has_any(BACKEND_SKILLS) {
        "Backend Developer"
    } else if has_any(ML_SKILLS) {
        "Machine Learning Engineer"
    } else if has_any(DEVOPS_SKILLS) {
        "DevOps Engineer"
    } else {
        "Software Developer"
    };

    ProfileAnalysisResponse {
        target_role: target_role.to_string(),
        dream_companies: DREAM_COMPANIES
            .iter()
            .take(3)
            .map(|company| company.to_string())
            .collect(),
        confidence_score: Some(0.7),
        reasoning: Some("Generated based on detected skills and project activity".to_string()),
        skill_gaps: vec!["System Design".to_string(), "Advanced Algorithms".to_string()],
        career_path: ["Junior", "Senior", "Lead"]
            .iter()
            .map(|level| format!("{level} {target_role}"))
            .collect(),
    }
}

pub struct ProfileService<N, I> {
    analyses: Arc<N>,
    ai: Arc<I>,
}

impl<N, I> ProfileService<N, I>
where
    N: AnalysisRepository + 'static,
    I: AiBackend + 'static,
{
    pub fn new(analyses: Arc<N>, ai: Arc<I>) -> Self {
        Self { analyses, ai }
    }

    #[instrument(skip_all, fields(user = %user.id, skills = input.skills.len()))]
    pub async fn analyze(
        &self,
        user: &User,
        input: AnalysisInput,
    ) -> Result<AnalysisView, ServiceError> {
        if input.contribution_freq.trim().is_empty() {
            return Err(ServiceError::validation(
                "contributionFreq must not be empty",
            ));
        }

        let request = ProfileAnalysisRequest {
            skills: input.skills.clone(),
            contribution_freq: input.contribution_freq.clone(),
            projects_count: input.projects_count,
            top_languages: input.top_languages.clone(),
        };

        let response = match self.ai.analyze_profile(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "profile analysis unavailable, using fallback");
                fallback_analysis(&request)
            }
        };

        let analysis = self.analyses.insert(ProfileAnalysis {
            id: AnalysisId::generate(),
            user_id: user.id.clone(),
            github_username: input.github_username.or_else(|| user.github_username.clone()),
            skills: input.skills,
            contribution_freq: input.contribution_freq,
            projects_count: input.projects_count,
            top_languages: input.top_languages,
            recent_activity: input.recent_activity,
            repository_stats: input.repository_stats,
            target_role: response.target_role,
            dream_companies: response.dream_companies,
            confidence_score: response.confidence_score,
            reasoning: response.reasoning,
            skill_gaps: response.skill_gaps,
            career_path: response.career_path,
            created_at: Utc::now(),
        })?;

        info!(analysis = %analysis.id, role = %analysis.target_role, "profile analysed");
        Ok(analysis.view())
    }

    pub fn recent(&self, user: &UserId) -> Result<Vec<AnalysisView>, ServiceError> {
        Ok(self
            .analyses
            .recent_for_user(user, RECENT_ANALYSES)?
            .iter()
            .map(ProfileAnalysis::view)
            .collect())
    }
}
