use std::sync::Arc;

use axum::Router;

use crate::assessments::domain::{
    CreateAssessmentRequest, DifficultyLevel, RoundTemplateDraft, RoundType,
};
use crate::assessments::{assessment_router, AssessmentService};
use crate::memory::{InMemoryAssessments, InMemoryProcesses};
use crate::test_support::{as_user, user, Stores};

pub(super) type TestAssessmentService = AssessmentService<InMemoryAssessments, InMemoryProcesses>;

pub(super) fn service(stores: &Stores) -> Arc<TestAssessmentService> {
    Arc::new(AssessmentService::new(
        stores.assessments.clone(),
        stores.processes.clone(),
    ))
}

pub(super) fn router_for(stores: &Stores, who: &str) -> Router {
    as_user(assessment_router(service(stores)), user(who))
}

pub(super) fn draft(round_type: RoundType, sequence: u32, duration: u32) -> RoundTemplateDraft {
    RoundTemplateDraft {
        round_type,
        name: format!("Round {sequence}"),
        description: None,
        duration,
        sequence,
        config: None,
    }
}

/// Three rounds supplied out of order: 45 + 30 + 60 minutes.
pub(super) fn create_request(name: &str) -> CreateAssessmentRequest {
    CreateAssessmentRequest {
        name: name.to_string(),
        description: Some("Panel for platform hires".to_string()),
        difficulty: DifficultyLevel::Hard,
        rounds: vec![
            draft(RoundType::Coding, 2, 45),
            draft(RoundType::Screening, 1, 30),
            draft(RoundType::SystemDesign, 3, 60),
        ],
    }
}
