use std::sync::Arc;

use axum::Router;
use chrono::Utc;

use crate::assessments::domain::{Assessment, AssessmentKind, RoundType};
use crate::assessments::repository::AssessmentRepository;
use crate::hiring::domain::StartProcessRequest;
use crate::hiring::{hiring_router, HiringProcessService};
use crate::ids::UserId;
use crate::memory::{InMemoryAssessments, InMemoryProcesses};
use crate::test_support::{as_user, predefined, user, Stores};

pub(super) type TestHiringService = HiringProcessService<InMemoryAssessments, InMemoryProcesses>;

pub(super) fn service(stores: &Stores) -> Arc<TestHiringService> {
    Arc::new(HiringProcessService::new(
        stores.assessments.clone(),
        stores.processes.clone(),
    ))
}

pub(super) fn router_for(stores: &Stores, who: &str) -> Router {
    as_user(hiring_router(service(stores)), user(who))
}

/// Stores a predefined assessment whose rounds were authored out of order.
pub(super) fn seeded_predefined(stores: &Stores) -> Assessment {
    let mut assessment = predefined(
        "Backend Engineer",
        &[RoundType::Screening, RoundType::Coding, RoundType::SystemDesign],
    );
    assessment.rounds.reverse();
    stores
        .assessments
        .insert(assessment)
        .expect("assessment stored")
}

pub(super) fn seeded_custom(stores: &Stores, owner: &UserId) -> Assessment {
    let mut assessment = predefined("Team loop", &[RoundType::Behavioral]);
    assessment.kind = AssessmentKind::Custom;
    assessment.owner = Some(owner.clone());
    assessment.created_at = Utc::now();
    stores
        .assessments
        .insert(assessment)
        .expect("assessment stored")
}

pub(super) fn start_predefined(assessment: &Assessment) -> StartProcessRequest {
    StartProcessRequest {
        assessment_type: AssessmentKind::Predefined,
        predefined_assessment_id: Some(assessment.id.clone()),
        custom_assessment_id: None,
    }
}

pub(super) fn start_custom(assessment: &Assessment) -> StartProcessRequest {
    StartProcessRequest {
        assessment_type: AssessmentKind::Custom,
        predefined_assessment_id: None,
        custom_assessment_id: Some(assessment.id.clone()),
    }
}
