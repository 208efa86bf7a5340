use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use super::domain::{
    Assessment, AssessmentKind, CreateAssessmentRequest, CustomAssessmentSummary,
    UpdateAssessmentRequest,
};
use super::repository::AssessmentRepository;
use super::sequence::{build_rounds, total_duration, validate_drafts};
use crate::error::ServiceError;
use crate::hiring::domain::ProcessStatus;
use crate::hiring::repository::HiringProcessRepository;
use crate::ids::{AssessmentId, UserId};

/// Catalogue of predefined assessments plus user-authored custom ones.
pub struct AssessmentService<A, P> {
    assessments: Arc<A>,
    processes: Arc<P>,
}

impl<A, P> AssessmentService<A, P>
where
    A: AssessmentRepository + 'static,
    P: HiringProcessRepository + 'static,
{
    pub fn new(assessments: Arc<A>, processes: Arc<P>) -> Self {
        Self {
            assessments,
            processes,
        }
    }

    /// Active predefined assessments ordered by name.
    pub fn predefined(&self) -> Result<Vec<Assessment>, ServiceError> {
        let mut assessments: Vec<Assessment> = self
            .assessments
            .list_kind(AssessmentKind::Predefined)?
            .into_iter()
            .filter(Assessment::is_available_predefined)
            .map(with_ordered_rounds)
            .collect();
        assessments.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(assessments)
    }

    pub fn predefined_by_id(&self, id: &AssessmentId) -> Result<Assessment, ServiceError> {
        self.assessments
            .fetch(id)?
            .filter(Assessment::is_available_predefined)
            .map(with_ordered_rounds)
            .ok_or_else(|| ServiceError::not_found("Predefined assessment not found"))
    }

    #[instrument(skip_all, fields(owner = %owner))]
    pub fn create_custom(
        &self,
        owner: &UserId,
        request: CreateAssessmentRequest,
    ) -> Result<Assessment, ServiceError> {
        let name = required_name(&request.name)?;
        validate_drafts(&request.rounds)?;

        let rounds = build_rounds(request.rounds);
        let total_duration = total_duration(&rounds)?;
        let now = Utc::now();
        let assessment = Assessment {
            id: AssessmentId::generate(),
            kind: AssessmentKind::Custom,
            owner: Some(owner.clone()),
            name,
            description: request.description,
            difficulty: request.difficulty,
            total_duration,
            round_count: rounds.len() as u32,
            is_active: true,
            rounds,
            created_at: now,
            updated_at: now,
        };

        let stored = self.assessments.insert(assessment)?;
        info!(assessment = %stored.id, rounds = stored.round_count, "custom assessment created");
        Ok(stored)
    }

    /// Partial update; refused once any started or finished process depends on the template.
    #[instrument(skip_all, fields(owner = %owner, assessment = %id))]
    pub fn update_custom(
        &self,
        owner: &UserId,
        id: &AssessmentId,
        request: UpdateAssessmentRequest,
    ) -> Result<Assessment, ServiceError> {
        let mut assessment = self.owned_custom(owner, id)?;

        let in_use = self
            .processes
            .processes_referencing(id)?
            .iter()
            .any(|process| {
                matches!(
                    process.status,
                    ProcessStatus::InProgress | ProcessStatus::Completed
                )
            });
        if in_use {
            return Err(ServiceError::forbidden(
                "Cannot update assessment that is being used in active hiring processes",
            ));
        }

        if let Some(name) = request.name.as_deref() {
            assessment.name = required_name(name)?;
        }
        if let Some(rounds) = request.rounds {
            validate_drafts(&rounds)?;
            let rounds = build_rounds(rounds);
            assessment.total_duration = total_duration(&rounds)?;
            assessment.round_count = rounds.len() as u32;
            assessment.rounds = rounds;
        }
        if request.description.is_some() {
            assessment.description = request.description;
        }
        if let Some(difficulty) = request.difficulty {
            assessment.difficulty = difficulty;
        }
        assessment.updated_at = Utc::now();

        self.assessments.update(assessment.clone())?;
        info!("custom assessment updated");
        Ok(assessment)
    }

    /// The owner's custom assessments, newest first, with how many processes used each.
    pub fn custom_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<CustomAssessmentSummary>, ServiceError> {
        let mut assessments = self.assessments.owned_by(owner)?;
        assessments.sort_by(|left, right| right.created_at.cmp(&left.created_at));

        assessments
            .into_iter()
            .filter(|assessment| assessment.kind == AssessmentKind::Custom)
            .map(|assessment| -> Result<CustomAssessmentSummary, ServiceError> {
                let usage_count = self.processes.processes_referencing(&assessment.id)?.len();
                Ok(CustomAssessmentSummary {
                    assessment: with_ordered_rounds(assessment),
                    usage_count,
                })
            })
            .collect()
    }

    pub fn custom_by_id(
        &self,
        owner: &UserId,
        id: &AssessmentId,
    ) -> Result<Assessment, ServiceError> {
        self.owned_custom(owner, id).map(with_ordered_rounds)
    }

    fn owned_custom(&self, owner: &UserId, id: &AssessmentId) -> Result<Assessment, ServiceError> {
        self.assessments
            .fetch(id)?
            .filter(|assessment| {
                assessment.kind == AssessmentKind::Custom && assessment.is_owned_by(owner)
            })
            .ok_or_else(|| ServiceError::not_found("Custom assessment not found"))
    }
}

fn required_name(name: &str) -> Result<String, ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation("name must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn with_ordered_rounds(mut assessment: Assessment) -> Assessment {
    assessment.rounds.sort_by_key(|round| round.sequence);
    assessment
}
