use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use super::domain::{ConfigSnapshot, HiringProcess, ProcessDetail, ProcessStatus, StartProcessRequest};
use super::repository::HiringProcessRepository;
use crate::assessments::domain::{Assessment, AssessmentKind};
use crate::assessments::repository::AssessmentRepository;
use crate::error::ServiceError;
use crate::ids::{AssessmentId, ProcessId, RoundId, UserId};
use crate::repository::RepositoryError;
use crate::rounds::domain::{Round, RoundStatus};

const ACTIVE_PROCESS_MESSAGE: &str =
    "You already have an active hiring process. Complete it before starting a new one.";

/// Instantiates assessment templates into locked hiring processes.
pub struct HiringProcessService<A, P> {
    assessments: Arc<A>,
    processes: Arc<P>,
}

impl<A, P> HiringProcessService<A, P>
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

    #[instrument(skip_all, fields(user = %user, kind = request.assessment_type.label()))]
    pub fn start(
        &self,
        user: &UserId,
        request: StartProcessRequest,
    ) -> Result<ProcessDetail, ServiceError> {
        let assessment_id = request.referenced_assessment().ok_or_else(|| {
            ServiceError::validation(format!(
                "{} assessment ID is required",
                request.assessment_type.label()
            ))
        })?;

        let assessment = self.resolve_assessment(user, request.assessment_type, assessment_id)?;

        let now = Utc::now();
        let process_id = ProcessId::generate();
        let mut templates = assessment.rounds.clone();
        templates.sort_by_key(|template| template.sequence);

        let rounds: Vec<Round> = templates
            .iter()
            .map(|template| Round {
                id: RoundId::generate(),
                process_id: process_id.clone(),
                user_id: user.clone(),
                template_id: template.id.clone(),
                round_type: template.round_type,
                name: template.name.clone(),
                description: template.description.clone(),
                sequence: template.sequence,
                duration: template.duration,
                status: RoundStatus::NotStarted,
                started_at: None,
                completed_at: None,
                time_spent: None,
            })
            .collect();

        let process = HiringProcess {
            id: process_id,
            user_id: user.clone(),
            assessment_type: request.assessment_type,
            assessment_id: assessment.id.clone(),
            status: ProcessStatus::InProgress,
            is_locked: true,
            locked_at: Some(now),
            started_at: Some(now),
            completed_at: None,
            config_snapshot: ConfigSnapshot {
                assessment_type: request.assessment_type,
                assessment_name: assessment.name.clone(),
                total_duration: assessment.total_duration,
                round_count: assessment.round_count,
                rounds: templates,
                snapshot_taken_at: now,
            },
            created_at: now,
        };

        let stored = self
            .processes
            .start_exclusive(process, rounds.clone())
            .map_err(|err| match err {
                RepositoryError::Conflict => ServiceError::forbidden(ACTIVE_PROCESS_MESSAGE),
                other => other.into(),
            })?;

        info!(process = %stored.id, rounds = rounds.len(), "hiring process started");
        Ok(ProcessDetail {
            process: stored,
            rounds,
        })
    }

    pub fn list(&self, user: &UserId) -> Result<Vec<ProcessDetail>, ServiceError> {
        self.processes
            .processes_for_user(user)?
            .into_iter()
            .map(|process| self.with_rounds(process))
            .collect()
    }

    pub fn get(&self, user: &UserId, id: &ProcessId) -> Result<ProcessDetail, ServiceError> {
        let process = self
            .processes
            .fetch_process(id)?
            .filter(|process| &process.user_id == user)
            .ok_or_else(|| ServiceError::not_found("Hiring process not found"))?;
        self.with_rounds(process)
    }

    fn with_rounds(&self, process: HiringProcess) -> Result<ProcessDetail, ServiceError> {
        let rounds = self.processes.rounds_for_process(&process.id)?;
        Ok(ProcessDetail { process, rounds })
    }

    fn resolve_assessment(
        &self,
        user: &UserId,
        kind: AssessmentKind,
        id: &AssessmentId,
    ) -> Result<Assessment, ServiceError> {
        let found = self.assessments.fetch(id)?.filter(|assessment| {
            assessment.kind == kind
                && match kind {
                    AssessmentKind::Predefined => assessment.is_active,
                    AssessmentKind::Custom => assessment.is_owned_by(user),
                }
        });

        found.ok_or_else(|| {
            ServiceError::not_found(match kind {
                AssessmentKind::Predefined => "Predefined assessment not found or inactive",
                AssessmentKind::Custom => {
                    "Custom assessment not found or you do not have access"
                }
            })
        })
    }
}
