use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessments::domain::{AssessmentKind, RoundTemplate};
use crate::ids::{AssessmentId, ProcessId, UserId};
use crate::rounds::domain::Round;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessStatus {
    InProgress,
    Completed,
}

/// Frozen copy of the template a process was started from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub assessment_type: AssessmentKind,
    pub assessment_name: String,
    pub total_duration: u32,
    pub round_count: u32,
    pub rounds: Vec<RoundTemplate>,
    pub snapshot_taken_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiringProcess {
    pub id: ProcessId,
    pub user_id: UserId,
    pub assessment_type: AssessmentKind,
    pub assessment_id: AssessmentId,
    pub status: ProcessStatus,
    pub is_locked: bool,
    pub locked_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub config_snapshot: ConfigSnapshot,
    pub created_at: DateTime<Utc>,
}

impl HiringProcess {
    pub fn is_active(&self) -> bool {
        self.status == ProcessStatus::InProgress
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartProcessRequest {
    pub assessment_type: AssessmentKind,
    #[serde(default)]
    pub predefined_assessment_id: Option<AssessmentId>,
    #[serde(default)]
    pub custom_assessment_id: Option<AssessmentId>,
}

impl StartProcessRequest {
    /// The assessment id matching the requested kind, ignoring the other field.
    pub fn referenced_assessment(&self) -> Option<&AssessmentId> {
        match self.assessment_type {
            AssessmentKind::Predefined => self.predefined_assessment_id.as_ref(),
            AssessmentKind::Custom => self.custom_assessment_id.as_ref(),
        }
        .filter(|id| !id.as_str().trim().is_empty())
    }
}

/// A process together with its rounds ordered by sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDetail {
    #[serde(flatten)]
    pub process: HiringProcess,
    pub rounds: Vec<Round>,
}
