use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{AssessmentId, RoundTemplateId, UserId};

/// Kind of interview stage a round template describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundType {
    Screening,
    Aptitude,
    Communication,
    Coding,
    Technical,
    Behavioral,
    SystemDesign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

/// Whether a template is platform-curated or authored by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentKind {
    Predefined,
    Custom,
}

impl AssessmentKind {
    pub fn label(self) -> &'static str {
        match self {
            AssessmentKind::Predefined => "Predefined",
            AssessmentKind::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTemplate {
    pub id: RoundTemplateId,
    pub round_type: RoundType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Minutes.
    pub duration: u32,
    pub sequence: u32,
    #[serde(default)]
    pub config: Value,
}

/// An ordered set of round templates a hiring process can be started from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: AssessmentId,
    pub kind: AssessmentKind,
    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub difficulty: DifficultyLevel,
    pub total_duration: u32,
    pub round_count: u32,
    pub is_active: bool,
    pub rounds: Vec<RoundTemplate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assessment {
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner.as_ref() == Some(user)
    }

    pub fn is_available_predefined(&self) -> bool {
        self.kind == AssessmentKind::Predefined && self.is_active
    }
}

/// Round template as supplied by an assessment author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundTemplateDraft {
    pub round_type: RoundType,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration: u32,
    pub sequence: u32,
    #[serde(default)]
    pub config: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessmentRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub difficulty: DifficultyLevel,
    #[serde(default)]
    pub rounds: Vec<RoundTemplateDraft>,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssessmentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty: Option<DifficultyLevel>,
    #[serde(default)]
    pub rounds: Option<Vec<RoundTemplateDraft>>,
}

/// Custom assessment listing entry with the number of processes started from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAssessmentSummary {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub usage_count: usize,
}
