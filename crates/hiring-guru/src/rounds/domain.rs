use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessments::domain::RoundType;
use crate::ids::{ProcessId, QuestionId, ResponseId, RoundId, RoundTemplateId, UserId};

/// Lifecycle of a concrete round inside a hiring process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    NotStarted,
    InPreparation,
    InProgress,
    Completed,
}

impl RoundStatus {
    pub fn label(self) -> &'static str {
        match self {
            RoundStatus::NotStarted => "NOT_STARTED",
            RoundStatus::InPreparation => "IN_PREPARATION",
            RoundStatus::InProgress => "IN_PROGRESS",
            RoundStatus::Completed => "COMPLETED",
        }
    }

    pub fn accepts_generation(self) -> bool {
        matches!(self, RoundStatus::NotStarted | RoundStatus::InPreparation)
    }

    pub fn can_transition_to(self, next: RoundStatus) -> bool {
        use RoundStatus::*;
        matches!(
            (self, next),
            (NotStarted, InPreparation)
                | (InPreparation, InPreparation)
                | (NotStarted, InProgress)
                | (InPreparation, InProgress)
                | (InProgress, Completed)
        )
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("round cannot move from {from} to {to}")]
pub struct InvalidTransition {
    pub from: RoundStatus,
    pub to: RoundStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: RoundId,
    #[serde(rename = "hiringProcessId")]
    pub process_id: ProcessId,
    pub user_id: UserId,
    pub template_id: RoundTemplateId,
    pub round_type: RoundType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sequence: u32,
    /// Minutes.
    pub duration: u32,
    pub status: RoundStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Seconds reported by the candidate on completion.
    pub time_spent: Option<u32>,
}

impl Round {
    /// Moves the round to `next`, stamping start and completion times.
    pub fn transition(
        &mut self,
        next: RoundStatus,
        at: DateTime<Utc>,
    ) -> Result<(), InvalidTransition> {
        if !self.status.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.status,
                to: next,
            });
        }

        match next {
            RoundStatus::InProgress => self.started_at = Some(at),
            RoundStatus::Completed => self.completed_at = Some(at),
            RoundStatus::NotStarted | RoundStatus::InPreparation => {}
        }
        self.status = next;
        Ok(())
    }

    pub fn status_view(&self) -> RoundStatusView {
        RoundStatusView {
            id: self.id.clone(),
            status: self.status,
            time_spent: self.time_spent,
            started_at: self.started_at,
            completed_at: self.completed_at,
            duration: self.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStatusView {
    pub id: RoundId,
    pub status: RoundStatus,
    pub time_spent: Option<u32>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Mcq,
    Subjective,
}

/// Round types the AI backend can generate questions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationRoundType {
    Aptitude,
    Technical,
    Behavioral,
}

impl GenerationRoundType {
    pub fn label(self) -> &'static str {
        match self {
            GenerationRoundType::Aptitude => "APTITUDE",
            GenerationRoundType::Technical => "TECHNICAL",
            GenerationRoundType::Behavioral => "BEHAVIORAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationDifficulty {
    Easy,
    Medium,
    Hard,
}

impl GenerationDifficulty {
    pub fn label(self) -> &'static str {
        match self {
            GenerationDifficulty::Easy => "easy",
            GenerationDifficulty::Medium => "medium",
            GenerationDifficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub round_id: RoundId,
    pub content: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: String,
    pub category: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: Option<String>,
    pub generated_by: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn view(&self) -> QuestionView {
        QuestionView {
            id: self.id.clone(),
            content: self.content.clone(),
            question_type: self.question_type,
            difficulty: self.difficulty.clone(),
            category: self.category.clone(),
            options: (!self.options.is_empty()).then(|| self.options.clone()),
            correct_answer: self.correct_answer.clone(),
        }
    }

    /// Candidate-facing view; never carries the correct answer.
    pub fn public_view(&self) -> QuestionView {
        QuestionView {
            correct_answer: None,
            ..self.view()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: QuestionId,
    pub content: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

/// A candidate's answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResponse {
    pub id: ResponseId,
    pub round_id: RoundId,
    pub question_id: QuestionId,
    pub content: String,
    pub time_spent: u32,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    pub round_id: RoundId,
    pub round_type: GenerationRoundType,
    pub difficulty: GenerationDifficulty,
    pub question_count: u8,
    #[serde(default)]
    pub category: Option<String>,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestions {
    pub success: bool,
    pub round_id: RoundId,
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
    pub estimated_duration: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub question_id: QuestionId,
    pub answer: String,
    pub time_spent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersRequest {
    pub round_id: RoundId,
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
    pub total_time_spent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswersReceipt {
    pub success: bool,
    pub round_id: RoundId,
    pub submission_id: ResponseId,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundQuestions {
    pub success: bool,
    pub round_id: RoundId,
    pub questions: Vec<QuestionView>,
    pub total_questions: usize,
}
