//! Assessment templates: the seeded predefined catalogue and user-authored custom assessments.

pub mod domain;
pub mod repository;
pub mod router;
pub mod sequence;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Assessment, AssessmentKind, CreateAssessmentRequest, CustomAssessmentSummary,
    DifficultyLevel, RoundTemplate, RoundTemplateDraft, RoundType, UpdateAssessmentRequest,
};
pub use repository::AssessmentRepository;
pub use router::assessment_router;
pub use service::AssessmentService;
