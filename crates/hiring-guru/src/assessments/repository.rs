use super::domain::{Assessment, AssessmentKind};
use crate::ids::{AssessmentId, UserId};
use crate::repository::RepositoryError;

/// Storage abstraction for predefined and custom assessment templates.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError>;
    fn update(&self, assessment: Assessment) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError>;
    fn list_kind(&self, kind: AssessmentKind) -> Result<Vec<Assessment>, RepositoryError>;
    fn owned_by(&self, owner: &UserId) -> Result<Vec<Assessment>, RepositoryError>;
}
