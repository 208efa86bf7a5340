use super::domain::CodingSubmission;
use crate::ids::{RoundId, SubmissionId};
use crate::repository::RepositoryError;

/// Append-only storage for scored submissions.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, submission: CodingSubmission) -> Result<CodingSubmission, RepositoryError>;
    fn fetch(&self, id: &SubmissionId) -> Result<Option<CodingSubmission>, RepositoryError>;
    /// Newest first.
    fn for_round(&self, round_id: &RoundId) -> Result<Vec<CodingSubmission>, RepositoryError>;
}
