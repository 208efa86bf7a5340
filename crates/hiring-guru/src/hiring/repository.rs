use super::domain::HiringProcess;
use crate::ids::{AssessmentId, ProcessId, RoundId, UserId};
use crate::repository::RepositoryError;
use crate::rounds::domain::{Round, RoundStatus};

/// Storage for hiring processes and the concrete rounds they own.
pub trait HiringProcessRepository: Send + Sync {
    /// Inserts the process with its rounds unless the user already holds an in-progress
    /// process, in which case nothing is written and `Conflict` is returned. The check and
    /// the insert must be atomic.
    fn start_exclusive(
        &self,
        process: HiringProcess,
        rounds: Vec<Round>,
    ) -> Result<HiringProcess, RepositoryError>;
    fn fetch_process(&self, id: &ProcessId) -> Result<Option<HiringProcess>, RepositoryError>;
    fn update_process(&self, process: HiringProcess) -> Result<(), RepositoryError>;
    /// Newest first.
    fn processes_for_user(&self, user: &UserId) -> Result<Vec<HiringProcess>, RepositoryError>;
    fn processes_referencing(
        &self,
        assessment: &AssessmentId,
    ) -> Result<Vec<HiringProcess>, RepositoryError>;
    fn fetch_round(&self, id: &RoundId) -> Result<Option<Round>, RepositoryError>;
    fn update_round(&self, round: Round) -> Result<(), RepositoryError>;
    /// Replaces the round only while its stored status is still `expected`; otherwise nothing
    /// is written and `Conflict` is returned. The comparison and the write must be atomic.
    fn update_round_if(&self, round: Round, expected: RoundStatus) -> Result<(), RepositoryError>;
    /// Ordered by sequence.
    fn rounds_for_process(&self, id: &ProcessId) -> Result<Vec<Round>, RepositoryError>;
}
