use super::domain::{Question, RoundResponse};
use crate::ids::{QuestionId, RoundId};
use crate::repository::RepositoryError;

/// Storage for generated questions and the answers given to them.
pub trait QuestionRepository: Send + Sync {
    fn insert_questions(&self, questions: Vec<Question>) -> Result<Vec<Question>, RepositoryError>;
    fn fetch_question(&self, id: &QuestionId) -> Result<Option<Question>, RepositoryError>;
    /// Creation order.
    fn questions_for_round(&self, round_id: &RoundId) -> Result<Vec<Question>, RepositoryError>;
    fn insert_responses(
        &self,
        responses: Vec<RoundResponse>,
    ) -> Result<Vec<RoundResponse>, RepositoryError>;
    #[cfg(test)]
    fn responses_for_round(&self, round_id: &RoundId)
        -> Result<Vec<RoundResponse>, RepositoryError>;
}
