//! Round question lifecycle: AI generation, candidate answers, verification hand-off and completion.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerInput, AnswersReceipt, GenerateQuestionsRequest, GeneratedQuestions,
    GenerationDifficulty, GenerationRoundType, InvalidTransition, Question, QuestionType,
    QuestionView, Round, RoundQuestions, RoundResponse, RoundStatus, RoundStatusView,
    SubmitAnswersRequest,
};
pub use repository::QuestionRepository;
pub use router::round_router;
pub use service::RoundService;
