//! Coding-question execution against the external judge, scoring, and submission history.

pub mod domain;
pub mod execution;
pub mod languages;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CodingSubmission, RunCodeRequest, RunOutcome, SubmissionHistoryEntry, SubmissionReceipt,
    SubmissionStatus, SubmitCodeRequest, TestCase, TestResult,
};
pub use languages::{Language, UnsupportedLanguage};
pub use repository::SubmissionRepository;
pub use router::coding_router;
pub use scoring::{efficiency_bonus, score, TestSummary};
pub use service::CodingService;
