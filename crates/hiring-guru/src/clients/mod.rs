//! HTTP clients for the external services the platform delegates to.

pub mod ai;
pub mod judge;

pub use ai::{AiBackend, AiBackendError, HttpAiBackend};
pub use judge::{ExecutionRequest, ExecutionResult, Judge0Client, JudgeClient, JudgeError};
