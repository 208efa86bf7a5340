//! Hiring assessment platform: assessment templates, hiring processes, interview rounds,
//! coding judge orchestration, and profile analysis backed by external AI and judge services.

pub mod assessments;
pub mod clients;
pub mod coding;
pub mod config;
pub mod error;
pub mod extract;
pub mod hiring;
pub mod ids;
pub mod memory;
pub mod repository;
pub mod rounds;
pub mod telemetry;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
