//! Hiring processes: locked, snapshotted instances of an assessment template.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{ConfigSnapshot, HiringProcess, ProcessDetail, ProcessStatus, StartProcessRequest};
pub use repository::HiringProcessRepository;
pub use router::hiring_router;
pub use service::HiringProcessService;
