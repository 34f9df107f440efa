//! Prediction intake and the transient hand-off to the dashboard view.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{
    AssessmentId, AssessmentRecord, DashboardView, PredictionStore, StoreError,
};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError};
