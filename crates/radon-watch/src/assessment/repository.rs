use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::risk::{
    health_guidance, recommended_mitigation, BaselineComparison, HealthGuidance,
    HomeCharacteristics, MitigationStrategy, PredictionResult,
};

/// Identifier handed back after a prediction is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prediction carried from the predict flow to the dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub home: HomeCharacteristics,
    pub prediction: PredictionResult,
    pub regional_average: u32,
    pub assessed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn dashboard(&self) -> DashboardView {
        let level = self.prediction.radon_level;
        DashboardView {
            record: self.clone(),
            guidance: health_guidance(level),
            mitigation: recommended_mitigation(level).to_vec(),
            comparison: BaselineComparison::new(level, self.regional_average),
        }
    }
}

/// Everything the dashboard renders for a stored prediction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    #[serde(flatten)]
    pub record: AssessmentRecord,
    pub guidance: HealthGuidance,
    pub mitigation: Vec<MitigationStrategy>,
    pub comparison: BaselineComparison,
}

/// Transient storage for predictions awaiting display.
pub trait PredictionStore: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, StoreError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
