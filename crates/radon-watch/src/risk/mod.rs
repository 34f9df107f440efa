//! Radon risk scoring: factor tables, the scoring pipeline, classification, and
//! the regional reference levels used for comparison.

pub mod baseline;
pub mod classifier;
pub mod domain;
mod engine;
pub mod guidance;
pub mod tables;

pub use baseline::{regional_baseline, BaselineComparison, ComparisonEntry, NATIONAL_AVERAGE};
pub use classifier::{
    classify, RiskCategory, HEALTH_CANADA_ACTION_LEVEL, HIGH_RISK_FLOOR, LOW_RISK_CEILING,
};
pub use domain::{region_catalog, Dimension, HomeCharacteristics, RegionOption};
pub use engine::{
    ConfidenceInterval, EngineConfig, FactorContribution, PredictionResult, RiskEngine,
    ScoringError, ValidationMode, BASELINE_SCORE, CONFIDENCE_LOWER, CONFIDENCE_UPPER,
    DEFAULT_VARIANCE_FRACTION,
};
pub use guidance::{
    health_guidance, recommended_mitigation, HealthGuidance, MitigationStrategy,
    MITIGATION_STRATEGIES,
};
pub use tables::{Factor, FactorTableError, FactorTables};
