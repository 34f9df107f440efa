mod steps;

use super::classifier::{classify, RiskCategory};
use super::domain::{Dimension, HomeCharacteristics};
use super::tables::FactorTables;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

pub use steps::BASELINE_SCORE;

/// Default half-width of the random perturbation, as a fraction of the score.
pub const DEFAULT_VARIANCE_FRACTION: f64 = 0.15;
/// Lower edge of the confidence band as a fraction of the final level.
pub const CONFIDENCE_LOWER: f64 = 0.85;
/// Upper edge of the confidence band as a fraction of the final level.
pub const CONFIDENCE_UPPER: f64 = 1.15;

/// How the engine treats category values missing from the factor tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Unrecognized values score as the neutral factor.
    #[default]
    Permissive,
    /// Unrecognized values are rejected with [`ScoringError::UnrecognizedValue`].
    Strict,
}

/// Tunables applied on every scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fraction of the score used as the perturbation half-width; `0.0` disables it.
    pub variance_fraction: f64,
    pub validation: ValidationMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            variance_fraction: DEFAULT_VARIANCE_FRACTION,
            validation: ValidationMode::Permissive,
        }
    }
}

impl EngineConfig {
    /// Configuration with the perturbation disabled, yielding reproducible scores.
    pub fn deterministic() -> Self {
        Self {
            variance_fraction: 0.0,
            ..Self::default()
        }
    }
}

/// Stateless scorer that runs home characteristics through the factor pipeline.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    tables: Arc<FactorTables>,
    config: EngineConfig,
}

impl RiskEngine {
    pub fn new(tables: Arc<FactorTables>, config: EngineConfig) -> Self {
        Self { tables, config }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(FactorTables::standard()), EngineConfig::default())
    }

    pub fn tables(&self) -> &FactorTables {
        &self.tables
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score a home, drawing the perturbation from `rng`.
    pub fn score_home<R: Rng + ?Sized>(
        &self,
        home: &HomeCharacteristics,
        rng: &mut R,
    ) -> Result<PredictionResult, ScoringError> {
        self.validate(home)?;

        let (score, mut factor_breakdown) = steps::apply_factors(home, &self.tables);
        let perturbed = self.perturb(score, rng);

        // NaN also collapses to zero here
        let radon_level = perturbed.round().max(0.0) as u32;
        let risk_category = classify(radon_level);
        let confidence_interval = ConfidenceInterval::around(radon_level);

        steps::rank(&mut factor_breakdown);

        debug!(
            region = %home.region,
            unperturbed = score,
            radon_level,
            category = %risk_category,
            "scored home characteristics"
        );

        Ok(PredictionResult {
            radon_level,
            risk_category,
            risk_label: risk_category.label().to_string(),
            risk_color: risk_category.color().to_string(),
            confidence_interval,
            factor_breakdown,
        })
    }

    /// Representative level for a region, sharing the engine's region table.
    pub fn regional_baseline(&self, region: &str) -> u32 {
        super::baseline::regional_baseline(&self.tables, region)
    }

    fn validate(&self, home: &HomeCharacteristics) -> Result<(), ScoringError> {
        if let Some(field) = home.first_missing() {
            return Err(ScoringError::MissingField { field });
        }

        if self.config.validation == ValidationMode::Strict {
            for dimension in Dimension::PIPELINE {
                let value = home.value(dimension);
                if !self.tables.contains(dimension, value) {
                    return Err(ScoringError::UnrecognizedValue {
                        field: dimension,
                        value: value.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    fn perturb<R: Rng + ?Sized>(&self, score: f64, rng: &mut R) -> f64 {
        let variance = score * self.config.variance_fraction;
        if variance.is_finite() && variance > 0.0 {
            score + rng.gen_range(-variance..=variance)
        } else {
            score
        }
    }
}

/// Change in the running score caused by one pipeline step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    /// Serialized as the display label, e.g. "Geographic Region".
    #[serde(with = "factor_label")]
    pub factor: Dimension,
    /// Delta in Bq/m³.
    pub value: f64,
    pub impact: String,
}

mod factor_label {
    use super::Dimension;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(dimension: &Dimension, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(dimension.label())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Dimension, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Dimension::from_label(&label)
            .ok_or_else(|| de::Error::custom(format!("unknown factor '{label}'")))
    }
}

/// Fixed band around the final level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: u32,
    pub upper: u32,
}

impl ConfidenceInterval {
    pub fn around(radon_level: u32) -> Self {
        let level = f64::from(radon_level);
        Self {
            lower: (level * CONFIDENCE_LOWER).round().max(0.0) as u32,
            upper: (level * CONFIDENCE_UPPER).round() as u32,
        }
    }

    pub fn contains(&self, radon_level: u32) -> bool {
        self.lower <= radon_level && radon_level <= self.upper
    }
}

/// Prediction handed back to callers and carried to the dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub radon_level: u32,
    pub risk_category: RiskCategory,
    pub risk_label: String,
    pub risk_color: String,
    pub confidence_interval: ConfidenceInterval,
    pub factor_breakdown: Vec<FactorContribution>,
}

/// Rejected input for a scoring call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("required field '{field}' is missing")]
    MissingField { field: Dimension },
    #[error("unrecognized value '{value}' for field '{field}'")]
    UnrecognizedValue { field: Dimension, value: String },
}

impl ScoringError {
    pub fn field(&self) -> Dimension {
        match self {
            ScoringError::MissingField { field }
            | ScoringError::UnrecognizedValue { field, .. } => *field,
        }
    }
}
