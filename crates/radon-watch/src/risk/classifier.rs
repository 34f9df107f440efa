use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores below this level are classified [`RiskCategory::Low`].
pub const LOW_RISK_CEILING: u32 = 100;
/// Scores at or above this level are classified [`RiskCategory::High`].
pub const HIGH_RISK_FLOOR: u32 = 200;
/// Health Canada guideline above which remediation is recommended, in Bq/m³.
pub const HEALTH_CANADA_ACTION_LEVEL: u32 = 200;

/// Ordered severity buckets derived from a radon level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Moderate => "Moderate Risk",
            RiskCategory::High => "High Risk",
        }
    }

    /// Display color shared with any UI that color-codes levels.
    pub fn color(&self) -> &'static str {
        match self {
            RiskCategory::Low => "green",
            RiskCategory::Moderate => "yellow",
            RiskCategory::High => "red",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RiskCategory::Low => "LOW",
            RiskCategory::Moderate => "MODERATE",
            RiskCategory::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Map a radon level to its risk category.
pub fn classify(radon_level: u32) -> RiskCategory {
    if radon_level < LOW_RISK_CEILING {
        RiskCategory::Low
    } else if radon_level < HIGH_RISK_FLOOR {
        RiskCategory::Moderate
    } else {
        RiskCategory::High
    }
}
