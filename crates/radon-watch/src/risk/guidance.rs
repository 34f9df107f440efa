use super::classifier::{classify, RiskCategory, HEALTH_CANADA_ACTION_LEVEL};
use serde::Serialize;

/// Health impact summary shown alongside a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthGuidance {
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

/// A remediation option with its typical cost and effectiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MitigationStrategy {
    pub title: &'static str,
    pub description: &'static str,
    pub cost: &'static str,
    pub effectiveness: &'static str,
    pub difficulty: &'static str,
}

pub const MITIGATION_STRATEGIES: [MitigationStrategy; 4] = [
    MitigationStrategy {
        title: "Sub-Slab Depressurization",
        description: "Install a pipe and fan system to draw radon from beneath the foundation",
        cost: "$1,500 - $3,000",
        effectiveness: "99%",
        difficulty: "Professional",
    },
    MitigationStrategy {
        title: "Sealing Cracks",
        description: "Seal foundation cracks and openings to reduce radon entry",
        cost: "$500 - $1,500",
        effectiveness: "50%",
        difficulty: "DIY/Professional",
    },
    MitigationStrategy {
        title: "Improve Ventilation",
        description: "Install HRV/ERV system or increase natural ventilation",
        cost: "$2,000 - $6,000",
        effectiveness: "30-50%",
        difficulty: "Professional",
    },
    MitigationStrategy {
        title: "Crawlspace Ventilation",
        description: "Improve airflow in crawlspace with fans and vents",
        cost: "$800 - $2,000",
        effectiveness: "70%",
        difficulty: "Professional",
    },
];

pub fn health_guidance(radon_level: u32) -> HealthGuidance {
    match classify(radon_level) {
        RiskCategory::Low => HealthGuidance {
            title: "Low Health Risk".to_string(),
            description: "Your radon levels are below 100 Bq/m³. Health Canada considers this \
                          low risk. Continue monitoring but no immediate action needed."
                .to_string(),
            recommendation: "Test again in 2-5 years to ensure levels remain low.".to_string(),
        },
        RiskCategory::Moderate => HealthGuidance {
            title: "Moderate Health Risk".to_string(),
            description: "Your radon levels are between 100-200 Bq/m³. While below the action \
                          level, consider taking steps to reduce exposure."
                .to_string(),
            recommendation: "Consider mitigation measures and retest annually.".to_string(),
        },
        RiskCategory::High => HealthGuidance {
            title: "High Health Risk - Action Recommended".to_string(),
            description: format!(
                "Your radon levels exceed Health Canada's action level of \
                 {HEALTH_CANADA_ACTION_LEVEL} Bq/m³. Radon exposure at this level \
                 significantly increases lung cancer risk."
            ),
            recommendation: "Contact a certified radon mitigation professional immediately."
                .to_string(),
        },
    }
}

/// Strategies worth presenting for a level: low-cost options first, everything once high.
pub fn recommended_mitigation(radon_level: u32) -> &'static [MitigationStrategy] {
    match classify(radon_level) {
        RiskCategory::Low => &MITIGATION_STRATEGIES[1..3],
        RiskCategory::Moderate => &MITIGATION_STRATEGIES[..3],
        RiskCategory::High => &MITIGATION_STRATEGIES,
    }
}
