use super::super::domain::{Dimension, HomeCharacteristics};
use super::super::tables::FactorTables;
use super::FactorContribution;

/// Starting level before any factor is applied, in Bq/m³.
pub const BASELINE_SCORE: f64 = 50.0;

/// Walk the factor pipeline over a running score.
///
/// Foundation is additive and sits between two multiplicative steps, so the
/// order of [`Dimension::PIPELINE`] changes the result and must not be reshuffled.
pub(crate) fn apply_factors(
    home: &HomeCharacteristics,
    tables: &FactorTables,
) -> (f64, Vec<FactorContribution>) {
    let mut score = BASELINE_SCORE;
    let mut contributions = Vec::with_capacity(Dimension::PIPELINE.len());

    for dimension in Dimension::PIPELINE {
        let factor = tables.factor_for(dimension, home.value(dimension));

        let contribution = if dimension.is_additive() {
            score += factor.adder;
            FactorContribution {
                factor: dimension,
                value: factor.adder,
                impact: format!("+{} Bq/m³", whole(factor.adder)),
            }
        } else {
            let delta = score * (factor.multiplier - 1.0);
            score *= factor.multiplier;
            let sign = if factor.multiplier > 1.0 { "+" } else { "" };
            FactorContribution {
                factor: dimension,
                value: delta,
                impact: format!("{sign}{} Bq/m³", whole(delta)),
            }
        };

        contributions.push(contribution);
    }

    (score, contributions)
}

/// Largest contributions first; ties keep pipeline order.
pub(crate) fn rank(contributions: &mut [FactorContribution]) {
    contributions.sort_by(|a, b| b.value.abs().total_cmp(&a.value.abs()));
}

fn whole(value: f64) -> f64 {
    let rounded = value.round();
    // avoid rendering "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
