use super::classifier::HEALTH_CANADA_ACTION_LEVEL;
use super::domain::Dimension;
use super::tables::FactorTables;
use serde::Serialize;

/// National average indoor radon level used as the regional anchor, in Bq/m³.
pub const NATIONAL_AVERAGE: u32 = 75;

/// Typical level for a region: the national average scaled by the region multiplier.
///
/// Reads the same region table as the scoring pipeline, so an unknown region
/// resolves to the national average.
pub fn regional_baseline(tables: &FactorTables, region: &str) -> u32 {
    let multiplier = tables.factor_for(Dimension::Region, region).multiplier;
    (f64::from(NATIONAL_AVERAGE) * multiplier).round().max(0.0) as u32
}

/// One bar of the home-versus-reference comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonEntry {
    pub name: &'static str,
    pub level: u32,
}

/// Home level lined up against the regional, national and action levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineComparison {
    pub entries: Vec<ComparisonEntry>,
    /// Home level minus regional baseline.
    pub difference_from_regional: i64,
    /// Difference as a whole percentage of the regional baseline; 0 when the baseline is 0.
    pub percent_from_regional: i64,
    pub exceeds_action_level: bool,
}

impl BaselineComparison {
    pub fn new(home_level: u32, regional_level: u32) -> Self {
        let entries = vec![
            ComparisonEntry {
                name: "Your Home",
                level: home_level,
            },
            ComparisonEntry {
                name: "Regional Avg",
                level: regional_level,
            },
            ComparisonEntry {
                name: "National Avg",
                level: NATIONAL_AVERAGE,
            },
            ComparisonEntry {
                name: "Action Level",
                level: HEALTH_CANADA_ACTION_LEVEL,
            },
        ];

        Self {
            entries,
            difference_from_regional: i64::from(home_level) - i64::from(regional_level),
            percent_from_regional: percent_difference(home_level, regional_level),
            exceeds_action_level: home_level >= HEALTH_CANADA_ACTION_LEVEL,
        }
    }

    /// Sentence shown under the comparison chart.
    pub fn regional_summary(&self) -> String {
        let percent = self.percent_from_regional;
        if percent >= 0 {
            format!("Your home is {percent}% above the regional average")
        } else {
            format!("Your home is {}% below the regional average", -percent)
        }
    }
}

fn percent_difference(home_level: u32, regional_level: u32) -> i64 {
    if regional_level == 0 {
        return 0;
    }
    let ratio = f64::from(home_level) / f64::from(regional_level);
    ((ratio - 1.0) * 100.0).round() as i64
}
