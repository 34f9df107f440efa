use super::domain::Dimension;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Multiplier and adder contributed by a single category value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub multiplier: f64,
    pub adder: f64,
}

impl Factor {
    pub const NEUTRAL: Factor = Factor {
        multiplier: 1.0,
        adder: 0.0,
    };

    fn multiplier(multiplier: f64) -> Self {
        Self {
            multiplier,
            adder: 0.0,
        }
    }

    fn adder(adder: f64) -> Self {
        Self {
            multiplier: 1.0,
            adder,
        }
    }
}

/// Lookup tables mapping each dimension's categories to their factor.
///
/// Foundation types carry a flat adder in Bq/m³; every other dimension carries a
/// multiplier applied to the running score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorTables {
    pub region: BTreeMap<String, f64>,
    pub building_age: BTreeMap<String, f64>,
    pub foundation_type: BTreeMap<String, f64>,
    pub soil_type: BTreeMap<String, f64>,
    pub building_size: BTreeMap<String, f64>,
    pub floor_level: BTreeMap<String, f64>,
    pub ventilation_quality: BTreeMap<String, f64>,
}

impl FactorTables {
    /// Tables derived from Health Canada regional survey findings.
    pub fn standard() -> Self {
        Self {
            region: table(&[
                ("BC_Interior", 2.5),
                ("BC_Northern", 2.3),
                ("BC_Coastal", 0.8),
                ("Alberta", 2.2),
                ("Saskatchewan", 2.1),
                ("Manitoba", 1.8),
                ("Ontario_North", 1.7),
                ("Ontario_South", 1.5),
                ("Quebec_North", 1.8),
                ("Quebec_South", 1.6),
                ("New_Brunswick", 1.5),
                ("Nova_Scotia", 1.4),
                ("PEI", 1.3),
                ("Newfoundland", 1.4),
                ("Yukon", 2.0),
                ("NWT", 1.9),
                ("Nunavut", 1.6),
            ]),
            // newer, tighter envelopes trap more soil gas
            building_age: table(&[
                ("0-10", 1.4),
                ("11-20", 1.3),
                ("21-40", 1.2),
                ("41-60", 1.0),
                ("60+", 0.9),
            ]),
            foundation_type: table(&[
                ("basement", 40.0),
                ("crawlspace", 30.0),
                ("slab", 10.0),
                ("elevated", 0.0),
            ]),
            soil_type: table(&[
                ("granite", 1.5),
                ("carbonate", 1.3),
                ("shale", 1.25),
                ("clay", 1.2),
                ("sand", 1.0),
                ("sedimentary", 0.8),
                ("unknown", 1.0),
            ]),
            building_size: table(&[
                ("small", 0.9),
                ("medium", 1.0),
                ("large", 1.2),
                ("xlarge", 1.4),
            ]),
            floor_level: table(&[("basement", 1.3), ("ground", 1.0), ("upper", 0.7)]),
            ventilation_quality: table(&[
                ("poor", 1.3),
                ("average", 1.0),
                ("good", 0.8),
                ("mechanical", 0.6),
            ]),
        }
    }

    /// Load a substitute table set from JSON shaped like [`FactorTables`].
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, FactorTableError> {
        let tables: FactorTables = serde_json::from_reader(reader)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FactorTableError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Factor for `value`, or [`Factor::NEUTRAL`] when the table has no such key.
    pub fn factor_for(&self, dimension: Dimension, value: &str) -> Factor {
        match self.table(dimension).get(value).copied() {
            Some(adder) if dimension.is_additive() => Factor::adder(adder),
            Some(multiplier) => Factor::multiplier(multiplier),
            None => Factor::NEUTRAL,
        }
    }

    pub fn contains(&self, dimension: Dimension, value: &str) -> bool {
        self.table(dimension).contains_key(value)
    }

    /// Recognized category keys for a dimension, in key order.
    pub fn categories(&self, dimension: Dimension) -> impl Iterator<Item = &str> {
        self.table(dimension).keys().map(String::as_str)
    }

    fn table(&self, dimension: Dimension) -> &BTreeMap<String, f64> {
        match dimension {
            Dimension::Region => &self.region,
            Dimension::BuildingAge => &self.building_age,
            Dimension::FoundationType => &self.foundation_type,
            Dimension::SoilType => &self.soil_type,
            Dimension::BuildingSize => &self.building_size,
            Dimension::FloorLevel => &self.floor_level,
            Dimension::VentilationQuality => &self.ventilation_quality,
        }
    }

    fn validate(&self) -> Result<(), FactorTableError> {
        for dimension in Dimension::PIPELINE {
            for (key, value) in self.table(dimension) {
                let valid = if dimension.is_additive() {
                    value.is_finite() && *value >= 0.0
                } else {
                    value.is_finite() && *value > 0.0
                };
                if !valid {
                    return Err(FactorTableError::InvalidFactor {
                        dimension,
                        key: key.clone(),
                        value: *value,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for FactorTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

/// Failure while loading a substitute table set.
#[derive(Debug, thiserror::Error)]
pub enum FactorTableError {
    #[error("failed to read factor tables: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid factor table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("factor {value} for {dimension} '{key}' must be finite and positive")]
    InvalidFactor {
        dimension: Dimension,
        key: String,
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tables_cover_every_form_option() {
        let tables = FactorTables::standard();
        assert_eq!(tables.region.len(), 17);
        assert_eq!(tables.building_age.len(), 5);
        assert_eq!(tables.foundation_type.len(), 4);
        assert_eq!(tables.soil_type.len(), 7);
        assert_eq!(tables.building_size.len(), 4);
        assert_eq!(tables.floor_level.len(), 3);
        assert_eq!(tables.ventilation_quality.len(), 4);
    }

    #[test]
    fn foundation_lookups_return_adders() {
        let tables = FactorTables::standard();
        let factor = tables.factor_for(Dimension::FoundationType, "crawlspace");
        assert_eq!(factor.multiplier, 1.0);
        assert_eq!(factor.adder, 30.0);
    }

    #[test]
    fn multiplier_lookups_leave_adder_at_zero() {
        let tables = FactorTables::standard();
        let factor = tables.factor_for(Dimension::Region, "BC_Interior");
        assert_eq!(factor.multiplier, 2.5);
        assert_eq!(factor.adder, 0.0);
    }

    #[test]
    fn unknown_values_fall_back_to_neutral() {
        let tables = FactorTables::standard();
        for dimension in Dimension::PIPELINE {
            assert_eq!(tables.factor_for(dimension, "not-a-category"), Factor::NEUTRAL);
            assert_eq!(tables.factor_for(dimension, ""), Factor::NEUTRAL);
        }
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let tables = FactorTables::standard();
        assert!(tables.contains(Dimension::SoilType, "granite"));
        assert!(!tables.contains(Dimension::SoilType, "Granite"));
    }

    #[test]
    fn json_round_trip_preserves_tables() {
        let tables = FactorTables::standard();
        let json = serde_json::to_vec(&tables).expect("tables serialize");
        let loaded = FactorTables::from_json_reader(json.as_slice()).expect("tables load");
        assert_eq!(loaded, tables);
    }

    #[test]
    fn rejects_non_positive_multipliers() {
        let mut tables = FactorTables::standard();
        tables.soil_type.insert("bedrock".to_string(), 0.0);
        let json = serde_json::to_vec(&tables).expect("tables serialize");

        match FactorTables::from_json_reader(json.as_slice()) {
            Err(FactorTableError::InvalidFactor { dimension, key, .. }) => {
                assert_eq!(dimension, Dimension::SoilType);
                assert_eq!(key, "bedrock");
            }
            other => panic!("expected invalid factor error, got {other:?}"),
        }
    }
}
