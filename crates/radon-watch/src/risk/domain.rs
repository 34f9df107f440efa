use serde::{Deserialize, Serialize};
use std::fmt;

/// Home characteristics collected from the prediction form.
///
/// Fields stay as raw category keys so that values outside the known tables can
/// flow through the engine and degrade to neutral factors. An absent key reads
/// as an empty value and is reported by [`HomeCharacteristics::first_missing`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeCharacteristics {
    pub region: String,
    pub building_age: String,
    pub foundation_type: String,
    pub soil_type: String,
    pub building_size: String,
    pub floor_level: String,
    pub ventilation_quality: String,
}

impl HomeCharacteristics {
    /// Raw value supplied for a dimension.
    pub fn value(&self, dimension: Dimension) -> &str {
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

    /// First dimension whose value is empty or whitespace, in pipeline order.
    pub fn first_missing(&self) -> Option<Dimension> {
        Dimension::PIPELINE
            .into_iter()
            .find(|dimension| self.value(*dimension).trim().is_empty())
    }
}

/// Input dimensions contributing to the radon score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Region,
    BuildingAge,
    FoundationType,
    SoilType,
    BuildingSize,
    FloorLevel,
    VentilationQuality,
}

impl Dimension {
    /// Order in which the engine applies the factors.
    pub const PIPELINE: [Dimension; 7] = [
        Dimension::Region,
        Dimension::BuildingAge,
        Dimension::FoundationType,
        Dimension::SoilType,
        Dimension::BuildingSize,
        Dimension::FloorLevel,
        Dimension::VentilationQuality,
    ];

    /// Wire name of the field carrying this dimension.
    pub fn field_name(&self) -> &'static str {
        match self {
            Dimension::Region => "region",
            Dimension::BuildingAge => "buildingAge",
            Dimension::FoundationType => "foundationType",
            Dimension::SoilType => "soilType",
            Dimension::BuildingSize => "buildingSize",
            Dimension::FloorLevel => "floorLevel",
            Dimension::VentilationQuality => "ventilationQuality",
        }
    }

    /// Human readable factor name shown in breakdowns.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Region => "Geographic Region",
            Dimension::BuildingAge => "Building Age",
            Dimension::FoundationType => "Foundation Type",
            Dimension::SoilType => "Soil Type",
            Dimension::BuildingSize => "Building Size",
            Dimension::FloorLevel => "Floor Level",
            Dimension::VentilationQuality => "Ventilation Quality",
        }
    }

    /// Inverse of [`Dimension::label`].
    pub fn from_label(label: &str) -> Option<Dimension> {
        Self::PIPELINE
            .into_iter()
            .find(|dimension| dimension.label() == label)
    }

    pub fn is_additive(&self) -> bool {
        matches!(self, Dimension::FoundationType)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Region key paired with the name offered in the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionOption {
    pub key: &'static str,
    pub display_name: &'static str,
}

const fn region(key: &'static str, display_name: &'static str) -> RegionOption {
    RegionOption { key, display_name }
}

const REGION_OPTIONS: [RegionOption; 17] = [
    region("BC_Interior", "BC Interior"),
    region("BC_Northern", "BC Northern"),
    region("BC_Coastal", "BC Coastal"),
    region("Alberta", "Alberta"),
    region("Saskatchewan", "Saskatchewan"),
    region("Manitoba", "Manitoba"),
    region("Ontario_North", "Ontario (North)"),
    region("Ontario_South", "Ontario (South)"),
    region("Quebec_North", "Quebec (North)"),
    region("Quebec_South", "Quebec (South)"),
    region("New_Brunswick", "New Brunswick"),
    region("Nova_Scotia", "Nova Scotia"),
    region("PEI", "Prince Edward Island"),
    region("Newfoundland", "Newfoundland"),
    region("Yukon", "Yukon"),
    region("NWT", "Northwest Territories"),
    region("Nunavut", "Nunavut"),
];

/// Regions offered by the prediction form, west to east then the territories.
pub fn region_catalog() -> &'static [RegionOption] {
    &REGION_OPTIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> HomeCharacteristics {
        HomeCharacteristics {
            region: "Alberta".to_string(),
            building_age: "0-10".to_string(),
            foundation_type: "basement".to_string(),
            soil_type: "clay".to_string(),
            building_size: "large".to_string(),
            floor_level: "ground".to_string(),
            ventilation_quality: "poor".to_string(),
        }
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let payload = r#"{
            "region": "Alberta",
            "buildingAge": "0-10",
            "foundationType": "basement",
            "soilType": "clay",
            "buildingSize": "large",
            "floorLevel": "ground",
            "ventilationQuality": "poor"
        }"#;

        let parsed: HomeCharacteristics = serde_json::from_str(payload).expect("payload parses");
        assert_eq!(parsed, home());
    }

    #[test]
    fn first_missing_reports_blank_fields_in_pipeline_order() {
        let mut home = home();
        assert_eq!(home.first_missing(), None);

        home.ventilation_quality = String::new();
        home.soil_type = "   ".to_string();
        assert_eq!(home.first_missing(), Some(Dimension::SoilType));
    }

    #[test]
    fn absent_keys_read_as_missing_fields() {
        let parsed: HomeCharacteristics =
            serde_json::from_str(r#"{"region": "Alberta", "soilType": "clay"}"#)
                .expect("partial payload parses");
        assert_eq!(parsed.region, "Alberta");
        assert_eq!(parsed.first_missing(), Some(Dimension::BuildingAge));
    }

    #[test]
    fn labels_map_back_to_dimensions() {
        for dimension in Dimension::PIPELINE {
            assert_eq!(Dimension::from_label(dimension.label()), Some(dimension));
        }
        assert_eq!(Dimension::from_label("region"), None);
    }

    #[test]
    fn catalog_lists_every_region_once() {
        let catalog = region_catalog();
        assert_eq!(catalog.len(), 17);
        let mut keys: Vec<_> = catalog.iter().map(|option| option.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 17);
    }
}
