use radon_watch::risk::{
    classify, regional_baseline, ConfidenceInterval, Dimension, EngineConfig, FactorTables,
    HomeCharacteristics, RiskCategory, RiskEngine, ScoringError, ValidationMode,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn deterministic_engine() -> RiskEngine {
    RiskEngine::new(
        Arc::new(FactorTables::standard()),
        EngineConfig::deterministic(),
    )
}

fn neutral_home(region: &str) -> HomeCharacteristics {
    HomeCharacteristics {
        region: region.to_string(),
        building_age: "41-60".to_string(),
        foundation_type: "elevated".to_string(),
        soil_type: "sand".to_string(),
        building_size: "medium".to_string(),
        floor_level: "ground".to_string(),
        ventilation_quality: "average".to_string(),
    }
}

fn ontario_slab_home() -> HomeCharacteristics {
    HomeCharacteristics {
        region: "Ontario_South".to_string(),
        building_age: "41-60".to_string(),
        foundation_type: "slab".to_string(),
        soil_type: "sedimentary".to_string(),
        building_size: "medium".to_string(),
        floor_level: "ground".to_string(),
        ventilation_quality: "average".to_string(),
    }
}

/// Every combination of the standard form options.
fn all_homes() -> Vec<HomeCharacteristics> {
    let tables = FactorTables::standard();
    let options = |dimension| -> Vec<String> {
        tables
            .categories(dimension)
            .map(str::to_string)
            .collect()
    };

    let mut homes = Vec::new();
    for region in options(Dimension::Region) {
        for building_age in options(Dimension::BuildingAge) {
            for foundation_type in options(Dimension::FoundationType) {
                for soil_type in options(Dimension::SoilType) {
                    for ventilation_quality in options(Dimension::VentilationQuality) {
                        homes.push(HomeCharacteristics {
                            region: region.clone(),
                            building_age: building_age.clone(),
                            foundation_type: foundation_type.clone(),
                            soil_type: soil_type.clone(),
                            building_size: "large".to_string(),
                            floor_level: "basement".to_string(),
                            ventilation_quality,
                        });
                    }
                }
            }
        }
    }
    homes
}

#[test]
fn ontario_slab_home_scores_low() {
    let engine = deterministic_engine();
    let result = engine
        .score_home(&ontario_slab_home(), &mut StdRng::seed_from_u64(0))
        .expect("home scores");

    assert_eq!(result.radon_level, 68);
    assert_eq!(result.risk_category, RiskCategory::Low);
    assert_eq!(result.risk_label, "Low Risk");
    assert_eq!(
        result.confidence_interval,
        ConfidenceInterval {
            lower: 58,
            upper: 78
        }
    );
}

#[test]
fn bc_interior_alone_scores_moderate() {
    let engine = deterministic_engine();
    let result = engine
        .score_home(&neutral_home("BC_Interior"), &mut StdRng::seed_from_u64(0))
        .expect("home scores");

    assert_eq!(result.radon_level, 125);
    assert_eq!(result.risk_category, RiskCategory::Moderate);
}

#[test]
fn bc_interior_basement_on_granite_scores_high() {
    let engine = deterministic_engine();
    let mut home = neutral_home("BC_Interior");
    home.foundation_type = "basement".to_string();
    home.soil_type = "granite".to_string();

    let result = engine
        .score_home(&home, &mut StdRng::seed_from_u64(0))
        .expect("home scores");

    // (125 + 40) * 1.5
    assert_eq!(result.radon_level, 248);
    assert_eq!(result.risk_category, RiskCategory::High);
    // soil +82.5 outweighs region +75 and foundation +40
    assert_eq!(result.factor_breakdown[0].factor, Dimension::SoilType);
    assert_eq!(result.factor_breakdown[1].factor, Dimension::Region);
    assert_eq!(result.factor_breakdown[2].factor, Dimension::FoundationType);
}

#[test]
fn regional_baselines_share_the_region_table() {
    let tables = FactorTables::standard();
    assert_eq!(regional_baseline(&tables, "Ontario_South"), 113);
    assert_eq!(regional_baseline(&tables, "unknown_region_code"), 75);

    for region in tables.categories(Dimension::Region) {
        let multiplier = tables.factor_for(Dimension::Region, region).multiplier;
        assert_eq!(
            regional_baseline(&tables, region),
            (75.0 * multiplier).round() as u32
        );
    }

    let engine = deterministic_engine();
    assert_eq!(engine.regional_baseline("Yukon"), 150);
}

#[test]
fn classifier_boundaries_are_exact() {
    assert_eq!(classify(99), RiskCategory::Low);
    assert_eq!(classify(100), RiskCategory::Moderate);
    assert_eq!(classify(199), RiskCategory::Moderate);
    assert_eq!(classify(200), RiskCategory::High);
}

#[test]
fn invariants_hold_across_perturbed_predictions() {
    let engine = RiskEngine::standard();
    let mut rng = StdRng::seed_from_u64(2024);

    for home in all_homes() {
        let result = engine.score_home(&home, &mut rng).expect("home scores");
        let level = result.radon_level;
        let interval = result.confidence_interval;

        assert!(interval.lower <= level && level <= interval.upper);
        assert_eq!(interval.upper, (f64::from(level) * 1.15).round() as u32);
        assert_eq!(interval.lower, (f64::from(level) * 0.85).round() as u32);
        assert_eq!(result.risk_category, classify(level));

        assert_eq!(result.factor_breakdown.len(), 7);
        assert!(result
            .factor_breakdown
            .windows(2)
            .all(|pair| pair[0].value.abs() >= pair[1].value.abs()));
        let mut factors: Vec<_> = result.factor_breakdown.iter().map(|f| f.factor).collect();
        factors.sort();
        assert_eq!(factors, Dimension::PIPELINE.to_vec());
    }
}

#[test]
fn deterministic_scoring_is_idempotent() {
    let engine = deterministic_engine();
    for home in all_homes().into_iter().step_by(37) {
        let first = engine
            .score_home(&home, &mut StdRng::seed_from_u64(1))
            .expect("home scores");
        let second = engine
            .score_home(&home, &mut StdRng::seed_from_u64(2))
            .expect("home scores");
        assert_eq!(first, second);
    }
}

#[test]
fn unrecognized_values_score_like_neutral_values() {
    let engine = deterministic_engine();
    let baseline = engine
        .score_home(&neutral_home("Alberta"), &mut StdRng::seed_from_u64(0))
        .expect("home scores");

    let mut odd = neutral_home("Alberta");
    odd.building_age = "ancient".to_string();
    odd.foundation_type = "floating".to_string();
    odd.soil_type = "moon dust".to_string();
    odd.building_size = "huge".to_string();
    odd.floor_level = "attic".to_string();
    odd.ventilation_quality = "excellent".to_string();

    let result = engine
        .score_home(&odd, &mut StdRng::seed_from_u64(0))
        .expect("home scores");
    assert_eq!(result, baseline);

    let unknown_region = engine
        .score_home(&neutral_home("Atlantis"), &mut StdRng::seed_from_u64(0))
        .expect("home scores");
    assert_eq!(unknown_region.radon_level, 50);
}

#[test]
fn strict_mode_rejects_unrecognized_values() {
    let engine = RiskEngine::new(
        Arc::new(FactorTables::standard()),
        EngineConfig {
            variance_fraction: 0.0,
            validation: ValidationMode::Strict,
        },
    );
    let mut home = ontario_slab_home();
    home.soil_type = "Granite".to_string();

    let err = engine
        .score_home(&home, &mut StdRng::seed_from_u64(0))
        .expect_err("unknown soil rejected");
    assert_eq!(
        err,
        ScoringError::UnrecognizedValue {
            field: Dimension::SoilType,
            value: "Granite".to_string(),
        }
    );
    assert!(engine
        .score_home(&ontario_slab_home(), &mut StdRng::seed_from_u64(0))
        .is_ok());
}

#[test]
fn empty_fields_are_rejected() {
    let engine = deterministic_engine();
    let mut home = ontario_slab_home();
    home.building_age = String::new();

    let err = engine
        .score_home(&home, &mut StdRng::seed_from_u64(0))
        .expect_err("empty field rejected");
    assert_eq!(
        err,
        ScoringError::MissingField {
            field: Dimension::BuildingAge
        }
    );
    assert_eq!(err.to_string(), "required field 'buildingAge' is missing");
}

#[test]
fn substitute_tables_change_only_their_dimension() {
    let mut tables = FactorTables::standard();
    tables.region.insert("Ontario_South".to_string(), 2.0);
    let engine = RiskEngine::new(Arc::new(tables), EngineConfig::deterministic());

    let result = engine
        .score_home(&ontario_slab_home(), &mut StdRng::seed_from_u64(0))
        .expect("home scores");

    // 50 * 2.0 = 100, + 10 = 110, * 0.8 = 88
    assert_eq!(result.radon_level, 88);
    assert_eq!(engine.regional_baseline("Ontario_South"), 150);
}
