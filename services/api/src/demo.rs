use crate::infra::{build_engine, InMemoryPredictionStore};
use chrono::SecondsFormat;
use clap::Args;
use radon_watch::assessment::{AssessmentService, DashboardView};
use radon_watch::config::AppConfig;
use radon_watch::error::AppError;
use radon_watch::risk::{
    classify, health_guidance, Dimension, HomeCharacteristics, PredictionResult,
    HEALTH_CANADA_ACTION_LEVEL, NATIONAL_AVERAGE,
};
use radon_watch::survey::RegionalSurvey;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Region key, e.g. Ontario_South
    #[arg(long)]
    pub(crate) region: String,
    /// Building age band: 0-10, 11-20, 21-40, 41-60 or 60+
    #[arg(long)]
    pub(crate) building_age: String,
    /// basement, crawlspace, slab or elevated
    #[arg(long)]
    pub(crate) foundation_type: String,
    /// granite, carbonate, shale, clay, sand, sedimentary or unknown
    #[arg(long)]
    pub(crate) soil_type: String,
    /// small, medium, large or xlarge
    #[arg(long)]
    pub(crate) building_size: String,
    /// basement, ground or upper
    #[arg(long)]
    pub(crate) floor_level: String,
    /// poor, average, good or mechanical
    #[arg(long)]
    pub(crate) ventilation_quality: String,
    /// Seed for the perturbation (overrides APP_SCORE_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Emit the prediction as JSON instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

impl PredictArgs {
    fn home(&self) -> HomeCharacteristics {
        HomeCharacteristics {
            region: self.region.clone(),
            building_age: self.building_age.clone(),
            foundation_type: self.foundation_type.clone(),
            soil_type: self.soil_type.clone(),
            building_size: self.building_size.clone(),
            floor_level: self.floor_level.clone(),
            ventilation_quality: self.ventilation_quality.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct SurveyArgs {
    /// Residential radon survey export (CSV)
    pub(crate) csv: PathBuf,
    /// Emit province statistics as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config.scoring)?;
    let home = args.home();

    let prediction = match args.seed.or(config.scoring.seed) {
        Some(seed) => engine.score_home(&home, &mut StdRng::seed_from_u64(seed))?,
        None => engine.score_home(&home, &mut rand::thread_rng())?,
    };

    if args.json {
        match serde_json::to_string_pretty(&prediction) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Prediction payload unavailable: {}", err),
        }
        return Ok(());
    }

    let regional = engine.regional_baseline(&home.region);
    println!("Radon risk prediction for {}", home.region);
    render_prediction(&prediction);
    println!(
        "Regional average {} Bq/m³ | National average {} Bq/m³",
        regional, NATIONAL_AVERAGE
    );
    Ok(())
}

pub(crate) fn run_baseline(region: &str) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config.scoring)?;
    let baseline = engine.regional_baseline(region);
    let category = classify(baseline);

    println!("{}: {} Bq/m³ ({})", region, baseline, category.label());
    if !engine.tables().contains(Dimension::Region, region) {
        println!("Region not recognized; showing the national average");
    }
    Ok(())
}

pub(crate) fn run_classify(level: u32) -> Result<(), AppError> {
    let category = classify(level);
    let guidance = health_guidance(level);

    println!("{} Bq/m³ -> {} ({})", level, category.label(), category.color());
    println!("{}", guidance.title);
    println!("  {}", guidance.description);
    println!("  Recommendation: {}", guidance.recommendation);
    if level >= HEALTH_CANADA_ACTION_LEVEL {
        println!(
            "  At or above the Health Canada action level of {} Bq/m³",
            HEALTH_CANADA_ACTION_LEVEL
        );
    }
    Ok(())
}

pub(crate) fn run_survey(args: SurveyArgs) -> Result<(), AppError> {
    let survey = RegionalSurvey::from_path(&args.csv)?;
    let stats = survey.province_stats();

    if args.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Survey payload unavailable: {}", err),
        }
        return Ok(());
    }

    println!(
        "Radon survey: {} usable readings from {}",
        survey.len(),
        args.csv.display()
    );
    if stats.is_empty() {
        println!("No province statistics available");
        return Ok(());
    }

    for province in &stats {
        println!(
            "- {} ({}): avg {} | median {} | range {}-{} | {} homes",
            province.name,
            province.code,
            province.average,
            province.median,
            province.min,
            province.max,
            province.count
        );
    }
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config.scoring)?;
    let store = Arc::new(InMemoryPredictionStore::default());
    let service = AssessmentService::new(engine, store).with_seed(config.scoring.seed);

    println!("Radon risk demo");
    for (label, home) in demo_homes() {
        println!("\n{}", label);
        let record = match service.submit(home) {
            Ok(record) => record,
            Err(err) => {
                println!("  Assessment rejected: {}", err);
                continue;
            }
        };

        let dashboard = match service.get(&record.id) {
            Ok(stored) => stored.dashboard(),
            Err(err) => {
                println!("  Assessment lookup failed: {}", err);
                continue;
            }
        };
        render_dashboard(&dashboard);
    }

    Ok(())
}

fn render_prediction(prediction: &PredictionResult) {
    println!(
        "Estimated level: {} Bq/m³ ({}, range {}-{})",
        prediction.radon_level,
        prediction.risk_label,
        prediction.confidence_interval.lower,
        prediction.confidence_interval.upper
    );
    println!("Factor breakdown:");
    for contribution in &prediction.factor_breakdown {
        println!(
            "  - {}: {}",
            contribution.factor.label(),
            contribution.impact
        );
    }
}

fn render_dashboard(dashboard: &DashboardView) {
    let record = &dashboard.record;
    println!(
        "  Assessment {} at {}",
        record.id,
        record
            .assessed_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    render_prediction(&record.prediction);
    println!(
        "  Versus regional average {} Bq/m³: {:+} Bq/m³ ({})",
        record.regional_average,
        dashboard.comparison.difference_from_regional,
        dashboard.comparison.regional_summary()
    );
    println!("  {}: {}", dashboard.guidance.title, dashboard.guidance.recommendation);
    println!("  Mitigation options:");
    for strategy in &dashboard.mitigation {
        println!(
            "    - {} ({}, {} effective)",
            strategy.title, strategy.cost, strategy.effectiveness
        );
    }
}

fn demo_homes() -> Vec<(&'static str, HomeCharacteristics)> {
    vec![
        (
            "Coastal condo on an upper floor",
            home("BC_Coastal", "0-10", "slab", "sand", "small", "upper", "mechanical"),
        ),
        (
            "Older family home in southern Ontario",
            home("Ontario_South", "41-60", "basement", "clay", "medium", "ground", "average"),
        ),
        (
            "Basement suite over granite in the BC interior",
            home("BC_Interior", "60+", "basement", "granite", "large", "basement", "poor"),
        ),
    ]
}

fn home(
    region: &str,
    building_age: &str,
    foundation_type: &str,
    soil_type: &str,
    building_size: &str,
    floor_level: &str,
    ventilation_quality: &str,
) -> HomeCharacteristics {
    HomeCharacteristics {
        region: region.to_string(),
        building_age: building_age.to_string(),
        foundation_type: foundation_type.to_string(),
        soil_type: soil_type.to_string(),
        building_size: building_size.to_string(),
        floor_level: floor_level.to_string(),
        ventilation_quality: ventilation_quality.to_string(),
    }
}
