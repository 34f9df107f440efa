use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use radon_watch::assessment::{assessment_router, AssessmentService, PredictionStore};
use radon_watch::risk::{
    classify, region_catalog, Dimension, RiskCategory, HEALTH_CANADA_ACTION_LEVEL,
    HIGH_RISK_FLOOR, LOW_RISK_CEILING,
};
use radon_watch::survey::ProvinceStats;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegionEntry {
    pub(crate) key: &'static str,
    pub(crate) display_name: &'static str,
    pub(crate) multiplier: f64,
    pub(crate) baseline: u32,
    pub(crate) baseline_category: RiskCategory,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BaselineResponse {
    pub(crate) region: String,
    pub(crate) recognized: bool,
    pub(crate) baseline: u32,
    pub(crate) category: RiskCategory,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClassificationResponse {
    pub(crate) radon_level: u32,
    pub(crate) category: RiskCategory,
    pub(crate) label: &'static str,
    pub(crate) color: &'static str,
    pub(crate) exceeds_action_level: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThresholdsView {
    pub(crate) low_risk_ceiling: u32,
    pub(crate) high_risk_floor: u32,
    pub(crate) action_level: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FormOptionsResponse {
    pub(crate) options: BTreeMap<&'static str, Vec<String>>,
    pub(crate) thresholds: ThresholdsView,
}

pub(crate) fn with_assessment_routes<S>(service: Arc<AssessmentService<S>>) -> axum::Router
where
    S: PredictionStore + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/options", axum::routing::get(form_options_endpoint))
        .route("/api/v1/regions", axum::routing::get(regions_endpoint))
        .route(
            "/api/v1/regions/:region/baseline",
            axum::routing::get(baseline_endpoint),
        )
        .route(
            "/api/v1/classify/:radon_level",
            axum::routing::get(classify_endpoint),
        )
        .route(
            "/api/v1/survey/provinces",
            axum::routing::get(survey_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn form_options_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<FormOptionsResponse> {
    let tables = state.engine.tables();
    let options = Dimension::PIPELINE
        .into_iter()
        .map(|dimension| {
            let values = tables.categories(dimension).map(str::to_string).collect();
            (dimension.field_name(), values)
        })
        .collect();

    Json(FormOptionsResponse {
        options,
        thresholds: ThresholdsView {
            low_risk_ceiling: LOW_RISK_CEILING,
            high_risk_floor: HIGH_RISK_FLOOR,
            action_level: HEALTH_CANADA_ACTION_LEVEL,
        },
    })
}

pub(crate) async fn regions_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Vec<RegionEntry>> {
    let regions = region_catalog()
        .iter()
        .map(|option| {
            let baseline = state.engine.regional_baseline(option.key);
            RegionEntry {
                key: option.key,
                display_name: option.display_name,
                multiplier: state
                    .engine
                    .tables()
                    .factor_for(Dimension::Region, option.key)
                    .multiplier,
                baseline,
                baseline_category: classify(baseline),
            }
        })
        .collect();

    Json(regions)
}

pub(crate) async fn baseline_endpoint(
    Extension(state): Extension<AppState>,
    Path(region): Path<String>,
) -> Json<BaselineResponse> {
    let baseline = state.engine.regional_baseline(&region);
    let recognized = state.engine.tables().contains(Dimension::Region, &region);

    Json(BaselineResponse {
        region,
        recognized,
        baseline,
        category: classify(baseline),
    })
}

pub(crate) async fn classify_endpoint(
    Path(radon_level): Path<u32>,
) -> Json<ClassificationResponse> {
    let category = classify(radon_level);
    Json(ClassificationResponse {
        radon_level,
        category,
        label: category.label(),
        color: category.color(),
        exceeds_action_level: radon_level >= HEALTH_CANADA_ACTION_LEVEL,
    })
}

pub(crate) async fn survey_endpoint(Extension(state): Extension<AppState>) -> Response {
    match &state.survey {
        Some(survey) => {
            let stats: Vec<ProvinceStats> = survey.province_stats();
            (StatusCode::OK, Json(stats)).into_response()
        }
        None => {
            let payload = json!({
                "error": "radon survey data is not configured (set APP_SURVEY_CSV)",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
