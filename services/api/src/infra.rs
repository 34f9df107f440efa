use metrics_exporter_prometheus::PrometheusHandle;
use radon_watch::assessment::{AssessmentId, AssessmentRecord, PredictionStore, StoreError};
use radon_watch::config::ScoringConfig;
use radon_watch::error::AppError;
use radon_watch::risk::{FactorTables, RiskEngine};
use radon_watch::survey::RegionalSurvey;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<RiskEngine>,
    pub(crate) survey: Option<Arc<RegionalSurvey>>,
}

/// Predictions kept before the oldest one is evicted.
pub(crate) const DEFAULT_STORE_CAPACITY: usize = 256;

/// Session-scoped prediction store holding at most `capacity` records.
///
/// Once full, each insert evicts the oldest record, so a stale assessment id
/// eventually answers 404.
#[derive(Clone)]
pub(crate) struct InMemoryPredictionStore {
    capacity: usize,
    inner: Arc<Mutex<StoredPredictions>>,
}

#[derive(Default)]
struct StoredPredictions {
    records: HashMap<AssessmentId, AssessmentRecord>,
    arrival: VecDeque<AssessmentId>,
}

impl Default for InMemoryPredictionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }
}

impl InMemoryPredictionStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Arc::new(Mutex::new(StoredPredictions::default())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoredPredictions>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("prediction store poisoned".to_string()))
    }
}

impl PredictionStore for InMemoryPredictionStore {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        let mut guard = self.lock()?;
        if guard.records.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }

        while guard.records.len() >= self.capacity {
            let Some(oldest) = guard.arrival.pop_front() else {
                break;
            };
            guard.records.remove(&oldest);
            debug!(assessment_id = %oldest, "evicted stored assessment");
        }

        guard.arrival.push_back(record.id.clone());
        guard.records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.records.get(id).cloned())
    }
}

/// Engine built from the configured tables, or the standard ones.
pub(crate) fn build_engine(config: &ScoringConfig) -> Result<Arc<RiskEngine>, AppError> {
    let tables = match &config.factor_tables {
        Some(path) => {
            let tables = FactorTables::from_path(path)?;
            info!(path = %path.display(), "loaded substitute factor tables");
            tables
        }
        None => FactorTables::standard(),
    };

    Ok(Arc::new(RiskEngine::new(
        Arc::new(tables),
        config.engine_config(),
    )))
}

pub(crate) fn load_survey(
    config: &ScoringConfig,
) -> Result<Option<Arc<RegionalSurvey>>, AppError> {
    match &config.survey_csv {
        Some(path) => Ok(Some(Arc::new(RegionalSurvey::from_path(path)?))),
        None => Ok(None),
    }
}
