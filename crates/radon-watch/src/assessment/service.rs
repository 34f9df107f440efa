use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::repository::{AssessmentId, AssessmentRecord, PredictionStore, StoreError};
use crate::risk::{HomeCharacteristics, RiskEngine, ScoringError};

/// Service composing the scoring engine with the transient prediction store.
pub struct AssessmentService<S> {
    engine: Arc<RiskEngine>,
    store: Arc<S>,
    seed: Option<u64>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("assess-{id:06}"))
}

impl<S> AssessmentService<S>
where
    S: PredictionStore + 'static,
{
    pub fn new(engine: Arc<RiskEngine>, store: Arc<S>) -> Self {
        Self {
            engine,
            store,
            seed: None,
        }
    }

    /// Reseed the perturbation from `seed` on every call instead of the thread RNG.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    /// Score a home, attach its regional baseline, and keep the result for later display.
    pub fn submit(
        &self,
        home: HomeCharacteristics,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let prediction = match self.seed {
            Some(seed) => self
                .engine
                .score_home(&home, &mut StdRng::seed_from_u64(seed))?,
            None => self.engine.score_home(&home, &mut rand::thread_rng())?,
        };
        let regional_average = self.engine.regional_baseline(&home.region);

        let record = AssessmentRecord {
            id: next_assessment_id(),
            home,
            prediction,
            regional_average,
            assessed_at: Utc::now(),
        };

        let stored = self.store.insert(record)?;
        info!(
            assessment_id = %stored.id,
            radon_level = stored.prediction.radon_level,
            category = %stored.prediction.risk_category,
            regional_average = stored.regional_average,
            "stored radon assessment"
        );
        Ok(stored)
    }

    /// Fetch a stored assessment for the dashboard.
    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self.store.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
