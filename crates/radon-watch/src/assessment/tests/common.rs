use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::assessment::repository::{
    AssessmentId, AssessmentRecord, PredictionStore, StoreError,
};
use crate::assessment::{assessment_router, AssessmentService};
use crate::risk::{EngineConfig, FactorTables, HomeCharacteristics, RiskEngine};

pub(super) fn home() -> HomeCharacteristics {
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

pub(super) fn high_risk_home() -> HomeCharacteristics {
    HomeCharacteristics {
        region: "BC_Interior".to_string(),
        building_age: "41-60".to_string(),
        foundation_type: "basement".to_string(),
        soil_type: "granite".to_string(),
        building_size: "medium".to_string(),
        floor_level: "ground".to_string(),
        ventilation_quality: "average".to_string(),
    }
}

pub(super) fn deterministic_engine() -> Arc<RiskEngine> {
    Arc::new(RiskEngine::new(
        Arc::new(FactorTables::standard()),
        EngineConfig::deterministic(),
    ))
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("store mutex poisoned").len()
    }
}

impl PredictionStore for MemoryStore {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct ConflictStore;

impl PredictionStore for ConflictStore {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        Err(StoreError::Conflict)
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        Ok(None)
    }
}

pub(super) struct UnavailableStore;

impl PredictionStore for UnavailableStore {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, StoreError> {
        Err(StoreError::Unavailable("session storage offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, StoreError> {
        Err(StoreError::Unavailable("session storage offline".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<AssessmentService<MemoryStore>>, MemoryStore) {
    let store = MemoryStore::default();
    let service = Arc::new(AssessmentService::new(
        deterministic_engine(),
        Arc::new(store.clone()),
    ));
    (service, store)
}

pub(super) fn router_with_service(service: Arc<AssessmentService<MemoryStore>>) -> axum::Router {
    assessment_router(service)
}

pub(super) async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

pub(super) fn assert_status(response: &Response, status: StatusCode) {
    assert_eq!(response.status(), status, "unexpected status");
}
