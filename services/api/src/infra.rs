use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use leasefinder::configurator::{
    ConfigurationState, ListingId, RepositoryError, ScoreConfig, SessionRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) score_config: ScoreConfig,
}

/// Sessions live only as long as the process; persistence of configurator
/// state is deliberately out of scope.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<ListingId, ConfigurationState>>>,
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, state: ConfigurationState) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        let id = state.snapshot().listing_id.clone();
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, state);
        Ok(())
    }

    fn update(&self, state: ConfigurationState) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("session mutex poisoned");
        let id = state.snapshot().listing_id.clone();
        if guard.contains_key(&id) {
            guard.insert(id, state);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<ConfigurationState>, RepositoryError> {
        let guard = self.records.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}
