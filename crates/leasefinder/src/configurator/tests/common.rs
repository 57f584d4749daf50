use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::configurator::domain::{
    LeaseOption, ListingCatalog, ListingId, ListingSnapshot, Selection,
};
use crate::configurator::repository::{RepositoryError, SessionRepository};
use crate::configurator::scoring::ScoreConfig;
use crate::configurator::service::ConfiguratorService;
use crate::configurator::state::ConfigurationState;

pub(super) fn option(mileage: u32, period: u32, upfront: u32, monthly: u32) -> LeaseOption {
    LeaseOption {
        mileage_per_year: mileage,
        period_months: period,
        first_payment: upfront,
        monthly_price: monthly,
    }
}

pub(super) fn selection(mileage: u32, period: u32, upfront: u32) -> Selection {
    Selection {
        mileage_per_year: mileage,
        period_months: period,
        first_payment: upfront,
    }
}

/// The sparse option set a dealer published for one compact hatchback:
/// cheapest by monthly price is the high-mileage, high-upfront combination,
/// and (15000, 24, 5000) deliberately does not exist.
pub(super) fn sparse_options() -> Vec<LeaseOption> {
    vec![
        option(12_000, 12, 0, 3000),
        option(12_000, 24, 0, 2500),
        option(15_000, 24, 0, 2400),
        option(20_000, 24, 5000, 2300),
    ]
}

pub(super) fn snapshot(retail_price: Option<u32>) -> ListingSnapshot {
    ListingSnapshot {
        listing_id: ListingId("L-2041".to_string()),
        make: "Peugeot".to_string(),
        model: "208".to_string(),
        variant: Some("Active".to_string()),
        retail_price,
        available_from: None,
    }
}

pub(super) fn sparse_catalog() -> ListingCatalog {
    ListingCatalog {
        snapshot: snapshot(Some(190_000)),
        options: sparse_options(),
    }
}

pub(super) fn catalog_without_retail() -> ListingCatalog {
    ListingCatalog {
        snapshot: snapshot(None),
        options: sparse_options(),
    }
}

pub(super) fn empty_catalog() -> ListingCatalog {
    ListingCatalog {
        snapshot: snapshot(Some(190_000)),
        options: Vec::new(),
    }
}

pub(super) fn build_service() -> (
    ConfiguratorService<MemorySessions>,
    Arc<MemorySessions>,
) {
    let repository = Arc::new(MemorySessions::default());
    let service = ConfiguratorService::new(repository.clone(), ScoreConfig::default());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemorySessions {
    records: Arc<Mutex<HashMap<ListingId, ConfigurationState>>>,
}

impl SessionRepository for MemorySessions {
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
        guard.insert(state.snapshot().listing_id.clone(), state);
        Ok(())
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<ConfigurationState>, RepositoryError> {
        let guard = self.records.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct ConflictSessions;

impl SessionRepository for ConflictSessions {
    fn insert(&self, _state: ConfigurationState) -> Result<(), RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _state: ConfigurationState) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ListingId) -> Result<Option<ConfigurationState>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableSessions;

impl SessionRepository for UnavailableSessions {
    fn insert(&self, _state: ConfigurationState) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _state: ConfigurationState) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ListingId) -> Result<Option<ConfigurationState>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
