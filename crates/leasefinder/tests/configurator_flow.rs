//! End-to-end specifications for the configurator session surface: open a
//! listing, adjust dimensions, and read derived state through the public
//! service facade and HTTP router only.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use leasefinder::configurator::{
        ConfigurationState, ConfiguratorService, LeaseOption, ListingCatalog, ListingId,
        ListingSnapshot, RepositoryError, ScoreConfig, SessionRepository,
    };

    pub(super) fn option(mileage: u32, period: u32, upfront: u32, monthly: u32) -> LeaseOption {
        LeaseOption {
            mileage_per_year: mileage,
            period_months: period,
            first_payment: upfront,
            monthly_price: monthly,
        }
    }

    pub(super) fn catalog() -> ListingCatalog {
        ListingCatalog {
            snapshot: ListingSnapshot {
                listing_id: ListingId("L-2041".to_string()),
                make: "Peugeot".to_string(),
                model: "208".to_string(),
                variant: Some("Active".to_string()),
                retail_price: Some(190_000),
                available_from: None,
            },
            options: vec![
                option(12_000, 12, 0, 3000),
                option(12_000, 24, 0, 2500),
                option(15_000, 24, 0, 2400),
                option(20_000, 24, 5000, 2300),
            ],
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemorySessions {
        records: Arc<Mutex<HashMap<ListingId, ConfigurationState>>>,
    }

    impl SessionRepository for MemorySessions {
        fn insert(&self, state: ConfigurationState) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            let id = state.snapshot().listing_id.clone();
            if guard.contains_key(&id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(id, state);
            Ok(())
        }

        fn update(&self, state: ConfigurationState) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.insert(state.snapshot().listing_id.clone(), state);
            Ok(())
        }

        fn fetch(&self, id: &ListingId) -> Result<Option<ConfigurationState>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }
    }

    pub(super) fn build_service() -> ConfiguratorService<MemorySessions> {
        ConfiguratorService::new(Arc::new(MemorySessions::default()), ScoreConfig::default())
    }
}

mod sessions {
    use super::common::*;
    use leasefinder::configurator::{Dimension, ListingId};

    fn listing_id() -> ListingId {
        ListingId("L-2041".to_string())
    }

    #[test]
    fn opening_selects_the_cheapest_combination() {
        let service = build_service();
        let view = service.open(catalog()).expect("open succeeds");

        let selected = view.selected_option.expect("session ready");
        assert_eq!(selected.monthly_price, 2300);
        assert_eq!(selected.mileage_per_year, 20_000);
        assert_eq!(selected.first_payment, 5000);
    }

    #[test]
    fn adjusting_mileage_relaxes_the_upfront_payment() {
        let service = build_service();
        service.open(catalog()).expect("open succeeds");

        let view = service
            .adjust(&listing_id(), Dimension::Mileage, 15_000)
            .expect("adjust succeeds");

        let selected = view.selected_option.expect("session ready");
        assert_eq!(selected.mileage_per_year, 15_000);
        assert_eq!(selected.period_months, 24);
        assert_eq!(selected.first_payment, 0);
        assert_eq!(selected.monthly_price, 2400);
    }

    #[test]
    fn impact_previews_flag_approximate_candidates() {
        let service = build_service();
        let view = service.open(catalog()).expect("open succeeds");

        let mileage_choices = view
            .dimensions
            .iter()
            .find(|choices| choices.dimension == Dimension::Mileage)
            .expect("mileage choices");
        let preview = mileage_choices
            .choices
            .iter()
            .find(|choice| choice.value == 15_000)
            .expect("15000 km preview");

        // (15000, 24, 5000) does not exist, so the preview went through
        // fallback and is approximate.
        assert!(!preview.is_available);
        assert_eq!(preview.delta_kr, 100);
    }

    #[test]
    fn a_full_interaction_round_trip_stays_on_real_options() {
        let service = build_service();
        service.open(catalog()).expect("open succeeds");

        let steps: [(Dimension, u32); 4] = [
            (Dimension::Mileage, 15_000),
            (Dimension::Period, 12),
            (Dimension::Upfront, 99_999),
            (Dimension::Mileage, 1),
        ];

        for (dimension, value) in steps {
            let view = service
                .adjust(&listing_id(), dimension, value)
                .expect("adjust succeeds");
            let selection = view.selection.expect("session stays ready");
            let selected = view.selected_option.expect("selection maps to an option");
            assert_eq!(selected.selection(), selection);
        }

        let view = service.reset(&listing_id()).expect("reset succeeds");
        assert_eq!(
            view.selected_option.map(|option| option.monthly_price),
            Some(2300)
        );
    }

    #[test]
    fn empty_catalogs_stay_inert_end_to_end() {
        let service = build_service();
        let mut empty = catalog();
        empty.options.clear();

        let view = service.open(empty).expect("open succeeds");
        assert!(!view.ready);
        assert!(view.selection.is_none());
        assert!(view.dimensions.iter().all(|choices| choices.choices.is_empty()));

        let view = service
            .adjust(&listing_id(), Dimension::Mileage, 15_000)
            .expect("setters are no-ops");
        assert!(view.selection.is_none());
    }
}
