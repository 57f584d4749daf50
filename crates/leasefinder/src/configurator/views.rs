use serde::Serialize;

use super::domain::{Dimension, HoveredOption, LeaseOption, ListingCatalog, ListingId, Selection};
use super::scoring::ScoreCalculator;
use super::state::ConfigurationState;

/// One candidate value of a dimension with its predicted price impact.
#[derive(Debug, Clone, Serialize)]
pub struct ImpactView {
    pub value: u32,
    pub delta_kr: i64,
    pub delta_percent: f64,
    pub is_available: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DimensionChoicesView {
    pub dimension: Dimension,
    pub dimension_label: &'static str,
    pub choices: Vec<ImpactView>,
}

/// Everything the configurator widgets (desktop card, mobile drawer,
/// mobile bar) read for one listing.
#[derive(Debug, Clone, Serialize)]
pub struct ConfiguratorView {
    pub listing_id: ListingId,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<LeaseOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cheapest_option: Option<LeaseOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score_option: Option<LeaseOption>,
    pub dimensions: Vec<DimensionChoicesView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovered: Option<HoveredOption>,
}

impl ConfiguratorView {
    pub fn from_state(state: &ConfigurationState) -> Self {
        let dimensions = [Dimension::Mileage, Dimension::Period, Dimension::Upfront]
            .into_iter()
            .map(|dimension| {
                let selected_value = state.selection().map(|selection| selection.value(dimension));
                let choices = state
                    .impacts(dimension)
                    .iter()
                    .map(|(&value, impact)| ImpactView {
                        value,
                        delta_kr: impact.delta_kr,
                        delta_percent: impact.delta_percent,
                        is_available: impact.is_available,
                        selected: selected_value == Some(value),
                    })
                    .collect();
                DimensionChoicesView {
                    dimension,
                    dimension_label: dimension.label(),
                    choices,
                }
            })
            .collect();

        Self {
            listing_id: state.snapshot().listing_id.clone(),
            ready: state.is_ready(),
            selection: state.selection(),
            selected_option: state.selected_option().copied(),
            selected_score: state.selected_score(),
            cheapest_option: state.cheapest_option().copied(),
            best_score_option: state.best_score_option().copied(),
            dimensions,
            hovered: state.hovered_option(),
        }
    }
}

/// Condensed listing-card surface for list pages: the "from" price and the
/// best achievable lease score, derived from the same option set the
/// configurator uses.
#[derive(Debug, Clone, Serialize)]
pub struct ListingCardSummary {
    pub listing_id: ListingId,
    pub option_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_price: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_mileage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_mileage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_period: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_period: Option<u32>,
}

impl ListingCardSummary {
    pub fn from_catalog(catalog: &ListingCatalog, calculator: &ScoreCalculator) -> Self {
        let options = &catalog.options;
        let scored = calculator.score_options(options, catalog.snapshot.retail_price);

        Self {
            listing_id: catalog.snapshot.listing_id.clone(),
            option_count: options.len(),
            from_price: options.iter().map(|option| option.monthly_price).min(),
            best_score: scored.iter().filter_map(|entry| entry.lease_score).max(),
            min_mileage: options.iter().map(|option| option.mileage_per_year).min(),
            max_mileage: options.iter().map(|option| option.mileage_per_year).max(),
            min_period: options.iter().map(|option| option.period_months).min(),
            max_period: options.iter().map(|option| option.period_months).max(),
        }
    }
}
