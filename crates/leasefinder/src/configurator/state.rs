use std::collections::BTreeMap;

use tracing::debug;

use super::domain::{
    Dimension, HoveredOption, LeaseOption, ListingCatalog, ListingSnapshot, PriceImpact,
    ScoredOption, Selection, SelectionRequest,
};
use super::impact::ImpactCalculator;
use super::index::OptionIndex;
use super::resolver::SelectionResolver;
use super::scoring::{ScoreCalculator, ScoreConfig};

/// Orchestrator owning one listing's configurator: the immutable option
/// set, the committed selection, and every derived value the presentation
/// collaborators read.
///
/// With no options the state is empty: getters return none, setters are
/// no-ops. Once ready it stays ready, because resolution is total.
#[derive(Debug, Clone)]
pub struct ConfigurationState {
    snapshot: ListingSnapshot,
    options: Vec<LeaseOption>,
    index: OptionIndex,
    calculator: ScoreCalculator,
    scored: Vec<ScoredOption>,
    cheapest: Option<Selection>,
    best_score: Option<Selection>,
    selection: Option<Selection>,
    mileage_impacts: BTreeMap<u32, PriceImpact>,
    period_impacts: BTreeMap<u32, PriceImpact>,
    upfront_impacts: BTreeMap<u32, PriceImpact>,
    hovered: Option<HoveredOption>,
}

impl ConfigurationState {
    /// Builds the state for one listing, selection initialized to the
    /// cheapest option.
    pub fn new(catalog: ListingCatalog, score_config: ScoreConfig) -> Self {
        let ListingCatalog { snapshot, options } = catalog;
        let index = OptionIndex::build(&options);
        let calculator = ScoreCalculator::new(score_config);
        let scored = calculator.score_options(&options, snapshot.retail_price);
        let cheapest = SelectionResolver::initial(&options);
        let best_score = if scored.iter().any(|entry| entry.lease_score.is_some()) {
            SelectionResolver::select_best_score(&scored)
        } else {
            None
        };

        let mut state = Self {
            snapshot,
            options,
            index,
            calculator,
            scored,
            cheapest,
            best_score,
            selection: cheapest,
            mileage_impacts: BTreeMap::new(),
            period_impacts: BTreeMap::new(),
            upfront_impacts: BTreeMap::new(),
            hovered: None,
        };
        state.recompute_impacts();
        state
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn is_ready(&self) -> bool {
        self.selection.is_some()
    }

    pub fn snapshot(&self) -> &ListingSnapshot {
        &self.snapshot
    }

    pub fn options(&self) -> &[LeaseOption] {
        &self.options
    }

    pub fn index(&self) -> &OptionIndex {
        &self.index
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn selected_option(&self) -> Option<&LeaseOption> {
        self.selection
            .as_ref()
            .and_then(|selection| self.index.exact(selection))
    }

    pub fn selected_score(&self) -> Option<u8> {
        let selection = self.selection?;
        self.scored
            .iter()
            .find(|entry| entry.option.selection() == selection)
            .and_then(|entry| entry.lease_score)
    }

    pub fn scored_options(&self) -> &[ScoredOption] {
        &self.scored
    }

    pub fn cheapest_option(&self) -> Option<&LeaseOption> {
        self.cheapest
            .as_ref()
            .and_then(|selection| self.index.exact(selection))
    }

    /// Option with the highest defined lease score, if any score is defined.
    pub fn best_score_option(&self) -> Option<&LeaseOption> {
        self.best_score
            .as_ref()
            .and_then(|selection| self.index.exact(selection))
    }

    pub fn impacts(&self, dimension: Dimension) -> &BTreeMap<u32, PriceImpact> {
        match dimension {
            Dimension::Mileage => &self.mileage_impacts,
            Dimension::Period => &self.period_impacts,
            Dimension::Upfront => &self.upfront_impacts,
        }
    }

    pub fn hovered_option(&self) -> Option<HoveredOption> {
        self.hovered
    }

    pub fn set_mileage(&mut self, value: u32) {
        self.set_dimension(Dimension::Mileage, value);
    }

    pub fn set_period(&mut self, value: u32) {
        self.set_dimension(Dimension::Period, value);
    }

    pub fn set_upfront(&mut self, value: u32) {
        self.set_dimension(Dimension::Upfront, value);
    }

    /// Commits a single-dimension change, resolving to the nearest real
    /// option and recomputing every derived value.
    pub fn set_dimension(&mut self, dimension: Dimension, value: u32) {
        if self.is_empty() {
            return;
        }
        let request = SelectionRequest::changing(dimension, value);
        let resolver = SelectionResolver::new(&self.index, &self.options);
        if let Some(resolved) = resolver.resolve(&request, self.selection) {
            debug!(
                listing = %self.snapshot.listing_id,
                dimension = dimension.label(),
                requested = value,
                "selection adjusted"
            );
            self.commit(resolved);
        }
    }

    /// Re-applies the initial cheapest-option selection.
    pub fn reset_to_cheapest(&mut self) {
        if let Some(cheapest) = self.cheapest {
            self.commit(cheapest);
        }
    }

    /// Jumps to the option with the best defined lease score; identical to
    /// `reset_to_cheapest` when no option could be scored.
    pub fn select_best_score(&mut self) {
        if let Some(selection) = self.best_score.or(self.cheapest) {
            self.commit(selection);
        }
    }

    /// Pure preview annotation for the hover state; the committed selection
    /// and all derived values are untouched.
    pub fn set_hovered_option(&mut self, hovered: Option<HoveredOption>) {
        if self.is_empty() {
            return;
        }
        self.hovered = hovered;
    }

    fn commit(&mut self, selection: Selection) {
        self.selection = Some(selection);
        self.recompute_impacts();
    }

    fn recompute_impacts(&mut self) {
        let Some(current) = self.selection else {
            self.mileage_impacts = BTreeMap::new();
            self.period_impacts = BTreeMap::new();
            self.upfront_impacts = BTreeMap::new();
            return;
        };
        let calculator = ImpactCalculator::new(&self.index, &self.options);
        self.mileage_impacts = calculator.compute_impacts(Dimension::Mileage, current);
        self.period_impacts = calculator.compute_impacts(Dimension::Period, current);
        self.upfront_impacts = calculator.compute_impacts(Dimension::Upfront, current);
    }
}
