use std::collections::BTreeMap;

use super::domain::{Dimension, LeaseOption, PriceImpact, Selection, SelectionRequest};
use super::index::OptionIndex;
use super::resolver::SelectionResolver;

/// Predicts the monthly-price consequence of switching one dimension while
/// the other two are held as close as possible to the current selection.
pub struct ImpactCalculator<'a> {
    index: &'a OptionIndex,
    options: &'a [LeaseOption],
}

impl<'a> ImpactCalculator<'a> {
    pub fn new(index: &'a OptionIndex, options: &'a [LeaseOption]) -> Self {
        Self { index, options }
    }

    /// One entry per distinct value of `dimension`. An entry is marked
    /// unavailable when its prediction required relaxing another dimension,
    /// which makes the preview approximate. The entry for the currently
    /// selected value is always `delta_kr = 0` and available.
    pub fn compute_impacts(
        &self,
        dimension: Dimension,
        current: Selection,
    ) -> BTreeMap<u32, PriceImpact> {
        let mut impacts = BTreeMap::new();
        let Some(current_option) = self.index.exact(&current) else {
            return impacts;
        };

        let resolver = SelectionResolver::new(self.index, self.options);
        for &candidate in self.index.available_values(dimension) {
            let desired = current.with_value(dimension, candidate);
            let request = SelectionRequest::changing(dimension, candidate);
            let Some(resolved) = resolver.resolve(&request, Some(current)) else {
                continue;
            };
            let Some(resolved_option) = self.index.exact(&resolved) else {
                continue;
            };

            let delta_kr =
                i64::from(resolved_option.monthly_price) - i64::from(current_option.monthly_price);
            let delta_percent = delta_kr as f64 / f64::from(current_option.monthly_price) * 100.0;

            impacts.insert(
                candidate,
                PriceImpact {
                    delta_kr,
                    delta_percent,
                    is_available: resolved == desired,
                },
            );
        }

        impacts
    }
}
