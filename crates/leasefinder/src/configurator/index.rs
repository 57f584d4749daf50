use std::collections::{BTreeSet, HashMap};

use super::domain::{Dimension, LeaseOption, Selection};

/// Exact-lookup index over one listing's option set.
///
/// Built once per listing. Replaces linear scans with a triple-keyed map so
/// resolution stays O(1) as dealer catalogs grow, and exposes the sorted
/// distinct value list per dimension that the choice controls render.
#[derive(Debug, Clone, Default)]
pub struct OptionIndex {
    by_triple: HashMap<(u32, u32, u32), LeaseOption>,
    mileages: Vec<u32>,
    periods: Vec<u32>,
    upfronts: Vec<u32>,
}

impl OptionIndex {
    /// Empty input is legal and yields an index with empty value lists.
    pub fn build(options: &[LeaseOption]) -> Self {
        let mut by_triple = HashMap::with_capacity(options.len());
        let mut mileages = BTreeSet::new();
        let mut periods = BTreeSet::new();
        let mut upfronts = BTreeSet::new();

        for option in options {
            by_triple.insert(
                (
                    option.mileage_per_year,
                    option.period_months,
                    option.first_payment,
                ),
                *option,
            );
            mileages.insert(option.mileage_per_year);
            periods.insert(option.period_months);
            upfronts.insert(option.first_payment);
        }

        Self {
            by_triple,
            mileages: mileages.into_iter().collect(),
            periods: periods.into_iter().collect(),
            upfronts: upfronts.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_triple.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_triple.len()
    }

    pub fn exact(&self, selection: &Selection) -> Option<&LeaseOption> {
        self.exact_triple(
            selection.mileage_per_year,
            selection.period_months,
            selection.first_payment,
        )
    }

    pub fn exact_triple(&self, mileage: u32, period: u32, upfront: u32) -> Option<&LeaseOption> {
        self.by_triple.get(&(mileage, period, upfront))
    }

    /// Sorted distinct annual mileage allowances.
    pub fn available_mileages(&self) -> &[u32] {
        &self.mileages
    }

    /// Sorted distinct contract lengths in months.
    pub fn available_periods(&self) -> &[u32] {
        &self.periods
    }

    /// Sorted distinct upfront payments.
    pub fn available_upfronts(&self) -> &[u32] {
        &self.upfronts
    }

    pub fn available_values(&self, dimension: Dimension) -> &[u32] {
        match dimension {
            Dimension::Mileage => self.available_mileages(),
            Dimension::Period => self.available_periods(),
            Dimension::Upfront => self.available_upfronts(),
        }
    }
}
