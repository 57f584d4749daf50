use std::cmp::Reverse;

use super::domain::{Dimension, LeaseOption, ScoredOption, Selection, SelectionRequest};
use super::index::OptionIndex;

/// Base relaxation precedence, least to most intent-bearing. An upfront
/// payment is sacrificed before a contract length, and a contract length
/// before a mileage allowance.
const RELAX_PRECEDENCE: [Dimension; 3] =
    [Dimension::Upfront, Dimension::Period, Dimension::Mileage];

/// Every non-empty subset of the three ordered slots. The search order is
/// decided per call: subsets touching fewer explicitly requested dimensions
/// come first, then smaller subsets, then slot precedence. The full set frees
/// every dimension, which is what makes resolution total for any non-empty
/// option set.
const RELAX_SUBSETS: [&[usize]; 7] = [
    &[0],
    &[1],
    &[2],
    &[0, 1],
    &[0, 2],
    &[1, 2],
    &[0, 1, 2],
];

/// Maps any requested combination onto an existing, real lease option.
pub struct SelectionResolver<'a> {
    index: &'a OptionIndex,
    options: &'a [LeaseOption],
}

impl<'a> SelectionResolver<'a> {
    pub fn new(index: &'a OptionIndex, options: &'a [LeaseOption]) -> Self {
        Self { index, options }
    }

    /// Resolves a desired selection to the nearest real option.
    ///
    /// Returns `None` only for an empty option set. Otherwise the result
    /// always matches a stored option exactly: the desired triple is tried
    /// first, then dimensions are relaxed one at a time starting with those
    /// the caller did not pin, each relaxed dimension snapping to the
    /// numerically nearest stored value with ties broken toward the lower
    /// value.
    pub fn resolve(
        &self,
        desired: &SelectionRequest,
        previous: Option<Selection>,
    ) -> Option<Selection> {
        if self.options.is_empty() {
            return None;
        }

        // Pinned dimensions are relaxed last; unpinned ones keep their base
        // precedence among themselves.
        let mut order = Vec::with_capacity(3);
        for dimension in RELAX_PRECEDENCE {
            if !desired.is_requested(dimension) {
                order.push(dimension);
            }
        }
        let unpinned = order.len();
        for dimension in RELAX_PRECEDENCE {
            if desired.is_requested(dimension) {
                order.push(dimension);
            }
        }

        // A pinned dimension is only given up once every combination of
        // unpinned dimensions has failed to produce a match.
        let mut sets: Vec<&[usize]> = RELAX_SUBSETS.to_vec();
        let rank = |set: &[usize]| {
            (
                set.iter().filter(|&&slot| slot >= unpinned).count(),
                set.len(),
            )
        };
        sets.sort_by(|a, b| rank(a).cmp(&rank(b)).then_with(|| a.cmp(b)));

        let target = |dimension: Dimension| {
            desired
                .value(dimension)
                .or_else(|| previous.map(|selection| selection.value(dimension)))
        };

        if let (Some(mileage), Some(period), Some(upfront)) = (
            target(Dimension::Mileage),
            target(Dimension::Period),
            target(Dimension::Upfront),
        ) {
            if let Some(option) = self.index.exact_triple(mileage, period, upfront) {
                return Some(option.selection());
            }
        }

        'sets: for set in sets {
            let mut fixed = Vec::with_capacity(2);
            let mut relaxed = Vec::with_capacity(3);
            for (slot, dimension) in order.iter().copied().enumerate() {
                if set.contains(&slot) {
                    relaxed.push(dimension);
                } else {
                    match target(dimension) {
                        Some(value) => fixed.push((dimension, value)),
                        // A dimension without any target cannot be held
                        // fixed; wait for a wider set that frees it.
                        None => continue 'sets,
                    }
                }
            }

            let best = self
                .options
                .iter()
                .filter(|option| {
                    fixed
                        .iter()
                        .all(|&(dimension, value)| option.selection().value(dimension) == value)
                })
                .min_by_key(|option| relaxation_key(option, &relaxed, target));

            if let Some(option) = best {
                return Some(option.selection());
            }
        }

        // Unreachable for non-empty sets: the last relaxation set frees all
        // three dimensions and therefore matches any stored option.
        None
    }

    /// Selection for the globally cheapest option: minimum monthly price,
    /// ties broken by lower period, then lower first payment.
    pub fn initial(options: &[LeaseOption]) -> Option<Selection> {
        options
            .iter()
            .min_by_key(|option| {
                (
                    option.monthly_price,
                    option.period_months,
                    option.first_payment,
                )
            })
            .map(LeaseOption::selection)
    }

    pub fn cheapest(&self) -> Option<Selection> {
        Self::initial(self.options)
    }

    /// Selection for the option with the highest defined lease score, ties
    /// broken by lower monthly price. Options whose score is undefined can
    /// never win; when no score is defined at all this falls back to the
    /// cheapest option.
    pub fn select_best_score(scored: &[ScoredOption]) -> Option<Selection> {
        let winner = scored
            .iter()
            .filter_map(|entry| entry.lease_score.map(|score| (score, entry)))
            .min_by_key(|(score, entry)| {
                (
                    Reverse(*score),
                    entry.option.monthly_price,
                    entry.option.period_months,
                    entry.option.first_payment,
                )
            })
            .map(|(_, entry)| entry.option.selection());

        winner.or_else(|| {
            let options: Vec<LeaseOption> = scored.iter().map(|entry| entry.option).collect();
            Self::initial(&options)
        })
    }
}

/// Ranking key for candidates under one relaxation set: per relaxed
/// dimension, distance from the target first, then the raw value so that
/// equal distances resolve toward the lower value. Dimensions without a
/// target rank purely by value.
fn relaxation_key(
    option: &LeaseOption,
    relaxed: &[Dimension],
    target: impl Fn(Dimension) -> Option<u32>,
) -> Vec<(u32, u32)> {
    relaxed
        .iter()
        .map(|&dimension| {
            let value = option.selection().value(dimension);
            let distance = target(dimension)
                .map(|wanted| value.abs_diff(wanted))
                .unwrap_or(0);
            (distance, value)
        })
        .collect()
}
