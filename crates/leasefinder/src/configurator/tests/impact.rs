use super::common::*;
use crate::configurator::domain::Dimension;
use crate::configurator::impact::ImpactCalculator;
use crate::configurator::index::OptionIndex;

#[test]
fn current_value_always_reports_zero_delta_and_available() {
    let options = sparse_options();
    let index = OptionIndex::build(&options);
    let calculator = ImpactCalculator::new(&index, &options);
    let current = selection(20_000, 24, 5000);

    for dimension in [Dimension::Mileage, Dimension::Period, Dimension::Upfront] {
        let impacts = calculator.compute_impacts(dimension, current);
        let entry = impacts
            .get(&current.value(dimension))
            .expect("current value has an entry");
        assert_eq!(entry.delta_kr, 0);
        assert_eq!(entry.delta_percent, 0.0);
        assert!(entry.is_available);
    }
}

#[test]
fn every_distinct_dimension_value_gets_an_entry() {
    let options = sparse_options();
    let index = OptionIndex::build(&options);
    let calculator = ImpactCalculator::new(&index, &options);

    let impacts = calculator.compute_impacts(Dimension::Mileage, selection(20_000, 24, 5000));
    let candidates: Vec<u32> = impacts.keys().copied().collect();
    assert_eq!(candidates, vec![12_000, 15_000, 20_000]);
}

#[test]
fn relaxed_predictions_are_marked_unavailable() {
    let options = sparse_options();
    let index = OptionIndex::build(&options);
    let calculator = ImpactCalculator::new(&index, &options);

    // From (20000, 24, 5000): mileage 15000 only exists with upfront 0, so
    // the preview is approximate and costs +100 kr./md.
    let impacts = calculator.compute_impacts(Dimension::Mileage, selection(20_000, 24, 5000));
    let entry = impacts.get(&15_000).expect("candidate entry");

    assert_eq!(entry.delta_kr, 100);
    assert!(!entry.is_available);
}

#[test]
fn exact_candidates_are_marked_available_with_signed_deltas() {
    let options = sparse_options();
    let index = OptionIndex::build(&options);
    let calculator = ImpactCalculator::new(&index, &options);

    let impacts = calculator.compute_impacts(Dimension::Period, selection(12_000, 24, 0));
    let entry = impacts.get(&12).expect("candidate entry");

    // (12000, 12, 0) exists; switching costs +500 on a 2500 base.
    assert_eq!(entry.delta_kr, 500);
    assert!((entry.delta_percent - 20.0).abs() < 1e-9);
    assert!(entry.is_available);
}

#[test]
fn no_entries_when_the_current_selection_is_not_stored() {
    let options = sparse_options();
    let index = OptionIndex::build(&options);
    let calculator = ImpactCalculator::new(&index, &options);

    let impacts = calculator.compute_impacts(Dimension::Mileage, selection(1, 1, 1));
    assert!(impacts.is_empty());
}
