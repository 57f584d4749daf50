use super::common::*;
use crate::configurator::domain::{Dimension, ScoredOption, SelectionRequest};
use crate::configurator::index::OptionIndex;
use crate::configurator::resolver::SelectionResolver;

#[test]
fn resolve_returns_exact_matches_untouched() {
    let options = sparse_options();
    let index = OptionIndex::build(&options);
    let resolver = SelectionResolver::new(&index, &options);

    let resolved = resolver
        .resolve(
            &SelectionRequest::exact(selection(12_000, 24, 0)),
            Some(selection(20_000, 24, 5000)),
        )
        .expect("non-empty set resolves");

    assert_eq!(resolved, selection(12_000, 24, 0));
}

#[test]
fn resolve_is_total_for_any_requested_triple() {
    let options = sparse_options();
    let index = OptionIndex::build(&options);
    let resolver = SelectionResolver::new(&index, &options);

    for mileage in [1, 12_000, 14_000, 15_000, 20_000, 90_000] {
        for period in [1, 12, 24, 36, 120] {
            for upfront in [0, 1, 2500, 5000, 99_999] {
                let request = SelectionRequest::exact(selection(mileage, period, upfront));
                let resolved = resolver
                    .resolve(&request, None)
                    .expect("non-empty set always resolves");
                assert!(
                    index.exact(&resolved).is_some(),
                    "resolved {resolved:?} for ({mileage},{period},{upfront}) is not a stored option"
                );
            }
        }
    }
}

#[test]
fn resolve_is_idempotent() {
    let options = sparse_options();
    let index = OptionIndex::build(&options);
    let resolver = SelectionResolver::new(&index, &options);

    let request = SelectionRequest::changing(Dimension::Mileage, 14_000);
    let previous = Some(selection(20_000, 24, 5000));

    let first = resolver.resolve(&request, previous).expect("resolves");
    let second = resolver.resolve(&request, previous).expect("resolves");
    assert_eq!(first, second);
}

#[test]
fn resolve_relaxes_unpinned_dimensions_before_the_requested_one() {
    let options = sparse_options();
    let index = OptionIndex::build(&options);
    let resolver = SelectionResolver::new(&index, &options);

    // (15000, 24, 5000) does not exist; the mileage pick must be honored
    // and the upfront payment sacrificed.
    let resolved = resolver
        .resolve(
            &SelectionRequest::changing(Dimension::Mileage, 15_000),
            Some(selection(20_000, 24, 5000)),
        )
        .expect("resolves");

    assert_eq!(resolved, selection(15_000, 24, 0));
}

#[test]
fn resolve_snaps_to_the_nearest_value_with_ties_toward_lower() {
    let options = vec![
        option(12_000, 12, 0, 3000),
        option(12_000, 12, 10_000, 2700),
    ];
    let index = OptionIndex::build(&options);
    let resolver = SelectionResolver::new(&index, &options);

    // 5000 is equidistant from 0 and 10000.
    let resolved = resolver
        .resolve(
            &SelectionRequest::changing(Dimension::Upfront, 5000),
            Some(selection(12_000, 12, 0)),
        )
        .expect("resolves");
    assert_eq!(resolved, selection(12_000, 12, 0));

    let resolved = resolver
        .resolve(
            &SelectionRequest::changing(Dimension::Upfront, 5001),
            Some(selection(12_000, 12, 0)),
        )
        .expect("resolves");
    assert_eq!(resolved, selection(12_000, 12, 10_000));
}

#[test]
fn resolve_returns_none_only_for_an_empty_set() {
    let index = OptionIndex::build(&[]);
    let resolver = SelectionResolver::new(&index, &[]);

    assert!(resolver
        .resolve(&SelectionRequest::exact(selection(12_000, 12, 0)), None)
        .is_none());
}

#[test]
fn initial_picks_the_global_cheapest_option() {
    assert_eq!(
        SelectionResolver::initial(&sparse_options()),
        Some(selection(20_000, 24, 5000))
    );
}

#[test]
fn initial_breaks_monthly_ties_by_period_then_upfront() {
    let options = vec![
        option(15_000, 36, 0, 2400),
        option(15_000, 24, 5000, 2400),
        option(15_000, 24, 0, 2400),
    ];

    assert_eq!(
        SelectionResolver::initial(&options),
        Some(selection(15_000, 24, 0))
    );
}

#[test]
fn initial_is_none_for_an_empty_set() {
    assert_eq!(SelectionResolver::initial(&[]), None);
}

#[test]
fn select_best_score_prefers_the_highest_defined_score() {
    let scored = vec![
        ScoredOption {
            option: option(12_000, 24, 0, 2500),
            lease_score: Some(61),
        },
        ScoredOption {
            option: option(15_000, 24, 0, 2400),
            lease_score: Some(74),
        },
        ScoredOption {
            option: option(20_000, 24, 5000, 2300),
            lease_score: None,
        },
    ];

    assert_eq!(
        SelectionResolver::select_best_score(&scored),
        Some(selection(15_000, 24, 0))
    );
}

#[test]
fn select_best_score_breaks_ties_by_lower_monthly_price() {
    let scored = vec![
        ScoredOption {
            option: option(12_000, 24, 0, 2500),
            lease_score: Some(70),
        },
        ScoredOption {
            option: option(15_000, 24, 0, 2400),
            lease_score: Some(70),
        },
    ];

    assert_eq!(
        SelectionResolver::select_best_score(&scored),
        Some(selection(15_000, 24, 0))
    );
}

#[test]
fn select_best_score_falls_back_to_cheapest_when_nothing_is_scored() {
    let scored: Vec<ScoredOption> = sparse_options()
        .into_iter()
        .map(|option| ScoredOption {
            option,
            lease_score: None,
        })
        .collect();

    assert_eq!(
        SelectionResolver::select_best_score(&scored),
        SelectionResolver::initial(&sparse_options())
    );
}
