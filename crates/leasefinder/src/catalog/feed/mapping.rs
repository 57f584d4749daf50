use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use super::parser::FeedRecord;
use crate::configurator::domain::{LeaseOption, ListingCatalog, ListingId, ListingSnapshot};

/// Feed-level problems that make a whole file unusable. Individual bad rows
/// are skipped and counted instead.
#[derive(Debug)]
pub enum CatalogError {
    /// The feed contained no row with a listing id.
    MissingListing,
    /// Rows for more than one listing in a per-listing feed.
    MixedListings { expected: String, found: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::MissingListing => {
                write!(f, "feed contains no listing id")
            }
            CatalogError::MixedListings { expected, found } => {
                write!(
                    f,
                    "feed mixes listings '{}' and '{}'; one file per listing",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}

#[derive(Debug)]
pub(crate) struct MappedCatalog {
    pub(crate) catalog: ListingCatalog,
    pub(crate) total_rows: usize,
    pub(crate) skipped_rows: usize,
}

/// Builds a catalog from parsed rows. Snapshot fields come from the first
/// row that carries them; option rows with non-positive prices or zero
/// dimensions are skipped rather than failing the feed. A repeated
/// (mileage, period, upfront) triple keeps the freshest priced row, by
/// `Captured At` when present and file order otherwise.
pub(crate) fn map_records(records: Vec<FeedRecord>) -> Result<MappedCatalog, CatalogError> {
    let total_rows = records.len();
    let mut skipped_rows = 0;

    let mut listing_id: Option<String> = None;
    let mut make: Option<String> = None;
    let mut model: Option<String> = None;
    let mut variant: Option<String> = None;
    let mut retail_price: Option<u32> = None;
    let mut available_from: Option<NaiveDate> = None;

    let mut by_triple: HashMap<(u32, u32, u32), (LeaseOption, Option<NaiveDateTime>, u64)> =
        HashMap::new();

    for record in records {
        match (&listing_id, &record.listing_id) {
            (None, Some(id)) => listing_id = Some(id.clone()),
            (Some(expected), Some(found)) if expected != found => {
                return Err(CatalogError::MixedListings {
                    expected: expected.clone(),
                    found: found.clone(),
                });
            }
            _ => {}
        }

        if make.is_none() {
            make = record.make.clone();
        }
        if model.is_none() {
            model = record.model.clone();
        }
        if variant.is_none() {
            variant = record.variant.clone();
        }
        if retail_price.is_none() {
            retail_price = record.retail_price.filter(|price| *price > 0);
        }
        if available_from.is_none() {
            available_from = record.available_from;
        }

        let Some(option) = option_from_record(&record) else {
            skipped_rows += 1;
            continue;
        };

        let key = (
            option.mileage_per_year,
            option.period_months,
            option.first_payment,
        );
        let incoming = (option, record.captured_at, record.line);
        let replaces = match by_triple.get(&key) {
            Some(existing) => fresher(&incoming, existing),
            None => true,
        };
        if replaces {
            if by_triple.insert(key, incoming).is_some() {
                skipped_rows += 1;
            }
        } else {
            skipped_rows += 1;
        }
    }

    let listing_id = listing_id.ok_or(CatalogError::MissingListing)?;

    let mut entries: Vec<(LeaseOption, Option<NaiveDateTime>, u64)> =
        by_triple.into_values().collect();
    entries.sort_by_key(|(_, _, line)| *line);
    let options = entries.into_iter().map(|(option, _, _)| option).collect();

    Ok(MappedCatalog {
        catalog: ListingCatalog {
            snapshot: ListingSnapshot {
                listing_id: ListingId(listing_id),
                make: make.unwrap_or_default(),
                model: model.unwrap_or_default(),
                variant,
                retail_price,
                available_from,
            },
            options,
        },
        total_rows,
        skipped_rows,
    })
}

fn option_from_record(record: &FeedRecord) -> Option<LeaseOption> {
    let mileage_per_year = record.mileage_per_year.filter(|value| *value > 0)?;
    let period_months = record.period_months.filter(|value| *value > 0)?;
    let monthly_price = record.monthly_price.filter(|value| *value > 0)?;
    // Dealers leave the cell empty for no-deposit options.
    let first_payment = record.first_payment.unwrap_or(0);

    Some(LeaseOption {
        mileage_per_year,
        period_months,
        first_payment,
        monthly_price,
    })
}

/// Later captures win; rows without a timestamp fall back to file order.
fn fresher(
    incoming: &(LeaseOption, Option<NaiveDateTime>, u64),
    existing: &(LeaseOption, Option<NaiveDateTime>, u64),
) -> bool {
    match (incoming.1, existing.1) {
        (Some(new), Some(old)) => new >= old,
        _ => incoming.2 >= existing.2,
    }
}
