use super::normalizer::{clean_text, parse_amount};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One feed row after text cleanup and number normalization. Validation
/// happens in the mapping step; the parser only gets the raw cells into
/// typed shape.
#[derive(Debug)]
pub(crate) struct FeedRecord {
    pub(crate) line: u64,
    pub(crate) listing_id: Option<String>,
    pub(crate) make: Option<String>,
    pub(crate) model: Option<String>,
    pub(crate) variant: Option<String>,
    pub(crate) retail_price: Option<u32>,
    pub(crate) mileage_per_year: Option<u32>,
    pub(crate) period_months: Option<u32>,
    pub(crate) first_payment: Option<u32>,
    pub(crate) monthly_price: Option<u32>,
    pub(crate) available_from: Option<NaiveDate>,
    pub(crate) captured_at: Option<NaiveDateTime>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<FeedRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for record in csv_reader.into_records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let row: FeedRow = record.deserialize(Some(&headers))?;

        records.push(FeedRecord {
            line,
            listing_id: row.listing_id.as_deref().map(clean_text).filter(|id| !id.is_empty()),
            make: row.make.as_deref().map(clean_text).filter(|s| !s.is_empty()),
            model: row.model.as_deref().map(clean_text).filter(|s| !s.is_empty()),
            variant: row.variant.as_deref().map(clean_text).filter(|s| !s.is_empty()),
            retail_price: row.retail_price.as_deref().and_then(parse_amount),
            mileage_per_year: row.mileage_per_year.as_deref().and_then(parse_amount),
            period_months: row.period_months.as_deref().and_then(parse_amount),
            first_payment: row.first_payment.as_deref().and_then(parse_amount),
            monthly_price: row.monthly_price.as_deref().and_then(parse_amount),
            available_from: row
                .available_from
                .as_deref()
                .and_then(parse_datetime)
                .map(|dt| dt.date()),
            captured_at: row.captured_at.as_deref().and_then(parse_datetime),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct FeedRow {
    #[serde(rename = "Listing ID", default, deserialize_with = "empty_string_as_none")]
    listing_id: Option<String>,
    #[serde(rename = "Make", default, deserialize_with = "empty_string_as_none")]
    make: Option<String>,
    #[serde(rename = "Model", default, deserialize_with = "empty_string_as_none")]
    model: Option<String>,
    #[serde(rename = "Variant", default, deserialize_with = "empty_string_as_none")]
    variant: Option<String>,
    #[serde(rename = "Retail Price", default, deserialize_with = "empty_string_as_none")]
    retail_price: Option<String>,
    #[serde(rename = "Mileage Per Year", default, deserialize_with = "empty_string_as_none")]
    mileage_per_year: Option<String>,
    #[serde(rename = "Period Months", default, deserialize_with = "empty_string_as_none")]
    period_months: Option<String>,
    #[serde(rename = "First Payment", default, deserialize_with = "empty_string_as_none")]
    first_payment: Option<String>,
    #[serde(rename = "Monthly Price", default, deserialize_with = "empty_string_as_none")]
    monthly_price: Option<String>,
    #[serde(rename = "Available From", default, deserialize_with = "empty_string_as_none")]
    available_from: Option<String>,
    #[serde(rename = "Captured At", default, deserialize_with = "empty_string_as_none")]
    captured_at: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<NaiveDateTime> {
    parse_datetime(value)
}
