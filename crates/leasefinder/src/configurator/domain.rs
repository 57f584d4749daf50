use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for vehicle listings as assigned by the listing platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One priced combination of annual mileage allowance, contract length, and
/// upfront payment published by a dealer for a single listing.
///
/// Prices are whole kroner. Within one listing's option set the
/// (mileage_per_year, period_months, first_payment) triple is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseOption {
    pub mileage_per_year: u32,
    pub period_months: u32,
    pub first_payment: u32,
    pub monthly_price: u32,
}

impl LeaseOption {
    pub fn selection(&self) -> Selection {
        Selection {
            mileage_per_year: self.mileage_per_year,
            period_months: self.period_months,
            first_payment: self.first_payment,
        }
    }
}

/// The three dimensions a user can adjust in the configurator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Mileage,
    Period,
    Upfront,
}

impl Dimension {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mileage => "mileage",
            Self::Period => "period",
            Self::Upfront => "upfront",
        }
    }
}

/// A committed triple. Invariant: always exactly matches one stored option
/// while the configurator is in its ready state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub mileage_per_year: u32,
    pub period_months: u32,
    pub first_payment: u32,
}

impl Selection {
    pub fn value(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Mileage => self.mileage_per_year,
            Dimension::Period => self.period_months,
            Dimension::Upfront => self.first_payment,
        }
    }

    pub fn with_value(mut self, dimension: Dimension, value: u32) -> Self {
        match dimension {
            Dimension::Mileage => self.mileage_per_year = value,
            Dimension::Period => self.period_months = value,
            Dimension::Upfront => self.first_payment = value,
        }
        self
    }
}

/// A possibly-partial, possibly-invalid requested selection.
///
/// Dimensions left unset fall back to the previous selection during
/// resolution and are the first candidates for relaxation; dimensions set
/// explicitly are the last to be relaxed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage_per_year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment: Option<u32>,
}

impl SelectionRequest {
    /// Request with every dimension pinned to an existing selection.
    pub fn exact(selection: Selection) -> Self {
        Self {
            mileage_per_year: Some(selection.mileage_per_year),
            period_months: Some(selection.period_months),
            first_payment: Some(selection.first_payment),
        }
    }

    /// Request changing a single dimension, leaving the others implicit.
    pub fn changing(dimension: Dimension, value: u32) -> Self {
        Self::default().with_value(dimension, value)
    }

    pub fn with_value(mut self, dimension: Dimension, value: u32) -> Self {
        match dimension {
            Dimension::Mileage => self.mileage_per_year = Some(value),
            Dimension::Period => self.period_months = Some(value),
            Dimension::Upfront => self.first_payment = Some(value),
        }
        self
    }

    pub fn value(&self, dimension: Dimension) -> Option<u32> {
        match dimension {
            Dimension::Mileage => self.mileage_per_year,
            Dimension::Period => self.period_months,
            Dimension::Upfront => self.first_payment,
        }
    }

    /// True when the caller pinned this dimension explicitly.
    pub fn is_requested(&self, dimension: Dimension) -> bool {
        self.value(dimension).is_some()
    }
}

/// Option annotated with its derived value-for-money score.
///
/// The score is absent, never zero, when the inputs required to rank the
/// option are missing or non-positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredOption {
    #[serde(flatten)]
    pub option: LeaseOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_score: Option<u8>,
}

/// Predicted monthly-price change for one candidate dimension value.
///
/// `is_available` is false when the prediction was reached only through
/// fallback relaxation and is therefore approximate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceImpact {
    pub delta_kr: i64,
    pub delta_percent: f64,
    pub is_available: bool,
}

/// Transient hover annotation used for hover previews. Never affects the
/// committed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoveredOption {
    pub dimension: Dimension,
    pub value: u32,
}

/// Car context supplied by the listing-data collaborator alongside the
/// option set. Only `retail_price` feeds the engine (scoring); the rest is
/// carried through for presentation views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub listing_id: ListingId,
    pub make: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Retail price in whole kroner; required input to scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_from: Option<NaiveDate>,
}

/// A listing snapshot together with its published option set, loaded once
/// per car and treated as immutable for the life of the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingCatalog {
    pub snapshot: ListingSnapshot,
    pub options: Vec<LeaseOption>,
}
