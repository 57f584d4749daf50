//! Lease-option resolution and scoring engine.
//!
//! A dealer publishes a sparse set of priced (mileage, period, upfront)
//! combinations for one listing, never a full cartesian product. This module
//! resolves any requested combination onto a real option, ranks options by a
//! bounded value-for-money score, and predicts the price impact of candidate
//! choices before they are committed.

pub mod domain;
pub mod impact;
pub mod index;
pub mod repository;
pub mod resolver;
pub mod router;
pub mod scoring;
pub mod service;
pub mod state;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    Dimension, HoveredOption, LeaseOption, ListingCatalog, ListingId, ListingSnapshot,
    PriceImpact, ScoredOption, Selection, SelectionRequest,
};
pub use impact::ImpactCalculator;
pub use index::OptionIndex;
pub use repository::{RepositoryError, SessionRepository};
pub use resolver::SelectionResolver;
pub use router::configurator_router;
pub use scoring::{ScoreCalculator, ScoreConfig};
pub use service::{ConfiguratorError, ConfiguratorService};
pub use state::ConfigurationState;
pub use views::{ConfiguratorView, DimensionChoicesView, ImpactView, ListingCardSummary};
