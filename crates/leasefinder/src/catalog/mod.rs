//! Listing-data collaborators that feed the configurator engine.

pub mod feed;

pub use feed::{FeedImport, FeedImportError, LeaseFeedImporter};
