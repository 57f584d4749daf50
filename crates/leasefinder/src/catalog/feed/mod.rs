mod mapping;
mod normalizer;
mod parser;

use std::io::Read;
use std::path::Path;

use crate::configurator::domain::ListingCatalog;

pub use mapping::CatalogError;

#[derive(Debug)]
pub enum FeedImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Listing(CatalogError),
}

impl std::fmt::Display for FeedImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedImportError::Io(err) => write!(f, "failed to read dealer feed: {}", err),
            FeedImportError::Csv(err) => write!(f, "invalid dealer feed CSV data: {}", err),
            FeedImportError::Listing(err) => {
                write!(f, "could not build listing catalog from feed: {}", err)
            }
        }
    }
}

impl std::error::Error for FeedImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedImportError::Io(err) => Some(err),
            FeedImportError::Csv(err) => Some(err),
            FeedImportError::Listing(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for FeedImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for FeedImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<CatalogError> for FeedImportError {
    fn from(err: CatalogError) -> Self {
        Self::Listing(err)
    }
}

/// Outcome of one feed import. Skipped rows are reported rather than failing
/// the whole feed; a dealer export routinely carries a few malformed lines.
#[derive(Debug)]
pub struct FeedImport {
    pub catalog: ListingCatalog,
    pub total_rows: usize,
    pub skipped_rows: usize,
}

/// Reads a per-listing dealer feed export into a `ListingCatalog`.
pub struct LeaseFeedImporter;

impl LeaseFeedImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<FeedImport, FeedImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<FeedImport, FeedImportError> {
        let records = parser::parse_records(reader)?;
        let mapped = mapping::map_records(records)?;

        Ok(FeedImport {
            catalog: mapped.catalog,
            total_rows: mapped.total_rows,
            skipped_rows: mapped.skipped_rows,
        })
    }
}
