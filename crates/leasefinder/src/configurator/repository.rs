use super::domain::ListingId;
use super::state::ConfigurationState;

/// Storage abstraction for live configurator sessions so the service can be
/// exercised in isolation. Only an in-memory implementation ships;
/// persistence of engine state is deliberately out of scope.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, state: ConfigurationState) -> Result<(), RepositoryError>;
    fn update(&self, state: ConfigurationState) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<ConfigurationState>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
