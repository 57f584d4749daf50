use std::sync::Arc;

use tracing::info;

use super::domain::{Dimension, HoveredOption, ListingCatalog, ListingId};
use super::repository::{RepositoryError, SessionRepository};
use super::scoring::ScoreConfig;
use super::state::ConfigurationState;
use super::views::ConfiguratorView;

/// Service owning the session lifecycle around the pure engine: open a
/// configurator for a listing, apply user interaction, and hand views to
/// the presentation collaborators.
pub struct ConfiguratorService<R> {
    repository: Arc<R>,
    score_config: ScoreConfig,
}

impl<R> ConfiguratorService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, score_config: ScoreConfig) -> Self {
        Self {
            repository,
            score_config,
        }
    }

    pub fn score_config(&self) -> &ScoreConfig {
        &self.score_config
    }

    /// Opens a session for a listing, selection initialized to the cheapest
    /// option (or empty when the dealer published no options).
    pub fn open(&self, catalog: ListingCatalog) -> Result<ConfiguratorView, ConfiguratorError> {
        let state = ConfigurationState::new(catalog, self.score_config.clone());
        let view = ConfiguratorView::from_state(&state);
        info!(
            listing = %state.snapshot().listing_id,
            options = state.options().len(),
            "configurator session opened"
        );
        self.repository.insert(state)?;
        Ok(view)
    }

    pub fn view(&self, id: &ListingId) -> Result<ConfiguratorView, ConfiguratorError> {
        let state = self.fetch(id)?;
        Ok(ConfiguratorView::from_state(&state))
    }

    /// Commits a single-dimension change and returns the refreshed view.
    pub fn adjust(
        &self,
        id: &ListingId,
        dimension: Dimension,
        value: u32,
    ) -> Result<ConfiguratorView, ConfiguratorError> {
        self.mutate(id, |state| state.set_dimension(dimension, value))
    }

    pub fn reset(&self, id: &ListingId) -> Result<ConfiguratorView, ConfiguratorError> {
        self.mutate(id, ConfigurationState::reset_to_cheapest)
    }

    pub fn best_score(&self, id: &ListingId) -> Result<ConfiguratorView, ConfiguratorError> {
        self.mutate(id, ConfigurationState::select_best_score)
    }

    /// Updates the transient hover preview without touching the selection.
    pub fn hover(
        &self,
        id: &ListingId,
        hovered: Option<HoveredOption>,
    ) -> Result<ConfiguratorView, ConfiguratorError> {
        self.mutate(id, |state| state.set_hovered_option(hovered))
    }

    fn mutate(
        &self,
        id: &ListingId,
        apply: impl FnOnce(&mut ConfigurationState),
    ) -> Result<ConfiguratorView, ConfiguratorError> {
        let mut state = self.fetch(id)?;
        apply(&mut state);
        let view = ConfiguratorView::from_state(&state);
        self.repository.update(state)?;
        Ok(view)
    }

    fn fetch(&self, id: &ListingId) -> Result<ConfigurationState, ConfiguratorError> {
        let state = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(state)
    }
}

/// Error raised by the configurator service.
#[derive(Debug, thiserror::Error)]
pub enum ConfiguratorError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
