use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Dimension, HoveredOption, ListingCatalog, ListingId};
use super::repository::{RepositoryError, SessionRepository};
use super::service::{ConfiguratorError, ConfiguratorService};

/// Router builder exposing the configurator session surface to external
/// collaborators (listing pages, URL sync). The engine itself stays
/// synchronous; these handlers only feed it inputs and read views.
pub fn configurator_router<R>(service: Arc<ConfiguratorService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/listings/:listing_id/configurator",
            post(open_handler::<R>).get(view_handler::<R>),
        )
        .route(
            "/api/v1/listings/:listing_id/configurator/selection",
            post(adjust_handler::<R>),
        )
        .route(
            "/api/v1/listings/:listing_id/configurator/reset",
            post(reset_handler::<R>),
        )
        .route(
            "/api/v1/listings/:listing_id/configurator/best-score",
            post(best_score_handler::<R>),
        )
        .route(
            "/api/v1/listings/:listing_id/configurator/hover",
            post(hover_handler::<R>),
        )
        .with_state(service)
}

/// Single-dimension change request mirrored from the configurator controls.
#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub dimension: Dimension,
    pub value: u32,
}

/// Hover preview update; a null body clears the hover.
#[derive(Debug, Default, Deserialize)]
pub struct HoverRequest {
    #[serde(default)]
    pub hovered: Option<HoveredOption>,
}

pub(crate) async fn open_handler<R>(
    State(service): State<Arc<ConfiguratorService<R>>>,
    Path(listing_id): Path<String>,
    Json(mut catalog): Json<ListingCatalog>,
) -> Response
where
    R: SessionRepository + 'static,
{
    // The path segment is authoritative for the session key.
    catalog.snapshot.listing_id = ListingId(listing_id);
    match service.open(catalog) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn view_handler<R>(
    State(service): State<Arc<ConfiguratorService<R>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.view(&ListingId(listing_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn adjust_handler<R>(
    State(service): State<Arc<ConfiguratorService<R>>>,
    Path(listing_id): Path<String>,
    Json(request): Json<AdjustRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.adjust(&ListingId(listing_id), request.dimension, request.value) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_handler<R>(
    State(service): State<Arc<ConfiguratorService<R>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.reset(&ListingId(listing_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn best_score_handler<R>(
    State(service): State<Arc<ConfiguratorService<R>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.best_score(&ListingId(listing_id)) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn hover_handler<R>(
    State(service): State<Arc<ConfiguratorService<R>>>,
    Path(listing_id): Path<String>,
    Json(request): Json<HoverRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.hover(&ListingId(listing_id), request.hovered) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ConfiguratorError) -> Response {
    let ConfiguratorError::Repository(repository_error) = &error;
    let status = match repository_error {
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
