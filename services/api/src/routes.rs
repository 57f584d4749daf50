use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::cmp::Reverse;
use std::sync::Arc;

use leasefinder::configurator::{
    configurator_router, ConfiguratorService, ListingCardSummary, ListingCatalog, ListingId,
    ScoreCalculator, ScoredOption, SessionRepository,
};

/// Ranked scoring of a posted catalog, without opening a session. List pages
/// use this to decorate cards; the interactive configurator goes through the
/// session routes instead.
#[derive(Debug, Serialize)]
pub(crate) struct ScoreReportResponse {
    pub(crate) listing_id: ListingId,
    pub(crate) summary: ListingCardSummary,
    pub(crate) ranked_options: Vec<ScoredOption>,
}

pub(crate) fn with_configurator_routes<R>(service: Arc<ConfiguratorService<R>>) -> axum::Router
where
    R: SessionRepository + 'static,
{
    configurator_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/listings/score",
            axum::routing::post(score_listing_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_listing_endpoint(
    Extension(state): Extension<AppState>,
    Json(catalog): Json<ListingCatalog>,
) -> Json<ScoreReportResponse> {
    let calculator = ScoreCalculator::new(state.score_config.clone());
    Json(score_report(&catalog, &calculator))
}

pub(crate) fn score_report(
    catalog: &ListingCatalog,
    calculator: &ScoreCalculator,
) -> ScoreReportResponse {
    let summary = ListingCardSummary::from_catalog(catalog, calculator);

    let mut ranked_options = calculator.score_options(&catalog.options, catalog.snapshot.retail_price);
    // Best score first; unscored options sink to the end, cheapest first
    // within equal rank.
    ranked_options.sort_by_key(|entry| {
        (
            Reverse(entry.lease_score),
            entry.option.monthly_price,
            entry.option.period_months,
            entry.option.first_payment,
        )
    });

    ScoreReportResponse {
        listing_id: catalog.snapshot.listing_id.clone(),
        summary,
        ranked_options,
    }
}
