//! HTTP handlers for the pricing API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::configuration::{PricingConfiguration, VegOption};
use super::models::PackageSummary;
use super::requests::{BookingDraftRequest, InvalidateCacheRequest, MenuQuery, QuoteRequest};
use super::responses::{BookingDraftResponse, CacheInvalidatedResponse, MenuResponse, QuoteResponse};
use super::services;

/// Pricing routes, mounted at the application root
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/packages", get(list_packages))
        .route("/api/packages/:id/pricing", get(package_pricing))
        .route("/api/packages/:id/menu", get(package_menu))
        .route("/api/pricing/quote", post(quote))
        .route("/api/pricing/booking-draft", post(booking_draft))
        .route("/api/pricing/cache/invalidate", post(invalidate_cache))
}

async fn list_packages(State(state): State<AppState>) -> Result<Json<Vec<PackageSummary>>> {
    let packages = services::list_packages(&state.db, &state.cache).await?;
    Ok(Json(packages.as_ref().clone()))
}

async fn package_pricing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PricingConfiguration>> {
    let config = services::load_pricing(&state.db, &state.cache, id).await?;
    Ok(Json(config.as_ref().clone()))
}

async fn package_menu(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    query: std::result::Result<Query<MenuQuery>, QueryRejection>,
) -> Result<Json<MenuResponse>> {
    let Query(query) = query?;
    let veg_option: VegOption = query.veg_option.parse()?;
    let config = services::load_pricing(&state.db, &state.cache, id).await?;
    Ok(Json(services::menu(id, &config, veg_option)))
}

async fn quote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>> {
    let Json(request) = payload?;
    let config = services::load_pricing(&state.db, &state.cache, request.package_id).await?;
    let (quote, _) =
        services::quote(request.package_id, &config, request.selection, request.strict)?;
    Ok(Json(quote))
}

async fn booking_draft(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BookingDraftRequest>, JsonRejection>,
) -> Result<Json<BookingDraftResponse>> {
    let Json(request) = payload?;
    let config = services::load_pricing(&state.db, &state.cache, request.package_id).await?;
    let draft = services::booking_draft(&config, request)?;
    tracing::info!(
        "Booking draft {} for package {}",
        draft.draft_id,
        draft.package_id
    );
    Ok(Json(draft))
}

async fn invalidate_cache(
    State(state): State<AppState>,
    payload: std::result::Result<Json<InvalidateCacheRequest>, JsonRejection>,
) -> Result<Json<CacheInvalidatedResponse>> {
    let Json(request) = payload?;
    match request.package_id {
        Some(id) => state.cache.invalidate_package(id).await,
        None => state.cache.invalidate_all(),
    }

    Ok(Json(CacheInvalidatedResponse {
        package_id: request.package_id,
        invalidated_all: request.package_id.is_none(),
    }))
}
