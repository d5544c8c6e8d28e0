//! Pricing service functions with database access.
//!
//! These functions resolve a package's pricing through the cache and the
//! database, then hand off to the pure calculators.

use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::Result;

use super::calculators::{compute_breakdown, filter_meal_menu};
use super::configuration::{MealKind, MenuItem, PricingConfiguration, VegOption};
use super::errors::PricingError;
use super::models::PackageSummary;
use super::queries;
use super::requests::{BookingDraftRequest, SelectionRequest};
use super::responses::{BookingDraftResponse, MenuResponse, QuoteResponse};
use super::selection::BookingSelection;

/// Load a package's pricing configuration, cache first
pub async fn load_pricing(
    pool: &PgPool,
    cache: &AppCache,
    package_id: Uuid,
) -> Result<Arc<PricingConfiguration>> {
    if let Some(cached) = cache.pricing.get(&package_id).await {
        debug!("Cache HIT for package pricing: {}", package_id);
        return Ok(cached);
    }

    debug!("Cache MISS for package pricing: {}", package_id);
    let package = queries::get_package(pool, package_id).await?;
    let config = Arc::new(package.pricing_configuration()?);
    cache.pricing.insert(package_id, config.clone()).await;

    Ok(config)
}

/// List active packages, cache first
pub async fn list_packages(pool: &PgPool, cache: &AppCache) -> Result<Arc<Vec<PackageSummary>>> {
    if let Some(cached) = cache.package_listing().await {
        return Ok(cached);
    }

    let packages: Vec<PackageSummary> = queries::list_active_packages(pool)
        .await?
        .iter()
        .map(|p| p.summary())
        .collect();
    cache.store_package_listing(packages.clone()).await;

    Ok(Arc::new(packages))
}

/// Quote a selection against an already loaded configuration.
///
/// With `strict`, any price defaulted to zero fails the quote.
pub fn quote(
    package_id: Uuid,
    config: &PricingConfiguration,
    request: SelectionRequest,
    strict: bool,
) -> Result<(QuoteResponse, BookingSelection)> {
    let resolved = request.resolve(config)?;
    let breakdown = compute_breakdown(Some(config), &resolved.selection)?;

    if strict {
        breakdown.require_all_prices()?;
    }
    for warning in &breakdown.warnings {
        warn!("Package {}: {}", package_id, warning);
    }

    let response = QuoteResponse::from_breakdown(
        package_id,
        breakdown,
        resolved.requested_people,
        resolved.dropped_items,
    );
    Ok((response, resolved.selection))
}

/// Quote and wrap into a booking-creation payload.
///
/// Drafts are always priced strictly so a booking never carries a
/// silently free service.
pub fn booking_draft(
    config: &PricingConfiguration,
    request: BookingDraftRequest,
) -> Result<BookingDraftResponse> {
    if request.customer_name.trim().is_empty() {
        return Err(PricingError::invalid_selection("customer_name", request.customer_name).into());
    }
    if !request.customer_email.contains('@') {
        return Err(PricingError::invalid_selection("customer_email", request.customer_email).into());
    }

    let (quote, selection) = quote(request.package_id, config, request.selection, true)?;

    Ok(BookingDraftResponse {
        draft_id: Uuid::new_v4(),
        package_id: request.package_id,
        customer_name: request.customer_name,
        customer_email: request.customer_email,
        safari_date: request.safari_date,
        notes: request.notes,
        selection,
        quote,
    })
}

/// Menus of a package as visible under a vegetarian option
pub fn menu(package_id: Uuid, config: &PricingConfiguration, veg_option: VegOption) -> MenuResponse {
    let visible = |kind: MealKind| -> Vec<MenuItem> {
        filter_meal_menu(config.meal_options.items(kind), veg_option)
            .cloned()
            .collect()
    };

    MenuResponse {
        package_id,
        veg_option,
        breakfast: visible(MealKind::Breakfast),
        lunch: visible(MealKind::Lunch),
    }
}
