//! In-memory caching using moka
//!
//! Holds parsed package pricing configurations so quotes do not hit the
//! database on every selection change. Configurations are read-only once
//! loaded; admin edits become visible after TTL expiry or invalidation.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::pricing::models::PackageSummary;
use crate::pricing::{queries, PricingConfiguration};

const PACKAGE_LISTING_KEY: &str = "packages:active";

/// Application cache holding parsed pricing configurations
#[derive(Clone)]
pub struct AppCache {
    /// Package pricing (package id -> configuration)
    pub pricing: Cache<Uuid, Arc<PricingConfiguration>>,
    /// Active package listing
    pub packages: Cache<String, Arc<Vec<PackageSummary>>>,
}

impl AppCache {
    /// Create a new cache instance with the given pricing TTL
    pub fn new(pricing_ttl: Duration) -> Self {
        Self {
            // Package pricing: 500 entries, idle after a third of the TTL
            pricing: Cache::builder()
                .max_capacity(500)
                .time_to_live(pricing_ttl)
                .time_to_idle(pricing_ttl / 3)
                .build(),

            // Package listing: single entry
            packages: Cache::builder()
                .max_capacity(1)
                .time_to_live(pricing_ttl)
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            pricing_size: self.pricing.entry_count(),
            packages_cached: self.packages.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.pricing.invalidate_all();
        self.packages.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate a single package's pricing
    pub async fn invalidate_package(&self, package_id: Uuid) {
        self.pricing.invalidate(&package_id).await;
        // listing may show its capacity
        self.packages.invalidate_all();
        info!("Cache invalidated for package: {}", package_id);
    }

    pub async fn package_listing(&self) -> Option<Arc<Vec<PackageSummary>>> {
        self.packages.get(PACKAGE_LISTING_KEY).await
    }

    pub async fn store_package_listing(&self, packages: Vec<PackageSummary>) {
        self.packages
            .insert(PACKAGE_LISTING_KEY.to_string(), Arc::new(packages))
            .await;
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(30 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub pricing_size: u64,
    pub packages_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes on the given interval.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool, every: Duration) {
    let mut interval = interval(every);
    loop {
        // first tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Load every active package's pricing into the cache
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    let packages = match queries::list_active_packages(db).await {
        Ok(packages) => packages,
        Err(e) => {
            warn!("Failed to warm pricing cache: {}", e);
            return;
        }
    };

    for package in &packages {
        match package.pricing_configuration() {
            Ok(config) => cache.pricing.insert(package.id, Arc::new(config)).await,
            Err(e) => warn!("Skipping package {} ({}): {}", package.id, package.name, e),
        }
    }

    cache
        .store_package_listing(packages.iter().map(|p| p.summary()).collect())
        .await;

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
