//! Database queries for package pricing.
//!
//! Read-only; the admin dashboard owns writes to safari_packages.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::models::SafariPackage;

/// Get an active package by id
pub async fn get_package(pool: &PgPool, package_id: Uuid) -> Result<SafariPackage> {
    let package = sqlx::query_as::<_, SafariPackage>(
        r#"
        SELECT id, name, park, block, max_capacity, pricing, active, updated_at
        FROM safari_packages
        WHERE id = $1
          AND active = TRUE
          AND deleted_at IS NULL
        "#,
    )
    .bind(package_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(package)
}

/// List all active packages, by park then name
pub async fn list_active_packages(pool: &PgPool) -> Result<Vec<SafariPackage>> {
    let packages = sqlx::query_as::<_, SafariPackage>(
        r#"
        SELECT id, name, park, block, max_capacity, pricing, active, updated_at
        FROM safari_packages
        WHERE active = TRUE
          AND deleted_at IS NULL
        ORDER BY park, name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(packages)
}
