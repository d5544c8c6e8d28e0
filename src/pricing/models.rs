//! Database models for package pricing queries.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::configuration::PricingConfiguration;
use super::errors::PricingError;

/// Safari package from safari_packages
#[derive(Debug, Clone, FromRow)]
pub struct SafariPackage {
    pub id: Uuid,
    pub name: String,
    pub park: String,
    pub block: Option<String>,
    pub max_capacity: Option<i32>,
    pub pricing: Option<serde_json::Value>,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

impl SafariPackage {
    /// Parse the package's pricing JSON.
    ///
    /// The `max_capacity` column takes precedence over the JSON value.
    pub fn pricing_configuration(&self) -> Result<PricingConfiguration, PricingError> {
        let raw = self.pricing.clone().ok_or_else(|| PricingError::InvalidConfiguration {
            message: format!("package {} has no pricing", self.id),
            errors: vec!["pricing column is null".to_string()],
        })?;

        let mut config: PricingConfiguration =
            serde_json::from_value(raw).map_err(|e| PricingError::InvalidConfiguration {
                message: format!("package {} pricing is malformed", self.id),
                errors: vec![e.to_string()],
            })?;

        if let Some(capacity) = self.max_capacity {
            config.max_capacity =
                u32::try_from(capacity).map_err(|_| PricingError::InvalidConfiguration {
                    message: format!("package {} capacity is negative", self.id),
                    errors: vec![format!("max_capacity = {}", capacity)],
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn summary(&self) -> PackageSummary {
        PackageSummary {
            id: self.id,
            name: self.name.clone(),
            park: self.park.clone(),
            block: self.block.clone(),
            max_capacity: self
                .max_capacity
                .and_then(|c| u32::try_from(c).ok())
                .unwrap_or(super::configuration::DEFAULT_MAX_CAPACITY),
        }
    }
}

/// Package listing entry
#[derive(Debug, Clone, Serialize)]
pub struct PackageSummary {
    pub id: Uuid,
    pub name: String,
    pub park: String,
    pub block: Option<String>,
    pub max_capacity: u32,
}
