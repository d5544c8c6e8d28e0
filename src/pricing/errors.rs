//! Pricing error taxonomy.

use thiserror::Error;

/// Errors raised by the pricing engine.
///
/// Missing individual prices are not errors by default; they surface as
/// [`PricingWarning`](super::calculators::PricingWarning)s and only become
/// [`PricingError::MissingPrice`] when a caller asks for strict pricing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Invalid pricing configuration: {message}")]
    InvalidConfiguration { message: String, errors: Vec<String> },

    #[error("Invalid value for {field}: '{value}'")]
    InvalidSelection { field: &'static str, value: String },

    #[error("No price configured for {}", fields.join(", "))]
    MissingPrice { fields: Vec<String> },
}

impl PricingError {
    /// Pricing data was never loaded for the package.
    pub fn not_loaded() -> Self {
        PricingError::InvalidConfiguration {
            message: "pricing configuration not loaded".to_string(),
            errors: vec!["configuration is absent".to_string()],
        }
    }

    pub fn invalid_selection(field: &'static str, value: impl Into<String>) -> Self {
        PricingError::InvalidSelection {
            field,
            value: value.into(),
        }
    }

    /// Stable identifier used in JSON error bodies
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::InvalidConfiguration { .. } => "invalid_configuration",
            PricingError::InvalidSelection { .. } => "invalid_selection",
            PricingError::MissingPrice { .. } => "missing_price",
        }
    }
}
