//! Pricing engine module for safari packages.
//!
//! Computes itemized safari booking prices (jeep, guide, park tickets and
//! meals) from a package's pricing configuration. The storefront calls it
//! via HTTP/JSON on every change to the booking form.

pub mod calculators;
pub mod configuration;
pub mod errors;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod selection;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    compute_breakdown, compute_total, filter_meal_menu, meal_cost, round_money, ticket_price,
    PriceBreakdown, PricingWarning,
};
pub use configuration::PricingConfiguration;
pub use errors::PricingError;
pub use routes::router;
pub use selection::BookingSelection;
