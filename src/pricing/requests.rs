//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::configuration::{MealKind, PricingConfiguration};
use super::errors::PricingError;
use super::selection::BookingSelection;

/// Raw selection as sent by the booking form (snake_case keys).
///
/// Enumerated values are kept as strings so an unknown value fails with
/// `InvalidSelection` naming the field. Structural problems (a missing
/// required field, a negative `people`) are body rejections, answered as
/// `AppError::InvalidBody`. The `BookingSelection` echoed back in responses
/// uses the camelCase keys of the pricing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionRequest {
    pub time_slot: String,
    pub guide_option: String,
    pub visitor_type: String,
    #[serde(default = "default_people")]
    pub people: u32,
    #[serde(default = "default_meal_option")]
    pub meal_option: String,
    #[serde(default = "default_veg_option")]
    pub veg_option: String,
    #[serde(default)]
    pub include_breakfast: bool,
    #[serde(default)]
    pub include_lunch: bool,
    #[serde(default)]
    pub include_eggs: bool,
    #[serde(default)]
    pub selected_breakfast_items: Vec<String>,
    #[serde(default)]
    pub selected_lunch_items: Vec<String>,
}

fn default_people() -> u32 {
    1
}

fn default_meal_option() -> String {
    "without".to_string()
}

fn default_veg_option() -> String {
    "non-veg".to_string()
}

/// Selection after parsing, clamping and pruning
#[derive(Debug, Clone)]
pub struct ResolvedSelection {
    pub selection: BookingSelection,
    pub requested_people: u32,
    pub dropped_items: Vec<String>,
}

impl SelectionRequest {
    /// Parse into a [`BookingSelection`] for the given package.
    ///
    /// People are clamped to the package capacity and items hidden by the
    /// vegetarian filter are dropped, as the booking form does.
    pub fn resolve(self, config: &PricingConfiguration) -> Result<ResolvedSelection, PricingError> {
        let requested_people = self.people;
        let mut selection = BookingSelection::new(
            self.time_slot.parse()?,
            self.guide_option.parse()?,
            self.visitor_type.parse()?,
        );
        selection.set_people(self.people, config.max_capacity);
        selection.meal_option = self.meal_option.parse()?;
        selection.veg_option = self.veg_option.parse()?;
        selection.include_breakfast = self.include_breakfast;
        selection.include_lunch = self.include_lunch;
        selection.include_eggs = self.include_eggs;

        let mut dropped_items = Vec::new();
        for (kind, names) in [
            (MealKind::Breakfast, self.selected_breakfast_items),
            (MealKind::Lunch, self.selected_lunch_items),
        ] {
            for name in names {
                if selection.select_item(kind, &name, &config.meal_options).is_err() {
                    dropped_items.push(name);
                }
            }
        }

        Ok(ResolvedSelection {
            selection,
            requested_people,
            dropped_items,
        })
    }
}

/// Request to quote a package
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub package_id: Uuid,
    pub selection: SelectionRequest,
    /// Reject the quote when any price had to be defaulted to zero
    #[serde(default)]
    pub strict: bool,
}

/// Request to build a booking-creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct BookingDraftRequest {
    pub package_id: Uuid,
    pub selection: SelectionRequest,
    pub customer_name: String,
    pub customer_email: String,
    pub safari_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query parameters for the menu endpoint
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    #[serde(default = "default_veg_option")]
    pub veg_option: String,
}

/// Request to drop cached pricing
#[derive(Debug, Default, Deserialize)]
pub struct InvalidateCacheRequest {
    #[serde(default)]
    pub package_id: Option<Uuid>,
}
