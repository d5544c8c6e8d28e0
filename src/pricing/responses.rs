//! Response DTOs for pricing API endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::calculators::{PriceBreakdown, PricingWarning};
use super::configuration::{MenuItem, VegOption};
use super::errors::PricingError;
use super::selection::BookingSelection;

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// One line of a quote
#[derive(Debug, Clone, Serialize)]
pub struct QuoteLineResponse {
    pub key: String,
    pub unit_price: MoneyResponse,
    pub quantity: u32,
    pub amount: MoneyResponse,
}

/// Response for a package quote
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub quote_id: Uuid,
    pub package_id: Uuid,
    pub lines: Vec<QuoteLineResponse>,
    pub meals_per_person: MoneyResponse,
    pub total: MoneyResponse,
    pub people: u32,
    pub requested_people: u32,
    pub dropped_items: Vec<String>,
    pub warnings: Vec<PricingWarning>,
    pub quoted_at: DateTime<Utc>,
}

impl QuoteResponse {
    /// Build the response lines from a breakdown.
    ///
    /// Jeep, guide and tickets are always listed; meal lines only when they
    /// cost something.
    pub fn from_breakdown(
        package_id: Uuid,
        breakdown: PriceBreakdown,
        requested_people: u32,
        dropped_items: Vec<String>,
    ) -> Self {
        let currency = breakdown.currency.as_str();
        let people = breakdown.people;

        let mut lines = vec![
            line("jeep", breakdown.jeep, 1, currency),
            line("guide", breakdown.guide, 1, currency),
            line("tickets", breakdown.ticket_per_person, people, currency),
        ];
        for (key, unit) in [
            ("breakfast", breakdown.meals.breakfast_per_person),
            ("eggs", breakdown.meals.egg_surcharge_per_person),
            ("lunch", breakdown.meals.lunch_per_person),
        ] {
            if !unit.is_zero() {
                lines.push(line(key, unit, people, currency));
            }
        }

        Self {
            quote_id: Uuid::new_v4(),
            package_id,
            lines,
            meals_per_person: MoneyResponse::new(breakdown.meals.per_person(), currency),
            total: MoneyResponse::new(breakdown.total, currency),
            people,
            requested_people,
            dropped_items,
            warnings: breakdown.warnings,
            quoted_at: Utc::now(),
        }
    }
}

fn line(key: &str, unit: Decimal, quantity: u32, currency: &str) -> QuoteLineResponse {
    QuoteLineResponse {
        key: key.to_string(),
        unit_price: MoneyResponse::new(unit, currency),
        quantity,
        amount: MoneyResponse::new(unit * Decimal::from(quantity), currency),
    }
}

/// Booking-creation payload handed to the booking backend
#[derive(Debug, Clone, Serialize)]
pub struct BookingDraftResponse {
    pub draft_id: Uuid,
    pub package_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub safari_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub selection: BookingSelection,
    pub quote: QuoteResponse,
}

/// Vegetarian-filtered menus of a package
#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub package_id: Uuid,
    pub veg_option: VegOption,
    pub breakfast: Vec<MenuItem>,
    pub lunch: Vec<MenuItem>,
}

/// Response for cache invalidation
#[derive(Debug, Serialize)]
pub struct CacheInvalidatedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<Uuid>,
    pub invalidated_all: bool,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&PricingError> for PricingErrorResponse {
    fn from(err: &PricingError) -> Self {
        let details = match err {
            PricingError::InvalidConfiguration { errors, .. } => {
                Some(serde_json::json!({ "errors": errors }))
            }
            PricingError::InvalidSelection { field, value } => {
                Some(serde_json::json!({ "field": field, "value": value }))
            }
            PricingError::MissingPrice { fields } => Some(serde_json::json!({ "fields": fields })),
        };

        Self {
            error_type: err.error_type().to_string(),
            message: err.to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::calculators::MealCost;
    use rust_decimal_macros::dec;

    fn breakdown(meals: MealCost) -> PriceBreakdown {
        let people = meals.people;
        let tickets = dec!(15) * Decimal::from(people);
        PriceBreakdown {
            jeep: dec!(50),
            guide: dec!(0),
            ticket_per_person: dec!(15),
            tickets,
            total: dec!(50) + tickets + meals.total(),
            meals,
            people,
            currency: "USD".to_string(),
            warnings: vec![],
        }
    }

    #[test]
    fn test_quote_lines_without_meals() {
        let quote = QuoteResponse::from_breakdown(
            Uuid::nil(),
            breakdown(MealCost {
                people: 2,
                ..MealCost::default()
            }),
            2,
            vec![],
        );

        let keys: Vec<&str> = quote.lines.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["jeep", "guide", "tickets"]);
        assert_eq!(quote.lines[2].amount.amount, dec!(30));
        assert_eq!(quote.total.amount, dec!(80));
        assert_eq!(quote.total.currency, "USD");
    }

    #[test]
    fn test_quote_lines_include_priced_meals() {
        let quote = QuoteResponse::from_breakdown(
            Uuid::nil(),
            breakdown(MealCost {
                breakfast_per_person: dec!(3),
                egg_surcharge_per_person: dec!(1.50),
                lunch_per_person: dec!(0),
                people: 2,
            }),
            2,
            vec![],
        );

        let keys: Vec<&str> = quote.lines.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["jeep", "guide", "tickets", "breakfast", "eggs"]);
        assert_eq!(quote.meals_per_person.amount, dec!(4.50));
        assert_eq!(quote.total.amount, dec!(89));
    }

    #[test]
    fn test_money_serializes_as_string() {
        let value = serde_json::to_value(MoneyResponse::new(dec!(12.50), "USD")).unwrap();
        assert_eq!(value["amount"], "12.50");
    }

    #[test]
    fn test_error_response_details() {
        let err = PricingError::invalid_selection("guideOption", "chauffeur");
        let body = PricingErrorResponse::from(&err);
        assert_eq!(body.error_type, "invalid_selection");
        let details = body.details.unwrap();
        assert_eq!(details["field"], "guideOption");
        assert_eq!(details["value"], "chauffeur");
    }
}
