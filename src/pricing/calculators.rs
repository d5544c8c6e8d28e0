//! Core pricing calculation functions.
//!
//! Pure functions for safari pricing math - no database access, no I/O.
//! Callers recompute after every selection change.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

use super::configuration::{
    MealKind, MealOption, MenuItem, PricingConfiguration, VegOption, VisitorType,
};
use super::errors::PricingError;
use super::selection::BookingSelection;

/// Ticket prices used when a package defines none
pub const DEFAULT_FOREIGN_TICKET: Decimal = dec!(15);
pub const DEFAULT_LOCAL_TICKET: Decimal = dec!(5);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use safari_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Soft pricing condition: the quote is still computed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingWarning {
    /// Package has no ticket prices; built-in defaults were used
    DefaultTicketPrices { visitor_type: VisitorType },
    /// A price field is absent and was priced at zero
    MissingPrice { field: String },
}

impl fmt::Display for PricingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingWarning::DefaultTicketPrices { visitor_type } => write!(
                f,
                "no ticket prices configured, using default {} ticket price",
                visitor_type.as_str()
            ),
            PricingWarning::MissingPrice { field } => {
                write!(f, "no price configured for {}, priced at zero", field)
            }
        }
    }
}

/// A looked-up unit price and whether it had to be defaulted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLookup {
    pub amount: Decimal,
    pub warning: Option<PricingWarning>,
}

impl PriceLookup {
    fn configured(amount: Decimal) -> Self {
        Self { amount, warning: None }
    }

    fn missing(field: String) -> Self {
        Self {
            amount: Decimal::ZERO,
            warning: Some(PricingWarning::MissingPrice { field }),
        }
    }
}

/// Per-person ticket price for a visitor type.
///
/// Falls back to foreign=15 / local=5 when the package has no `tickets`
/// block at all.
pub fn ticket_price(config: &PricingConfiguration, visitor_type: VisitorType) -> PriceLookup {
    match &config.tickets {
        Some(tickets) => match tickets.get(visitor_type) {
            Some(amount) => PriceLookup::configured(amount),
            None => PriceLookup::missing(format!("tickets.{}", visitor_type.as_str())),
        },
        None => PriceLookup {
            amount: match visitor_type {
                VisitorType::Foreign => DEFAULT_FOREIGN_TICKET,
                VisitorType::Local => DEFAULT_LOCAL_TICKET,
            },
            warning: Some(PricingWarning::DefaultTicketPrices { visitor_type }),
        },
    }
}

/// Flat jeep price of the configured tier for the selected slot
pub fn jeep_price(config: &PricingConfiguration, selection: &BookingSelection) -> PriceLookup {
    match config.jeep_price(selection.time_slot) {
        Some(amount) => PriceLookup::configured(amount),
        None => PriceLookup::missing(format!(
            "jeep.{}.{}",
            config.selected_jeep_tier,
            selection.time_slot.as_str()
        )),
    }
}

pub fn guide_price(config: &PricingConfiguration, selection: &BookingSelection) -> PriceLookup {
    match config.guide_price(selection.guide_option) {
        Some(amount) => PriceLookup::configured(amount),
        None => PriceLookup::missing(format!("guide.{}", selection.guide_option.as_str())),
    }
}

/// Menu items visible under a vegetarian option, in menu order.
///
/// Lazy and borrowing; call again for a fresh pass.
pub fn filter_meal_menu(
    items: &[MenuItem],
    veg_option: VegOption,
) -> impl Iterator<Item = &MenuItem> + '_ {
    items
        .iter()
        .filter(move |item| veg_option != VegOption::Veg || item.is_vegetarian)
}

/// Meal cost split into its per-person parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealCost {
    pub breakfast_per_person: Decimal,
    pub egg_surcharge_per_person: Decimal,
    pub lunch_per_person: Decimal,
    pub people: u32,
}

impl MealCost {
    pub fn per_person(&self) -> Decimal {
        self.breakfast_per_person + self.egg_surcharge_per_person + self.lunch_per_person
    }

    pub fn total(&self) -> Decimal {
        self.per_person() * Decimal::from(self.people)
    }
}

fn selected_subtotal(
    config: &PricingConfiguration,
    selection: &BookingSelection,
    kind: MealKind,
) -> Decimal {
    let selected = selection.selected_items(kind);
    filter_meal_menu(config.meal_options.items(kind), selection.veg_option)
        .filter(|item| selected.contains(&item.name))
        .map(|item| item.price)
        .sum()
}

/// Meal cost for the whole party.
///
/// Only items that survive the vegetarian filter count. Eggs apply to
/// vegetarian breakfasts only. An empty menu prices at zero.
pub fn meal_cost(config: &PricingConfiguration, selection: &BookingSelection) -> MealCost {
    if selection.meal_option == MealOption::Without {
        return MealCost {
            people: selection.people,
            ..MealCost::default()
        };
    }

    let breakfast_per_person = if selection.include_breakfast {
        selected_subtotal(config, selection, MealKind::Breakfast)
    } else {
        Decimal::ZERO
    };

    let egg_surcharge_per_person = if selection.veg_option == VegOption::Veg
        && selection.include_eggs
        && selection.include_breakfast
    {
        config.egg_surcharge
    } else {
        Decimal::ZERO
    };

    let lunch_per_person = if selection.include_lunch {
        selected_subtotal(config, selection, MealKind::Lunch)
    } else {
        Decimal::ZERO
    };

    MealCost {
        breakfast_per_person,
        egg_surcharge_per_person,
        lunch_per_person,
        people: selection.people,
    }
}

/// Itemized price of one booking selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub jeep: Decimal,
    pub guide: Decimal,
    pub ticket_per_person: Decimal,
    pub tickets: Decimal,
    pub meals: MealCost,
    pub total: Decimal,
    pub people: u32,
    pub currency: String,
    pub warnings: Vec<PricingWarning>,
}

impl PriceBreakdown {
    /// Fail with `MissingPrice` if any field was defaulted to zero
    pub fn require_all_prices(&self) -> Result<(), PricingError> {
        let fields: Vec<String> = self
            .warnings
            .iter()
            .filter_map(|w| match w {
                PricingWarning::MissingPrice { field } => Some(field.clone()),
                PricingWarning::DefaultTicketPrices { .. } => None,
            })
            .collect();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(PricingError::MissingPrice { fields })
        }
    }
}

fn overflow() -> PricingError {
    PricingError::InvalidConfiguration {
        message: "price overflow".to_string(),
        errors: vec!["total exceeds the representable amount".to_string()],
    }
}

/// Compute the itemized price of a selection.
///
/// `config` is `None` when pricing was never loaded; that is an error, not a
/// zero total. People outside `[1, maxCapacity]` are rejected; clamping
/// belongs to [`BookingSelection::set_people`].
pub fn compute_breakdown(
    config: Option<&PricingConfiguration>,
    selection: &BookingSelection,
) -> Result<PriceBreakdown, PricingError> {
    let config = config.ok_or_else(PricingError::not_loaded)?;
    config.validate()?;

    if selection.people == 0 || selection.people > config.max_capacity {
        return Err(PricingError::invalid_selection(
            "people",
            selection.people.to_string(),
        ));
    }

    let jeep = jeep_price(config, selection);
    let guide = guide_price(config, selection);
    let ticket = ticket_price(config, selection.visitor_type);
    let meals = meal_cost(config, selection);

    let people = Decimal::from(selection.people);
    let tickets = ticket.amount.checked_mul(people).ok_or_else(overflow)?;
    let meals_total = meals
        .per_person()
        .checked_mul(people)
        .ok_or_else(overflow)?;
    let total = [guide.amount, tickets, meals_total]
        .into_iter()
        .try_fold(jeep.amount, Decimal::checked_add)
        .ok_or_else(overflow)?;
    let total = round_money(total, 2);

    let warnings: Vec<PricingWarning> = [jeep.warning, guide.warning, ticket.warning]
        .into_iter()
        .flatten()
        .collect();

    Ok(PriceBreakdown {
        jeep: jeep.amount,
        guide: guide.amount,
        ticket_per_person: ticket.amount,
        tickets,
        meals,
        total,
        people: selection.people,
        currency: config.currency.clone(),
        warnings,
    })
}

/// Grand total of a selection: jeep + guide + tickets x people + meals
pub fn compute_total(
    config: Option<&PricingConfiguration>,
    selection: &BookingSelection,
) -> Result<Decimal, PricingError> {
    compute_breakdown(config, selection).map(|breakdown| breakdown.total)
}
