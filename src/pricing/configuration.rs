//! Package pricing configuration.
//!
//! A package's pricing configuration is stored as JSON (camelCase keys) and
//! deserialized into these types. Amounts accept JSON numbers or strings.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use super::errors::PricingError;

pub const DEFAULT_JEEP_TIER: &str = "luxury";
pub const DEFAULT_EGG_SURCHARGE: Decimal = dec!(1.50);
pub const DEFAULT_MAX_CAPACITY: u32 = 7;
pub const DEFAULT_CURRENCY: &str = "USD";

/// Upper bound for any single configured amount
pub const MAX_PRICE: Decimal = dec!(1000000);
/// Upper bound for `maxCapacity`
pub const MAX_CAPACITY_LIMIT: u32 = 1_000;

/// Safari time slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Extended,
    FullDay,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Extended,
        TimeSlot::FullDay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Extended => "extended",
            TimeSlot::FullDay => "fullDay",
        }
    }
}

impl FromStr for TimeSlot {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| PricingError::invalid_selection("timeSlot", s))
    }
}

/// Driver only, driver who guides, or driver plus a dedicated guide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuideOption {
    Driver,
    DriverGuide,
    SeparateGuide,
}

impl GuideOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuideOption::Driver => "driver",
            GuideOption::DriverGuide => "driverGuide",
            GuideOption::SeparateGuide => "separateGuide",
        }
    }
}

impl FromStr for GuideOption {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driver" => Ok(GuideOption::Driver),
            "driverGuide" => Ok(GuideOption::DriverGuide),
            "separateGuide" => Ok(GuideOption::SeparateGuide),
            other => Err(PricingError::invalid_selection("guideOption", other)),
        }
    }
}

/// Determines the per-person park ticket price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisitorType {
    Foreign,
    Local,
}

impl VisitorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitorType::Foreign => "foreign",
            VisitorType::Local => "local",
        }
    }
}

impl FromStr for VisitorType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "foreign" => Ok(VisitorType::Foreign),
            "local" => Ok(VisitorType::Local),
            other => Err(PricingError::invalid_selection("visitorType", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MealOption {
    With,
    Without,
}

impl FromStr for MealOption {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "with" => Ok(MealOption::With),
            "without" => Ok(MealOption::Without),
            other => Err(PricingError::invalid_selection("mealOption", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VegOption {
    #[serde(rename = "veg")]
    Veg,
    #[serde(rename = "non-veg")]
    NonVeg,
}

impl VegOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            VegOption::Veg => "veg",
            VegOption::NonVeg => "non-veg",
        }
    }
}

impl FromStr for VegOption {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "veg" => Ok(VegOption::Veg),
            "non-veg" => Ok(VegOption::NonVeg),
            other => Err(PricingError::invalid_selection("vegOption", other)),
        }
    }
}

/// Which menu a meal item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MealKind {
    Breakfast,
    Lunch,
}

impl fmt::Display for MealKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealKind::Breakfast => write!(f, "breakfast"),
            MealKind::Lunch => write!(f, "lunch"),
        }
    }
}

/// A single à-la-carte menu entry, priced per person
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Breakfast and lunch menus of a package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealMenus {
    #[serde(default)]
    pub breakfast: Vec<MenuItem>,
    #[serde(default)]
    pub lunch: Vec<MenuItem>,
}

impl MealMenus {
    pub fn items(&self, kind: MealKind) -> &[MenuItem] {
        match kind {
            MealKind::Breakfast => &self.breakfast,
            MealKind::Lunch => &self.lunch,
        }
    }
}

/// Per-person park entrance tickets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketPrices {
    #[serde(default)]
    pub foreign: Option<Decimal>,
    #[serde(default)]
    pub local: Option<Decimal>,
}

impl TicketPrices {
    pub fn get(&self, visitor_type: VisitorType) -> Option<Decimal> {
        match visitor_type {
            VisitorType::Foreign => self.foreign,
            VisitorType::Local => self.local,
        }
    }
}

/// Flat per-person meal rates from older package records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyMealRates {
    #[serde(default)]
    pub breakfast: Option<Decimal>,
    #[serde(default)]
    pub lunch: Option<Decimal>,
}

/// Pricing configuration of one safari package.
///
/// Held read-only for the duration of a booking flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfiguration {
    /// Jeep tier -> time slot id -> price
    #[serde(default)]
    pub jeep: BTreeMap<String, BTreeMap<String, Decimal>>,
    /// Guide option id -> flat surcharge
    #[serde(default)]
    pub guide: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub tickets: Option<TicketPrices>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meals: Option<LegacyMealRates>,
    #[serde(default)]
    pub meal_options: MealMenus,
    #[serde(default = "default_jeep_tier")]
    pub selected_jeep_tier: String,
    #[serde(default = "default_egg_surcharge")]
    pub egg_surcharge: Decimal,
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u32,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_jeep_tier() -> String {
    DEFAULT_JEEP_TIER.to_string()
}

fn default_egg_surcharge() -> Decimal {
    DEFAULT_EGG_SURCHARGE
}

fn default_max_capacity() -> u32 {
    DEFAULT_MAX_CAPACITY
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for PricingConfiguration {
    fn default() -> Self {
        Self {
            jeep: BTreeMap::new(),
            guide: BTreeMap::new(),
            tickets: None,
            meals: None,
            meal_options: MealMenus::default(),
            selected_jeep_tier: default_jeep_tier(),
            egg_surcharge: default_egg_surcharge(),
            max_capacity: default_max_capacity(),
            currency: default_currency(),
        }
    }
}

impl PricingConfiguration {
    /// Price of the selected jeep tier for a time slot, if configured
    pub fn jeep_price(&self, slot: TimeSlot) -> Option<Decimal> {
        self.jeep
            .get(&self.selected_jeep_tier)?
            .get(slot.as_str())
            .copied()
    }

    pub fn guide_price(&self, option: GuideOption) -> Option<Decimal> {
        self.guide.get(option.as_str()).copied()
    }

    /// Check prices are within `[0, MAX_PRICE]`, menu item names unique
    /// and `maxCapacity` within `[1, MAX_CAPACITY_LIMIT]`.
    ///
    /// Collects every violation instead of stopping at the first one.
    pub fn validate(&self) -> Result<(), PricingError> {
        let mut errors = Vec::new();
        let mut check = |field: String, price: Decimal| {
            if price < Decimal::ZERO {
                errors.push(format!("{} is negative", field));
            } else if price > MAX_PRICE {
                errors.push(format!("{} exceeds {}", field, MAX_PRICE));
            }
        };

        for (tier, slots) in &self.jeep {
            for (slot, price) in slots {
                check(format!("jeep.{}.{}", tier, slot), *price);
            }
        }

        for (option, price) in &self.guide {
            check(format!("guide.{}", option), *price);
        }

        if let Some(tickets) = &self.tickets {
            for (name, price) in [("foreign", tickets.foreign), ("local", tickets.local)] {
                if let Some(price) = price {
                    check(format!("tickets.{}", name), price);
                }
            }
        }

        if let Some(meals) = &self.meals {
            for (name, price) in [("breakfast", meals.breakfast), ("lunch", meals.lunch)] {
                if let Some(price) = price {
                    check(format!("meals.{}", name), price);
                }
            }
        }

        for kind in [MealKind::Breakfast, MealKind::Lunch] {
            for item in self.meal_options.items(kind) {
                check(format!("mealOptions.{}.{}", kind, item.name), item.price);
            }
        }

        check("eggSurcharge".to_string(), self.egg_surcharge);

        if self.jeep.keys().any(|tier| tier.trim().is_empty()) {
            errors.push("jeep tier name is empty".to_string());
        }

        for kind in [MealKind::Breakfast, MealKind::Lunch] {
            let mut seen = HashSet::new();
            for item in self.meal_options.items(kind) {
                if !seen.insert(item.name.as_str()) {
                    errors.push(format!("mealOptions.{} has duplicate item '{}'", kind, item.name));
                }
            }
        }

        if self.max_capacity == 0 {
            errors.push("maxCapacity must be at least 1".to_string());
        } else if self.max_capacity > MAX_CAPACITY_LIMIT {
            errors.push(format!("maxCapacity exceeds {}", MAX_CAPACITY_LIMIT));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PricingError::InvalidConfiguration {
                message: format!("{} invalid field(s)", errors.len()),
                errors,
            })
        }
    }
}
