//! Customer booking selection and its mutation rules.
//!
//! The selection is owned by the caller. After every mutation the caller
//! recomputes the price explicitly with
//! [`compute_breakdown`](super::calculators::compute_breakdown).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::calculators::filter_meal_menu;
use super::configuration::{
    GuideOption, MealKind, MealMenus, MealOption, TimeSlot, VegOption, VisitorType,
};
use super::errors::PricingError;

/// Current choices of a customer configuring a safari booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSelection {
    pub time_slot: TimeSlot,
    pub guide_option: GuideOption,
    pub visitor_type: VisitorType,
    pub people: u32,
    pub meal_option: MealOption,
    pub veg_option: VegOption,
    pub include_breakfast: bool,
    pub include_lunch: bool,
    pub include_eggs: bool,
    pub selected_breakfast_items: BTreeSet<String>,
    pub selected_lunch_items: BTreeSet<String>,
}

impl BookingSelection {
    /// One person, no meals.
    pub fn new(time_slot: TimeSlot, guide_option: GuideOption, visitor_type: VisitorType) -> Self {
        Self {
            time_slot,
            guide_option,
            visitor_type,
            people: 1,
            meal_option: MealOption::Without,
            veg_option: VegOption::NonVeg,
            include_breakfast: false,
            include_lunch: false,
            include_eggs: false,
            selected_breakfast_items: BTreeSet::new(),
            selected_lunch_items: BTreeSet::new(),
        }
    }

    /// Clamp the requested head count into `[1, max_capacity]`.
    ///
    /// Returns the value actually applied.
    pub fn set_people(&mut self, requested: u32, max_capacity: u32) -> u32 {
        self.people = requested.clamp(1, max_capacity.max(1));
        self.people
    }

    pub fn selected_items(&self, kind: MealKind) -> &BTreeSet<String> {
        match kind {
            MealKind::Breakfast => &self.selected_breakfast_items,
            MealKind::Lunch => &self.selected_lunch_items,
        }
    }

    fn selected_items_mut(&mut self, kind: MealKind) -> &mut BTreeSet<String> {
        match kind {
            MealKind::Breakfast => &mut self.selected_breakfast_items,
            MealKind::Lunch => &mut self.selected_lunch_items,
        }
    }

    /// Switch the vegetarian option and drop items no longer eligible.
    ///
    /// Returns the dropped item names, breakfast first.
    pub fn set_veg_option(&mut self, veg_option: VegOption, menus: &MealMenus) -> Vec<String> {
        self.veg_option = veg_option;
        self.prune_ineligible_items(menus)
    }

    /// Remove selected names that the current vegetarian filter hides.
    pub fn prune_ineligible_items(&mut self, menus: &MealMenus) -> Vec<String> {
        let mut dropped = Vec::new();
        for kind in [MealKind::Breakfast, MealKind::Lunch] {
            let eligible: BTreeSet<&str> = filter_meal_menu(menus.items(kind), self.veg_option)
                .map(|item| item.name.as_str())
                .collect();
            let selected = self.selected_items_mut(kind);
            let (keep, drop): (BTreeSet<String>, BTreeSet<String>) = std::mem::take(selected)
                .into_iter()
                .partition(|name| eligible.contains(name.as_str()));
            *selected = keep;
            dropped.extend(drop);
        }
        dropped
    }

    /// Select a menu item visible under the current vegetarian filter.
    ///
    /// Returns `false` when it was already selected.
    pub fn select_item(
        &mut self,
        kind: MealKind,
        name: &str,
        menus: &MealMenus,
    ) -> Result<bool, PricingError> {
        let field = match kind {
            MealKind::Breakfast => "selectedBreakfastItems",
            MealKind::Lunch => "selectedLunchItems",
        };
        if !filter_meal_menu(menus.items(kind), self.veg_option).any(|item| item.name == name) {
            return Err(PricingError::invalid_selection(field, name));
        }
        Ok(self.selected_items_mut(kind).insert(name.to_string()))
    }

    pub fn deselect_item(&mut self, kind: MealKind, name: &str) -> bool {
        self.selected_items_mut(kind).remove(name)
    }
}
