//! Scenario Builder
//!
//! Fluent construction of a [`Scenario`] with the standard catalog and default
//! profile as the starting point.
//!
//! # Example
//!
//! ```ignore
//! use propplan_core::config::ScenarioBuilder;
//! use propplan_core::model::PropertyAssumption;
//!
//! let scenario = ScenarioBuilder::new()
//!     .name("Two units then a house")
//!     .deposit_pool(60_000.0)
//!     .borrowing_capacity(900_000.0)
//!     .annual_savings(30_000.0)
//!     .years(20)
//!     .property(PropertyAssumption::new("granny-flat", 220_000.0, 6.0, 5.0, 20.0))
//!     .buy("unit", 2)
//!     .buy("house", 1)
//!     .build();
//! ```

use super::Scenario;
use crate::model::{GrowthCurve, InvestmentProfile, PropertyAssumption, PropertyCatalog, Selection};

/// Builder for [`Scenario`]
#[derive(Debug, Clone, Default)]
pub struct ScenarioBuilder {
    scenario: Scenario,
}

impl ScenarioBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Basic Configuration
    // =========================================================================

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.scenario.name = name.into();
        self
    }

    /// Replace the whole profile
    #[must_use]
    pub fn profile(mut self, profile: InvestmentProfile) -> Self {
        self.scenario.profile = profile;
        self
    }

    /// Set the planning horizon in years
    #[must_use]
    pub fn years(mut self, years: u32) -> Self {
        self.scenario.profile.timeline_years = years;
        self
    }

    /// Set the date labelling period 0
    #[must_use]
    pub fn start(mut self, year: i16, month: i8, day: i8) -> Self {
        self.scenario.profile.start_date = jiff::civil::date(year, month, day);
        self
    }

    // =========================================================================
    // Finances
    // =========================================================================

    #[must_use]
    pub fn deposit_pool(mut self, amount: f64) -> Self {
        self.scenario.profile.deposit_pool = amount;
        self
    }

    #[must_use]
    pub fn borrowing_capacity(mut self, amount: f64) -> Self {
        self.scenario.profile.borrowing_capacity = amount;
        self
    }

    #[must_use]
    pub fn annual_savings(mut self, amount: f64) -> Self {
        self.scenario.profile.annual_savings = amount;
        self
    }

    /// Property already owned and the debt against it
    #[must_use]
    pub fn existing_portfolio(mut self, value: f64, debt: f64) -> Self {
        self.scenario.profile.current_portfolio_value = value;
        self.scenario.profile.current_debt = debt;
        self
    }

    #[must_use]
    pub fn base_salary(mut self, amount: f64) -> Self {
        self.scenario.profile.base_salary = amount;
        self
    }

    #[must_use]
    pub fn interest_rate(mut self, percent: f64) -> Self {
        self.scenario.profile.interest_rate_percent = percent;
        self
    }

    #[must_use]
    pub fn growth_curve(mut self, curve: GrowthCurve) -> Self {
        self.scenario.profile.growth_curve = curve;
        self
    }

    #[must_use]
    pub fn max_purchases_per_period(mut self, count: u32) -> Self {
        self.scenario.profile.max_purchases_per_period = count;
        self
    }

    // =========================================================================
    // Catalog and Selections
    // =========================================================================

    /// Replace the catalog
    #[must_use]
    pub fn catalog(mut self, catalog: PropertyCatalog) -> Self {
        self.scenario.catalog = catalog;
        self
    }

    /// Add or replace one catalog entry
    #[must_use]
    pub fn property(mut self, assumption: PropertyAssumption) -> Self {
        let id = assumption.id.clone();
        let entries = self
            .scenario
            .catalog
            .entries()
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .chain(std::iter::once(assumption))
            .collect();
        self.scenario.catalog = PropertyCatalog::new(entries);
        self
    }

    /// Queue `quantity` purchases of a property type
    #[must_use]
    pub fn buy(mut self, property_type: &str, quantity: u32) -> Self {
        self.scenario
            .selections
            .push(Selection::new(property_type, quantity));
        self
    }

    #[must_use]
    pub fn build(self) -> Scenario {
        self.scenario
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyTypeId;

    #[test]
    fn test_builder_defaults() {
        let scenario = ScenarioBuilder::new().build();
        assert_eq!(scenario, Scenario::default());
        assert_eq!(scenario.catalog, PropertyCatalog::standard());
        assert!(scenario.selections.is_empty());
    }

    #[test]
    fn test_builder_sets_profile_and_selections() {
        let scenario = ScenarioBuilder::new()
            .name("growth plan")
            .deposit_pool(80_000.0)
            .annual_savings(30_000.0)
            .existing_portfolio(600_000.0, 400_000.0)
            .years(20)
            .start(2026, 1, 1)
            .buy("unit", 2)
            .buy("house", 1)
            .build();

        assert_eq!(scenario.name, "growth plan");
        assert_eq!(scenario.profile.deposit_pool, 80_000.0);
        assert_eq!(scenario.profile.annual_savings, 30_000.0);
        assert_eq!(scenario.profile.current_portfolio_value, 600_000.0);
        assert_eq!(scenario.profile.current_debt, 400_000.0);
        assert_eq!(scenario.profile.timeline_years, 20);
        assert_eq!(scenario.profile.start_date, jiff::civil::date(2026, 1, 1));
        assert_eq!(scenario.slot_count(), 3);
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_property_replaces_existing_entry() {
        let scenario = ScenarioBuilder::new()
            .property(PropertyAssumption::new("unit", 400_000.0, 5.0, 5.0, 10.0))
            .build();

        let unit = scenario.catalog.get(&PropertyTypeId::from("unit")).unwrap();
        assert_eq!(unit.average_cost, 400_000.0);
        assert_eq!(scenario.catalog.len(), PropertyCatalog::standard().len());
        assert!(scenario.catalog.validate().is_ok());
    }

    #[test]
    fn test_property_appends_new_type() {
        let scenario = ScenarioBuilder::new()
            .property(PropertyAssumption::new("granny-flat", 220_000.0, 6.0, 5.0, 20.0))
            .buy("granny-flat", 1)
            .build();

        assert_eq!(scenario.catalog.len(), PropertyCatalog::standard().len() + 1);
        let last = scenario.catalog.entries().last().unwrap();
        assert_eq!(last.id, PropertyTypeId::from("granny-flat"));
        assert!(scenario.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_unknown_selection() {
        let scenario = ScenarioBuilder::new().buy("castle", 1).build();
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_slot_count_does_not_overflow() {
        let scenario = ScenarioBuilder::new()
            .buy("unit", u32::MAX)
            .buy("house", u32::MAX)
            .build();

        assert_eq!(scenario.slot_count(), 2 * u64::from(u32::MAX));
        assert!(matches!(
            scenario.validate(),
            Err(crate::error::ConfigError::QueueTooLong { .. })
        ));
    }
}
