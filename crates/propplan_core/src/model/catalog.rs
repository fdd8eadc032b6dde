//! Property catalog: per-type purchase assumptions

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::ids::PropertyTypeId;
use crate::error::{ConfigError, Result, check_amount, check_rate};

/// Assumptions for one property type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAssumption {
    pub id: PropertyTypeId,
    /// Purchase price in dollars
    pub average_cost: f64,
    /// Gross annual rental yield, percent of current value
    pub yield_percent: f64,
    /// Long-run annual capital growth, percent
    pub growth_percent: f64,
    /// Deposit required, percent of purchase price
    pub deposit_percent: f64,
}

impl PropertyAssumption {
    #[must_use]
    pub fn new(
        id: impl Into<PropertyTypeId>,
        average_cost: f64,
        yield_percent: f64,
        growth_percent: f64,
        deposit_percent: f64,
    ) -> Self {
        Self {
            id: id.into(),
            average_cost,
            yield_percent,
            growth_percent,
            deposit_percent,
        }
    }

    fn validate(&self) -> Result<()> {
        check_amount("average_cost", self.average_cost)?;
        check_rate("yield_percent", self.yield_percent, 0.0, 100.0)?;
        check_rate("growth_percent", self.growth_percent, -99.0, 100.0)?;
        check_rate("deposit_percent", self.deposit_percent, 0.0, 100.0)
    }
}

/// Ordered list of property types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyCatalog {
    entries: Vec<PropertyAssumption>,
}

impl PropertyCatalog {
    #[must_use]
    pub fn new(entries: Vec<PropertyAssumption>) -> Self {
        Self { entries }
    }

    /// A starter catalog of common residential and commercial types
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            PropertyAssumption::new("unit", 350_000.0, 4.5, 6.0, 20.0),
            PropertyAssumption::new("townhouse", 450_000.0, 4.3, 6.5, 20.0),
            PropertyAssumption::new("house", 550_000.0, 4.0, 7.0, 20.0),
            PropertyAssumption::new("duplex", 700_000.0, 5.0, 6.0, 20.0),
            PropertyAssumption::new("commercial", 800_000.0, 7.0, 4.0, 30.0),
        ])
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, entry: PropertyAssumption) -> Self {
        self.entries.push(entry);
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[PropertyAssumption] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &PropertyTypeId) -> Option<&PropertyAssumption> {
        self.entries.iter().find(|e| &e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index entries by id for repeated lookups
    pub(crate) fn index(&self) -> FxHashMap<&PropertyTypeId, &PropertyAssumption> {
        self.entries.iter().map(|e| (&e.id, e)).collect()
    }

    /// Reject duplicate ids and invalid assumptions
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for entry in &self.entries {
            if !seen.insert(&entry.id) {
                return Err(ConfigError::DuplicatePropertyType(entry.id.clone()));
            }
            entry.validate()?;
        }
        Ok(())
    }
}
