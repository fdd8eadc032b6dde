//! Scenario configuration
//!
//! A [`Scenario`] bundles everything one run needs: the investor profile, the
//! property catalog and the ordered selection of purchases. It is a plain
//! value: cloning it is how a scenario is copied for comparison, and
//! serializing it is how a caller persists it. The engine itself never reads
//! or writes storage.
//!
//! # Builder DSL
//!
//! ```ignore
//! use propplan_core::config::ScenarioBuilder;
//!
//! let scenario = ScenarioBuilder::new()
//!     .deposit_pool(80_000.0)
//!     .annual_savings(30_000.0)
//!     .years(20)
//!     .buy("unit", 2)
//!     .buy("house", 1)
//!     .build();
//!
//! let output = scenario.simulate()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{InvestmentProfile, PropertyCatalog, Selection, SimulationOutput};

pub mod builder;

pub use builder::ScenarioBuilder;

/// Complete input for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile: InvestmentProfile,
    #[serde(default = "PropertyCatalog::standard")]
    pub catalog: PropertyCatalog,
    #[serde(default)]
    pub selections: Vec<Selection>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: String::new(),
            profile: InvestmentProfile::default(),
            catalog: PropertyCatalog::standard(),
            selections: Vec::new(),
        }
    }
}

impl Scenario {
    /// Check the profile, catalog and selections without running anything
    pub fn validate(&self) -> Result<()> {
        self.profile.validate()?;
        self.catalog.validate()?;
        crate::queue::build_queue(&self.selections, &self.catalog).map(|_| ())
    }

    /// Run this scenario through [`simulate`](crate::simulation::simulate)
    pub fn simulate(&self) -> Result<SimulationOutput> {
        crate::simulation::simulate(&self.profile, &self.selections, &self.catalog)
    }

    /// A copy with a different profile, for what-if comparisons
    #[must_use]
    pub fn with_profile(&self, profile: InvestmentProfile) -> Self {
        Self {
            profile,
            ..self.clone()
        }
    }

    /// Total number of properties selected
    #[must_use]
    pub fn slot_count(&self) -> u64 {
        self.selections
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(u64::from(s.quantity)))
    }
}
