//! Desired purchases and the slots they expand into

use serde::{Deserialize, Serialize};

use super::ids::PropertyTypeId;
use super::money::Money;

/// How many properties of one type the investor wants
///
/// A list of selections is ordered by when the user added each type; that
/// order becomes the purchase priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub property_type: PropertyTypeId,
    pub quantity: u32,
}

impl Selection {
    #[must_use]
    pub fn new(property_type: impl Into<PropertyTypeId>, quantity: u32) -> Self {
        Self {
            property_type: property_type.into(),
            quantity,
        }
    }
}

/// One desired purchase in the FIFO queue
///
/// The catalog figures are copied in when the queue is built so the simulator
/// never needs the catalog again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionSlot {
    /// Position in the overall queue, starting at 0
    pub sequence: usize,
    pub property_type: PropertyTypeId,
    /// 1-based instance number within this property type
    pub ordinal: u32,
    pub cost: Money,
    pub deposit_percent: f64,
    pub yield_percent: f64,
    pub growth_percent: f64,
}

impl AcquisitionSlot {
    #[must_use]
    pub fn deposit(&self) -> Money {
        self.cost.percent(self.deposit_percent)
    }

    #[must_use]
    pub fn loan(&self) -> Money {
        self.cost - self.deposit()
    }

    /// Gross rent for a full year at the purchase price
    #[must_use]
    pub fn annual_rent(&self) -> Money {
        self.cost.percent(self.yield_percent)
    }

    /// Short human label, e.g. `house #2`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} #{}", self.property_type, self.ordinal)
    }
}
