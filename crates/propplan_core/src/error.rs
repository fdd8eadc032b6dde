use std::fmt;

use crate::model::PropertyTypeId;

/// Largest dollar amount accepted for any monetary input
///
/// Keeps every ledger balance, after growth and summation over the longest
/// horizon, comfortably inside the integer-cents range.
pub const MAX_AMOUNT: f64 = 1.0e12;

/// Errors raised for structurally invalid input.
///
/// Every variant is detected before the first period runs, so a run either
/// fails with one of these or produces a complete result. A plan that never
/// becomes affordable is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Horizon longer than the engine accepts
    InvalidHorizon { years: u32, max: u32 },
    /// A selection references a type missing from the catalog
    UnknownPropertyType(PropertyTypeId),
    /// The catalog lists the same type twice
    DuplicatePropertyType(PropertyTypeId),
    /// A monetary input is negative, NaN or infinite
    InvalidAmount { field: &'static str, value: f64 },
    /// A rate or ratio is outside its permitted range
    InvalidRate {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// A monetary input is finite but above [`MAX_AMOUNT`]
    AmountTooLarge {
        field: &'static str,
        value: f64,
        max: f64,
    },
    /// `max_purchases_per_period` of zero would stall every run
    ZeroPurchaseLimit,
    /// `max_purchases_per_period` above the accepted limit
    ExcessivePurchaseLimit { value: u32, max: u32 },
    /// The selections expand to more slots than one run accepts
    QueueTooLong { slots: u64, max: u64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHorizon { years, max } => {
                write!(f, "timeline of {years} years exceeds the {max}-year limit")
            }
            ConfigError::UnknownPropertyType(id) => {
                write!(f, "property type {id} not found in catalog")
            }
            ConfigError::DuplicatePropertyType(id) => {
                write!(f, "property type {id} appears more than once in catalog")
            }
            ConfigError::InvalidAmount { field, value } => {
                write!(f, "{field} must be a non-negative finite amount, got {value}")
            }
            ConfigError::InvalidRate {
                field,
                value,
                min,
                max,
            } => {
                write!(f, "{field} must be within [{min}, {max}], got {value}")
            }
            ConfigError::AmountTooLarge { field, value, max } => {
                write!(f, "{field} of {value} exceeds the {max} limit")
            }
            ConfigError::ZeroPurchaseLimit => {
                write!(f, "max_purchases_per_period must be at least 1")
            }
            ConfigError::ExcessivePurchaseLimit { value, max } => {
                write!(f, "max_purchases_per_period of {value} exceeds the limit of {max}")
            }
            ConfigError::QueueTooLong { slots, max } => {
                write!(f, "selections expand to {slots} purchases, more than the {max} allowed")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Check that a monetary input is finite, non-negative and at most [`MAX_AMOUNT`]
pub(crate) fn check_amount(field: &'static str, value: f64) -> Result<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ConfigError::InvalidAmount { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(ConfigError::AmountTooLarge {
            field,
            value,
            max: MAX_AMOUNT,
        });
    }
    Ok(())
}

/// Check that a rate lies in `[min, max]` (NaN always fails)
pub(crate) fn check_rate(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate {
            field,
            value,
            min,
            max,
        })
    }
}
