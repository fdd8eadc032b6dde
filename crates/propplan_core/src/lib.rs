//! Property acquisition timeline library
//!
//! This crate schedules a queue of planned property purchases across half-year
//! periods, buying each one as soon as the investor can afford it.
//! It supports:
//! - A catalog of property types with cost, yield, growth and deposit assumptions
//! - Tiered capital growth with per-type long-run rates
//! - Deposit, borrowing-capacity and serviceability lending tests
//! - Per-period portfolio trajectories with rental cashflow and equity
//! - LVR, DSR and self-funding metrics
//! - Bottleneck detection with ranked remediation suggestions
//!
//! # Builder DSL
//!
//! ```ignore
//! use propplan_core::{ScenarioBuilder, analyze};
//!
//! let scenario = ScenarioBuilder::new()
//!     .deposit_pool(50_000.0)
//!     .borrowing_capacity(500_000.0)
//!     .annual_savings(24_000.0)
//!     .years(15)
//!     .buy("unit", 2)
//!     .buy("house", 1)
//!     .build();
//!
//! let output = scenario.simulate()?;
//! let summary = analyze(&output, &scenario.profile);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod affordability;
pub mod analysis;
pub mod error;
pub mod growth;
pub mod metrics;
pub mod queue;
pub mod simulation;
pub mod simulation_state;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{FeasibilitySummary, Severity, analyze};
pub use config::{Scenario, ScenarioBuilder};
pub use error::{ConfigError, Result};
pub use metrics::{PlanSummary, plan_summary, timeline_metrics};
pub use simulation::{TimelineSimulator, compare_scenarios, simulate};
