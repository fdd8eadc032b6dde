//! Feasibility analysis of completed runs.
//!
//! Works purely on [`SimulationOutput`](crate::model::SimulationOutput) and the
//! profile it came from:
//!
//! ```ignore
//! use propplan_core::analysis::{Severity, analyze};
//!
//! let output = scenario.simulate()?;
//! let summary = analyze(&output, &scenario.profile);
//!
//! if summary.severity != Severity::None {
//!     for suggestion in &summary.suggestions {
//!         println!("{}: {}", suggestion.action.label(), suggestion.target_value);
//!     }
//! }
//! ```

mod feasibility;
mod suggestions;

pub use feasibility::*;
pub use suggestions::{Suggestion, SuggestionAction, TARGET_ROUNDING};
