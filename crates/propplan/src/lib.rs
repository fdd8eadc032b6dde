//! Command-line front end for the property acquisition planner
//!
//! Loads scenario files, runs them through `propplan_core` and renders the
//! results as text or JSON.

pub mod logging;
pub mod report;
pub mod scenario_file;
pub mod util;

pub use logging::init_logging;
pub use report::RunReport;
