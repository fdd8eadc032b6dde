mod catalog;
mod ids;
mod money;
mod profile;
mod results;
mod selection;

pub use catalog::{PropertyAssumption, PropertyCatalog};
pub use ids::PropertyTypeId;
pub use money::Money;
pub use profile::{
    GrowthCurve, InvestmentProfile, MAX_PURCHASES_PER_PERIOD, MAX_TIMELINE_YEARS, PERIODS_PER_YEAR,
};
pub use results::{
    AcquisitionStatus, AffordabilityReport, CashflowBreakdown, DepositFunding, PendingEvaluation,
    PeriodBreakdown, PortfolioSnapshot, SimulationOutput, TestKind, TestOutcome, TimelineResult,
};
pub use selection::{AcquisitionSlot, Selection};
