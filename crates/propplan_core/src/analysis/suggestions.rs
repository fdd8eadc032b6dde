//! Remediation suggestions for blocked plans.

use serde::{Deserialize, Serialize};

use super::feasibility::{Bottleneck, BottleneckKind};
use crate::model::{InvestmentProfile, Money, PERIODS_PER_YEAR, TestKind};

/// Granularity of suggested dollar targets
pub const TARGET_ROUNDING: Money = Money::from_cents(1_000 * 100);

/// Profile input a suggestion asks the investor to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionAction {
    IncreaseDepositPool,
    IncreaseBorrowingCapacity,
    IncreaseBaseSalary,
    ExtendTimeline,
}

impl SuggestionAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SuggestionAction::IncreaseDepositPool => "Increase deposit pool",
            SuggestionAction::IncreaseBorrowingCapacity => "Increase borrowing capacity",
            SuggestionAction::IncreaseBaseSalary => "Increase base salary",
            SuggestionAction::ExtendTimeline => "Extend timeline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub action: SuggestionAction,
    pub impact: String,
    /// 1 is the most effective
    pub priority: u8,
    pub current_value: f64,
    /// Dollars for money inputs, years for the timeline
    pub target_value: f64,
}

/// One suggestion per bottleneck, in bottleneck order
///
/// When the queue head is only waiting for funds to build up, more time also
/// helps, so extending the timeline is offered last.
pub(crate) fn suggest(
    bottlenecks: &[Bottleneck],
    profile: &InvestmentProfile,
    unresolved: usize,
    waiting: bool,
) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = bottlenecks
        .iter()
        .enumerate()
        .map(|(rank, bottleneck)| {
            let priority = u8::try_from(rank + 1).unwrap_or(u8::MAX);
            match bottleneck.kind {
                BottleneckKind::Test(kind) => for_test(kind, bottleneck.shortfall, profile, priority),
                BottleneckKind::Horizon => extend_timeline(profile, unresolved, priority),
            }
        })
        .collect();

    let has_extend = suggestions
        .iter()
        .any(|s| s.action == SuggestionAction::ExtendTimeline);
    if waiting && !has_extend {
        let priority = u8::try_from(suggestions.len() + 1).unwrap_or(u8::MAX);
        suggestions.push(extend_timeline(profile, unresolved, priority));
    }
    suggestions
}

fn for_test(
    kind: TestKind,
    shortfall: Money,
    profile: &InvestmentProfile,
    priority: u8,
) -> Suggestion {
    let rounded = shortfall.round_up_to(TARGET_ROUNDING);
    match kind {
        TestKind::Deposit => Suggestion {
            action: SuggestionAction::IncreaseDepositPool,
            impact: format!("Closes the {shortfall} deposit gap"),
            priority,
            current_value: profile.deposit_pool,
            target_value: profile.deposit_pool + rounded.as_dollars(),
        },
        TestKind::BorrowingCapacity => Suggestion {
            action: SuggestionAction::IncreaseBorrowingCapacity,
            impact: format!("Covers the {shortfall} of additional lending required"),
            priority,
            current_value: profile.borrowing_capacity,
            target_value: profile.borrowing_capacity + rounded.as_dollars(),
        },
        TestKind::Serviceability => {
            // Salary counts at multiplier * ratio, so the raise must be grossed up
            let weight = profile.salary_serviceability_multiplier * profile.serviceability_ratio;
            let raise = if weight > 0.0 {
                shortfall.scale(1.0 / weight)
            } else {
                shortfall
            };
            Suggestion {
                action: SuggestionAction::IncreaseBaseSalary,
                impact: format!("Services the extra {shortfall} of annual interest"),
                priority,
                current_value: profile.base_salary,
                target_value: profile.base_salary + raise.round_up_to(TARGET_ROUNDING).as_dollars(),
            }
        }
    }
}

fn extend_timeline(profile: &InvestmentProfile, unresolved: usize, priority: u8) -> Suggestion {
    let per_year = PERIODS_PER_YEAR
        .saturating_mul(profile.max_purchases_per_period)
        .max(1) as usize;
    let extra_years = unresolved.div_ceil(per_year).max(1);
    Suggestion {
        action: SuggestionAction::ExtendTimeline,
        impact: format!("Gives {unresolved} queued purchase(s) time to resolve"),
        priority,
        current_value: f64::from(profile.timeline_years),
        target_value: f64::from(profile.timeline_years) + extra_years as f64,
    }
}
