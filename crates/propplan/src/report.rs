//! Plain-text and JSON reports for simulation runs

use std::fmt::Write;

use serde::Serialize;

use propplan_core::analysis::{FeasibilitySummary, Severity, SuggestionAction, analyze};
use propplan_core::config::Scenario;
use propplan_core::metrics::{PeriodMetrics, PlanSummary, plan_summary, timeline_metrics};
use propplan_core::model::{SimulationOutput, TimelineResult};

use crate::util::format::{
    format_compact_currency, format_currency, format_currency_short, format_percentage,
};

/// Everything reported for one scenario
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub name: String,
    pub output: SimulationOutput,
    pub metrics: Vec<PeriodMetrics>,
    pub summary: PlanSummary,
    pub feasibility: FeasibilitySummary,
}

impl RunReport {
    pub fn new(scenario: &Scenario, output: SimulationOutput) -> Self {
        Self {
            name: scenario.name.clone(),
            metrics: timeline_metrics(&output),
            summary: plan_summary(&output),
            feasibility: analyze(&output, &scenario.profile),
            output,
        }
    }
}

fn result_line(result: &TimelineResult) -> String {
    match (result.period, result.date) {
        (Some(period), Some(date)) => format!(
            "  {:<16} period {:>3}  {}  {}",
            result.slot.label(),
            period,
            date,
            format_currency_short(result.slot.cost)
        ),
        _ => format!(
            "  {:<16} not reached ({})",
            result.slot.label(),
            result.status.label()
        ),
    }
}

/// Render the acquisition timeline, plan figures and advice
pub fn render_text(report: &RunReport, include_periods: bool) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    let _ = writeln!(out, "Scenario: {}", report.name);
    let _ = writeln!(
        out,
        "Purchased {} of {} properties",
        summary.purchases,
        report.output.timeline.len()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Acquisitions");
    for result in &report.output.timeline {
        let _ = writeln!(out, "{}", result_line(result));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Plan");
    let _ = writeln!(out, "  Total purchased   {}", format_currency(summary.total_purchase_cost));
    let _ = writeln!(out, "  Portfolio value   {}", format_currency(summary.final_portfolio_value));
    let _ = writeln!(out, "  Debt              {}", format_currency(summary.final_debt));
    let _ = writeln!(out, "  Equity            {}", format_currency(summary.final_equity));
    let _ = writeln!(out, "  Net cashflow      {}", format_currency(summary.total_net_cashflow));
    let _ = writeln!(
        out,
        "  LVR               {} (peak {})",
        format_percentage(summary.final_lvr),
        format_percentage(summary.peak_lvr)
    );
    let _ = writeln!(out, "  Average DSR       {}", format_percentage(summary.average_dsr));

    if include_periods {
        let _ = writeln!(out);
        out.push_str(&render_periods(report));
    }

    let _ = writeln!(out);
    out.push_str(&render_feasibility(&report.feasibility));
    out
}

/// One row per period
pub fn render_periods(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<10}  {:<9}  {:>12}  {:>12}  {:>12}  {:>10}  {:>7}",
        "period", "date", "status", "value", "debt", "equity", "cashflow", "LVR"
    );
    for (row, metrics) in report.output.periods.iter().zip(&report.metrics) {
        let _ = writeln!(
            out,
            "{:>6}  {:<10}  {:<9}  {:>12}  {:>12}  {:>12}  {:>10}  {:>7}",
            row.period,
            row.date.to_string(),
            row.status.label(),
            format_currency_short(row.portfolio_value),
            format_currency_short(row.debt),
            format_currency_short(row.equity),
            format_currency_short(row.cashflow.net),
            format!("{:.1}%", metrics.lvr),
        );
    }
    out
}

fn suggestion_target(action: SuggestionAction, value: f64) -> String {
    match action {
        SuggestionAction::ExtendTimeline => format!("{value:.0} years"),
        _ => format_compact_currency(value),
    }
}

pub fn render_feasibility(feasibility: &FeasibilitySummary) -> String {
    let mut out = String::new();
    if feasibility.severity == Severity::None {
        let _ = writeln!(out, "Feasibility: every purchase fits within the horizon");
        return out;
    }

    let _ = writeln!(
        out,
        "Feasibility: {} ({} unresolved)",
        feasibility.severity.label(),
        feasibility.unresolved_slots
    );
    for bottleneck in &feasibility.bottlenecks {
        let _ = writeln!(out, "  - {}", bottleneck.message);
    }
    if !feasibility.suggestions.is_empty() {
        let _ = writeln!(out, "Suggestions");
        for suggestion in &feasibility.suggestions {
            let _ = writeln!(
                out,
                "  {}. {} to {}: {}",
                suggestion.priority,
                suggestion.action.label(),
                suggestion_target(suggestion.action, suggestion.target_value),
                suggestion.impact
            );
        }
    }
    out
}

/// Side-by-side summary for several scenarios
pub fn render_comparison(reports: &[RunReport]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24}  {:>9}  {:>14}  {:>14}  {:>8}  {:<8}",
        "scenario", "purchased", "value", "equity", "LVR", "severity"
    );
    for report in reports {
        let _ = writeln!(
            out,
            "{:<24}  {:>9}  {:>14}  {:>14}  {:>8}  {:<8}",
            report.name,
            format!("{}/{}", report.summary.purchases, report.output.timeline.len()),
            format_currency_short(report.summary.final_portfolio_value),
            format_currency_short(report.summary.final_equity),
            format!("{:.1}%", report.summary.final_lvr),
            report.feasibility.severity.label(),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use propplan_core::config::ScenarioBuilder;

    fn report(scenario: &Scenario) -> RunReport {
        RunReport::new(scenario, scenario.simulate().unwrap())
    }

    #[test]
    fn test_resolved_plan_text() {
        let scenario = ScenarioBuilder::new().name("one unit").buy("unit", 1).build();
        let text = render_text(&report(&scenario), false);

        assert!(text.contains("Scenario: one unit"));
        assert!(text.contains("Purchased 1 of 1 properties"));
        assert!(text.contains("unit #1"));
        assert!(text.contains("period   3"));
        assert!(text.contains("every purchase fits"));
        assert!(!text.contains("period  date"));
    }

    #[test]
    fn test_blocked_plan_lists_suggestions() {
        let scenario = ScenarioBuilder::new()
            .name("too soon")
            .years(1)
            .annual_savings(0.0)
            .buy("house", 1)
            .build();
        let text = render_text(&report(&scenario), true);

        assert!(text.contains("not reached"));
        assert!(text.contains("Suggestions"));
        assert!(text.contains("1. Increase deposit pool"));
        // Header plus one row per period
        assert!(text.contains("period  date"));
    }

    #[test]
    fn test_comparison_has_row_per_scenario() {
        let a = ScenarioBuilder::new().name("a").buy("unit", 1).build();
        let b = ScenarioBuilder::new().name("b").years(0).buy("unit", 1).build();
        let text = render_comparison(&[report(&a), report(&b)]);

        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(1).unwrap().starts_with("a "));
        assert!(text.contains("minor"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let scenario = ScenarioBuilder::new().buy("unit", 1).build();
        let json = serde_json::to_string(&report(&scenario)).unwrap();
        assert!(json.contains("\"feasibility\""));
        assert!(json.contains("\"timeline\""));
    }
}
