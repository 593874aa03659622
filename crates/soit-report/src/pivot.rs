//! Week x risk contingency table.

use soit_model::{CountBasis, RiskSeries, Role, WeekRisk};
use tracing::debug;

use crate::context::ReportContext;
use crate::counter::{GroupCounter, NestedCounter};
use crate::week::sort_weeks;

/// Counts per (week, risk level) pair, shaped for a stacked chart.
///
/// Weeks run in week order and risk levels in first-seen order; missing
/// values of either fall under `"Unknown"`. Each series has one entry per
/// week, zero where the pair never occurs. Empty unless both Week and Risk
/// are resolved.
pub fn week_risk(ctx: &ReportContext<'_>) -> WeekRisk {
    if !ctx.has(Role::Week) || !ctx.has(Role::Risk) {
        debug!("week or risk column missing, week_risk left empty");
        return WeekRisk::default();
    }

    let mut cells = NestedCounter::new(ctx.basis());
    let mut risk_levels = GroupCounter::new(CountBasis::Rows);
    for row in 0..ctx.len() {
        let risk = ctx.key(row, Role::Risk);
        risk_levels.add(risk.clone(), None);
        cells.add(ctx.key(row, Role::Week), risk, ctx.student(row));
    }

    let mut weeks: Vec<String> = cells.keys().map(str::to_string).collect();
    sort_weeks(&mut weeks);

    let series = risk_levels
        .keys()
        .map(|risk| RiskSeries {
            name: risk.to_string(),
            data: weeks
                .iter()
                .map(|week| cells.get(week).map_or(0, |inner| inner.count(risk)))
                .collect(),
        })
        .collect();

    WeekRisk { weeks, series }
}
