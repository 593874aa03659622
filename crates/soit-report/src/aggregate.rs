//! Scalar and grouped counts.
//!
//! Frequency distributions (`risk_counts`, `resolved_counts`, `by_reason`)
//! count rows. Grouped counts (`by_module`, `by_week_*`) follow the
//! context's [`CountBasis`](soit_model::CountBasis): distinct non-missing
//! student ids per group when a StudentId column exists, rows otherwise.
//! Missing grouping values are counted under `"Unknown"`.

use std::collections::BTreeSet;

use soit_model::{CountBasis, CountMap, NestedCountMap, Role};

use crate::context::ReportContext;
use crate::counter::{GroupCounter, NestedCounter};
use crate::week::sort_weeks;

/// Number of rows in the table.
pub fn total_records(ctx: &ReportContext<'_>) -> u64 {
    ctx.len() as u64
}

/// Distinct non-missing student ids, or `None` without a StudentId column.
pub fn unique_students(ctx: &ReportContext<'_>) -> Option<u64> {
    if !ctx.has(Role::StudentId) {
        return None;
    }
    let students: BTreeSet<String> = (0..ctx.len()).filter_map(|row| ctx.student(row)).collect();
    Some(students.len() as u64)
}

/// Row frequency of a role's values, ranked by count.
///
/// With `include_missing`, missing cells are counted under `"Unknown"`;
/// otherwise they are skipped. Empty when the role is unresolved.
pub fn value_counts(ctx: &ReportContext<'_>, role: Role, include_missing: bool) -> CountMap {
    if !ctx.has(role) {
        return CountMap::new();
    }
    let mut counter = GroupCounter::new(CountBasis::Rows);
    for row in 0..ctx.len() {
        let key = if include_missing {
            Some(ctx.key(row, role))
        } else {
            ctx.text(row, role)
        };
        if let Some(key) = key {
            counter.add(key, None);
        }
    }
    counter.ranked()
}

/// Risk level distribution, missing levels under `"Unknown"`.
pub fn risk_counts(ctx: &ReportContext<'_>) -> CountMap {
    value_counts(ctx, Role::Risk, true)
}

/// Resolved status distribution, missing statuses under `"Unknown"`.
pub fn resolved_counts(ctx: &ReportContext<'_>) -> CountMap {
    value_counts(ctx, Role::Resolved, true)
}

/// The `limit` most frequent present reasons.
pub fn by_reason(ctx: &ReportContext<'_>, limit: usize) -> CountMap {
    let mut counts = value_counts(ctx, Role::Reason, false);
    counts.truncate(limit);
    counts
}

/// Rows kept by an optional mask.
fn selected_rows(ctx: &ReportContext<'_>, mask: Option<&[bool]>) -> impl Iterator<Item = usize> {
    (0..ctx.len()).filter(move |&row| {
        mask.is_none_or(|mask| mask.get(row).copied().unwrap_or(false))
    })
}

/// Students per module, ranked by count, optionally cut to `limit` entries.
///
/// `mask` restricts the rows considered (the attendance mask for
/// `by_module_attendance`). Empty when Module is unresolved.
pub fn by_module(ctx: &ReportContext<'_>, mask: Option<&[bool]>, limit: Option<usize>) -> CountMap {
    if !ctx.has(Role::Module) {
        return CountMap::new();
    }
    let mut counter = GroupCounter::new(ctx.basis());
    for row in selected_rows(ctx, mask) {
        counter.add(ctx.key(row, Role::Module), ctx.student(row));
    }
    let mut counts = counter.ranked();
    if let Some(limit) = limit {
        counts.truncate(limit);
    }
    counts
}

/// Students per week, in week order. Empty when Week is unresolved.
pub fn by_week(ctx: &ReportContext<'_>, mask: Option<&[bool]>) -> CountMap {
    if !ctx.has(Role::Week) {
        return CountMap::new();
    }
    let mut counter = GroupCounter::new(ctx.basis());
    for row in selected_rows(ctx, mask) {
        counter.add(ctx.key(row, Role::Week), ctx.student(row));
    }
    counter.by_week()
}

/// Students per week and module: weeks in week order, modules ranked.
///
/// Empty unless both Week and Module are resolved.
pub fn by_week_module(ctx: &ReportContext<'_>, mask: Option<&[bool]>) -> NestedCountMap {
    if !ctx.has(Role::Week) || !ctx.has(Role::Module) {
        return NestedCountMap::new();
    }
    let mut counter = NestedCounter::new(ctx.basis());
    for row in selected_rows(ctx, mask) {
        counter.add(
            ctx.key(row, Role::Week),
            ctx.key(row, Role::Module),
            ctx.student(row),
        );
    }
    counter.by_week_ranked()
}

/// Distinct present values of a role, in first-seen order.
fn distinct_values(ctx: &ReportContext<'_>, role: Role) -> Vec<String> {
    let mut seen = BTreeSet::new();
    (0..ctx.len())
        .filter_map(|row| ctx.text(row, role))
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Distinct present week labels in week order.
pub fn weeks(ctx: &ReportContext<'_>) -> Vec<String> {
    let mut weeks = distinct_values(ctx, Role::Week);
    sort_weeks(&mut weeks);
    weeks
}

/// Distinct present module labels, sorted lexicographically.
pub fn modules(ctx: &ReportContext<'_>) -> Vec<String> {
    let mut modules = distinct_values(ctx, Role::Module);
    modules.sort();
    modules
}
