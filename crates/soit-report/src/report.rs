//! Report assembly.

use std::time::Instant;

use soit_model::{ColumnRoleMap, CountBasis, RawTable, ReportPayload, StringRow};
use tracing::{debug, info, info_span, warn};

use crate::aggregate::{
    by_module, by_reason, by_week, by_week_module, modules, resolved_counts, risk_counts,
    total_records, unique_students, weeks,
};
use crate::attendance::attendance_mask;
use crate::columns::resolve_columns;
use crate::context::ReportContext;
use crate::normalize::normalize_table;
use crate::pivot::week_risk;
use crate::repeated::repeated_students;
use crate::resolved::resolved_rate;

/// Most raw rows included in `sample_rows`.
pub const MAX_SAMPLE_ROWS: usize = 50;
/// Most rows included in the repeated-student preview.
pub const MAX_PREVIEW_ROWS: usize = 200;
/// Most students listed in the repeated-student counts.
pub const MAX_REPEATED_STUDENTS: usize = 50;
/// Most reasons listed in `by_reason`.
pub const MAX_REASONS: usize = 15;

/// Size limits for the bounded sections of a report.
///
/// Limits above the payload contract's bounds are clamped down when the
/// report is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Raw rows in `sample_rows` (at most 50).
    pub sample_limit: usize,
    /// Rows in the repeated-student preview (at most 200).
    pub preview_limit: usize,
    /// Students in the repeated-student counts (at most 50).
    pub repeated_limit: usize,
    /// Reasons in `by_reason` (at most 15).
    pub reason_limit: usize,
    /// Modules in `by_module`; `None` keeps the full ranking.
    pub module_limit: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sample_limit: MAX_SAMPLE_ROWS,
            preview_limit: MAX_PREVIEW_ROWS,
            repeated_limit: MAX_REPEATED_STUDENTS,
            reason_limit: MAX_REASONS,
            module_limit: None,
        }
    }
}

impl ReportOptions {
    /// Options with every limit inside the contract bounds.
    pub fn clamped(self) -> Self {
        Self {
            sample_limit: self.sample_limit.min(MAX_SAMPLE_ROWS),
            preview_limit: self.preview_limit.min(MAX_PREVIEW_ROWS),
            repeated_limit: self.repeated_limit.min(MAX_REPEATED_STUDENTS),
            reason_limit: self.reason_limit.min(MAX_REASONS),
            module_limit: self.module_limit,
        }
    }

    /// Keeps only the top `limit` modules in `by_module`.
    pub fn with_module_limit(mut self, limit: usize) -> Self {
        self.module_limit = Some(limit);
        self
    }
}

/// A built report with the facts needed to interpret it.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// The JSON payload.
    pub payload: ReportPayload,
    /// Header chosen for each role.
    pub roles: ColumnRoleMap,
    /// Counting rule used by every grouped count.
    pub count_basis: CountBasis,
}

/// Builds reports from raw tables.
///
/// Holds only options, so one builder can serve any number of tables,
/// including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    options: ReportOptions,
}

impl ReportBuilder {
    pub fn new(options: ReportOptions) -> Self {
        Self {
            options: options.clamped(),
        }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Builds the full report for one table.
    ///
    /// The input table is not modified. Sections whose roles could not be
    /// resolved come back empty rather than failing the build.
    pub fn build(&self, table: &RawTable) -> Report {
        let span = info_span!("build_report", rows = table.len(), columns = table.width());
        let _guard = span.enter();
        let start = Instant::now();

        let roles = resolve_columns(table.headers());
        for (role, header) in roles.iter() {
            if let Some(header) = header {
                debug!(role = %role, header = %header, "column role resolved");
            }
        }

        let normalized = normalize_table(table, &roles);
        let ctx = ReportContext::new(&normalized, &roles);
        let count_basis = ctx.basis();
        if count_basis == CountBasis::Rows && !ctx.is_empty() {
            warn!("no student number column, grouped counts use row counts");
        }

        let payload = self.assemble(&ctx);

        info!(
            rows = payload.total_records,
            resolved_roles = roles.resolved_count(),
            count_basis = count_basis.label(),
            duration_ms = start.elapsed().as_millis(),
            "report built"
        );

        Report {
            payload,
            roles,
            count_basis,
        }
    }

    fn assemble(&self, ctx: &ReportContext<'_>) -> ReportPayload {
        let options = &self.options;
        let attendance = attendance_mask(ctx);

        ReportPayload {
            total_records: total_records(ctx),
            unique_students: unique_students(ctx),
            risk_counts: risk_counts(ctx),
            resolved_counts: resolved_counts(ctx),
            by_reason: by_reason(ctx, options.reason_limit),
            by_module: by_module(ctx, None, options.module_limit),
            by_module_attendance: by_module(ctx, Some(&attendance), None),
            by_week_attendance: by_week(ctx, Some(&attendance)),
            by_week_module_all: by_week_module(ctx, None),
            by_week_module_attendance: by_week_module(ctx, Some(&attendance)),
            weeks: weeks(ctx),
            modules: modules(ctx),
            week_risk: week_risk(ctx),
            resolved_rate: resolved_rate(ctx),
            repeated_students: repeated_students(
                ctx,
                options.repeated_limit,
                options.preview_limit,
            ),
            sample_rows: sample_rows(ctx.table(), options.sample_limit),
        }
    }
}

/// The first `limit` rows with every column as text, missing as `""`.
pub fn sample_rows(table: &RawTable, limit: usize) -> Vec<StringRow> {
    table
        .rows()
        .iter()
        .take(limit)
        .map(|row| {
            table
                .headers()
                .iter()
                .zip(row)
                .map(|(header, cell)| (header.as_str(), cell.to_display()))
                .collect::<StringRow>()
        })
        .collect()
}

/// Builds the payload for one table with default options.
pub fn build_report(table: &RawTable) -> ReportPayload {
    ReportBuilder::default().build(table).payload
}
