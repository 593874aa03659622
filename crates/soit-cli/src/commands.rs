//! Command implementations shared by the binary and its tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use soit_ingest::{SheetSelection, read_table};
use soit_model::{ColumnRoleMap, CountBasis, RawTable, ReportPayload};
use soit_report::{Report, ReportBuilder, ReportOptions, resolve_columns};
use tracing::{info, info_span};

/// Everything needed to build one report.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub file: PathBuf,
    pub sheet: SheetSelection,
    pub options: ReportOptions,
}

/// Loads an export, wrapping failures as an analysis error.
pub fn load_table(file: &Path, sheet: &SheetSelection) -> Result<RawTable> {
    let span = info_span!("load", file = %file.display());
    let _guard = span.enter();
    let start = Instant::now();

    let table = read_table(file, sheet).context("Failed to analyze file")?;
    info!(
        rows = table.len(),
        columns = table.width(),
        duration_ms = start.elapsed().as_millis(),
        "export loaded"
    );
    Ok(table)
}

/// Loads the export and builds its report.
pub fn run_report(request: &ReportRequest) -> Result<Report> {
    let table = load_table(&request.file, &request.sheet)?;
    Ok(ReportBuilder::new(request.options).build(&table))
}

/// Column roles of one export and the counting rule they imply.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSummary {
    pub roles: ColumnRoleMap,
    pub count_basis: CountBasis,
}

/// Loads the export and resolves its column roles.
pub fn run_roles(file: &Path, sheet: &SheetSelection) -> Result<RoleSummary> {
    let table = load_table(file, sheet)?;
    let roles = resolve_columns(table.headers());
    let count_basis = CountBasis::for_columns(&roles, table.headers());
    Ok(RoleSummary { roles, count_basis })
}

/// Serializes a payload, pretty-printed unless `compact`.
pub fn render_payload(payload: &ReportPayload, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(payload)
    } else {
        serde_json::to_string_pretty(payload)
    };
    json.context("serialize report")
}

/// Writes the rendered report to a file.
pub fn write_payload(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, format!("{json}\n")).with_context(|| format!("write {}", path.display()))
}
