//! Human-readable tables for the terminal.

use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use soit_model::{ColumnRoleMap, CountBasis};
use soit_report::Report;

use crate::commands::RoleSummary;

/// Builds the report overview table: headline numbers, then section sizes.
pub fn report_table(report: &Report) -> Table {
    let payload = &report.payload;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Section"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![label_cell("Records"), Cell::new(payload.total_records)]);
    table.add_row(vec![
        label_cell("Unique students"),
        match payload.unique_students {
            Some(count) => Cell::new(count),
            None => dim_cell("-"),
        },
    ]);
    table.add_row(vec![label_cell("Count basis"), basis_cell(report.count_basis)]);

    let sections = [
        ("Risk levels", payload.risk_counts.len()),
        ("Resolved statuses", payload.resolved_counts.len()),
        ("Reasons", payload.by_reason.len()),
        ("Modules", payload.modules.len()),
        ("Modules with attendance flags", payload.by_module_attendance.len()),
        ("Weeks", payload.weeks.len()),
        ("Weeks with resolved rate", payload.resolved_rate.len()),
        ("Repeated students", payload.repeated_students.top_counts.len()),
        ("Sample rows", payload.sample_rows.len()),
    ];
    for (label, size) in sections {
        table.add_row(vec![label_cell(label), count_cell(size)]);
    }
    table
}

/// Prints the report overview.
pub fn print_report_summary(file: &Path, report: &Report) {
    println!("File: {}", file.display());
    println!("{}", report_table(report));
    if let Some((risk, count)) = report.payload.risk_counts.iter().next() {
        println!("Most common risk level: {risk} ({count})");
    }
}

/// Builds the role -> header table.
pub fn roles_table(roles: &ColumnRoleMap) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Role"), header_cell("Column")]);
    apply_table_style(&mut table);
    for (role, header) in roles.iter() {
        table.add_row(vec![
            label_cell(role.label()),
            match header {
                Some(header) => Cell::new(header).fg(Color::Green),
                None => dim_cell("(not found)"),
            },
        ]);
    }
    table
}

/// Prints the resolved column roles.
pub fn print_roles(file: &Path, summary: &RoleSummary) {
    println!("File: {}", file.display());
    println!("{}", roles_table(&summary.roles));
    println!("Count basis: {}", summary.count_basis.label());
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn basis_cell(basis: CountBasis) -> Cell {
    match basis {
        CountBasis::DistinctStudents => Cell::new(basis.label()),
        CountBasis::Rows => Cell::new(basis.label()).fg(Color::Yellow),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soit_model::{CellValue, RawTable, Role};
    use soit_report::ReportBuilder;

    #[test]
    fn test_roles_table_lists_every_role() {
        let mut roles = ColumnRoleMap::new();
        roles.insert(Role::Week, "Week");

        let rendered = roles_table(&roles).to_string();

        for role in Role::ALL {
            assert!(rendered.contains(role.label()), "{role}");
        }
        assert!(rendered.contains("(not found)"));
    }

    #[test]
    fn test_report_table_mentions_basis() {
        let table = RawTable::new(
            vec!["Risk".into()],
            vec![vec![CellValue::text("High")]],
        );
        let report = ReportBuilder::default().build(&table);

        let rendered = report_table(&report).to_string();

        assert!(rendered.contains("Records"));
        assert!(rendered.contains("rows"));
    }
}
