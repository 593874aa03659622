//! Shared read-only view over a normalized table and its roles.

use std::collections::BTreeMap;

use soit_model::{CellValue, ColumnRoleMap, CountBasis, RawTable, Role, UNKNOWN_KEY};

static MISSING: CellValue = CellValue::Missing;

/// A normalized table together with the resolved positions of its roles.
///
/// Every section of a report reads cells through this view, so grouping keys
/// and the counting rule are the same everywhere.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    table: &'a RawTable,
    roles: &'a ColumnRoleMap,
    positions: BTreeMap<Role, usize>,
    basis: CountBasis,
}

impl<'a> ReportContext<'a> {
    /// Creates a view. Roles whose header is not in the table are ignored.
    pub fn new(table: &'a RawTable, roles: &'a ColumnRoleMap) -> Self {
        let positions: BTreeMap<Role, usize> = roles
            .iter()
            .filter_map(|(role, header)| Some((role, table.column_index(header?)?)))
            .collect();
        let basis = CountBasis::for_columns(roles, table.headers());
        Self {
            table,
            roles,
            positions,
            basis,
        }
    }

    pub fn table(&self) -> &'a RawTable {
        self.table
    }

    pub fn roles(&self) -> &'a ColumnRoleMap {
        self.roles
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Counting rule for grouped counts.
    pub fn basis(&self) -> CountBasis {
        self.basis
    }

    /// Column position of a role, if resolved.
    pub fn column(&self, role: Role) -> Option<usize> {
        self.positions.get(&role).copied()
    }

    /// Returns true if the role has a column in this table.
    pub fn has(&self, role: Role) -> bool {
        self.positions.contains_key(&role)
    }

    /// Cell of a role in one row; unresolved roles read as missing.
    pub fn cell(&self, row: usize, role: Role) -> &'a CellValue {
        match self.column(role) {
            Some(column) => self.table.cell(row, column),
            None => &MISSING,
        }
    }

    /// Display text of a role's cell, `None` when missing.
    pub fn text(&self, row: usize, role: Role) -> Option<String> {
        self.cell(row, role).to_text()
    }

    /// Grouping key of a role's cell: its display text, or `"Unknown"`.
    pub fn key(&self, row: usize, role: Role) -> String {
        self.text(row, role).unwrap_or_else(|| UNKNOWN_KEY.to_string())
    }

    /// Student id of a row, when the role is resolved and the cell present.
    pub fn student(&self, row: usize) -> Option<String> {
        self.text(row, Role::StudentId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RawTable {
        RawTable::new(
            vec!["Student Number".into(), "Risk".into()],
            vec![
                vec![CellValue::Number(1001.0), CellValue::text("High")],
                vec![CellValue::Missing, CellValue::Missing],
            ],
        )
    }

    #[test]
    fn test_positions_and_keys() {
        let table = table();
        let mut roles = ColumnRoleMap::new();
        roles.insert(Role::StudentId, "Student Number");
        roles.insert(Role::Risk, "Risk");
        let ctx = ReportContext::new(&table, &roles);

        assert_eq!(ctx.column(Role::Risk), Some(1));
        assert_eq!(ctx.basis(), CountBasis::DistinctStudents);
        assert_eq!(ctx.key(0, Role::Risk), "High");
        assert_eq!(ctx.key(1, Role::Risk), "Unknown");
        assert_eq!(ctx.student(0).as_deref(), Some("1001"));
        assert_eq!(ctx.student(1), None);
    }

    #[test]
    fn test_unresolved_role_reads_missing() {
        let table = table();
        let roles = ColumnRoleMap::new();
        let ctx = ReportContext::new(&table, &roles);

        assert!(!ctx.has(Role::Week));
        assert!(ctx.cell(0, Role::Week).is_missing());
        assert_eq!(ctx.key(0, Role::Week), "Unknown");
        assert_eq!(ctx.basis(), CountBasis::Rows);
    }

    #[test]
    fn test_role_with_stale_header_is_ignored() {
        let table = table();
        let mut roles = ColumnRoleMap::new();
        roles.insert(Role::Week, "Week");
        let ctx = ReportContext::new(&table, &roles);

        assert!(!ctx.has(Role::Week));
    }

    #[test]
    fn test_stale_student_header_counts_rows() {
        let table = table();
        let mut roles = ColumnRoleMap::new();
        roles.insert(Role::StudentId, "Student ID");
        let ctx = ReportContext::new(&table, &roles);

        assert!(!ctx.has(Role::StudentId));
        assert_eq!(ctx.basis(), CountBasis::Rows);
        assert_eq!(ctx.basis(), CountBasis::for_columns(&roles, table.headers()));
    }
}
