//! Working-copy normalization ahead of aggregation.

use soit_model::{CellValue, ColumnRoleMap, RawTable, Role};
use tracing::debug;

/// Roles whose values are compared as text.
const TEXT_ROLES: [Role; 2] = [Role::Week, Role::Year];

/// Returns a copy of the table with Week and Year values as text.
///
/// Spreadsheets often store a week as the number `1` in one row and the text
/// `"1"` in another; after normalization both group together. A column is
/// only rewritten when it has at least one present value, and missing cells
/// stay missing.
pub fn normalize_table(table: &RawTable, roles: &ColumnRoleMap) -> RawTable {
    let mut normalized = table.clone();

    for role in TEXT_ROLES {
        let Some(index) = roles.get(role).and_then(|header| table.column_index(header)) else {
            continue;
        };
        if table.column(index).all(CellValue::is_missing) {
            debug!(role = %role, "column has no values, left as is");
            continue;
        }
        normalized.map_column(index, |cell| match cell.to_text() {
            Some(text) => CellValue::Text(text),
            None => CellValue::Missing,
        });
    }

    normalized
}
