//! Polars `DataFrame` and `AnyValue` conversion.
//!
//! Loaders that go through Polars (CSV) hand their frame to
//! [`RawTable::from_dataframe`]; every value is mapped onto a [`CellValue`]
//! by [`any_to_cell`].

use polars::prelude::*;

use crate::cell::CellValue;
use crate::table::RawTable;

/// Converts a Polars `AnyValue` to a [`CellValue`].
///
/// Nulls, NaN floats, and blank strings become `Missing`; integers and floats
/// become `Number`; anything else falls back to its display text.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use soit_model::{CellValue, any_to_cell};
///
/// assert_eq!(any_to_cell(AnyValue::Null), CellValue::Missing);
/// assert_eq!(any_to_cell(AnyValue::Int32(42)), CellValue::Number(42.0));
/// assert_eq!(any_to_cell(AnyValue::String("hello")), CellValue::text("hello"));
/// ```
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Missing,
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => CellValue::number(f64::from(v)),
        AnyValue::Float64(v) => CellValue::number(v),
        AnyValue::String(s) => CellValue::text(s),
        AnyValue::StringOwned(s) => CellValue::text(s.as_str()),
        AnyValue::Boolean(b) => CellValue::Bool(b),
        // For any other type, use Display but strip outer quotes if present
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                CellValue::text(&s[1..s.len() - 1])
            } else {
                CellValue::text(s)
            }
        }
    }
}

impl RawTable {
    /// Builds a table from a Polars `DataFrame`, row by row.
    ///
    /// Values that cannot be read back from their column are treated as
    /// missing rather than failing the conversion.
    pub fn from_dataframe(df: &DataFrame) -> Self {
        let headers: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        let columns = df.get_columns();
        let rows = (0..df.height())
            .map(|idx| {
                columns
                    .iter()
                    .map(|col| col.get(idx).map_or(CellValue::Missing, any_to_cell))
                    .collect()
            })
            .collect();
        Self::new(headers, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_cell_integers_and_floats() {
        assert_eq!(any_to_cell(AnyValue::Int64(-100)), CellValue::Number(-100.0));
        assert_eq!(any_to_cell(AnyValue::UInt32(0)), CellValue::Number(0.0));
        assert_eq!(any_to_cell(AnyValue::Float64(1.5)), CellValue::Number(1.5));
        assert!(any_to_cell(AnyValue::Float64(f64::NAN)).is_missing());
    }

    #[test]
    fn test_any_to_cell_strings() {
        assert_eq!(
            any_to_cell(AnyValue::String("Week 1")),
            CellValue::Text("Week 1".to_string())
        );
        assert!(any_to_cell(AnyValue::String("  ")).is_missing());
    }

    #[test]
    fn test_any_to_cell_boolean() {
        assert_eq!(any_to_cell(AnyValue::Boolean(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_from_dataframe() {
        let df = df! {
            "Student Number" => &[Some(1_i64), Some(2), None],
            "Week" => &[Some("Week1"), None, Some("Week2")],
        }
        .unwrap();

        let table = RawTable::from_dataframe(&df);

        assert_eq!(table.headers(), &["Student Number", "Week"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(0, 0), &CellValue::Number(1.0));
        assert!(table.cell(1, 1).is_missing());
        assert!(table.cell(2, 0).is_missing());
        assert_eq!(table.cell(2, 1).to_display(), "Week2");
    }
}
