//! Dynamically typed cell values.
//!
//! Spreadsheet columns are not consistent in type across rows, so every cell
//! carries its own tag. Conversions are explicit and total: nothing here
//! panics or silently coerces.

use chrono::{NaiveDateTime, NaiveTime};

/// A single cell of a [`RawTable`](crate::RawTable).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Free text. Never empty or whitespace-only (see [`CellValue::text`]).
    Text(String),
    /// Numeric value. Never NaN (see [`CellValue::number`]).
    Number(f64),
    /// Boolean value (spreadsheet TRUE/FALSE).
    Bool(bool),
    /// Date or datetime value.
    Date(NaiveDateTime),
    /// Empty cell.
    #[default]
    Missing,
}

impl CellValue {
    /// Creates a text cell, or `Missing` when the text is blank.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Self::Missing
        } else {
            Self::Text(value)
        }
    }

    /// Creates a numeric cell, or `Missing` for NaN.
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            Self::Missing
        } else {
            Self::Number(value)
        }
    }

    /// Returns true for an empty cell.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns the display text, or `None` for a missing cell.
    ///
    /// Numbers drop trailing zeros (`1.0` -> `"1"`), booleans render as
    /// `True`/`False`, and dates omit a midnight time part.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value.clone()),
            Self::Number(value) => Some(format_numeric(*value)),
            Self::Bool(value) => Some(if *value { "True" } else { "False" }.to_string()),
            Self::Date(value) => Some(format_datetime(value)),
            Self::Missing => None,
        }
    }

    /// Returns the display text, rendering a missing cell as the empty string.
    pub fn to_display(&self) -> String {
        self.to_text().unwrap_or_default()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

fn format_datetime(value: &NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Formats a floating-point number as a string without trailing zeros after decimal.
///
/// Only trims trailing zeros if the number contains a decimal point.
/// Integer-valued floats like 40.0 are formatted as "40", not "4".
///
/// # Examples
///
/// ```
/// use soit_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(40.0), "40");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() || trimmed == "-" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}
