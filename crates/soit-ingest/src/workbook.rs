//! Spreadsheet workbook reading.

use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use chrono::{NaiveDate, NaiveDateTime};
use soit_model::{CellValue, RawTable, format_numeric};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Which sheet of a workbook to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelection {
    /// The first sheet, or the first readable one if it cannot be parsed.
    #[default]
    First,
    /// A sheet selected by name.
    Named(String),
}

impl SheetSelection {
    /// Selection from an optional sheet name.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) if !name.trim().is_empty() => Self::Named(name.trim().to_string()),
            _ => Self::First,
        }
    }
}

/// Reads one sheet of an `.xlsx`/`.xls` workbook into a [`RawTable`].
///
/// The first row of the sheet supplies the headers. Fully empty data rows are
/// skipped. A sheet with no cells yields an empty table.
pub fn read_workbook(bytes: &[u8], selection: &SheetSelection) -> Result<RawTable> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| IngestError::Workbook {
            message: e.to_string(),
        })?;
    let sheet_names = workbook.sheet_names();

    let (sheet, range) = match selection {
        SheetSelection::Named(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(IngestError::SheetNotFound {
                    sheet: name.clone(),
                    available: sheet_names.join(", "),
                });
            }
            let range = workbook
                .worksheet_range(name)
                .map_err(|e| IngestError::NoReadableSheet {
                    message: format!("{name}: {e}"),
                })?;
            (name.clone(), range)
        }
        SheetSelection::First => {
            let mut last_error = None;
            let mut found = None;
            for (idx, name) in sheet_names.iter().enumerate() {
                match workbook.worksheet_range(name) {
                    Ok(range) => {
                        if idx > 0 {
                            warn!(sheet = %name, "first sheet unreadable, using fallback sheet");
                        }
                        found = Some((name.clone(), range));
                        break;
                    }
                    Err(e) => {
                        debug!(sheet = %name, error = %e, "sheet could not be read");
                        last_error = Some(format!("{name}: {e}"));
                    }
                }
            }
            found.ok_or_else(|| IngestError::NoReadableSheet {
                message: last_error.unwrap_or_else(|| "workbook has no sheets".to_string()),
            })?
        }
    };

    let table = range_to_table(&range);
    debug!(
        sheet = %sheet,
        rows = table.len(),
        columns = table.width(),
        "workbook sheet loaded"
    );
    Ok(table)
}

fn range_to_table(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return RawTable::default();
    };
    let headers = header_row.iter().map(header_text).collect();
    let data = rows
        .map(|row| row.iter().map(data_to_cell).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(CellValue::is_missing))
        .collect();
    RawTable::new(headers, data)
}

fn header_text(value: &Data) -> String {
    match value {
        Data::String(s) => s.clone(),
        Data::Float(f) => format_numeric(*f),
        Data::Int(i) => i.to_string(),
        other => data_to_cell(other).to_display(),
    }
}

/// Converts a calamine cell to a [`CellValue`].
pub(crate) fn data_to_cell(value: &Data) -> CellValue {
    match value {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::number(*f),
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or_else(|| CellValue::number(dt.as_f64()), CellValue::Date),
        Data::DateTimeIso(s) => {
            parse_iso_datetime(s).map_or_else(|| CellValue::text(s.as_str()), CellValue::Date)
        }
        Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Error(_) | Data::Empty => CellValue::Missing,
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
