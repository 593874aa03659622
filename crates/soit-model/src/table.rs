//! In-memory table of raw cells.

use std::collections::{BTreeMap, BTreeSet};

use crate::cell::CellValue;

/// Grouping key used for missing values.
pub const UNKNOWN_KEY: &str = "Unknown";

static MISSING: CellValue = CellValue::Missing;

/// Ordered rows of dynamically typed cells under literal column headers.
///
/// Headers are normalized on construction (trimmed, BOM stripped, inner
/// whitespace kept as written, blanks named `Unnamed: {index}`, duplicates
/// suffixed `.1`, `.2`, ...). Every row is padded or truncated to the header
/// width, so cell lookups by `(row, column)` never go out of bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Builds a table from raw headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let headers = dedupe_headers(
            headers
                .iter()
                .enumerate()
                .map(|(idx, raw)| {
                    let header = normalize_header(raw);
                    if header.is_empty() {
                        format!("Unnamed: {idx}")
                    } else {
                        header
                    }
                })
                .collect(),
        );
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Missing);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Column headers in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in file order.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Position of a header, if present.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cells of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&MISSING))
    }

    /// Cell at `(row, column)`; out-of-range positions read as missing.
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&MISSING)
    }

    /// Rewrites every cell of one column in place.
    pub fn map_column<F>(&mut self, index: usize, mut f: F)
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(index) {
                *cell = f(cell);
            }
        }
    }
}

/// Normalizes a header: strips a BOM and trims outer whitespace.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut taken: BTreeSet<String> = BTreeSet::new();
    let mut suffixes: BTreeMap<String, usize> = BTreeMap::new();
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        if taken.insert(header.clone()) {
            out.push(header);
            continue;
        }
        let next = suffixes.entry(header.clone()).or_insert(1);
        let candidate = loop {
            let candidate = format!("{header}.{next}");
            *next += 1;
            if taken.insert(candidate.clone()) {
                break candidate;
            }
        };
        out.push(candidate);
    }
    out
}
