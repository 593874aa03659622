//! Student risk export ingestion.
//!
//! This crate turns uploaded spreadsheets and CSV exports into a
//! [`RawTable`](soit_model::RawTable) for the report builder.
//!
//! # Features
//!
//! - **Upload validation**: reject absent, unnamed, empty, or non-Excel uploads
//!   with a user-facing message, and sanitize the file name
//! - **Workbook loading**: first sheet (falling back to the first readable
//!   sheet) or an explicitly selected sheet of `.xlsx`/`.xls` files
//! - **CSV loading**: Polars-backed CSV reading with schema inference
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use soit_ingest::{SheetSelection, read_table, read_upload};
//!
//! // From a path on disk (CSV or workbook)
//! let table = read_table(Path::new("flags.xlsx"), &SheetSelection::First)?;
//!
//! // From an upload body
//! let (filename, table) = read_upload(Some("Week 3 flags.xlsx"), &bytes, &SheetSelection::First)?;
//! ```

mod csv;
mod error;
mod source;
mod upload;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{read_csv_table, validate_encoding};

// === Source Dispatch ===
pub use source::{MAX_FILE_SIZE, SourceFormat, check_file_size, check_file_size_with_limit, read_table};

// === Upload Boundary ===
pub use upload::{ALLOWED_EXTENSIONS, allowed_file, read_upload, sanitize_filename, validate_upload};

// === Workbook Reading ===
pub use workbook::{SheetSelection, read_workbook};
