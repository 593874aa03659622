//! Data model types for student engagement/risk exports.
//!
//! This crate provides the typed representation shared by the loader and the
//! report builder:
//! - **Cells**: a tagged [`CellValue`] with total conversions to display text
//! - **Tables**: [`RawTable`], an ordered, header-normalized grid of cells
//! - **Roles**: the semantic column categories and the [`ColumnRoleMap`]
//! - **Payload**: the JSON-safe [`ReportPayload`] and its section types
//!
//! # Module Organization
//!
//! - [`cell`]: Cell values and numeric formatting
//! - [`table`]: Raw table and header normalization
//! - [`frame`]: Polars `DataFrame`/`AnyValue` conversion
//! - [`role`]: Roles, role map, and count basis
//! - [`payload`]: Report payload and ordered JSON maps

pub mod cell;
pub mod frame;
pub mod payload;
pub mod role;
pub mod table;

pub use cell::{CellValue, format_numeric};
pub use frame::any_to_cell;
pub use payload::{
    CountMap, NestedCountMap, OrderedMap, RateMap, RepeatedStudents, ReportPayload, RiskSeries,
    StringRow, WeekRisk,
};
pub use role::{ColumnRoleMap, CountBasis, Role};
pub use table::{RawTable, UNKNOWN_KEY, normalize_header};
