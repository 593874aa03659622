//! Report building for student engagement/risk exports.
//!
//! Turns one [`RawTable`](soit_model::RawTable) into a [`ReportPayload`]:
//!
//! 1. [`columns`]: infer which header plays which [`Role`](soit_model::Role)
//! 2. [`normalize`]: coerce Week/Year to text on a working copy
//! 3. [`week`]: natural ordering of week labels
//! 4. [`attendance`]: flag attendance-related reasons
//! 5. [`aggregate`]: scalar and grouped counts
//! 6. [`pivot`]: week x risk contingency table
//! 7. [`resolved`]: per-week resolved percentage
//! 8. [`repeated`]: students flagged more than once
//! 9. [`report`]: assembly of the final payload
//!
//! Every stage is pure. A missing role never fails the build; the sections
//! that depend on it come back empty (or `null` for `unique_students`).
//!
//! # Example
//!
//! ```
//! use soit_model::{CellValue, RawTable};
//! use soit_report::build_report;
//!
//! let table = RawTable::new(
//!     vec!["Student Number".into(), "Week".into(), "Risk".into()],
//!     vec![
//!         vec![CellValue::from(1001_i64), "Week1".into(), "High".into()],
//!         vec![CellValue::from(1002_i64), "Week2".into(), "Low".into()],
//!     ],
//! );
//! let payload = build_report(&table);
//! assert_eq!(payload.total_records, 2);
//! assert_eq!(payload.unique_students, Some(2));
//! assert_eq!(payload.weeks, vec!["Week1", "Week2"]);
//! ```

pub mod aggregate;
pub mod attendance;
pub mod columns;
mod context;
mod counter;
pub mod normalize;
pub mod pivot;
pub mod repeated;
pub mod report;
pub mod resolved;
pub mod week;

pub use attendance::{attendance_mask, is_attendance_reason};
pub use columns::{HeaderMatch, ROLE_RULES, RoleRule, resolve_columns};
pub use context::ReportContext;
pub use normalize::normalize_table;
pub use report::{Report, ReportBuilder, ReportOptions, build_report};
pub use soit_model::ReportPayload;
pub use week::{sort_weeks, week_number, week_sort_key};
