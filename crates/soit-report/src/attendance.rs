//! Attendance-related flag reasons.

use std::sync::LazyLock;

use regex::Regex;
use soit_model::Role;

use crate::context::ReportContext;

/// Absence vocabulary, matched anywhere in the reason, ignoring case.
static ATTENDANCE_REASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)absent|attendance|attend|no\s*show|did not attend|not attend|missed class|no class attendance",
    )
    .expect("valid attendance regex")
});

/// Returns true if a reason text mentions absence or attendance.
pub fn is_attendance_reason(reason: &str) -> bool {
    ATTENDANCE_REASON.is_match(reason)
}

/// One flag per row: true where the Reason cell is attendance-related.
///
/// Missing reasons never match. Every flag is false when no Reason column
/// was resolved.
pub fn attendance_mask(ctx: &ReportContext<'_>) -> Vec<bool> {
    if !ctx.has(Role::Reason) {
        return vec![false; ctx.len()];
    }
    (0..ctx.len())
        .map(|row| {
            ctx.text(row, Role::Reason)
                .is_some_and(|reason| is_attendance_reason(&reason))
        })
        .collect()
}
