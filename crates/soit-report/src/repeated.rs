//! Students flagged in more than one row.

use std::collections::BTreeSet;

use soit_model::{CountBasis, CountMap, RepeatedStudents, Role, StringRow};

use crate::context::ReportContext;
use crate::counter::GroupCounter;

/// Roles shown in the preview rows, in column order.
const PREVIEW_ROLES: [Role; 5] = [
    Role::StudentId,
    Role::StudentName,
    Role::Module,
    Role::Week,
    Role::Risk,
];

/// Students with more than one row, and a preview of their rows.
///
/// `top_counts` holds at most `limit` students ranked by row count (ties in
/// first-seen order). `preview_rows` lists those students' rows in table
/// order, at most `preview_limit`, restricted to the identifying columns
/// that were resolved. Empty when no student repeats or StudentId is
/// unresolved.
pub fn repeated_students(
    ctx: &ReportContext<'_>,
    limit: usize,
    preview_limit: usize,
) -> RepeatedStudents {
    if !ctx.has(Role::StudentId) {
        return RepeatedStudents::default();
    }

    let mut counter = GroupCounter::new(CountBasis::Rows);
    for row in 0..ctx.len() {
        if let Some(student) = ctx.student(row) {
            counter.add(student, None);
        }
    }

    let top_counts: CountMap = counter
        .ranked()
        .iter()
        .filter(|&(_, &count)| count > 1)
        .take(limit)
        .map(|(student, &count)| (student, count))
        .collect();
    if top_counts.is_empty() {
        return RepeatedStudents::default();
    }

    let retained: BTreeSet<&str> = top_counts.keys().collect();
    let columns = preview_columns(ctx);
    let preview_rows = (0..ctx.len())
        .filter(|&row| {
            ctx.student(row)
                .is_some_and(|student| retained.contains(student.as_str()))
        })
        .take(preview_limit)
        .map(|row| {
            columns
                .iter()
                .map(|&(header, column)| (header, ctx.table().cell(row, column).to_display()))
                .collect::<StringRow>()
        })
        .collect();

    RepeatedStudents {
        top_counts,
        preview_rows,
    }
}

/// Resolved preview columns as (header, position), each header once.
fn preview_columns<'a>(ctx: &ReportContext<'a>) -> Vec<(&'a str, usize)> {
    let mut columns: Vec<(&'a str, usize)> = Vec::new();
    for role in PREVIEW_ROLES {
        let (Some(header), Some(column)) = (ctx.roles().get(role), ctx.column(role)) else {
            continue;
        };
        if columns.iter().all(|&(_, existing)| existing != column) {
            columns.push((header, column));
        }
    }
    columns
}
