//! Per-week resolved percentage.

use soit_model::{CountBasis, RateMap, Role};

use crate::context::ReportContext;
use crate::counter::GroupCounter;

/// Resolved statuses counted as resolved (compared trimmed, lower-cased).
pub const RESOLVED_VALUES: [&str; 5] = ["yes", "y", "true", "1", "resolved"];

/// Returns true if a Resolved cell's text means resolved.
pub fn is_resolved_value(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    RESOLVED_VALUES.contains(&text.as_str())
}

/// Rounds a percentage to one decimal place.
fn round_rate(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage of resolved rows per week, in week order.
///
/// Missing weeks are grouped under `"Unknown"` and missing statuses count as
/// unresolved. Empty unless both Week and Resolved are resolved.
pub fn resolved_rate(ctx: &ReportContext<'_>) -> RateMap {
    if !ctx.has(Role::Week) || !ctx.has(Role::Resolved) {
        return RateMap::new();
    }

    let mut flagged = GroupCounter::new(CountBasis::Rows);
    let mut resolved = GroupCounter::new(CountBasis::Rows);
    for row in 0..ctx.len() {
        let week = ctx.key(row, Role::Week);
        if ctx
            .text(row, Role::Resolved)
            .is_some_and(|text| is_resolved_value(&text))
        {
            resolved.add(week.clone(), None);
        }
        flagged.add(week, None);
    }

    let mut rates = RateMap::new();
    for (week, &rows) in flagged.by_week().iter() {
        let rate = if rows == 0 {
            0.0
        } else {
            round_rate(resolved.count(week) as f64 * 100.0 / rows as f64)
        };
        rates.push(week, rate);
    }
    rates
}

#[cfg(test)]
mod tests {
    use super::*;
    use soit_model::{CellValue, ColumnRoleMap, RawTable};

    fn rates(rows: Vec<Vec<CellValue>>) -> RateMap {
        let table = RawTable::new(vec!["Week".into(), "Resolved".into()], rows);
        let roles: ColumnRoleMap = crate::columns::resolve_columns(table.headers());
        let ctx = ReportContext::new(&table, &roles);
        resolved_rate(&ctx)
    }

    #[test]
    fn test_is_resolved_value() {
        for value in ["Yes", " y ", "TRUE", "1", "Resolved"] {
            assert!(is_resolved_value(value), "{value}");
        }
        for value in ["No", "n", "false", "0", "pending", ""] {
            assert!(!is_resolved_value(value), "{value}");
        }
    }

    #[test]
    fn test_rate_rounded_to_one_decimal() {
        let rates = rates(vec![
            vec!["Week1".into(), "Yes".into()],
            vec!["Week1".into(), "yes".into()],
            vec!["Week1".into(), "No".into()],
        ]);

        assert_eq!(rates.get("Week1"), Some(&66.7));
    }

    #[test]
    fn test_numbers_and_booleans_as_status() {
        let rates = rates(vec![
            vec!["Week2".into(), CellValue::Number(1.0)],
            vec!["Week2".into(), CellValue::Bool(true)],
            vec!["Week2".into(), CellValue::Number(0.0)],
            vec!["Week2".into(), CellValue::Missing],
        ]);

        assert_eq!(rates.get("Week2"), Some(&50.0));
    }

    #[test]
    fn test_weeks_in_order_with_unknown() {
        let rates = rates(vec![
            vec!["Week10".into(), "Yes".into()],
            vec![CellValue::Missing, "No".into()],
            vec!["Week2".into(), "No".into()],
        ]);

        assert_eq!(
            rates.iter().collect::<Vec<_>>(),
            vec![("Unknown", &0.0), ("Week2", &0.0), ("Week10", &100.0)]
        );
    }

    #[test]
    fn test_interleaved_weeks_tally_separately() {
        let rows: Vec<Vec<CellValue>> = (0..30)
            .map(|i| {
                let week = format!("Week{}", i % 3 + 1);
                let status = if i % 3 == 0 || i % 2 == 0 { "Yes" } else { "No" };
                vec![CellValue::text(week), CellValue::text(status)]
            })
            .collect();

        let rates = rates(rows);

        assert_eq!(rates.keys().collect::<Vec<_>>(), vec!["Week1", "Week2", "Week3"]);
        assert_eq!(rates.get("Week1"), Some(&100.0));
        assert_eq!(rates.get("Week2"), Some(&50.0));
        assert_eq!(rates.get("Week3"), Some(&50.0));
    }

    #[test]
    fn test_empty_without_resolved_column() {
        let table = RawTable::new(vec!["Week".into()], vec![vec!["Week1".into()]]);
        let roles = crate::columns::resolve_columns(table.headers());
        let ctx = ReportContext::new(&table, &roles);

        assert!(resolved_rate(&ctx).is_empty());
    }
}
