use soit_model::{CellValue, CountBasis, RawTable};
use soit_report::{ReportBuilder, build_report};

const HEADERS: [&str; 8] = [
    "Student Number",
    "Student Name",
    "Module Code",
    "Year",
    "Week",
    "Flag Reason",
    "Risk Level",
    "Resolved?",
];

fn export(rows: &[[&str; 8]]) -> RawTable {
    RawTable::new(
        HEADERS.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|value| CellValue::text(*value)).collect())
            .collect(),
    )
}

fn sample_export() -> RawTable {
    export(&[
        ["1001", "Ada", "CS101", "1", "Week10", "Absent", "High", "Yes"],
        ["1002", "Ben", "CS102", "1", "Week2", "Late submission", "Medium", "no"],
        ["1001", "Ada", "CS101", "1", "Week1", "Did NOT Attend lecture", "High", "Y"],
        ["1003", "Cy", "CS101", "2", "Week1", "resolved risk review", "Low", ""],
        ["1001", "Ada", "CS103", "1", "Week2", "No show", "", "yes"],
        ["", "Dee", "CS102", "2", "", "Absent", "Low", "No"],
    ])
}

#[test]
fn total_records_and_unique_students() {
    let payload = build_report(&sample_export());

    assert_eq!(payload.total_records, 6);
    assert_eq!(payload.unique_students, Some(3));
}

#[test]
fn unique_students_null_without_student_number() {
    let table = RawTable::new(
        vec!["Name".into(), "Risk".into()],
        vec![vec!["Ada".into(), "High".into()]],
    );

    let report = ReportBuilder::default().build(&table);

    assert_eq!(report.payload.unique_students, None);
    assert_eq!(report.count_basis, CountBasis::Rows);
    let json = serde_json::to_value(&report.payload).unwrap();
    assert!(json["unique_students"].is_null());
}

#[test]
fn risk_and_resolved_counts_sum_to_total() {
    let payload = build_report(&sample_export());

    assert_eq!(payload.risk_counts.total(), payload.total_records);
    assert_eq!(payload.resolved_counts.total(), payload.total_records);
    assert_eq!(payload.risk_counts.get("Unknown"), Some(&1));
    assert_eq!(payload.resolved_counts.get("Unknown"), Some(&1));
    assert!(payload.by_reason.total() <= payload.total_records);
}

#[test]
fn weeks_in_natural_order() {
    let payload = build_report(&sample_export());

    assert_eq!(payload.weeks, vec!["Week1", "Week2", "Week10"]);
    assert_eq!(
        payload.by_week_module_all.keys().collect::<Vec<_>>(),
        vec!["Unknown", "Week1", "Week2", "Week10"]
    );
    assert_eq!(payload.modules, vec!["CS101", "CS102", "CS103"]);
}

#[test]
fn resolved_rate_for_mixed_answers() {
    let table = export(&[
        ["1", "A", "M1", "1", "W1", "", "High", "Yes"],
        ["2", "B", "M1", "1", "W1", "", "High", "no"],
        ["3", "C", "M1", "1", "W1", "", "High", "Y"],
    ]);

    let payload = build_report(&table);

    assert_eq!(payload.resolved_rate.get("W1"), Some(&66.7));
}

#[test]
fn week_risk_series_aligned() {
    let payload = build_report(&sample_export());

    let pivot = &payload.week_risk;
    assert_eq!(pivot.weeks, vec!["Unknown", "Week1", "Week2", "Week10"]);
    let names: Vec<_> = pivot.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["High", "Medium", "Low", "Unknown"]);
    for series in &pivot.series {
        assert_eq!(series.data.len(), pivot.weeks.len());
    }
    // The unnamed student in the Unknown week counts zero distinct students.
    assert_eq!(pivot.series[2].data, vec![0, 1, 0, 0]);
}

#[test]
fn repeated_students_keep_only_repeats() {
    let table = export(&[
        ["S1", "Ada", "M1", "1", "W1", "", "High", ""],
        ["S2", "Ben", "M1", "1", "W1", "", "Low", ""],
        ["S1", "Ada", "M2", "1", "W2", "", "High", ""],
        ["S1", "Ada", "M1", "1", "W3", "", "Low", ""],
    ]);

    let payload = build_report(&table);

    let repeated = &payload.repeated_students;
    assert_eq!(repeated.top_counts.iter().collect::<Vec<_>>(), vec![("S1", &3)]);
    assert_eq!(repeated.preview_rows.len(), 3);
    assert_eq!(
        repeated.preview_rows[0].keys().collect::<Vec<_>>(),
        vec!["Student Number", "Student Name", "Module Code", "Week", "Risk Level"]
    );
}

#[test]
fn attendance_sections_use_reason_vocabulary() {
    let payload = build_report(&sample_export());

    // Rows 0, 2, 4 and 5 are attendance-related; row 3 mentions "resolved risk".
    assert_eq!(
        payload.by_module_attendance.iter().collect::<Vec<_>>(),
        vec![("CS101", &1), ("CS103", &1), ("CS102", &0)]
    );
    assert_eq!(
        payload.by_week_attendance.iter().collect::<Vec<_>>(),
        vec![("Unknown", &0), ("Week1", &1), ("Week2", &1), ("Week10", &1)]
    );
    let week1 = payload.by_week_module_attendance.get("Week1").unwrap();
    assert_eq!(week1.iter().collect::<Vec<_>>(), vec![("CS101", &1)]);
}

#[test]
fn by_module_counts_distinct_students() {
    let payload = build_report(&sample_export());

    assert_eq!(
        payload.by_module.iter().collect::<Vec<_>>(),
        vec![("CS101", &2), ("CS102", &1), ("CS103", &1)]
    );
}

#[test]
fn idempotent_json() {
    let table = sample_export();

    let first = serde_json::to_string(&build_report(&table)).unwrap();
    let second = serde_json::to_string(&build_report(&table)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn payload_keys_in_contract_order() {
    let json = serde_json::to_string(&build_report(&sample_export())).unwrap();
    let keys = [
        "total_records",
        "unique_students",
        "risk_counts",
        "resolved_counts",
        "by_reason",
        "by_module",
        "by_module_attendance",
        "by_week_attendance",
        "by_week_module_all",
        "by_week_module_attendance",
        "weeks",
        "modules",
        "week_risk",
        "resolved_rate",
        "repeated_students",
        "sample_rows",
    ];

    let positions: Vec<usize> = keys
        .iter()
        .map(|key| json.find(&format!("\"{key}\":")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_object().unwrap().len(), keys.len());
}

#[test]
fn empty_table_yields_empty_sections() {
    let table = export(&[]);

    let payload = build_report(&table);

    assert_eq!(payload.total_records, 0);
    assert_eq!(payload.unique_students, Some(0));
    assert!(payload.risk_counts.is_empty());
    assert!(payload.resolved_counts.is_empty());
    assert!(payload.by_reason.is_empty());
    assert!(payload.by_module.is_empty());
    assert!(payload.by_module_attendance.is_empty());
    assert!(payload.by_week_attendance.is_empty());
    assert!(payload.by_week_module_all.is_empty());
    assert!(payload.by_week_module_attendance.is_empty());
    assert!(payload.weeks.is_empty());
    assert!(payload.modules.is_empty());
    assert!(payload.week_risk.weeks.is_empty());
    assert!(payload.week_risk.series.is_empty());
    assert!(payload.resolved_rate.is_empty());
    assert!(payload.repeated_students.is_empty());
    assert!(payload.sample_rows.is_empty());
}

#[test]
fn headers_without_roles_still_build() {
    let table = RawTable::new(
        vec!["Email".into(), "Comment".into()],
        vec![vec!["a@b.c".into(), "hello".into()]],
    );

    let payload = build_report(&table);

    assert_eq!(payload.total_records, 1);
    assert!(payload.risk_counts.is_empty());
    assert!(payload.week_risk.series.is_empty());
    assert_eq!(payload.sample_rows.len(), 1);
    assert_eq!(
        payload.sample_rows[0].get("Comment").map(String::as_str),
        Some("hello")
    );
}

#[test]
fn week_risk_snapshot() {
    let table = export(&[
        ["1", "A", "M1", "1", "Week 2", "", "High", "Yes"],
        ["2", "B", "M1", "1", "Week 1", "", "Low", "No"],
        ["3", "C", "M2", "1", "Week 1", "", "High", "Yes"],
    ]);

    let payload = build_report(&table);

    insta::assert_json_snapshot!(payload.week_risk, @r#"
    {
      "weeks": [
        "Week 1",
        "Week 2"
      ],
      "series": [
        {
          "name": "High",
          "data": [
            1,
            1
          ]
        },
        {
          "name": "Low",
          "data": [
            1,
            0
          ]
        }
      ]
    }
    "#);
}
