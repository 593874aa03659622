use std::fs;
use std::path::PathBuf;

use soit_ingest::{IngestError, SheetSelection, read_table, read_upload};
use soit_model::CellValue;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("soit_ingest_{}_{stamp}_{name}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn cleanup(path: &PathBuf) {
    let _ = fs::remove_file(path);
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn reads_csv_export_with_mixed_cells() {
    let contents = "Student Number, Student Name ,Module Code,Week,Risk Level,Resolved?\n\
                    1001,Ada,CS101,Week1,High,Yes\n\
                    1002,Ben,CS102,Week2,,no\n";
    let path = temp_file("flags.csv", contents.as_bytes());

    let table = read_table(&path, &SheetSelection::First).expect("read csv");

    assert_eq!(
        table.headers(),
        &[
            "Student Number",
            "Student Name",
            "Module Code",
            "Week",
            "Risk Level",
            "Resolved?"
        ]
    );
    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, 0), &CellValue::Number(1001.0));
    assert_eq!(table.cell(1, 3).to_display(), "Week2");
    assert!(table.cell(1, 4).is_missing());

    cleanup(&path);
}

#[test]
fn rejects_unsupported_extension() {
    let path = temp_file("flags.txt", b"a,b\n1,2\n");

    let result = read_table(&path, &SheetSelection::First);

    assert!(matches!(
        result,
        Err(IngestError::UnsupportedExtension { .. })
    ));
    cleanup(&path);
}

#[test]
fn rejects_empty_workbook_upload() {
    let path = temp_file("flags.xlsx", b"");

    let result = read_table(&path, &SheetSelection::First);

    assert!(matches!(result, Err(IngestError::EmptyUpload { .. })));
    cleanup(&path);
}

#[test]
fn reports_unreadable_workbook() {
    let path = temp_file("flags.xls", b"this is not a spreadsheet");

    let result = read_table(&path, &SheetSelection::Named("Flags".to_string()));

    assert!(matches!(result, Err(IngestError::Workbook { .. })));
    cleanup(&path);
}

#[test]
fn reads_first_sheet_of_workbook() {
    let table = read_table(&fixture("flags.xlsx"), &SheetSelection::First).expect("read xlsx");

    assert_eq!(
        table.headers(),
        &[
            "Student Number",
            "Student Name",
            "Module Code",
            "Week",
            "Reason",
            "Risk Level",
            "Resolved"
        ]
    );
    // The blank third row of the sheet is skipped.
    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, 0), &CellValue::Number(1001.0));
    assert_eq!(table.cell(0, 4).to_display(), "Absent");
    assert_eq!(table.cell(1, 1).to_display(), "Ben");
    assert_eq!(table.cell(1, 6).to_display(), "No");
}

#[test]
fn reads_named_sheet_of_workbook() {
    let selection = SheetSelection::Named("Summary".to_string());

    let table = read_table(&fixture("flags.xlsx"), &selection).expect("read named sheet");

    assert_eq!(table.headers(), &["Week"]);
    assert_eq!(table.len(), 1);
    assert_eq!(table.cell(0, 0).to_display(), "Week1");
}

#[test]
fn missing_sheet_name_lists_available_sheets() {
    let selection = SheetSelection::Named("Nope".to_string());

    let result = read_table(&fixture("flags.xlsx"), &selection);

    match result {
        Err(IngestError::SheetNotFound { sheet, available }) => {
            assert_eq!(sheet, "Nope");
            assert_eq!(available, "Flags, Summary");
        }
        other => panic!("expected SheetNotFound, got {other:?}"),
    }
}

#[test]
fn falls_back_to_first_readable_sheet() {
    let table = read_table(&fixture("unreadable_first_sheet.xlsx"), &SheetSelection::First)
        .expect("fallback sheet");

    assert_eq!(table.headers()[0], "Student Number");
    assert_eq!(table.len(), 2);
}

#[test]
fn upload_of_workbook_returns_sanitized_name() {
    let bytes = fs::read(fixture("flags.xlsx")).expect("read fixture");

    let (filename, table) =
        read_upload(Some("Week 1 flags.xlsx"), &bytes, &SheetSelection::First).expect("upload");

    assert_eq!(filename, "Week_1_flags.xlsx");
    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, 5).to_display(), "High");
}
