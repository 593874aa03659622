//! Upload boundary checks.
//!
//! These run before any parsing: an upload without a file, without a name,
//! with a non-Excel extension, or with an empty body is rejected with a
//! message suitable for showing to the user.

use soit_model::RawTable;

use crate::error::{IngestError, Result};
use crate::workbook::{SheetSelection, read_workbook};

/// Extensions accepted for uploads (compared case-insensitively).
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Returns true if the file name has an allowed extension.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Makes a client-supplied file name safe to display or store.
///
/// Path components are dropped, whitespace becomes `_`, characters outside
/// `[A-Za-z0-9._-]` are removed, and leading/trailing `.`/`_` are trimmed.
/// A name with nothing left becomes `upload`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validates an upload and returns its sanitized file name.
///
/// `filename` is `None` when the request carried no file part.
pub fn validate_upload(filename: Option<&str>, bytes: &[u8]) -> Result<String> {
    let filename = filename.ok_or(IngestError::NoFile)?;
    if filename.is_empty() {
        return Err(IngestError::NoFileSelected);
    }
    if !allowed_file(filename) {
        return Err(IngestError::UnsupportedExtension {
            filename: filename.to_string(),
        });
    }
    if bytes.is_empty() {
        return Err(IngestError::EmptyUpload {
            filename: filename.to_string(),
        });
    }
    Ok(sanitize_filename(filename))
}

/// Validates an upload and reads the selected sheet.
pub fn read_upload(
    filename: Option<&str>,
    bytes: &[u8],
    selection: &SheetSelection,
) -> Result<(String, RawTable)> {
    let filename = validate_upload(filename, bytes)?;
    let table = read_workbook(bytes, selection)?;
    tracing::info!(
        filename = %filename,
        rows = table.len(),
        columns = table.width(),
        "upload parsed"
    );
    Ok((filename, table))
}
