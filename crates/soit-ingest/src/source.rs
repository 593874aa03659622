//! Loading an export from disk.

use std::path::Path;

use soit_model::RawTable;

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};
use crate::upload::read_upload;
use crate::workbook::SheetSelection;

/// Maximum file size accepted for loading (50 MB).
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Container format of an export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.xlsx` / `.xls` workbook.
    Workbook,
    /// Comma-separated values.
    Csv,
}

impl SourceFormat {
    /// Format implied by the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xls" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedExtension {
                filename: path.display().to_string(),
            }),
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads an export file (CSV or workbook) into a [`RawTable`].
///
/// Workbooks go through the same checks as an upload, using the file's own
/// name. The sheet selection is ignored for CSV files.
pub fn read_table(path: &Path, selection: &SheetSelection) -> Result<RawTable> {
    let format = SourceFormat::from_path(path)?;
    check_file_size(path)?;

    match format {
        SourceFormat::Csv => read_csv_table(path),
        SourceFormat::Workbook => {
            let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            let (_, table) = read_upload(filename.as_deref(), &bytes, selection)?;
            Ok(table)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_source_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a/flags.XLSX")).unwrap(),
            SourceFormat::Workbook
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("flags.csv")).unwrap(),
            SourceFormat::Csv
        );
        assert!(matches!(
            SourceFormat::from_path(Path::new("flags.json")),
            Err(IngestError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn test_check_file_size_with_limit() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[b'x'; 64]).unwrap();

        assert!(check_file_size_with_limit(file.path(), 64).is_ok());
        assert!(matches!(
            check_file_size_with_limit(file.path(), 10),
            Err(IngestError::FileTooLarge { size: 64, .. })
        ));
    }

    #[test]
    fn test_read_table_missing_file() {
        let result = read_table(Path::new("/no/such/flags.csv"), &SheetSelection::First);
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
