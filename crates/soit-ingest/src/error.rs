//! Error types for export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an export.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Upload Errors ===
    /// The request carried no file at all.
    #[error("No file part.")]
    NoFile,

    /// A file field was present but no file was chosen.
    #[error("No file selected.")]
    NoFileSelected,

    /// The file name does not end in an allowed extension.
    #[error("Please upload an Excel file (.xlsx or .xls).")]
    UnsupportedExtension { filename: String },

    /// The upload body is empty.
    #[error("uploaded file is empty: {filename}")]
    EmptyUpload { filename: String },

    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size ceiling.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file is empty.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// The workbook container could not be opened.
    #[error("failed to open workbook: {message}")]
    Workbook { message: String },

    /// The requested sheet does not exist.
    #[error("sheet '{sheet}' not found (available: {available})")]
    SheetNotFound { sheet: String, available: String },

    /// No sheet of the workbook could be read.
    #[error("no readable sheet in workbook: {message}")]
    NoReadableSheet { message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
