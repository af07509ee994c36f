use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions.
///
/// This is a single error enum shared by the factory, the archive ingestor and the CSV loader.
/// Every variant is fatal for the call that produced it; nothing is retried internally.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive could not be opened or unpacked.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The source path does not carry the archive suffix the ingestor expects.
    #[error("invalid format: '{}' is not a {expected} file", .path.display())]
    InvalidFormat { path: PathBuf, expected: &'static str },

    /// The archive was extracted but contained no tabular files.
    #[error(
        "no csv files found in '{}'; directory contents: {contents:?}",
        .directory.display()
    )]
    NoDataFound {
        directory: PathBuf,
        contents: Vec<String>,
    },

    /// More than one tabular file was found and no file name was supplied.
    #[error(
        "found {} csv files {candidates:?}; specify a file name to pick one",
        .candidates.len()
    )]
    AmbiguousSelection { candidates: Vec<String> },

    /// The supplied file name does not match any extracted tabular file.
    #[error("file name '{file_name}' not found among {candidates:?}")]
    UnknownFile {
        file_name: String,
        candidates: Vec<String>,
    },

    /// Resetting the fixed extraction directory would delete the archive being read or the
    /// current working directory.
    #[error(
        "refusing to reset extraction target '{}' because it contains '{}'",
        .target.display(),
        .protected.display()
    )]
    UnsafeExtractionTarget { target: PathBuf, protected: PathBuf },

    /// The candidate file pattern is not a valid glob.
    #[error("invalid candidate pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// No ingestor is registered for the requested extension.
    #[error("no ingestor available for file extension '{extension}' (supported: {supported:?})")]
    UnsupportedExtension {
        extension: String,
        supported: Vec<String>,
    },

    /// The input does not conform to the provided schema (missing required columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}
