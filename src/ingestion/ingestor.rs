//! The ingestion strategy contract.

use std::path::Path;

use crate::error::IngestionResult;
use crate::types::DataSet;

/// Turns a source file into an in-memory [`DataSet`].
///
/// Implementations are registered per file extension in a
/// [`super::DataIngestorFactory`]. A call either returns a fully loaded dataset or fails with an
/// [`crate::IngestionError`]; it never returns a partial or empty placeholder.
pub trait DataIngestor: Send + Sync {
    /// Ingest the source at `path`.
    ///
    /// `file_name` picks one file when the source holds several candidates. Implementations that
    /// only ever see one candidate ignore it.
    fn ingest(&self, path: &Path, file_name: Option<&str>) -> IngestionResult<DataSet>;
}
