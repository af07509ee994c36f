//! ZIP archive ingestion.
//!
//! A [`ZipDataIngestor`] walks one call through these stages, failing terminally at the first
//! error:
//!
//! 1. validate the `.zip` suffix (before touching the filesystem)
//! 2. open the archive, then extract it into its [`ExtractionTarget`]
//! 3. list the direct-child CSV files (the candidates)
//! 4. select one candidate, using the caller's file name when there are several
//! 5. load the selected file into a [`DataSet`]

use std::path::Path;

use glob::Pattern;
use tracing::debug;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, Schema};

use super::csv;
use super::extraction::{ExtractionTarget, ExtractionWorkspace, open_zip};
use super::ingestor::DataIngestor;

/// Suffix a source path must end with to be accepted by [`ZipDataIngestor`].
pub const ZIP_SUFFIX: &str = ".zip";

/// Default pattern for candidate files inside an extracted archive.
pub const CSV_PATTERN: &str = "*.csv";

/// Extracts a ZIP archive and loads the CSV file inside it.
///
/// # Examples
///
/// ```no_run
/// use rust_data_ingestion::ingestion::{DataIngestor, ExtractionTarget, ZipDataIngestor};
/// use std::path::Path;
///
/// # fn main() -> Result<(), rust_data_ingestion::IngestionError> {
/// let ingestor = ZipDataIngestor::new().with_extraction_target(ExtractionTarget::Temporary);
///
/// // The archive holds several CSVs; pick one by name.
/// let ds = ingestor.ingest(Path::new("data/folder.zip"), Some("people.csv"))?;
/// println!("shape={:?}", ds.shape());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ZipDataIngestor {
    target: ExtractionTarget,
    schema: Option<Schema>,
    candidate_pattern: Pattern,
}

impl Default for ZipDataIngestor {
    fn default() -> Self {
        Self {
            target: ExtractionTarget::default(),
            schema: None,
            candidate_pattern: Pattern::new(CSV_PATTERN).unwrap_or_default(),
        }
    }
}

impl ZipDataIngestor {
    /// Ingestor extracting into [`ExtractionTarget::default`] with inferred column types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `target` as the extraction directory.
    pub fn with_extraction_target(mut self, target: ExtractionTarget) -> Self {
        self.target = target;
        self
    }

    /// Parse the selected CSV against `schema` instead of inferring column types.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Glob matched against extracted file names to find candidates (default `*.csv`).
    ///
    /// Fails with [`IngestionError::Pattern`] when `pattern` is not a valid glob.
    pub fn with_candidate_pattern(mut self, pattern: &str) -> IngestionResult<Self> {
        self.candidate_pattern = Pattern::new(pattern)?;
        Ok(self)
    }

    /// The configured extraction target.
    pub fn extraction_target(&self) -> &ExtractionTarget {
        &self.target
    }
}

impl DataIngestor for ZipDataIngestor {
    fn ingest(&self, path: &Path, file_name: Option<&str>) -> IngestionResult<DataSet> {
        if !path.to_string_lossy().ends_with(ZIP_SUFFIX) {
            return Err(IngestionError::InvalidFormat {
                path: path.to_path_buf(),
                expected: ZIP_SUFFIX,
            });
        }
        debug!(path = %path.display(), "validated archive path");

        let mut archive = open_zip(path)?;
        let workspace = ExtractionWorkspace::prepare(&self.target, path)?;
        workspace.extract_zip(&mut archive)?;
        debug!(dir = %workspace.dir().display(), entries = archive.len(), "extracted archive");

        let candidates = workspace.candidates(&self.candidate_pattern)?;
        debug!(count = candidates.len(), ?candidates, "enumerated candidates");

        let selected = select_candidate(&workspace, candidates, file_name)?;
        debug!(file = %selected, "selected candidate");

        let ds = csv::ingest_csv_from_path(workspace.dir().join(&selected), self.schema.as_ref())?;
        debug!(
            file = %selected,
            rows = ds.row_count(),
            columns = ds.column_count(),
            "loaded dataset"
        );
        Ok(ds)
    }
}

fn select_candidate(
    workspace: &ExtractionWorkspace,
    candidates: Vec<String>,
    file_name: Option<&str>,
) -> IngestionResult<String> {
    match candidates.len() {
        0 => Err(IngestionError::NoDataFound {
            directory: workspace.dir().to_path_buf(),
            contents: workspace.listing()?,
        }),
        1 => {
            if let Some(name) = file_name {
                debug!(file_name = name, "single candidate; ignoring file name");
            }
            Ok(candidates.into_iter().next().unwrap_or_default())
        }
        _ => match file_name {
            None => Err(IngestionError::AmbiguousSelection { candidates }),
            Some(name) if candidates.iter().any(|c| c == name) => Ok(name.to_owned()),
            Some(name) => Err(IngestionError::UnknownFile {
                file_name: name.to_owned(),
                candidates,
            }),
        },
    }
}
