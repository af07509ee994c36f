//! Orchestration entrypoints.
//!
//! [`read_file`] is the minimal call: resolve the ingestor for an extension token and run it.
//! [`ingest_from_path`] adds extension inference and observer reporting on top.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::DataSet;

use super::factory::DataIngestorFactory;
use super::observability::{
    IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
};

/// Resolve the ingestor registered for `extension` and ingest `path` with it.
///
/// `file_name` selects one CSV when an archive holds several; it is ignored otherwise.
///
/// # Examples
///
/// ```no_run
/// use rust_data_ingestion::ingestion::{read_file, DataIngestorFactory};
///
/// # fn main() -> Result<(), rust_data_ingestion::IngestionError> {
/// let factory = DataIngestorFactory::default();
/// let ds = read_file(&factory, ".zip", "data/folder.zip", None)?;
/// println!("shape={:?}", ds.shape());
/// # Ok(())
/// # }
/// ```
pub fn read_file(
    factory: &DataIngestorFactory,
    extension: &str,
    path: impl AsRef<Path>,
    file_name: Option<&str>,
) -> IngestionResult<DataSet> {
    let ingestor = factory.get_data_ingestor(extension)?;
    ingestor.ingest(path.as_ref(), file_name)
}

/// Options controlling [`ingest_from_path`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Extension token (e.g. `".zip"`). If `None`, taken from the path's extension.
    pub extension: Option<String>,
    /// File name used when the source holds several candidates.
    pub file_name: Option<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("extension", &self.extension)
            .field("file_name", &self.file_name)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            extension: None,
            file_name: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Ingest `path` through `factory`, inferring the extension token when not given.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with shape stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use rust_data_ingestion::ingestion::{
///     ingest_from_path, DataIngestorFactory, IngestionOptions, StdErrObserver,
/// };
///
/// # fn main() -> Result<(), rust_data_ingestion::IngestionError> {
/// let factory = DataIngestorFactory::default();
/// let opts = IngestionOptions {
///     file_name: Some("people.csv".to_string()),
///     observer: Some(Arc::new(StdErrObserver)),
///     ..Default::default()
/// };
///
/// // `.zip` is taken from the path.
/// let ds = ingest_from_path(&factory, "data/folder.zip", &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(
    factory: &DataIngestorFactory,
    path: impl AsRef<Path>,
    options: &IngestionOptions,
) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let extension = match options.extension.as_deref() {
        Some(ext) => ext.to_string(),
        None => infer_extension_from_path(factory, path)?,
    };

    let ctx = IngestionContext {
        path: path.to_path_buf(),
        extension: extension.clone(),
        file_name: options.file_name.clone(),
    };

    let result = read_file(factory, &extension, path, options.file_name.as_deref());

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Zip(err) => match err {
            zip::result::ZipError::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        IngestionError::AmbiguousSelection { .. } | IngestionError::UnknownFile { .. } => {
            IngestionSeverity::Warning
        }
        IngestionError::InvalidFormat { .. }
        | IngestionError::NoDataFound { .. }
        | IngestionError::UnsupportedExtension { .. }
        | IngestionError::UnsafeExtractionTarget { .. }
        | IngestionError::Pattern(_)
        | IngestionError::SchemaMismatch { .. }
        | IngestionError::ParseError { .. } => IngestionSeverity::Error,
    }
}

fn infer_extension_from_path(
    factory: &DataIngestorFactory,
    path: &Path,
) -> IngestionResult<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| format!(".{ext}"))
        .ok_or_else(|| IngestionError::UnsupportedExtension {
            extension: String::new(),
            supported: factory.supported_extensions(),
        })
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue ingestion work in a job system.
#[derive(Clone)]
pub struct IngestionRequest {
    /// Path to the source file.
    pub path: PathBuf,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl IngestionRequest {
    /// Execute the request by calling [`ingest_from_path`].
    pub fn run(&self, factory: &DataIngestorFactory) -> IngestionResult<DataSet> {
        ingest_from_path(factory, &self.path, &self.options)
    }
}
