//! Ingestion entrypoints and implementations.
//!
//! Most callers build a [`DataIngestorFactory`] once and call [`read_file`] (or
//! [`ingest_from_path`], which also infers the extension and reports to an
//! [`IngestionObserver`]).
//!
//! Building blocks:
//! - [`DataIngestor`]: the strategy contract, one implementation per source type
//! - [`ZipDataIngestor`]: extracts a ZIP archive and loads the CSV inside it
//! - [`CsvDataIngestor`]: loads a bare CSV file
//! - [`ExtractionTarget`]: where archives are unpacked

mod archive;
pub mod csv;
mod extraction;
mod factory;
mod ingestor;
pub mod observability;
pub mod unified;

pub use archive::{CSV_PATTERN, ZIP_SUFFIX, ZipDataIngestor};
pub use csv::CsvDataIngestor;
pub use extraction::{DEFAULT_EXTRACTION_DIR, ExtractionTarget};
pub use factory::DataIngestorFactory;
pub use ingestor::DataIngestor;
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity,
    IngestionStats, StdErrObserver, TracingObserver,
};
pub use unified::{IngestionOptions, IngestionRequest, ingest_from_path, read_file};
