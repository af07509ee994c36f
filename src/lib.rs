//! `rust-data-ingestion` turns a ZIP archive holding CSV data into an in-memory
//! [`types::DataSet`].
//!
//! The primary entrypoint is [`ingestion::read_file`]: a [`ingestion::DataIngestorFactory`] maps
//! an extension token (`".zip"`) to an ingestion strategy, and the strategy extracts the archive,
//! finds the CSV file(s) directly inside it, picks one, and loads it.
//!
//! ## Picking a file
//!
//! - no CSV in the archive: [`IngestionError::NoDataFound`] (with the directory listing)
//! - exactly one CSV: it is loaded; any file name passed is ignored
//! - several CSVs: pass the file name to load, otherwise [`IngestionError::AmbiguousSelection`];
//!   a name that is not among them gives [`IngestionError::UnknownFile`]
//!
//! ## Quick example
//!
//! ```no_run
//! use rust_data_ingestion::ingestion::{DataIngestorFactory, read_file};
//!
//! # fn main() -> Result<(), rust_data_ingestion::IngestionError> {
//! let factory = DataIngestorFactory::default();
//! let ds = read_file(&factory, ".zip", "data/folder.zip", Some("people.csv"))?;
//! println!("shape={:?}", ds.shape());
//! # Ok(())
//! # }
//! ```
//!
//! ## Where archives are extracted
//!
//! [`ingestion::ZipDataIngestor`] unpacks into an [`ingestion::ExtractionTarget`]. The default is
//! the fixed directory `extracted_data` under the current working directory, which is wiped and
//! recreated on every call once the archive has been opened. A fixed directory holding the archive
//! or the working directory is never wiped; ingestion fails with
//! [`IngestionError::UnsafeExtractionTarget`] instead. Use [`ingestion::ExtractionTarget::Temporary`] for a private directory
//! that is removed when the call returns:
//!
//! ```no_run
//! use rust_data_ingestion::ingestion::{
//!     DataIngestorFactory, ExtractionTarget, ZipDataIngestor, read_file,
//! };
//!
//! # fn main() -> Result<(), rust_data_ingestion::IngestionError> {
//! let factory = DataIngestorFactory::new().with_ingestor(
//!     ".zip",
//!     ZipDataIngestor::new().with_extraction_target(ExtractionTarget::Temporary),
//! );
//! let ds = read_file(&factory, ".zip", "data/folder.zip", None)?;
//! println!("rows={}", ds.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Column types
//!
//! Without a schema, each column's [`types::DataType`] is inferred from its non-empty cells
//! (`Int64`, then `Float64`, then `Bool`, else `Utf8`). Pass a [`types::Schema`] via
//! [`ingestion::ZipDataIngestor::with_schema`] to parse against fixed types instead. Empty cells
//! become [`types::Value::Null`]. Repeated header names load as `name`, `name.1`, `name.2`, ...
//!
//! ## Modules
//!
//! - [`ingestion`]: factory, strategies, orchestration and observers
//! - [`types`]: schema + in-memory dataset types
//! - [`processing`]: column reductions
//! - [`inspection`]: data-type, descriptive and missing-value reports over a dataset
//! - [`error`]: error types used across ingestion

pub mod error;
pub mod ingestion;
pub mod inspection;
pub mod processing;
pub mod types;

pub use error::{IngestionError, IngestionResult};
