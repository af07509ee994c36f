#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_data_ingestion::ingestion::{ExtractionTarget, ZipDataIngestor};
use tracing_subscriber::EnvFilter;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const PEOPLE_CSV: &str = "Name,Age\nAda,36\nGrace,85\nLinus,\n";
pub const CITIES_CSV: &str = "city,population,capital\nOslo,709037,true\nBergen,291940,false\n";

/// Route `tracing` output through the test harness (`RUST_LOG=debug cargo test` to see it).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Write a ZIP at `dir/name`. Entries ending in `/` become directories.
pub fn write_zip(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default();
    for (entry, contents) in entries {
        if entry.ends_with('/') {
            zip.add_directory(*entry, options).unwrap();
        } else {
            zip.start_file(*entry, options).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap();
    path
}

/// An ingestor that extracts into a private temporary directory.
pub fn temp_ingestor() -> ZipDataIngestor {
    ZipDataIngestor::new().with_extraction_target(ExtractionTarget::Temporary)
}
