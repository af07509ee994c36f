//! Extension → ingestor registry.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{IngestionError, IngestionResult};

use super::archive::{ZIP_SUFFIX, ZipDataIngestor};
use super::ingestor::DataIngestor;

/// Maps file-extension tokens (e.g. `".zip"`) to [`DataIngestor`]s.
///
/// Build one at startup and pass it by reference to [`super::read_file`]. Tokens are matched
/// case-insensitively, so `".ZIP"` and `".zip"` resolve to the same ingestor.
///
/// [`Default`] registers [`ZipDataIngestor::new`] under `".zip"`; [`DataIngestorFactory::new`]
/// starts empty.
pub struct DataIngestorFactory {
    ingestors: BTreeMap<String, Box<dyn DataIngestor>>,
}

impl DataIngestorFactory {
    /// An empty factory.
    pub fn new() -> Self {
        Self {
            ingestors: BTreeMap::new(),
        }
    }

    /// Register `ingestor` for `extension`, returning the ingestor it replaced, if any.
    pub fn register(
        &mut self,
        extension: &str,
        ingestor: impl DataIngestor + 'static,
    ) -> Option<Box<dyn DataIngestor>> {
        self.ingestors
            .insert(normalize_extension(extension), Box::new(ingestor))
    }

    /// Builder form of [`Self::register`].
    pub fn with_ingestor(mut self, extension: &str, ingestor: impl DataIngestor + 'static) -> Self {
        self.register(extension, ingestor);
        self
    }

    /// Return the ingestor registered for `extension`.
    ///
    /// Fails with [`IngestionError::UnsupportedExtension`] when nothing is registered for it.
    pub fn get_data_ingestor(&self, extension: &str) -> IngestionResult<&dyn DataIngestor> {
        let key = normalize_extension(extension);
        match self.ingestors.get(&key) {
            Some(ingestor) => Ok(&**ingestor),
            None => Err(IngestionError::UnsupportedExtension {
                extension: key,
                supported: self.supported_extensions(),
            }),
        }
    }

    /// Registered extension tokens, sorted.
    pub fn supported_extensions(&self) -> Vec<String> {
        self.ingestors.keys().cloned().collect()
    }
}

impl Default for DataIngestorFactory {
    fn default() -> Self {
        Self::new().with_ingestor(ZIP_SUFFIX, ZipDataIngestor::new())
    }
}

impl fmt::Debug for DataIngestorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataIngestorFactory")
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().to_ascii_lowercase()
}
