//! Where archives are unpacked, and how tabular candidates are found afterwards.

use std::fs::{self, File};
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use glob::Pattern;
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::{IngestionError, IngestionResult};

/// Directory name used by [`ExtractionTarget::default`].
pub const DEFAULT_EXTRACTION_DIR: &str = "extracted_data";

/// Where an archive's contents are unpacked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionTarget {
    /// A fixed directory. Relative paths resolve against the current working directory.
    ///
    /// # Destructive
    ///
    /// The directory is deleted and recreated before every extraction, so its previous contents
    /// are lost. Two ingestions sharing the same fixed target must not run concurrently.
    ///
    /// The reset only happens once the archive has been opened, and is refused with
    /// [`IngestionError::UnsafeExtractionTarget`] when the directory contains the archive itself
    /// or the current working directory.
    Fixed(PathBuf),
    /// A fresh, uniquely named temporary directory per call, removed when the call returns.
    Temporary,
}

impl Default for ExtractionTarget {
    fn default() -> Self {
        Self::Fixed(PathBuf::from(DEFAULT_EXTRACTION_DIR))
    }
}

/// Open the ZIP archive at `path` and read its central directory.
pub(crate) fn open_zip(path: &Path) -> IngestionResult<ZipArchive<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

/// A prepared extraction directory for the duration of one ingestion call.
///
/// Holds the [`TempDir`] guard for temporary targets so the directory lives exactly as long as
/// the workspace.
#[derive(Debug)]
pub(crate) struct ExtractionWorkspace {
    dir: PathBuf,
    _temp: Option<TempDir>,
}

impl ExtractionWorkspace {
    /// Create (or reset) the directory described by `target` for extracting `archive`.
    pub(crate) fn prepare(target: &ExtractionTarget, archive: &Path) -> IngestionResult<Self> {
        match target {
            ExtractionTarget::Fixed(dir) => {
                let cwd = std::env::current_dir()?;
                let dir = if dir.is_absolute() {
                    dir.clone()
                } else {
                    cwd.join(dir)
                };
                if dir.exists() {
                    ensure_resettable(&dir, &[archive, cwd.as_path()])?;
                    fs::remove_dir_all(&dir)?;
                }
                fs::create_dir_all(&dir)?;
                Ok(Self { dir, _temp: None })
            }
            ExtractionTarget::Temporary => {
                let temp = tempfile::Builder::new()
                    .prefix("rust-data-ingestion-")
                    .tempdir()?;
                Ok(Self {
                    dir: temp.path().to_path_buf(),
                    _temp: Some(temp),
                })
            }
        }
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }

    /// Unpack every entry of `zip` into this workspace.
    ///
    /// Entries whose names would escape the directory are rejected by the `zip` crate.
    pub(crate) fn extract_zip<R: Read + Seek>(
        &self,
        zip: &mut ZipArchive<R>,
    ) -> IngestionResult<()> {
        zip.extract(&self.dir)?;
        Ok(())
    }

    /// Names of all direct children of the workspace, sorted.
    pub(crate) fn listing(&self) -> IngestionResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in direct_children(&self.dir) {
            let entry = entry.map_err(std::io::Error::from)?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    /// Names of direct-child regular files matching `pattern` (e.g. `*.csv`), sorted.
    pub(crate) fn candidates(&self, pattern: &Pattern) -> IngestionResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in direct_children(&self.dir) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if pattern.matches(&name) {
                names.push(name.into_owned());
            }
        }
        Ok(names)
    }
}

/// Fail if any of `protected` lives at or below the existing directory `dir`.
fn ensure_resettable(dir: &Path, protected: &[&Path]) -> IngestionResult<()> {
    let dir = dir.canonicalize()?;
    for path in protected {
        let path = path.canonicalize()?;
        if path.starts_with(&dir) {
            return Err(IngestionError::UnsafeExtractionTarget {
                target: dir,
                protected: path,
            });
        }
    }
    Ok(())
}

fn direct_children(dir: &Path) -> impl Iterator<Item = walkdir::Result<walkdir::DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use glob::Pattern;

    use super::{ExtractionTarget, ExtractionWorkspace, ensure_resettable};
    use crate::IngestionError;

    const NO_ARCHIVE: &str = "unused.zip";

    #[test]
    fn temporary_workspace_is_removed_on_drop() {
        let ws = ExtractionWorkspace::prepare(&ExtractionTarget::Temporary, Path::new(NO_ARCHIVE))
            .unwrap();
        let dir = ws.dir().to_path_buf();
        assert!(dir.is_dir());
        drop(ws);
        assert!(!dir.exists());
    }

    #[test]
    fn fixed_workspace_discards_previous_contents() {
        let root = tempfile::tempdir().unwrap();
        let archive = root.path().join("data.zip");
        fs::write(&archive, b"").unwrap();
        let target = ExtractionTarget::Fixed(root.path().join("out"));

        let ws = ExtractionWorkspace::prepare(&target, &archive).unwrap();
        fs::write(ws.dir().join("stale.csv"), "a\n1\n").unwrap();

        let ws = ExtractionWorkspace::prepare(&target, &archive).unwrap();
        assert!(ws.listing().unwrap().is_empty());
        // Fixed targets outlive the workspace.
        let dir = ws.dir().to_path_buf();
        drop(ws);
        assert!(dir.is_dir());
        assert!(archive.is_file());
    }

    #[test]
    fn fixed_workspace_holding_the_archive_is_not_reset() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("out");
        fs::create_dir(&out).unwrap();
        let archive = out.join("data.zip");
        fs::write(&archive, b"").unwrap();

        let err = ExtractionWorkspace::prepare(&ExtractionTarget::Fixed(out), &archive)
            .unwrap_err();
        assert!(matches!(err, IngestionError::UnsafeExtractionTarget { .. }));
        assert!(archive.is_file());
    }

    #[test]
    fn directory_above_the_working_directory_is_not_resettable() {
        let cwd = std::env::current_dir().unwrap();
        let parent = cwd.parent().unwrap_or(&cwd);

        let err = ensure_resettable(parent, &[cwd.as_path()]).unwrap_err();
        assert!(matches!(err, IngestionError::UnsafeExtractionTarget { .. }));
        let err = ensure_resettable(&cwd, &[cwd.as_path()]).unwrap_err();
        assert!(err.to_string().contains("refusing to reset"));

        let elsewhere = tempfile::tempdir().unwrap();
        assert!(ensure_resettable(elsewhere.path(), &[cwd.as_path()]).is_ok());
    }

    #[test]
    fn candidates_are_direct_files_matching_pattern() {
        let ws = ExtractionWorkspace::prepare(&ExtractionTarget::Temporary, Path::new(NO_ARCHIVE))
            .unwrap();
        fs::write(ws.dir().join("b.csv"), "x\n").unwrap();
        fs::write(ws.dir().join("a.csv"), "x\n").unwrap();
        fs::write(ws.dir().join("notes.txt"), "x\n").unwrap();
        fs::create_dir(ws.dir().join("dir.csv")).unwrap();
        fs::create_dir(ws.dir().join("nested")).unwrap();
        fs::write(ws.dir().join("nested").join("c.csv"), "x\n").unwrap();

        let pattern = Pattern::new("*.csv").unwrap();
        assert_eq!(ws.candidates(&pattern).unwrap(), vec!["a.csv", "b.csv"]);
        assert_eq!(
            ws.listing().unwrap(),
            vec!["a.csv", "b.csv", "dir.csv", "nested", "notes.txt"]
        );
    }
}
