//! Configuration directory lookup.
//!
//! A configuration directory holds one file per field, named after the
//! field's file key, with the raw value as its contents. This is the layout
//! produced by mounted Kubernetes config maps and secrets, where files may end
//! up in nested (often symlinked, timestamped) subdirectories. Lookup is
//! therefore by base name only: the whole tree is walked once and every
//! regular file is indexed by its name.
//!
//! Two files sharing a base name in different subdirectories is ambiguous;
//! the first one in traversal order wins.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use indexmap::map::Entry;
use walkdir::WalkDir;

use crate::error::BindError;

/// Index of the regular files under a configuration directory, by base name.
#[derive(Debug, Clone, Default)]
pub struct ConfigDir {
    files: IndexMap<String, Utf8PathBuf>,
}

impl ConfigDir {
    /// An index with no files, used when no directory was supplied.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Walk `root` recursively and index every regular file by base name.
    ///
    /// A root that does not exist yields an empty index. Errors while walking
    /// an existing root are returned as [`BindError::SourceRead`].
    pub fn scan(root: &Utf8Path) -> Result<Self, BindError> {
        if root.as_str().is_empty() {
            return Ok(Self::empty());
        }

        match fs::metadata(root) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(%root, "config directory does not exist, file lookup disabled");
                return Ok(Self::empty());
            }
            Err(error) => {
                return Err(BindError::SourceRead {
                    path: root.to_owned(),
                    error,
                });
            }
        }

        let mut files = IndexMap::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .and_then(Utf8Path::from_path)
                    .unwrap_or(root)
                    .to_owned();
                BindError::SourceRead {
                    path,
                    error: e.into(),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(path) = Utf8Path::from_path(entry.path()) else {
                tracing::warn!(path = ?entry.path(), "skipping config file with non UTF-8 path");
                continue;
            };
            let Some(name) = path.file_name() else {
                continue;
            };

            match files.entry(name.to_string()) {
                Entry::Vacant(slot) => {
                    tracing::trace!(name, %path, "indexed config file");
                    slot.insert(path.to_owned());
                }
                Entry::Occupied(existing) => {
                    tracing::debug!(
                        name,
                        kept = %existing.get(),
                        ignored = %path,
                        "duplicate config file name"
                    );
                }
            }
        }

        tracing::debug!(%root, count = files.len(), "scanned config directory");
        Ok(Self { files })
    }

    /// Full path of the file with the given base name.
    pub fn find(&self, name: &str) -> Option<&Utf8Path> {
        self.files.get(name).map(|p| p.as_path())
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no file was indexed.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Read the whole file as a raw value.
///
/// Contents that are not valid UTF-8 are converted lossily, like environment
/// values. Returns `Ok(None)` if the file no longer exists, so the caller can fall back
/// to the next source. Any other failure is a [`BindError::SourceRead`].
pub fn read_value(path: &Utf8Path) -> Result<Option<String>, BindError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(%path, "config file disappeared before it could be read");
            Ok(None)
        }
        Err(error) => Err(BindError::SourceRead {
            path: path.to_owned(),
            error,
        }),
    }
}
