//! Index registry: startup discovery and name resolution.
//!
//! The data root's immediate subdirectories are the set of available
//! indexes. Discovery runs exactly once, before the server accepts
//! requests, and validates each entry by opening it with Tantivy and
//! dropping the handle again. Nothing stays open: every search
//! reopens its index from disk.
//!
//! Entries that fail to open are skipped and reported through
//! [`IndexRegistry::skipped`], so one corrupt directory does not take
//! down the whole service.

use crate::core::error::{LineseekError, Result};
use crate::core::types::SkippedIndex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tantivy::Index;
use tracing::{info, warn};

/// A named index discovered under the data root
#[derive(Debug, Clone)]
pub struct IndexDescriptor {
    /// Directory base name, unique within the data root
    pub name: String,

    /// Filesystem location, `data_root/name`
    pub path: PathBuf,
}

/// The set of indexes discovered at startup
#[derive(Debug, Default)]
pub struct IndexRegistry {
    indexes: BTreeMap<String, IndexDescriptor>,
    skipped: Vec<SkippedIndex>,
}

impl IndexRegistry {
    /// Discover indexes under `data_root`.
    ///
    /// An unreadable data root is a configuration error and fatal to
    /// startup. Non-directory children are skipped silently apart
    /// from an info-level diagnostic; a valid index is always a
    /// directory of multiple files. Directories that fail to open as
    /// a Tantivy index are recorded as skipped and the service runs
    /// with the remaining subset.
    pub fn discover(data_root: &Path) -> Result<Self> {
        let entries = fs::read_dir(data_root).map_err(|e| {
            LineseekError::ConfigError(format!("Failed to read data root: {e}"))
        })?;

        let mut indexes = BTreeMap::new();
        let mut skipped = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| {
                LineseekError::ConfigError(format!("Failed to read data root entry: {e}"))
            })?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            if !path.is_dir() {
                info!(entry = %name, "not an index directory, skipping");
                continue;
            }

            // Open once to validate, then drop the handle.
            match Index::open_in_dir(&path) {
                Ok(_) => {
                    info!(index = %name, "registered index");
                    indexes.insert(name.clone(), IndexDescriptor { name, path });
                }
                Err(e) => {
                    warn!(index = %name, error = %e, "failed to open index, serving without it");
                    skipped.push(SkippedIndex {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(Self { indexes, skipped })
    }

    /// Resolve a request-supplied name to a descriptor.
    ///
    /// The name is containment-checked before any lookup: it must be
    /// a plain directory base name, never a path.
    pub fn resolve(&self, name: &str) -> Result<&IndexDescriptor> {
        validate_name(name)?;
        self.indexes
            .get(name)
            .ok_or_else(|| LineseekError::IndexNotFound(name.to_string()))
    }

    /// Names of all served indexes, in sorted order
    pub fn names(&self) -> Vec<String> {
        self.indexes.keys().cloned().collect()
    }

    /// Entries that failed validation at startup
    pub fn skipped(&self) -> &[SkippedIndex] {
        &self.skipped
    }

    /// Number of served indexes
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// True when no index was registered
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

/// Reject names that could escape the data root.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(LineseekError::InvalidIndexName(name.to_string()));
    }
    Ok(())
}
