//! Deletion classifier
//!
//! Checks matched paths against the checkout as it is on disk right now.
//! A file that is gone can be dropped from history wholesale; a file that
//! still exists has to be rewritten in place.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregate::Aggregation;

/// Path to "deleted from the working tree" flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileClassification {
    files: BTreeMap<String, bool>,
}

impl FileClassification {
    /// Stat every file in the aggregation relative to `root`
    pub fn classify(aggregation: &Aggregation, root: &Path) -> Self {
        Self::classify_paths(aggregation.files(), root)
    }

    pub fn classify_paths<'a>(paths: impl IntoIterator<Item = &'a str>, root: &Path) -> Self {
        let files: BTreeMap<String, bool> = paths
            .into_iter()
            .map(|path| (path.to_string(), is_deleted(&root.join(path))))
            .collect();

        debug!(
            "Classified {} files, {} deleted",
            files.len(),
            files.values().filter(|deleted| **deleted).count()
        );

        Self { files }
    }

    /// Unknown paths count as present so they are never excluded from history
    pub fn is_deleted(&self, path: &str) -> bool {
        self.files.get(path).copied().unwrap_or(false)
    }

    pub fn deleted(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .filter(|(_, deleted)| **deleted)
            .map(|(path, _)| path.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, bool)> for FileClassification {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// Only a definite "not found" means deleted; other stat failures keep the file.
fn is_deleted(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(_) => false,
        Err(e) if e.kind() == ErrorKind::NotFound => true,
        Err(e) => {
            warn!("Could not stat {:?}, treating as present: {}", path, e);
            false
        }
    }
}
