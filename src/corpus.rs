//! Corpus indexing
//!
//! A labeled corpus is a flat directory of source files named
//! `<CategoryName>__<anything>`. The indexer groups file paths by category;
//! categories are exposed in sorted order so a training run visits them
//! deterministically regardless of filesystem listing order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Mapping from vulnerability category to the corpus files labeled with it.
#[derive(Debug, Default)]
pub struct VulnerabilityCorpus {
    data: BTreeMap<String, Vec<PathBuf>>,
}

impl VulnerabilityCorpus {
    /// Scan a corpus directory, grouping files by filename prefix.
    pub fn scan(root: &Path, separator: &str) -> Result<Self> {
        let mut corpus = Self::default();
        let entries = std::fs::read_dir(root)
            .with_context(|| format!("failed to read corpus directory {}", root.display()))?;
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                corpus.add(&entry.path(), separator);
            }
        }
        Ok(corpus)
    }

    /// Register one corpus file under its category.
    ///
    /// The category is everything in the file name before the first
    /// occurrence of `separator`; a name without the separator is its own
    /// category.
    pub fn add(&mut self, path: &Path, separator: &str) {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return,
        };
        let category = match name.split_once(separator) {
            Some((prefix, _)) => prefix,
            None => name,
        };
        self.data
            .entry(category.to_string())
            .or_default()
            .push(path.to_path_buf());
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Files labeled with one category.
    pub fn files(&self, category: &str) -> &[PathBuf] {
        self.data.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
