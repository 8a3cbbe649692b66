//! Token index and fixed-length embedding
//!
//! The index is fitted on the cumulative vocabulary: words are ranked by
//! frequency (ties broken lexicographically so fitting is deterministic),
//! the most frequent word gets index 1, and ranks past `vocab_size` are
//! dropped. A method embeds to a fixed-length vector of word indices:
//! unknown words map to 0, and sequences are pre-truncated / pre-padded —
//! the last `embed_len` tokens are kept, with zeros on the left.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};

use super::labels::LabeledExample;

/// Header of the cumulative vocabulary file.
const VOCAB_HEADER: [&str; 2] = ["input", "label"];

/// Append labeled rows to the cumulative vocabulary CSV, writing the
/// `input,label` header when the file is created.
pub fn append_vocab(path: &Path, rows: &[LabeledExample]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let is_new = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open vocabulary {}", path.display()))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if is_new {
        writer.write_record(VOCAB_HEADER)?;
    }
    for row in rows {
        writer.write_record([row.input.as_str(), row.label.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Read every input string recorded in the vocabulary CSV.
pub fn load_vocab_inputs(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to read vocabulary {}", path.display()))?;
    let mut inputs = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(input) = record.get(0) {
            inputs.push(input.to_string());
        }
    }
    Ok(inputs)
}

/// Frequency-ranked word index.
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    index: HashMap<String, usize>,
}

impl TokenIndex {
    /// Fit the index on a set of input strings.
    pub fn fit<'a, I>(texts: I, vocab_size: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for text in texts {
            for word in text.split_whitespace() {
                *counts.entry(word).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(vocab_size);

        let index = ranked
            .into_iter()
            .enumerate()
            .map(|(rank, (word, _))| (word.to_string(), rank + 1))
            .collect();
        Self { index }
    }

    /// Embed one input string to a fixed-length index vector.
    pub fn embed(&self, text: &str, embed_len: usize) -> Vec<f32> {
        let indices: Vec<f32> = text
            .split_whitespace()
            .map(|word| self.index.get(word).copied().unwrap_or(0) as f32)
            .collect();

        let mut out = vec![0.0; embed_len];
        let keep = indices.len().min(embed_len);
        let src = &indices[indices.len() - keep..];
        out[embed_len - keep..].copy_from_slice(src);
        out
    }

    /// Fit the index on the inputs recorded in a vocabulary CSV.
    pub fn fit_from_file(path: &Path, vocab_size: usize) -> Result<Self> {
        let inputs = load_vocab_inputs(path)?;
        Ok(Self::fit(inputs.iter().map(String::as_str), vocab_size))
    }

    /// Number of indexed words.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
