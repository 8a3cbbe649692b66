//! Runtime configuration
//!
//! Everything the reference behavior kept as module-level constants
//! (data directories, the corpus filename separator, anonymization token
//! length, embedding sizes) lives in one explicit `Config` value that is
//! passed to each component.

use std::path::{Path, PathBuf};

/// Configuration shared by training and analysis.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for vocabularies and model checkpoints.
    pub data_root: PathBuf,

    /// Separator between category name and the rest of a corpus filename.
    pub category_separator: String,

    /// Length of the random token substituted for label markers.
    pub anon_token_len: usize,

    /// Optional RNG seed for marker anonymization (tests use this).
    pub anon_seed: Option<u64>,

    /// Maximum number of distinct words kept in the token index.
    pub vocab_size: usize,

    /// Fixed length every method embeds to (pre-padded / pre-truncated).
    pub embed_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            category_separator: "__".to_string(),
            anon_token_len: 7,
            anon_seed: None,
            vocab_size: 1000,
            embed_len: 300,
        }
    }
}

impl Config {
    /// Directory holding one persisted predictor per category.
    pub fn checkpoints_dir(&self, language: &str) -> PathBuf {
        self.data_root.join(language).join("checkpoints")
    }

    /// The cumulative `input,label` vocabulary file for a language.
    pub fn vocab_path(&self, language: &str) -> PathBuf {
        self.data_root.join(language).join("vocab.csv")
    }

    /// Override the data root (e.g. from `--data-dir`).
    pub fn with_data_root(mut self, root: &Path) -> Self {
        self.data_root = root.to_path_buf();
        self
    }
}

/// Platform data directory, falling back to a local `./data`.
fn default_data_root() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("vulnera"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_and_vocab_paths() {
        let config = Config::default().with_data_root(Path::new("/tmp/vulnera-test"));
        assert_eq!(
            config.checkpoints_dir("java"),
            PathBuf::from("/tmp/vulnera-test/java/checkpoints")
        );
        assert_eq!(
            config.vocab_path("java"),
            PathBuf::from("/tmp/vulnera-test/java/vocab.csv")
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.category_separator, "__");
        assert_eq!(config.anon_token_len, 7);
        assert!(config.embed_len > 0);
        assert!(config.vocab_size > 0);
    }
}
