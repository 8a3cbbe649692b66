//! Error types shared across the extraction pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Per-file extraction failure.
///
/// During a training batch these are recorded and skipped; for a single-file
/// analysis they abort the command with a user-facing message.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("lexer error: {reason}")]
    Lex { reason: String },

    #[error("malformed source: {reason}")]
    Malformed { reason: String },
}
