//! Brace normalization and method chunking
//!
//! The chunker is intentionally grammar-free: it never builds a full Java
//! AST. It pairs braces LIFO over the token stream's brace markers (the
//! "guide"), so arbitrary nesting resolves correctly while braces inside
//! literals and comments never participate. Normalizing Allman placement to
//! K&R first guarantees the opening brace sits on the same line as the
//! statement that controls it, which is what makes the line-start chunk
//! boundary reliable.

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::ParseError;
use crate::parsers::LanguageFrontEnd;

/// Access modifiers that promote a chunk to a method candidate.
const MODIFIERS: &[&str] = &["public", "private", "protected"];

/// Second tokens that mark a type declaration rather than a method.
const TYPE_KEYWORDS: &[&str] = &["class", "interface"];

/// A candidate brace-delimited span, before promotion to a `Method`.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Byte offset of the start of the line holding the opening brace.
    pub start: usize,
    /// Raw text from that line start through the closing brace inclusive.
    pub text: String,
}

/// Remove block and line comments.
///
/// Runs before normalization so a bare `{` line commented out, or a brace
/// inside a comment, never reaches the chunker.
pub fn strip_comments(source: &str) -> String {
    static BLOCK: OnceLock<Regex> = OnceLock::new();
    static LINE: OnceLock<Regex> = OnceLock::new();
    let block = BLOCK.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment regex"));
    let line = LINE.get_or_init(|| Regex::new(r"//.*?\n").expect("line comment regex"));

    let without_blocks = block.replace_all(source, "");
    line.replace_all(&without_blocks, "").into_owned()
}

/// Convert Allman brace placement to K&R.
///
/// Every line whose trimmed content is exactly `{` is merged onto the end of
/// the previous accumulated line, separated by one space. A file that opens
/// with a bare `{` has no predecessor; the line is kept as-is rather than
/// panicking.
pub fn allman_to_knr(source: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in source.lines() {
        if line.trim() == "{" {
            match out.iter_mut().rev().find(|l| !l.trim().is_empty()) {
                Some(prev) => {
                    let merged = format!("{} {{", prev.trim_end());
                    *prev = merged;
                }
                None => out.push(line.to_string()),
            }
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}

/// Extract method-candidate chunks from normalized source.
///
/// The guide (the sequence of `{`/`}` tokens with their offsets) comes from
/// the front end's token stream, not a raw character scan. Pairing is LIFO:
/// each `}` closes the nearest preceding unconsumed `{`, which always
/// resolves the innermost still-open block first. A chunk is kept only when
/// it has more than one whitespace token, starts with an access modifier,
/// and its second token is not a type keyword (methods and constructors
/// stay; class and interface declarations go). Everything else is dropped
/// silently.
///
/// Chunks are returned in discovery order (innermost-first); callers that
/// need source order re-sort by `start`.
pub fn chunk(contents: &str, front_end: &dyn LanguageFrontEnd) -> Result<Vec<Chunk>, ParseError> {
    let tokens = front_end.tokenize(contents)?;

    let mut open_offsets: Vec<usize> = Vec::new();
    let mut chunks = Vec::new();

    for token in tokens {
        match token.text.as_str() {
            "{" => open_offsets.push(token.start),
            "}" => {
                let open = open_offsets.pop().ok_or_else(|| ParseError::Malformed {
                    reason: format!("unmatched '}}' at byte {}", token.start),
                })?;
                let line_start = contents[..open].rfind('\n').map(|i| i + 1).unwrap_or(0);
                let text = &contents[line_start..=token.start];

                let mut words = text.split_whitespace();
                if let (Some(first), Some(second)) = (words.next(), words.next()) {
                    if MODIFIERS.contains(&first) && !TYPE_KEYWORDS.contains(&second) {
                        chunks.push(Chunk {
                            start: line_start,
                            text: text.to_string(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    if !open_offsets.is_empty() {
        return Err(ParseError::Malformed {
            reason: format!("{} unclosed '{{'", open_offsets.len()),
        });
    }

    Ok(chunks)
}
