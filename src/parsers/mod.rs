//! Language front ends
//!
//! A front end turns a source string into an ordered token stream for one
//! language. The rest of the pipeline (chunking, labeling, embedding) is
//! language-agnostic and only talks to the `LanguageFrontEnd` trait; adding
//! a language means adding one implementation and registering its extension.

mod java;

pub use java::JavaFrontEnd;

use crate::errors::ParseError;

/// One lexical token with its byte offset in the source it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
}

/// A language-specific lexer.
pub trait LanguageFrontEnd: Send + Sync {
    /// Lowercase language name, used for data directory layout (`data/java/...`).
    fn language(&self) -> &'static str;

    /// File extensions (without the dot) this front end claims.
    fn extensions(&self) -> &'static [&'static str];

    /// Lex `source` into an ordered token stream.
    ///
    /// String and character literals are single atomic tokens; comments are
    /// not tokens at all. Offsets index into `source`.
    fn tokenize(&self, source: &str) -> Result<Vec<Token>, ParseError>;
}

static JAVA: JavaFrontEnd = JavaFrontEnd;

static REGISTRY: [&dyn LanguageFrontEnd; 1] = [&JAVA];

/// All registered front ends.
pub fn front_ends() -> &'static [&'static dyn LanguageFrontEnd] {
    &REGISTRY
}

/// Look up a front end by file extension (without the dot).
pub fn for_extension(ext: &str) -> Option<&'static dyn LanguageFrontEnd> {
    front_ends()
        .iter()
        .copied()
        .find(|fe| fe.extensions().contains(&ext))
}

/// Look up a front end by language name.
pub fn for_language(language: &str) -> Option<&'static dyn LanguageFrontEnd> {
    front_ends()
        .iter()
        .copied()
        .find(|fe| fe.language() == language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_by_extension() {
        assert!(for_extension("java").is_some());
        assert!(for_extension("py").is_none());
        assert!(for_extension("").is_none());
    }

    #[test]
    fn test_registry_by_language() {
        assert_eq!(for_language("java").unwrap().language(), "java");
        assert!(for_language("cobol").is_none());
    }
}
