//! Java front end using tree-sitter
//!
//! The parse tree is used purely as a lexer: its leaves, in document order,
//! are the token stream. String and character literals are emitted as one
//! token each (so a `{` inside a literal never looks like a brace), and
//! comment nodes are dropped.

use tree_sitter::{Node, Parser};

use crate::errors::ParseError;
use crate::parsers::{LanguageFrontEnd, Token};

/// Node kinds emitted as a single token without descending into children.
const ATOMIC_KINDS: &[&str] = &["string_literal", "character_literal"];

/// Node kinds that never produce tokens.
const COMMENT_KINDS: &[&str] = &["line_comment", "block_comment"];

pub struct JavaFrontEnd;

impl LanguageFrontEnd for JavaFrontEnd {
    fn language(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["java"]
    }

    fn tokenize(&self, source: &str) -> Result<Vec<Token>, ParseError> {
        let mut parser = Parser::new();
        let language = tree_sitter_java::LANGUAGE;
        parser
            .set_language(&language.into())
            .map_err(|e| ParseError::Lex {
                reason: format!("failed to set Java grammar: {e}"),
            })?;

        let tree = parser.parse(source, None).ok_or_else(|| ParseError::Lex {
            reason: "tree-sitter produced no parse tree".to_string(),
        })?;

        let mut tokens = Vec::new();
        collect_tokens(&tree.root_node(), source.as_bytes(), &mut tokens);
        Ok(tokens)
    }
}

/// Walk the tree in document order, pushing leaf texts as tokens.
///
/// Error-recovery nodes are traversed like any other, so token soup inside
/// an ERROR subtree still lexes; a chunk does not need to be a complete
/// compilation unit to be tokenizable.
fn collect_tokens(node: &Node, source: &[u8], out: &mut Vec<Token>) {
    let kind = node.kind();
    if COMMENT_KINDS.contains(&kind) {
        return;
    }

    if node.child_count() == 0 || ATOMIC_KINDS.contains(&kind) {
        if let Ok(text) = node.utf8_text(source) {
            // Zero-width "missing" leaves inserted by error recovery.
            if !text.is_empty() {
                out.push(Token {
                    text: text.to_string(),
                    start: node.start_byte(),
                });
            }
        }
        return;
    }

    for child in node.children(&mut node.walk()) {
        collect_tokens(&child, source, out);
    }
}
