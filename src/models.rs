//! Core data models
//!
//! `Method` is one extracted method body; `ClassModel` is the ordered
//! collection of methods carved out of one source file.

use std::path::{Path, PathBuf};

use crate::chunker::{allman_to_knr, chunk, strip_comments, Chunk};
use crate::errors::ParseError;
use crate::parsers::LanguageFrontEnd;

/// One extracted method: the raw text span (signature through closing
/// brace), its name, and its byte offset in the normalized source.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub text: String,
    pub start: usize,
}

impl Method {
    fn from_chunk(chunk: Chunk) -> Self {
        let head = match chunk.text.find('(') {
            Some(paren) => &chunk.text[..paren],
            None => chunk.text.as_str(),
        };
        let name = head
            .split_whitespace()
            .last()
            .unwrap_or_default()
            .to_string();
        Self {
            name,
            text: chunk.text,
            start: chunk.start,
        }
    }

    /// Token view of the method, computed on demand through the front end.
    pub fn tokens(&self, front_end: &dyn LanguageFrontEnd) -> Result<Vec<String>, ParseError> {
        Ok(front_end
            .tokenize(&self.text)?
            .into_iter()
            .map(|t| t.text)
            .collect())
    }

    /// Space-joined token sequence, the form training and analysis consume.
    pub fn token_string(&self, front_end: &dyn LanguageFrontEnd) -> Result<String, ParseError> {
        Ok(self.tokens(front_end)?.join(" "))
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// All methods extracted from one source file, in source order.
#[derive(Debug, Clone)]
pub struct ClassModel {
    pub path: PathBuf,
    pub methods: Vec<Method>,
    pub method_names: Vec<String>,
}

impl ClassModel {
    /// Read, normalize, and chunk one file.
    pub fn from_path(path: &Path, front_end: &dyn LanguageFrontEnd) -> Result<Self, ParseError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(&raw, path, front_end)
    }

    /// Normalize and chunk source text directly (useful for testing).
    pub fn from_source(
        raw: &str,
        path: &Path,
        front_end: &dyn LanguageFrontEnd,
    ) -> Result<Self, ParseError> {
        let stripped = strip_comments(raw);
        let normalized = allman_to_knr(&stripped);

        let mut methods: Vec<Method> = chunk(&normalized, front_end)?
            .into_iter()
            .map(Method::from_chunk)
            .collect();

        // The chunker discovers innermost-first; downstream consumers expect
        // source order.
        methods.sort_by_key(|m| m.start);

        // Enforce non-overlapping spans: a candidate starting inside an
        // already accepted method (e.g. a method of an anonymous class) is
        // dropped.
        let mut flat: Vec<Method> = Vec::with_capacity(methods.len());
        for method in methods {
            match flat.last() {
                Some(prev) if method.start < prev.end() => {}
                _ => flat.push(method),
            }
        }

        let method_names = flat.iter().map(|m| m.name.clone()).collect();
        Ok(Self {
            path: path.to_path_buf(),
            methods: flat,
            method_names,
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Method> {
        self.methods.iter()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<'a> IntoIterator for &'a ClassModel {
    type Item = &'a Method;
    type IntoIter = std::slice::Iter<'a, Method>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::JavaFrontEnd;

    const SOURCE: &str = "\
public class Sample
{
    public void first()
    {
        if (ready)
        {
            go();
        }
    }

    private int second(int a, int b)
    {
        return a + b;
    }

    protected String third()
    {
        return \"{}\";
    }
}
";

    fn model(source: &str) -> ClassModel {
        ClassModel::from_source(source, Path::new("Sample.java"), &JavaFrontEnd).unwrap()
    }

    #[test]
    fn test_methods_in_source_order() {
        let model = model(SOURCE);
        assert_eq!(model.method_names, vec!["first", "second", "third"]);
        for pair in model.methods.windows(2) {
            assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn test_exact_method_count_with_nested_blocks() {
        // 3 access-qualified methods, 1 nested control block: exactly 3.
        let model = model(SOURCE);
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_spans_do_not_overlap() {
        let model = model(SOURCE);
        for pair in model.methods.windows(2) {
            assert!(pair[0].end() <= pair[1].start);
        }
    }

    #[test]
    fn test_method_name_is_last_identifier_before_paren() {
        let model = model(SOURCE);
        assert_eq!(model.methods[1].name, "second");
    }

    #[test]
    fn test_anonymous_class_method_folded_into_enclosing() {
        let source = "\
public class Sample {
    public void launch() {
        run(new Runnable() {
            public void run() {
                work();
            }
        });
    }
}
";
        let model = ClassModel::from_source(source, Path::new("Sample.java"), &JavaFrontEnd)
            .unwrap();
        assert_eq!(model.method_names, vec!["launch"]);
    }

    #[test]
    fn test_token_round_trip() {
        let model = model(SOURCE);
        for method in &model {
            let tokens = method.tokens(&JavaFrontEnd).unwrap();
            let rejoined = tokens.join(" ");
            let again = JavaFrontEnd
                .tokenize(&rejoined)
                .unwrap()
                .into_iter()
                .map(|t| t.text)
                .collect::<Vec<_>>();
            assert_eq!(tokens, again);
        }
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = ClassModel::from_path(Path::new("/nonexistent/Nope.java"), &JavaFrontEnd)
            .unwrap_err();
        assert!(matches!(err, ParseError::Read { .. }));
    }
}
