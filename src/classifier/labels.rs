//! Label extraction from method naming convention
//!
//! Corpus methods carry their ground truth in their identifiers: "good"
//! marks a benign variant, "bad" a vulnerable one. The marker is replaced
//! with a random fixed-length token before the sequence is recorded, so the
//! literal words never appear in model input.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Binary polarity of a labeled method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Benign,
    Vulnerable,
}

impl Label {
    /// CSV representation: 0 = benign, 1 = vulnerable.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Benign => "0",
            Label::Vulnerable => "1",
        }
    }

    /// GBDT target using the LogLikelyhood convention:
    /// 1.0 = vulnerable, -1.0 = benign.
    pub fn as_target(&self) -> f64 {
        match self {
            Label::Benign => -1.0,
            Label::Vulnerable => 1.0,
        }
    }
}

/// One training row: anonymized token sequence and its polarity.
#[derive(Debug, Clone)]
pub struct LabeledExample {
    pub input: String,
    pub label: Label,
}

/// Generates the random replacement tokens for label markers.
///
/// Seedable so tests and reproducible training runs can pin the stream.
pub struct Anonymizer {
    token_len: usize,
    rng: StdRng,
}

/// Uppercase letters and digits, matching the marker replacement alphabet.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

impl Anonymizer {
    pub fn new(token_len: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { token_len, rng }
    }

    /// A fresh random token.
    pub fn token(&mut self) -> String {
        (0..self.token_len)
            .map(|_| CHARSET[self.rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }
}

/// Derive a label for one method from its token sequence.
///
/// The sequence is split at the first `(`: the prefix holds modifiers,
/// return type, and name. Markers match case-insensitively ("goodG2B" and
/// "isGoodCase" both count); "good" wins over "bad"; a method containing
/// neither (or no parameter list at all) is excluded from training. Every
/// occurrence of the matched marker in the prefix is replaced by one fresh
/// random token.
pub fn label_method(token_string: &str, anonymizer: &mut Anonymizer) -> Option<LabeledExample> {
    let (head, tail) = token_string.split_once('(')?;
    let folded = head.to_ascii_lowercase();

    let (marker, label) = if folded.contains("good") {
        ("good", Label::Benign)
    } else if folded.contains("bad") {
        ("bad", Label::Vulnerable)
    } else {
        return None;
    };

    let replacement = anonymizer.token();
    let input = format!(
        "{}({}",
        replace_case_insensitive(head, marker, &replacement),
        tail
    );
    Some(LabeledExample { input, label })
}

/// Replace every case-insensitive occurrence of `marker` in `haystack`.
///
/// Markers are plain ASCII, so folding is byte-preserving and offsets into
/// the folded copy index the original directly.
fn replace_case_insensitive(haystack: &str, marker: &str, replacement: &str) -> String {
    let folded = haystack.to_ascii_lowercase();
    let mut out = String::with_capacity(haystack.len());
    let mut pos = 0;
    while let Some(found) = folded[pos..].find(marker) {
        let at = pos + found;
        out.push_str(&haystack[pos..at]);
        out.push_str(replacement);
        pos = at + marker.len();
    }
    out.push_str(&haystack[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anon() -> Anonymizer {
        Anonymizer::new(7, Some(42))
    }

    #[test]
    fn test_good_method_labeled_benign() {
        let row = label_method("public void isGoodCase ( ) { }", &mut anon()).unwrap();
        assert_eq!(row.label, Label::Benign);
        assert!(!row.input.to_ascii_lowercase().contains("good"));
    }

    #[test]
    fn test_bad_method_labeled_vulnerable() {
        let row = label_method("public void isBadCase ( ) { }", &mut anon()).unwrap();
        assert_eq!(row.label, Label::Vulnerable);
        assert!(!row.input.to_ascii_lowercase().contains("bad"));
    }

    #[test]
    fn test_neutral_method_excluded() {
        assert!(label_method("public void isNeutralCase ( ) { }", &mut anon()).is_none());
    }

    #[test]
    fn test_good_wins_over_bad() {
        let row = label_method("public void goodbad ( ) { }", &mut anon()).unwrap();
        assert_eq!(row.label, Label::Benign);
        // Only the "good" substring is replaced; "bad" survives verbatim.
        assert!(row.input.contains("bad"));
    }

    #[test]
    fn test_marker_in_body_does_not_label() {
        // Only the prefix before the first '(' is inspected.
        assert!(label_method("public void run ( ) { bad ( ) ; }", &mut anon()).is_none());
    }

    #[test]
    fn test_no_paren_excluded() {
        assert!(label_method("public int goodValue", &mut anon()).is_none());
    }

    #[test]
    fn test_body_preserved_after_substitution() {
        let row = label_method("public void badSink ( String s ) { exec ( s ) ; }", &mut anon())
            .unwrap();
        assert!(row.input.ends_with("( String s ) { exec ( s ) ; }"));
    }

    #[test]
    fn test_replacement_token_shape() {
        let mut anonymizer = anon();
        for _ in 0..100 {
            let token = anonymizer.token();
            assert_eq!(token.len(), 7);
            assert!(token
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_replacement_never_reintroduces_marker() {
        // Probabilistic property: across 10k draws the replacement token
        // never contains "good" or "bad" in any case.
        let mut anonymizer = Anonymizer::new(7, Some(7));
        for _ in 0..10_000 {
            let token = anonymizer.token().to_lowercase();
            assert!(!token.contains("good"));
            assert!(!token.contains("bad"));
        }
    }

    #[test]
    fn test_seeded_streams_are_reproducible() {
        let a: Vec<String> = {
            let mut x = Anonymizer::new(7, Some(9));
            (0..5).map(|_| x.token()).collect()
        };
        let b: Vec<String> = {
            let mut x = Anonymizer::new(7, Some(9));
            (0..5).map(|_| x.token()).collect()
        };
        assert_eq!(a, b);
    }
}
