use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

// Pre-compiled regex for whitespace normalization (compile once, use many times)
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex pattern")
});

/// Collapse every whitespace run into a single space and trim both ends
pub fn normalize(content: &str) -> String {
    WHITESPACE_RE.replace_all(content, " ").trim().to_string()
}

/// Compute a SHA-256 fingerprint over an ordered list of sentences
///
/// Sentences are separated by a newline so `["ab", "c"]` and `["a", "bc"]` differ.
pub fn fingerprint<S: AsRef<str>>(sentences: &[S]) -> String {
    let mut hasher = Sha256::new();
    for sentence in sentences {
        hasher.update(sentence.as_ref().as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        let input = "  Hello   World\n\n\tTest  ";
        assert_eq!(normalize(input), "Hello World Test");
    }

    #[test]
    fn test_normalize_no_double_spaces() {
        let inputs = ["\n\n", "a\u{a0} \u{a0}b", "x\r\n\r\ny", "   lead", "trail\t\t"];
        for input in inputs {
            let result = normalize(input);
            assert!(!result.contains("  "), "double space in {:?}", result);
            assert_eq!(result, result.trim());
        }
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" x "), "x");
    }

    #[test]
    fn test_fingerprint() {
        let a = fingerprint(&["first sentence", "second"]);
        let b = fingerprint(&["first sentence", "second"]);
        let c = fingerprint(&["first", "sentence second"]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64); // SHA-256 produces 64 hex chars
    }
}
