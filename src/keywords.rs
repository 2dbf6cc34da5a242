use std::collections::BTreeSet;

/// Words that never carry meaning on their own
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "to", "of", "in", "on", "for", "with", "is", "are", "was",
];

/// Keywords must be strictly longer than this many characters
const MIN_KEYWORD_CHARS: usize = 2;

/// Meaningful lowercase tokens from one query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Reduce a query to its keyword set
///
/// Lowercases, blanks out everything except `a-z`, digits, whitespace and
/// hyphens, then keeps tokens longer than two characters that are not stop
/// words. Duplicate words collapse into one keyword.
pub fn keywords(query: &str) -> KeywordSet {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect();

    KeywordSet(
        cleaned
            .split_whitespace()
            .filter(|w| w.chars().count() > MIN_KEYWORD_CHARS && !STOP_WORDS.contains(w))
            .map(String::from)
            .collect(),
    )
}
