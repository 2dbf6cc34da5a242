use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize;

/// Sentences must be strictly longer than this many characters
pub const MIN_SENTENCE_CHARS: usize = 20;

/// Bullet marker turned into a sentence break
const BULLET: char = '\u{2022}';

/// Semicolon boundary; the semicolon and surrounding whitespace are consumed
static SEMICOLON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*;\s*").expect("Invalid semicolon regex")
});

/// Terminal punctuation followed by whitespace; the punctuation stays with its sentence
static TERMINAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.?!]\s+").expect("Invalid terminal punctuation regex")
});

/// Split text into sentence-like units in order of appearance
///
/// Bullets become breaks, then the text is cut after `.`/`?`/`!` followed by
/// whitespace and at every semicolon. Pieces of 20 characters or fewer are
/// dropped.
pub fn segment(text: &str) -> Vec<String> {
    let text = normalize(text).replace(BULLET, ". ");

    let mut sentences = Vec::new();
    for clause in SEMICOLON_RE.split(&text) {
        let mut start = 0;
        for m in TERMINAL_RE.find_iter(clause) {
            // Punctuation is one ASCII byte, so m.start() + 1 is a char boundary
            push_sentence(&mut sentences, &clause[start..m.start() + 1]);
            start = m.end();
        }
        push_sentence(&mut sentences, &clause[start..]);
    }
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if piece.chars().count() > MIN_SENTENCE_CHARS {
        sentences.push(piece.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_punctuation_kept() {
        let text = "This is the very first sentence. Is this the second sentence here? \
                    What a third sentence this one is!";
        assert_eq!(
            segment(text),
            vec![
                "This is the very first sentence.",
                "Is this the second sentence here?",
                "What a third sentence this one is!",
            ]
        );
    }

    #[test]
    fn test_short_pieces_dropped() {
        let text = "Too short. Exactly twenty chars here. Hi!";
        // "Exactly twenty chars here." is 26 chars, the others are under the limit
        assert_eq!(segment(text), vec!["Exactly twenty chars here."]);
    }

    #[test]
    fn test_length_boundary() {
        let twenty = "a".repeat(20);
        let twenty_one = "b".repeat(21);
        let text = format!("{}. {}", twenty, twenty_one);
        // "aaaa...a." is 21 chars with its period, so it survives too
        assert_eq!(segment(&text), vec![format!("{}.", twenty), twenty_one]);

        assert!(segment(&"c".repeat(20)).is_empty());
    }

    #[test]
    fn test_semicolons_split_and_are_consumed() {
        let text = "Led the platform migration team ; mentored four junior engineers";
        assert_eq!(
            segment(text),
            vec!["Led the platform migration team", "mentored four junior engineers"]
        );
    }

    #[test]
    fn test_bullets_become_breaks() {
        // Normalization runs first, so the space before each bullet stays in place
        let text = "Skills \u{2022} Distributed systems design \u{2022} Rust and Go programming";
        assert_eq!(
            segment(text),
            vec!["Distributed systems design .", "Rust and Go programming"]
        );
    }

    #[test]
    fn test_no_split_without_following_whitespace() {
        let text = "Worked at example.com on the search team for years.";
        assert_eq!(segment(text), vec![text]);
    }

    #[test]
    fn test_whitespace_heavy_input() {
        let text = "\n\n   First   long sentence\tis here.\n\nSecond long sentence is here.  ";
        let sentences = segment(text);
        assert_eq!(
            sentences,
            vec!["First long sentence is here.", "Second long sentence is here."]
        );
        for sentence in &sentences {
            assert!(sentence.trim().chars().count() > MIN_SENTENCE_CHARS);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(segment("").is_empty());
        assert!(segment("   \n ").is_empty());
    }
}
