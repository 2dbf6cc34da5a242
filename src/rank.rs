use std::fmt;

use serde::Serialize;

use crate::keywords::{keywords, KeywordSet};

/// Shown while no corpus has been built yet
pub const LOADING_MESSAGE: &str = "Loading content...";

/// Shown when a query has no meaningful words
pub const GUIDANCE_MESSAGE: &str = "Try asking about skills, education, or experience.";

/// Points for a keyword appearing anywhere in a sentence
const SUBSTRING_POINTS: u32 = 2;
/// Extra points when it also appears as a space-delimited word
const WORD_POINTS: u32 = 1;

/// A corpus sentence with its score for one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredSentence {
    pub sentence: String,
    pub score: u32,
    /// Index in the corpus
    pub position: usize,
}

/// Outcome of answering one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// No build has completed yet
    Loading,
    /// The query had no usable keywords
    Guidance,
    /// Best matching sentences joined by a space
    Found(String),
    /// Nothing in the corpus scored above zero
    NoMatch,
}

impl Answer {
    /// Text shown to the user; `NoMatch` is the empty string
    pub fn text(&self) -> &str {
        match self {
            Answer::Loading => LOADING_MESSAGE,
            Answer::Guidance => GUIDANCE_MESSAGE,
            Answer::Found(text) => text,
            Answer::NoMatch => "",
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Answer::Found(_))
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Score one sentence: +2 per keyword found as a substring, +1 more if it is
/// also surrounded by spaces
pub fn score_sentence(keywords: &KeywordSet, sentence: &str) -> u32 {
    let lower = sentence.to_lowercase();
    keywords
        .iter()
        .map(|word| {
            let mut score = 0;
            if lower.contains(word) {
                score += SUBSTRING_POINTS;
            }
            if lower.contains(&format!(" {} ", word)) {
                score += WORD_POINTS;
            }
            score
        })
        .sum()
}

/// Score every sentence and keep the positive ones, best first
///
/// Ties keep corpus order.
pub fn rank<S: AsRef<str>>(keywords: &KeywordSet, corpus: &[S]) -> Vec<ScoredSentence> {
    let mut scored: Vec<ScoredSentence> = corpus
        .iter()
        .enumerate()
        .map(|(position, sentence)| ScoredSentence {
            sentence: sentence.as_ref().to_string(),
            score: score_sentence(keywords, sentence.as_ref()),
            position,
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.retain(|s| s.score > 0);
    scored
}

/// Answer a query from a corpus
pub fn answer<S: AsRef<str>>(query: &str, corpus: &[S], ready: bool, max_sentences: usize) -> Answer {
    if !ready {
        return Answer::Loading;
    }

    let words = keywords(query);
    if words.is_empty() {
        return Answer::Guidance;
    }

    let best: Vec<String> = rank(&words, corpus)
        .into_iter()
        .take(max_sentences)
        .map(|s| s.sentence)
        .collect();

    if best.is_empty() {
        Answer::NoMatch
    } else {
        Answer::Found(best.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &[&str] = &[
        "I have 5 years of experience in backend systems.",
        "I enjoy hiking on weekends.",
    ];

    #[test]
    fn test_relevant_sentence_ranks_first() {
        let words = keywords("backend experience");
        let ranked = rank(&words, CORPUS);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].position, 0);
        assert!(ranked[0].score > 0);
        assert_eq!(score_sentence(&words, CORPUS[1]), 0);

        let answer = answer("backend experience", CORPUS, true, 2);
        assert_eq!(answer, Answer::Found(CORPUS[0].to_string()));
    }

    #[test]
    fn test_score_substring_and_word_bonus() {
        let words = keywords("backend");
        // substring + standalone word
        assert_eq!(score_sentence(&words, "Built backend services daily"), 3);
        // substring only: at the start of the sentence there is no leading space
        assert_eq!(score_sentence(&words, "Backend services built daily"), 2);
        // substring only: part of a longer word
        assert_eq!(score_sentence(&words, "Led the backends team"), 2);
        // trailing punctuation also blocks the word bonus
        assert_eq!(score_sentence(&words, "I work on the backend."), 2);
    }

    #[test]
    fn test_scores_accumulate_across_keywords() {
        let words = keywords("rust backend");
        assert_eq!(score_sentence(&words, "I write rust for the backend team"), 6);
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let corpus = [
            "Python is used for data tooling here.",
            "Rust is used for the backend services.",
            "Rust is also used for command line tools.",
        ];
        let ranked = rank(&keywords("rust"), &corpus);
        let positions: Vec<usize> = ranked.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn test_higher_score_wins_over_order() {
        let corpus = [
            "Some rust mentioned in passing somewhere.",
            "Rust backend work with rust everywhere, backend too.",
        ];
        let ranked = rank(&keywords("rust backend"), &corpus);
        assert_eq!(ranked[0].position, 1);
    }

    #[test]
    fn test_max_sentences_limits_answer() {
        let corpus = [
            "First sentence about rust programming.",
            "Second sentence about rust programming.",
            "Third sentence about rust programming.",
        ];
        let answer = answer("rust", &corpus, true, 2);
        assert_eq!(
            answer.text(),
            "First sentence about rust programming. Second sentence about rust programming."
        );
        let one = super::answer("rust", &corpus, true, 1);
        assert_eq!(one.text(), "First sentence about rust programming.");
    }

    #[test]
    fn test_not_ready_returns_loading() {
        for query in ["backend experience", "", "is the a", "???"] {
            let answer = answer(query, CORPUS, false, 2);
            assert_eq!(answer, Answer::Loading);
            assert_eq!(answer.text(), LOADING_MESSAGE);
        }
    }

    #[test]
    fn test_empty_query_returns_guidance() {
        let answer = answer("is the a", CORPUS, true, 2);
        assert_eq!(answer, Answer::Guidance);
        assert_eq!(answer.to_string(), GUIDANCE_MESSAGE);
    }

    #[test]
    fn test_no_match_is_empty_string() {
        let answer = answer("salary expectations", CORPUS, true, 2);
        assert_eq!(answer, Answer::NoMatch);
        assert_eq!(answer.text(), "");
        assert!(!answer.is_found());
    }

    #[test]
    fn test_empty_corpus() {
        let corpus: [&str; 0] = [];
        assert_eq!(answer("backend", &corpus, true, 2), Answer::NoMatch);
    }
}
