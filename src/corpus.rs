//! Corpus building and the question-answering engine
//!
//! [`PageChat`] owns the sentence corpus, the ready flag and the latest
//! contact record. A build prepares a complete [`Snapshot`] off to the side
//! and swaps it in with a single assignment, so queries running during a
//! rebuild keep answering from the previous corpus. A failed build changes
//! nothing. In particular `ready` never goes back to `false` once a build
//! has succeeded.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Config, DEFAULT_MAX_SENTENCES};
use crate::error::{PageChatError, Result};
use crate::extract::{extract, ContactRecord, Extracted};
use crate::fetch::Retriever;
use crate::keywords::keywords;
use crate::normalize::fingerprint;
use crate::rank::{self, Answer, ScoredSentence};
use crate::segment::segment;

/// Everything a query can observe, replaced as a whole on each successful build
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub sentences: Vec<String>,
    pub contact: ContactRecord,
    pub ready: bool,
}

/// Lifecycle of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing built yet
    Uninitialized,
    /// First build in flight
    Building,
    /// A corpus is available
    Ready,
    /// A corpus is available and a newer one is being built
    Rebuilding,
}

/// Summary of a committed build
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub sources: usize,
    pub sentences: usize,
    /// SHA-256 of the committed corpus; equal across rebuilds of unchanged content
    pub fingerprint: String,
}

pub struct PageChat {
    snapshot: RwLock<Arc<Snapshot>>,
    in_flight: AtomicUsize,
    max_sentences: usize,
}

impl Default for PageChat {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SENTENCES)
    }
}

/// Marks a build as in flight until dropped
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PageChat {
    pub fn new(max_sentences: usize) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            in_flight: AtomicUsize::new(0),
            max_sentences: max_sentences.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_sentences)
    }

    /// Fetch every source, extract and segment them, then commit the new corpus
    ///
    /// Sources are retrieved concurrently but joined in the order given. If any
    /// source fails the build is abandoned and the current corpus stays as is.
    pub fn build<S: AsRef<str>>(
        &self,
        sources: &[S],
        selector: &str,
        retriever: &dyn Retriever,
    ) -> Result<BuildReport> {
        let _guard = InFlight::start(&self.in_flight);
        let sources: Vec<&str> = sources.iter().map(AsRef::as_ref).collect();

        let results: Vec<Result<Extracted>> = thread::scope(|scope| {
            let handles: Vec<_> = sources
                .iter()
                .map(|&source| {
                    let handle = scope.spawn(move || -> Result<Extracted> {
                        let markup = retriever.retrieve(source)?;
                        Ok(extract(&markup, selector))
                    });
                    (source, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(source, handle)| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(PageChatError::retrieval(source, "fetch thread panicked")))
                })
                .collect()
        });

        let extracted = match results.into_iter().collect::<Result<Vec<_>>>() {
            Ok(extracted) => extracted,
            Err(e) => {
                warn!(error = %e, sources = sources.len(), "Corpus build aborted, keeping previous corpus");
                return Err(e);
            }
        };

        Ok(self.commit(extracted))
    }

    /// Build from markup the caller already holds
    pub fn build_from_markup<S: AsRef<str>>(&self, pages: &[S], selector: &str) -> BuildReport {
        let _guard = InFlight::start(&self.in_flight);
        let extracted = pages
            .iter()
            .map(|page| extract(page.as_ref(), selector))
            .collect();
        self.commit(extracted)
    }

    fn commit(&self, extracted: Vec<Extracted>) -> BuildReport {
        let sources = extracted.len();
        let mut contact = ContactRecord::default();
        let mut texts = Vec::with_capacity(sources);
        for page in extracted {
            // Last source wins; records are not merged
            contact = page.contact;
            texts.push(page.text);
        }

        let sentences = segment(&texts.join(" "));
        let report = BuildReport {
            sources,
            sentences: sentences.len(),
            fingerprint: fingerprint(&sentences),
        };

        let next = Arc::new(Snapshot {
            sentences,
            contact,
            ready: true,
        });
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = next;

        info!(
            sources = report.sources,
            sentences = report.sentences,
            fingerprint = &report.fingerprint[..16],
            "Corpus built"
        );
        report
    }

    /// The currently committed state
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot().ready
    }

    pub fn state(&self) -> EngineState {
        let building = self.in_flight.load(Ordering::SeqCst) > 0;
        match (self.is_ready(), building) {
            (false, false) => EngineState::Uninitialized,
            (false, true) => EngineState::Building,
            (true, false) => EngineState::Ready,
            (true, true) => EngineState::Rebuilding,
        }
    }

    pub fn sentences(&self) -> Vec<String> {
        self.snapshot().sentences.clone()
    }

    pub fn contact(&self) -> ContactRecord {
        self.snapshot().contact.clone()
    }

    pub fn max_sentences(&self) -> usize {
        self.max_sentences
    }

    /// Answer with an explicit sentence limit
    pub fn answer(&self, query: &str, max_sentences: usize) -> Answer {
        let snapshot = self.snapshot();
        rank::answer(query, &snapshot.sentences, snapshot.ready, max_sentences)
    }

    /// Answer using the engine's configured sentence limit
    pub fn answer_text(&self, query: &str) -> String {
        self.answer(query, self.max_sentences).to_string()
    }

    /// Scored sentences for a query, best first; empty when not ready
    pub fn rank(&self, query: &str) -> Vec<ScoredSentence> {
        let snapshot = self.snapshot();
        if !snapshot.ready {
            return Vec::new();
        }
        rank::rank(&keywords(query), &snapshot.sentences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <nav>Home About Contact</nav>
        <main>
            <p>I have 5 years of experience in backend systems.</p>
            <p>I enjoy hiking on weekends.</p>
            <p>Studied computer science at the state university.</p>
        </main>
        <a href="mailto:dev@example.com">Email</a>
    </body></html>"#;

    #[test]
    fn test_new_engine_is_uninitialized() {
        let engine = PageChat::default();
        assert_eq!(engine.state(), EngineState::Uninitialized);
        assert!(!engine.is_ready());
        assert!(engine.sentences().is_empty());
        assert_eq!(engine.answer_text("backend"), rank::LOADING_MESSAGE);
        assert!(engine.rank("backend").is_empty());
    }

    #[test]
    fn test_build_from_markup() {
        let engine = PageChat::default();
        let report = engine.build_from_markup(&[PAGE], "main");

        assert_eq!(report.sources, 1);
        assert_eq!(report.sentences, 3);
        assert_eq!(engine.state(), EngineState::Ready);
        assert_eq!(engine.contact().email, "dev@example.com");
        assert_eq!(
            engine.answer_text("backend experience"),
            "I have 5 years of experience in backend systems."
        );
    }

    #[test]
    fn test_build_joins_sources_in_order() {
        let engine = PageChat::default();
        let retriever = |source: &str| -> Result<String> {
            Ok(format!("<main><p>This is the page called {}.</p></main>", source))
        };
        let report = engine.build(&["alpha", "beta", "gamma"], "main", &retriever).unwrap();

        assert_eq!(report.sources, 3);
        assert_eq!(
            engine.sentences(),
            vec![
                "This is the page called alpha.",
                "This is the page called beta.",
                "This is the page called gamma.",
            ]
        );
    }

    #[test]
    fn test_last_source_contact_wins() {
        let engine = PageChat::default();
        let retriever = |source: &str| -> Result<String> {
            Ok(match source {
                "first" => r#"<a href="tel:111-111-1111">Call</a><a href="mailto:a@x.com">m</a>"#.to_string(),
                _ => r#"<a href="tel:222-222-2222">Call</a>"#.to_string(),
            })
        };
        engine.build(&["first", "second"], "main", &retriever).unwrap();

        let contact = engine.contact();
        assert_eq!(contact.phone, "222-222-2222");
        assert_eq!(contact.email, "");
    }

    #[test]
    fn test_failed_first_build_stays_unready() {
        let engine = PageChat::default();
        let retriever = |_: &str| -> Result<String> { Err(PageChatError::retrieval("x", "HTTP status 500")) };
        let err = engine.build(&["x"], "main", &retriever).unwrap_err();

        assert!(err.is_retrieval());
        assert_eq!(engine.state(), EngineState::Uninitialized);
        assert_eq!(engine.answer_text("anything"), rank::LOADING_MESSAGE);
    }

    #[test]
    fn test_empty_source_list_commits_empty_corpus() {
        let engine = PageChat::default();
        let sources: [&str; 0] = [];
        let report = engine.build(&sources, "main", &|_: &str| -> Result<String> { Ok(String::new()) }).unwrap();
        assert_eq!(report.sentences, 0);
        assert!(engine.is_ready());
        assert_eq!(engine.answer("backend", 2), Answer::NoMatch);
    }

    #[test]
    fn test_engine_clamps_max_sentences() {
        assert_eq!(PageChat::new(0).max_sentences(), 1);
        assert_eq!(PageChat::from_config(&Config::default()).max_sentences(), 2);
    }
}
