//! Markup document capability used by the content extractor
//!
//! The extractor only needs four things from a parsed page: pick a content
//! root, find links anywhere in the page, drop non-content elements under the
//! root, and read the root's text. [`MarkupDocument`] captures exactly that so
//! the extraction rules do not depend on a particular HTML parser.
//! [`HtmlDocument`] is the `scraper`-backed implementation.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Node, Selector};
use tracing::warn;

/// Which element ended up as the content root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// The caller's selector matched
    Selected,
    /// Selector missed; fell back to `<body>`
    Body,
    /// No body either; the whole parsed document is the root
    Document,
}

pub trait MarkupDocument {
    /// Resolve the content root for subsequent `strip_elements` / `text` calls
    fn select_root(&mut self, selector: &str) -> RootKind;

    /// First link target (raw `href`) anywhere in the document accepted by `predicate`
    fn find_first_link(&self, predicate: &dyn Fn(&str) -> bool) -> Option<String>;

    /// Remove every element with one of these tag names from the root
    fn strip_elements(&mut self, tags: &[&str]);

    /// Plain text of the root, with block boundaries rendered as spaces
    fn text(&self) -> String;
}

/// Elements that start a new line when a browser renders text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "details", "dialog", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
    "li", "main", "ol", "p", "pre", "section", "summary", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr", "ul",
];

/// HTML document parsed with `scraper`
///
/// Stripping is recorded as a tag set and applied while walking the root, so
/// link lookups always see the complete document.
pub struct HtmlDocument {
    html: Html,
    root: Option<Selector>,
    stripped: HashSet<String>,
}

impl HtmlDocument {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
            root: None,
            stripped: HashSet::new(),
        }
    }

    fn root_element(&self) -> ElementRef<'_> {
        self.root
            .as_ref()
            .and_then(|selector| self.html.select(selector).next())
            .unwrap_or_else(|| self.html.root_element())
    }

    fn first_match(&self, selector_str: &str) -> Option<Selector> {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(e) => {
                warn!(selector = selector_str, "Invalid selector, using fallback root: {:?}", e);
                return None;
            }
        };
        self.html.select(&selector).next().map(|_| selector)
    }

    fn collect_text(&self, element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => {
                    let name = el.name();
                    if self.stripped.contains(name) {
                        continue;
                    }
                    let Some(child_el) = ElementRef::wrap(child) else {
                        continue;
                    };
                    let block = BLOCK_ELEMENTS.contains(&name);
                    if block {
                        out.push(' ');
                    }
                    self.collect_text(child_el, out);
                    if block {
                        out.push(' ');
                    }
                }
                _ => {}
            }
        }
    }
}

impl MarkupDocument for HtmlDocument {
    fn select_root(&mut self, selector: &str) -> RootKind {
        if let Some(selector) = self.first_match(selector) {
            self.root = Some(selector);
            return RootKind::Selected;
        }
        if let Some(body) = self.first_match("body") {
            self.root = Some(body);
            return RootKind::Body;
        }
        self.root = None;
        RootKind::Document
    }

    fn find_first_link(&self, predicate: &dyn Fn(&str) -> bool) -> Option<String> {
        let link_selector = Selector::parse("a[href]").ok()?;
        self.html
            .select(&link_selector)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| predicate(href))
            .map(String::from)
    }

    fn strip_elements(&mut self, tags: &[&str]) {
        self.stripped
            .extend(tags.iter().map(|t| t.to_ascii_lowercase()));
    }

    fn text(&self) -> String {
        // Only descendants are stripped; a root that is itself e.g. <header> keeps its text
        let mut out = String::new();
        self.collect_text(self.root_element(), &mut out);
        out
    }
}
