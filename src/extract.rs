use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::document::{HtmlDocument, MarkupDocument, RootKind};
use crate::normalize::normalize;

/// Elements that never contribute readable prose
pub const EXCLUDED_ELEMENTS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "img", "svg", "link", "noscript",
];

/// Domain marker identifying a professional-network profile link
pub const PROFILE_DOMAIN: &str = "linkedin.com";

const MAILTO_SCHEME: &str = "mailto:";
const TEL_SCHEME: &str = "tel:";

/// Optional leading +, then at least ten ASCII digits/spaces/hyphens starting and ending on a digit
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?[0-9][0-9\s\-]{8,}[0-9]").expect("Invalid phone regex")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("Invalid email regex")
});

/// Contact details found on a page. Empty strings mean "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    pub phone: String,
    pub email: String,
    pub profile_url: String,
}

impl ContactRecord {
    pub fn is_empty(&self) -> bool {
        self.phone.is_empty() && self.email.is_empty() && self.profile_url.is_empty()
    }
}

/// Result of extracting one page
#[derive(Debug, Clone)]
pub struct Extracted {
    /// Normalized prose text of the content root
    pub text: String,
    pub contact: ContactRecord,
    /// How the content root was resolved
    pub root: RootKind,
}

/// Extract readable text and contact details from HTML markup
pub fn extract(markup: &str, selector: &str) -> Extracted {
    let mut document = HtmlDocument::parse(markup);
    extract_document(&mut document, selector)
}

/// Extract from any markup document implementation
pub fn extract_document<D: MarkupDocument>(document: &mut D, selector: &str) -> Extracted {
    let root = document.select_root(selector);

    // Links are looked up across the whole document, before anything is stripped
    let profile_url = document
        .find_first_link(&|href: &str| href.contains(PROFILE_DOMAIN))
        .unwrap_or_default();
    let email_link = document
        .find_first_link(&|href: &str| strip_scheme(href, MAILTO_SCHEME).is_some())
        .and_then(|href| strip_scheme(&href, MAILTO_SCHEME).map(String::from))
        .filter(|email| !email.is_empty());
    let phone_link = document
        .find_first_link(&|href: &str| strip_scheme(href, TEL_SCHEME).is_some())
        .and_then(|href| strip_scheme(&href, TEL_SCHEME).map(String::from))
        .filter(|phone| !phone.is_empty());

    document.strip_elements(EXCLUDED_ELEMENTS);
    let text = normalize(&document.text());

    let phone = phone_link.unwrap_or_else(|| find_phone(&text).unwrap_or_default());
    let email = email_link.unwrap_or_else(|| find_email(&text).unwrap_or_default());

    debug!(
        ?root,
        chars = text.chars().count(),
        has_phone = !phone.is_empty(),
        has_email = !email.is_empty(),
        has_profile = !profile_url.is_empty(),
        "Extracted page content"
    );

    Extracted {
        text,
        contact: ContactRecord {
            phone,
            email,
            profile_url,
        },
        root,
    }
}

/// First phone-number-looking run in the text, normalized
pub fn find_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| normalize(m.as_str()))
}

/// First email-address-looking token in the text
pub fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// Strip a URI scheme prefix, matching it case-insensitively
fn strip_scheme<'a>(href: &'a str, scheme: &str) -> Option<&'a str> {
    let head = href.get(..scheme.len())?;
    if head.eq_ignore_ascii_case(scheme) {
        Some(&href[scheme.len()..])
    } else {
        None
    }
}
