//! Read-only page handle
//!
//! `PageHandle` owns a parsed document and its URL for the duration of one
//! extraction call. Probe evaluation only sees it through `PageQuery`.

use super::locator::Locator;
use scraper::{ElementRef, Html, Node};
use std::borrow::Cow;

/// A region or value produced by resolving a locator
#[derive(Debug, Clone)]
pub enum Located<'a> {
    Element(ElementRef<'a>),
    Text(Cow<'a, str>),
}

impl<'a> Located<'a> {
    /// Rendered text content; script and style bodies are left out
    pub fn text(&self) -> Cow<'a, str> {
        match self {
            Self::Element(element) => Cow::Owned(element_text(*element)),
            Self::Text(text) => text.clone(),
        }
    }

    pub const fn element(&self) -> Option<ElementRef<'a>> {
        match self {
            Self::Element(element) => Some(*element),
            Self::Text(_) => None,
        }
    }
}

/// Elements whose text is never content
pub const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Concatenated text of every descendant text node outside non-content elements
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => {
                let hidden = node
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .any(|ancestor| NON_CONTENT_TAGS.contains(&ancestor.value().name()));
                (!hidden).then_some(&**text)
            }
            _ => None,
        })
        .collect()
}

/// Read access to a document for probe evaluation
pub trait PageQuery {
    /// Page URL used for platform detection
    fn url(&self) -> &str;

    /// Resolve a locator; an empty result means the target is absent
    fn locate(&self, locator: &Locator) -> Vec<Located<'_>>;
}

/// Parsed page and its URL
pub struct PageHandle {
    url: String,
    document: Html,
}

impl PageHandle {
    /// Parse raw HTML for `url`
    pub fn parse(url: impl Into<String>, html: &str) -> Self {
        Self::from_document(url, Html::parse_document(html))
    }

    pub fn from_document(url: impl Into<String>, document: Html) -> Self {
        Self {
            url: url.into(),
            document,
        }
    }

    pub const fn document(&self) -> &Html {
        &self.document
    }
}

impl PageQuery for PageHandle {
    fn url(&self) -> &str {
        &self.url
    }

    fn locate(&self, locator: &Locator) -> Vec<Located<'_>> {
        locator.resolve(&self.document)
    }
}

impl std::fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageHandle")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}
