// SPDX-License-Identifier: PMPL-1.0-or-later
//! Document adapter.
//!
//! Every entry point accepts either raw HTML or an already parsed
//! [`Document`]. Strings are parsed on every call; a `Document` is borrowed
//! as-is. Whether a string is a full document is decided on the parsed tree
//! and on the tags outside comments and raw-text elements.

use crate::error::{Error, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

/// Comments and raw-text element bodies, which may mention tags without
/// containing them. Unterminated ones run to the end of the input.
static MARKUP_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<!--.*?(?:-->|\z)|<script\b.*?(?:</script\s*>|\z)|<style\b.*?(?:</style\s*>|\z)|<textarea\b.*?(?:</textarea\s*>|\z)|<title\b.*?(?:</title\s*>|\z)|<xmp\b.*?(?:</xmp\s*>|\z)",
    )
    .expect("valid regex")
});

/// Start tag of an element only a full document has
static DOCUMENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:html|head|body)[\s/>]").expect("valid regex"));

/// A doctype in the parsed tree, or an `<html>`, `<head>` or `<body>` tag
/// in the markup proper, makes the input a full document.
fn is_full_document(input: &str, parsed: &Html) -> bool {
    parsed.tree.root().children().any(|node| node.value().is_doctype())
        || DOCUMENT_TAG.is_match(&MARKUP_NOISE.replace_all(input, ""))
}

/// Parser behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject input for which the parser reported any recoverable error
    pub strict: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// A parsed HTML tree, read-only once built
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
    fragment: bool,
}

impl Document {
    /// Parse tolerantly. Never fails: malformed markup is repaired by the parser.
    pub fn parse(input: &str) -> Self {
        let document = Html::parse_document(input);
        let fragment = !is_full_document(input, &document);
        let html = if fragment {
            Html::parse_fragment(input)
        } else {
            document
        };
        debug!(
            fragment,
            parse_errors = html.errors.len(),
            "parsed {} bytes of HTML",
            input.len()
        );
        Self { html, fragment }
    }

    /// Parse with explicit options
    pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Self> {
        let document = Self::parse(input);
        if options.strict && !document.html.errors.is_empty() {
            let messages: Vec<&str> = document.html.errors.iter().map(|e| e.as_ref()).collect();
            return Err(Error::Parse(messages.join("; ")));
        }
        Ok(document)
    }

    /// Whether the input was parsed as a fragment (no implied html/head/body)
    pub fn is_fragment(&self) -> bool {
        self.fragment
    }

    /// Recoverable errors the parser reported while repairing the input
    pub fn parse_errors(&self) -> impl Iterator<Item = &str> {
        self.html.errors.iter().map(|e| e.as_ref())
    }

    /// The underlying scraper tree
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// All elements matching `selector`, in document order
    pub fn select<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.html.select(selector).collect()
    }

    /// First element whose `id` attribute equals `id`
    pub fn element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse("[id]").expect("valid selector");
        self.html
            .select(&selector)
            .find(|el| el.value().attr("id") == Some(id))
    }

    /// Whether any element in the document matches `selector`
    pub fn contains(&self, selector: &str) -> bool {
        Selector::parse(selector)
            .map(|sel| self.html.select(&sel).next().is_some())
            .unwrap_or(false)
    }
}

/// Anything an assertion can be run against
pub trait DocumentSource {
    /// Produce a document, parsing only when needed
    fn to_document(&self, options: &ParseOptions) -> Result<Cow<'_, Document>>;
}

impl DocumentSource for str {
    fn to_document(&self, options: &ParseOptions) -> Result<Cow<'_, Document>> {
        Document::parse_with(self, options).map(Cow::Owned)
    }
}

impl DocumentSource for String {
    fn to_document(&self, options: &ParseOptions) -> Result<Cow<'_, Document>> {
        self.as_str().to_document(options)
    }
}

impl DocumentSource for Document {
    fn to_document(&self, _options: &ParseOptions) -> Result<Cow<'_, Document>> {
        Ok(Cow::Borrowed(self))
    }
}

/// Normalize `input` into a document using tolerant parsing
pub fn ensure_document<S: DocumentSource + ?Sized>(input: &S) -> Result<Cow<'_, Document>> {
    input.to_document(&ParseOptions::default())
}
