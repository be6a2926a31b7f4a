//! HTML loading and top-level node classification.
//!
//! The document is parsed with `scraper` (html5ever underneath), which always
//! produces a full `<html>`/`<body>` skeleton, even for fragments. Only the
//! direct children of the traversal root are ever looked at: the first
//! `<article>` if the document has one, otherwise `<body>`. Elements keep
//! their XHTML serialization so chapter documents stay well-formed XML.

use crate::xhtml;
use anyhow::{anyhow, Context, Result};
use scraper::{ElementRef, Html};
use std::path::Path;

/// Tags that start a new chapter.
const CHAPTER_HEADINGS: [&str; 2] = ["h1", "h2"];

/// A direct child of the traversal root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// A tagged element.
    Element {
        /// Lower-case tag name
        tag: String,
        /// Tag-inclusive serialized form, as XHTML
        html: String,
        /// Text content with all tags stripped
        text: String,
    },
    /// Anything without a tag name: text, whitespace, comments, doctypes.
    Text,
}

impl ContentNode {
    /// Returns the heading text if this node is a chapter boundary.
    pub fn heading_title(&self) -> Option<&str> {
        match self {
            ContentNode::Element { tag, text, .. } if CHAPTER_HEADINGS.contains(&tag.as_str()) => {
                Some(text.as_str())
            }
            _ => None,
        }
    }

    /// Returns the serialized form of tagged elements.
    pub fn html(&self) -> Option<&str> {
        match self {
            ContentNode::Element { html, .. } => Some(html.as_str()),
            ContentNode::Text => None,
        }
    }

    fn from_element(element: ElementRef<'_>) -> ContentNode {
        ContentNode::Element {
            tag: element.value().name().to_ascii_lowercase(),
            html: xhtml::serialize(element),
            text: element.text().collect(),
        }
    }
}

/// Read and parse an HTML file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Html> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML file `{}`", path.display()))?;
    tracing::info!("Loaded {} bytes from {}", contents.len(), path.display());
    Ok(parse(&contents))
}

pub fn parse(contents: &str) -> Html {
    let document = Html::parse_document(contents);
    for error in &document.errors {
        tracing::trace!("HTML parse error: {error}");
    }
    document
}

/// Select the element whose direct children make up the book content.
pub fn traversal_root(document: &Html) -> Result<ElementRef<'_>> {
    let root = document.root_element();

    if let Some(article) = root
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "article")
    {
        tracing::debug!("Using <article> as the content root");
        return Ok(article);
    }

    tracing::debug!("No <article> found, falling back to <body>");
    root.descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "body")
        .ok_or_else(|| anyhow!("Document has neither an <article> nor a <body> element"))
}

/// Classify the direct children of `root`, in document order.
pub fn content_nodes(root: ElementRef<'_>) -> Vec<ContentNode> {
    root.children()
        .map(|child| match ElementRef::wrap(child) {
            Some(element) => ContentNode::from_element(element),
            None => ContentNode::Text,
        })
        .collect()
}
