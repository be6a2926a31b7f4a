use crate::chapters::{self, Chapter};
use crate::document;
use crate::metadata::BookMetadata;
use anyhow::{Context, Result};
use std::path::Path;

/// Stylesheet shipped with every book as `style/nav.css`.
pub const STYLESHEET: &str = "BODY { font-family: Gentium, Georgia, serif; }";

#[derive(Debug, Clone)]
pub struct Book {
    pub metadata: BookMetadata,
    pub chapters: Vec<Chapter>,
    pub stylesheet: &'static str,
}

/// A navigation entry pointing at one chapter document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry<'a> {
    pub title: &'a str,
    pub href: String,
}

impl Book {
    pub fn new(metadata: BookMetadata, chapters: Vec<Chapter>) -> Book {
        Book {
            metadata,
            chapters,
            stylesheet: STYLESHEET,
        }
    }

    /// Parse an HTML file and split it into a book.
    pub fn from_html_file<P: AsRef<Path>>(path: P, metadata: BookMetadata) -> Result<Book> {
        let path = path.as_ref();
        let html = document::load(path)?;
        let root = document::traversal_root(&html)
            .with_context(|| format!("Failed to find content in `{}`", path.display()))?;
        let nodes = document::content_nodes(root);
        let chapters = chapters::split(&nodes);
        tracing::info!("Split {} top-level nodes into {} chapters", nodes.len(), chapters.len());

        Ok(Book::new(metadata, chapters))
    }

    /// Table of contents entries, in chapter order.
    pub fn table_of_contents(&self) -> Vec<TocEntry<'_>> {
        self.chapters
            .iter()
            .map(|chapter| TocEntry {
                title: &chapter.title,
                href: chapter.file_name(),
            })
            .collect()
    }
}
