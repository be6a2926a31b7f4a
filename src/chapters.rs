//! Splitting top-level content into chapters at heading boundaries.
//!
//! Content is buffered until an `h1`/`h2` is seen, at which point the buffer
//! (if it holds anything) becomes a chapter and the heading opens the next
//! one. Whatever precedes the first heading is titled "Introduction".

use crate::document::ContentNode;

/// Title used for content appearing before the first heading.
pub const DEFAULT_TITLE: &str = "Introduction";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    /// 1-based position among emitted chapters
    pub ordinal: usize,
    /// Serialized top-level elements, in document order
    pub body: Vec<String>,
}

impl Chapter {
    pub fn file_name(&self) -> String {
        format!("chap_{}.xhtml", self.ordinal)
    }
}

struct Splitter {
    chapters: Vec<Chapter>,
    title: String,
    buffer: Vec<String>,
    ordinal: usize,
}

impl Splitter {
    fn new() -> Splitter {
        Splitter {
            chapters: Vec::new(),
            title: DEFAULT_TITLE.to_string(),
            buffer: Vec::new(),
            ordinal: 1,
        }
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let chapter = Chapter {
            title: self.title.clone(),
            ordinal: self.ordinal,
            body: std::mem::take(&mut self.buffer),
        };
        tracing::debug!(
            "Chapter {} \"{}\": {} elements",
            chapter.ordinal,
            chapter.title,
            chapter.body.len()
        );
        self.chapters.push(chapter);
        self.ordinal += 1;
    }

    fn push(&mut self, node: &ContentNode) {
        if let Some(title) = node.heading_title() {
            self.flush();
            self.title = title.trim().to_string();
        }

        match node.html() {
            Some(html) => self.buffer.push(html.to_string()),
            None => tracing::trace!("Skipping untagged node"),
        }
    }

    fn finish(mut self) -> Vec<Chapter> {
        self.flush();
        self.chapters
    }
}

/// Group top-level nodes into chapters, in document order.
///
/// Untagged nodes are dropped, and a heading with no tagged content before
/// the next one never produces an empty chapter.
pub fn split<'a, I>(nodes: I) -> Vec<Chapter>
where
    I: IntoIterator<Item = &'a ContentNode>,
{
    let mut splitter = Splitter::new();
    for node in nodes {
        splitter.push(node);
    }
    splitter.finish()
}
