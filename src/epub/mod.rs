//! EPUB packaging for split books.
//!
//! Uses the `epub-builder` crate, which handles the EPUB packaging
//! requirements (OPF manifest, NCX and nav navigation, ZIP structure with the
//! proper MIME type). Each chapter becomes its own `chap_<n>.xhtml` document,
//! and the table of contents lists them in the order they were split.

mod rendering;

use crate::book::Book;
use anyhow::{anyhow, Context, Result};
use epub_builder::{EpubBuilder, EpubContent, EpubVersion, ZipLibrary};
use rendering::{render_chapter, STYLESHEET_PATH};
use std::fmt::Display;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use uuid::Uuid;

/// Attach context to `epub-builder` results.
///
/// The crate reports `eyre::Report`s, which don't implement
/// `std::error::Error`, so they are flattened into `anyhow` errors first.
trait EpubContext<T> {
    fn epub_context<C, F>(self, context: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: Display> EpubContext<T> for std::result::Result<T, E> {
    fn epub_context<C, F>(self, context: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| anyhow!("{e:#}")).with_context(context)
    }
}

impl Book {
    /// Package the book and write it to `outfile`.
    pub fn write_epub<P: AsRef<Path>>(&self, outfile: P) -> Result<()> {
        let outfile = outfile.as_ref();

        let zip = ZipLibrary::new().epub_context(|| "Failed to create ZIP library for EPUB")?;
        let mut builder = EpubBuilder::new(zip).epub_context(|| "Failed to build builder")?;
        builder.epub_version(EpubVersion::V30);

        // set metadata
        let metadata = &self.metadata;
        builder.set_uuid(package_uuid(&metadata.identifier));
        builder
            .metadata("title", &metadata.title)
            .epub_context(|| "Failed to set title metadata")?;
        builder
            .metadata("author", &metadata.author)
            .epub_context(|| format!("Failed to add author metadata: {}", metadata.author))?;
        builder
            .metadata("lang", &metadata.language)
            .epub_context(|| "Failed to set language metadata")?;
        builder
            .metadata("generator", env!("CARGO_PKG_NAME"))
            .epub_context(|| "Failed to set generator metadata")?;

        builder
            .add_resource(STYLESHEET_PATH, self.stylesheet.as_bytes(), "text/css")
            .epub_context(|| "Failed to add stylesheet")?;

        // chapters, in table of contents order
        for (chapter, entry) in self.chapters.iter().zip(self.table_of_contents()) {
            let html = render_chapter(chapter, metadata);
            builder
                .add_content(EpubContent::new(&entry.href, html.as_bytes()).title(entry.title))
                .epub_context(|| format!("Failed to add chapter to EPUB: {}", entry.href))?;
        }

        // write epub to file
        let output_file = File::create(outfile)
            .with_context(|| format!("Failed to create EPUB file: {}", outfile.display()))?;
        let writer = BufWriter::new(output_file);
        builder
            .generate(writer)
            .epub_context(|| "Failed to generate EPUB file")?;

        tracing::info!("Wrote {} chapters to {}", self.chapters.len(), outfile.display());
        Ok(())
    }
}

/// Map the configured identifier onto the package UUID.
///
/// `epub-builder` always writes the package identifier as `urn:uuid:...`.
/// Identifiers that already are UUIDs (bare or `urn:uuid:` prefixed) are kept;
/// anything else gets a stable name-based UUID so rebuilds keep their identity.
fn package_uuid(identifier: &str) -> Uuid {
    let trimmed = identifier.trim();
    let candidate = trimmed.strip_prefix("urn:uuid:").unwrap_or(trimmed);
    Uuid::parse_str(candidate).unwrap_or_else(|_| {
        let uuid = Uuid::new_v5(&Uuid::NAMESPACE_URL, identifier.as_bytes());
        tracing::warn!(
            "Identifier `{identifier}` is not a UUID; the EPUB will be identified as urn:uuid:{uuid}"
        );
        uuid
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::book::test::sample_metadata;
    use crate::chapters::Chapter;
    use std::io::Read;

    fn entry_names(path: &Path) -> Vec<String> {
        let file = File::open(path).expect("can open epub");
        let archive = zip::ZipArchive::new(file).expect("epub is a zip archive");
        archive.file_names().map(str::to_string).collect()
    }

    fn read_entry(path: &Path, suffix: &str) -> String {
        let file = File::open(path).expect("can open epub");
        let mut archive = zip::ZipArchive::new(file).expect("epub is a zip archive");
        let name = archive
            .file_names()
            .find(|n| n.ends_with(suffix))
            .map(str::to_string)
            .unwrap_or_else(|| panic!("epub has an entry ending in {suffix}"));

        let mut entry = archive.by_name(&name).expect("can open entry");
        let mut contents = String::new();
        entry
            .read_to_string(&mut contents)
            .expect("entry is valid UTF-8");
        contents
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("`{needle}` is present"))
    }

    #[test]
    fn uuid_identifiers_are_kept() {
        let id = "6f1b1a2e-55c5-4bd4-8f59-3c1f9e1c1d2a";
        assert_eq!(package_uuid(id).to_string(), id);
        assert_eq!(package_uuid(&format!("urn:uuid:{id}")).to_string(), id);
    }

    #[test]
    fn other_identifiers_derive_a_stable_uuid() {
        let a = package_uuid("isbn:9780000000000");
        let b = package_uuid("isbn:9780000000000");
        let c = package_uuid("isbn:9781111111111");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn can_write_epub() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let outfile = dir.path().join("book.epub");

        let chapters = vec![
            Chapter {
                title: "A".to_string(),
                ordinal: 1,
                body: vec!["<h1>A</h1>".to_string(), "<p>x</p>".to_string()],
            },
            Chapter {
                title: "B".to_string(),
                ordinal: 2,
                body: vec!["<h2>B</h2>".to_string(), "<p>y</p>".to_string()],
            },
        ];
        let book = Book::new(sample_metadata(), chapters);
        book.write_epub(&outfile).expect("can write epub");

        let names = entry_names(&outfile);
        assert!(names.iter().any(|n| n == "mimetype"));
        assert!(names.iter().any(|n| n.ends_with("chap_1.xhtml")));
        assert!(names.iter().any(|n| n.ends_with("chap_2.xhtml")));
        assert!(!names.iter().any(|n| n.ends_with("chap_3.xhtml")));
        assert!(names.iter().any(|n| n.ends_with("style/nav.css")));
        assert!(names.iter().any(|n| n.ends_with("nav.xhtml")));
        assert!(names.iter().any(|n| n.ends_with("toc.ncx")));
    }

    #[test]
    fn packaged_navigation_follows_chapter_order() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let infile = dir.path().join("story.html");
        let outfile = dir.path().join("story.epub");
        std::fs::write(
            &infile,
            "<article><h1>Alpha Chapter</h1><p>x<br>y</p><h2>Beta Chapter</h2><p>z</p></article>",
        )
        .expect("can write file");

        let book = Book::from_html_file(&infile, sample_metadata()).expect("can build book");
        book.write_epub(&outfile).expect("can write epub");

        let nav = read_entry(&outfile, "nav.xhtml");
        assert!(position(&nav, "Alpha Chapter") < position(&nav, "Beta Chapter"));
        assert!(position(&nav, "chap_1.xhtml") < position(&nav, "chap_2.xhtml"));

        let ncx = read_entry(&outfile, "toc.ncx");
        assert!(position(&ncx, "Alpha Chapter") < position(&ncx, "Beta Chapter"));

        let first = read_entry(&outfile, "chap_1.xhtml");
        assert!(first.contains("<title>Alpha Chapter</title>"));
        assert!(first.contains("<h1>Alpha Chapter</h1>\n<p>x<br/>y</p>"));
        assert!(!first.contains("Beta Chapter"));

        let second = read_entry(&outfile, "chap_2.xhtml");
        assert!(second.contains("<h2>Beta Chapter</h2>\n<p>z</p>"));

        let css = read_entry(&outfile, "style/nav.css");
        assert_eq!(css, crate::book::STYLESHEET);
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let outfile = dir.path().join("missing-dir").join("book.epub");

        let book = Book::new(sample_metadata(), Vec::new());
        assert!(book.write_epub(&outfile).is_err());
    }
}
