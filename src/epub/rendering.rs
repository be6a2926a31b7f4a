//! Chapter document rendering.
//!
//! Each chapter's serialized elements are dropped verbatim into an XHTML
//! shell that carries the chapter title and links the book stylesheet.

use crate::chapters::Chapter;
use crate::metadata::BookMetadata;

/// Location of the stylesheet inside the package, relative to the chapters.
pub const STYLESHEET_PATH: &str = "style/nav.css";

/// Render a chapter as a standalone XHTML document.
pub fn render_chapter(chapter: &Chapter, metadata: &BookMetadata) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" lang="{lang}" xml:lang="{lang}">
<head>
    <meta http-equiv="Content-Type" content="text/html; charset=UTF-8"/>
    <title>{title}</title>
    <link rel="stylesheet" type="text/css" href="{stylesheet}"/>
</head>
<body>
{body}
</body>
</html>"#,
        lang = html_escape::encode_double_quoted_attribute(&metadata.language),
        title = html_escape::encode_text(&chapter.title),
        stylesheet = STYLESHEET_PATH,
        body = chapter.body.join("\n"),
    )
}
