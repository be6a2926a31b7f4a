//! XHTML serialization of parsed elements.
//!
//! html5ever serializes as HTML: void elements stay open and non-breaking
//! spaces come out as `&nbsp;`, neither of which is well-formed XML. Chapter
//! documents are XHTML, so elements are written back out here instead.

use scraper::{ElementRef, Node};

/// Elements that never have content and must be self-closed.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Serialize an element, including its own tag, as well-formed XHTML.
pub fn serialize(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    out.push('<');
    out.push_str(name);
    for (attr, value) in element.value().attrs() {
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }

    if VOID_ELEMENTS.contains(&name) {
        out.push_str("/>");
        return;
    }
    out.push('>');

    for child in element.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    write_element(child, out);
                }
            }
            Node::Text(text) => {
                let text: &str = text;
                out.push_str(&html_escape::encode_text(text));
            }
            Node::Comment(comment) => {
                let comment: &str = comment;
                // "--" may not appear inside an XML comment
                out.push_str("<!--");
                out.push_str(&comment.replace("--", "- -"));
                out.push_str("-->");
            }
            _ => {}
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
