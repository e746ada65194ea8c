//! HTML parsing and read-only tree navigation.
//!
//! This module provides the [`Document`] and [`Element`] types the matcher
//! walks. Parsing itself is delegated to `scraper`; these wrappers only expose
//! what the listing predicates read: tag name, attributes, parent, children,
//! and flattened text.
//!
//! # Example
//!
//! ```rust
//! use flatscout_core::parse::Document;
//!
//! let html = r#"<div class="headline"><a class="detailansicht" href="x.html"> Cosy <b>room</b> </a></div>"#;
//! let doc = Document::parse(html).unwrap();
//! let body = doc.root().children().nth(1).unwrap();
//! assert_eq!(body.tag_name(), "body");
//! assert_eq!(body.text(), "Cosy room");
//! ```

use scraper::{ElementRef, Html};

use crate::Result;

/// Represents a parsed HTML document.
///
/// A Document owns the parsed tree; [`Element`]s borrow from it and never
/// mutate it.
///
/// # Example
///
/// ```rust
/// use flatscout_core::parse::Document;
///
/// let html = "<html><head><title>Flats</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Flats".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient: malformed or empty markup still yields a document
    /// (with the implied `html`, `head` and `body` elements).
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Gets the root `<html>` element.
    pub fn root(&self) -> Element<'_> {
        Element { element: self.html.root_element() }
    }

    /// Gets the title of the document.
    ///
    /// Returns the flattened text of the first `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        crate::matcher::find_first(self.root(), |el| el.tag_name() == "title").map(|el| el.text())
    }
}

/// A read-only handle on one element of a [`Document`].
///
/// # Example
///
/// ```rust
/// use flatscout_core::parse::Document;
///
/// let html = r#"<p class="price"><a href="/flat.html">650 €</a></p>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = flatscout_core::matcher::find_first(doc.root(), |el| el.tag_name() == "a").unwrap();
///
/// assert_eq!(link.text(), "650 €");
/// assert_eq!(link.attr("href"), Some("/flat.html"));
/// assert_eq!(link.parent().unwrap().class(), "price");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the flattened text content of this element.
    ///
    /// Every descendant text node is trimmed, empty ones are dropped, and the
    /// rest are joined with a single space.
    pub fn text(&self) -> String {
        self.element
            .text()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the class attribute, or an empty string when absent.
    pub fn class(&self) -> &'a str {
        self.attr("class").unwrap_or("")
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Gets the parent element.
    ///
    /// Returns `None` for the root element, whose parent is the document node.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element
            .parent()
            .and_then(ElementRef::wrap)
            .map(|element| Element { element })
    }

    /// Iterates over the child elements, skipping text and comment nodes.
    pub fn children(self) -> impl Iterator<Item = Element<'a>> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .map(|element| Element { element })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::find_first;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="de">
        <head><title>WG-Zimmer in Berlin</title></head>
        <body>
            <h3 class="headline headline-list-view noprint">
                <a class="detailansicht" href="wg-zimmer.123.html">
                    Helles Zimmer
                    <span>am Park</span>
                </a>
            </h3>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.title(), Some("WG-Zimmer in Berlin".to_string()));
        assert_eq!(doc.root().tag_name(), "html");
    }

    #[test]
    fn test_text_is_flattened() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let link = find_first(doc.root(), |el| el.tag_name() == "a").unwrap();
        assert_eq!(link.text(), "Helles Zimmer am Park");
    }

    #[test]
    fn test_parent_and_class() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let link = find_first(doc.root(), |el| el.tag_name() == "a").unwrap();

        assert_eq!(link.class(), "detailansicht");
        assert_eq!(link.parent().unwrap().class(), "headline headline-list-view noprint");
        assert!(doc.root().parent().is_none());
    }

    #[test]
    fn test_missing_attribute() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let body = find_first(doc.root(), |el| el.tag_name() == "body").unwrap();
        assert_eq!(body.attr("href"), None);
        assert_eq!(body.class(), "");
    }

    #[test]
    fn test_children_skip_text() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        let names: Vec<String> = doc.root().children().map(|el| el.tag_name()).collect();
        assert_eq!(names, vec!["head", "body"]);
    }

    #[test]
    fn test_empty_input() {
        let doc = Document::parse("").unwrap();
        assert_eq!(doc.title(), None);
    }
}
