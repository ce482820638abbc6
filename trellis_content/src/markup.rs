// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lenient markup reader and serializer.
//!
//! Authored fragments are HTML, not XML: void elements are not self-closed,
//! attributes may be unquoted or valueless, and named entities such as
//! `&nbsp;` appear in text. The reader accepts all of those on top of
//! `quick-xml`, and it never rejects a document for mismatched end tags:
//! a stray end tag is dropped, and elements left open are closed at the end
//! of input.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::{escape, partial_escape, resolve_html5_entity};
use quick_xml::events::{BytesStart, BytesText, Event};
use tracing::trace;

use crate::node::{Element, Node};

/// Name of the synthetic root returned by [`read_fragment`].
pub const FRAGMENT_ROOT: &str = "#fragment";

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Errors produced while reading markup.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// The tokenizer could not make sense of the input.
    #[error("malformed markup: {0}")]
    Syntax(#[from] quick_xml::Error),
}

/// Read an authored fragment into a tree rooted at a synthetic
/// [`FRAGMENT_ROOT`] element.
///
/// ```rust
/// use trellis_content::read_fragment;
///
/// let root = read_fragment(r#"<ul><li><img src="a.png">Home&nbsp;page</li></ul>"#).unwrap();
/// let li = root.find_named("li").unwrap();
/// assert!(li.find_named("img").is_some());
/// assert_eq!(li.direct_text().collect::<Vec<_>>(), ["Home\u{a0}page"]);
/// ```
pub fn read_fragment(markup: &str) -> Result<Element, MarkupError> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut stack = vec![Element::new(FRAGMENT_ROOT)];
    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let el = open_element(&start);
                if is_void(el.name()) {
                    append(&mut stack, el.into());
                } else {
                    stack.push(el);
                }
            }
            Event::Empty(start) => append(&mut stack, open_element(&start).into()),
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                close_element(&mut stack, &name);
            }
            Event::Text(text) => {
                let text = unescape_text(&text);
                if !text.is_empty() {
                    append(&mut stack, Node::Text(text));
                }
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                append(&mut stack, Node::Text(text));
            }
            Event::Eof => break,
            // Comments, declarations, doctypes, and processing instructions.
            _ => {}
        }
    }

    while stack.len() > 1 {
        if let Some(open) = stack.pop() {
            trace!(element = open.name(), "closing element left open at end of input");
            append(&mut stack, open.into());
        }
    }
    Ok(stack.pop().unwrap_or_else(|| Element::new(FRAGMENT_ROOT)))
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

fn open_element(start: &BytesStart<'_>) -> Element {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut el = Element::new(name);
    for attr in start.html_attributes() {
        let attr = match attr {
            Ok(attr) => attr,
            Err(err) => {
                trace!(element = el.name(), %err, "skipping unreadable attribute");
                continue;
            }
        };
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value_with(resolve_html5_entity) {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        el.set_attr(key, value);
    }
    el
}

fn unescape_text(text: &BytesText<'_>) -> String {
    match text.unescape_with(resolve_html5_entity) {
        Ok(text) => text.into_owned(),
        // Unknown entities are kept verbatim rather than failing the document.
        Err(_) => String::from_utf8_lossy(text).into_owned(),
    }
}

fn append(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.push(node);
    }
}

fn close_element(stack: &mut Vec<Element>, name: &str) {
    // Index 0 is the synthetic root, which authored end tags never close.
    let Some(found) = stack.iter().skip(1).rposition(|el| el.name() == name) else {
        trace!(element = name, "dropping unmatched end tag");
        return;
    };
    let depth = found + 1;
    while stack.len() > depth {
        if let Some(done) = stack.pop() {
            append(stack, done.into());
        }
    }
}

impl Element {
    /// Serialize this element, its attributes, and its content.
    ///
    /// Attributes are written in name order so output is deterministic. The
    /// synthetic [`FRAGMENT_ROOT`] serializes as its content only.
    pub fn outer_markup(&self) -> String {
        let mut out = String::new();
        if self.name() == FRAGMENT_ROOT {
            write_children(self, &mut out);
        } else {
            write_element(self, &mut out);
        }
        out
    }

    /// Serialize the content of this element (the `innerHTML` analogue).
    pub fn inner_markup(&self) -> String {
        let mut out = String::new();
        write_children(self, &mut out);
        out
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.name());
    let mut attributes: Vec<_> = el.attributes().collect();
    attributes.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
    out.push('>');
    if is_void(el.name()) {
        return;
    }
    write_children(el, out);
    out.push_str("</");
    out.push_str(el.name());
    out.push('>');
}

fn write_children(el: &Element, out: &mut String) {
    for child in el.children() {
        match child {
            Node::Element(inner) => write_element(inner, out),
            Node::Text(text) => out.push_str(&escape_text(text)),
        }
    }
}

/// Escape character data for inclusion between tags.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    partial_escape(text)
}

/// Escape a value for inclusion in a double-quoted attribute.
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    escape(value)
}
