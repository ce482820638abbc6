// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the content tree: elements, text nodes, and read-only queries.

use core::slice;

use hashbrown::HashMap;

/// A node in an authored content tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// An element with a name, attributes, and children.
    Element(Element),
    /// A run of character data, exactly as authored (not trimmed).
    Text(String),
}

impl Node {
    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text(_) => None,
        }
    }

    /// Returns the character data if this node is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Element(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// An element of an authored content tree.
///
/// Element names are stored lowercased so queries are case-insensitive, the
/// way HTML treats tag names. Attribute names are stored as authored.
///
/// ## Example
///
/// ```rust
/// use trellis_content::Element;
///
/// let item = Element::new("li")
///     .with_child(Element::new("span").with_attr("class", "icon"))
///     .with_text("Products")
///     .with_child(Element::new("a").with_attr("href", "/products").with_text("All"));
///
/// assert_eq!(item.direct_text().collect::<Vec<_>>(), ["Products"]);
/// assert_eq!(item.find_named("a").and_then(|a| a.attr("href")), Some("/products"));
/// assert_eq!(item.text_content(), "ProductsAll");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: HashMap<String, String>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let mut name = name.into();
        name.make_ascii_lowercase();
        Self {
            name,
            attributes: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style [`Element::set_attr`].
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style [`Element::push`].
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.push(child);
        self
    }

    /// Append a text node.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    /// Set (or replace) an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Append a child node.
    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Lowercased element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this element has the given name (ASCII case-insensitive).
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes in unspecified order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Tokens of the `class` attribute in authored order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    /// Whether the `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Append a class token unless it is already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let value = match self.attr("class").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_owned(),
        };
        self.set_attr("class", value);
    }

    /// All `data-*` attributes keyed the way the DOM `dataset` exposes them.
    ///
    /// `data-menu-border-colors` is reported as `menuBorderColors`.
    pub fn dataset(&self) -> impl Iterator<Item = (String, &str)> {
        self.attributes.iter().filter_map(|(k, v)| {
            let rest = k.strip_prefix("data-")?;
            Some((camel_case(rest), v.as_str()))
        })
    }

    /// A single `dataset` entry by its camel-cased key.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attr(&data_attribute_name(key))
    }

    /// Direct children in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Direct child elements, mutably.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Self> {
        self.children.iter_mut().filter_map(|child| match child {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Direct child text nodes in document order, untrimmed.
    pub fn direct_text(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(Node::as_text)
    }

    /// Every descendant element in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
            prune: None,
        }
    }

    /// Like [`Element::descendants`], but elements matching `prune` are
    /// neither yielded nor descended into.
    pub fn descendants_outside(&self, prune: fn(&Self) -> bool) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
            prune: Some(prune),
        }
    }

    /// First descendant element matching `pred` (the `querySelector` analogue).
    pub fn find(&self, pred: impl FnMut(&&Self) -> bool) -> Option<&Self> {
        self.descendants().find(pred)
    }

    /// First descendant element with the given name.
    pub fn find_named(&self, name: &str) -> Option<&Self> {
        self.find(|el| el.is(name))
    }

    /// Concatenated character data of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Element(inner) => collect_text(inner, out),
            Node::Text(text) => out.push_str(text),
        }
    }
}

/// Pre-order iterator over descendant elements.
///
/// Created by [`Element::descendants`] and [`Element::descendants_outside`].
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    stack: Vec<slice::Iter<'a, Node>>,
    prune: Option<fn(&Element) -> bool>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(Node::Element(el)) => {
                    if self.prune.is_some_and(|prune| prune(el)) {
                        continue;
                    }
                    self.stack.push(el.children.iter());
                    return Some(el);
                }
                Some(Node::Text(_)) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// `menu-border-colors` → `menuBorderColors`.
fn camel_case(kebab: &str) -> String {
    let mut out = String::with_capacity(kebab.len());
    let mut chars = kebab.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-'
            && let Some(&next) = chars.peek()
            && next.is_ascii_lowercase()
        {
            out.push(next.to_ascii_uppercase());
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

/// `menuBorderColors` → `data-menu-border-colors`.
fn data_attribute_name(key: &str) -> String {
    let mut out = String::from("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_item() -> Element {
        Element::new("LI")
            .with_child(Element::new("span").with_text("*"))
            .with_text("  Solutions ")
            .with_child(
                Element::new("ul").with_child(
                    Element::new("li")
                        .with_child(Element::new("a").with_attr("href", "/deep").with_text("Deep")),
                ),
            )
    }

    #[test]
    fn names_are_lowercased() {
        let el = nav_item();
        assert_eq!(el.name(), "li");
        assert!(el.is("Li"));
    }

    #[test]
    fn descendants_are_pre_order() {
        let el = nav_item();
        let names: Vec<_> = el.descendants().map(Element::name).collect();
        assert_eq!(names, ["span", "ul", "li", "a"]);
    }

    #[test]
    fn pruned_descendants_skip_subtrees() {
        let el = nav_item();
        let names: Vec<_> = el
            .descendants_outside(|e| e.is("ul"))
            .map(Element::name)
            .collect();
        assert_eq!(names, ["span"]);
    }

    #[test]
    fn dataset_keys_are_camel_cased() {
        let el = Element::new("div")
            .with_attr("data-menu-border-colors", "red, blue")
            .with_attr("class", "section");
        let dataset: Vec<_> = el.dataset().collect();
        assert_eq!(dataset, [("menuBorderColors".to_owned(), "red, blue")]);
        assert_eq!(el.data("menuBorderColors"), Some("red, blue"));
        assert_eq!(el.data("missing"), None);
    }

    #[test]
    fn classes_split_on_whitespace() {
        let el = Element::new("div").with_attr("class", " section  navbar-main\tlight ");
        assert_eq!(el.classes().collect::<Vec<_>>(), ["section", "navbar-main", "light"]);
        assert!(el.has_class("light"));
        assert!(!el.has_class("navbar"));
    }

    #[test]
    fn add_class_appends_once() {
        let mut el = Element::new("div");
        el.add_class("slide");
        el.add_class("slide");
        assert_eq!(el.attr("class"), Some("slide"));

        let mut row = nav_item();
        if let Some(span) = row.child_elements_mut().next() {
            span.set_attr("class", " icon ");
            span.add_class("slide-text");
        }
        assert_eq!(row.find_named("span").and_then(|s| s.attr("class")), Some("icon slide-text"));
    }

    #[test]
    fn text_content_concatenates_all_text() {
        assert_eq!(nav_item().text_content(), "*  Solutions Deep");
    }
}
