// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu tree parser: nested lists to [`MenuEntry`] trees.

use serde::{Deserialize, Serialize};
use tracing::trace;
use trellis_content::{Element, Node};
use url::Url;

/// An opaque, renderable image reference.
///
/// Holds serialized image markup (the content of a `<picture>`, or an `<img>`
/// element). The parser never looks inside it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Icon(String);

impl Icon {
    /// Wrap already-serialized image markup.
    pub fn from_markup(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// The markup to render.
    pub fn markup(&self) -> &str {
        &self.0
    }

    /// Image reference of an element: the content of the first `<picture>`,
    /// else the first `<img>` itself. `None` if there is neither.
    pub fn of(el: &Element) -> Option<Self> {
        Self::in_elements(el.descendants())
    }

    fn in_elements<'a>(mut elements: impl Iterator<Item = &'a Element> + Clone) -> Option<Self> {
        if let Some(picture) = elements.clone().find(|el| el.is("picture")) {
            return Some(Self(picture.inner_markup()));
        }
        elements.find(|el| el.is("img")).map(|img| Self(img.outer_markup()))
    }
}

/// One navigable item.
///
/// An entry with `children` is a drop-down root; its `link` is inert and
/// renders as a toggle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Display text. Empty if the item carried none.
    pub text: String,
    /// Resolved link target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Image shown with the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    /// Nested entries, present iff the item had a nested list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuEntry>>,
}

impl MenuEntry {
    /// Entry with text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Builder-style link setter.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Builder-style children setter.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = Some(children);
        self
    }

    /// Whether this entry is a drop-down root.
    pub fn is_drop_down(&self) -> bool {
        self.children.is_some()
    }

    /// Nested entries, empty for leaves.
    pub fn children(&self) -> &[Self] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// A node with an optional nested list, as far as the parser cares.
pub trait MenuSource {
    /// The list's items, in authored order.
    fn items(&self) -> impl Iterator<Item = &Self>;

    /// The item's own text nodes, untrimmed and in order.
    fn direct_text(&self) -> impl Iterator<Item = &str>;

    /// Text carried by the first child element that has any, used when the
    /// item has no direct text of its own.
    fn leading_text(&self) -> Option<String>;

    /// Raw target of the item's first link, outside of any nested list.
    fn link_target(&self) -> Option<&str>;

    /// The item's image, outside of any nested list.
    fn icon(&self) -> Option<Icon>;

    /// The item's nested list.
    fn nested_list(&self) -> Option<&Self>;
}

fn is_list(el: &Element) -> bool {
    el.is("ul") || el.is("ol")
}

impl MenuSource for Element {
    fn items(&self) -> impl Iterator<Item = &Self> {
        self.child_elements()
    }

    fn direct_text(&self) -> impl Iterator<Item = &str> {
        self.children().iter().filter_map(Node::as_text)
    }

    fn leading_text(&self) -> Option<String> {
        self.child_elements()
            .filter(|el| !is_list(el))
            .map(|el| el.text_content().trim().to_owned())
            .find(|text| !text.is_empty())
    }

    fn link_target(&self) -> Option<&str> {
        self.descendants_outside(is_list)
            .filter(|el| el.is("a"))
            .find_map(|a| a.attr("href"))
    }

    fn icon(&self) -> Option<Icon> {
        Icon::in_elements(self.descendants_outside(is_list))
    }

    fn nested_list(&self) -> Option<&Self> {
        self.find(|el| is_list(el))
    }
}

/// Recursive nested-list parser.
///
/// The parser is total: every item yields an entry, with empty or absent
/// fields where the authored markup lacks them.
///
/// ```rust
/// use trellis_content::read_fragment;
/// use trellis_menu::MenuParser;
///
/// let root = read_fragment(
///     r#"<ul>
///          <li><a href="/a">A</a></li>
///          <li><span class="icon"></span>B<ul><li><a href="/b1">B1</a></li></ul></li>
///        </ul>"#,
/// )
/// .unwrap();
/// let list = root.find_named("ul").unwrap();
///
/// let entries = MenuParser::new().parse(list);
/// assert_eq!(entries[0].text, "A");
/// assert_eq!(entries[1].text, "B");
/// assert_eq!(entries[1].children()[0].link.as_deref(), Some("/b1"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MenuParser {
    base: Option<Url>,
}

impl MenuParser {
    /// A parser that keeps link targets as authored.
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser that resolves link targets against `base`.
    pub fn with_base(base: Url) -> Self {
        Self { base: Some(base) }
    }

    /// The base URL links are resolved against, if any.
    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Parse every item of `list`, in order.
    pub fn parse<S: MenuSource>(&self, list: &S) -> Vec<MenuEntry> {
        list.items().map(|item| self.parse_item(item)).collect()
    }

    /// Parse a single list item.
    pub fn parse_item<S: MenuSource>(&self, item: &S) -> MenuEntry {
        let text = item
            .direct_text()
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_owned)
            .or_else(|| item.leading_text())
            .unwrap_or_default();
        MenuEntry {
            text,
            link: item.link_target().map(|href| self.resolve(href)),
            icon: item.icon(),
            children: item.nested_list().map(|list| self.parse(list)),
        }
    }

    /// Resolve `href` against the base URL. Targets that cannot be joined are
    /// kept verbatim.
    pub fn resolve(&self, href: &str) -> String {
        match &self.base {
            Some(base) => match base.join(href) {
                Ok(url) => url.into(),
                Err(err) => {
                    trace!(href, %err, "keeping unresolvable link target");
                    href.to_owned()
                }
            },
            None => href.to_owned(),
        }
    }
}

/// Parse `list` with a [`MenuParser`] that keeps link targets as authored.
pub fn parse(list: &Element) -> Vec<MenuEntry> {
    MenuParser::new().parse(list)
}
