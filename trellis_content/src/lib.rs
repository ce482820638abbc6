// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Content: authored content trees.
//!
//! Content-managed pages hand Trellis loosely structured markup: nested lists
//! with links, images, and `data-*` metadata, edited by hand. This crate is the
//! substrate every other Trellis crate reads from.
//!
//! - [`Element`] / [`Node`]: an owned tree with the handful of DOM-style queries
//!   the decorators need ([`Element::find`], [`Element::classes`],
//!   [`Element::dataset`], [`Element::direct_text`], [`Element::text_content`]).
//! - [`read_fragment`]: a lenient HTML-ish reader built on `quick-xml`.
//! - [`Element::outer_markup`] / [`Element::inner_markup`]: deterministic
//!   serialization, with [`escape_text`] and [`escape_attr`] for composers.
//! - [`ContentLoader`]: the async collaborator that fetches published content,
//!   plus [`MemoryLoader`] for hosts and tests.
//!
//! ## Example
//!
//! ```rust
//! use trellis_content::read_fragment;
//!
//! let root = read_fragment(
//!     r#"<div class="section navbar-main" data-menu-border-colors="orange,teal">
//!          <ul><li><a href="/a">A</a></li></ul>
//!        </div>"#,
//! )
//! .unwrap();
//!
//! let section = root.child_elements().next().unwrap();
//! assert!(section.has_class("navbar-main"));
//! assert_eq!(section.data("menuBorderColors"), Some("orange,teal"));
//! assert_eq!(section.find_named("a").and_then(|a| a.attr("href")), Some("/a"));
//! ```

mod loader;
mod markup;
mod node;

pub use loader::{ContentLoader, LoadError, MemoryLoader};
pub use markup::{FRAGMENT_ROOT, MarkupError, escape_attr, escape_text, read_fragment};
pub use node::{Descendants, Element, Node};
