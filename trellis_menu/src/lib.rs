// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Menu: typed navigation menus from authored nested lists.
//!
//! The navigation fragment is written by content authors, not developers. Its
//! top-level sections are marked with role classes, and their menus are plain
//! nested lists with links, images, and the occasional decorative element.
//! This crate turns that into a [`MenuModel`]:
//!
//! - [`MenuParser`] / [`parse`]: a total, recursive parser from a nested list
//!   (anything implementing [`MenuSource`]) to [`MenuEntry`] trees. Text is the
//!   first non-empty direct text node, so decorative elements before the text
//!   are skipped. Links resolve against an optional base URL.
//! - [`role_of`]: class-order-independent detection of each section's [`Role`].
//! - [`assemble`]: the whole model, with main-bar [`Accent`]s assigned by
//!   position and an explicit [`AccentFallback`] for entries past the end of
//!   the configured accent list.
//!
//! ## Example
//!
//! ```rust
//! use trellis_content::read_fragment;
//! use trellis_menu::{AssemblyOptions, assemble};
//!
//! let fragment = read_fragment(
//!     r#"<div class="section navbar-main" data-menu-border-colors="orange,teal">
//!          <ul>
//!            <li><a href="/a">A</a></li>
//!            <li>B<ul><li><a href="/b1">B1</a></li></ul></li>
//!          </ul>
//!        </div>"#,
//! )
//! .unwrap();
//!
//! let model = assemble(&fragment, &AssemblyOptions::default());
//! let [a, b] = model.main_bar.as_slice() else { panic!("two entries") };
//! assert_eq!((a.entry.text.as_str(), a.accent.as_ref().unwrap().as_str()), ("A", "orange"));
//! assert_eq!((b.entry.text.as_str(), b.accent.as_ref().unwrap().as_str()), ("B", "teal"));
//! assert_eq!(b.entry.children()[0].text, "B1");
//! ```
//!
//! Assembly never fails. Missing sections, links, or images leave empty
//! fields behind and are reported through `tracing` warnings.

mod model;
mod parser;
mod role;

pub use model::{
    ACCENT_ATTRIBUTE, Accent, AccentFallback, AccentedEntry, AssemblyOptions, Brand, MenuModel,
    assemble,
};
pub use parser::{Icon, MenuEntry, MenuParser, MenuSource, parse};
pub use role::{Role, role_of};
