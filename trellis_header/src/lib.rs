// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Header: decorating a page header with a responsive navigation.
//!
//! This crate wires the other Trellis crates into the header pipeline:
//!
//! 1. [`nav_path`] picks the fragment path from the page's `nav` metadata.
//! 2. [`decorate`] loads it through a [`ContentLoader`](trellis_content::ContentLoader),
//!    reads it, and assembles the [`MenuModel`](trellis_menu::MenuModel). Any failure
//!    leaves the header undecorated (`None`) and is logged, never shown.
//! 3. [`Header::navigation`] starts a [`Navigation`]: the disclosure machine
//!    bound to a viewport signal, applying its effects to an
//!    [`AttributeSheet`].
//! 4. [`compose`] (or [`Header::render`]) renders the model with the sheet's
//!    current attributes.
//!
//! [`HeaderConfig`] holds the tunables (breakpoint, default path, base URL,
//! accent handling, label text) and loads from TOML.
//!
//! ## Example
//!
//! ```rust
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! use kurbo::Size;
//! use trellis_content::MemoryLoader;
//! use trellis_disclosure::{Input, SectionId};
//! use trellis_header::{HeaderConfig, decorate};
//!
//! let loader = MemoryLoader::new().with(
//!     "/nav",
//!     r#"<div class="navbar-main" data-menu-border-colors="orange,teal">
//!          <ul><li><a href="/a">A</a></li><li>B<ul><li><a href="/b1">B1</a></li></ul></li></ul>
//!        </div>"#,
//! );
//!
//! let header = decorate(&loader, None, &HeaderConfig::default()).await.unwrap();
//! let mut nav = header.navigation_for_size(Size::new(1280.0, 800.0));
//! nav.dispatch(Input::ToggleSection(SectionId(1)));
//!
//! let html = header.render(&nav);
//! assert!(html.contains(r#"class="nav-item border-teal nav-drop" aria-expanded="true""#));
//! # });
//! ```

mod compose;
mod config;
mod header;
mod sheet;

pub use compose::compose;
pub use config::{ConfigError, DEFAULT_NAV_PATH, HeaderConfig, Labels, nav_path};
pub use header::{Header, Navigation, decorate};
pub use sheet::{Attribute, AttributeSheet, SectionAttributes};
