// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Header decoration end to end: config, fragment, model, disclosure, markup.
//!
//! This example shows how to:
//! - load a `HeaderConfig` from TOML,
//! - decorate a header from an in-memory navigation fragment,
//! - drive the disclosure machine with inputs and viewport resizes,
//! - render the navigation and a couple of content blocks.
//!
//! Run:
//! - `cargo run -p trellis_demos --example header_walkthrough`
//! - `RUST_LOG=debug cargo run -p trellis_demos --example header_walkthrough`

use kurbo::Size;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use trellis_blocks::{Carousel, decorate_table};
use trellis_content::{MemoryLoader, read_fragment};
use trellis_disclosure::{FocusTarget, Input, Key, SectionId};
use trellis_header::{HeaderConfig, decorate};

const CONFIG: &str = r#"
base_url = "https://example.com/en/"
accent_fallback = "cycle"

[labels]
open = "Open menu"
close = "Close menu"
"#;

const NAV: &str = r#"
<div class="section navbar-brand">
  <p><a href="/"><picture><source srcset="/logo.webp"><img src="/logo.png" alt="Home"></picture></a></p>
</div>
<div class="section navbar-top">
  <ul><li><a href="/de/">Deutsch</a></li><li><a href="/fr/">Français</a></li></ul>
</div>
<div class="section navbar-main" data-menu-border-colors="orange, teal">
  <ul>
    <li><a href="products">Products</a></li>
    <li>Solutions
      <ul>
        <li><a href="solutions/retail">Retail</a></li>
        <li><a href="solutions/energy">Energy</a></li>
      </ul>
    </li>
    <li>Company
      <ul><li><a href="/about">About us</a></li></ul>
    </li>
  </ul>
</div>"#;

const BLOCKS: &str = r#"
<div class="carousel">
  <div>Next</div>
  <div><div><img src="/one.png"></div><div>First slide</div></div>
  <div><div><img src="/two.png"></div><div>Second slide</div></div>
  <div>Previous</div>
</div>
<div class="table"><p><a href="/countries.json">Countries</a></p></div>"#;

const SHEET: &str = r#"{ "data": [
  { "Country": "Chile", "Code": 56 },
  { "Country": "Peru", "Code": 51 }
] }"#;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match HeaderConfig::from_toml_str(CONFIG) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid header configuration");
            return;
        }
    };

    let loader = MemoryLoader::new()
        .with("/en/nav", NAV)
        .with("/countries.json", SHEET);

    // The page's `nav` metadata points at a localized fragment.
    let Some(header) = decorate(&loader, Some("/en/nav"), &config).await else {
        println!("header left undecorated");
        return;
    };

    println!("== model ==");
    for item in &header.model().main_bar {
        println!(
            "{:<10} link={:<40} accent={:<8} children={}",
            item.entry.text,
            item.entry.link.as_deref().unwrap_or("-"),
            item.accent.as_ref().map_or("-", |accent| accent.as_str()),
            item.entry.children().len(),
        );
    }

    // A phone-sized viewport starts in mobile mode.
    let mut nav = header.navigation_for_size(Size::new(390.0, 844.0));
    nav.dispatch(Input::ToggleRoot);
    nav.dispatch(Input::ToggleSection(SectionId(1)));
    println!("\n== mobile, menu open ==");
    println!("body: {:?}", nav.sheet().body_attributes());
    println!("hamburger: {:?}", nav.sheet().hamburger_attributes());
    println!("{}", header.render(&nav));

    // Rotating to a wide viewport crosses the breakpoint and resets the menu.
    let effects = nav.resize(Size::new(1280.0, 800.0));
    println!("\n== resized to desktop: {} effects ==", effects.len());
    for effect in &effects {
        println!("  {effect:?}");
    }

    // Keyboard: focus arms a drop-down, Enter opens it, Escape closes it.
    nav.dispatch(Input::Focus(FocusTarget::Section(SectionId(2))));
    nav.dispatch(Input::Key(Key::Enter));
    println!("\n== desktop, Company open ==");
    println!("{}", header.render(&nav));
    nav.dispatch(Input::Key(Key::Escape));
    println!("focus after Escape: {:?}", nav.sheet().focus());

    let blocks = match read_fragment(BLOCKS) {
        Ok(blocks) => blocks,
        Err(err) => {
            tracing::error!(%err, "unreadable blocks");
            return;
        }
    };
    for block in blocks.child_elements() {
        if block.has_class("carousel") {
            let mut carousel = Carousel::from_block(block);
            carousel.next_slide();
            println!("\n== carousel ==\n{}", carousel.render());
        } else if block.has_class("table") {
            match decorate_table(block, &loader).await {
                Ok(table) => println!("\n== table ==\n{table}"),
                Err(err) => tracing::warn!(%err, "table left undecorated"),
            }
        }
    }
}
