// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The presentation composer: model and attribute sheet to markup.

use trellis_content::{escape_attr, escape_text};
use trellis_disclosure::SectionId;
use trellis_menu::{AccentedEntry, MenuEntry, MenuModel};

use crate::sheet::{Attribute, AttributeSheet};

/// Render the navigation header.
///
/// The brand link shows the logo markup, the hamburger carries its label and
/// the `<nav>` its expanded state. Main-bar entries get a `border-<accent>`
/// class. Drop-down roots render as `<li class="nav-drop">` toggles carrying
/// the section attributes from `sheet`, with an inert `href="#"` label link
/// and their children as a nested list. Text and attribute values are
/// escaped; icon markup is emitted as is.
pub fn compose(model: &MenuModel, sheet: &AttributeSheet) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str("<nav id=\"nav\"");
    push_attributes(&mut out, &sheet.nav_attributes());
    out.push('>');

    out.push_str("<div class=\"nav-brand\"><a class=\"navbar-brand\" href=\"");
    out.push_str(&escape_attr(&model.brand.url));
    out.push_str("\">");
    if let Some(icon) = &model.brand.icon {
        out.push_str(icon.markup());
    }
    out.push_str("</a></div>");

    out.push_str("<div class=\"nav-hamburger\"><button type=\"button\"");
    push_attributes(&mut out, &sheet.hamburger_attributes());
    out.push_str("><span class=\"nav-hamburger-icon\"></span></button></div>");

    out.push_str("<div class=\"nav-tools\"><ul class=\"top-bar\">");
    for entry in &model.top_bar {
        push_entry(&mut out, entry, "nav-item");
    }
    out.push_str("</ul></div>");

    out.push_str("<div class=\"nav-sections\"><ul class=\"main-bar\">");
    for (index, accented) in model.main_bar.iter().enumerate() {
        push_main_entry(&mut out, accented, SectionId(index), sheet);
    }
    out.push_str("</ul></div>");

    out.push_str("</nav>");
    out
}

fn push_main_entry(
    out: &mut String,
    accented: &AccentedEntry,
    id: SectionId,
    sheet: &AttributeSheet,
) {
    let mut class = String::from("nav-item");
    if let Some(accent) = &accented.accent {
        class.push_str(" border-");
        class.push_str(accent.as_str());
    }
    if accented.entry.is_drop_down() {
        push_drop_down(out, &accented.entry, &class, &sheet.section_attributes(id));
    } else {
        push_entry(out, &accented.entry, &class);
    }
}

fn push_entry(out: &mut String, entry: &MenuEntry, class: &str) {
    if entry.is_drop_down() {
        // Top-bar drop-downs are not disclosure sections; they stay collapsed.
        push_drop_down(out, entry, class, &[("aria-expanded", "false".to_owned())]);
        return;
    }
    out.push_str("<li class=\"");
    out.push_str(&escape_attr(class));
    out.push_str("\"><a href=\"");
    out.push_str(&escape_attr(entry.link.as_deref().unwrap_or("#")));
    out.push_str("\">");
    push_label(out, entry);
    out.push_str("</a></li>");
}

fn push_drop_down(out: &mut String, entry: &MenuEntry, class: &str, attributes: &[Attribute]) {
    out.push_str("<li class=\"");
    out.push_str(&escape_attr(class));
    out.push_str(" nav-drop\"");
    push_attributes(out, attributes);
    out.push_str("><a href=\"#\">");
    push_label(out, entry);
    out.push_str("</a><ul class=\"dropdown-menu\">");
    for child in entry.children() {
        push_entry(out, child, "dropdown-item");
    }
    out.push_str("</ul></li>");
}

fn push_label(out: &mut String, entry: &MenuEntry) {
    if let Some(icon) = &entry.icon {
        out.push_str(icon.markup());
    }
    out.push_str(&escape_text(&entry.text));
}

fn push_attributes(out: &mut String, attributes: &[Attribute]) {
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
}
