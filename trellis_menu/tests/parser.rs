// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parser completeness over generated two-level menus.

use proptest::prelude::*;
use trellis_content::{Element, read_fragment};
use trellis_menu::{Accent, AccentFallback, parse};

/// A top-level item: its label and, optionally, the labels of a nested list.
type Item = (String, Option<Vec<String>>);

fn label() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,11}".prop_map(|s| s.trim().to_owned())
}

fn items() -> impl Strategy<Value = Vec<Item>> {
    proptest::collection::vec(
        (
            label(),
            proptest::option::of(proptest::collection::vec(label(), 0..5)),
        ),
        0..8,
    )
}

fn render(items: &[Item]) -> String {
    let mut out = String::from("<ul>");
    for (text, children) in items {
        out.push_str("<li><span class=\"icon\"></span>");
        out.push_str(text);
        if let Some(children) = children {
            out.push_str("<ul>");
            for child in children {
                out.push_str(&format!("<li><a href=\"/{child}\">{child}</a></li>"));
            }
            out.push_str("</ul>");
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
    out
}

fn list(markup: &str) -> Element {
    let root = read_fragment(markup).unwrap();
    root.find_named("ul").unwrap().clone()
}

proptest! {
    /// One entry per item, children iff a nested list, one child per nested item.
    #[test]
    fn parse_is_complete(items in items()) {
        let entries = parse(&list(&render(&items)));
        prop_assert_eq!(entries.len(), items.len());
        for (entry, (text, children)) in entries.iter().zip(&items) {
            prop_assert_eq!(&entry.text, text);
            prop_assert_eq!(entry.is_drop_down(), children.is_some());
            let expected = children.as_deref().unwrap_or_default();
            prop_assert_eq!(entry.children().len(), expected.len());
            for (child, label) in entry.children().iter().zip(expected) {
                prop_assert_eq!(&child.text, label);
                prop_assert_eq!(child.link.clone(), Some(format!("/{label}")));
            }
        }
    }

    /// Reordering accents changes the tags, never the positions they map to.
    #[test]
    fn cycling_accents_are_positional(
        ids in proptest::collection::vec("[a-z]{1,6}", 1..5),
        index in 0_usize..20,
    ) {
        let accents: Vec<_> = ids.iter().map(Accent::new).collect();
        let tagged = AccentFallback::Cycle.accent_for(&accents, index);
        prop_assert_eq!(tagged, Some(accents[index % accents.len()].clone()));
    }
}
