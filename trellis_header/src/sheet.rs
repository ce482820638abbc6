// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The effect applier: presentation attributes of the navigation.

use hashbrown::HashMap;
use tracing::trace;
use trellis_disclosure::{Affordances, Effect, EffectSink, FocusTarget, SectionId, ToggleLabel};

use crate::config::Labels;

/// A rendered attribute: name and unescaped value.
pub type Attribute = (&'static str, String);

/// Presentation attributes of one section toggle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionAttributes {
    /// `aria-expanded`.
    pub expanded: bool,
    /// Keyboard affordances currently attached.
    pub affordances: Affordances,
}

impl SectionAttributes {
    /// Attributes in rendering order.
    ///
    /// `role="button"` and `tabindex="0"` are present only while the matching
    /// affordance is attached.
    pub fn attributes(&self) -> Vec<Attribute> {
        let mut attrs = vec![("aria-expanded", bool_attr(self.expanded))];
        if self.affordances.contains(Affordances::BUTTON_ROLE) {
            attrs.push(("role", "button".to_owned()));
        }
        if self.affordances.contains(Affordances::TABBABLE) {
            attrs.push(("tabindex", "0".to_owned()));
        }
        attrs
    }
}

fn bool_attr(value: bool) -> String {
    String::from(if value { "true" } else { "false" })
}

/// The navigation's presentation state, kept in sync by applying
/// [`Effect`]s.
///
/// ```rust
/// use trellis_disclosure::{Effect, EffectSink, SectionId};
/// use trellis_header::{AttributeSheet, Labels};
///
/// let mut sheet = AttributeSheet::new(Labels::default());
/// sheet.apply_all(&[Effect::RootExpanded(true), Effect::SectionExpanded(SectionId(2), true)]);
///
/// assert_eq!(sheet.nav_attributes(), [("aria-expanded", "true".to_owned())]);
/// assert_eq!(
///     sheet.section_attributes(SectionId(2)),
///     [("aria-expanded", "true".to_owned())]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct AttributeSheet {
    labels: Labels,
    nav_expanded: bool,
    label: ToggleLabel,
    sections: HashMap<SectionId, SectionAttributes>,
    scroll_locked: bool,
    focus: Option<FocusTarget>,
    escape_listener: bool,
}

impl AttributeSheet {
    /// An empty sheet: everything collapsed, nothing afforded.
    pub fn new(labels: Labels) -> Self {
        Self {
            labels,
            nav_expanded: false,
            label: ToggleLabel::Open,
            sections: HashMap::new(),
            scroll_locked: false,
            focus: None,
            escape_listener: false,
        }
    }

    /// Label text source.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Attributes of the `<nav>` element.
    pub fn nav_attributes(&self) -> Vec<Attribute> {
        vec![("aria-expanded", bool_attr(self.nav_expanded))]
    }

    /// Attributes of the hamburger control.
    pub fn hamburger_attributes(&self) -> Vec<Attribute> {
        vec![
            ("aria-controls", "nav".to_owned()),
            ("aria-label", self.labels.text(self.label).to_owned()),
        ]
    }

    /// Current hamburger label state.
    pub fn label(&self) -> ToggleLabel {
        self.label
    }

    /// State of one section toggle; default (collapsed, unafforded) if no
    /// effect has mentioned it.
    pub fn section(&self, id: SectionId) -> SectionAttributes {
        self.sections.get(&id).copied().unwrap_or_default()
    }

    /// Attributes of one section toggle.
    pub fn section_attributes(&self, id: SectionId) -> Vec<Attribute> {
        self.section(id).attributes()
    }

    /// Attributes of the page body. Scroll lock hides vertical overflow.
    pub fn body_attributes(&self) -> Vec<Attribute> {
        if self.scroll_locked {
            vec![("style", "overflow-y: hidden".to_owned())]
        } else {
            Vec::new()
        }
    }

    /// Whether page scroll is locked.
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// The control focus was last moved to.
    pub fn focus(&self) -> Option<FocusTarget> {
        self.focus
    }

    /// Whether the page-wide Escape listener is attached.
    pub fn escape_listener(&self) -> bool {
        self.escape_listener
    }
}

impl EffectSink for AttributeSheet {
    fn apply(&mut self, effect: &Effect) {
        trace!(?effect, "applying effect");
        match *effect {
            Effect::RootExpanded(expanded) => self.nav_expanded = expanded,
            Effect::RootLabel(label) => self.label = label,
            Effect::SectionExpanded(id, expanded) => {
                self.sections.entry(id).or_default().expanded = expanded;
            }
            Effect::Affordances(id, affordances) => {
                self.sections.entry(id).or_default().affordances = affordances;
            }
            Effect::ScrollLock(locked) => self.scroll_locked = locked,
            Effect::MoveFocus(target) => self.focus = Some(target),
            Effect::EscapeListener(on) => self.escape_listener = on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn afforded_sections_are_buttons() {
        let mut sheet = AttributeSheet::new(Labels::default());
        sheet.apply(&Effect::Affordances(SectionId(0), Affordances::KEYBOARD));
        assert_eq!(
            sheet.section_attributes(SectionId(0)),
            [
                ("aria-expanded", "false".to_owned()),
                ("role", "button".to_owned()),
                ("tabindex", "0".to_owned()),
            ]
        );

        sheet.apply(&Effect::Affordances(SectionId(0), Affordances::empty()));
        assert_eq!(
            sheet.section_attributes(SectionId(0)),
            [("aria-expanded", "false".to_owned())]
        );
    }

    #[test]
    fn hamburger_label_follows_effects() {
        let labels = Labels {
            open: "Menü öffnen".to_owned(),
            close: "Menü schließen".to_owned(),
        };
        let mut sheet = AttributeSheet::new(labels);
        assert_eq!(sheet.hamburger_attributes()[1].1, "Menü öffnen");
        sheet.apply(&Effect::RootLabel(ToggleLabel::Close));
        assert_eq!(sheet.hamburger_attributes()[1].1, "Menü schließen");
    }

    #[test]
    fn scroll_lock_styles_the_body() {
        let mut sheet = AttributeSheet::new(Labels::default());
        assert!(sheet.body_attributes().is_empty());
        sheet.apply(&Effect::ScrollLock(true));
        assert_eq!(
            sheet.body_attributes(),
            [("style", "overflow-y: hidden".to_owned())]
        );
    }
}
