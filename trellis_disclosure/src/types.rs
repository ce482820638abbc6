// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the disclosure machine: identifiers, inputs, and effects.

use trellis_viewport::ViewportMode;

/// Identifier of a section toggle.
///
/// Sections are identified by the positional index of their drop-down root in
/// the main navigation bar.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(pub usize);

bitflags::bitflags! {
    /// Keyboard affordances attached to a section toggle.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Affordances: u8 {
        /// The toggle exposes `role="button"`.
        const BUTTON_ROLE    = 0b0000_0001;
        /// The toggle is in the tab order (`tabindex="0"`).
        const TABBABLE       = 0b0000_0010;
        /// Focusing the toggle arms Enter/Space activation.
        const FOCUS_TRACKING = 0b0000_0100;
    }
}

impl Affordances {
    /// The full keyboard affordance set.
    pub const KEYBOARD: Self = Self::all();

    /// The affordance set section toggles carry in `mode`.
    pub const fn for_mode(mode: ViewportMode) -> Self {
        if mode.is_desktop() {
            Self::KEYBOARD
        } else {
            Self::empty()
        }
    }
}

impl Default for Affordances {
    fn default() -> Self {
        Self::empty()
    }
}

/// Accessible label state of the hamburger control.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ToggleLabel {
    /// The panel is closed; activating the control opens it.
    Open,
    /// The panel is open; activating the control closes it.
    Close,
}

impl ToggleLabel {
    /// The label that describes what activating the control will do.
    pub const fn for_expanded(expanded: bool) -> Self {
        if expanded { Self::Close } else { Self::Open }
    }

    /// Reference English text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open navigation",
            Self::Close => "Close navigation",
        }
    }
}

/// A focusable control owned by the navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The hamburger (root panel) control.
    Hamburger,
    /// A section toggle.
    Section(SectionId),
}

/// Keys the machine distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `Enter`.
    Enter,
    /// `Space`.
    Space,
    /// `Escape`.
    Escape,
    /// Anything else.
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.code` value.
    pub fn from_code(code: &str) -> Self {
        match code {
            "Enter" | "NumpadEnter" => Self::Enter,
            "Space" => Self::Space,
            "Escape" => Self::Escape,
            _ => Self::Other,
        }
    }

    /// Whether this key activates a focused toggle.
    pub const fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Discrete events the machine reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    /// The hamburger control was activated.
    ToggleRoot,
    /// A section toggle was activated with a pointer.
    ToggleSection(SectionId),
    /// Focus moved onto one of the navigation's controls.
    Focus(FocusTarget),
    /// Focus left the navigation's controls.
    Blur,
    /// A key was pressed while the navigation had the page's attention.
    Key(Key),
    /// The viewport signal reported a transition.
    ModeChanged(ViewportMode),
}

/// Declarative attribute/state sync instruction for the presentation layer.
///
/// Effects describe *changes*; an effect is only emitted when the value it
/// carries differs from what the presentation layer was last told, except in
/// the full sync produced by
/// [`DisclosureState::initial_effects`](crate::DisclosureState::initial_effects).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Expanded state of the root navigation.
    RootExpanded(bool),
    /// Accessible label of the hamburger control.
    RootLabel(ToggleLabel),
    /// Expanded state of one section toggle.
    SectionExpanded(SectionId, bool),
    /// Keyboard affordances of one section toggle.
    Affordances(SectionId, Affordances),
    /// Page scroll lock.
    ScrollLock(bool),
    /// Move keyboard focus to a control.
    MoveFocus(FocusTarget),
    /// Attach (`true`) or detach (`false`) the page-wide Escape listener.
    EscapeListener(bool),
}

/// Applies [`Effect`]s to a presentation layer.
pub trait EffectSink {
    /// Apply a single effect.
    fn apply(&mut self, effect: &Effect);

    /// Apply effects in order.
    fn apply_all<'a>(&mut self, effects: impl IntoIterator<Item = &'a Effect>) {
        for effect in effects {
            self.apply(effect);
        }
    }
}

impl EffectSink for alloc::vec::Vec<Effect> {
    fn apply(&mut self, effect: &Effect) {
        self.push(*effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affordances_follow_mode() {
        assert_eq!(
            Affordances::for_mode(ViewportMode::Desktop),
            Affordances::BUTTON_ROLE | Affordances::TABBABLE | Affordances::FOCUS_TRACKING
        );
        assert!(Affordances::for_mode(ViewportMode::Mobile).is_empty());
    }

    #[test]
    fn labels_describe_the_next_action() {
        assert_eq!(ToggleLabel::for_expanded(false).as_str(), "Open navigation");
        assert_eq!(ToggleLabel::for_expanded(true).as_str(), "Close navigation");
    }

    #[test]
    fn key_codes() {
        assert_eq!(Key::from_code("Escape"), Key::Escape);
        assert!(Key::from_code("Space").activates());
        assert!(Key::from_code("Enter").activates());
        assert!(!Key::from_code("KeyA").activates());
    }
}
