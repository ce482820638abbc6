// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disclosure state and the pure transition function.
//!
//! ## Transitions
//!
//! | Input | Effect |
//! |---|---|
//! | [`Input::ToggleRoot`] | flip the root panel, collapse every section, lock scroll iff now open in Mobile |
//! | [`Input::ToggleSection`] | flip that section, collapse every other one (Mobile: only while the root is open) |
//! | [`Input::Key`] Enter/Space | same as `ToggleSection` for the focused, armed toggle |
//! | [`Input::Key`] Escape, Desktop | collapse sections, focus the toggle that was open |
//! | [`Input::Key`] Escape, Mobile | close the root panel, focus the hamburger |
//! | [`Input::ModeChanged`] → Desktop | close the root, unlock scroll, attach keyboard affordances |
//! | [`Input::ModeChanged`] → Mobile | detach keyboard affordances, drop armed toggles, lock scroll if the root is open |
//! | [`Input::Focus`] on a section, Desktop | arm Enter/Space for that toggle |
//!
//! Every mode transition also collapses the sections. Anything not in the
//! table is a no-op: the machine never fails.

use smallvec::SmallVec;
use tracing::{debug, trace};
use trellis_viewport::ViewportMode;

use crate::types::{Affordances, Effect, FocusTarget, Input, Key, SectionId, ToggleLabel};

/// Effects produced by one transition.
pub type Effects = SmallVec<[Effect; 8]>;

/// State of one section toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SectionState {
    /// Which section this is.
    pub id: SectionId,
    /// Whether the section's drop-down is open.
    pub expanded: bool,
    /// Keyboard affordances currently attached.
    pub affordances: Affordances,
    /// Whether Enter/Space on the focused toggle activates it.
    pub key_armed: bool,
}

/// Per-navigation disclosure state.
///
/// Created when the navigation is decorated and mutated only through
/// [`step`] (usually via [`Disclosure`](crate::Disclosure)).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisclosureState {
    mode: ViewportMode,
    root_expanded: bool,
    sections: SmallVec<[SectionState; 8]>,
    scroll_locked: bool,
    escape_listening: bool,
    focus: Option<FocusTarget>,
}

/// Result of [`step`].
#[derive(Clone, Debug)]
pub struct Step {
    /// State after the transition.
    pub state: DisclosureState,
    /// Changes the presentation layer must apply, in order.
    pub effects: Effects,
}

impl DisclosureState {
    /// Fresh state: everything collapsed, affordances matching `mode`.
    pub fn new(sections: impl IntoIterator<Item = SectionId>, mode: ViewportMode) -> Self {
        let affordances = Affordances::for_mode(mode);
        Self {
            mode,
            root_expanded: false,
            sections: sections
                .into_iter()
                .map(|id| SectionState {
                    id,
                    expanded: false,
                    affordances,
                    key_armed: false,
                })
                .collect(),
            scroll_locked: false,
            escape_listening: false,
            focus: None,
        }
    }

    /// Current interaction mode.
    pub const fn mode(&self) -> ViewportMode {
        self.mode
    }

    /// Whether the root (hamburger) panel is open.
    pub const fn root_expanded(&self) -> bool {
        self.root_expanded
    }

    /// All sections in positional order.
    pub fn sections(&self) -> &[SectionState] {
        &self.sections
    }

    /// State of one section, if it exists.
    pub fn section(&self, id: SectionId) -> Option<&SectionState> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Whether a section is open; `None` for unknown ids.
    pub fn section_expanded(&self, id: SectionId) -> Option<bool> {
        self.section(id).map(|s| s.expanded)
    }

    /// The open section, if any.
    pub fn expanded_section(&self) -> Option<SectionId> {
        self.sections.iter().find(|s| s.expanded).map(|s| s.id)
    }

    /// Whether page scroll is locked.
    pub const fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Whether the page-wide Escape listener is attached.
    pub const fn escape_listening(&self) -> bool {
        self.escape_listening
    }

    /// The navigation control that has focus, if any.
    pub const fn focus(&self) -> Option<FocusTarget> {
        self.focus
    }

    /// A full attribute sync describing this state.
    ///
    /// Used for the first render, before any transition has produced deltas.
    pub fn initial_effects(&self) -> Effects {
        let mut fx = Effects::new();
        fx.push(Effect::RootExpanded(self.root_expanded));
        fx.push(Effect::RootLabel(ToggleLabel::for_expanded(self.root_expanded)));
        fx.push(Effect::ScrollLock(self.scroll_locked));
        for s in &self.sections {
            fx.push(Effect::SectionExpanded(s.id, s.expanded));
            fx.push(Effect::Affordances(s.id, s.affordances));
        }
        fx.push(Effect::EscapeListener(self.escape_listening));
        fx
    }

    /// Escape does something exactly when a desktop drop-down or the mobile
    /// panel is open.
    fn escape_meaningful(&self) -> bool {
        if self.mode.is_desktop() {
            self.sections.iter().any(|s| s.expanded)
        } else {
            self.root_expanded
        }
    }

    fn index_of(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    fn set_root(&mut self, expanded: bool, fx: &mut Effects) {
        if self.root_expanded != expanded {
            self.root_expanded = expanded;
            fx.push(Effect::RootExpanded(expanded));
            fx.push(Effect::RootLabel(ToggleLabel::for_expanded(expanded)));
        }
    }

    fn set_section(&mut self, idx: usize, expanded: bool, fx: &mut Effects) {
        let section = &mut self.sections[idx];
        if section.expanded != expanded {
            section.expanded = expanded;
            fx.push(Effect::SectionExpanded(section.id, expanded));
        }
    }

    fn collapse_sections(&mut self, except: Option<usize>, fx: &mut Effects) {
        for idx in 0..self.sections.len() {
            if Some(idx) != except {
                self.set_section(idx, false, fx);
            }
        }
    }

    fn set_scroll_lock(&mut self, locked: bool, fx: &mut Effects) {
        if self.scroll_locked != locked {
            self.scroll_locked = locked;
            fx.push(Effect::ScrollLock(locked));
        }
    }

    fn sync_affordances(&mut self, fx: &mut Effects) {
        let affordances = Affordances::for_mode(self.mode);
        for section in &mut self.sections {
            if !affordances.contains(Affordances::FOCUS_TRACKING) {
                section.key_armed = false;
            }
            if section.affordances != affordances {
                section.affordances = affordances;
                fx.push(Effect::Affordances(section.id, affordances));
            }
        }
    }

    fn sync_escape(&mut self, fx: &mut Effects) {
        let listening = self.escape_meaningful();
        if self.escape_listening != listening {
            self.escape_listening = listening;
            fx.push(Effect::EscapeListener(listening));
        }
    }

    fn move_focus(&mut self, target: FocusTarget, fx: &mut Effects) {
        self.focus = Some(target);
        fx.push(Effect::MoveFocus(target));
    }

    fn enter_mode(&mut self, mode: ViewportMode, fx: &mut Effects) {
        if self.mode == mode {
            return;
        }
        debug!(?mode, "disclosure mode transition");
        self.mode = mode;
        self.collapse_sections(None, fx);
        if mode.is_desktop() {
            self.set_root(false, fx);
        }
        self.set_scroll_lock(self.root_expanded && !mode.is_desktop(), fx);
        self.sync_affordances(fx);
    }

    fn toggle_root(&mut self, fx: &mut Effects) {
        let expanded = !self.root_expanded;
        self.set_root(expanded, fx);
        self.collapse_sections(None, fx);
        self.set_scroll_lock(expanded && !self.mode.is_desktop(), fx);
        self.sync_affordances(fx);
    }

    fn toggle_section(&mut self, id: SectionId, fx: &mut Effects) {
        let Some(idx) = self.index_of(id) else {
            trace!(?id, "toggle for unknown section ignored");
            return;
        };
        if !self.mode.is_desktop() && !self.root_expanded {
            trace!(?id, "section toggle ignored while the mobile panel is closed");
            return;
        }
        let expanded = !self.sections[idx].expanded;
        // Close the others first so two sections are never open at once.
        self.collapse_sections(Some(idx), fx);
        self.set_section(idx, expanded, fx);
    }

    fn focus_on(&mut self, target: FocusTarget) {
        self.focus = Some(target);
        if let FocusTarget::Section(id) = target
            && let Some(idx) = self.index_of(id)
        {
            let section = &mut self.sections[idx];
            if self.mode.is_desktop() && section.affordances.contains(Affordances::FOCUS_TRACKING) {
                section.key_armed = true;
            }
        }
    }

    fn key(&mut self, key: Key, fx: &mut Effects) {
        match key {
            key if key.activates() => {
                let Some(FocusTarget::Section(id)) = self.focus else {
                    return;
                };
                if self.section(id).is_some_and(|s| s.key_armed) {
                    self.toggle_section(id, fx);
                }
            }
            Key::Escape => self.escape(fx),
            _ => {}
        }
    }

    fn escape(&mut self, fx: &mut Effects) {
        // Checked against the live state: a reconciled mode transition in
        // this same step may have made Escape meaningful.
        if !self.escape_meaningful() {
            trace!("escape ignored: nothing to close");
            return;
        }
        if self.mode.is_desktop() {
            if let Some(open) = self.expanded_section() {
                self.collapse_sections(None, fx);
                self.move_focus(FocusTarget::Section(open), fx);
            }
        } else if self.root_expanded {
            self.toggle_root(fx);
            self.move_focus(FocusTarget::Hamburger, fx);
        }
    }
}

/// Compute the next state and the effects that bring the presentation layer
/// in line with it.
///
/// `mode` is the viewport mode polled from the signal for this event. If it
/// differs from the state's mode (a missed notification), the mode transition
/// is applied before the input. [`Input::ModeChanged`] carries its own mode
/// and takes precedence.
pub fn step(state: &DisclosureState, input: Input, mode: ViewportMode) -> Step {
    let mut next = state.clone();
    let mut fx = Effects::new();

    if let Input::ModeChanged(notified) = input {
        next.enter_mode(notified, &mut fx);
    } else {
        next.enter_mode(mode, &mut fx);
        match input {
            Input::ToggleRoot => next.toggle_root(&mut fx),
            Input::ToggleSection(id) => next.toggle_section(id, &mut fx),
            Input::Focus(target) => next.focus_on(target),
            Input::Blur => next.focus = None,
            Input::Key(key) => next.key(key, &mut fx),
            Input::ModeChanged(_) => {}
        }
    }
    next.sync_escape(&mut fx);

    if !fx.is_empty() {
        debug!(?input, effects = fx.len(), "disclosure transition");
    }
    Step {
        state: next,
        effects: fx,
    }
}
