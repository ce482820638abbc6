// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stateful wrapper that pairs a [`DisclosureState`] with its mode signal.

use trellis_viewport::ViewportModeSignal;

use crate::state::{DisclosureState, Effects, Step, step};
use crate::types::{EffectSink, Input, SectionId};

/// A disclosure machine bound to a viewport signal.
///
/// The signal is polled on every input, so the machine always acts on the
/// current mode even if a [`Input::ModeChanged`] notification was missed.
pub struct Disclosure<S: ViewportModeSignal> {
    signal: S,
    state: DisclosureState,
}

impl<S: ViewportModeSignal> core::fmt::Debug for Disclosure<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Disclosure")
            .field("mode", &self.signal.current())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<S: ViewportModeSignal> Disclosure<S> {
    /// Create a machine for the given section toggles, in the signal's
    /// current mode, with everything collapsed.
    pub fn new(signal: S, sections: impl IntoIterator<Item = SectionId>) -> Self {
        let state = DisclosureState::new(sections, signal.current());
        Self { signal, state }
    }

    /// The full attribute sync for the first render.
    pub fn initial_effects(&self) -> Effects {
        self.state.initial_effects()
    }

    /// Feed one input and return the effects it produced.
    pub fn handle(&mut self, input: Input) -> Effects {
        let Step { state, effects } = step(&self.state, input, self.signal.current());
        self.state = state;
        effects
    }

    /// Feed one input and apply its effects to `sink`.
    pub fn dispatch(&mut self, input: Input, sink: &mut impl EffectSink) {
        let effects = self.handle(input);
        sink.apply_all(&effects);
    }

    /// Current state.
    pub fn state(&self) -> &DisclosureState {
        &self.state
    }

    /// The mode signal.
    pub fn signal(&self) -> &S {
        &self.signal
    }

    /// Mutable access to the mode signal, for hosts that feed it sizes.
    pub fn signal_mut(&mut self) -> &mut S {
        &mut self.signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Effect, FocusTarget, Key};
    use alloc::vec::Vec;
    use core::cell::Cell;
    use trellis_viewport::ViewportMode;

    #[test]
    fn polls_the_signal_on_every_input() {
        let mode = Cell::new(ViewportMode::Mobile);
        let mut nav = Disclosure::new(&mode, [SectionId(0)]);
        nav.handle(Input::ToggleRoot);
        assert!(nav.state().scroll_locked());

        // The host flips the signal but never reports the transition.
        mode.set(ViewportMode::Desktop);
        let fx = nav.handle(Input::Blur);
        assert!(fx.contains(&Effect::ScrollLock(false)));
        assert!(!nav.state().root_expanded());
    }

    #[test]
    fn dispatch_feeds_the_sink() {
        let mut nav = Disclosure::new(ViewportMode::Desktop, [SectionId(0), SectionId(1)]);
        let mut sink: Vec<Effect> = Vec::new();
        nav.dispatch(Input::Focus(FocusTarget::Section(SectionId(1))), &mut sink);
        assert!(sink.is_empty());
        nav.dispatch(Input::Key(Key::Enter), &mut sink);
        assert_eq!(
            sink,
            [
                Effect::SectionExpanded(SectionId(1), true),
                Effect::EscapeListener(true),
            ]
        );
    }

    #[test]
    fn absent_signal_starts_in_mobile() {
        let nav = Disclosure::new(None::<ViewportMode>, [SectionId(0)]);
        assert_eq!(nav.state().mode(), ViewportMode::Mobile);
        assert!(nav.state().sections()[0].affordances.is_empty());
    }
}
