// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Disclosure: the responsive navigation state machine.
//!
//! A navigation header has one root panel (opened by the hamburger control on
//! narrow viewports) and a set of section drop-downs. This crate owns their
//! expanded state and nothing else. Every transition is a pure function,
//! [`step`], from a state and an [`Input`] to a new state and a list of
//! [`Effect`]s: declarative instructions for the presentation layer
//! (`aria-expanded` values, labels, scroll lock, focus moves, keyboard
//! affordances). The presentation layer applies them through an
//! [`EffectSink`].
//!
//! Guarantees:
//! - At most one section is expanded at any time.
//! - In [`ViewportMode::Mobile`], an expanded section implies an open root
//!   panel.
//! - Any viewport mode transition collapses every section.
//! - Inputs never fail; an input that means nothing in the current state is a
//!   no-op.
//!
//! [`Disclosure`] wraps the state with a
//! [`ViewportModeSignal`](trellis_viewport::ViewportModeSignal) that is polled
//! on every input.
//!
//! ## Minimal example
//!
//! ```rust
//! use trellis_disclosure::{Disclosure, Effect, Input, Key, SectionId, ViewportMode};
//!
//! let mut nav = Disclosure::new(ViewportMode::Desktop, [SectionId(0), SectionId(1)]);
//!
//! nav.handle(Input::ToggleSection(SectionId(0)));
//! let fx = nav.handle(Input::ToggleSection(SectionId(1)));
//! assert_eq!(
//!     fx.as_slice(),
//!     [
//!         Effect::SectionExpanded(SectionId(0), false),
//!         Effect::SectionExpanded(SectionId(1), true),
//!     ]
//! );
//!
//! nav.handle(Input::Key(Key::Escape));
//! assert_eq!(nav.state().expanded_section(), None);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `trellis_viewport/std`.
//! - `libm`: forwards to `trellis_viewport/libm` for `no_std` targets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod state;
mod types;

pub use controller::Disclosure;
pub use state::{DisclosureState, Effects, SectionState, Step, step};
pub use trellis_viewport::ViewportMode;
pub use types::{
    Affordances, Effect, EffectSink, FocusTarget, Input, Key, SectionId, ToggleLabel,
};
