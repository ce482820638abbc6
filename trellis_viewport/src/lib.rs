// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Viewport: the interaction-mode signal.
//!
//! Responsive navigation behaves differently on wide, pointer-driven layouts
//! than on narrow, touch-driven ones. This crate reduces the viewport to that
//! single binary fact, [`ViewportMode`], and makes it the one place the rest of
//! the system asks. Nothing else should compare widths itself.
//!
//! - [`Breakpoint`]: an inclusive `min-width` condition (reference value
//!   [`DESKTOP_MIN_WIDTH`], 900 logical pixels).
//! - [`ViewportModeSignal`]: a synchronous poll of the current mode.
//! - [`WidthSignal`]: a signal driven by viewport sizes that notifies its
//!   listeners exactly once per mode transition, in both directions, and
//!   never for resizes that stay within a mode.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use trellis_viewport::{Breakpoint, ViewportMode, ViewportModeSignal, WidthSignal};
//!
//! let mut signal = WidthSignal::new(Breakpoint::default(), Size::new(375.0, 812.0));
//! assert_eq!(signal.current(), ViewportMode::Mobile);
//!
//! // Growing within the mobile range is not a transition…
//! assert_eq!(signal.resize(Size::new(600.0, 812.0)), None);
//! // …crossing the breakpoint is.
//! assert_eq!(signal.resize(Size::new(900.0, 812.0)), Some(ViewportMode::Desktop));
//! ```
//!
//! Tests and hosts without a live viewport can use a [`ViewportMode`] directly
//! as a constant signal, or a `Cell<ViewportMode>` they flip by hand. An
//! `Option<S>` signal reports [`ViewportMode::Mobile`] when it is `None`, the
//! more restrictive affordance set.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` through `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use core::cell::Cell;

use kurbo::Size;
use smallvec::SmallVec;
use tracing::debug;

/// Reference desktop breakpoint in logical pixels.
pub const DESKTOP_MIN_WIDTH: f64 = 900.0;

/// Binary interaction-mode classification derived from the viewport width.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewportMode {
    /// Wide layout: pointer hover, inline drop-downs, keyboard toggles.
    Desktop,
    /// Narrow layout: hamburger panel, tap-only section toggles.
    #[default]
    Mobile,
}

impl ViewportMode {
    /// `true` for [`ViewportMode::Desktop`].
    pub const fn is_desktop(self) -> bool {
        matches!(self, Self::Desktop)
    }
}

/// Inclusive `min-width` media condition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Breakpoint {
    /// Smallest width, in logical pixels, classified as desktop.
    pub desktop_min_width: f64,
}

impl Breakpoint {
    /// Create a breakpoint at `desktop_min_width` logical pixels.
    pub const fn new(desktop_min_width: f64) -> Self {
        Self { desktop_min_width }
    }

    /// Classify a viewport width.
    pub fn classify(&self, width: f64) -> ViewportMode {
        if width >= self.desktop_min_width {
            ViewportMode::Desktop
        } else {
            ViewportMode::Mobile
        }
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::new(DESKTOP_MIN_WIDTH)
    }
}

/// Source of truth for the current interaction mode.
pub trait ViewportModeSignal {
    /// Synchronously poll the current mode.
    fn current(&self) -> ViewportMode;
}

impl ViewportModeSignal for ViewportMode {
    fn current(&self) -> ViewportMode {
        *self
    }
}

impl<S: ViewportModeSignal> ViewportModeSignal for Option<S> {
    fn current(&self) -> ViewportMode {
        self.as_ref()
            .map_or(ViewportMode::Mobile, ViewportModeSignal::current)
    }
}

impl ViewportModeSignal for Cell<ViewportMode> {
    fn current(&self) -> ViewportMode {
        self.get()
    }
}

impl<S: ViewportModeSignal + ?Sized> ViewportModeSignal for &S {
    fn current(&self) -> ViewportMode {
        (**self).current()
    }
}

/// Handle returned by [`WidthSignal::on_change`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(ViewportMode)>;

/// A [`ViewportModeSignal`] fed with viewport sizes.
///
/// The host calls [`WidthSignal::resize`] from its resize (or media-query)
/// notifications. Listeners registered with [`WidthSignal::on_change`] run in
/// registration order, once per transition.
pub struct WidthSignal {
    breakpoint: Breakpoint,
    size: Size,
    mode: ViewportMode,
    listeners: SmallVec<[(ListenerId, Listener); 2]>,
    next_id: u32,
}

impl core::fmt::Debug for WidthSignal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WidthSignal")
            .field("breakpoint", &self.breakpoint)
            .field("size", &self.size)
            .field("mode", &self.mode)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl WidthSignal {
    /// Create a signal for an initial viewport size.
    pub fn new(breakpoint: Breakpoint, size: Size) -> Self {
        Self {
            breakpoint,
            size,
            mode: breakpoint.classify(size.width),
            listeners: SmallVec::new(),
            next_id: 0,
        }
    }

    /// The breakpoint this signal classifies against.
    pub const fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// The most recently reported viewport size.
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Report a new viewport size.
    ///
    /// Returns the new mode if the size crossed the breakpoint, after every
    /// listener has observed it, and `None` otherwise.
    pub fn resize(&mut self, size: Size) -> Option<ViewportMode> {
        self.size = size;
        let mode = self.breakpoint.classify(size.width);
        if mode == self.mode {
            return None;
        }
        debug!(?mode, width = size.width, "viewport mode transition");
        self.mode = mode;
        for (_, listener) in &mut self.listeners {
            listener(mode);
        }
        Some(mode)
    }

    /// Register a listener invoked once per mode transition.
    pub fn on_change(&mut self, listener: impl FnMut(ViewportMode) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns `false` if it was already removed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }
}

impl ViewportModeSignal for WidthSignal {
    fn current(&self) -> ViewportMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn phone() -> Size {
        Size::new(375.0, 812.0)
    }

    #[test]
    fn breakpoint_is_inclusive() {
        let bp = Breakpoint::default();
        assert_eq!(bp.classify(899.9), ViewportMode::Mobile);
        assert_eq!(bp.classify(900.0), ViewportMode::Desktop);
        assert_eq!(bp.classify(1440.0), ViewportMode::Desktop);
    }

    #[test]
    fn listeners_fire_once_per_transition() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut signal = WidthSignal::new(Breakpoint::default(), phone());
        let sink = Rc::clone(&seen);
        signal.on_change(move |mode| sink.borrow_mut().push(mode));

        for width in [400.0, 500.0, 950.0, 1200.0, 1300.0, 800.0, 700.0, 901.0] {
            signal.resize(Size::new(width, 800.0));
        }

        assert_eq!(
            *seen.borrow(),
            vec![
                ViewportMode::Desktop,
                ViewportMode::Mobile,
                ViewportMode::Desktop
            ]
        );
        assert_eq!(signal.current(), ViewportMode::Desktop);
        assert_eq!(signal.size().width, 901.0);
    }

    #[test]
    fn removed_listeners_stop_firing() {
        let count = Rc::new(RefCell::new(0_u32));
        let mut signal = WidthSignal::new(Breakpoint::new(600.0), phone());
        let sink = Rc::clone(&count);
        let id = signal.on_change(move |_| *sink.borrow_mut() += 1);

        signal.resize(Size::new(700.0, 0.0));
        assert!(signal.remove_listener(id));
        assert!(!signal.remove_listener(id));
        signal.resize(Size::new(300.0, 0.0));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn missing_signal_is_mobile() {
        let none: Option<WidthSignal> = None;
        assert_eq!(none.current(), ViewportMode::Mobile);
        assert_eq!(Some(ViewportMode::Desktop).current(), ViewportMode::Desktop);
    }
}
