// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The displayable surface of a walkthrough step.

use kurbo::{Point, Rect, Size};

use crate::mask::{OverlayMask, ScrimColor, is_drawable};

/// A navigation button an overlay may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Affordance {
    /// Goes back to the previous step.
    Prev,
    /// Moves on to the next step.
    Next,
}

impl Affordance {
    /// A lowercase label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}

/// One screen of the walkthrough as the host displays it: a mask plus
/// optional previous/next buttons drawn on top of the scrim.
///
/// Buttons belong to the overlay, so a pointer on a button is consumed by
/// the overlay rather than passed to the UI below.
#[derive(Debug)]
pub struct Overlay {
    mask: OverlayMask,
    prev_button: Option<Rect>,
    next_button: Option<Rect>,
}

impl Overlay {
    /// Creates an overlay with no buttons.
    #[must_use]
    pub fn new(mask: OverlayMask) -> Self {
        Self {
            mask,
            prev_button: None,
            next_button: None,
        }
    }

    /// An empty overlay of the given size and colour; it swallows every
    /// pointer.
    #[must_use]
    pub fn filled(size: Size, color: ScrimColor) -> Self {
        Self::new(OverlayMask::new(size).with_color(color))
    }

    /// Places a button for the given affordance.
    #[must_use]
    pub fn with_button(mut self, affordance: Affordance, rect: Rect) -> Self {
        match affordance {
            Affordance::Prev => self.prev_button = Some(rect),
            Affordance::Next => self.next_button = Some(rect),
        }
        self
    }

    /// The button rect for an affordance, if the overlay has that button.
    #[must_use]
    pub fn button(&self, affordance: Affordance) -> Option<Rect> {
        match affordance {
            Affordance::Prev => self.prev_button,
            Affordance::Next => self.next_button,
        }
    }

    /// The button under `point`, if any. `Next` is checked before `Prev`.
    #[must_use]
    pub fn button_at(&self, point: Point) -> Option<Affordance> {
        [Affordance::Next, Affordance::Prev]
            .into_iter()
            .find(|&a| self.button(a).is_some_and(|rect| rect.contains(point)))
    }

    /// The overlay's mask.
    #[must_use]
    pub fn mask(&self) -> &OverlayMask {
        &self.mask
    }

    /// Mutable access to the overlay's mask, e.g. to add regions or resize.
    pub fn mask_mut(&mut self) -> &mut OverlayMask {
        &mut self.mask
    }

    /// Rescales the mask and both buttons' origins to a new size.
    ///
    /// Empty or non-finite sizes are ignored, like [`OverlayMask::resize`].
    pub fn resize(&mut self, new_size: Size) {
        let old = self.mask.size();
        if old == new_size || !is_drawable(new_size) {
            return;
        }
        let sx = if old.width == 0.0 { 1.0 } else { new_size.width / old.width };
        let sy = if old.height == 0.0 { 1.0 } else { new_size.height / old.height };
        for button in [&mut self.prev_button, &mut self.next_button]
            .into_iter()
            .flatten()
        {
            *button = button.with_origin(Point::new(button.x0 * sx, button.y0 * sy));
        }
        self.mask.resize(new_size);
    }
}
