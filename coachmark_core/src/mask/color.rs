// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrim fill colour.

/// Straight (non-premultiplied) RGBA colour used to fill an overlay's scrim.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrimColor {
    /// Red, `0.0..=1.0`.
    pub r: f32,
    /// Green, `0.0..=1.0`.
    pub g: f32,
    /// Blue, `0.0..=1.0`.
    pub b: f32,
    /// Alpha, `0.0..=1.0`.
    pub a: f32,
}

impl ScrimColor {
    /// Half-transparent black, the default dimming scrim.
    pub const DIM: Self = Self::rgba(0.0, 0.0, 0.0, 0.5);

    /// Fully transparent; the scrim still intercepts pointers but draws nothing.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Creates a colour from its components.
    #[inline]
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Whether drawing this colour has no visible effect.
    #[inline]
    #[must_use]
    pub fn is_invisible(self) -> bool {
        self.a <= 0.0
    }
}

impl Default for ScrimColor {
    fn default() -> Self {
        Self::DIM
    }
}
