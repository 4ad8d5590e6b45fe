// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator configuration.

use kurbo::Size;

use crate::mask::ScrimColor;

/// Settings a [`TutorialCoordinator`](crate::coordinator::TutorialCoordinator)
/// is constructed with.
///
/// With the `serde` feature this type can be read from the host's settings
/// file; missing fields take their default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoordinatorConfig {
    /// Whether show requests are honoured. Hosts typically clear this on
    /// repeat visits.
    pub enabled: bool,
    /// Whether [`show_blank`](crate::coordinator::TutorialCoordinator::show_blank)
    /// and [`show_transparent`](crate::coordinator::TutorialCoordinator::show_transparent)
    /// run the previous step's `on_next` callback.
    pub filler_runs_next_action: bool,
    /// Whether a filler stays attached after
    /// [`show_filler`](crate::coordinator::TutorialCoordinator::show_filler)
    /// returns, until the next show or hide. When `false` the filler only
    /// covers the screen while the transition's callbacks run.
    pub linger_fillers: bool,
    /// Size of the built-in filler overlays, normally the screen size.
    ///
    /// Defaults to [`Size::ZERO`], which draws nothing: hosts set it here or
    /// call `TutorialCoordinator::resize` once the screen is laid out.
    pub screen_size: Size,
    /// Scrim colour of the blank filler.
    pub blank_color: ScrimColor,
    /// Scrim colour of the transparent filler.
    pub transparent_color: ScrimColor,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filler_runs_next_action: false,
            linger_fillers: false,
            screen_size: Size::ZERO,
            blank_color: ScrimColor::DIM,
            transparent_color: ScrimColor::TRANSPARENT,
        }
    }
}

impl CoordinatorConfig {
    /// Sets whether show requests are honoured.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets whether the filler shortcuts run the previous step's `on_next`.
    #[must_use]
    pub fn filler_runs_next_action(mut self, run: bool) -> Self {
        self.filler_runs_next_action = run;
        self
    }

    /// Sets whether fillers stay attached after a filler transition.
    #[must_use]
    pub fn linger_fillers(mut self, linger: bool) -> Self {
        self.linger_fillers = linger;
        self
    }

    /// Sets the filler overlay size.
    #[must_use]
    pub fn screen_size(mut self, size: Size) -> Self {
        self.screen_size = size;
        self
    }

    /// Sets the blank filler's colour.
    #[must_use]
    pub fn blank_color(mut self, color: ScrimColor) -> Self {
        self.blank_color = color;
        self
    }

    /// Sets the transparent filler's colour.
    #[must_use]
    pub fn transparent_color(mut self, color: ScrimColor) -> Self {
        self.transparent_color = color;
        self
    }
}
