// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walkthrough steps and their identifiers.

use core::borrow::Borrow;
use core::fmt;

use crate::error::ConfigError;
use crate::mask::Action;
use crate::overlay::{Affordance, Overlay};
use crate::source::{ScreenTemplates, TemplateLoader};

/// A non-empty step identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepId(String);

impl StepId {
    /// Validates and wraps an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyStepId);
        }
        Ok(Self(id))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StepId({:?})", self.0)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StepId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for StepId {
    type Error = ConfigError;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

/// One named screen of the walkthrough.
///
/// A step owns its overlay and its `on_next`/`on_prev` callbacks. The
/// callbacks run when the overlay's matching button is pressed, or when the
/// coordinator is asked to [`advance`](crate::coordinator::TutorialCoordinator::advance)
/// or [`retreat`](crate::coordinator::TutorialCoordinator::retreat).
pub struct OverlayStep {
    id: StepId,
    overlay: Overlay,
    on_next: Option<Action>,
    on_prev: Option<Action>,
}

impl fmt::Debug for OverlayStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayStep")
            .field("id", &self.id)
            .field("overlay", &self.overlay)
            .field("on_next", &self.on_next.is_some())
            .field("on_prev", &self.on_prev.is_some())
            .finish()
    }
}

impl OverlayStep {
    /// Creates a step from an explicitly built overlay.
    pub fn new(id: impl Into<String>, overlay: Overlay) -> Result<Self, ConfigError> {
        Ok(Self {
            id: StepId::new(id)?,
            overlay,
            on_next: None,
            on_prev: None,
        })
    }

    /// Creates a step whose overlay is loaded from a named template resource.
    pub fn from_template(
        id: impl Into<String>,
        name: &str,
        loader: &mut dyn TemplateLoader,
    ) -> Result<Self, ConfigError> {
        let id = StepId::new(id)?;
        let overlay = loader.load(name)?;
        Ok(Self::from_parts(id, overlay))
    }

    /// Creates a step whose overlay is a named screen of a template
    /// collection.
    pub fn from_screen(
        id: impl Into<String>,
        collection: &str,
        screen: &str,
        templates: &mut dyn ScreenTemplates,
    ) -> Result<Self, ConfigError> {
        let id = StepId::new(id)?;
        let overlay = templates.instantiate(collection, screen)?;
        Ok(Self::from_parts(id, overlay))
    }

    pub(crate) fn from_parts(id: StepId, overlay: Overlay) -> Self {
        Self {
            id,
            overlay,
            on_next: None,
            on_prev: None,
        }
    }

    /// Sets the callback run for [`Affordance::Next`].
    #[must_use]
    pub fn on_next(mut self, action: impl FnMut() + 'static) -> Self {
        self.on_next = Some(Box::new(action));
        self
    }

    /// Sets the callback run for [`Affordance::Prev`].
    #[must_use]
    pub fn on_prev(mut self, action: impl FnMut() + 'static) -> Self {
        self.on_prev = Some(Box::new(action));
        self
    }

    /// Replaces or clears the callback for an affordance.
    pub fn set_action(&mut self, affordance: Affordance, action: Option<Action>) {
        match affordance {
            Affordance::Next => self.on_next = action,
            Affordance::Prev => self.on_prev = action,
        }
    }

    /// Whether a callback is set for an affordance.
    #[must_use]
    pub fn has_action(&self, affordance: Affordance) -> bool {
        match affordance {
            Affordance::Next => self.on_next.is_some(),
            Affordance::Prev => self.on_prev.is_some(),
        }
    }

    /// The step identifier.
    #[must_use]
    pub fn id(&self) -> &StepId {
        &self.id
    }

    /// The step's overlay.
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Mutable access to the step's overlay.
    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    /// Runs the callback for an affordance. Returns `false` if none is set.
    pub(crate) fn run(&mut self, affordance: Affordance) -> bool {
        let action = match affordance {
            Affordance::Next => &mut self.on_next,
            Affordance::Prev => &mut self.on_prev,
        };
        match action {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}
