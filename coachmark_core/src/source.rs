// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-side sources of step overlays.
//!
//! A step's overlay is either built explicitly in code, loaded from a named
//! template resource, or instantiated from a named screen of a template
//! collection. Once resolved, all three are plain [`Overlay`] values.

use crate::error::SourceError;
use crate::overlay::Overlay;

/// Loads overlays from named template resources.
pub trait TemplateLoader {
    /// Loads and instantiates the template called `name`.
    fn load(&mut self, name: &str) -> Result<Overlay, SourceError>;
}

/// Instantiates overlays from screens declared in template collections.
pub trait ScreenTemplates {
    /// Instantiates the screen `screen` from the collection `collection`.
    fn instantiate(&mut self, collection: &str, screen: &str) -> Result<Overlay, SourceError>;
}
