// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host pieces for driving walkthroughs without a UI toolkit.
//!
//! - [`RecordingSurface`] is a [`DisplaySurface`] that logs every call.
//! - [`Elements`] is an [`ElementResolver`] over a mutable element map, so
//!   tests can move or remove elements between pointer events.
//! - [`MemoryTemplates`] serves overlays by template name or by
//!   collection/screen pair.

use std::collections::BTreeMap;
use std::fmt;

use coachmark_core::backend::{DisplaySurface, ElementResolver, SurfaceKey};
use coachmark_core::error::SourceError;
use coachmark_core::mask::ElementId;
use coachmark_core::overlay::Overlay;
use coachmark_core::source::{ScreenTemplates, TemplateLoader};
use kurbo::Rect;

/// One call a [`RecordingSurface`] received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceOp {
    /// `attach` with this key.
    Attach(SurfaceKey),
    /// `detach` with this key.
    Detach(SurfaceKey),
    /// `request_relayout`.
    Relayout,
}

/// A display surface that records calls and tracks what is attached.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    log: Vec<SurfaceOp>,
    attached: Vec<SurfaceKey>,
    max_attached: usize,
}

impl RecordingSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received, oldest first.
    #[must_use]
    pub fn log(&self) -> &[SurfaceOp] {
        &self.log
    }

    /// Keys currently attached, in attach order.
    #[must_use]
    pub fn attached(&self) -> &[SurfaceKey] {
        &self.attached
    }

    /// The largest number of keys ever attached at once.
    #[must_use]
    pub fn max_attached(&self) -> usize {
        self.max_attached
    }

    /// Clears the call log, keeping the attached set.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl DisplaySurface for RecordingSurface {
    fn attach(&mut self, key: &SurfaceKey, overlay: &Overlay) {
        tracing::trace!(%key, regions = overlay.mask().len(), "attach");
        self.log.push(SurfaceOp::Attach(key.clone()));
        self.attached.push(key.clone());
        self.max_attached = self.max_attached.max(self.attached.len());
    }

    fn detach(&mut self, key: &SurfaceKey) {
        tracing::trace!(%key, "detach");
        self.log.push(SurfaceOp::Detach(key.clone()));
        self.attached.retain(|k| k != key);
    }

    fn request_relayout(&mut self) {
        self.log.push(SurfaceOp::Relayout);
    }
}

/// A mutable map of element bounds.
#[derive(Clone, Debug, Default)]
pub struct Elements {
    rects: BTreeMap<ElementId, Rect>,
}

impl Elements {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places (or moves) an element.
    pub fn set(&mut self, id: ElementId, rect: Rect) {
        self.rects.insert(id, rect);
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, id: ElementId, rect: Rect) -> Self {
        self.set(id, rect);
        self
    }

    /// Takes an element off screen.
    pub fn remove(&mut self, id: ElementId) -> Option<Rect> {
        self.rects.remove(&id)
    }
}

impl ElementResolver for Elements {
    fn resolve(&self, element: ElementId) -> Option<Rect> {
        self.rects.get(&element).copied()
    }
}

type Factory = Box<dyn Fn() -> Overlay>;

/// Template resources held in memory.
///
/// Each entry is a factory, so every load instantiates a fresh overlay the
/// way a host would inflate a resource file.
#[derive(Default)]
pub struct MemoryTemplates {
    templates: BTreeMap<String, Factory>,
    screens: BTreeMap<(String, String), Factory>,
    loads: usize,
}

impl fmt::Debug for MemoryTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTemplates")
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .field("screens", &self.screens.keys().collect::<Vec<_>>())
            .field("loads", &self.loads)
            .finish()
    }
}

impl MemoryTemplates {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named template.
    #[must_use]
    pub fn template(mut self, name: &str, factory: impl Fn() -> Overlay + 'static) -> Self {
        self.templates.insert(name.into(), Box::new(factory));
        self
    }

    /// Adds a screen to a collection.
    #[must_use]
    pub fn screen(
        mut self,
        collection: &str,
        screen: &str,
        factory: impl Fn() -> Overlay + 'static,
    ) -> Self {
        self.screens
            .insert((collection.into(), screen.into()), Box::new(factory));
        self
    }

    /// Number of successful loads and instantiations.
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl TemplateLoader for MemoryTemplates {
    fn load(&mut self, name: &str) -> Result<Overlay, SourceError> {
        let factory = self
            .templates
            .get(name)
            .ok_or_else(|| SourceError::NotFound { name: name.into() })?;
        let overlay = factory();
        self.loads += 1;
        Ok(overlay)
    }
}

impl ScreenTemplates for MemoryTemplates {
    fn instantiate(&mut self, collection: &str, screen: &str) -> Result<Overlay, SourceError> {
        if !self.screens.keys().any(|(c, _)| c == collection) {
            return Err(SourceError::NotFound {
                name: collection.into(),
            });
        }
        let factory = self
            .screens
            .get(&(collection.to_owned(), screen.to_owned()))
            .ok_or_else(|| SourceError::NotFound {
                name: format!("{collection}/{screen}"),
            })?;
        let overlay = factory();
        self.loads += 1;
        Ok(overlay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coachmark_core::coordinator::Filler;
    use coachmark_core::mask::OverlayMask;
    use kurbo::Size;

    #[test]
    fn surface_tracks_peak_attachment() {
        let mut surface = RecordingSurface::new();
        let overlay = Overlay::new(OverlayMask::new(Size::ZERO));
        let key = SurfaceKey::Filler(Filler::Blank);
        surface.attach(&key, &overlay);
        surface.request_relayout();
        surface.detach(&key);
        assert_eq!(
            surface.log(),
            [
                SurfaceOp::Attach(key.clone()),
                SurfaceOp::Relayout,
                SurfaceOp::Detach(key),
            ]
        );
        assert!(surface.attached().is_empty());
        assert_eq!(surface.max_attached(), 1);
    }

    #[test]
    fn templates_report_missing_collection_and_screen() {
        let mut templates = MemoryTemplates::new().screen("Main", "Tour", || {
            Overlay::new(OverlayMask::new(Size::new(1.0, 1.0)))
        });
        assert!(templates.instantiate("Main", "Tour").is_ok());
        assert_eq!(
            templates.instantiate("Other", "Tour").unwrap_err(),
            SourceError::NotFound {
                name: "Other".into()
            }
        );
        assert_eq!(
            templates.instantiate("Main", "Intro").unwrap_err(),
            SourceError::NotFound {
                name: "Main/Intro".into()
            }
        );
        assert_eq!(templates.loads(), 1);
    }
}
