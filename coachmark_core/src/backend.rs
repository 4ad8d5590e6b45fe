// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for platform integrations.
//!
//! Coachmark leaves everything platform-specific to the host. A host
//! provides the following pieces:
//!
//! - **Display surface**: Implements [`DisplaySurface`] to add and remove
//!   overlay layers from its top-level window (e.g. a `CALayer` tree, a DOM
//!   root, a compositor layer). Only the
//!   [`TutorialCoordinator`](crate::coordinator::TutorialCoordinator) calls
//!   it; nothing else may attach or detach overlays.
//!
//! - **Element resolver**: Implements [`ElementResolver`] so element-anchored
//!   regions can read the element's current bounds, converted into the
//!   overlay's coordinate space. It is called synchronously while building
//!   paths and classifying pointers.
//!
//! - **Overlay sources**: Optionally implements
//!   [`TemplateLoader`](crate::source::TemplateLoader) and
//!   [`ScreenTemplates`](crate::source::ScreenTemplates) so steps can be
//!   declared by template name.
//!
//! # Pointer routing
//!
//! A typical host event handler looks like this:
//!
//! ```rust,ignore
//! fn on_pointer_down(point: Point) {
//!     match coordinator.handle_pointer(point, &elements) {
//!         Disposition::PassThrough => deliver_to_ui(point),
//!         Disposition::Swallow => {}
//!     }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use kurbo::Rect;

use crate::coordinator::Filler;
use crate::mask::ElementId;
use crate::overlay::Overlay;
use crate::step::StepId;

/// Identifies an overlay that can be attached to the display surface.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SurfaceKey {
    /// A registered walkthrough step.
    Step(StepId),
    /// One of the coordinator's built-in fillers.
    Filler(Filler),
}

impl fmt::Debug for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(id) => write!(f, "Step({:?})", id.as_str()),
            Self::Filler(filler) => write!(f, "Filler({filler:?})"),
        }
    }
}

impl fmt::Display for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(id) => f.write_str(id.as_str()),
            Self::Filler(filler) => f.write_str(filler.name()),
        }
    }
}

impl From<StepId> for SurfaceKey {
    fn from(id: StepId) -> Self {
        Self::Step(id)
    }
}

impl From<Filler> for SurfaceKey {
    fn from(filler: Filler) -> Self {
        Self::Filler(filler)
    }
}

/// The host's top-level layer that overlays are attached to.
///
/// Both native and test-double surfaces implement this trait. The
/// coordinator guarantees that at most one key is attached at a time and that
/// every `attach` is preceded by a `detach` of whatever was attached.
pub trait DisplaySurface {
    /// Adds the overlay's layer on top of the host UI.
    fn attach(&mut self, key: &SurfaceKey, overlay: &Overlay);

    /// Removes a previously attached overlay.
    fn detach(&mut self, key: &SurfaceKey);

    /// Asks the host to lay out and repaint the surface.
    fn request_relayout(&mut self);
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn attach(&mut self, key: &SurfaceKey, overlay: &Overlay) {
        (**self).attach(key, overlay);
    }

    fn detach(&mut self, key: &SurfaceKey) {
        (**self).detach(key);
    }

    fn request_relayout(&mut self) {
        (**self).request_relayout();
    }
}

/// Resolves host elements to their current bounds in overlay coordinates.
pub trait ElementResolver {
    /// Returns the element's bounds, or `None` if it is not on screen.
    fn resolve(&self, element: ElementId) -> Option<Rect>;
}

/// A resolver for hosts that only use fixed-rect anchors.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoElements;

impl ElementResolver for NoElements {
    fn resolve(&self, element: ElementId) -> Option<Rect> {
        _ = element;
        None
    }
}

impl ElementResolver for BTreeMap<ElementId, Rect> {
    fn resolve(&self, element: ElementId) -> Option<Rect> {
        self.get(&element).copied()
    }
}

impl<H: std::hash::BuildHasher> ElementResolver for HashMap<ElementId, Rect, H> {
    fn resolve(&self, element: ElementId) -> Option<Rect> {
        self.get(&element).copied()
    }
}
