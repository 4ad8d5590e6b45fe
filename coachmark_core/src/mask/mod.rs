// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay mask data model.
//!
//! An [`OverlayMask`] describes one walkthrough screen:
//!
//! - An ordered list of [`Region`]s. A [`FocusRegion`] is cut out of the
//!   scrim and stays tappable; a [`BlockRegion`] reports taps without
//!   cutting anything out.
//! - A size, against which fixed-rect anchors are expressed and
//!   [rescaled](OverlayMask::resize).
//! - A [`ScrimColor`].
//!
//! # Anchors
//!
//! A region is anchored either to a fixed [`Rect`](kurbo::Rect) or to a live
//! host element ([`ElementId`]). Element bounds are resolved through the
//! host's [`ElementResolver`](crate::backend::ElementResolver) every time a
//! path is built or a pointer is classified.
//!
//! # Invalidation
//!
//! The scrim path returned by [`OverlayMask::scrim_path`] is cached and
//! rebuilt whenever a region is added, the mask is resized or recoloured,
//! the requested bounds change, or a resolved element rect differs from the
//! one the cache was built with.

mod color;
mod id;
mod region;
mod store;

pub use color::ScrimColor;
pub use id::ElementId;
pub use region::{
    Action, Anchor, BlockRegion, FocusRegion, MaskShape, Region, RegionKind, circle_diameter,
};
pub use store::{Disposition, OverlayMask, PATH_TOLERANCE, RegionHit};
pub(crate) use store::is_drawable;
