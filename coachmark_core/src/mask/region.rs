// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus and block region declarations.
//!
//! A [`FocusRegion`] has two independently sized areas:
//!
//! - the **touch rect**, which is always the anchor rect itself, unshaped;
//! - the **mask outline**, which is the anchor rect reshaped by the
//!   region's [`MaskShape`] and cut out of the scrim.
//!
//! Keeping them apart lets a generous rounded highlight surround a control
//! without widening the control's real tap target.

use core::fmt;

use kurbo::{Insets, Rect, RoundedRect, Size, Vec2};

use crate::backend::ElementResolver;
use crate::error::ConfigError;

use super::id::ElementId;

/// A callback invoked synchronously when a region or affordance is hit.
pub type Action = Box<dyn FnMut()>;

/// Where a region sits in the overlay's coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// A live host element; its bounds are resolved on every use.
    Element(ElementId),
    /// A fixed rectangle; rescaled by [`OverlayMask::resize`](super::OverlayMask::resize).
    Rect(Rect),
}

impl Anchor {
    /// Returns the anchor's current rect, or `None` if the element is not on
    /// screen.
    #[must_use]
    pub fn resolve(&self, resolver: &dyn ElementResolver) -> Option<Rect> {
        match *self {
            Self::Element(id) => resolver.resolve(id),
            Self::Rect(rect) => Some(rect),
        }
    }
}

impl From<ElementId> for Anchor {
    fn from(id: ElementId) -> Self {
        Self::Element(id)
    }
}

impl From<Rect> for Anchor {
    fn from(rect: Rect) -> Self {
        Self::Rect(rect)
    }
}

/// How a focus region's cut-out is derived from its anchor rect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaskShape {
    /// The anchor rect grown by `insets` on each side and rounded by
    /// `corner_radius`. Negative insets shrink it.
    Rect {
        /// Per-side growth; `x0` left, `y0` top, `x1` right, `y1` bottom.
        insets: Insets,
        /// Corner radius of the resulting rect.
        corner_radius: f64,
    },
    /// A circle centred on the anchor whose diameter is the anchor's diagonal,
    /// rounded to the nearest whole unit, plus twice `radius_inset`.
    Circle {
        /// Extra radius added around the rounded diagonal.
        radius_inset: f64,
    },
}

impl MaskShape {
    /// The anchor rect itself with square corners.
    pub const EXACT: Self = Self::Rect {
        insets: Insets::ZERO,
        corner_radius: 0.0,
    };

    /// Computes the outline cut out of the scrim for the given anchor rect.
    ///
    /// Circles come out as a square [`RoundedRect`] whose corner radius is
    /// half its side.
    pub fn outline(&self, anchor: Rect) -> Result<RoundedRect, ConfigError> {
        match *self {
            Self::Rect {
                insets,
                corner_radius,
            } => {
                let rect = Rect::new(
                    anchor.x0 - insets.x0,
                    anchor.y0 - insets.y0,
                    anchor.x1 + insets.x1,
                    anchor.y1 + insets.y1,
                );
                if rect.width() < 0.0 || rect.height() < 0.0 {
                    return Err(ConfigError::NegativeMaskSize {
                        width: rect.width(),
                        height: rect.height(),
                    });
                }
                Ok(RoundedRect::from_rect(rect, corner_radius))
            }
            Self::Circle { radius_inset } => {
                let diameter = circle_diameter(anchor.size(), radius_inset);
                if diameter < 0.0 {
                    return Err(ConfigError::NegativeCircleDiameter(diameter));
                }
                let square = Rect::from_center_size(anchor.center(), Size::new(diameter, diameter));
                Ok(RoundedRect::from_rect(square, diameter / 2.0))
            }
        }
    }

    /// Checks the parameters that do not depend on the anchor.
    fn validate_params(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Rect {
                insets,
                corner_radius,
            } => {
                let finite = [insets.x0, insets.y0, insets.x1, insets.y1, corner_radius]
                    .iter()
                    .all(|v| v.is_finite());
                if !finite {
                    return Err(ConfigError::NonFiniteGeometry);
                }
                if corner_radius < 0.0 {
                    return Err(ConfigError::NegativeCornerRadius(corner_radius));
                }
                Ok(())
            }
            Self::Circle { radius_inset } => {
                if radius_inset.is_finite() {
                    Ok(())
                } else {
                    Err(ConfigError::NonFiniteGeometry)
                }
            }
        }
    }
}

impl Default for MaskShape {
    fn default() -> Self {
        Self::EXACT
    }
}

/// Diameter of a circle mask around a box of the given size.
///
/// The raw diagonal is rounded *before* the inset is added.
#[must_use]
pub fn circle_diameter(size: Size, radius_inset: f64) -> f64 {
    Vec2::new(size.width, size.height).hypot().round() + radius_inset * 2.0
}

/// A cut-out area that stays interactive.
pub struct FocusRegion {
    /// What the region is attached to.
    pub anchor: Anchor,
    /// How the visible cut-out is derived from the anchor.
    pub shape: MaskShape,
    on_activate: Option<Action>,
}

impl fmt::Debug for FocusRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusRegion")
            .field("anchor", &self.anchor)
            .field("shape", &self.shape)
            .field("on_activate", &self.on_activate.is_some())
            .finish()
    }
}

impl FocusRegion {
    /// Creates a region with the given anchor and shape and no callback.
    #[must_use]
    pub fn new(anchor: impl Into<Anchor>, shape: MaskShape) -> Self {
        Self {
            anchor: anchor.into(),
            shape,
            on_activate: None,
        }
    }

    /// A region exactly covering a host element.
    #[must_use]
    pub fn element(id: ElementId) -> Self {
        Self::new(id, MaskShape::EXACT)
    }

    /// A region exactly covering a fixed rect.
    #[must_use]
    pub fn rect(rect: Rect) -> Self {
        Self::new(rect, MaskShape::EXACT)
    }

    /// Grows the cut-out by `insets` and rounds it by `corner_radius`.
    #[must_use]
    pub fn inset(mut self, insets: Insets, corner_radius: f64) -> Self {
        self.shape = MaskShape::Rect {
            insets,
            corner_radius,
        };
        self
    }

    /// Makes the cut-out a circle with the given radius inset.
    #[must_use]
    pub fn circle(mut self, radius_inset: f64) -> Self {
        self.shape = MaskShape::Circle { radius_inset };
        self
    }

    /// Sets the callback fired when a pointer lands in the touch rect.
    #[must_use]
    pub fn on_activate(mut self, action: impl FnMut() + 'static) -> Self {
        self.on_activate = Some(Box::new(action));
        self
    }

    /// Whether an activation callback is set.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.on_activate.is_some()
    }

    /// The exact tappable rect: the anchor rect, never the mask outline.
    #[must_use]
    pub fn touch_rect(&self, resolver: &dyn ElementResolver) -> Option<Rect> {
        self.anchor.resolve(resolver)
    }

    /// The outline cut out of the scrim, or `None` if the anchor element is
    /// not on screen.
    ///
    /// # Panics
    ///
    /// Panics if an element-anchored region resolves to a rect that the
    /// shape cannot be applied to (e.g. insets shrinking it below zero).
    /// Fixed-rect regions are validated when added and never panic here.
    #[must_use]
    pub fn mask_outline(&self, resolver: &dyn ElementResolver) -> Option<RoundedRect> {
        let anchor = self.anchor.resolve(resolver)?;
        match self.shape.outline(anchor) {
            Ok(outline) => Some(outline),
            Err(err) => panic!("malformed mask for {:?}: {err}", self.anchor),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.shape.validate_params()?;
        if let Anchor::Rect(rect) = self.anchor {
            if !rect.is_finite() {
                return Err(ConfigError::NonFiniteGeometry);
            }
            self.shape.outline(rect)?;
        }
        Ok(())
    }

    pub(crate) fn activate(&mut self) {
        if let Some(action) = &mut self.on_activate {
            action();
        }
    }
}

/// An area whose taps are observed but never change visibility.
pub struct BlockRegion {
    /// The observed rect, in overlay coordinates.
    pub rect: Rect,
    on_tap: Option<Action>,
}

impl fmt::Debug for BlockRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRegion")
            .field("rect", &self.rect)
            .field("on_tap", &self.on_tap.is_some())
            .finish()
    }
}

impl BlockRegion {
    /// Creates a block region with no callback.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self { rect, on_tap: None }
    }

    /// Sets the callback fired when a pointer lands in the rect.
    #[must_use]
    pub fn on_tap(mut self, action: impl FnMut() + 'static) -> Self {
        self.on_tap = Some(Box::new(action));
        self
    }

    /// Whether a tap callback is set.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.on_tap.is_some()
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.rect.is_finite() {
            return Err(ConfigError::NonFiniteGeometry);
        }
        if self.rect.width() < 0.0 || self.rect.height() < 0.0 {
            return Err(ConfigError::NegativeMaskSize {
                width: self.rect.width(),
                height: self.rect.height(),
            });
        }
        Ok(())
    }

    pub(crate) fn tap(&mut self) {
        if let Some(action) = &mut self.on_tap {
            action();
        }
    }
}

/// One entry of an [`OverlayMask`](super::OverlayMask)'s ordered region list.
#[derive(Debug)]
pub enum Region {
    /// A cut-out, pass-through area.
    Focus(FocusRegion),
    /// An observed, pass-through area with no cut-out.
    Block(BlockRegion),
}

/// Which kind of region a pointer matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// A [`FocusRegion`].
    Focus,
    /// A [`BlockRegion`].
    Block,
}

impl Region {
    /// The kind of this region.
    #[must_use]
    pub fn kind(&self) -> RegionKind {
        match self {
            Self::Focus(_) => RegionKind::Focus,
            Self::Block(_) => RegionKind::Block,
        }
    }

    /// The rect a pointer must land in to match this region.
    #[must_use]
    pub fn hit_rect(&self, resolver: &dyn ElementResolver) -> Option<Rect> {
        match self {
            Self::Focus(focus) => focus.touch_rect(resolver),
            Self::Block(block) => Some(block.rect),
        }
    }
}
