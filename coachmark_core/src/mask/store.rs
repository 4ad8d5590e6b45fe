// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered region storage with scrim path construction and hit classification.

use kurbo::{BezPath, Point, Rect, RoundedRect, Shape, Size};

use crate::backend::ElementResolver;
use crate::error::ConfigError;

use super::color::ScrimColor;
use super::region::{Anchor, BlockRegion, FocusRegion, Region, RegionKind};

/// Flattening tolerance used when converting outlines to path elements.
pub const PATH_TOLERANCE: f64 = 0.1;

/// What should happen to a pointer event that reached an overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// The event continues to the UI underneath the overlay.
    PassThrough,
    /// The overlay consumes the event.
    Swallow,
}

/// The region a pointer matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionHit {
    /// Position of the region in insertion order.
    pub index: usize,
    /// Whether the region is a focus or block region.
    pub kind: RegionKind,
}

/// The scrim path as last built, plus the inputs it was built from.
#[derive(Debug)]
struct ScrimCache {
    bounds: Rect,
    outlines: Vec<RoundedRect>,
    path: BezPath,
}

/// The cut-out geometry and hit classifier for one overlay screen.
///
/// Regions are kept in insertion order. Path construction and hit
/// classification both walk that order, and the first region whose hit rect
/// contains a point wins. Overlapping regions are allowed.
///
/// The scrim is `bounds` minus every focus region's outline and must be
/// filled with the even-odd rule so that overlapping outlines subtract
/// correctly.
#[derive(Debug)]
pub struct OverlayMask {
    size: Size,
    color: ScrimColor,
    regions: Vec<Region>,
    cache: Option<ScrimCache>,
}

impl OverlayMask {
    /// Creates an empty mask covering `size` with the default dimming colour.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            color: ScrimColor::default(),
            regions: Vec::new(),
            cache: None,
        }
    }

    /// Sets the scrim colour.
    #[must_use]
    pub fn with_color(mut self, color: ScrimColor) -> Self {
        self.set_color(color);
        self
    }

    /// Sets the scrim colour and invalidates the cached path.
    pub fn set_color(&mut self, color: ScrimColor) {
        self.color = color;
        self.cache = None;
    }

    /// The scrim colour.
    #[must_use]
    pub fn color(&self) -> ScrimColor {
        self.color
    }

    /// The size the mask's fixed rects are expressed against.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The overlay's bounds, anchored at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.size.to_rect()
    }

    /// All regions in insertion order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of declared regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether no region has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Appends a focus region.
    ///
    /// Overlap with earlier regions is not checked. A fixed-rect anchor is
    /// validated against its shape immediately; an element anchor can only
    /// have its shape parameters checked here.
    pub fn add_focus(&mut self, region: FocusRegion) -> Result<(), ConfigError> {
        region.validate()?;
        self.regions.push(Region::Focus(region));
        self.cache = None;
        Ok(())
    }

    /// Appends a block region.
    pub fn add_block(&mut self, region: BlockRegion) -> Result<(), ConfigError> {
        region.validate()?;
        self.regions.push(Region::Block(region));
        self.cache = None;
        Ok(())
    }

    /// Adapts fixed rects to new overlay bounds, e.g. after a rotation.
    ///
    /// The origin of every fixed-rect focus anchor and every block rect is
    /// multiplied by `new / old` per axis; their sizes are kept. An axis whose
    /// old extent is zero is not scaled. Element-anchored regions follow
    /// their element and are left alone.
    ///
    /// A size with a zero, negative or non-finite extent is ignored, so a
    /// transient empty layout pass cannot collapse the fixed rects.
    pub fn resize(&mut self, new_size: Size) {
        if new_size == self.size {
            return;
        }
        if !is_drawable(new_size) {
            tracing::debug!(size = ?self.size, to = ?new_size, "ignoring empty overlay resize");
            return;
        }
        let sx = scale_factor(self.size.width, new_size.width);
        let sy = scale_factor(self.size.height, new_size.height);

        for region in &mut self.regions {
            let rect = match region {
                Region::Focus(FocusRegion {
                    anchor: Anchor::Rect(rect),
                    ..
                }) => rect,
                Region::Block(block) => &mut block.rect,
                Region::Focus(_) => continue,
            };
            *rect = rect.with_origin(Point::new(rect.x0 * sx, rect.y0 * sy));
        }

        tracing::debug!(
            from = ?self.size,
            to = ?new_size,
            sx,
            sy,
            "overlay mask resized"
        );
        self.size = new_size;
        self.cache = None;
    }

    /// Resolves every focus region's outline in region order, skipping
    /// elements that are not on screen.
    ///
    /// # Panics
    ///
    /// Panics if an element-anchored region resolves to geometry its shape
    /// cannot be applied to.
    #[must_use]
    pub fn resolved_outlines(&self, resolver: &dyn ElementResolver) -> Vec<RoundedRect> {
        let mut outlines = Vec::with_capacity(self.regions.len());
        for region in &self.regions {
            let Region::Focus(focus) = region else {
                continue;
            };
            match focus.mask_outline(resolver) {
                Some(outline) => outlines.push(outline),
                None => tracing::debug!(anchor = ?focus.anchor, "focus anchor not on screen"),
            }
        }
        outlines
    }

    /// Builds `bounds` minus every focus outline, without touching the cache.
    ///
    /// # Panics
    ///
    /// See [`resolved_outlines`](Self::resolved_outlines).
    #[must_use]
    pub fn compute_fill_path(&self, bounds: Rect, resolver: &dyn ElementResolver) -> BezPath {
        build_path(bounds, &self.resolved_outlines(resolver))
    }

    /// Returns the scrim path for `bounds`, rebuilding it only when a region
    /// was added, the mask was resized or recoloured, `bounds` changed, or
    /// some element moved since the last build.
    ///
    /// # Panics
    ///
    /// See [`resolved_outlines`](Self::resolved_outlines).
    pub fn scrim_path(&mut self, bounds: Rect, resolver: &dyn ElementResolver) -> &BezPath {
        let outlines = self.resolved_outlines(resolver);
        let fresh = self
            .cache
            .as_ref()
            .is_some_and(|cache| cache.bounds == bounds && cache.outlines == outlines);
        if !fresh {
            self.cache = None;
        }
        let cache = self.cache.get_or_insert_with(|| ScrimCache {
            bounds,
            path: build_path(bounds, &outlines),
            outlines,
        });
        &cache.path
    }

    /// Whether an explicit invalidation is pending since the last
    /// [`scrim_path`](Self::scrim_path) call.
    ///
    /// Element movement is only detected when the path is next requested.
    #[must_use]
    pub fn needs_rebuild(&self) -> bool {
        self.cache.is_none()
    }

    /// Finds the first region whose hit rect contains `point`, without firing
    /// any callback.
    ///
    /// Focus regions match on their touch rect, never on their mask outline.
    #[must_use]
    pub fn hit(&self, point: Point, resolver: &dyn ElementResolver) -> Option<RegionHit> {
        self.regions.iter().enumerate().find_map(|(index, region)| {
            region
                .hit_rect(resolver)
                .filter(|rect| rect.contains(point))
                .map(|_| RegionHit {
                    index,
                    kind: region.kind(),
                })
        })
    }

    /// Classifies a pointer and fires the matched region's callback.
    ///
    /// A pointer inside a focus region's touch rect or a block region's rect
    /// fires that region's callback once and passes through; anything else is
    /// swallowed.
    pub fn classify(&mut self, point: Point, resolver: &dyn ElementResolver) -> Disposition {
        match self.hit(point, resolver) {
            Some(hit) => {
                self.activate(hit.index);
                Disposition::PassThrough
            }
            None => Disposition::Swallow,
        }
    }

    /// Fires the callback of the region at `index`, if it has one.
    ///
    /// `index` always comes from a [`RegionHit`] returned by `classify`.
    pub(crate) fn activate(&mut self, index: usize) {
        match &mut self.regions[index] {
            Region::Focus(focus) => focus.activate(),
            Region::Block(block) => block.tap(),
        }
    }
}

/// Whether `size` has a positive, finite extent on both axes.
pub(crate) fn is_drawable(size: Size) -> bool {
    size.is_finite() && size.width > 0.0 && size.height > 0.0
}

fn scale_factor(old: f64, new: f64) -> f64 {
    if old == 0.0 { 1.0 } else { new / old }
}

fn build_path(bounds: Rect, outlines: &[RoundedRect]) -> BezPath {
    let mut path = bounds.to_path(PATH_TOLERANCE);
    for outline in outlines {
        path.extend(outline.path_elements(PATH_TOLERANCE));
    }
    path
}
