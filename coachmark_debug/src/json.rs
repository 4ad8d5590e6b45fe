// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recordings and mask geometry.
//!
//! [`export`] writes events recorded by a [`RecorderSink`](super::recorder::RecorderSink)
//! as a JSON array, one object per event. [`mask_snapshot`] describes an
//! [`OverlayMask`] as a JSON object, including its scrim as an SVG path
//! string, for inspecting layouts outside the host.

use std::io::{self, Write};

use coachmark_core::backend::{ElementResolver, SurfaceKey};
use coachmark_core::mask::{OverlayMask, Region};
use coachmark_core::step::StepId;
use kurbo::{Rect, RoundedRect};
use serde_json::{Value, json};

use crate::recorder::RecordedEvent;

/// Exports recorded events as a pretty-printed JSON array.
///
/// Each object carries the event `name` and its fields under `args`.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let values: Vec<Value> = events
        .iter()
        .map(|recorded| {
            let args = match recorded {
                RecordedEvent::Suppressed(e) => json!({ "target": e.target }),
                RecordedEvent::UnknownStep(e) => json!({ "id": e.id }),
                RecordedEvent::MissingAction(e) => json!({
                    "step": e.step.as_str(),
                    "affordance": e.affordance.as_str(),
                }),
                RecordedEvent::Attach(e) => json!({ "key": key_json(&e.key) }),
                RecordedEvent::Detach(e) => json!({ "key": key_json(&e.key) }),
                RecordedEvent::Transition(e) => json!({
                    "from": e.from.as_ref().map(StepId::as_str),
                    "to": e.to.as_ref().map(StepId::as_str),
                }),
                RecordedEvent::RegionHit(e) => json!({
                    "step": e.step.as_str(),
                    "index": e.hit.index,
                    "kind": format!("{:?}", e.hit.kind),
                    "x": e.point.x,
                    "y": e.point.y,
                }),
            };
            json!({ "name": recorded.name(), "args": args })
        })
        .collect();

    serde_json::to_writer_pretty(writer, &values)?;
    Ok(())
}

/// Describes a mask's regions, resolved outlines, and scrim path.
///
/// Element anchors are resolved through `resolver`; regions whose element is
/// not on screen are reported with a `null` hit rect and outline.
///
/// # Panics
///
/// Panics under the same conditions as
/// [`OverlayMask::resolved_outlines`].
#[must_use]
pub fn mask_snapshot(mask: &OverlayMask, resolver: &dyn ElementResolver) -> Value {
    let regions: Vec<Value> = mask
        .regions()
        .iter()
        .map(|region| match region {
            Region::Focus(focus) => json!({
                "kind": "focus",
                "anchor": format!("{:?}", focus.anchor),
                "touch": focus.touch_rect(resolver).map(rect_json),
                "outline": focus.mask_outline(resolver).map(outline_json),
                "has_action": focus.has_action(),
            }),
            Region::Block(block) => json!({
                "kind": "block",
                "touch": rect_json(block.rect),
                "has_action": block.has_action(),
            }),
        })
        .collect();

    let color = mask.color();
    let size = mask.size();
    json!({
        "size": [size.width, size.height],
        "color": [color.r, color.g, color.b, color.a],
        "regions": regions,
        "scrim": mask.compute_fill_path(mask.bounds(), resolver).to_svg(),
    })
}

fn key_json(key: &SurfaceKey) -> Value {
    match key {
        SurfaceKey::Step(id) => json!({ "step": id.as_str() }),
        SurfaceKey::Filler(filler) => json!({ "filler": filler.name() }),
    }
}

fn rect_json(rect: Rect) -> Value {
    json!([rect.x0, rect.y0, rect.x1, rect.y1])
}

fn outline_json(outline: RoundedRect) -> Value {
    json!({
        "rect": rect_json(outline.rect()),
        "radius": outline.radii().top_left,
    })
}
