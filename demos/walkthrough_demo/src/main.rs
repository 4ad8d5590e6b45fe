// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted walkthrough that exercises the coordinator and diagnostics.
//!
//! Registers three steps over a fake phone screen, replays a list of taps
//! through the coordinator, and prints every diagnostic with a
//! [`PrettyPrintSink`](coachmark_debug::pretty::PrettyPrintSink). The
//! recording and a geometry snapshot of the first step are written to
//! `walkthrough.json`.
//!
//! Set `RUST_LOG=coachmark_core=debug` to also see the coordinator's own
//! `tracing` output.

use std::cell::RefCell;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;

use coachmark_core::config::CoordinatorConfig;
use coachmark_core::coordinator::TutorialCoordinator;
use coachmark_core::mask::{BlockRegion, ElementId, FocusRegion, OverlayMask};
use coachmark_core::overlay::{Affordance, Overlay};
use coachmark_core::step::OverlayStep;
use coachmark_debug::pretty::PrettyPrintSink;
use coachmark_debug::recorder::RecorderSink;
use coachmark_harness::{Elements, RecordingSurface};
use kurbo::{Insets, Point, Rect, Size};
use tracing_subscriber::EnvFilter;

const SCREEN: Size = Size::new(375.0, 812.0);
const SEARCH: ElementId = ElementId(1);
const COMPOSE: ElementId = ElementId(2);
const TAB_BAR: Rect = Rect::new(0.0, 730.0, 375.0, 812.0);
const NEXT_BUTTON: Rect = Rect::new(280.0, 660.0, 360.0, 700.0);

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // -- host --------------------------------------------------------------
    let mut elements = Elements::new()
        .with(SEARCH, Rect::new(16.0, 60.0, 359.0, 100.0))
        .with(COMPOSE, Rect::new(300.0, 640.0, 356.0, 696.0));

    // -- sinks -------------------------------------------------------------
    let recorder = Rc::new(RefCell::new(RecorderSink::new()));
    let pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));

    let config = CoordinatorConfig::default().screen_size(SCREEN);
    let mut coord = TutorialCoordinator::with_config(RecordingSurface::new(), config)
        .with_sink((pretty, recorder.clone()));
    let nav = coord.navigator();

    // -- steps -------------------------------------------------------------
    let mut search = OverlayMask::new(SCREEN);
    let tap = nav.clone();
    search.add_focus(
        FocusRegion::element(SEARCH)
            .inset(Insets::uniform(6.0), 10.0)
            .on_activate(move || tap.show("compose")),
    )?;
    let tab_tapped = nav.clone();
    search.add_block(BlockRegion::new(TAB_BAR).on_tap(move || tab_tapped.hide(false)))?;
    let next = nav.clone();
    coord.register(
        OverlayStep::new("search", Overlay::new(search).with_button(Affordance::Next, NEXT_BUTTON))?
            .on_next(move || next.show("compose")),
    );

    let mut compose = OverlayMask::new(SCREEN);
    let tap = nav.clone();
    compose.add_focus(
        FocusRegion::element(COMPOSE)
            .circle(8.0)
            .on_activate(move || tap.advance()),
    )?;
    let done = nav.clone();
    let back = nav.clone();
    coord.register(
        OverlayStep::new("compose", Overlay::new(compose))?
            .on_next(move || done.show("done"))
            .on_prev(move || back.show("search")),
    );

    coord.register(OverlayStep::new(
        "done",
        Overlay::new(OverlayMask::new(SCREEN)).with_button(Affordance::Next, NEXT_BUTTON),
    )?);

    // -- script ------------------------------------------------------------
    coord.show("search");
    if let Some(step) = coord.current_step() {
        let path = step.overlay().mask().compute_fill_path(step.overlay().mask().bounds(), &elements);
        println!("scrim: {}", path.to_svg());
    }

    let taps = [
        Point::new(200.0, 200.0), // dimmed area: swallowed
        Point::new(100.0, 80.0),  // search field: on to "compose"
        Point::new(328.0, 668.0), // compose button: advance to "done"
        Point::new(320.0, 680.0), // "done" has no next action
    ];
    for point in taps {
        let disposition = coord.handle_pointer(point, &elements);
        println!("tap ({}, {}) -> {disposition:?}", point.x, point.y);
    }

    coord.show("missing");
    coord.show("search");
    elements.set(SEARCH, Rect::new(16.0, 120.0, 359.0, 160.0));
    coord.handle_pointer(Point::new(100.0, 140.0), &elements);
    coord.show("search");
    coord.handle_pointer(Point::new(187.0, 770.0), &elements);

    coord.resize(Size::new(SCREEN.height, SCREEN.width));
    coord.show_blank();

    // -- export ------------------------------------------------------------
    let path = "walkthrough.json";
    let mut writer = BufWriter::new(File::create(path)?);
    let snapshot = match coord.step("search") {
        Some(step) => coachmark_debug::json::mask_snapshot(step.overlay().mask(), &elements),
        None => serde_json::Value::Null,
    };
    let mut events = Vec::new();
    coachmark_debug::json::export(recorder.borrow().events(), &mut events)?;
    let events: serde_json::Value = serde_json::from_slice(&events)?;
    serde_json::to_writer_pretty(
        &mut writer,
        &serde_json::json!({ "search": snapshot, "events": events }),
    )?;

    tracing::info!(path, events = recorder.borrow().events().len(), "wrote recording");
    println!("Wrote {path}");
    Ok(())
}
