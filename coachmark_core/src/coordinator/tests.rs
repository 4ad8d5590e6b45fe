// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use proptest::prelude::*;

use super::*;
use crate::backend::NoElements;
use crate::mask::{BlockRegion, FocusRegion, OverlayMask, RegionKind};

const SCREEN: Size = Size::new(400.0, 800.0);

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Attach(String),
    Detach(String),
    Relayout,
}

#[derive(Default)]
struct TestSurface {
    log: Vec<Op>,
    attached: Vec<SurfaceKey>,
}

impl DisplaySurface for TestSurface {
    fn attach(&mut self, key: &SurfaceKey, _overlay: &Overlay) {
        self.log.push(Op::Attach(key.to_string()));
        self.attached.push(key.clone());
    }

    fn detach(&mut self, key: &SurfaceKey) {
        self.log.push(Op::Detach(key.to_string()));
        self.attached.retain(|k| k != key);
    }

    fn request_relayout(&mut self) {
        self.log.push(Op::Relayout);
    }
}

#[derive(Default)]
struct Events {
    suppressed: Vec<String>,
    unknown: Vec<String>,
    missing: Vec<(String, Affordance)>,
    transitions: Vec<(Option<String>, Option<String>)>,
    hits: Vec<(usize, RegionKind)>,
}

impl DiagnosticSink for Events {
    fn on_suppressed(&mut self, e: &SuppressedEvent) {
        self.suppressed.push(e.target.clone());
    }

    fn on_unknown_step(&mut self, e: &UnknownStepEvent) {
        self.unknown.push(e.id.clone());
    }

    fn on_missing_action(&mut self, e: &MissingActionEvent) {
        self.missing.push((e.step.to_string(), e.affordance));
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.transitions.push((
            e.from.as_ref().map(ToString::to_string),
            e.to.as_ref().map(ToString::to_string),
        ));
    }

    fn on_region_hit(&mut self, e: &RegionHitEvent) {
        self.hits.push((e.hit.index, e.hit.kind));
    }
}

fn coordinator() -> (TutorialCoordinator<TestSurface>, Rc<RefCell<Events>>) {
    let events = Rc::new(RefCell::new(Events::default()));
    let config = CoordinatorConfig::default().screen_size(SCREEN);
    let coord =
        TutorialCoordinator::with_config(TestSurface::default(), config).with_sink(events.clone());
    (coord, events)
}

fn plain(id: &str) -> OverlayStep {
    OverlayStep::new(id, Overlay::new(OverlayMask::new(SCREEN))).unwrap()
}

fn step_key(id: &str) -> SurfaceKey {
    SurfaceKey::Step(StepId::new(id).unwrap())
}

fn attach(id: &str) -> Op {
    Op::Attach(id.into())
}

fn detach(id: &str) -> Op {
    Op::Detach(id.into())
}

/// Step "1" spotlights a button whose tap advances; its `on_next` shows "2".
fn two_step_walkthrough(coord: &mut TutorialCoordinator<TestSurface>) {
    let nav = coord.navigator();
    let mut mask = OverlayMask::new(SCREEN);
    let on_tap = nav.clone();
    mask.add_focus(
        FocusRegion::rect(Rect::new(10.0, 10.0, 50.0, 50.0)).on_activate(move || on_tap.advance()),
    )
    .unwrap();
    let first = OverlayStep::new("1", Overlay::new(mask))
        .unwrap()
        .on_next(move || nav.show("2"));
    coord.register(first);
    coord.register(plain("2"));
}

#[test]
fn tapping_spotlight_advances_to_next_step() {
    let (mut coord, events) = coordinator();
    two_step_walkthrough(&mut coord);

    coord.show("1");
    assert_eq!(coord.current_id().map(StepId::as_str), Some("1"));

    let disposition = coord.handle_pointer(Point::new(20.0, 20.0), &NoElements);
    assert_eq!(disposition, Disposition::PassThrough);
    assert_eq!(coord.current_id().map(StepId::as_str), Some("2"));
    assert_eq!(coord.surface().attached, [step_key("2")]);
    assert_eq!(
        coord.surface().log,
        [attach("1"), Op::Relayout, detach("1"), attach("2"), Op::Relayout]
    );
    assert_eq!(events.borrow().hits, [(0, RegionKind::Focus)]);
    assert_eq!(coord.navigator().pending(), 0);
}

#[test]
fn pointer_outside_regions_is_swallowed() {
    let (mut coord, _) = coordinator();
    two_step_walkthrough(&mut coord);
    coord.show("1");

    let disposition = coord.handle_pointer(Point::new(200.0, 400.0), &NoElements);
    assert_eq!(disposition, Disposition::Swallow);
    assert_eq!(coord.current_id().map(StepId::as_str), Some("1"));
}

#[test]
fn pointer_with_nothing_attached_passes_through() {
    let (mut coord, _) = coordinator();
    two_step_walkthrough(&mut coord);
    let disposition = coord.handle_pointer(Point::new(200.0, 400.0), &NoElements);
    assert_eq!(disposition, Disposition::PassThrough);
}

#[test]
fn unknown_step_leaves_state_unchanged() {
    let (mut coord, events) = coordinator();
    coord.register(plain("a"));
    coord.show("a");
    let log_len = coord.surface().log.len();

    coord.show("nope");
    assert_eq!(coord.current_id().map(StepId::as_str), Some("a"));
    assert_eq!(coord.surface().log.len(), log_len);
    assert_eq!(events.borrow().unknown, ["nope"]);
}

#[test]
fn hide_when_idle_touches_nothing() {
    let (mut coord, events) = coordinator();
    coord.register(plain("a").on_next(|| panic!("must not run")));
    coord.hide(true);
    assert!(coord.surface().log.is_empty());
    assert!(events.borrow().transitions.is_empty());
}

#[test]
fn hide_runs_next_action_then_detaches() {
    let (mut coord, _) = coordinator();
    let ran = Rc::new(RefCell::new(0));
    let counter = ran.clone();
    coord.register(plain("a").on_next(move || *counter.borrow_mut() += 1));
    coord.show("a");

    coord.hide(true);
    assert_eq!(*ran.borrow(), 1);
    assert_eq!(coord.state(), State::Idle);
    assert!(coord.surface().attached.is_empty());

    coord.show("a");
    coord.hide(false);
    assert_eq!(*ran.borrow(), 1);
}

#[test]
fn disabled_coordinator_suppresses_shows() {
    let (mut coord, events) = coordinator();
    coord.register(plain("a"));
    coord.set_enabled(false);

    coord.show("a");
    coord.show_blank();
    assert!(coord.surface().log.is_empty());
    assert_eq!(events.borrow().suppressed, ["a", "blank"]);

    coord.set_enabled(true);
    coord.show("a");
    assert!(coord.is_attached(&step_key("a")));
}

#[test]
fn disabling_does_not_hide_current_step() {
    let (mut coord, _) = coordinator();
    coord.register(plain("a"));
    coord.show("a");
    coord.set_enabled(false);
    assert!(coord.is_attached(&step_key("a")));
    coord.hide(false);
    assert!(coord.attached().is_none());
}

#[test]
fn show_replaces_attached_step() {
    let (mut coord, events) = coordinator();
    coord.register(plain("a"));
    coord.register(plain("b"));
    coord.show("a");
    coord.show("b");
    assert_eq!(coord.surface().attached, [step_key("b")]);
    assert_eq!(
        events.borrow().transitions,
        [
            (None, Some("a".to_string())),
            (Some("a".to_string()), Some("b".to_string())),
        ]
    );
}

#[test]
fn deregistering_current_step_keeps_it_attached() {
    let (mut coord, _) = coordinator();
    let ran = Rc::new(RefCell::new(false));
    let flag = ran.clone();
    coord.register(plain("a").on_next(move || *flag.borrow_mut() = true));
    coord.show("a");

    assert!(coord.deregister("a"));
    assert!(!coord.contains("a"));
    assert!(coord.is_attached(&step_key("a")));
    assert_eq!(coord.current_id().map(StepId::as_str), Some("a"));
    assert!(coord.overlay(&step_key("a")).is_some());

    coord.advance();
    assert!(*ran.borrow());

    coord.hide(false);
    assert!(coord.surface().attached.is_empty());
    assert!(coord.overlay(&step_key("a")).is_none());
    assert!(!coord.deregister("a"));
}

#[test]
fn replacing_current_step_orphans_the_old_one() {
    let (mut coord, _) = coordinator();
    let which = Rc::new(RefCell::new(Vec::new()));
    let old = which.clone();
    let new = which.clone();
    coord.register(plain("a").on_next(move || old.borrow_mut().push("old")));
    coord.show("a");
    coord.register(plain("a").on_next(move || new.borrow_mut().push("new")));

    coord.advance();
    coord.show("a");
    coord.advance();
    assert_eq!(*which.borrow(), ["old", "new"]);
}

#[test]
fn deregister_all_empties_registry() {
    let (mut coord, _) = coordinator();
    coord.register(plain("a"));
    coord.register(plain("b"));
    coord.show("b");
    coord.deregister_all();
    assert!(coord.is_empty());
    assert_eq!(coord.current_id().map(StepId::as_str), Some("b"));
    coord.show("a");
    assert!(coord.is_attached(&step_key("b")));
}

#[test]
fn filler_runs_next_action_then_ends_idle() {
    let (mut coord, events) = coordinator();
    two_step_walkthrough(&mut coord);
    coord.show("1");

    coord.show_filler(Filler::Blank, true);
    assert_eq!(coord.state(), State::Idle);
    assert!(coord.surface().attached.is_empty());
    assert_eq!(
        coord.surface().log[2..],
        [
            detach("1"),
            attach("blank"),
            Op::Relayout,
            detach("blank"),
            attach("2"),
            Op::Relayout,
            detach("2"),
        ]
    );
    assert_eq!(
        events.borrow().transitions.last(),
        Some(&(Some("2".to_string()), None))
    );
}

#[test]
fn hide_applies_next_action_transitions_then_ends_idle() {
    let (mut coord, events) = coordinator();
    two_step_walkthrough(&mut coord);
    coord.show("1");

    coord.hide(true);
    assert_eq!(coord.state(), State::Idle);
    assert!(coord.surface().attached.is_empty());
    assert_eq!(coord.surface().log.last(), Some(&detach("2")));
    assert_eq!(
        events.borrow().transitions[1..],
        [
            (Some("1".to_string()), None),
            (None, Some("2".to_string())),
            (Some("2".to_string()), None),
        ]
    );

    coord.show("2");
    assert!(coord.is_attached(&step_key("2")));
}

#[test]
fn filler_without_next_action_ends_idle() {
    let (mut coord, _) = coordinator();
    two_step_walkthrough(&mut coord);
    coord.show("1");

    coord.show_transparent();
    assert_eq!(coord.state(), State::Idle);
    assert!(coord.surface().attached.is_empty());
    assert_eq!(
        coord.surface().log.last(),
        Some(&detach("transparent"))
    );
}

#[test]
fn lingering_filler_swallows_until_hidden() {
    let events = Rc::new(RefCell::new(Events::default()));
    let config = CoordinatorConfig::default()
        .screen_size(SCREEN)
        .linger_fillers(true);
    let mut coord =
        TutorialCoordinator::with_config(TestSurface::default(), config).with_sink(events);
    coord.show_blank();

    let key = SurfaceKey::Filler(Filler::Blank);
    assert!(coord.is_attached(&key));
    assert_eq!(coord.state(), State::Idle);
    assert_eq!(
        coord.handle_pointer(Point::new(1.0, 1.0), &NoElements),
        Disposition::Swallow
    );

    coord.hide(false);
    assert!(coord.attached().is_none());
    assert_eq!(coord.surface().log.last(), Some(&detach("blank")));
}

#[test]
fn buttons_fire_step_actions_or_report_missing() {
    let (mut coord, events) = coordinator();
    let ran = Rc::new(RefCell::new(false));
    let flag = ran.clone();
    let overlay = Overlay::new(OverlayMask::new(SCREEN))
        .with_button(Affordance::Next, Rect::new(300.0, 700.0, 380.0, 740.0))
        .with_button(Affordance::Prev, Rect::new(20.0, 700.0, 100.0, 740.0));
    coord.register(
        OverlayStep::new("a", overlay)
            .unwrap()
            .on_next(move || *flag.borrow_mut() = true),
    );
    coord.show("a");

    let disposition = coord.handle_pointer(Point::new(320.0, 720.0), &NoElements);
    assert_eq!(disposition, Disposition::Swallow);
    assert!(*ran.borrow());

    coord.handle_pointer(Point::new(50.0, 720.0), &NoElements);
    coord.press(Affordance::Prev);
    assert_eq!(
        events.borrow().missing,
        [
            ("a".to_string(), Affordance::Prev),
            ("a".to_string(), Affordance::Prev),
        ]
    );
}

#[test]
fn block_region_passes_through_and_fires() {
    let (mut coord, events) = coordinator();
    let nav = coord.navigator();
    let mut mask = OverlayMask::new(SCREEN);
    mask.add_block(BlockRegion::new(Rect::new(0.0, 0.0, 400.0, 60.0)).on_tap(move || nav.hide(false)))
        .unwrap();
    coord.register(OverlayStep::new("a", Overlay::new(mask)).unwrap());
    coord.show("a");

    let disposition = coord.handle_pointer(Point::new(200.0, 30.0), &NoElements);
    assert_eq!(disposition, Disposition::PassThrough);
    assert_eq!(events.borrow().hits, [(0, RegionKind::Block)]);
    assert_eq!(coord.state(), State::Idle);
}

#[test]
fn callbacks_queue_in_fifo_order() {
    let (mut coord, events) = coordinator();
    let nav = coord.navigator();
    coord.register(plain("a").on_next(move || {
        nav.show("b");
        nav.show("c");
    }));
    coord.register(plain("b"));
    coord.register(plain("c"));
    coord.show("a");
    coord.advance();

    assert_eq!(coord.current_id().map(StepId::as_str), Some("c"));
    assert_eq!(events.borrow().transitions.len(), 3);
    assert_eq!(coord.surface().attached, [step_key("c")]);
}

#[test]
fn resize_rescales_every_overlay() {
    let (mut coord, _) = coordinator();
    let mut mask = OverlayMask::new(SCREEN);
    mask.add_block(BlockRegion::new(Rect::new(100.0, 200.0, 150.0, 250.0)))
        .unwrap();
    coord.register(OverlayStep::new("a", Overlay::new(mask)).unwrap());

    coord.resize(Size::new(800.0, 400.0));
    assert!(coord.surface().log.is_empty());
    assert_eq!(coord.config().screen_size, Size::new(800.0, 400.0));

    let rect = match &coord.step("a").unwrap().overlay().mask().regions()[0] {
        crate::mask::Region::Block(block) => block.rect,
        crate::mask::Region::Focus(_) => unreachable!(),
    };
    assert_eq!(rect, Rect::new(200.0, 100.0, 250.0, 150.0));
    let blank = coord.overlay(&SurfaceKey::Filler(Filler::Blank)).unwrap();
    assert_eq!(blank.mask().size(), Size::new(800.0, 400.0));

    coord.show("a");
    coord.resize(SCREEN);
    assert_eq!(coord.surface().log.last(), Some(&Op::Relayout));
}

#[test]
fn default_fillers_are_sized_by_first_resize() {
    let mut coord = TutorialCoordinator::new(TestSurface::default());
    let blank = SurfaceKey::Filler(Filler::Blank);
    assert_eq!(coord.overlay(&blank).unwrap().mask().size(), Size::ZERO);

    coord.resize(SCREEN);
    coord.resize(Size::ZERO);
    assert_eq!(coord.config().screen_size, SCREEN);
    assert_eq!(coord.overlay(&blank).unwrap().mask().size(), SCREEN);
    let transparent = SurfaceKey::Filler(Filler::Transparent);
    assert_eq!(coord.overlay(&transparent).unwrap().mask().size(), SCREEN);
}

#[derive(Clone, Debug)]
enum Action {
    Show(usize),
    Hide(bool),
    Filler(Filler, bool),
    Deregister(usize),
}

const IDS: [&str; 4] = ["a", "b", "c", "unregistered"];

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..IDS.len()).prop_map(Action::Show),
        any::<bool>().prop_map(Action::Hide),
        (prop_oneof![Just(Filler::Blank), Just(Filler::Transparent)], any::<bool>())
            .prop_map(|(f, run)| Action::Filler(f, run)),
        (0..3_usize).prop_map(Action::Deregister),
    ]
}

proptest! {
    #[test]
    fn at_most_one_overlay_is_attached(actions in prop::collection::vec(action(), 0..40)) {
        let mut coord = TutorialCoordinator::with_config(
            TestSurface::default(),
            CoordinatorConfig::default().screen_size(SCREEN),
        )
        .with_sink(crate::trace::NoopSink);
        for id in &IDS[..3] {
            coord.register(plain(id));
        }

        let mut expected: Option<&str> = None;
        for action in actions {
            match action {
                Action::Show(i) => {
                    coord.show(IDS[i]);
                    if coord.contains(IDS[i]) {
                        expected = Some(IDS[i]);
                    }
                }
                Action::Hide(run) => {
                    coord.hide(run);
                    expected = None;
                }
                Action::Filler(filler, run) => {
                    coord.show_filler(filler, run);
                    expected = None;
                }
                Action::Deregister(i) => {
                    coord.deregister(IDS[i]);
                }
            }

            prop_assert!(coord.surface().attached.len() <= 1);
            prop_assert_eq!(coord.current_id().map(StepId::as_str), expected);
            let attached = coord.surface().attached.first().cloned();
            prop_assert_eq!(attached, expected.map(step_key));
        }
    }
}
