// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for walkthrough sequencing.
//!
//! This module provides a [`DiagnosticSink`] trait with per-event methods that
//! the [`TutorialCoordinator`](crate::coordinator::TutorialCoordinator) calls
//! as it attaches overlays, changes the current step, and declines requests.
//! All method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! Declined requests are never errors: a `show` while the walkthrough is
//! disabled, a `show` of an unregistered id, and a button press with no
//! callback all leave state unchanged and surface here instead.
//!
//! [`LogSink`] forwards every event to [`tracing`] and is what a coordinator
//! uses unless told otherwise. [`NoopSink`] discards everything.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;

use crate::backend::SurfaceKey;
use crate::mask::RegionHit;
use crate::overlay::Affordance;
use crate::step::StepId;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a show request arrives while the walkthrough is disabled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuppressedEvent {
    /// The step id or filler name that would have been shown.
    pub target: String,
}

/// Emitted when a show request names an id with no registered step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStepEvent {
    /// The requested id, verbatim.
    pub id: String,
}

/// Emitted when a button is pressed on a step that has no callback for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingActionEvent {
    /// The step whose button was pressed.
    pub step: StepId,
    /// Which button.
    pub affordance: Affordance,
}

/// Emitted after an overlay is attached to the display surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachEvent {
    /// The attached overlay.
    pub key: SurfaceKey,
}

/// Emitted after an overlay is detached from the display surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetachEvent {
    /// The detached overlay.
    pub key: SurfaceKey,
}

/// Emitted whenever the current step changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionEvent {
    /// The previous current step.
    pub from: Option<StepId>,
    /// The new current step.
    pub to: Option<StepId>,
}

/// Emitted when a pointer on the current step matches one of its regions.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionHitEvent {
    /// The current step.
    pub step: StepId,
    /// The matched region.
    pub hit: RegionHit,
    /// The pointer position in overlay coordinates.
    pub point: Point,
}

// ---------------------------------------------------------------------------
// DiagnosticSink trait
// ---------------------------------------------------------------------------

/// Receives diagnostic events from the coordinator.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait DiagnosticSink {
    /// Called when a show request is suppressed.
    fn on_suppressed(&mut self, e: &SuppressedEvent) {
        _ = e;
    }

    /// Called when a show request names an unregistered step.
    fn on_unknown_step(&mut self, e: &UnknownStepEvent) {
        _ = e;
    }

    /// Called when a pressed button has no callback.
    fn on_missing_action(&mut self, e: &MissingActionEvent) {
        _ = e;
    }

    /// Called after an overlay is attached.
    fn on_attach(&mut self, e: &AttachEvent) {
        _ = e;
    }

    /// Called after an overlay is detached.
    fn on_detach(&mut self, e: &DetachEvent) {
        _ = e;
    }

    /// Called when the current step changes.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called when a pointer matches a region of the current step.
    fn on_region_hit(&mut self, e: &RegionHitEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// Provided sinks
// ---------------------------------------------------------------------------

/// A [`DiagnosticSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {}

/// A [`DiagnosticSink`] that forwards events to [`tracing`].
///
/// Declined requests log at `warn` (unknown step, missing action) or `info`
/// (suppressed); everything else logs at `debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn on_suppressed(&mut self, e: &SuppressedEvent) {
        tracing::info!(overlay = %e.target, "walkthrough disabled; not showing overlay");
    }

    fn on_unknown_step(&mut self, e: &UnknownStepEvent) {
        tracing::warn!(id = %e.id, "no registered step with this identifier");
    }

    fn on_missing_action(&mut self, e: &MissingActionEvent) {
        tracing::warn!(
            step = %e.step,
            affordance = e.affordance.as_str(),
            "button pressed but no action has been set"
        );
    }

    fn on_attach(&mut self, e: &AttachEvent) {
        tracing::debug!(key = %e.key, "overlay attached");
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        tracing::debug!(key = %e.key, "overlay detached");
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        tracing::debug!(from = ?e.from, to = ?e.to, "current step changed");
    }

    fn on_region_hit(&mut self, e: &RegionHitEvent) {
        tracing::debug!(
            step = %e.step,
            index = e.hit.index,
            kind = ?e.hit.kind,
            x = e.point.x,
            y = e.point.y,
            "region hit"
        );
    }
}

/// Shares one sink between the coordinator and an observer (e.g. a test).
impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Rc<RefCell<S>> {
    fn on_suppressed(&mut self, e: &SuppressedEvent) {
        self.borrow_mut().on_suppressed(e);
    }

    fn on_unknown_step(&mut self, e: &UnknownStepEvent) {
        self.borrow_mut().on_unknown_step(e);
    }

    fn on_missing_action(&mut self, e: &MissingActionEvent) {
        self.borrow_mut().on_missing_action(e);
    }

    fn on_attach(&mut self, e: &AttachEvent) {
        self.borrow_mut().on_attach(e);
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        self.borrow_mut().on_detach(e);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.borrow_mut().on_transition(e);
    }

    fn on_region_hit(&mut self, e: &RegionHitEvent) {
        self.borrow_mut().on_region_hit(e);
    }
}

/// Dispatches every event to both sinks, first `A` then `B`.
impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for (A, B) {
    fn on_suppressed(&mut self, e: &SuppressedEvent) {
        self.0.on_suppressed(e);
        self.1.on_suppressed(e);
    }

    fn on_unknown_step(&mut self, e: &UnknownStepEvent) {
        self.0.on_unknown_step(e);
        self.1.on_unknown_step(e);
    }

    fn on_missing_action(&mut self, e: &MissingActionEvent) {
        self.0.on_missing_action(e);
        self.1.on_missing_action(e);
    }

    fn on_attach(&mut self, e: &AttachEvent) {
        self.0.on_attach(e);
        self.1.on_attach(e);
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        self.0.on_detach(e);
        self.1.on_detach(e);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.0.on_transition(e);
        self.1.on_transition(e);
    }

    fn on_region_hit(&mut self, e: &RegionHitEvent) {
        self.0.on_region_hit(e);
        self.1.on_region_hit(e);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
