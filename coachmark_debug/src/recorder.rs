// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`DiagnosticSink`] and keeps a copy of every
//! event as a [`RecordedEvent`], in the order the coordinator emitted them.
//! Share it with a coordinator through `Rc<RefCell<RecorderSink>>` to inspect
//! the recording while the coordinator is still alive.

use coachmark_core::trace::{
    AttachEvent, DetachEvent, DiagnosticSink, MissingActionEvent, RegionHitEvent,
    SuppressedEvent, TransitionEvent, UnknownStepEvent,
};

/// A single recorded diagnostic event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// See [`DiagnosticSink::on_suppressed`].
    Suppressed(SuppressedEvent),
    /// See [`DiagnosticSink::on_unknown_step`].
    UnknownStep(UnknownStepEvent),
    /// See [`DiagnosticSink::on_missing_action`].
    MissingAction(MissingActionEvent),
    /// See [`DiagnosticSink::on_attach`].
    Attach(AttachEvent),
    /// See [`DiagnosticSink::on_detach`].
    Detach(DetachEvent),
    /// See [`DiagnosticSink::on_transition`].
    Transition(TransitionEvent),
    /// See [`DiagnosticSink::on_region_hit`].
    RegionHit(RegionHitEvent),
}

impl RecordedEvent {
    /// Short event name, as used in exports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Suppressed(_) => "Suppressed",
            Self::UnknownStep(_) => "UnknownStep",
            Self::MissingAction(_) => "MissingAction",
            Self::Attach(_) => "Attach",
            Self::Detach(_) => "Detach",
            Self::Transition(_) => "Transition",
            Self::RegionHit(_) => "RegionHit",
        }
    }
}

/// A [`DiagnosticSink`] that records every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Removes and returns the recorded events.
    pub fn take(&mut self) -> Vec<RecordedEvent> {
        std::mem::take(&mut self.events)
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }
}

impl DiagnosticSink for RecorderSink {
    fn on_suppressed(&mut self, e: &SuppressedEvent) {
        self.events.push(RecordedEvent::Suppressed(e.clone()));
    }

    fn on_unknown_step(&mut self, e: &UnknownStepEvent) {
        self.events.push(RecordedEvent::UnknownStep(e.clone()));
    }

    fn on_missing_action(&mut self, e: &MissingActionEvent) {
        self.events.push(RecordedEvent::MissingAction(e.clone()));
    }

    fn on_attach(&mut self, e: &AttachEvent) {
        self.events.push(RecordedEvent::Attach(e.clone()));
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        self.events.push(RecordedEvent::Detach(e.clone()));
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        self.events.push(RecordedEvent::Transition(e.clone()));
    }

    fn on_region_hit(&mut self, e: &RegionHitEvent) {
        self.events.push(RecordedEvent::RegionHit(e.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coachmark_core::backend::SurfaceKey;
    use coachmark_core::coordinator::Filler;

    #[test]
    fn records_in_emission_order() {
        let mut rec = RecorderSink::new();
        rec.on_unknown_step(&UnknownStepEvent { id: "x".into() });
        rec.on_attach(&AttachEvent {
            key: SurfaceKey::Filler(Filler::Transparent),
        });
        let names: Vec<_> = rec.events().iter().map(RecordedEvent::name).collect();
        assert_eq!(names, ["UnknownStep", "Attach"]);

        let taken = rec.take();
        assert_eq!(taken.len(), 2);
        assert!(rec.events().is_empty());
    }
}
