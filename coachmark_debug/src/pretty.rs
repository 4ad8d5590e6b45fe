// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable diagnostic output.
//!
//! [`PrettyPrintSink`] implements [`DiagnosticSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use coachmark_core::mask::RegionKind;
use coachmark_core::step::StepId;
use coachmark_core::trace::{
    AttachEvent, DetachEvent, DiagnosticSink, MissingActionEvent, RegionHitEvent,
    SuppressedEvent, TransitionEvent, UnknownStepEvent,
};

/// Writes human-readable diagnostic lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn step_name(id: Option<&StepId>) -> &str {
    id.map_or("-", StepId::as_str)
}

fn kind_name(kind: RegionKind) -> &'static str {
    match kind {
        RegionKind::Focus => "focus",
        RegionKind::Block => "block",
    }
}

impl<W: Write> DiagnosticSink for PrettyPrintSink<W> {
    fn on_suppressed(&mut self, e: &SuppressedEvent) {
        let _ = writeln!(self.writer, "[suppressed] {}", e.target);
    }

    fn on_unknown_step(&mut self, e: &UnknownStepEvent) {
        let _ = writeln!(self.writer, "[unknown] id={:?}", e.id);
    }

    fn on_missing_action(&mut self, e: &MissingActionEvent) {
        let _ = writeln!(
            self.writer,
            "[missing-action] step={} button={}",
            e.step,
            e.affordance.as_str(),
        );
    }

    fn on_attach(&mut self, e: &AttachEvent) {
        let _ = writeln!(self.writer, "[attach] {}", e.key);
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        let _ = writeln!(self.writer, "[detach] {}", e.key);
    }

    fn on_transition(&mut self, e: &TransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[step] {} -> {}",
            step_name(e.from.as_ref()),
            step_name(e.to.as_ref()),
        );
    }

    fn on_region_hit(&mut self, e: &RegionHitEvent) {
        let _ = writeln!(
            self.writer,
            "[hit] step={} region={} kind={} at ({:.1}, {:.1})",
            e.step,
            e.hit.index,
            kind_name(e.hit.kind),
            e.point.x,
            e.point.y,
        );
    }
}
