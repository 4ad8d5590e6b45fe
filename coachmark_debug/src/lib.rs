// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for coachmark diagnostics.
//!
//! This crate provides [`DiagnosticSink`](coachmark_core::trace::DiagnosticSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory recording of every event.
//! - [`json`]: writes recorded events, and snapshots of a mask's geometry,
//!   as JSON.

pub mod json;
pub mod pretty;
pub mod recorder;
