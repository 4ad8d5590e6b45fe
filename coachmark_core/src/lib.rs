// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spotlight overlays and walkthrough sequencing.
//!
//! `coachmark_core` draws a dimmed scrim over a host UI with cut-outs that
//! spotlight chosen elements, decides which pointer events reach the UI
//! underneath, and sequences a registry of such overlays into a guided
//! walkthrough.
//!
//! # Architecture
//!
//! ```text
//!   OverlayStep (id, Overlay, on_next/on_prev)
//!       │ register
//!       ▼
//!   TutorialCoordinator ──attach/detach──► DisplaySurface (host)
//!       │        ▲
//!       │        └── Navigator queue ◄── region and step callbacks
//!       ▼
//!   handle_pointer ──► OverlayMask::hit ──► Disposition
//!                            │
//!                            └── ElementResolver (host)
//! ```
//!
//! **[`mask`]**: The [`OverlayMask`](mask::OverlayMask) region list, the
//! even-odd scrim path, and first-match pointer classification.
//!
//! **[`overlay`]**: An [`Overlay`](overlay::Overlay) pairs a mask with
//! optional previous/next buttons.
//!
//! **[`step`]**: Named [`OverlayStep`](step::OverlayStep)s, built from an
//! explicit overlay or from a host template.
//!
//! **[`coordinator`]**: The [`TutorialCoordinator`](coordinator::TutorialCoordinator)
//! state machine and the [`Navigator`](coordinator::Navigator) callbacks use
//! to request transitions.
//!
//! **[`backend`]**: Traits the host implements: the
//! [`DisplaySurface`](backend::DisplaySurface) overlays are attached to and
//! the [`ElementResolver`](backend::ElementResolver) for live element bounds.
//!
//! **[`source`]**: Traits for loading overlays from host template resources.
//!
//! **[`trace`]**: [`DiagnosticSink`](trace::DiagnosticSink) and its events,
//! with a [`tracing`]-backed default.
//!
//! **[`config`]** and **[`error`]**: Coordinator settings and construction
//! errors.
//!
//! # Crate features
//!
//! - `serde` (disabled by default): `Serialize`/`Deserialize` for
//!   [`CoordinatorConfig`](config::CoordinatorConfig) and
//!   [`ScrimColor`](mask::ScrimColor), and kurbo's geometry types.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod backend;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod mask;
pub mod overlay;
pub mod source;
pub mod step;
pub mod trace;
