// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time error types.
//!
//! Only configuration supplied by calling code produces errors. Runtime
//! lookups (an unregistered step id, a suppressed `show`) never fail; they
//! are reported through [`DiagnosticSink`](crate::trace::DiagnosticSink) and
//! degrade to no-ops.

use thiserror::Error;

/// A programming mistake in how steps or regions were declared.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A step identifier was empty.
    #[error("step identifier must not be empty")]
    EmptyStepId,

    /// Insets shrank a mask rect past zero on some axis.
    #[error("mask rect has negative size after insets: {width} x {height}")]
    NegativeMaskSize {
        /// Width after applying insets.
        width: f64,
        /// Height after applying insets.
        height: f64,
    },

    /// A rounded mask was declared with a negative corner radius.
    #[error("corner radius must not be negative: {0}")]
    NegativeCornerRadius(f64),

    /// A negative radius inset produced a circle with negative diameter.
    #[error("circle mask has negative diameter: {0}")]
    NegativeCircleDiameter(f64),

    /// A rect, inset, or radius contained NaN or infinity.
    #[error("geometry contains a non-finite value")]
    NonFiniteGeometry,

    /// The overlay for a step could not be produced by its source.
    #[error("overlay source failed: {0}")]
    Source(#[from] SourceError),
}

/// Failure to produce an [`Overlay`](crate::overlay::Overlay) from a host
/// template resource or screen template.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No template or screen exists under the given name.
    #[error("no overlay template named {name:?}")]
    NotFound {
        /// The requested name.
        name: String,
    },

    /// The template exists but does not describe an overlay.
    #[error("template {name:?} is not an overlay: {reason}")]
    Malformed {
        /// The requested name.
        name: String,
        /// Host-supplied explanation.
        reason: String,
    },
}
