// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host element identity.

use core::fmt;

/// An opaque reference to an on-screen element owned by the host.
///
/// Elements are created and laid out externally (e.g. by a widget toolkit).
/// A region anchored to an element asks the host's
/// [`ElementResolver`](crate::backend::ElementResolver) for the element's
/// current bounds each time a path is built or a pointer is classified, so
/// the cut-out follows layout changes without being told about them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}
