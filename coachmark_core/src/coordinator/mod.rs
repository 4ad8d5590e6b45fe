// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walkthrough sequencing.
//!
//! A [`TutorialCoordinator`] owns every registered [`OverlayStep`], the two
//! built-in [`Filler`] overlays, and the host's [`DisplaySurface`]. It is the
//! only thing that attaches or detaches overlays.
//!
//! # State machine
//!
//! ```text
//!            show(a)               show(b)
//!   Idle ───────────────► Showing(a) ───────► Showing(b)
//!    ▲                        │
//!    └────── hide / filler ───┘
//! ```
//!
//! There is no terminal state. Every transition detaches the attached
//! overlay before attaching the next one, so the surface never holds two
//! overlays at once.
//!
//! # Callbacks
//!
//! Callbacks request transitions through a [`Navigator`]. Requests are
//! applied in FIFO order before the public call that fired them returns.

mod navigator;

use std::collections::BTreeMap;
use std::fmt;

use kurbo::{Point, Size};

use crate::backend::{DisplaySurface, ElementResolver, SurfaceKey};
use crate::config::CoordinatorConfig;
use crate::mask::{Disposition, is_drawable};
use crate::overlay::{Affordance, Overlay};
use crate::step::{OverlayStep, StepId};
use crate::trace::{
    AttachEvent, DetachEvent, DiagnosticSink, LogSink, MissingActionEvent, RegionHitEvent,
    SuppressedEvent, TransitionEvent, UnknownStepEvent,
};

pub use navigator::{Command, Navigator};

/// A built-in overlay with no cut-out, used as a transient cover between
/// steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Filler {
    /// Dimmed, opaque-looking scrim.
    Blank,
    /// Invisible scrim that still blocks pointers.
    Transparent,
}

impl Filler {
    /// A lowercase name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Transparent => "transparent",
        }
    }
}

/// What is on screen, as seen by the walkthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State<'a> {
    /// No step is current.
    Idle,
    /// The given step is current and attached.
    Showing(&'a StepId),
}

/// The step considered on screen.
///
/// A step that is deregistered or replaced while attached stays current as
/// an orphan until it is hidden or another step is shown.
enum Current {
    Registered(StepId),
    Orphaned(OverlayStep),
}

impl Current {
    fn id(&self) -> &StepId {
        match self {
            Self::Registered(id) => id,
            Self::Orphaned(step) => step.id(),
        }
    }
}

/// The single authority over which walkthrough overlay is on screen.
///
/// Constructed explicitly by whatever composes the application shell and
/// passed to the code that drives the walkthrough; there is no global
/// instance. All operations run synchronously on the calling thread.
pub struct TutorialCoordinator<S> {
    surface: S,
    config: CoordinatorConfig,
    steps: BTreeMap<StepId, OverlayStep>,
    current: Option<Current>,
    attached: Option<SurfaceKey>,
    blank: Overlay,
    transparent: Overlay,
    navigator: Navigator,
    sink: Box<dyn DiagnosticSink>,
}

impl<S: fmt::Debug> fmt::Debug for TutorialCoordinator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TutorialCoordinator")
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("steps", &self.steps.keys().collect::<Vec<_>>())
            .field("current", &self.current_id())
            .field("attached", &self.attached)
            .field("pending", &self.navigator.pending())
            .finish_non_exhaustive()
    }
}

impl<S: DisplaySurface> TutorialCoordinator<S> {
    /// Creates a coordinator with the default configuration.
    ///
    /// The fillers start out empty; call [`resize`](Self::resize) with the
    /// screen size before showing one.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, CoordinatorConfig::default())
    }

    /// Creates a coordinator with the given configuration.
    ///
    /// The fillers are sized from [`CoordinatorConfig::screen_size`].
    ///
    /// Diagnostics go to [`LogSink`] until [`with_sink`](Self::with_sink) or
    /// [`set_sink`](Self::set_sink) replaces it.
    #[must_use]
    pub fn with_config(surface: S, config: CoordinatorConfig) -> Self {
        let blank = Overlay::filled(config.screen_size, config.blank_color);
        let transparent = Overlay::filled(config.screen_size, config.transparent_color);
        Self {
            surface,
            config,
            steps: BTreeMap::new(),
            current: None,
            attached: None,
            blank,
            transparent,
            navigator: Navigator::default(),
            sink: Box::new(LogSink),
        }
    }

    /// Replaces the diagnostic sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Replaces the diagnostic sink.
    pub fn set_sink(&mut self, sink: Box<dyn DiagnosticSink>) {
        self.sink = sink;
    }
}

impl<S> TutorialCoordinator<S> {
    /// A handle callbacks can capture to request transitions.
    #[must_use]
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    /// The configuration in effect.
    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Whether show requests are honoured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Turns show requests on or off. Does not hide anything already shown.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    /// The host surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the host surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // -- Registration --

    /// Registers a step, replacing any step with the same id. Nothing is
    /// attached or detached.
    pub fn register(&mut self, step: OverlayStep) {
        let id = step.id().clone();
        if self.current_is_registered(id.as_str()) {
            if let Some(old) = self.steps.remove(&id) {
                self.current = Some(Current::Orphaned(old));
            }
        }
        self.steps.insert(id, step);
    }

    /// Removes a step from the registry. Returns whether it was registered.
    ///
    /// If the step is attached it stays attached and current.
    pub fn deregister(&mut self, id: &str) -> bool {
        let Some(step) = self.steps.remove(id) else {
            return false;
        };
        if self.current_is_registered(id) {
            self.current = Some(Current::Orphaned(step));
        }
        true
    }

    /// Removes every step from the registry. The current step, if any, stays
    /// attached and current.
    pub fn deregister_all(&mut self) {
        if let Some(Current::Registered(id)) = &self.current {
            if let Some(step) = self.steps.remove(id) {
                self.current = Some(Current::Orphaned(step));
            }
        }
        self.steps.clear();
    }

    /// Whether a step with this id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.steps.contains_key(id)
    }

    /// Number of registered steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Registered step ids in order.
    pub fn step_ids(&self) -> impl Iterator<Item = &StepId> {
        self.steps.keys()
    }

    /// A registered step.
    #[must_use]
    pub fn step(&self, id: &str) -> Option<&OverlayStep> {
        self.steps.get(id)
    }

    /// Mutable access to a registered step, e.g. to wire its callbacks after
    /// registration.
    pub fn step_mut(&mut self, id: &str) -> Option<&mut OverlayStep> {
        self.steps.get_mut(id)
    }

    // -- Queries --

    /// The current step's id.
    #[must_use]
    pub fn current_id(&self) -> Option<&StepId> {
        self.current.as_ref().map(Current::id)
    }

    /// The current step, registered or orphaned.
    #[must_use]
    pub fn current_step(&self) -> Option<&OverlayStep> {
        match self.current.as_ref()? {
            Current::Registered(id) => self.steps.get(id),
            Current::Orphaned(step) => Some(step),
        }
    }

    /// The state machine's state.
    #[must_use]
    pub fn state(&self) -> State<'_> {
        match self.current_id() {
            Some(id) => State::Showing(id),
            None => State::Idle,
        }
    }

    /// The key of the attached overlay, if any.
    #[must_use]
    pub fn attached(&self) -> Option<&SurfaceKey> {
        self.attached.as_ref()
    }

    /// Whether `key` is the attached overlay.
    #[must_use]
    pub fn is_attached(&self, key: &SurfaceKey) -> bool {
        self.attached.as_ref() == Some(key)
    }

    /// The overlay the host should render for `key`.
    #[must_use]
    pub fn overlay(&self, key: &SurfaceKey) -> Option<&Overlay> {
        match key {
            SurfaceKey::Filler(Filler::Blank) => Some(&self.blank),
            SurfaceKey::Filler(Filler::Transparent) => Some(&self.transparent),
            SurfaceKey::Step(id) => match &self.current {
                Some(Current::Orphaned(step)) if step.id() == id => Some(step.overlay()),
                _ => self.steps.get(id).map(OverlayStep::overlay),
            },
        }
    }

    fn current_is_registered(&self, id: &str) -> bool {
        matches!(&self.current, Some(Current::Registered(current)) if current.as_str() == id)
    }

}

impl<S: DisplaySurface> TutorialCoordinator<S> {
    // -- Transitions --

    /// Shows a registered step.
    ///
    /// Does nothing but report a diagnostic if the walkthrough is disabled or
    /// `id` is not registered; in particular the current step and the
    /// attached overlay are left alone.
    pub fn show(&mut self, id: &str) {
        self.show_now(id);
        self.drain();
    }

    /// Flashes a filler overlay in place of the current step.
    ///
    /// The current step is detached and the filler attached. If
    /// `run_next_action` is set, the previous step's `on_next` runs and any
    /// transitions it requests are applied while the filler is up. Finally
    /// whatever is attached is detached and no step is current, even if a
    /// callback showed one. With
    /// [`linger_fillers`](CoordinatorConfig::linger_fillers) set, the filler
    /// itself stays attached until the next show or hide.
    pub fn show_filler(&mut self, filler: Filler, run_next_action: bool) {
        self.show_filler_now(filler, run_next_action);
        self.drain();
    }

    /// [`show_filler`](Self::show_filler) with [`Filler::Blank`] and the
    /// configured `run_next_action` default.
    pub fn show_blank(&mut self) {
        self.show_filler(Filler::Blank, self.config.filler_runs_next_action);
    }

    /// [`show_filler`](Self::show_filler) with [`Filler::Transparent`] and the
    /// configured `run_next_action` default.
    pub fn show_transparent(&mut self) {
        self.show_filler(Filler::Transparent, self.config.filler_runs_next_action);
    }

    /// Hides the current step, running its `on_next` first if asked.
    ///
    /// Transitions requested by `on_next` are applied first, then whatever is
    /// attached is detached and no step is current. With nothing attached
    /// this is a no-op that issues no surface calls.
    pub fn hide(&mut self, run_next_action: bool) {
        self.hide_now(run_next_action);
        self.drain();
    }

    /// Runs the current step's `on_next`, if there is one. The current step
    /// is unchanged unless the callback requests a transition.
    pub fn advance(&mut self) {
        self.run_current(Affordance::Next);
        self.drain();
    }

    /// Runs the current step's `on_prev`, if there is one.
    pub fn retreat(&mut self) {
        self.run_current(Affordance::Prev);
        self.drain();
    }

    /// Presses one of the current step's buttons on behalf of the host.
    ///
    /// Reports a diagnostic if the step has no callback for it.
    pub fn press(&mut self, affordance: Affordance) {
        self.press_now(affordance);
        self.drain();
    }

    /// Routes a pointer through the attached overlay.
    ///
    /// - Nothing attached: the pointer passes through.
    /// - A filler attached: the pointer is swallowed.
    /// - A step attached: its mask classifies the pointer, firing the matched
    ///   region's callback. A swallowed pointer that lands on one of the
    ///   step's buttons presses it.
    ///
    /// Transitions requested by the fired callbacks are applied before this
    /// returns.
    pub fn handle_pointer(&mut self, point: Point, resolver: &dyn ElementResolver) -> Disposition {
        let disposition = self.route_pointer(point, resolver);
        self.drain();
        disposition
    }

    /// Applies every queued [`Navigator`] request.
    ///
    /// Public operations drain on their own; call this after firing region
    /// callbacks directly through [`OverlayMask::classify`](crate::mask::OverlayMask::classify).
    pub fn drain(&mut self) {
        while let Some(command) = self.navigator.pop() {
            self.apply(command);
        }
    }

    /// Resizes every overlay, e.g. after a rotation, and asks the host to lay
    /// out again if something is attached.
    ///
    /// Empty or non-finite sizes are ignored.
    pub fn resize(&mut self, new_size: Size) {
        if !is_drawable(new_size) {
            return;
        }
        self.config.screen_size = new_size;
        self.blank.resize(new_size);
        self.transparent.resize(new_size);
        for step in self.steps.values_mut() {
            step.overlay_mut().resize(new_size);
        }
        if let Some(Current::Orphaned(step)) = &mut self.current {
            step.overlay_mut().resize(new_size);
        }
        if self.attached.is_some() {
            self.surface.request_relayout();
        }
    }

    // -- Internals --

    fn apply(&mut self, command: Command) {
        match command {
            Command::Show(id) => self.show_now(&id),
            Command::ShowFiller {
                filler,
                run_next_action,
            } => self.show_filler_now(filler, run_next_action),
            Command::Hide { run_next_action } => self.hide_now(run_next_action),
            Command::Advance => {
                self.run_current(Affordance::Next);
            }
            Command::Retreat => {
                self.run_current(Affordance::Prev);
            }
        }
    }

    fn show_now(&mut self, id: &str) {
        if !self.config.enabled {
            self.sink.on_suppressed(&SuppressedEvent { target: id.into() });
            return;
        }
        let Some(id) = self.steps.get_key_value(id).map(|(key, _)| key.clone()) else {
            self.sink.on_unknown_step(&UnknownStepEvent { id: id.into() });
            return;
        };

        self.attach_exclusive(SurfaceKey::Step(id.clone()));
        self.surface.request_relayout();
        self.set_current(Some(Current::Registered(id)));
    }

    fn show_filler_now(&mut self, filler: Filler, run_next_action: bool) {
        if !self.config.enabled {
            self.sink.on_suppressed(&SuppressedEvent {
                target: filler.name().into(),
            });
            return;
        }

        let key = SurfaceKey::Filler(filler);
        let previous = self.take_current();
        self.attach_exclusive(key.clone());
        self.surface.request_relayout();

        if let Some(mut previous) = previous {
            if run_next_action {
                self.run_taken(&mut previous, Affordance::Next);
            }
        }
        self.drain();

        // Nothing shown by the callbacks outlives the transition.
        self.set_current(None);
        if !(self.config.linger_fillers && self.is_attached(&key)) {
            self.detach_attached();
        }
    }

    fn hide_now(&mut self, run_next_action: bool) {
        if self.current.is_none() && self.attached.is_none() {
            return;
        }
        let previous = self.take_current();
        if let Some(mut previous) = previous {
            if run_next_action {
                self.run_taken(&mut previous, Affordance::Next);
            }
        }
        self.drain();

        self.set_current(None);
        self.detach_attached();
    }

    fn press_now(&mut self, affordance: Affordance) {
        let Some(ran) = self.run_current(affordance) else {
            return;
        };
        if !ran {
            if let Some(step) = self.current_id().cloned() {
                self.sink
                    .on_missing_action(&MissingActionEvent { step, affordance });
            }
        }
    }

    fn route_pointer(&mut self, point: Point, resolver: &dyn ElementResolver) -> Disposition {
        match &self.attached {
            None => return Disposition::PassThrough,
            Some(SurfaceKey::Filler(_)) => return Disposition::Swallow,
            Some(SurfaceKey::Step(_)) => {}
        }
        let Some(step) = current_step_mut(&mut self.current, &mut self.steps) else {
            return Disposition::Swallow;
        };

        if let Some(hit) = step.overlay().mask().hit(point, resolver) {
            step.overlay_mut().mask_mut().activate(hit.index);
            self.sink.on_region_hit(&RegionHitEvent {
                step: step.id().clone(),
                hit,
                point,
            });
            return Disposition::PassThrough;
        }

        if let Some(affordance) = step.overlay().button_at(point) {
            if !step.run(affordance) {
                self.sink.on_missing_action(&MissingActionEvent {
                    step: step.id().clone(),
                    affordance,
                });
            }
        }
        Disposition::Swallow
    }

    /// Runs a callback of the current step. `None` if there is no current
    /// step, otherwise whether a callback was set.
    fn run_current(&mut self, affordance: Affordance) -> Option<bool> {
        let step = current_step_mut(&mut self.current, &mut self.steps)?;
        Some(step.run(affordance))
    }

    /// Runs a callback of a step that was current before `take_current`.
    fn run_taken(&mut self, previous: &mut Current, affordance: Affordance) {
        match previous {
            Current::Registered(id) => {
                if let Some(step) = self.steps.get_mut(id) {
                    step.run(affordance);
                }
            }
            Current::Orphaned(step) => {
                step.run(affordance);
            }
        }
    }

    /// Clears the current step, reporting the transition, and returns it.
    fn take_current(&mut self) -> Option<Current> {
        let previous = self.current.take();
        if let Some(previous) = &previous {
            self.sink.on_transition(&TransitionEvent {
                from: Some(previous.id().clone()),
                to: None,
            });
        }
        previous
    }

    fn set_current(&mut self, next: Option<Current>) {
        let from = self.current_id().cloned();
        self.current = next;
        let to = self.current_id().cloned();
        if from != to {
            self.sink.on_transition(&TransitionEvent { from, to });
        }
    }

    /// Attaches `key`, detaching whatever was attached first.
    fn attach_exclusive(&mut self, key: SurfaceKey) {
        self.detach_attached();
        let overlay = match &key {
            SurfaceKey::Step(id) => match self.steps.get(id) {
                Some(step) => step.overlay(),
                None => return,
            },
            SurfaceKey::Filler(Filler::Blank) => &self.blank,
            SurfaceKey::Filler(Filler::Transparent) => &self.transparent,
        };
        self.surface.attach(&key, overlay);
        self.sink.on_attach(&AttachEvent { key: key.clone() });
        self.attached = Some(key);
    }

    fn detach_attached(&mut self) {
        if let Some(key) = self.attached.take() {
            self.surface.detach(&key);
            self.sink.on_detach(&DetachEvent { key });
        }
    }
}

fn current_step_mut<'a>(
    current: &'a mut Option<Current>,
    steps: &'a mut BTreeMap<StepId, OverlayStep>,
) -> Option<&'a mut OverlayStep> {
    match current.as_mut()? {
        Current::Registered(id) => steps.get_mut(id),
        Current::Orphaned(step) => Some(step),
    }
}

#[cfg(test)]
mod tests;
