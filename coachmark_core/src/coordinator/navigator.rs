// Copyright 2026 the Coachmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred transition requests issued from callbacks.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::Filler;

/// A transition request queued by a [`Navigator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the step with this id.
    Show(String),
    /// Flash a filler overlay.
    ShowFiller {
        /// Which filler.
        filler: Filler,
        /// Whether to run the previous step's `on_next`.
        run_next_action: bool,
    },
    /// Hide the current step.
    Hide {
        /// Whether to run the current step's `on_next` first.
        run_next_action: bool,
    },
    /// Run the current step's `on_next`.
    Advance,
    /// Run the current step's `on_prev`.
    Retreat,
}

/// A cloneable handle for requesting transitions from inside callbacks.
///
/// Region and step callbacks run while the coordinator is in the middle of an
/// operation, so they cannot borrow it. They capture a `Navigator` instead;
/// every request is queued and the coordinator applies the queue, in order,
/// before the operation that fired the callback returns.
#[derive(Clone, Debug, Default)]
pub struct Navigator {
    queue: Rc<RefCell<VecDeque<Command>>>,
}

impl Navigator {
    /// Requests [`show`](super::TutorialCoordinator::show).
    pub fn show(&self, id: impl Into<String>) {
        self.push(Command::Show(id.into()));
    }

    /// Requests [`show_filler`](super::TutorialCoordinator::show_filler).
    pub fn show_filler(&self, filler: Filler, run_next_action: bool) {
        self.push(Command::ShowFiller {
            filler,
            run_next_action,
        });
    }

    /// Requests [`hide`](super::TutorialCoordinator::hide).
    pub fn hide(&self, run_next_action: bool) {
        self.push(Command::Hide { run_next_action });
    }

    /// Requests [`advance`](super::TutorialCoordinator::advance).
    pub fn advance(&self) {
        self.push(Command::Advance);
    }

    /// Requests [`retreat`](super::TutorialCoordinator::retreat).
    pub fn retreat(&self) {
        self.push(Command::Retreat);
    }

    /// Queues an arbitrary command.
    pub fn push(&self, command: Command) {
        self.queue.borrow_mut().push_back(command);
    }

    /// Number of requests not yet applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Takes the oldest request. The queue is not borrowed once this returns,
    /// so applying the command may queue more.
    pub(crate) fn pop(&self) -> Option<Command> {
        self.queue.borrow_mut().pop_front()
    }
}
