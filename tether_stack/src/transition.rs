// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exit transition: a race between the transition-end signal and a fallback timer.
//!
//! Closing an overlay that was shown fades it out. Hosts cannot rely on the
//! transition-end signal alone (it never fires when styles disable the transition), so a
//! fallback timer runs alongside. Whichever fires first completes the exit and the other
//! is disarmed:
//!
//! - [`ExitTransition::on_transition_end`] first: the host should cancel the timer.
//! - [`ExitTransition::on_timer`] first: a later transition-end is ignored.
//!
//! An overlay that was never shown completes immediately.

use core::time::Duration;

use crate::types::Lifecycle;

/// How long to wait for the transition-end signal.
pub const EXIT_FALLBACK: Duration = Duration::from_millis(200);

/// Handle for a fallback timer the host schedules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub(crate) u64);

impl TimerToken {
    /// Raw token value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Result of feeding a signal to an [`ExitTransition`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitProgress {
    /// This signal won the race; unmount now. Cancel `cancel_timer` if set.
    Completed {
        /// Fallback timer the host should cancel.
        cancel_timer: Option<TimerToken>,
    },
    /// The race was already decided, or the timer token does not belong here.
    Ignored,
}

/// A running (or finished) exit transition.
#[derive(Debug, PartialEq, Eq)]
pub struct ExitTransition {
    timer: Option<TimerToken>,
    done: bool,
}

impl ExitTransition {
    /// Start an exit. `shown` is false when the entry animation never ran, in which case
    /// the exit is already complete.
    pub fn start(shown: bool, timer: TimerToken) -> Self {
        if shown {
            Self {
                timer: Some(timer),
                done: false,
            }
        } else {
            Self {
                timer: None,
                done: true,
            }
        }
    }

    /// Fallback timer to schedule for [`EXIT_FALLBACK`], while the race is open.
    pub fn timer(&self) -> Option<TimerToken> {
        if self.done { None } else { self.timer }
    }

    /// True once the overlay may be unmounted.
    pub fn is_complete(&self) -> bool {
        self.done
    }

    /// Lifecycle of the overlay this transition belongs to.
    pub fn lifecycle(&self) -> Lifecycle {
        if self.done {
            Lifecycle::Removed
        } else {
            Lifecycle::Closing
        }
    }

    /// The transition-end signal fired.
    pub fn on_transition_end(&mut self) -> ExitProgress {
        if self.done {
            return ExitProgress::Ignored;
        }
        self.done = true;
        ExitProgress::Completed {
            cancel_timer: self.timer.take(),
        }
    }

    /// A fallback timer fired.
    pub fn on_timer(&mut self, token: TimerToken) -> ExitProgress {
        if self.done || self.timer != Some(token) {
            return ExitProgress::Ignored;
        }
        self.done = true;
        self.timer = None;
        tracing::trace!(token = token.get(), "exit completed by fallback timer");
        ExitProgress::Completed { cancel_timer: None }
    }
}
