//! # Guarded Transitions
//!
//! State machines in an event-driven loop see duplicate and late triggers all the time.
//! Rather than erroring, every guarded transition reports whether it changed anything.

use std::fmt::Debug;

/// Outcome of asking a state machine to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<S> {
    /// The machine moved from `from` to `to`.
    Applied { from: S, to: S },
    /// The request was not valid in the current state and was ignored.
    NoOp,
}

impl<S: Copy + PartialEq + Debug> Transition<S> {
    pub fn applied(from: S, to: S) -> Self {
        Transition::Applied { from, to }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied { .. })
    }

    /// The state moved into, if the transition was applied.
    pub fn target(&self) -> Option<S> {
        match self {
            Transition::Applied { to, .. } => Some(*to),
            Transition::NoOp => None,
        }
    }

    /// True when the transition was applied and landed in `state`.
    pub fn entered(&self, state: S) -> bool {
        self.target() == Some(state)
    }
}
