//! Per-session matching cursor.

use std::fmt;

use cmdfa_automaton::StateId;

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateRef {
    Valid(StateId),
    /// The last input had no transition. The state it failed in is kept in
    /// [`MatchState::saved`].
    FirstError,
    /// Any input after the first error. Stays here for the rest of the session.
    SubsequentError,
}

impl StateRef {
    pub fn state(self) -> Option<StateId> {
        match self {
            Self::Valid(state) => Some(state),
            Self::FirstError | Self::SubsequentError => None,
        }
    }

    pub fn is_error(self) -> bool {
        !matches!(self, Self::Valid(_))
    }
}

impl fmt::Display for StateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(state) => write!(f, "{state}"),
            Self::FirstError => f.write_str("first-error"),
            Self::SubsequentError => f.write_str("subsequent-error"),
        }
    }
}

/// Cursor owned by one validation session.
///
/// Holds the current state, the state the first mismatch happened in, and the
/// number of successful transitions since the session started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub(crate) current: StateRef,
    pub(crate) saved: Option<StateId>,
    pub(crate) transitions: u32,
}

impl MatchState {
    pub(crate) fn at(state: StateId) -> Self {
        Self {
            current: StateRef::Valid(state),
            saved: None,
            transitions: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> StateRef {
        self.current
    }

    /// State the first mismatch happened in; `None` until one happens.
    #[inline]
    pub fn saved(&self) -> Option<StateId> {
        self.saved
    }

    /// Successful transitions so far in this session.
    #[inline]
    pub fn transition_count(&self) -> u32 {
        self.transitions
    }

    pub fn is_error(&self) -> bool {
        self.current.is_error()
    }

    /// State used for diagnostics: the failing state after an error.
    pub(crate) fn diagnostic_state(&self) -> Option<StateId> {
        match self.current {
            StateRef::Valid(state) => Some(state),
            StateRef::FirstError | StateRef::SubsequentError => self.saved,
        }
    }
}
