//! Session transition history.
//!
//! Every committed transition is recorded with the action that caused it,
//! giving an audit trail of the session that never includes card data.

use super::action::SessionAction;
use super::state::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: SessionState,
    /// The action that was applied
    pub action: SessionAction,
    /// The state being transitioned to
    pub to: SessionState,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of session transitions.
///
/// # Example
///
/// ```rust
/// use atm_session::core::{SessionAction, SessionHistory, SessionState, StateTransition};
/// use chrono::Utc;
///
/// let mut history = SessionHistory::new();
/// history.record(StateTransition {
///     from: SessionState::Ready,
///     action: SessionAction::InsertCard,
///     to: SessionState::CardInserted,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![SessionState::Ready, SessionState::CardInserted]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionHistory {
    transitions: Vec<StateTransition>,
}

impl SessionHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a transition.
    pub fn record(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the initial state, then the `to` state of each transition.
    /// Self-transitions appear as repeated states.
    pub fn get_path(&self) -> Vec<SessionState> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Actions applied, in order.
    pub fn actions(&self) -> Vec<SessionAction> {
        self.transitions.iter().map(|t| t.action).collect()
    }

    /// Time between the first and last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
