//! The session state machine.
//!
//! `SessionMachine` validates and records state only. It holds no
//! collaborator references and performs no I/O, so it can be driven on its
//! own as well as from inside the `Atm` controller.

use super::action::SessionAction;
use super::guard::Guard;
use super::history::{SessionHistory, StateTransition};
use super::state::SessionState;
use super::table::{target, TRANSITION_TABLE};
use chrono::Utc;
use thiserror::Error;

/// An action was requested in a state that does not permit it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("action '{action}' is not allowed in state '{state}'")]
pub struct InvalidTransition {
    pub action: SessionAction,
    pub state: SessionState,
}

/// Finite state machine over [`SessionState`] driven by [`SessionAction`]s.
///
/// # Example
///
/// ```rust
/// use atm_session::core::{SessionAction, SessionMachine, SessionState};
///
/// let mut machine = SessionMachine::new();
/// machine.fire(SessionAction::InsertCard).unwrap();
/// machine.fire(SessionAction::CheckPinNumber).unwrap();
/// assert_eq!(machine.current_state(), SessionState::PinChecked);
///
/// // Guard failures leave the state untouched
/// assert!(machine.fire(SessionAction::Withdraw).is_err());
/// assert_eq!(machine.current_state(), SessionState::PinChecked);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SessionMachine {
    current: SessionState,
    history: SessionHistory,
}

impl SessionMachine {
    /// Create a machine in the `Ready` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> SessionState {
        self.current
    }

    /// Check if machine is in a final state (pure)
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Get transition history (pure)
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Whether `action` is permitted in the current state (pure).
    pub fn can(&self, action: SessionAction) -> bool {
        Guard::for_action(action).check(&self.current)
    }

    /// Validate `action` without committing it.
    ///
    /// Returns the state the action would lead to.
    pub fn check(&self, action: SessionAction) -> Result<SessionState, InvalidTransition> {
        target(self.current, action).ok_or(InvalidTransition {
            action,
            state: self.current,
        })
    }

    /// Validate and commit `action`, returning the new state.
    ///
    /// On failure the state and history are unchanged.
    pub fn fire(&mut self, action: SessionAction) -> Result<SessionState, InvalidTransition> {
        let to = self.check(action)?;
        self.history.record(StateTransition {
            from: self.current,
            action,
            to,
            timestamp: Utc::now(),
        });
        self.current = to;
        Ok(to)
    }

    /// Drop the recorded transitions, keeping the current state.
    pub fn reset_history(&mut self) {
        self.history = SessionHistory::new();
    }

    /// Actions permitted in the current state, in table order.
    pub fn permitted_actions(&self) -> Vec<SessionAction> {
        TRANSITION_TABLE
            .iter()
            .filter(|r| r.from == self.current)
            .map(|r| r.action)
            .collect()
    }
}
