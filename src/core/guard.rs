//! Guard predicates for session actions.
//!
//! A guard is the precondition of an action: the set of states the session
//! must be in for the action to be permitted. Guards are derived from the
//! transition table so the two can never disagree.

use super::action::SessionAction;
use super::state::SessionState;
use super::table::TRANSITION_TABLE;

/// Pure predicate that determines if an action may run in a state.
///
/// # Example
///
/// ```rust
/// use atm_session::core::{Guard, SessionAction, SessionState};
///
/// let guard = Guard::for_action(SessionAction::Finish);
///
/// assert!(guard.check(&SessionState::CardInserted));
/// assert!(guard.check(&SessionState::AccountSelected));
/// assert!(!guard.check(&SessionState::Ready));
/// assert!(!guard.check(&SessionState::Error));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guard {
    action: SessionAction,
    sources: Vec<SessionState>,
}

impl Guard {
    /// Build the guard for `action` from the transition table.
    pub fn for_action(action: SessionAction) -> Self {
        let sources = TRANSITION_TABLE
            .iter()
            .filter(|r| r.action == action)
            .map(|r| r.from)
            .collect();
        Guard { action, sources }
    }

    /// The action this guard protects.
    pub fn action(&self) -> SessionAction {
        self.action
    }

    /// States from which the action is permitted.
    pub fn sources(&self) -> &[SessionState] {
        &self.sources
    }

    /// Check if the guard allows the action from this state.
    pub fn check(&self, state: &SessionState) -> bool {
        self.sources.contains(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_allows_matching_states() {
        let guard = Guard::for_action(SessionAction::InsertCard);

        assert!(guard.check(&SessionState::Ready));
        assert!(!guard.check(&SessionState::CardInserted));
    }

    #[test]
    fn account_actions_require_selected_account() {
        for action in [
            SessionAction::CheckBalance,
            SessionAction::Deposit,
            SessionAction::Withdraw,
        ] {
            let guard = Guard::for_action(action);
            assert_eq!(guard.sources(), &[SessionState::AccountSelected]);
        }
    }

    #[test]
    fn finish_guard_covers_card_states() {
        let guard = Guard::for_action(SessionAction::Finish);

        assert_eq!(guard.sources().len(), 3);
        for state in SessionState::ALL {
            assert_eq!(guard.check(&state), state.holds_card());
        }
    }

    #[test]
    fn no_guard_admits_error_state() {
        for action in SessionAction::ALL {
            assert!(!Guard::for_action(action).check(&SessionState::Error));
        }
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::for_action(SessionAction::NeedFix);

        assert_eq!(
            guard.check(&SessionState::Ready),
            guard.check(&SessionState::Ready)
        );
        assert_eq!(guard.action(), SessionAction::NeedFix);
    }
}
