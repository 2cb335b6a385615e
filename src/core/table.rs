//! The session transition table.
//!
//! Each rule maps a `(state, action)` pair to the resulting state. A pair
//! missing from the table is an invalid request.

use super::action::SessionAction;
use super::state::SessionState;
use serde::Serialize;

/// A single `(from, action) -> to` rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TransitionRule {
    pub from: SessionState,
    pub action: SessionAction,
    pub to: SessionState,
}

const fn rule(from: SessionState, action: SessionAction, to: SessionState) -> TransitionRule {
    TransitionRule { from, action, to }
}

use SessionAction as A;
use SessionState as S;

/// All permitted transitions of an ATM session.
pub const TRANSITION_TABLE: &[TransitionRule] = &[
    rule(S::Ready, A::InsertCard, S::CardInserted),
    rule(S::CardInserted, A::CheckPinNumber, S::PinChecked),
    rule(S::PinChecked, A::GetAccountList, S::PinChecked),
    rule(S::PinChecked, A::SelectAccount, S::AccountSelected),
    rule(S::AccountSelected, A::CheckBalance, S::AccountSelected),
    rule(S::AccountSelected, A::Deposit, S::AccountSelected),
    rule(S::AccountSelected, A::Withdraw, S::AccountSelected),
    rule(S::CardInserted, A::Finish, S::Ready),
    rule(S::PinChecked, A::Finish, S::Ready),
    rule(S::AccountSelected, A::Finish, S::Ready),
    rule(S::Ready, A::NeedFix, S::Error),
];

/// Look up the state reached by applying `action` in `from`.
///
/// Returns `None` when the table has no rule for the pair.
pub fn target(from: SessionState, action: SessionAction) -> Option<SessionState> {
    TRANSITION_TABLE
        .iter()
        .find(|r| r.from == from && r.action == action)
        .map(|r| r.to)
}
