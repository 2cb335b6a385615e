//! States of an ATM session.
//!
//! A session moves from `Ready` through card insertion, PIN check and account
//! selection, and back to `Ready` when the card is ejected. `Error` is the
//! terminal state reached when the machine needs physical attention.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an ATM session in its lifecycle.
///
/// All methods are pure - no side effects.
///
/// # Example
///
/// ```rust
/// use atm_session::core::SessionState;
///
/// let state = SessionState::PinChecked;
/// assert_eq!(state.name(), "pin_checked");
/// assert!(state.holds_card());
/// assert!(!state.is_final());
///
/// assert!(SessionState::Error.is_final());
/// assert!(!SessionState::Ready.holds_card());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for a card. Initial state.
    #[default]
    Ready,
    /// A card has been accepted by the bank.
    CardInserted,
    /// The cardholder has entered a valid PIN.
    PinChecked,
    /// One of the card's accounts has been chosen.
    AccountSelected,
    /// The device needs repair. No outgoing transitions.
    Error,
}

impl SessionState {
    /// Every state, in lifecycle order.
    pub const ALL: [SessionState; 5] = [
        Self::Ready,
        Self::CardInserted,
        Self::PinChecked,
        Self::AccountSelected,
        Self::Error,
    ];

    /// Get the state's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::CardInserted => "card_inserted",
            Self::PinChecked => "pin_checked",
            Self::AccountSelected => "account_selected",
            Self::Error => "error",
        }
    }

    /// Check if this is a terminal state.
    ///
    /// Only `Error` is terminal; a finished session returns to `Ready`.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Check if this is the error state.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Check if a card is inside the machine in this state.
    pub fn holds_card(&self) -> bool {
        matches!(
            self,
            Self::CardInserted | Self::PinChecked | Self::AccountSelected
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
