//! Core session state machine.
//!
//! This module contains the pure part of the ATM:
//! - Session states and actions
//! - The transition table and the guards derived from it
//! - Transition history
//!
//! Nothing in this module talks to a bank or a device.

mod action;
mod guard;
mod history;
mod machine;
mod state;
mod table;

pub use action::SessionAction;
pub use guard::Guard;
pub use history::{SessionHistory, StateTransition};
pub use machine::{InvalidTransition, SessionMachine};
pub use state::SessionState;
pub use table::{target, TransitionRule, TRANSITION_TABLE};
