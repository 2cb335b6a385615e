//! ATM session: a guarded session state machine for automated teller machines
//!
//! The crate splits an ATM into a pure core and an effectful shell.
//! The core is a finite state machine over session states, driven by a
//! fixed transition table. The shell ([`atm::Atm`]) wraps it and coordinates two
//! collaborators, a [`bank::Bank`] ledger and a [`device::Device`] cabinet,
//! undoing partial work when one of them fails.
//!
//! # Core Concepts
//!
//! - **Session states**: `ready`, `card_inserted`, `pin_checked`,
//!   `account_selected`, and the terminal `error`
//! - **Guards**: every action is checked against the transition table before
//!   any collaborator is called
//! - **Compensation**: failed bank or device calls send the session back to a
//!   safe state and surface a typed [`error::AtmError`]
//!
//! # Example
//!
//! ```rust
//! use atm_session::atm::Atm;
//! use atm_session::bank::{LedgerFixture, MockBank};
//! use atm_session::device::MockDevice;
//! use atm_session::error::ErrorKind;
//! use atm_session::model::Account;
//!
//! let fixture = LedgerFixture::new()
//!     .card("1111-2222-3333-4444", "12345", [("98765432", 5000)]);
//! let bank = MockBank::new(fixture).unwrap();
//! let mut atm = Atm::new(bank, MockDevice::new(2000, 2000));
//!
//! // Actions out of order are refused without touching the bank
//! let err = atm.withdraw(100).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidRequest);
//!
//! atm.insert_card("1111-2222-3333-4444").unwrap();
//! atm.check_pin_number("12345").unwrap();
//! atm.get_account_list().unwrap();
//! atm.select_account(&Account::new("98765432")).unwrap();
//! assert_eq!(atm.check_balance().unwrap(), 5000);
//! atm.finish().unwrap();
//! ```

pub mod atm;
pub mod bank;
pub mod builder;
pub mod config;
pub mod core;
pub mod device;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use crate::atm::Atm;
pub use crate::core::{SessionAction, SessionMachine, SessionState};
pub use crate::error::{AtmError, ErrorKind};
