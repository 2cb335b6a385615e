//! Bank collaborator contract.
//!
//! The ATM never owns ledger data. Everything it knows about cards, PINs and
//! balances comes through this trait, implemented by the surrounding service
//! (or by [`MockBank`] in tests and demos).

mod fixture;
mod mock;

pub use fixture::{CardRecord, FixtureError, FixtureViolation, LedgerFixture};
pub use mock::MockBank;

use crate::error::BankError;
use crate::model::{Account, Card};

/// Ledger-side operations the ATM depends on.
///
/// Every call is blocking and either returns a value or a [`BankError`].
pub trait Bank {
    /// Accept or reject a card.
    ///
    /// # Errors
    ///
    /// Returns an error if the card is unknown or unsupported.
    fn check_card(&self, card: &Card) -> Result<(), BankError>;

    /// Compare `pin` with the card's PIN.
    fn check_pin_number(&self, card: &Card, pin: &str) -> Result<bool, BankError>;

    /// Accounts reachable from `card`, in a stable order.
    fn get_account_list(&self, card: &Card) -> Result<Vec<Account>, BankError>;

    fn check_balance(&self, account: &Account) -> Result<u64, BankError>;

    /// Debit `amount`. `Ok(false)` means the debit was refused and nothing
    /// changed.
    fn withdraw(&mut self, account: &Account, amount: u64) -> Result<bool, BankError>;

    /// Credit `amount`.
    ///
    /// # Errors
    ///
    /// Returns an error if the credit cannot be applied.
    fn deposit(&mut self, account: &Account, amount: u64) -> Result<(), BankError>;
}
