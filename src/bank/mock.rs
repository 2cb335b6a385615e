//! In-memory bank used by tests and demos.

use super::fixture::{FixtureError, LedgerFixture};
use super::Bank;
use crate::error::BankError;
use crate::model::{Account, Card};
use std::collections::HashMap;

/// In-memory [`Bank`] seeded from a validated [`LedgerFixture`].
///
/// Withdrawals that would overdraw an account are refused with `Ok(false)`.
///
/// # Example
///
/// ```rust
/// use atm_session::bank::{Bank, LedgerFixture, MockBank};
/// use atm_session::model::{Account, Card};
///
/// let fixture = LedgerFixture::new().card("1111", "0000", [("acc-1", 100)]);
/// let mut bank = MockBank::new(fixture).unwrap();
///
/// assert!(bank.check_card(&Card::new("1111")).is_ok());
/// assert_eq!(bank.withdraw(&Account::new("acc-1"), 500), Ok(false));
/// assert_eq!(bank.check_balance(&Account::new("acc-1")), Ok(100));
/// ```
#[derive(Clone, Debug)]
pub struct MockBank {
    fixture: LedgerFixture,
    balances: HashMap<String, u64>,
    reject_credits: bool,
}

impl MockBank {
    /// Build a bank from `fixture`.
    ///
    /// # Errors
    ///
    /// Returns every fixture violation if the fixture is invalid.
    pub fn new(fixture: LedgerFixture) -> Result<Self, FixtureError> {
        fixture.check()?;
        let balances = fixture
            .cards
            .values()
            .flat_map(|record| record.accounts.iter())
            .map(|(id, balance)| (id.clone(), *balance))
            .collect();
        Ok(Self {
            fixture,
            balances,
            reject_credits: false,
        })
    }

    /// Make every following `deposit` call fail.
    pub fn set_reject_credits(&mut self, reject: bool) {
        self.reject_credits = reject;
    }

    fn balance_mut(&mut self, account: &Account) -> Result<&mut u64, BankError> {
        self.balances
            .get_mut(&account.id)
            .ok_or_else(|| BankError::UnknownAccount(account.id.clone()))
    }
}

impl Bank for MockBank {
    fn check_card(&self, card: &Card) -> Result<(), BankError> {
        if self.fixture.cards.contains_key(&card.number) {
            Ok(())
        } else {
            Err(BankError::UnknownCard)
        }
    }

    fn check_pin_number(&self, card: &Card, pin: &str) -> Result<bool, BankError> {
        Ok(self
            .fixture
            .cards
            .get(&card.number)
            .is_some_and(|record| record.pin == pin))
    }

    fn get_account_list(&self, card: &Card) -> Result<Vec<Account>, BankError> {
        let record = self
            .fixture
            .cards
            .get(&card.number)
            .ok_or(BankError::UnknownCard)?;
        Ok(record.accounts.keys().map(Account::new).collect())
    }

    fn check_balance(&self, account: &Account) -> Result<u64, BankError> {
        self.balances
            .get(&account.id)
            .copied()
            .ok_or_else(|| BankError::UnknownAccount(account.id.clone()))
    }

    fn withdraw(&mut self, account: &Account, amount: u64) -> Result<bool, BankError> {
        let balance = self.balance_mut(account)?;
        match balance.checked_sub(amount) {
            Some(rest) => {
                *balance = rest;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn deposit(&mut self, account: &Account, amount: u64) -> Result<(), BankError> {
        if self.reject_credits {
            return Err(BankError::CreditRejected {
                account: account.id.clone(),
                amount,
            });
        }
        let balance = self.balance_mut(account)?;
        *balance = balance.checked_add(amount).ok_or_else(|| BankError::CreditRejected {
            account: account.id.clone(),
            amount,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> MockBank {
        let fixture = LedgerFixture::new()
            .card("1111-2222-3333-4444", "12345", [("98765432", 5000), ("12345678", 1000)])
            .card("5555-6666-7777-8888", "00000", [("55555555", 10)]);
        MockBank::new(fixture).unwrap()
    }

    #[test]
    fn unknown_card_is_rejected() {
        let bank = bank();
        assert_eq!(
            bank.check_card(&Card::new("1234-1234-3333-4444")),
            Err(BankError::UnknownCard)
        );
    }

    #[test]
    fn pin_check_is_per_card() {
        let bank = bank();
        let card = Card::new("1111-2222-3333-4444");

        assert_eq!(bank.check_pin_number(&card, "12345"), Ok(true));
        assert_eq!(bank.check_pin_number(&card, "00000"), Ok(false));
        assert_eq!(
            bank.check_pin_number(&Card::new("nope"), "12345"),
            Ok(false)
        );
    }

    #[test]
    fn account_list_only_contains_card_accounts() {
        let bank = bank();
        let accounts = bank
            .get_account_list(&Card::new("1111-2222-3333-4444"))
            .unwrap();

        assert_eq!(
            accounts,
            vec![Account::new("98765432"), Account::new("12345678")]
        );
    }

    #[test]
    fn withdraw_refuses_overdraft() {
        let mut bank = bank();
        let account = Account::new("12345678");

        assert_eq!(bank.withdraw(&account, 4000), Ok(false));
        assert_eq!(bank.check_balance(&account), Ok(1000));

        assert_eq!(bank.withdraw(&account, 1000), Ok(true));
        assert_eq!(bank.check_balance(&account), Ok(0));
    }

    #[test]
    fn deposit_credits_account() {
        let mut bank = bank();
        let account = Account::new("55555555");

        bank.deposit(&account, 90).unwrap();
        assert_eq!(bank.check_balance(&account), Ok(100));
    }

    #[test]
    fn rejected_credit_leaves_balance() {
        let mut bank = bank();
        let account = Account::new("55555555");
        bank.set_reject_credits(true);

        assert!(matches!(
            bank.deposit(&account, 90),
            Err(BankError::CreditRejected { amount: 90, .. })
        ));
        assert_eq!(bank.check_balance(&account), Ok(10));
    }

    #[test]
    fn unknown_account_errors() {
        let mut bank = bank();
        let ghost = Account::new("ghost");

        assert_eq!(
            bank.check_balance(&ghost),
            Err(BankError::UnknownAccount("ghost".to_string()))
        );
        assert!(bank.withdraw(&ghost, 1).is_err());
    }

    #[test]
    fn invalid_fixture_is_refused() {
        let fixture = LedgerFixture::new()
            .card("1111", "1", [("A", 1)])
            .card("2222", "2", [("A", 2)]);

        let err = MockBank::new(fixture).unwrap_err();
        assert_eq!(err.violations.len(), 1);
    }
}
