//! Seed data for [`MockBank`](super::MockBank).
//!
//! Fixtures are validated before use and every problem is reported at once,
//! instead of failing at the first bad card.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// One card's PIN and its accounts with opening balances.
///
/// Accounts keep the order they were listed in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub pin: String,
    #[serde(default)]
    pub accounts: IndexMap<String, u64>,
}

/// Card number -> card record.
///
/// Serialized as a plain JSON object:
///
/// ```json
/// { "1111-2222-3333-4444": { "pin": "12345", "accounts": { "98765432": 5000 } } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerFixture {
    pub cards: BTreeMap<String, CardRecord>,
}

/// A problem found while validating a [`LedgerFixture`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FixtureViolation {
    #[error("card '{card}' has an empty pin")]
    EmptyPin { card: String },

    #[error("card '{card}' has no accounts")]
    NoAccounts { card: String },

    /// Balances are keyed by account id alone, so ids must be unique
    /// across all cards.
    #[error("account '{account}' is shared by cards '{first}' and '{second}'")]
    DuplicateAccount {
        account: String,
        first: String,
        second: String,
    },
}

/// A fixture failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid ledger fixture ({} violation(s))", .violations.len())]
pub struct FixtureError {
    pub violations: Vec<FixtureViolation>,
}

impl LedgerFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card with its PIN and accounts.
    pub fn card<I, K>(mut self, number: impl Into<String>, pin: impl Into<String>, accounts: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        let record = CardRecord {
            pin: pin.into(),
            accounts: accounts.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        };
        self.cards.insert(number.into(), record);
        self
    }

    /// Parse a fixture from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check every card, accumulating all violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<FixtureViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<FixtureViolation>>> = Vec::new();
        let mut owners: HashMap<&str, &str> = HashMap::new();

        for (card, record) in &self.cards {
            checks.push(if record.pin.is_empty() {
                Validation::fail(FixtureViolation::EmptyPin { card: card.clone() })
            } else {
                Validation::success(())
            });

            checks.push(if record.accounts.is_empty() {
                Validation::fail(FixtureViolation::NoAccounts { card: card.clone() })
            } else {
                Validation::success(())
            });

            for account in record.accounts.keys() {
                checks.push(match owners.insert(account, card) {
                    Some(first) => Validation::fail(FixtureViolation::DuplicateAccount {
                        account: account.clone(),
                        first: first.to_string(),
                        second: card.clone(),
                    }),
                    None => Validation::success(()),
                });
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn check(&self) -> Result<(), FixtureError> {
        self.validate()
            .into_result()
            .map_err(|violations| FixtureError {
                violations: violations.into_vec(),
            })
    }
}
