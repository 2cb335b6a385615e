//! Per-session data owned by the controller.

use crate::model::{Account, Card};
use uuid::Uuid;

/// Data gathered between card insertion and card ejection.
///
/// Fields are filled one step at a time and always cleared together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    id: Option<Uuid>,
    card: Option<Card>,
    account_list: Option<Vec<Account>>,
    selected_account: Option<Account>,
}

impl Session {
    /// Start a new session for `card`, dropping anything left from before.
    pub(crate) fn open(&mut self, card: Card) {
        *self = Session {
            id: Some(Uuid::new_v4()),
            card: Some(card),
            ..Session::default()
        };
    }

    pub(crate) fn set_account_list(&mut self, accounts: Vec<Account>) {
        self.account_list = Some(accounts);
    }

    /// Store `account` as selected if it was offered by the bank.
    ///
    /// Returns `false` and changes nothing otherwise.
    pub(crate) fn select(&mut self, account: &Account) -> bool {
        let offered = self
            .account_list
            .as_ref()
            .is_some_and(|accounts| accounts.contains(account));
        if offered {
            self.selected_account = Some(account.clone());
        }
        offered
    }

    pub(crate) fn clear(&mut self) {
        *self = Session::default();
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    pub fn account_list(&self) -> Option<&[Account]> {
        self.account_list.as_deref()
    }

    pub fn selected_account(&self) -> Option<&Account> {
        self.selected_account.as_ref()
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.card.is_none()
            && self.account_list.is_none()
            && self.selected_account.is_none()
    }

    /// Session id for log fields, `-` outside a session.
    pub(crate) fn tag(&self) -> String {
        self.id.map_or_else(|| "-".to_string(), |id| id.to_string())
    }
}
