//! Actions a caller can request during an ATM session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named request that moves (or keeps) the session in some state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    InsertCard,
    CheckPinNumber,
    GetAccountList,
    SelectAccount,
    CheckBalance,
    Deposit,
    Withdraw,
    Finish,
    NeedFix,
}

impl SessionAction {
    /// Every action the machine knows about.
    pub const ALL: [SessionAction; 9] = [
        Self::InsertCard,
        Self::CheckPinNumber,
        Self::GetAccountList,
        Self::SelectAccount,
        Self::CheckBalance,
        Self::Deposit,
        Self::Withdraw,
        Self::Finish,
        Self::NeedFix,
    ];

    /// Get the action's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertCard => "insert_card",
            Self::CheckPinNumber => "check_pin_number",
            Self::GetAccountList => "get_account_list",
            Self::SelectAccount => "select_account",
            Self::CheckBalance => "check_balance",
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Finish => "finish",
            Self::NeedFix => "need_fix",
        }
    }
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn action_names_are_unique() {
        let names: HashSet<_> = SessionAction::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), SessionAction::ALL.len());
    }

    #[test]
    fn action_serializes_as_snake_case() {
        let json = serde_json::to_string(&SessionAction::CheckPinNumber).unwrap();
        assert_eq!(json, "\"check_pin_number\"");
    }
}
