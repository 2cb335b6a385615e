//! Card and account value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bank card, identified by its number.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub number: String,
}

impl Card {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }
}

/// A bank account reachable from a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
}

impl Account {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account<{}>", self.id)
    }
}

/// How card numbers are shown in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardMask {
    /// Leading characters left readable
    pub visible: usize,
    /// Replacement for every other character
    pub mask_char: char,
}

impl Default for CardMask {
    fn default() -> Self {
        Self {
            visible: 4,
            mask_char: '*',
        }
    }
}

impl CardMask {
    /// Mask `number`, keeping the first `visible` characters.
    pub fn apply(&self, number: &str) -> String {
        number
            .chars()
            .enumerate()
            .map(|(i, c)| if i < self.visible { c } else { self.mask_char })
            .collect()
    }
}

/// Mask a card number with the default [`CardMask`].
///
/// ```rust
/// use atm_session::model::mask_card_number;
///
/// assert_eq!(mask_card_number("1111-2222-3333-4444"), "1111***************");
/// assert_eq!(mask_card_number("12"), "12");
/// ```
pub fn mask_card_number(number: &str) -> String {
    CardMask::default().apply(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_compare_by_content() {
        assert_eq!(Card::new("1111"), Card::new("1111".to_string()));
        assert_ne!(Account::new("98765432"), Account::new("12345678"));
    }

    #[test]
    fn mask_keeps_length() {
        let masked = mask_card_number("1111-2222-3333-4444");
        assert_eq!(masked.chars().count(), 19);
        assert!(masked.starts_with("1111"));
        assert!(masked[4..].chars().all(|c| c == '*'));
    }

    #[test]
    fn custom_mask() {
        let mask = CardMask {
            visible: 2,
            mask_char: '#',
        };
        assert_eq!(mask.apply("123456"), "12####");
    }

    #[test]
    fn short_and_empty_numbers() {
        assert_eq!(mask_card_number(""), "");
        assert_eq!(mask_card_number("1234"), "1234");
    }

    #[test]
    fn account_display() {
        assert_eq!(Account::new("42").to_string(), "account<42>");
    }
}
