//! Controller options.
//!
//! Options are plain data: construct them in code or load them from JSON,
//! then validate. Validation reports every problem in one pass.

use crate::model::CardMask;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// What `deposit` reports when the bank rejects the credit.
///
/// In both cases the captured cash is handed back through the device first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositFailurePolicy {
    /// Return `AtmError::DepositFailed` to the caller.
    #[default]
    Surface,
    /// Log the failure and report success. Matches older deployments.
    LogOnly,
}

/// Tunable behavior of an [`Atm`](crate::atm::Atm).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmOptions {
    pub card_mask: CardMask,
    pub deposit_failure: DepositFailurePolicy,
}

/// A problem with [`AtmOptions`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OptionViolation {
    #[error("card mask must leave at least one character visible")]
    NothingVisible,

    #[error("mask character '{0}' could be mistaken for a card digit")]
    AmbiguousMaskChar(char),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse options: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid options: {}", join(.0))]
    Invalid(Vec<OptionViolation>),
}

fn join(violations: &[OptionViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AtmOptions {
    /// Parse and validate options from JSON. Missing fields take defaults.
    ///
    /// ```rust
    /// use atm_session::config::{AtmOptions, DepositFailurePolicy};
    ///
    /// let options = AtmOptions::from_json(r#"{ "deposit_failure": "log_only" }"#).unwrap();
    /// assert_eq!(options.deposit_failure, DepositFailurePolicy::LogOnly);
    /// assert_eq!(options.card_mask.visible, 4);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: AtmOptions = serde_json::from_str(json)?;
        options.check()?;
        Ok(options)
    }

    /// Check all options, accumulating every violation.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<OptionViolation>> {
        let mask = &self.card_mask;

        let visible = if mask.visible == 0 {
            Validation::fail(OptionViolation::NothingVisible)
        } else {
            Validation::success(())
        };

        let mask_char = if mask.mask_char.is_alphanumeric() {
            Validation::fail(OptionViolation::AmbiguousMaskChar(mask.mask_char))
        } else {
            Validation::success(())
        };

        Validation::all_vec(vec![visible, mask_char]).map(|_| ())
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()
            .into_result()
            .map_err(|violations| ConfigError::Invalid(violations.into_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = AtmOptions::default();
        assert_eq!(options.deposit_failure, DepositFailurePolicy::Surface);
        assert_eq!(options.card_mask, CardMask::default());
        assert!(matches!(options.validate(), Validation::Success(())));
    }

    #[test]
    fn empty_json_yields_defaults() {
        assert_eq!(AtmOptions::from_json("{}").unwrap(), AtmOptions::default());
    }

    #[test]
    fn partial_card_mask_keeps_other_defaults() {
        let options = AtmOptions::from_json(r#"{ "card_mask": { "visible": 6 } }"#).unwrap();
        assert_eq!(options.card_mask.visible, 6);
        assert_eq!(options.card_mask.mask_char, '*');
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let options = AtmOptions {
            card_mask: CardMask {
                visible: 0,
                mask_char: '9',
            },
            ..AtmOptions::default()
        };

        match options.validate() {
            Validation::Failure(violations) => {
                assert_eq!(
                    violations.into_vec(),
                    vec![
                        OptionViolation::NothingVisible,
                        OptionViolation::AmbiguousMaskChar('9')
                    ]
                );
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn invalid_json_values_are_rejected() {
        let err = AtmOptions::from_json(r#"{ "card_mask": { "visible": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref v) if v.len() == 1));
        assert_eq!(
            err.to_string(),
            "invalid options: card mask must leave at least one character visible"
        );

        let err = AtmOptions::from_json(r#"{ "deposit_failure": "explode" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
