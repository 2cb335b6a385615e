//! Builder API for assembling an ATM controller.
//!
//! The builder collects the two collaborators and the options, and checks
//! that nothing is missing or invalid before handing out an [`Atm`].

pub mod error;

pub use error::BuildError;

use crate::atm::Atm;
use crate::bank::Bank;
use crate::config::AtmOptions;
use crate::device::Device;
use stillwater::validation::Validation;

/// Builder for constructing an [`Atm`] with a fluent API.
///
/// # Example
///
/// ```
/// use atm_session::atm::Atm;
/// use atm_session::bank::{LedgerFixture, MockBank};
/// use atm_session::config::AtmOptions;
/// use atm_session::device::MockDevice;
///
/// let bank = MockBank::new(LedgerFixture::new().card("1111", "0000", [("a", 1)])).unwrap();
///
/// let atm = Atm::builder()
///     .bank(bank)
///     .device(MockDevice::default())
///     .options(AtmOptions::default())
///     .build()
///     .unwrap();
/// ```
pub struct AtmBuilder<B, D> {
    bank: Option<B>,
    device: Option<D>,
    options: AtmOptions,
}

impl<B: Bank, D: Device> AtmBuilder<B, D> {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            bank: None,
            device: None,
            options: AtmOptions::default(),
        }
    }

    /// Set the bank collaborator (required).
    pub fn bank(mut self, bank: B) -> Self {
        self.bank = Some(bank);
        self
    }

    /// Set the device collaborator (required).
    pub fn device(mut self, device: D) -> Self {
        self.device = Some(device);
        self
    }

    /// Options to validate and hand to the controller.
    pub fn options(mut self, options: AtmOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the controller.
    /// Returns an error if a collaborator is missing or the options are invalid.
    pub fn build(self) -> Result<Atm<B, D>, BuildError> {
        let bank = self.bank.ok_or(BuildError::MissingBank)?;
        let device = self.device.ok_or(BuildError::MissingDevice)?;

        if let Validation::Failure(violations) = self.options.validate() {
            return Err(BuildError::InvalidOptions(violations.into_vec()));
        }

        Ok(Atm::with_options(bank, device, self.options))
    }
}

impl<B: Bank, D: Device> Default for AtmBuilder<B, D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{LedgerFixture, MockBank};
    use crate::config::{DepositFailurePolicy, OptionViolation};
    use crate::core::SessionState;
    use crate::device::MockDevice;
    use crate::model::CardMask;

    fn bank() -> MockBank {
        MockBank::new(LedgerFixture::new().card("1111", "0000", [("a", 1)])).unwrap()
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = AtmBuilder::<MockBank, MockDevice>::new()
            .device(MockDevice::default())
            .build();
        assert!(matches!(result, Err(BuildError::MissingBank)));

        let result = AtmBuilder::<MockBank, MockDevice>::new().bank(bank()).build();
        assert!(matches!(result, Err(BuildError::MissingDevice)));
    }

    #[test]
    fn builder_rejects_invalid_options() {
        let options = AtmOptions {
            card_mask: CardMask {
                visible: 0,
                mask_char: '*',
            },
            ..AtmOptions::default()
        };

        let result = Atm::builder()
            .bank(bank())
            .device(MockDevice::default())
            .options(options)
            .build();

        match result {
            Err(BuildError::InvalidOptions(violations)) => {
                assert_eq!(violations, vec![OptionViolation::NothingVisible]);
            }
            _ => panic!("Expected InvalidOptions"),
        }
    }

    #[test]
    fn fluent_api_builds_atm() {
        let options = AtmOptions {
            deposit_failure: DepositFailurePolicy::LogOnly,
            ..AtmOptions::default()
        };

        let atm = Atm::builder()
            .bank(bank())
            .device(MockDevice::default())
            .options(options)
            .build()
            .unwrap();

        assert_eq!(atm.state(), SessionState::Ready);
        assert_eq!(atm.options().deposit_failure, DepositFailurePolicy::LogOnly);
        assert!(atm.session().is_empty());
    }
}
