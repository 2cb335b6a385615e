//! Cash device collaborator contract.

mod mock;

pub use mock::MockDevice;

use crate::error::DeviceError;

/// Physical operations of the ATM cabinet: cash dispenser, deposit slot and
/// card reader.
pub trait Device {
    /// Whether the cash cache can cover `amount`.
    fn withdraw_available(&self, amount: u64) -> bool;

    /// Dispense `amount`, reducing the cash cache.
    fn withdraw(&mut self, amount: u64) -> Result<(), DeviceError>;

    /// Amount of the cash captured by the deposit slot.
    fn deposit(&mut self) -> Result<u64, DeviceError>;

    /// Hand the card back to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the card could not be ejected.
    fn card_eject(&mut self) -> Result<(), DeviceError>;
}
