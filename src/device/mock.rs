//! In-memory cash device used by tests and demos.

use super::Device;
use crate::error::DeviceError;
use tracing::debug;

/// Simulated ATM cabinet.
///
/// Holds a cash cache. Every deposit captures a fixed amount into the cache.
/// The card reader and the dispenser can be jammed on demand.
#[derive(Clone, Debug)]
pub struct MockDevice {
    cache: u64,
    deposit_amount: u64,
    jam_card_reader: bool,
    jam_dispenser: bool,
    ejected: usize,
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new(1000, 2000)
    }
}

impl MockDevice {
    pub fn new(deposit_amount: u64, cache: u64) -> Self {
        Self {
            cache,
            deposit_amount,
            jam_card_reader: false,
            jam_dispenser: false,
            ejected: 0,
        }
    }

    /// Cash currently in the cache.
    pub fn cache(&self) -> u64 {
        self.cache
    }

    /// Number of cards ejected so far.
    pub fn ejected_cards(&self) -> usize {
        self.ejected
    }

    pub fn set_card_eject_failure(&mut self, jammed: bool) {
        self.jam_card_reader = jammed;
    }

    pub fn set_dispense_failure(&mut self, jammed: bool) {
        self.jam_dispenser = jammed;
    }
}

impl Device for MockDevice {
    fn withdraw_available(&self, amount: u64) -> bool {
        self.cache >= amount
    }

    fn withdraw(&mut self, amount: u64) -> Result<(), DeviceError> {
        if self.jam_dispenser {
            return Err(DeviceError::DispenserFault("dispenser jammed".to_string()));
        }
        self.cache = self
            .cache
            .checked_sub(amount)
            .ok_or(DeviceError::CacheExhausted {
                requested: amount,
                available: self.cache,
            })?;
        Ok(())
    }

    fn deposit(&mut self) -> Result<u64, DeviceError> {
        self.cache = self.cache.saturating_add(self.deposit_amount);
        Ok(self.deposit_amount)
    }

    fn card_eject(&mut self) -> Result<(), DeviceError> {
        if self.jam_card_reader {
            return Err(DeviceError::EjectJammed("card reader jammed".to_string()));
        }
        self.ejected += 1;
        debug!("card ejected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_follows_cache() {
        let device = MockDevice::new(2000, 2000);
        assert!(device.withdraw_available(2000));
        assert!(!device.withdraw_available(2001));
    }

    #[test]
    fn withdraw_reduces_cache() {
        let mut device = MockDevice::new(2000, 2000);
        device.withdraw(500).unwrap();
        assert_eq!(device.cache(), 1500);
    }

    #[test]
    fn withdraw_beyond_cache_fails() {
        let mut device = MockDevice::new(2000, 100);
        assert_eq!(
            device.withdraw(500),
            Err(DeviceError::CacheExhausted {
                requested: 500,
                available: 100
            })
        );
        assert_eq!(device.cache(), 100);
    }

    #[test]
    fn deposit_captures_cash_into_cache() {
        let mut device = MockDevice::new(750, 0);
        assert_eq!(device.deposit(), Ok(750));
        assert_eq!(device.cache(), 750);
    }

    #[test]
    fn jammed_reader_keeps_card() {
        let mut device = MockDevice::default();
        device.set_card_eject_failure(true);

        assert!(device.card_eject().is_err());
        assert_eq!(device.ejected_cards(), 0);

        device.set_card_eject_failure(false);
        device.card_eject().unwrap();
        assert_eq!(device.ejected_cards(), 1);
    }

    #[test]
    fn jammed_dispenser_keeps_cash() {
        let mut device = MockDevice::new(0, 1000);
        device.set_dispense_failure(true);

        assert!(matches!(
            device.withdraw(100),
            Err(DeviceError::DispenserFault(_))
        ));
        assert_eq!(device.cache(), 1000);
    }
}
