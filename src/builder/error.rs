//! Build errors for the ATM builder.

use crate::config::OptionViolation;
use thiserror::Error;

/// Errors that can occur when building an [`Atm`](crate::atm::Atm).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Bank not specified. Call .bank(bank) before .build()")]
    MissingBank,

    #[error("Device not specified. Call .device(device) before .build()")]
    MissingDevice,

    #[error("Options are invalid ({} violation(s))", .0.len())]
    InvalidOptions(Vec<OptionViolation>),
}
