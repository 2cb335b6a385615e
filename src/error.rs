//! Error types for the ATM controller and its collaborators.

use crate::core::{InvalidTransition, SessionAction, SessionState};
use thiserror::Error;

/// Failures reported by a [`Bank`](crate::bank::Bank) implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("card is not supported by this bank")]
    UnknownCard,

    #[error("account '{0}' does not exist")]
    UnknownAccount(String),

    #[error("credit of {amount} to account '{account}' was rejected")]
    CreditRejected { account: String, amount: u64 },

    #[error("bank service unavailable: {0}")]
    Unavailable(String),
}

/// Failures reported by a [`Device`](crate::device::Device) implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceError {
    #[error("card could not be ejected: {0}")]
    EjectJammed(String),

    #[error("cash dispenser fault: {0}")]
    DispenserFault(String),

    #[error("deposit slot fault: {0}")]
    DepositFault(String),

    #[error("cash cache holds {available}, cannot take out {requested}")]
    CacheExhausted { requested: u64, available: u64 },
}

/// Errors surfaced to the caller of [`Atm`](crate::atm::Atm) operations.
#[derive(Debug, Error)]
pub enum AtmError {
    #[error("invalid request: action '{action}' is not allowed in state '{state}'")]
    InvalidRequest {
        action: SessionAction,
        state: SessionState,
    },

    #[error("unsupported card")]
    UnsupportedCard {
        #[source]
        source: BankError,
    },

    #[error("invalid pin number")]
    InvalidPinNumber,

    #[error("account '{account}' is not linked to the inserted card")]
    InvalidAccount { account: String },

    #[error("not enough money in the device to withdraw {amount}")]
    NotEnoughMoney { amount: u64 },

    #[error("bank declined withdrawal of {amount}")]
    WithdrawDeclined { amount: u64 },

    #[error("cash for {amount} could not be dispensed")]
    DispenseFailed {
        amount: u64,
        #[source]
        source: DeviceError,
    },

    #[error("cash for {amount} was not dispensed ({dispense}) and the debit could not be refunded")]
    RefundFailed {
        amount: u64,
        dispense: DeviceError,
        #[source]
        refund: BankError,
    },

    #[error("deposit of {amount} was not credited")]
    DepositFailed {
        amount: u64,
        #[source]
        source: BankError,
    },

    #[error("deposit of {amount} was not credited ({credit}) and the cash could not be returned")]
    DepositReturnFailed {
        amount: u64,
        credit: BankError,
        #[source]
        giveback: DeviceError,
    },

    #[error("card eject failed")]
    CardEjectFail {
        #[source]
        source: DeviceError,
    },

    #[error("bank error: {0}")]
    Bank(#[from] BankError),

    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

impl From<InvalidTransition> for AtmError {
    fn from(err: InvalidTransition) -> Self {
        AtmError::InvalidRequest {
            action: err.action,
            state: err.state,
        }
    }
}

/// Fieldless discriminant of [`AtmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidRequest,
    UnsupportedCard,
    InvalidPinNumber,
    InvalidAccount,
    NotEnoughMoney,
    WithdrawDeclined,
    DispenseFailed,
    RefundFailed,
    DepositFailed,
    DepositReturnFailed,
    CardEjectFail,
    Bank,
    Device,
}

/// Which side of the ATM an error originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorDomain {
    /// The caller asked for something the session state does not permit
    Request,
    Bank,
    Device,
}

impl ErrorKind {
    pub fn domain(self) -> ErrorDomain {
        match self {
            Self::InvalidRequest => ErrorDomain::Request,
            Self::UnsupportedCard
            | Self::InvalidPinNumber
            | Self::InvalidAccount
            | Self::WithdrawDeclined
            | Self::RefundFailed
            | Self::DepositFailed
            | Self::Bank => ErrorDomain::Bank,
            Self::NotEnoughMoney
            | Self::DispenseFailed
            | Self::DepositReturnFailed
            | Self::CardEjectFail
            | Self::Device => ErrorDomain::Device,
        }
    }
}

impl AtmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Self::UnsupportedCard { .. } => ErrorKind::UnsupportedCard,
            Self::InvalidPinNumber => ErrorKind::InvalidPinNumber,
            Self::InvalidAccount { .. } => ErrorKind::InvalidAccount,
            Self::NotEnoughMoney { .. } => ErrorKind::NotEnoughMoney,
            Self::WithdrawDeclined { .. } => ErrorKind::WithdrawDeclined,
            Self::DispenseFailed { .. } => ErrorKind::DispenseFailed,
            Self::RefundFailed { .. } => ErrorKind::RefundFailed,
            Self::DepositFailed { .. } => ErrorKind::DepositFailed,
            Self::DepositReturnFailed { .. } => ErrorKind::DepositReturnFailed,
            Self::CardEjectFail { .. } => ErrorKind::CardEjectFail,
            Self::Bank(_) => ErrorKind::Bank,
            Self::Device(_) => ErrorKind::Device,
        }
    }

    pub fn domain(&self) -> ErrorDomain {
        self.kind().domain()
    }
}

pub type Result<T, E = AtmError> = std::result::Result<T, E>;
