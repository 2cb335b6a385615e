//! The ATM controller.
//!
//! [`Atm`] wraps a [`SessionMachine`] and drives the bank and the device
//! around it. Each operation:
//!
//! 1. asks the machine whether the action is allowed (no side effects on refusal),
//! 2. talks to the collaborators,
//! 3. commits the transition, or runs a compensating transition and returns a
//!    typed error.
//!
//! Cash is never dispensed before the bank has confirmed the debit.

mod session;

pub use session::Session;

use crate::bank::Bank;
use crate::builder::AtmBuilder;
use crate::config::{AtmOptions, DepositFailurePolicy};
use crate::core::{SessionAction, SessionHistory, SessionMachine, SessionState};
use crate::device::Device;
use crate::error::{AtmError, Result};
use crate::model::{Account, Card};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Transaction orchestrator for one ATM.
///
/// # Example
///
/// ```rust
/// use atm_session::atm::Atm;
/// use atm_session::bank::{LedgerFixture, MockBank};
/// use atm_session::core::SessionState;
/// use atm_session::device::MockDevice;
/// use atm_session::model::Account;
///
/// let fixture = LedgerFixture::new().card("1111-2222", "4321", [("acc-1", 500)]);
/// let mut atm = Atm::new(MockBank::new(fixture).unwrap(), MockDevice::new(0, 1000));
///
/// atm.insert_card("1111-2222").unwrap();
/// atm.check_pin_number("4321").unwrap();
/// let accounts = atm.get_account_list().unwrap();
/// atm.select_account(&accounts[0]).unwrap();
/// atm.withdraw(200).unwrap();
/// assert_eq!(atm.check_balance().unwrap(), 300);
///
/// atm.finish().unwrap();
/// assert_eq!(atm.state(), SessionState::Ready);
/// assert!(atm.session().is_empty());
/// ```
#[derive(Debug)]
pub struct Atm<B, D> {
    machine: SessionMachine,
    session: Session,
    bank: B,
    device: D,
    options: AtmOptions,
}

impl<B: Bank, D: Device> Atm<B, D> {
    /// Create a controller in the `Ready` state with default options.
    pub fn new(bank: B, device: D) -> Self {
        Self::with_options(bank, device, AtmOptions::default())
    }

    /// Create a controller with explicit options.
    ///
    /// Options are taken as given; use [`Atm::builder`] to have them validated.
    pub fn with_options(bank: B, device: D, options: AtmOptions) -> Self {
        Self {
            machine: SessionMachine::new(),
            session: Session::default(),
            bank,
            device,
            options,
        }
    }

    /// Start an [`AtmBuilder`], which validates options before building.
    ///
    /// ```rust
    /// use atm_session::atm::Atm;
    /// use atm_session::bank::{LedgerFixture, MockBank};
    /// use atm_session::core::SessionState;
    /// use atm_session::device::MockDevice;
    ///
    /// let bank = MockBank::new(LedgerFixture::new().card("1111", "0000", [("acc-1", 10)])).unwrap();
    /// let atm = Atm::builder().bank(bank).device(MockDevice::default()).build().unwrap();
    /// assert_eq!(atm.state(), SessionState::Ready);
    /// ```
    pub fn builder() -> AtmBuilder<B, D> {
        AtmBuilder::new()
    }

    /// Accept a card and ask the bank whether it is supported.
    ///
    /// Starts a new session: the history of the previous one is dropped.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` unless the machine is `Ready`.
    /// - `UnsupportedCard` if the bank rejects the card. The card is ejected
    ///   and the machine is back in `Ready`.
    /// - `CardEjectFail` if that ejection fails. The machine is in `Error`.
    pub fn insert_card(&mut self, number: impl Into<String>) -> Result<()> {
        self.machine.check(SessionAction::InsertCard)?;
        self.machine.reset_history();
        self.machine.fire(SessionAction::InsertCard)?;
        self.session.open(Card::new(number));
        let card = self.require_card(SessionAction::InsertCard)?;
        debug!(
            session_id = %self.session.tag(),
            card = %self.mask(&card),
            "card inserted"
        );

        if let Err(source) = self.bank.check_card(&card) {
            warn!(
                session_id = %self.session.tag(),
                card = %self.mask(&card),
                error = %source,
                "card rejected by bank"
            );
            self.finish()?;
            return Err(AtmError::UnsupportedCard { source });
        }
        Ok(())
    }

    /// Verify the PIN for the inserted card.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` unless the state is `CardInserted`.
    /// - `InvalidPinNumber` on a wrong PIN; the session is finished.
    /// - `Bank` if the bank could not check the PIN; the session is finished.
    /// - `CardEjectFail` if finishing the session fails.
    pub fn check_pin_number(&mut self, pin: &str) -> Result<()> {
        self.machine.fire(SessionAction::CheckPinNumber)?;
        let card = self.require_card(SessionAction::CheckPinNumber)?;

        match self.bank.check_pin_number(&card, pin) {
            Ok(true) => {
                debug!(session_id = %self.session.tag(), "pin accepted");
                Ok(())
            }
            Ok(false) => {
                warn!(
                    session_id = %self.session.tag(),
                    card = %self.mask(&card),
                    "pin number rejected"
                );
                self.finish()?;
                Err(AtmError::InvalidPinNumber)
            }
            Err(source) => {
                error!(
                    session_id = %self.session.tag(),
                    card = %self.mask(&card),
                    error = %source,
                    "pin check failed"
                );
                self.finish()?;
                Err(source.into())
            }
        }
    }

    /// Fetch and remember the accounts linked to the card.
    pub fn get_account_list(&mut self) -> Result<Vec<Account>> {
        self.machine.check(SessionAction::GetAccountList)?;
        let card = self.require_card(SessionAction::GetAccountList)?;

        let accounts = self.bank.get_account_list(&card)?;
        self.session.set_account_list(accounts.clone());
        self.machine.fire(SessionAction::GetAccountList)?;
        debug!(
            session_id = %self.session.tag(),
            count = accounts.len(),
            "account list fetched"
        );
        Ok(accounts)
    }

    /// Choose one of the accounts returned by [`get_account_list`](Self::get_account_list).
    ///
    /// # Errors
    ///
    /// `InvalidAccount` if `account` was not offered; the state stays
    /// `PinChecked`.
    pub fn select_account(&mut self, account: &Account) -> Result<()> {
        self.machine.check(SessionAction::SelectAccount)?;

        if !self.session.select(account) {
            warn!(
                session_id = %self.session.tag(),
                account = %account.id,
                "account not linked to card"
            );
            return Err(AtmError::InvalidAccount {
                account: account.id.clone(),
            });
        }
        self.machine.fire(SessionAction::SelectAccount)?;
        debug!(session_id = %self.session.tag(), %account, "account selected");
        Ok(())
    }

    /// Balance of the selected account.
    pub fn check_balance(&mut self) -> Result<u64> {
        self.machine.check(SessionAction::CheckBalance)?;
        let account = self.require_account(SessionAction::CheckBalance)?;

        let balance = self.bank.check_balance(&account)?;
        self.machine.fire(SessionAction::CheckBalance)?;
        Ok(balance)
    }

    /// Debit the account, then dispense cash.
    ///
    /// # Errors
    ///
    /// - `NotEnoughMoney` if the device cannot cover `amount`. The bank is not
    ///   contacted.
    /// - `WithdrawDeclined` if the bank refuses the debit. No cash is dispensed.
    /// - `DispenseFailed` if the device fails after the debit. The debit is
    ///   refunded.
    /// - `RefundFailed` if the device fails and the refund fails too. The
    ///   account stays debited for cash that was never paid out.
    pub fn withdraw(&mut self, amount: u64) -> Result<()> {
        self.machine.check(SessionAction::Withdraw)?;
        let account = self.require_account(SessionAction::Withdraw)?;

        if !self.device.withdraw_available(amount) {
            warn!(session_id = %self.session.tag(), amount, "device cash cache too low");
            return Err(AtmError::NotEnoughMoney { amount });
        }

        match self.bank.withdraw(&account, amount) {
            Ok(true) => {}
            Ok(false) => {
                warn!(session_id = %self.session.tag(), %account, amount, "withdrawal declined");
                return Err(AtmError::WithdrawDeclined { amount });
            }
            Err(source) => {
                error!(
                    session_id = %self.session.tag(),
                    %account,
                    amount,
                    error = %source,
                    "withdrawal failed"
                );
                return Err(source.into());
            }
        }

        if let Err(source) = self.device.withdraw(amount) {
            error!(
                session_id = %self.session.tag(),
                %account,
                amount,
                error = %source,
                "dispense failed after debit, refunding"
            );
            if let Err(refund) = self.bank.deposit(&account, amount) {
                error!(
                    session_id = %self.session.tag(),
                    %account,
                    amount,
                    error = %refund,
                    "refund of undispensed cash failed"
                );
                return Err(AtmError::RefundFailed {
                    amount,
                    dispense: source,
                    refund,
                });
            }
            return Err(AtmError::DispenseFailed { amount, source });
        }

        self.machine.fire(SessionAction::Withdraw)?;
        info!(session_id = %self.session.tag(), %account, amount, "cash dispensed");
        Ok(())
    }

    /// Credit the cash captured by the deposit slot.
    ///
    /// Returns the amount credited. If the bank rejects the credit the cash is
    /// handed back through the device, and the outcome depends on
    /// [`DepositFailurePolicy`]: `Surface` returns `DepositFailed`, `LogOnly`
    /// returns `Ok(0)`.
    ///
    /// # Errors
    ///
    /// `DepositReturnFailed` under either policy when the cash cannot be
    /// handed back after a rejected credit.
    pub fn deposit(&mut self) -> Result<u64> {
        self.machine.check(SessionAction::Deposit)?;
        let account = self.require_account(SessionAction::Deposit)?;

        let amount = self.device.deposit()?;

        if let Err(source) = self.bank.deposit(&account, amount) {
            error!(
                session_id = %self.session.tag(),
                %account,
                amount,
                error = %source,
                "deposit rejected by bank, returning cash"
            );
            if let Err(giveback) = self.device.withdraw(amount) {
                error!(
                    session_id = %self.session.tag(),
                    amount,
                    error = %giveback,
                    "could not return deposited cash"
                );
                return Err(AtmError::DepositReturnFailed {
                    amount,
                    credit: source,
                    giveback,
                });
            }
            return match self.options.deposit_failure {
                DepositFailurePolicy::Surface => Err(AtmError::DepositFailed { amount, source }),
                DepositFailurePolicy::LogOnly => {
                    self.machine.fire(SessionAction::Deposit)?;
                    Ok(0)
                }
            };
        }

        self.machine.fire(SessionAction::Deposit)?;
        info!(session_id = %self.session.tag(), %account, amount, "deposit credited");
        Ok(amount)
    }

    /// Eject the card and end the session.
    ///
    /// Session data is cleared whether or not the ejection works.
    ///
    /// # Errors
    ///
    /// `CardEjectFail` if the device cannot eject the card. The machine is
    /// then in the `Error` state.
    pub fn finish(&mut self) -> Result<()> {
        self.machine.check(SessionAction::Finish)?;
        let tag = self.session.tag();
        let card = self.session.card().map(|c| self.mask(c)).unwrap_or_default();

        let ejected = self.device.card_eject();
        self.session.clear();
        self.machine.fire(SessionAction::Finish)?;

        match ejected {
            Ok(()) => {
                debug!(session_id = %tag, %card, "card ejected, session finished");
                Ok(())
            }
            Err(source) => {
                error!(session_id = %tag, %card, error = %source, "card eject failed");
                self.machine.fire(SessionAction::NeedFix)?;
                Err(AtmError::CardEjectFail { source })
            }
        }
    }

    /// Take the machine out of service. Only allowed between sessions.
    pub fn need_fix(&mut self) -> Result<()> {
        self.machine.fire(SessionAction::NeedFix)?;
        warn!("atm marked as needing repair");
        Ok(())
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.machine.current_state()
    }

    /// Data held for the session in progress.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Id of the session in progress, `None` between sessions.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session.id()
    }

    /// The inserted card.
    pub fn card(&self) -> Option<&Card> {
        self.session.card()
    }

    /// Accounts fetched by the last `get_account_list` of this session.
    pub fn account_list(&self) -> Option<&[Account]> {
        self.session.account_list()
    }

    /// The account chosen with `select_account`.
    pub fn selected_account(&self) -> Option<&Account> {
        self.session.selected_account()
    }

    /// Transitions committed since the current or most recent session began.
    ///
    /// Actions taken between sessions, such as `need_fix`, are appended to
    /// the previous session's trail.
    pub fn history(&self) -> &SessionHistory {
        self.machine.history()
    }

    /// Options the controller was built with.
    pub fn options(&self) -> &AtmOptions {
        &self.options
    }

    /// The bank collaborator.
    pub fn bank(&self) -> &B {
        &self.bank
    }

    /// Mutable access to the bank, for maintenance and tests.
    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    /// The device collaborator.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutable access to the device, for maintenance and tests.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Give back the collaborators.
    pub fn into_parts(self) -> (B, D) {
        (self.bank, self.device)
    }

    fn mask(&self, card: &Card) -> String {
        self.options.card_mask.apply(&card.number)
    }

    // A card is always present in card-holding states; a missing one means the
    // request cannot be served in the current state.
    fn require_card(&self, action: SessionAction) -> Result<Card> {
        self.session.card().cloned().ok_or(AtmError::InvalidRequest {
            action,
            state: self.state(),
        })
    }

    fn require_account(&self, action: SessionAction) -> Result<Account> {
        self.session
            .selected_account()
            .cloned()
            .ok_or(AtmError::InvalidRequest {
                action,
                state: self.state(),
            })
    }
}
