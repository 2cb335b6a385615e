//! Session Walkthrough
//!
//! This example drives one full ATM session against the in-memory bank and
//! device, then shows the two compensation paths.
//!
//! Key concepts:
//! - Guarded actions refused outside their state
//! - Withdrawals debit the bank before cash leaves the device
//! - A jammed card reader sends the machine to the error state
//!
//! Run with: RUST_LOG=atm_session=debug cargo run --example session_walkthrough

use atm_session::atm::Atm;
use atm_session::bank::{LedgerFixture, MockBank};
use atm_session::device::MockDevice;
use atm_session::error::AtmError;
use atm_session::model::Account;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LEDGER: &str = r#"{
    "1111-2222-3333-4444": {
        "pin": "12345",
        "accounts": { "98765432": 5000, "12345678": 1000 }
    }
}"#;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "session_walkthrough=info,atm_session=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    println!("=== ATM Session Walkthrough ===\n");

    let bank = MockBank::new(LedgerFixture::from_json(LEDGER)?)?;
    let mut atm = Atm::builder()
        .bank(bank)
        .device(MockDevice::new(2000, 2000))
        .build()?;

    println!("1. Withdrawing before inserting a card:");
    match atm.withdraw(100) {
        Err(err @ AtmError::InvalidRequest { .. }) => println!("   refused: {err}\n"),
        other => println!("   unexpected: {other:?}\n"),
    }

    println!("2. Normal session:");
    atm.insert_card("1111-2222-3333-4444")?;
    atm.check_pin_number("12345")?;
    let accounts = atm.get_account_list()?;
    println!("   accounts: {accounts:?}");

    let account = Account::new("98765432");
    atm.select_account(&account)?;
    println!("   balance: {}", atm.check_balance()?);

    atm.withdraw(1000)?;
    println!("   after withdrawing 1000: {}", atm.check_balance()?);

    let credited = atm.deposit()?;
    println!("   after depositing {credited}: {}", atm.check_balance()?);

    match atm.withdraw(5000) {
        Err(err) => println!("   withdrawing 5000: {err}"),
        Ok(()) => println!("   withdrawing 5000 succeeded"),
    }

    atm.finish()?;
    println!("   finished, state = {}\n", atm.state());

    println!("3. Jammed card reader:");
    atm.insert_card("1111-2222-3333-4444")?;
    atm.device_mut().set_card_eject_failure(true);
    match atm.finish() {
        Err(err) => println!("   {err}, state = {}", atm.state()),
        Ok(()) => println!("   card ejected"),
    }

    println!("\nTransition path:");
    for state in atm.history().get_path() {
        println!("   {state}");
    }

    println!("\n=== Walkthrough Complete ===");
    Ok(())
}
