//! Property-based tests for the session state machine and the controller.
//!
//! These tests use proptest to drive both with arbitrary action sequences.

use atm_session::atm::Atm;
use atm_session::bank::{LedgerFixture, MockBank};
use atm_session::core::{target, SessionAction, SessionHistory, SessionMachine, SessionState};
use atm_session::device::MockDevice;
use atm_session::error::ErrorKind;
use atm_session::model::Account;
use proptest::prelude::*;

prop_compose! {
    fn arbitrary_action()(variant in 0..SessionAction::ALL.len()) -> SessionAction {
        SessionAction::ALL[variant]
    }
}

prop_compose! {
    fn arbitrary_state()(variant in 0..SessionState::ALL.len()) -> SessionState {
        SessionState::ALL[variant]
    }
}

fn atm() -> Atm<MockBank, MockDevice> {
    let fixture = LedgerFixture::new().card(
        "1111-2222-3333-4444",
        "12345",
        [("98765432", 5000), ("12345678", 1000)],
    );
    Atm::new(MockBank::new(fixture).unwrap(), MockDevice::new(300, 2000))
}

proptest! {
    #[test]
    fn machine_follows_transition_table(actions in prop::collection::vec(arbitrary_action(), 0..40)) {
        let mut machine = SessionMachine::new();
        let mut accepted = 0;

        for action in actions {
            let before = machine.current_state();
            match target(before, action) {
                Some(expected) => {
                    prop_assert_eq!(machine.fire(action), Ok(expected));
                    accepted += 1;
                }
                None => {
                    prop_assert!(machine.fire(action).is_err());
                    prop_assert_eq!(machine.current_state(), before);
                }
            }
        }

        prop_assert_eq!(machine.history().len(), accepted);
    }

    #[test]
    fn error_state_is_absorbing(actions in prop::collection::vec(arbitrary_action(), 0..20)) {
        let mut machine = SessionMachine::new();
        machine.fire(SessionAction::NeedFix).unwrap();

        for action in actions {
            prop_assert!(machine.fire(action).is_err());
            prop_assert_eq!(machine.current_state(), SessionState::Error);
        }
    }

    #[test]
    fn history_path_is_connected(actions in prop::collection::vec(arbitrary_action(), 0..40)) {
        let mut machine = SessionMachine::new();
        for action in actions {
            let _ = machine.fire(action);
        }

        let transitions = machine.history().transitions();
        for pair in transitions.windows(2) {
            prop_assert_eq!(pair[0].to, pair[1].from);
        }
        if let Some(last) = transitions.last() {
            prop_assert_eq!(last.to, machine.current_state());
        }
    }

    #[test]
    fn history_roundtrip_serialization(actions in prop::collection::vec(arbitrary_action(), 0..10)) {
        let mut machine = SessionMachine::new();
        for action in actions {
            let _ = machine.fire(action);
        }

        let json = serde_json::to_string(machine.history()).unwrap();
        let deserialized: SessionHistory = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(machine.history(), &deserialized);
    }

    #[test]
    fn guard_agrees_with_table(state in arbitrary_state(), action in arbitrary_action()) {
        let guard = atm_session::core::Guard::for_action(action);
        prop_assert_eq!(guard.check(&state), target(state, action).is_some());
    }

    #[test]
    fn controller_keeps_session_invariants(
        steps in prop::collection::vec((arbitrary_action(), 0u64..3000, any::<bool>()), 0..30)
    ) {
        let mut atm = atm();

        for (action, amount, good_input) in steps {
            let before = atm.state();
            let result = match action {
                SessionAction::InsertCard => {
                    atm.insert_card(if good_input { "1111-2222-3333-4444" } else { "0000" })
                }
                SessionAction::CheckPinNumber => {
                    atm.check_pin_number(if good_input { "12345" } else { "99999" })
                }
                SessionAction::GetAccountList => atm.get_account_list().map(|_| ()),
                SessionAction::SelectAccount => {
                    let id = if good_input { "98765432" } else { "nope" };
                    atm.select_account(&Account::new(id))
                }
                SessionAction::CheckBalance => atm.check_balance().map(|_| ()),
                SessionAction::Deposit => atm.deposit().map(|_| ()),
                SessionAction::Withdraw => atm.withdraw(amount),
                SessionAction::Finish => atm.finish(),
                // Keep the machine in service so later steps stay interesting
                SessionAction::NeedFix => continue,
            };

            if let Err(err) = &result {
                if err.kind() == ErrorKind::InvalidRequest {
                    prop_assert_eq!(atm.state(), before);
                }
            }

            let state = atm.state();
            prop_assert_eq!(atm.card().is_some(), state.holds_card());
            if let (Some(selected), Some(list)) = (atm.selected_account(), atm.account_list()) {
                prop_assert!(list.contains(selected));
            }
            if state == SessionState::AccountSelected {
                prop_assert!(atm.selected_account().is_some());
            }
        }
    }
}
