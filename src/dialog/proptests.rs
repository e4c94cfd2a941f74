//! Property-based tests for the dialog core
//!
//! These verify the flow-safety invariants across arbitrary input text.

use super::intent::{route, Intent};
use super::state::PendingFlow;
use super::transition::{advance, FlowOutcome, TransitionError};
use crate::bank::BankSnapshot;
use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_amount() -> impl Strategy<Value = Decimal> {
    // Cents, spanning both sides of the checking balance
    (1i64..1_100_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_active_state() -> impl Strategy<Value = PendingFlow> {
    prop_oneof![
        Just(PendingFlow::AwaitingAmount),
        arb_amount().prop_map(|amount| PendingFlow::AwaitingConfirmation { amount }),
    ]
}

fn arb_message() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 $.,!?]{0,60}".prop_map(String::from)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant: a pending flow captures every message, whatever its keywords
    #[test]
    fn prop_active_flow_captures_all_input(
        state in arb_active_state(),
        message in arb_message()
    ) {
        prop_assert_eq!(route(&message, &state), Intent::FlowContinuation);
    }

    // Invariant: "cancel" escapes any active sub-state regardless of what
    // else the message contains
    #[test]
    fn prop_cancel_always_escapes(
        state in arb_active_state(),
        prefix in "[a-zA-Z0-9 $]{0,20}",
        suffix in "[a-zA-Z0-9 $]{0,20}",
    ) {
        let message = format!("{prefix}cancel{suffix}");
        let step = advance(&state, &message, &BankSnapshot::sample()).unwrap();
        prop_assert_eq!(step.new_state, PendingFlow::None);
        prop_assert_eq!(step.outcome, FlowOutcome::Cancelled);
    }

    // Invariant: no accepted amount ever exceeds the checking balance
    #[test]
    fn prop_accepted_amounts_within_balance(message in arb_message()) {
        let bank = BankSnapshot::sample();
        let step = advance(&PendingFlow::AwaitingAmount, &message, &bank).unwrap();
        if let FlowOutcome::AmountAccepted { amount } = step.outcome {
            prop_assert!(amount > Decimal::ZERO);
            prop_assert!(amount <= bank.checking.balance);
            prop_assert_eq!(step.new_state, PendingFlow::AwaitingConfirmation { amount });
        }
    }

    // Invariant: the flow cannot be advanced without being entered
    #[test]
    fn prop_advance_without_flow_errors(message in arb_message()) {
        let result = advance(&PendingFlow::None, &message, &BankSnapshot::sample());
        prop_assert!(matches!(result, Err(TransitionError::NotInFlow)));
    }

    // Invariant: a committed transfer moves money without creating any
    #[test]
    fn prop_commit_conserves_total(amount in arb_amount()) {
        let bank = BankSnapshot::sample();
        let state = PendingFlow::AwaitingConfirmation { amount };
        let step = advance(&state, "confirm", &bank).unwrap();
        match step.outcome {
            FlowOutcome::Committed { amount: committed, new_checking, new_savings } => {
                prop_assert_eq!(committed, amount);
                prop_assert_eq!(
                    new_checking + new_savings,
                    bank.checking.balance + bank.savings.balance
                );
                prop_assert_eq!(step.new_state, PendingFlow::None);
            }
            s => prop_assert!(false, "expected a commit, got {:?}", s),
        }
    }

    // Invariant: routing and advancing are deterministic in their inputs
    #[test]
    fn prop_advance_is_deterministic(
        state in arb_active_state(),
        message in arb_message()
    ) {
        let bank = BankSnapshot::sample();
        let first = advance(&state, &message, &bank).unwrap();
        let second = advance(&state, &message, &bank).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(
            route(&message, &PendingFlow::None),
            route(&message, &PendingFlow::None)
        );
    }
}
