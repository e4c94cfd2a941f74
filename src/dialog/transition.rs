//! Pure transfer-flow transitions
//!
//! `begin` and `advance` never touch storage or randomness; they map the
//! current state and one message to a new state plus an outcome for the
//! formatter to render. The caller persists the state and generates the
//! confirmation number.

use super::state::PendingFlow;
use crate::bank::BankSnapshot;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result of advancing the transfer flow by one message
#[derive(Debug, Clone, PartialEq)]
pub struct FlowStep {
    pub new_state: PendingFlow,
    pub outcome: FlowOutcome,
}

impl FlowStep {
    fn new(new_state: PendingFlow, outcome: FlowOutcome) -> Self {
        Self { new_state, outcome }
    }
}

/// What one step decided, for the formatter to render
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// Flow entered; prompt for an amount
    Started,
    /// No parseable (or a zero) amount in the message; re-prompt
    AmountUnparseable,
    /// The named amount exceeds the checking balance; amount discarded
    InsufficientFunds,
    /// Amount captured; prompt for confirmation
    AmountAccepted { amount: Decimal },
    /// Transfer confirmed; balances computed for the receipt
    Committed {
        amount: Decimal,
        new_checking: Decimal,
        new_savings: Decimal,
    },
    /// User escaped the flow
    Cancelled,
    /// Message at the confirmation step said neither `confirm` nor `cancel`
    ConfirmationUnrecognized,
}

/// Errors that can occur advancing the flow
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("no transfer flow in progress")]
    NotInFlow,
}

/// Enter the transfer flow
pub fn begin() -> FlowStep {
    FlowStep::new(PendingFlow::AwaitingAmount, FlowOutcome::Started)
}

/// Advance an in-progress flow with one user message.
///
/// `cancel` anywhere in the message is a universal escape from every
/// sub-state, checked before amount parsing and before `confirm`, so a
/// message containing both tokens cancels rather than commits.
pub fn advance(
    state: &PendingFlow,
    message: &str,
    bank: &BankSnapshot,
) -> Result<FlowStep, TransitionError> {
    let text = message.to_lowercase();
    if state.is_active() && text.contains("cancel") {
        return Ok(FlowStep::new(PendingFlow::None, FlowOutcome::Cancelled));
    }

    match state {
        PendingFlow::None => Err(TransitionError::NotInFlow),
        PendingFlow::AwaitingAmount => Ok(capture_amount(&text, bank)),
        PendingFlow::AwaitingConfirmation { amount } => {
            Ok(confirm_or_reprompt(&text, *amount, bank))
        }
    }
}

fn capture_amount(text: &str, bank: &BankSnapshot) -> FlowStep {
    match parse_amount(text) {
        Some(amount) if amount > bank.checking.balance => {
            FlowStep::new(PendingFlow::AwaitingAmount, FlowOutcome::InsufficientFunds)
        }
        Some(amount) if !amount.is_zero() => FlowStep::new(
            PendingFlow::AwaitingConfirmation { amount },
            FlowOutcome::AmountAccepted { amount },
        ),
        // Nothing numeric, or a zero amount
        _ => FlowStep::new(PendingFlow::AwaitingAmount, FlowOutcome::AmountUnparseable),
    }
}

fn confirm_or_reprompt(text: &str, amount: Decimal, bank: &BankSnapshot) -> FlowStep {
    if text.contains("confirm") {
        FlowStep::new(
            PendingFlow::None,
            FlowOutcome::Committed {
                amount,
                new_checking: bank.checking.balance - amount,
                new_savings: bank.savings.balance + amount,
            },
        )
    } else {
        FlowStep::new(
            PendingFlow::AwaitingConfirmation { amount },
            FlowOutcome::ConfirmationUnrecognized,
        )
    }
}

/// Extract the first dollar amount from free text.
///
/// An optional `$`, then digits, then optionally exactly two decimal places;
/// `100.5` therefore reads as `100`.
fn parse_amount(text: &str) -> Option<Decimal> {
    let re = Regex::new(r"\$?(\d+(?:\.\d{2})?)").ok()?;
    let captures = re.captures(text)?;
    captures.get(1)?.as_str().parse().ok()
}
