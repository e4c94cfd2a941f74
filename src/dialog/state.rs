//! Per-session conversation state

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The multi-turn flow a session is currently inside, if any.
///
/// Persisted as tagged JSON in the session record. The transfer amount lives
/// only on the state that has captured one, so an amount with no pending
/// flow is unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
#[derive(Default)]
pub enum PendingFlow {
    /// No flow in progress; fresh intents route normally
    #[default]
    None,

    /// Transfer started, waiting for the user to name an amount
    AwaitingAmount,

    /// Amount captured, waiting for `confirm` or `cancel`
    AwaitingConfirmation { amount: Decimal },
}

impl PendingFlow {
    /// Check whether a flow is currently capturing input
    pub fn is_active(&self) -> bool {
        !matches!(self, PendingFlow::None)
    }
}
