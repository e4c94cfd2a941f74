//! Keyword intent classification

use super::state::PendingFlow;

/// Which account a balance inquiry names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceScope {
    All,
    Checking,
    Savings,
    Credit,
}

/// Classified meaning of one utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    BalanceInquiry(BalanceScope),
    TransactionHistory,
    TransferStart,
    AtmLookup,
    BillPay,
    Help,
    Greeting,
    Thanks,
    SecurityStatus,
    /// The message is input to the flow already in progress, not a fresh intent
    FlowContinuation,
    Fallback,
}

/// Map one utterance to an intent.
///
/// Classification is case-insensitive substring containment against a fixed
/// precedence order; the first matching keyword set wins. A pending flow
/// captures all input regardless of keywords (the flow itself honors
/// `cancel`). Pure: no state is touched here.
pub fn route(message: &str, state: &PendingFlow) -> Intent {
    if state.is_active() {
        return Intent::FlowContinuation;
    }

    let text = message.to_lowercase();
    if text.contains("balance") || text.contains("how much") {
        Intent::BalanceInquiry(balance_scope(&text))
    } else if text.contains("transaction") || text.contains("recent") || text.contains("history") {
        Intent::TransactionHistory
    } else if text.contains("transfer") {
        Intent::TransferStart
    } else if text.contains("atm") || text.contains("branch") {
        Intent::AtmLookup
    } else if text.contains("pay") || text.contains("bill") {
        Intent::BillPay
    } else if text.contains("help") {
        Intent::Help
    } else if text.contains("hello") || text.contains("hi") {
        Intent::Greeting
    } else if text.contains("thank") {
        Intent::Thanks
    } else if text.contains("secure") || text.contains("safe") || text.contains("security") {
        Intent::SecurityStatus
    } else {
        Intent::Fallback
    }
}

/// Secondary scope check within an already-matched balance inquiry
fn balance_scope(text: &str) -> BalanceScope {
    if text.contains("savings") {
        BalanceScope::Savings
    } else if text.contains("credit") {
        BalanceScope::Credit
    } else if text.contains("checking") {
        BalanceScope::Checking
    } else {
        BalanceScope::All
    }
}
