//! Session dialog core
//!
//! Intent routing, the transfer confirmation flow, and reply rendering.
//! Everything here is pure; the engine owns the clock, the randomness, and
//! the store.

pub mod intent;
pub mod reply;
pub mod state;
pub mod transition;

#[cfg(test)]
mod proptests;

pub use intent::{route, BalanceScope, Intent};
pub use state::PendingFlow;
pub use transition::{advance, begin, FlowOutcome};
