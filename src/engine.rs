//! Per-turn orchestration
//!
//! One strictly ordered pipeline: validate, load session state, route,
//! advance or render, persist, reply. The engine also owns the only two
//! impure inputs a reply can need (the local clock hour for greetings and
//! the confirmation number for committed transfers), so everything beneath
//! it stays deterministic.

use crate::bank::BankSnapshot;
use crate::dialog::{self, reply, BalanceScope, FlowOutcome, Intent, PendingFlow};
use crate::session::SessionStore;
use crate::validate::{validate_turn, ValidationError};
use chrono::{Local, Timelike};
use rand::Rng;
use serde_json::Value;

/// Result of one handled turn
#[derive(Debug, Clone)]
pub struct TurnOutput {
    pub session_id: String,
    pub reply: String,
}

/// The dialog engine; one instance serves every session
#[derive(Clone)]
pub struct DialogEngine {
    store: SessionStore,
    bank: BankSnapshot,
    max_message_len: usize,
}

impl DialogEngine {
    pub fn new(store: SessionStore, bank: BankSnapshot, max_message_len: usize) -> Self {
        Self {
            store,
            bank,
            max_message_len,
        }
    }

    /// Handle one turn end to end.
    ///
    /// Validation failures reject the turn before any session state is read
    /// or written. Past validation, every input produces a reply.
    pub fn handle_turn(
        &self,
        session_id: Option<Value>,
        message: Option<Value>,
    ) -> Result<TurnOutput, ValidationError> {
        let turn = validate_turn(session_id, message, self.max_message_len)?;

        let loaded = self.store.load(&turn.session_id);
        let intent = dialog::route(&turn.message, &loaded);
        tracing::debug!(session_id = %turn.session_id, intent = ?intent, "Routed turn");

        let (new_state, reply_text) = self.dispatch(intent, &loaded, &turn.message);

        self.store.persist_turn(
            &turn.session_id,
            &loaded,
            &new_state,
            &turn.message,
            &reply_text,
        );

        Ok(TurnOutput {
            session_id: turn.session_id,
            reply: reply_text,
        })
    }

    fn dispatch(
        &self,
        intent: Intent,
        loaded: &PendingFlow,
        message: &str,
    ) -> (PendingFlow, String) {
        let bank = &self.bank;
        match intent {
            Intent::FlowContinuation => self.continue_flow(loaded, message),
            Intent::TransferStart => {
                let step = dialog::begin();
                let text = self.render_outcome(&step.outcome);
                (step.new_state, text)
            }
            Intent::BalanceInquiry(scope) => (loaded.clone(), self.balance_reply(scope)),
            Intent::TransactionHistory => (loaded.clone(), reply::transactions(bank)),
            Intent::AtmLookup => (loaded.clone(), reply::atm_locations(bank)),
            Intent::BillPay => (loaded.clone(), reply::bills()),
            Intent::Help => (loaded.clone(), reply::help()),
            Intent::Greeting => (loaded.clone(), reply::greeting(Local::now().hour())),
            Intent::Thanks => (loaded.clone(), reply::thanks()),
            Intent::SecurityStatus => (loaded.clone(), reply::security_status()),
            Intent::Fallback => (loaded.clone(), reply::fallback(message)),
        }
    }

    fn continue_flow(&self, loaded: &PendingFlow, message: &str) -> (PendingFlow, String) {
        match dialog::advance(loaded, message, &self.bank) {
            Ok(step) => {
                let text = self.render_outcome(&step.outcome);
                (step.new_state, text)
            }
            // The router only picks FlowContinuation when a flow is active,
            // so this arm is unreachable through handle_turn
            Err(e) => {
                tracing::error!(error = %e, "Flow continuation without an active flow");
                (loaded.clone(), reply::fallback(message))
            }
        }
    }

    fn render_outcome(&self, outcome: &FlowOutcome) -> String {
        let bank = &self.bank;
        match outcome {
            FlowOutcome::Started => reply::transfer_prompt(),
            FlowOutcome::AmountUnparseable => reply::amount_reprompt(),
            FlowOutcome::InsufficientFunds => reply::insufficient_funds(bank),
            FlowOutcome::AmountAccepted { amount } => reply::confirm_prompt(*amount, bank),
            FlowOutcome::Committed {
                amount,
                new_checking,
                new_savings,
            } => {
                let confirmation: u32 = rand::thread_rng().gen_range(100_000..=999_999);
                reply::receipt(*amount, *new_checking, *new_savings, confirmation, bank)
            }
            FlowOutcome::Cancelled => reply::cancelled(),
            FlowOutcome::ConfirmationUnrecognized => reply::confirm_reprompt(),
        }
    }

    fn balance_reply(&self, scope: BalanceScope) -> String {
        match scope {
            BalanceScope::All => reply::balances_all(&self.bank),
            BalanceScope::Checking => reply::balance_checking(&self.bank),
            BalanceScope::Savings => reply::balance_savings(&self.bank),
            BalanceScope::Credit => reply::balance_credit(&self.bank),
        }
    }
}
