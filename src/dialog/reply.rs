//! Reply text for every dialog outcome
//!
//! One pure builder per reply. Data comes in as arguments (snapshot, amount,
//! confirmation number, hour); nothing here reads a clock, the store, or
//! randomness, which keeps every builder trivially testable.

use crate::bank::{format_currency, BankSnapshot};
use rust_decimal::Decimal;

pub fn balances_all(bank: &BankSnapshot) -> String {
    format!(
        "💰 Your Account Balances:

🏦 Checking {checking_number}
   Balance: {checking}

💎 Savings {savings_number}
   Balance: {savings}

💳 Credit Card {credit_number}
   Balance: {credit}
   Available: {available}",
        checking_number = bank.checking.number,
        checking = format_currency(bank.checking.balance),
        savings_number = bank.savings.number,
        savings = format_currency(bank.savings.balance),
        credit_number = bank.credit.number,
        credit = format_currency(-bank.credit.balance),
        available = format_currency(bank.credit.available),
    )
}

pub fn balance_checking(bank: &BankSnapshot) -> String {
    format!(
        "🏦 Checking Account {}\nBalance: {}",
        bank.checking.number,
        format_currency(bank.checking.balance)
    )
}

pub fn balance_savings(bank: &BankSnapshot) -> String {
    format!(
        "💰 Savings Account {}\nBalance: {}\n\nInterest earned this month: $47.25",
        bank.savings.number,
        format_currency(bank.savings.balance)
    )
}

/// The owed balance is stored negative; it reads as a positive figure here.
pub fn balance_credit(bank: &BankSnapshot) -> String {
    format!(
        "💳 Credit Card {}\nCurrent Balance: {}\nAvailable Credit: {}\nMinimum Payment Due: $35.00",
        bank.credit.number,
        format_currency(-bank.credit.balance),
        format_currency(bank.credit.available)
    )
}

pub fn transactions(bank: &BankSnapshot) -> String {
    let rows: Vec<String> = bank
        .transactions
        .iter()
        .take(5)
        .map(|t| {
            let sign = if t.amount > Decimal::ZERO { "+" } else { "-" };
            format!(
                "• {}: {} ({sign}{})",
                t.date,
                t.description,
                format_currency(t.amount.abs())
            )
        })
        .collect();
    format!(
        "📊 Recent Transactions (Checking):\n\n{}\n\nCurrent Balance: {}",
        rows.join("\n"),
        format_currency(bank.checking.balance)
    )
}

pub fn transfer_prompt() -> String {
    "💸 Let's set up your transfer.\n\nHow much would you like to transfer from Checking to Savings?\n\n(Enter amount like $100 or just 100)".to_string()
}

pub fn amount_reprompt() -> String {
    "Please enter a valid amount (e.g., $100 or 100)".to_string()
}

pub fn insufficient_funds(bank: &BankSnapshot) -> String {
    format!(
        "❌ Insufficient funds. Your checking balance is {}. Please enter a smaller amount or type 'cancel' to stop.",
        format_currency(bank.checking.balance)
    )
}

pub fn confirm_prompt(amount: Decimal, bank: &BankSnapshot) -> String {
    format!(
        "💸 Ready to transfer {} from Checking {} to Savings {}.\n\n⚠️ Please type 'confirm' to proceed or 'cancel' to stop.",
        format_currency(amount),
        bank.checking.number,
        bank.savings.number
    )
}

pub fn receipt(
    amount: Decimal,
    new_checking: Decimal,
    new_savings: Decimal,
    confirmation: u32,
    bank: &BankSnapshot,
) -> String {
    format!(
        "✅ Transfer Successful!

📤 From: Checking {from}
📥 To: Savings {to}
💵 Amount: {amount}
🔢 Confirmation: #{confirmation}

New Balances:
- Checking: {checking}
- Savings: {savings}",
        from = bank.checking.number,
        to = bank.savings.number,
        amount = format_currency(amount),
        checking = format_currency(new_checking),
        savings = format_currency(new_savings),
    )
}

pub fn cancelled() -> String {
    "Transfer cancelled. How else can I help you?".to_string()
}

pub fn confirm_reprompt() -> String {
    "Please type 'confirm' to complete the transfer or 'cancel' to stop.".to_string()
}

pub fn atm_locations(bank: &BankSnapshot) -> String {
    format!(
        "📍 Nearest ATM Locations:\n\n{}\n\n💡 Tip: SecureBank ATMs have no fees. Partner ATMs may charge $3.00",
        bank.atm_locations.join("\n")
    )
}

pub fn bills() -> String {
    "💳 Upcoming Bills:

- Electricity - $142.50 (Due Jan 20)
- Internet - $79.99 (Due Jan 22)
- Credit Card - $35.00 (Min. payment due Jan 25)
- Netflix - $15.99 (Auto-pay Jan 28)

Would you like to pay any of these bills now?"
        .to_string()
}

pub fn help() -> String {
    "🤝 I can help you with:

💰 Check balances - \"What's my balance?\"
📊 View transactions - \"Show recent transactions\"
💸 Transfer money - \"Transfer funds\"
📍 Find ATMs - \"Where's the nearest ATM?\"
💳 Pay bills - \"Show my bills\"
📞 Support - \"Talk to support\"
🔐 Security - \"Is my account secure?\"

Just type or click any quick action button above!"
        .to_string()
}

/// `hour` is the server's local hour of day, 0..=23
pub fn greeting(hour: u32) -> String {
    let part = if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    };
    format!("{part}! 👋 Welcome to SecureBank. How can I assist you today?")
}

pub fn thanks() -> String {
    "You're welcome! 😊 Is there anything else I can help you with today?".to_string()
}

pub fn security_status() -> String {
    "🔐 Your Security Status:

✅ 256-bit encryption active
✅ Two-factor authentication enabled
✅ Last login: Today at 2:15 PM from this device
✅ No suspicious activity detected

Your account is fully protected. If you notice anything unusual, type 'report fraud' immediately."
        .to_string()
}

/// Echoes the message exactly as the user typed it, not the lowercased form
pub fn fallback(raw_message: &str) -> String {
    format!(
        "I'd be happy to help! You said: '{raw_message}'

Try asking about:
• Account balance
• Recent transactions
• Transfer money
• Find ATM

Or click the quick action buttons above!"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> BankSnapshot {
        BankSnapshot::sample()
    }

    #[test]
    fn test_balances_all_names_every_figure() {
        let text = balances_all(&bank());
        assert!(text.contains("$5,432.10"));
        assert!(text.contains("$15,750.25"));
        assert!(text.contains("$2,340.50"));
        assert!(text.contains("$7,659.50"));
        assert!(text.contains("****1234"));
        assert!(text.contains("****5678"));
        assert!(text.contains("****9012"));
    }

    #[test]
    fn test_credit_balance_reads_positive() {
        let text = balance_credit(&bank());
        assert!(text.contains("Current Balance: $2,340.50"));
        assert!(!text.contains("-$2,340.50"));
    }

    #[test]
    fn test_transactions_sign_amounts() {
        let text = transactions(&bank());
        assert!(text.contains("• Today: Starbucks Coffee (-$5.85)"));
        assert!(text.contains("• Yesterday: Direct Deposit - Salary (+$3,500.00)"));
        assert!(text.contains("Current Balance: $5,432.10"));
    }

    #[test]
    fn test_receipt_reports_both_new_balances() {
        let text = receipt(
            Decimal::new(200, 0),
            Decimal::new(523_210, 2),
            Decimal::new(1_595_025, 2),
            123_456,
            &bank(),
        );
        assert!(text.contains("💵 Amount: $200.00"));
        assert!(text.contains("🔢 Confirmation: #123456"));
        assert!(text.contains("- Checking: $5,232.10"));
        assert!(text.contains("- Savings: $15,950.25"));
    }

    #[test]
    fn test_greeting_follows_the_hour() {
        assert!(greeting(8).starts_with("Good morning"));
        assert!(greeting(12).starts_with("Good afternoon"));
        assert!(greeting(17).starts_with("Good afternoon"));
        assert!(greeting(18).starts_with("Good evening"));
        assert!(greeting(23).starts_with("Good evening"));
    }

    #[test]
    fn test_fallback_echoes_original_casing() {
        let text = fallback("WiRe me EVERYTHING");
        assert!(text.contains("You said: 'WiRe me EVERYTHING'"));
        assert!(text.contains("• Account balance"));
        assert!(text.contains("• Transfer money"));
    }
}
