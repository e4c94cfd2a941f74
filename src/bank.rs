//! Read-only reference account data and currency rendering.

use rust_decimal::Decimal;

/// A deposit account in the reference snapshot
#[derive(Debug, Clone)]
pub struct AccountInfo {
    pub balance: Decimal,
    /// Masked account number, e.g. `****1234`
    pub number: String,
}

/// The credit card, which tracks available credit alongside the amount owed
#[derive(Debug, Clone)]
pub struct CreditInfo {
    /// Negative while a balance is owed
    pub balance: Decimal,
    pub available: Decimal,
    pub number: String,
}

/// One row of the recent-activity feed (signed amount, deposits positive)
#[derive(Debug, Clone)]
pub struct TransactionEntry {
    pub date: String,
    pub description: String,
    pub amount: Decimal,
}

impl TransactionEntry {
    fn new(date: impl Into<String>, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount,
        }
    }
}

/// Reference data injected into the dialog layer.
///
/// Balances are illustrative: a transfer commit reports new figures but
/// nothing writes back here. Keeping the snapshot an injected value (rather
/// than a process-wide static) means concurrent turns share no mutable state.
#[derive(Debug, Clone)]
pub struct BankSnapshot {
    pub checking: AccountInfo,
    pub savings: AccountInfo,
    pub credit: CreditInfo,
    pub transactions: Vec<TransactionEntry>,
    pub atm_locations: Vec<String>,
}

impl BankSnapshot {
    /// The demo dataset every deployment serves
    pub fn sample() -> Self {
        Self {
            checking: AccountInfo {
                balance: Decimal::new(543_210, 2),
                number: "****1234".to_string(),
            },
            savings: AccountInfo {
                balance: Decimal::new(1_575_025, 2),
                number: "****5678".to_string(),
            },
            credit: CreditInfo {
                balance: Decimal::new(-234_050, 2),
                available: Decimal::new(765_950, 2),
                number: "****9012".to_string(),
            },
            transactions: vec![
                TransactionEntry::new("Today", "Starbucks Coffee", Decimal::new(-585, 2)),
                TransactionEntry::new(
                    "Yesterday",
                    "Direct Deposit - Salary",
                    Decimal::new(350_000, 2),
                ),
                TransactionEntry::new("Jan 13", "Amazon Purchase", Decimal::new(-6_742, 2)),
                TransactionEntry::new("Jan 12", "Transfer from Savings", Decimal::new(50_000, 2)),
                TransactionEntry::new("Jan 11", "Walmart Grocery", Decimal::new(-14_238, 2)),
            ],
            atm_locations: vec![
                "📍 SecureBank ATM - 123 Main St (0.3 miles)".to_string(),
                "📍 Partner ATM - Walmart, 456 Oak Ave (0.8 miles)".to_string(),
                "📍 SecureBank Branch - 789 Pine Rd (1.2 miles)".to_string(),
                "📍 Partner ATM - 7-Eleven, 321 Elm St (1.5 miles)".to_string(),
            ],
        }
    }
}

/// Render an amount as `$1,234.56`.
///
/// Rounds half-even to two decimals before display so cent-level math never
/// shows drift, then pads to exactly two fractional digits.
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    let unsigned = rounded.abs().to_string();
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

/// Insert comma separators into a run of integer digits
fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(Decimal::new(543_210, 2)), "$5,432.10");
        assert_eq!(format_currency(Decimal::new(1_575_025, 2)), "$15,750.25");
        assert_eq!(format_currency(Decimal::new(123_456_789, 2)), "$1,234,567.89");
        assert_eq!(format_currency(Decimal::new(42, 2)), "$0.42");
    }

    #[test]
    fn test_format_currency_pads_to_two_decimals() {
        assert_eq!(format_currency(Decimal::new(200, 0)), "$200.00");
        assert_eq!(format_currency(Decimal::new(1005, 1)), "$100.50");
    }

    #[test]
    fn test_format_currency_rounds_half_even() {
        // 2.345 -> 2.34 (toward the even cent), 2.355 -> 2.36
        assert_eq!(format_currency(Decimal::new(2_345, 3)), "$2.34");
        assert_eq!(format_currency(Decimal::new(2_355, 3)), "$2.36");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(Decimal::new(-234_050, 2)), "-$2,340.50");
    }

    #[test]
    fn test_sample_snapshot_figures() {
        let bank = BankSnapshot::sample();
        assert_eq!(bank.checking.balance, Decimal::new(543_210, 2));
        assert_eq!(bank.savings.balance, Decimal::new(1_575_025, 2));
        assert_eq!(bank.credit.balance, Decimal::new(-234_050, 2));
        assert_eq!(bank.credit.available, Decimal::new(765_950, 2));
        assert_eq!(bank.transactions.len(), 5);
        assert_eq!(bank.atm_locations.len(), 4);
    }
}
