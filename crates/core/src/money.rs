//! Money Formatting
//!
//! Dollar display strings for cards and list rows, plus the cent rounding
//! the servicing mutations rely on.

use crate::presentation::AmountSign;

/// Round to whole cents. Servicing mutations round after every change so
/// balances never drift past zero by floating-point dust.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Format a dollar amount with thousands separators, e.g. `$12,500.00`.
pub fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let total_cents = (amount.abs() * 100.0).round() as u64;
    let dollars = total_cents / 100;
    let cents = total_cents % 100;

    let raw = dollars.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, digit) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if negative {
        format!("-${grouped}.{cents:02}")
    } else {
        format!("${grouped}.{cents:02}")
    }
}

/// Format with an explicit direction prefix, e.g. `-$250.00` for a payment
/// row or `+$5,000.00` for a disbursement.
pub fn format_signed_usd(sign: AmountSign, amount: f64) -> String {
    format!("{}{}", sign.symbol(), format_usd(amount.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(250.0), "$250.00");
        assert_eq!(format_usd(2500.5), "$2,500.50");
        assert_eq!(format_usd(12_500.0), "$12,500.00");
        assert_eq!(format_usd(1_234_567.89), "$1,234,567.89");
    }

    #[test]
    fn test_format_usd_negative() {
        assert_eq!(format_usd(-42.5), "-$42.50");
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(format_signed_usd(AmountSign::Debit, 250.0), "-$250.00");
        assert_eq!(format_signed_usd(AmountSign::Credit, 5000.0), "+$5,000.00");
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(10.006), 10.01);
        assert_eq!(round_cents(10.004), 10.0);
        assert_eq!(round_cents(2999.9999999999), 3000.0);
    }
}
