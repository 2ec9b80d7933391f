//! Fixed-point balance formatting
//!
//! Odin balances are integers scaled by 10^11. They are kept as arbitrary-precision
//! integers (`candid::Nat`, the canister's `TokenAmount`) so that amounts beyond `u64`
//! survive the division exactly.

use candid::Nat;
use serde_json::Value;
use std::str::FromStr;

/// Number of decimal digits in the balance divisor (10^11)
pub const BALANCE_DIVISOR_DIGITS: usize = 11;

const BALANCE_DIVISOR: u64 = 100_000_000_000;

/// Display values at or above this magnitude switch to scientific notation
const SCIENTIFIC_THRESHOLD: f64 = 1e10;

/// Formats a raw balance value (JSON number or decimal string)
///
/// Returns the raw value's own string form when it is not a non-negative integer.
pub fn format_balance(raw: &Value) -> String {
    match parse_raw_balance(raw) {
        Some(amount) => format_token_amount(&amount),
        None => {
            tracing::debug!(raw = %raw, "Balance is not a non-negative integer, left as-is");
            match raw {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }
        }
    }
}

/// Formats a raw balance given as a decimal string
pub fn format_balance_str(raw: &str) -> String {
    format_balance(&Value::String(raw.to_string()))
}

/// Formats an already-parsed raw amount
pub fn format_token_amount(amount: &Nat) -> String {
    let quotient = &amount.0 / BALANCE_DIVISOR;
    let remainder = &amount.0 % BALANCE_DIVISOR;

    let padded = format!(
        "{:0>width$}",
        remainder.to_string(),
        width = BALANCE_DIVISOR_DIGITS
    );
    let fraction = padded.trim_end_matches('0');

    let actual = if fraction.is_empty() {
        quotient.to_string()
    } else {
        format!("{}.{}", quotient, fraction)
    };

    match actual.parse::<f64>() {
        Ok(magnitude) if magnitude >= SCIENTIFIC_THRESHOLD => to_exponential(magnitude, 6),
        _ => actual,
    }
}

fn parse_raw_balance(raw: &Value) -> Option<Nat> {
    match raw {
        Value::String(s) => parse_nat(s),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                return Some(Nat::from(u));
            }
            let f = n.as_f64()?;
            if f.is_finite() && f >= 0.0 && f.fract() == 0.0 {
                parse_nat(&format!("{:.0}", f))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn parse_nat(s: &str) -> Option<Nat> {
    let digits = s.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Nat::from_str(digits).ok()
}

/// Scientific notation in the `1.234568e+10` form
fn to_exponential(value: f64, fraction_digits: usize) -> String {
    let formatted = format!("{:.*e}", fraction_digits, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) if exp < 0 => format!("{}e-{}", mantissa, -exp),
            Ok(exp) => format!("{}e+{}", mantissa, exp),
            Err(_) => formatted,
        },
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whole_balance_has_no_fraction() {
        assert_eq!(format_balance(&json!(100000000000000u64)), "1000");
        assert_eq!(format_balance(&json!("100000000000000")), "1000");
    }

    #[test]
    fn test_fraction_strips_trailing_zeros() {
        assert_eq!(format_balance(&json!("123456789012345")), "1234.56789012345");
        assert_eq!(format_balance(&json!(150000000000u64)), "1.5");
        assert_eq!(format_balance(&json!("1")), "0.00000000001");
    }

    #[test]
    fn test_zero_balance() {
        assert_eq!(format_balance(&json!(0)), "0");
        assert_eq!(format_balance(&json!("0")), "0");
    }

    #[test]
    fn test_scientific_boundary() {
        // 10^10 display units exactly
        assert_eq!(
            format_balance(&json!("1000000000000000000000")),
            "1.000000e+10"
        );
        // 9999999999.5 display units stays plain
        assert_eq!(
            format_balance(&json!("999999999950000000000")),
            "9999999999.5"
        );
        assert_eq!(
            format_balance(&json!("1234567890150000000000")),
            "1.234568e+10"
        );
    }

    #[test]
    fn test_beyond_u64() {
        let raw = format!("1{}", "0".repeat(40));
        assert_eq!(format_balance_str(&raw), "1.000000e+29");
    }

    #[test]
    fn test_garbage_falls_back_to_raw() {
        assert_eq!(format_balance(&json!("abc")), "abc");
        assert_eq!(format_balance(&json!("-5")), "-5");
        assert_eq!(format_balance(&json!("")), "");
        assert_eq!(format_balance(&json!(1.5)), "1.5");
        assert_eq!(format_balance(&json!(-3)), "-3");
    }

    #[test]
    fn test_integral_float_is_accepted() {
        assert_eq!(format_balance(&json!(200000000000.0)), "2");
    }

    #[test]
    fn test_to_exponential() {
        assert_eq!(to_exponential(12345678901.0, 6), "1.234568e+10");
        assert_eq!(to_exponential(0.00012, 2), "1.20e-4");
    }
}
