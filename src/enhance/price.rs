//! Raw price annotation
//!
//! Odin prices are expressed in thousandths of a satoshi. Values are rendered for
//! display only; floating-point precision loss is acceptable here and nowhere else.

use serde::Serialize;

/// Satoshis per raw price unit
pub const SATS_PER_RAW_PRICE_UNIT: f64 = 0.001;

/// Satoshis per bitcoin
pub const SATS_PER_BTC: f64 = 100_000_000.0;

/// Display strings derived from a raw price
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAnnotation {
    /// e.g. `"1.234 sats"`
    pub price_sats: String,
    /// e.g. `"$0.00050000 usd"`
    pub price_usd: String,
}

/// Converts a raw price into satoshi and USD display strings
///
/// `btc_price_usd` is 0 when the price oracle is unavailable.
pub fn annotate_price(raw_price: f64, btc_price_usd: f64) -> PriceAnnotation {
    let sats = raw_price * SATS_PER_RAW_PRICE_UNIT;
    let usd = sats * btc_price_usd / SATS_PER_BTC;

    PriceAnnotation {
        price_sats: format!("{} sats", display_number(sats)),
        price_usd: format!("${:.8} usd", usd),
    }
}

/// Shortest round-trip decimal form, switching to `5e-7` / `1e+21` notation outside
/// `[1e-6, 1e21)` the way JavaScript prints numbers
pub fn display_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_price() {
        let annotation = annotate_price(1000.0, 50000.0);
        assert_eq!(annotation.price_sats, "1 sats");
        assert_eq!(annotation.price_usd, "$0.00050000 usd");
    }

    #[test]
    fn test_unavailable_btc_price() {
        let annotation = annotate_price(2500.0, 0.0);
        assert_eq!(annotation.price_sats, "2.5 sats");
        assert_eq!(annotation.price_usd, "$0.00000000 usd");
    }

    #[test]
    fn test_fractional_sats() {
        let annotation = annotate_price(1234.0, 100000.0);
        assert_eq!(annotation.price_sats, "1.234 sats");
        assert_eq!(annotation.price_usd, "$0.00123400 usd");
    }

    #[test]
    fn test_zero_price() {
        let annotation = annotate_price(0.0, 65000.0);
        assert_eq!(annotation.price_sats, "0 sats");
        assert_eq!(annotation.price_usd, "$0.00000000 usd");
    }

    #[test]
    fn test_sats_switch_to_exponent_form_at_the_extremes() {
        assert_eq!(annotate_price(0.0005, 0.0).price_sats, "5e-7 sats");
        assert_eq!(annotate_price(1e24, 0.0).price_sats, "1e+21 sats");
        assert_eq!(annotate_price(1000.0, 0.0).price_sats, "1 sats");
    }

    #[test]
    fn test_display_number() {
        assert_eq!(display_number(0.000001), "0.000001");
        assert_eq!(display_number(1e20), "100000000000000000000");
        assert_eq!(display_number(1.5e-7), "1.5e-7");
        assert_eq!(display_number(2.5e22), "2.5e+22");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(-3.25), "-3.25");
    }
}
