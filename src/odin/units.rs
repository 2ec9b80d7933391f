//! Satoshi / USD conversions

use crate::error::{OdinError, Result};

pub const SATS_PER_BTC: f64 = 100_000_000.0;

pub fn sats_to_usd(sats: f64, btc_price_usd: f64) -> f64 {
    sats * btc_price_usd / SATS_PER_BTC
}

/// Fails when the BTC price is not positive
pub fn usd_to_sats(usd: f64, btc_price_usd: f64) -> Result<f64> {
    if btc_price_usd.is_nan() || btc_price_usd <= 0.0 {
        return Err(OdinError::Validation(format!(
            "Cannot convert USD to sats with BTC price {}",
            btc_price_usd
        )));
    }
    Ok(usd * SATS_PER_BTC / btc_price_usd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_conversions() {
        assert_eq!(sats_to_usd(1000.0, 50000.0), 0.5);
        assert_eq!(usd_to_sats(0.5, 50000.0).unwrap(), 1000.0);
    }

    #[test]
    fn test_usd_to_sats_requires_price() {
        assert!(matches!(
            usd_to_sats(1.0, 0.0),
            Err(OdinError::Validation(_))
        ));
        assert!(usd_to_sats(1.0, f64::NAN).is_err());
    }
}
