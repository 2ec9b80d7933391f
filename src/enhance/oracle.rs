//! BTC/USD price accessor
//!
//! Failures never propagate: they are logged and reported as `None`, which callers
//! treat as a price of zero.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Source of the current BTC price object (`{"amount": <usd>, ...}`)
#[async_trait]
pub trait BtcPriceSource: Send + Sync {
    /// Fetches the raw currency object for BTC
    async fn fetch_btc_price(&self) -> Result<Value>;
}

/// Returns the current BTC/USD price, or `None` when it is unavailable
///
/// Unavailable covers a failed call, a non-object response, a missing `amount`, and an
/// `amount` that is not a finite non-negative number. Numeric strings are accepted.
pub async fn current_btc_usd_price<S>(source: &S) -> Option<f64>
where
    S: BtcPriceSource + ?Sized,
{
    match source.fetch_btc_price().await {
        Ok(value) => {
            let amount = extract_amount(&value);
            if amount.is_none() {
                tracing::warn!(response = %value, "BTC price response has no usable amount");
            }
            amount
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to fetch BTC price, USD values fall back to 0");
            None
        }
    }
}

fn extract_amount(value: &Value) -> Option<f64> {
    let amount = match value.as_object()?.get("amount")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OdinError;
    use serde_json::json;

    struct Fixed(Result<Value>);

    #[async_trait]
    impl BtcPriceSource for Fixed {
        async fn fetch_btc_price(&self) -> Result<Value> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(e) => Err(OdinError::Connection(e.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_numeric_amount() {
        let source = Fixed(Ok(json!({"amount": 65000.5, "symbol": "btc"})));
        assert_eq!(current_btc_usd_price(&source).await, Some(65000.5));
    }

    #[tokio::test]
    async fn test_string_amount() {
        let source = Fixed(Ok(json!({"amount": "42000"})));
        assert_eq!(current_btc_usd_price(&source).await, Some(42000.0));
    }

    #[tokio::test]
    async fn test_unavailable_cases() {
        let cases = vec![
            json!({"price": 1}),
            json!([1, 2, 3]),
            json!(null),
            json!({"amount": "abc"}),
            json!({"amount": -5}),
            json!({"amount": {"usd": 1}}),
        ];
        for case in cases {
            let source = Fixed(Ok(case.clone()));
            assert_eq!(current_btc_usd_price(&source).await, None, "{}", case);
        }
    }

    #[tokio::test]
    async fn test_call_failure() {
        let source = Fixed(Err(OdinError::Connection("down".into())));
        assert_eq!(current_btc_usd_price(&source).await, None);
    }
}
