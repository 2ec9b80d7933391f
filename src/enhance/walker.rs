//! Recursive response walker

use super::balance::format_balance;
use super::oracle::{current_btc_usd_price, BtcPriceSource};
use super::price::annotate_price;
use serde_json::{Map, Value};
use std::sync::Arc;

const PRICE_KEY: &str = "price";
const BALANCE_KEY: &str = "balance";
const ENVELOPE_CONTENT_KEY: &str = "content";
const ENVELOPE_MEDIA_TYPE: &str = "application/json";
const ENVELOPE_DATA_KEY: &str = "data";

/// Enhances API responses with price and balance display fields
///
/// Holds the BTC price source; the price is fetched once per [`enhance`](Self::enhance)
/// call and threaded through the traversal.
pub struct ResponseEnhancer<S: ?Sized> {
    source: Arc<S>,
}

impl<S: ?Sized> Clone for ResponseEnhancer<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S> ResponseEnhancer<S>
where
    S: BtcPriceSource + ?Sized,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Returns an enriched copy of `value`; the input is left untouched
    ///
    /// Skips the price fetch entirely when no numeric `price` field exists.
    pub async fn enhance(&self, value: &Value) -> Value {
        let btc_price_usd = if contains_price_field(value) {
            current_btc_usd_price(self.source.as_ref())
                .await
                .unwrap_or(0.0)
        } else {
            0.0
        };

        enrich(value, btc_price_usd)
    }
}

/// Synchronous traversal with a known BTC/USD price
pub fn enrich(value: &Value, btc_price_usd: f64) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| enrich(item, btc_price_usd))
                .collect(),
        ),
        Value::Object(map) => {
            if let Some(data) = envelope_data(map) {
                return rebuild_envelope(map, enrich(data, btc_price_usd));
            }
            Value::Object(enrich_object(map, btc_price_usd))
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}

/// True when any object in the tree has a numeric `price` field
pub fn contains_price_field(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.iter().any(contains_price_field),
        Value::Object(map) => map.iter().any(|(key, field)| {
            (key == PRICE_KEY && field.is_number()) || contains_price_field(field)
        }),
        _ => false,
    }
}

fn enrich_object(map: &Map<String, Value>, btc_price_usd: f64) -> Map<String, Value> {
    let mut result = map.clone();

    for (key, field) in map {
        match (key.as_str(), field) {
            (PRICE_KEY, Value::Number(n)) => {
                let Some(raw_price) = n.as_f64() else {
                    continue;
                };
                let annotation = annotate_price(raw_price, btc_price_usd);
                result.insert("price_sats".to_string(), Value::String(annotation.price_sats));
                result.insert("price_usd".to_string(), Value::String(annotation.price_usd));
            }
            (BALANCE_KEY, Value::Number(_) | Value::String(_)) => {
                result.insert(
                    "balance_formatted".to_string(),
                    Value::String(format_balance(field)),
                );
            }
            (_, Value::Object(_) | Value::Array(_)) => {
                result.insert(key.clone(), enrich(field, btc_price_usd));
            }
            _ => {}
        }
    }

    result
}

/// `content["application/json"].data`, when present and truthy
fn envelope_data(map: &Map<String, Value>) -> Option<&Value> {
    map.get(ENVELOPE_CONTENT_KEY)?
        .get(ENVELOPE_MEDIA_TYPE)?
        .get(ENVELOPE_DATA_KEY)
        .filter(|data| is_truthy(data))
}

/// JavaScript-style truthiness
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn rebuild_envelope(map: &Map<String, Value>, data: Value) -> Value {
    let mut envelope = map.clone();
    if let Some(media) = envelope
        .get_mut(ENVELOPE_CONTENT_KEY)
        .and_then(|content| content.get_mut(ENVELOPE_MEDIA_TYPE))
        .and_then(Value::as_object_mut)
    {
        media.insert(ENVELOPE_DATA_KEY.to_string(), data);
    }
    Value::Object(envelope)
}
