//! Candid types of the Odin trading canister

use candid::{CandidType, Int, Nat, Principal};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{OdinError, Result};

/// Raw token amount (10^11 scale for tokens, millisatoshi-scale for BTC)
pub type TokenAmount = Nat;
pub type TokenId = String;

#[derive(CandidType, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeType {
    #[serde(rename = "buy")]
    Buy,
    #[serde(rename = "sell")]
    Sell,
}

/// Which side of the trade the amount is denominated in
#[derive(CandidType, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum TradeAmount {
    #[serde(rename = "btc")]
    Btc(TokenAmount),
    #[serde(rename = "token")]
    Token(TokenAmount),
}

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TradeSettings {
    pub slippage: Option<(TokenAmount, Nat)>,
}

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TradeRequest {
    pub tokenid: TokenId,
    #[serde(rename = "typeof")]
    pub trade_type: TradeType,
    pub settings: Option<TradeSettings>,
    pub amount: TradeAmount,
}

#[derive(CandidType, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityType {
    #[serde(rename = "add")]
    Add,
    #[serde(rename = "remove")]
    Remove,
}

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LiquidityRequest {
    pub tokenid: TokenId,
    #[serde(rename = "typeof")]
    pub liquidity_type: LiquidityType,
    pub amount: TokenAmount,
}

#[derive(CandidType, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawProtocol {
    #[serde(rename = "btc")]
    Btc,
    #[serde(rename = "ckbtc")]
    Ckbtc,
    #[serde(rename = "volt")]
    Volt,
}

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WithdrawRequest {
    pub protocol: WithdrawProtocol,
    pub tokenid: TokenId,
    pub address: String,
    pub amount: TokenAmount,
}

/// Metadata value variant
#[derive(CandidType, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    #[serde(rename = "hex")]
    Hex(String),
    #[serde(rename = "int")]
    Int(Int),
    #[serde(rename = "nat")]
    Nat(Nat),
    #[serde(rename = "principal")]
    Principal(Principal),
    #[serde(rename = "blob")]
    Blob(Vec<u8>),
    #[serde(rename = "bool")]
    Bool(bool),
    #[serde(rename = "nat8")]
    Nat8(u8),
    #[serde(rename = "text")]
    Text(String),
}

pub type Metadata = Vec<(String, MetadataValue)>;

#[derive(CandidType, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    pub metadata: Metadata,
    pub code: Option<String>,
    pub prebuy_amount: Option<TokenAmount>,
}

/// `variant { ok; err : text }` returned by trade, mint and liquidity calls
#[derive(CandidType, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "err")]
    Err(String),
}

/// `variant { ok : bool; err : text }` returned by withdraw
#[derive(CandidType, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum WithdrawResult {
    #[serde(rename = "ok")]
    Ok(bool),
    #[serde(rename = "err")]
    Err(String),
}

impl OperationResult {
    pub fn into_result(self) -> Result<()> {
        match self {
            OperationResult::Ok => Ok(()),
            OperationResult::Err(msg) => Err(OdinError::Canister(msg)),
        }
    }
}

impl WithdrawResult {
    pub fn into_result(self) -> Result<bool> {
        match self {
            WithdrawResult::Ok(accepted) => Ok(accepted),
            WithdrawResult::Err(msg) => Err(OdinError::Canister(msg)),
        }
    }
}

/// Parses a decimal amount argument into a `Nat`
///
/// `field` names the argument in the validation error.
pub fn parse_amount(field: &str, raw: &str) -> Result<TokenAmount> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OdinError::Validation(format!(
            "{} must be a non-negative integer string, got '{}'",
            field, raw
        )));
    }
    Nat::from_str(digits)
        .map_err(|e| OdinError::Validation(format!("Invalid {} '{}': {}", field, raw, e)))
}

/// Converts `{name: value}` JSON into canister metadata records
///
/// Strings become `text`, booleans `bool`, non-negative integers `nat` and negative
/// integers `int`. Other values are rejected.
pub fn metadata_from_json(fields: &BTreeMap<String, Value>) -> Result<Metadata> {
    fields
        .iter()
        .map(|(name, value)| {
            let converted = match value {
                Value::String(s) => MetadataValue::Text(s.clone()),
                Value::Bool(b) => MetadataValue::Bool(*b),
                Value::Number(n) => match (n.as_u64(), n.as_i64()) {
                    (Some(u), _) => MetadataValue::Nat(Nat::from(u)),
                    (None, Some(i)) => MetadataValue::Int(Int::from(i)),
                    _ => {
                        return Err(OdinError::Validation(format!(
                            "Metadata field '{}' must be an integer, got {}",
                            name, n
                        )))
                    }
                },
                other => {
                    return Err(OdinError::Validation(format!(
                        "Metadata field '{}' has unsupported value {}",
                        name, other
                    )))
                }
            };
            Ok((name.clone(), converted))
        })
        .collect()
}

impl FromStr for WithdrawProtocol {
    type Err = OdinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "btc" => Ok(WithdrawProtocol::Btc),
            "ckbtc" => Ok(WithdrawProtocol::Ckbtc),
            "volt" => Ok(WithdrawProtocol::Volt),
            other => Err(OdinError::Validation(format!(
                "Unknown withdraw protocol '{}', expected btc, ckbtc or volt",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candid::{Decode, Encode};

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", "1000").unwrap(), Nat::from(1000u64));
        let huge = parse_amount("amount", "123456789012345678901234567890").unwrap();
        assert_eq!(huge.0.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        for bad in ["", "-1", "1.5", "abc", "1e5"] {
            assert!(
                matches!(parse_amount("amount", bad), Err(OdinError::Validation(_))),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_operation_result_mapping() {
        assert!(OperationResult::Ok.into_result().is_ok());
        let err = OperationResult::Err("insufficient balance".into())
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "Canister error: insufficient balance");
        assert_eq!(WithdrawResult::Ok(true).into_result().unwrap(), true);
    }

    #[test]
    fn test_trade_request_candid_roundtrip() {
        let request = TradeRequest {
            tokenid: "2jjj".to_string(),
            trade_type: TradeType::Buy,
            settings: Some(TradeSettings {
                slippage: Some((Nat::from(1000u64), Nat::from(5u64))),
            }),
            amount: TradeAmount::Btc(Nat::from(250_000u64)),
        };
        let bytes = Encode!(&request).unwrap();
        let decoded = Decode!(&bytes, TradeRequest).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_metadata_from_json() {
        let fields: BTreeMap<String, Value> = serde_json::from_value(serde_json::json!({
            "name": "Odin Dog",
            "ticker": "ODOG",
            "decimals": 8,
            "offset": -2,
            "twitter_verified": false
        }))
        .unwrap();

        let metadata = metadata_from_json(&fields).unwrap();

        assert_eq!(metadata.len(), 5);
        assert_eq!(metadata[0], ("decimals".to_string(), MetadataValue::Nat(Nat::from(8u64))));
        assert_eq!(metadata[1], ("name".to_string(), MetadataValue::Text("Odin Dog".into())));
        assert_eq!(metadata[2], ("offset".to_string(), MetadataValue::Int(Int::from(-2i64))));
        assert_eq!(metadata[4], ("twitter_verified".to_string(), MetadataValue::Bool(false)));
    }

    #[test]
    fn test_metadata_rejects_nested_and_fractional() {
        let nested: BTreeMap<String, Value> =
            serde_json::from_value(serde_json::json!({"links": ["a"]})).unwrap();
        assert!(matches!(metadata_from_json(&nested), Err(OdinError::Validation(_))));

        let fractional: BTreeMap<String, Value> =
            serde_json::from_value(serde_json::json!({"ratio": 0.5})).unwrap();
        assert!(metadata_from_json(&fractional).is_err());
    }

    #[test]
    fn test_withdraw_protocol_from_str() {
        assert_eq!("CKBTC".parse::<WithdrawProtocol>().unwrap(), WithdrawProtocol::Ckbtc);
        assert!("eth".parse::<WithdrawProtocol>().is_err());
    }
}
