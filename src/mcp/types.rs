//! MCP Tool Parameter Types
//!
//! Field names follow the published tool interface, so several structs rename fields
//! individually instead of using a blanket `rename_all`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Optional pagination
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct PageParam {
    #[schemars(description = "Page number (default: 1)")]
    pub page: Option<u32>,

    #[schemars(description = "Items per page (default: 100)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TokenNameParam {
    #[schemars(description = "Token name or ticker (case-insensitive substring match)")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenIdParam {
    #[schemars(description = "Token ID (e.g. 2jjj)")]
    pub token_id: String,
}

/// Token ID under the short `id` key
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct IdParam {
    #[schemars(description = "Token ID")]
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HoldersParam {
    #[schemars(description = "Token ID")]
    pub id: String,

    #[schemars(description = "Page number (default: 1)")]
    pub page: Option<u32>,

    #[schemars(description = "Items per page (default: 9999)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LiquiditiesParam {
    #[schemars(description = "Token ID")]
    pub token_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarsParam {
    #[schemars(description = "Token ID")]
    pub token_id: String,

    #[schemars(description = "Candle resolution in minutes: 1, 15, 60 or 240")]
    pub resolution: u32,

    #[schemars(description = "Start time (ISO 8601)")]
    pub from: Option<String>,

    #[schemars(description = "End time (ISO 8601)")]
    pub to: Option<String>,

    #[schemars(description = "Number of most recent candles to return")]
    pub last: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradesParam {
    #[schemars(description = "Token ID")]
    pub token_id: String,

    #[schemars(description = "Page number (default: 1)")]
    pub page: Option<u32>,

    #[schemars(description = "Items per page (default: 1000)")]
    pub limit: Option<u32>,
}

/// Timestamp given either as text or as a number
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Timestamp {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Number(n) => write!(f, "{}", n),
            Timestamp::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TradesByTimeParam {
    #[serde(rename = "Id")]
    #[schemars(description = "Token ID")]
    pub id: String,

    #[serde(rename = "LastActionTimestamp")]
    #[schemars(description = "Only trades at or after this time are returned")]
    pub last_action_timestamp: Timestamp,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradesByUserParam {
    #[schemars(description = "Token ID")]
    pub token_id: String,

    #[schemars(description = "User principal ID")]
    pub user: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct UsersParam {
    #[schemars(description = "Username to search for (fuzzy)")]
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalParam {
    #[schemars(description = "User principal ID")]
    pub principal_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceParam {
    #[schemars(description = "User principal ID")]
    pub principal_id: String,

    #[schemars(description = "Token ID")]
    pub token_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UserLiquidityParam {
    #[schemars(description = "User principal ID")]
    pub user_principal: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Token,
    User,
    Comment,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Token => "token",
            SearchType::User => "user",
            SearchType::Comment => "comment",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchParam {
    #[schemars(description = "Search query")]
    pub query: String,

    #[schemars(description = "Entity types to search: token, user, comment")]
    pub types: Option<Vec<SearchType>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentParam {
    #[schemars(description = "Comment text")]
    pub comment: String,

    #[schemars(description = "Principal ID of the commenting user")]
    pub principal_id: String,

    #[schemars(description = "Token ID to comment on")]
    pub token_id: String,

    #[schemars(description = "Bearer token of the commenting user")]
    pub auth_token: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AuthIdentityParam {
    #[schemars(description = "Identity payload to authenticate, e.g. a delegated ICP identity")]
    pub identity: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    Sats,
    Usd,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceConvertParam {
    #[schemars(description = "Amount to convert")]
    pub amount: f64,

    #[schemars(description = "Source unit: sats or usd")]
    pub from_unit: PriceUnit,

    #[schemars(description = "Target unit: sats or usd")]
    pub to_unit: PriceUnit,
}

// Canister tools

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanisterBalanceParam {
    #[schemars(description = "User principal ID")]
    pub principal: String,

    #[schemars(description = "Account name within the user's Odin wallet")]
    pub account: String,

    #[schemars(description = "Token ID (btc for the BTC balance)")]
    pub token_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawParam {
    #[schemars(description = "Token ID")]
    pub token_id: String,

    #[schemars(description = "Raw amount as an integer string")]
    pub amount: String,

    #[schemars(description = "Destination address")]
    pub address: String,

    #[schemars(description = "Withdrawal protocol: btc, ckbtc or volt")]
    pub protocol: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenParam {
    #[schemars(description = "Token metadata, e.g. {\"name\": \"Odin Dog\", \"ticker\": \"ODOG\"}")]
    pub metadata: BTreeMap<String, Value>,

    #[schemars(description = "Referral or discount code")]
    pub code: Option<String>,

    #[serde(rename = "prebuy_amount")]
    #[schemars(description = "Raw BTC amount to buy at launch, as an integer string")]
    pub prebuy_amount: Option<String>,
}

/// Slippage bound `(amount, tolerance)` passed to the canister
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SlippageParam {
    #[schemars(description = "Expected amount as an integer string")]
    pub amount: String,

    #[schemars(description = "Tolerance as an integer string")]
    pub tolerance: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BtcTradeParam {
    #[schemars(description = "Token ID")]
    pub token_id: String,

    #[schemars(description = "Raw BTC amount as an integer string (1000 = 1 sat)")]
    pub btc_amount: String,

    #[schemars(description = "Optional slippage bound")]
    pub slippage: Option<SlippageParam>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenTradeParam {
    #[schemars(description = "Token ID")]
    pub token_id: String,

    #[schemars(description = "Raw token amount as an integer string (10^11 = 1 token)")]
    pub token_amount: String,

    #[schemars(description = "Optional slippage bound")]
    pub slippage: Option<SlippageParam>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityParam {
    #[schemars(description = "Token ID")]
    pub token_id: String,

    #[schemars(description = "Raw amount as an integer string")]
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trades_by_time_accepts_string_or_number() {
        let numeric: TradesByTimeParam =
            serde_json::from_value(json!({"Id": "2jjj", "LastActionTimestamp": 1717000000000i64}))
                .unwrap();
        assert_eq!(numeric.last_action_timestamp.to_string(), "1717000000000");

        let text: TradesByTimeParam = serde_json::from_value(
            json!({"Id": "2jjj", "LastActionTimestamp": "2024-05-29T16:26:40Z"}),
        )
        .unwrap();
        assert_eq!(text.last_action_timestamp.to_string(), "2024-05-29T16:26:40Z");
    }

    #[test]
    fn test_price_convert_units() {
        let param: PriceConvertParam =
            serde_json::from_value(json!({"amount": 1000, "fromUnit": "sats", "toUnit": "usd"}))
                .unwrap();
        assert_eq!(param.from_unit, PriceUnit::Sats);
        assert_eq!(param.to_unit, PriceUnit::Usd);
        assert!(serde_json::from_value::<PriceConvertParam>(
            json!({"amount": 1, "fromUnit": "eur", "toUnit": "usd"})
        )
        .is_err());
    }

    #[test]
    fn test_search_types() {
        let param: SearchParam =
            serde_json::from_value(json!({"query": "dog", "types": ["token", "user"]})).unwrap();
        let types: Vec<&str> = param.types.unwrap().iter().map(SearchType::as_str).collect();
        assert_eq!(types, vec!["token", "user"]);
    }
}
