//! Query and body types for the Odin REST API
//!
//! Responses are passed through as `serde_json::Value`; only request shapes are typed.

use serde::Serialize;

/// `GET /tokens` filters
#[derive(Debug, Clone, Default, Serialize)]
pub struct TokenQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// e.g. `marketcap:desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holders_min: Option<u64>,
}

/// Pagination for list endpoints
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// `GET /token/{id}/feed` candlestick parameters
#[derive(Debug, Clone, Serialize)]
pub struct FeedQuery {
    /// Minutes per candle: 1, 15, 60 or 240
    pub resolution: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,
}

/// Candle resolutions accepted by the feed endpoint
pub const FEED_RESOLUTIONS: [u32; 4] = [1, 15, 60, 240];

/// `GET /trades` filters
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Lower bound on trade time, passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// `POST /token/{id}/comment` body
#[derive(Debug, Clone, Serialize)]
pub struct CommentBody {
    pub message: String,
    pub community: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_filters_are_omitted() {
        let query = TokenQuery {
            page: Some(1),
            sort: Some("marketcap:desc".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"page": 1, "sort": "marketcap:desc"})
        );
    }

    #[test]
    fn test_trade_query_shape() {
        let query = TradeQuery {
            token: Some("2jjj".to_string()),
            time_min: Some("1717000000000".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"token": "2jjj", "time_min": "1717000000000"})
        );
    }
}
