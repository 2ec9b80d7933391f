//! MCP Tool Router and ServerHandler Implementation
//!
//! REST-backed Odin tools. Tools over token and user data pass the upstream response
//! through the enhancer before it is serialized.

use crate::config::SecretString;
use crate::enhance::current_btc_usd_price;
use crate::error::OdinError;
use crate::mcp::docs::{FAQ_DOC, PRICE_UNITS_DOC};
use crate::mcp::extract::{
    favorite_entries, liquidity_entries, token_balance_entry, tokens_matching_name,
};
use crate::mcp::server::{text_result, tool_result, OdinServer};
use crate::mcp::types::{
    AuthIdentityParam, BarsParam, HoldersParam, IdParam, LiquiditiesParam, PageParam,
    PostCommentParam, PriceConvertParam, PriceUnit, PrincipalParam, SearchParam,
    TokenBalanceParam, TokenIdParam, TokenNameParam, TradesByTimeParam, TradesByUserParam,
    TradesParam, UserLiquidityParam, UsersParam,
};
use crate::odin::units::{sats_to_usd, usd_to_sats};
use crate::odin::{CommentBody, FeedQuery, PageQuery, TokenQuery, TradeQuery, FEED_RESOLUTIONS};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolResult, ErrorData, Implementation, InitializeResult, ListResourcesResult,
    PaginatedRequestParam, ProtocolVersion, ReadResourceRequestParam, ReadResourceResult,
    ResourcesCapability, ServerCapabilities, ToolsCapability,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{tool, tool_handler, tool_router};
use serde_json::{json, Value};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_TOKEN_LIMIT: u32 = 100;
const DEFAULT_HOLDER_LIMIT: u32 = 9999;
const DEFAULT_TRADE_LIMIT: u32 = 1000;

// Pre-filter for name lookups; the local filter does the real matching
const NAME_SEARCH_LIMIT: u32 = 1000;
const NAME_SEARCH_PRICE_MIN: u64 = 200;
const NAME_SEARCH_HOLDERS_MIN: u64 = 10;

#[tool_router(router = odin_tool_router, vis = "pub")]
impl OdinServer {
    #[tool(
        name = "odinapi_getPriceUnitInfo",
        description = "Get information about price units in Odin.fun API. All prices returned by the API must be multiplied by 0.001 to get satoshis."
    )]
    pub async fn get_price_unit_info(&self) -> Result<CallToolResult, ErrorData> {
        Ok(text_result(PRICE_UNITS_DOC))
    }

    #[tool(
        name = "odinapi_getFaqInfo",
        description = "Get official FAQ information about Odin.fun: token pricing, AMM, bonding curve and platform functionality."
    )]
    pub async fn get_faq_info(&self) -> Result<CallToolResult, ErrorData> {
        Ok(text_result(FAQ_DOC))
    }

    #[tool(
        name = "odinapi_comment_getBTCPrice",
        description = "Get the current BTC price in USD."
    )]
    pub async fn get_btc_price(&self) -> Result<CallToolResult, ErrorData> {
        tool_result("odinapi_comment_getBTCPrice", self.client.get_btc_price().await)
    }

    #[tool(
        name = "odinapi_price_convert",
        description = "Convert an amount between sats and USD using the current BTC price."
    )]
    pub async fn price_convert(
        &self,
        params: Parameters<PriceConvertParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        let result = match current_btc_usd_price(self.client.as_ref()).await {
            Some(btc_usd) if btc_usd > 0.0 => {
                convert_amount(p.amount, p.from_unit, p.to_unit, btc_usd)
            }
            _ => Err(OdinError::Connection("Failed to get BTC price".to_string())),
        };
        tool_result("odinapi_price_convert", result)
    }

    #[tool(
        name = "odinapi_comment_getTokens",
        description = "Get recently active Odin.fun tokens. Returns an array. Supports pagination with page and limit."
    )]
    pub async fn get_tokens(
        &self,
        params: Parameters<PageParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let query = TokenQuery {
            page: Some(params.0.page.unwrap_or(DEFAULT_PAGE)),
            limit: Some(params.0.limit.unwrap_or(DEFAULT_TOKEN_LIMIT)),
            ..Default::default()
        };
        let result = self.enhanced(self.client.get_tokens(&query).await).await;
        tool_result("odinapi_comment_getTokens", result)
    }

    #[tool(
        name = "odinapi_comment_getTokensByHighestMarketcap",
        description = "Get Odin.fun tokens with the highest market cap. Returns an array. Supports pagination with page and limit."
    )]
    pub async fn get_tokens_by_highest_marketcap(
        &self,
        params: Parameters<PageParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let query = TokenQuery {
            page: Some(params.0.page.unwrap_or(DEFAULT_PAGE)),
            limit: Some(params.0.limit.unwrap_or(DEFAULT_TOKEN_LIMIT)),
            sort: Some("marketcap:desc".to_string()),
            ..Default::default()
        };
        let result = self.enhanced(self.client.get_tokens(&query).await).await;
        tool_result("odinapi_comment_getTokensByHighestMarketcap", result)
    }

    #[tool(
        name = "odinapi_token_getTokenByName",
        description = "Get tokens by name or ticker. Returns all tokens whose name, ticker or rune contains the input, or whose ID equals it. Several tokens may share a name."
    )]
    pub async fn get_token_by_name(
        &self,
        params: Parameters<TokenNameParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let name = params.0.name;
        let query = TokenQuery {
            page: Some(DEFAULT_PAGE),
            limit: Some(NAME_SEARCH_LIMIT),
            search: Some(name.clone()),
            price_min: Some(NAME_SEARCH_PRICE_MIN),
            holders_min: Some(NAME_SEARCH_HOLDERS_MIN),
            ..Default::default()
        };
        let result = self
            .enhanced(self.client.get_tokens(&query).await)
            .await
            .map(|response| Value::Array(tokens_matching_name(&response, &name)));
        tool_result("odinapi_token_getTokenByName", result)
    }

    #[tool(
        name = "odinapi_token_getToken",
        description = "Get information for the specified token. Returns a token info object."
    )]
    pub async fn get_token(
        &self,
        params: Parameters<TokenIdParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .enhanced(self.client.get_token(&params.0.token_id, false).await)
            .await;
        tool_result("odinapi_token_getToken", result)
    }

    #[tool(
        name = "odinapi_token_getHolders",
        description = "Get holders of the specified token. Returns an array. Supports pagination with page and limit."
    )]
    pub async fn get_holders(
        &self,
        params: Parameters<HoldersParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        let page = PageQuery {
            page: Some(p.page.unwrap_or(DEFAULT_PAGE)),
            limit: Some(p.limit.unwrap_or(DEFAULT_HOLDER_LIMIT)),
        };
        let result = self
            .enhanced(self.client.get_token_owners(&p.id, page).await)
            .await;
        tool_result("odinapi_token_getHolders", result)
    }

    #[tool(
        name = "odinapi_token_getLiquidities",
        description = "Get liquidity information for a token. Price and BTC values are in 0.001 satoshi units."
    )]
    pub async fn get_liquidities(
        &self,
        params: Parameters<LiquiditiesParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .enhanced(self.client.get_token_liquidity(&params.0.token_id).await)
            .await;
        tool_result("odinapi_token_getLiquidities", result)
    }

    #[tool(
        name = "odinapi_token_getComments",
        description = "Get comments for the specified token. Returns an array."
    )]
    pub async fn get_comments(
        &self,
        params: Parameters<IdParam>,
    ) -> Result<CallToolResult, ErrorData> {
        tool_result(
            "odinapi_token_getComments",
            self.client.get_token_comments(&params.0.id).await,
        )
    }

    #[tool(
        name = "odinapi_token_getBars",
        description = "Get candlestick (K-line) data for the specified token. Resolution is 1, 15, 60 or 240 minutes. Returns an array."
    )]
    pub async fn get_bars(
        &self,
        params: Parameters<BarsParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        if !FEED_RESOLUTIONS.contains(&p.resolution) {
            return Err(ErrorData::invalid_params(
                format!(
                    "Invalid resolution {}, expected one of 1, 15, 60, 240",
                    p.resolution
                ),
                None,
            ));
        }
        let query = FeedQuery {
            resolution: p.resolution,
            from: p.from,
            to: p.to,
            last: p.last,
        };
        tool_result(
            "odinapi_token_getBars",
            self.client.get_token_feed(&p.token_id, &query).await,
        )
    }

    #[tool(
        name = "odinapi_token_getTrades",
        description = "Get trades for the specified token. Returns an array. Supports pagination with page and limit."
    )]
    pub async fn get_trades(
        &self,
        params: Parameters<TradesParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        let query = TradeQuery {
            token: Some(p.token_id),
            page: Some(p.page.unwrap_or(DEFAULT_PAGE)),
            limit: Some(p.limit.unwrap_or(DEFAULT_TRADE_LIMIT)),
            ..Default::default()
        };
        let result = self.enhanced(self.client.get_trades(&query).await).await;
        tool_result("odinapi_token_getTrades", result)
    }

    #[tool(
        name = "odinapi_token_getTradesByTime",
        description = "Get trades for the specified token since a given time. Use Id and LastActionTimestamp. Returns an array."
    )]
    pub async fn get_trades_by_time(
        &self,
        params: Parameters<TradesByTimeParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        let query = TradeQuery {
            token: Some(p.id),
            time_min: Some(p.last_action_timestamp.to_string()),
            ..Default::default()
        };
        let result = self.enhanced(self.client.get_trades(&query).await).await;
        tool_result("odinapi_token_getTradesByTime", result)
    }

    #[tool(
        name = "odinapi_token_getTradesByUser",
        description = "Get trades for the specified token made by a specific user. Returns an array."
    )]
    pub async fn get_trades_by_user(
        &self,
        params: Parameters<TradesByUserParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        let query = TradeQuery {
            token: Some(p.token_id),
            user: Some(p.user),
            ..Default::default()
        };
        let result = self.enhanced(self.client.get_trades(&query).await).await;
        tool_result("odinapi_token_getTradesByUser", result)
    }

    #[tool(
        name = "odinapi_user_getUsers",
        description = "Get the Odin.fun user list. Supports fuzzy search by username. Returns an array."
    )]
    pub async fn get_users(
        &self,
        params: Parameters<UsersParam>,
    ) -> Result<CallToolResult, ErrorData> {
        tool_result(
            "odinapi_user_getUsers",
            self.client.get_users(params.0.username.as_deref()).await,
        )
    }

    #[tool(
        name = "odinapi_user_getUser",
        description = "Get information for the specified Odin.fun user. Returns a user info object."
    )]
    pub async fn get_user(
        &self,
        params: Parameters<PrincipalParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .enhanced(self.client.get_user(&params.0.principal_id).await)
            .await;
        tool_result("odinapi_user_getUser", result)
    }

    #[tool(
        name = "odinapi_user_getBalances",
        description = "Get balances of the specified Odin.fun user."
    )]
    pub async fn get_balances(
        &self,
        params: Parameters<PrincipalParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .enhanced(self.client.get_user_balances(&params.0.principal_id).await)
            .await;
        tool_result("odinapi_user_getBalances", result)
    }

    #[tool(
        name = "odinapi_user_getTokenBalance",
        description = "Get the balance of one token for the specified Odin.fun user. Returns null when the user holds none."
    )]
    pub async fn get_token_balance(
        &self,
        params: Parameters<TokenBalanceParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        let result = self
            .enhanced(self.client.get_user_balances(&p.principal_id).await)
            .await
            .map(|response| token_balance_entry(&response, &p.token_id).unwrap_or(Value::Null));
        tool_result("odinapi_user_getTokenBalance", result)
    }

    #[tool(
        name = "odinapi_user_getCreatedTokens",
        description = "Get tokens created by the specified Odin.fun user. Returns an array."
    )]
    pub async fn get_created_tokens(
        &self,
        params: Parameters<PrincipalParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .enhanced(
                self.client
                    .get_user_created_tokens(&params.0.principal_id)
                    .await,
            )
            .await;
        tool_result("odinapi_user_getCreatedTokens", result)
    }

    #[tool(
        name = "odinapi_user_getFavoriteTokens",
        description = "Get tokens favorited by the specified Odin.fun user. Returns an array."
    )]
    pub async fn get_favorite_tokens(
        &self,
        params: Parameters<PrincipalParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .enhanced(self.client.get_user_tokens(&params.0.principal_id).await)
            .await
            .map(|response| Value::Array(favorite_entries(&response)));
        tool_result("odinapi_user_getFavoriteTokens", result)
    }

    #[tool(
        name = "odinapi_user_getLiquidity",
        description = "Get the user's liquidity positions. Price and BTC values are in 0.001 satoshi units."
    )]
    pub async fn get_user_liquidity(
        &self,
        params: Parameters<UserLiquidityParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .enhanced(self.client.get_user_tokens(&params.0.user_principal).await)
            .await
            .map(|response| Value::Array(liquidity_entries(&response)));
        tool_result("odinapi_user_getLiquidity", result)
    }

    #[tool(
        name = "odinapi_user_getActivities",
        description = "Get activity records for the specified Odin.fun user. Returns an array."
    )]
    pub async fn get_activities(
        &self,
        params: Parameters<PrincipalParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self
            .enhanced(self.client.get_user_activity(&params.0.principal_id).await)
            .await;
        tool_result("odinapi_user_getActivities", result)
    }

    #[tool(
        name = "odinapi_search",
        description = "Search tokens, users and comments. Optionally restrict to types: token, user, comment."
    )]
    pub async fn search(
        &self,
        params: Parameters<SearchParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        let types: Vec<String> = p
            .types
            .unwrap_or_default()
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();
        tool_result("odinapi_search", self.client.search(&p.query, &types).await)
    }

    #[tool(
        name = "odinapi_authIdentity",
        description = "Authenticate an identity with Odin.fun. Returns the session token response."
    )]
    pub async fn auth_identity(
        &self,
        params: Parameters<AuthIdentityParam>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::info!("Authenticating identity");
        tool_result(
            "odinapi_authIdentity",
            self.client.authenticate(&params.0.identity).await,
        )
    }

    #[tool(
        name = "odinapi_identity_postComment",
        description = "Post a comment on a token as the user identified by authToken."
    )]
    pub async fn post_comment(
        &self,
        params: Parameters<PostCommentParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        tracing::info!(token = %p.token_id, principal = %p.principal_id, "Posting comment");
        let token = SecretString::new(p.auth_token);
        let body = CommentBody {
            message: p.comment,
            community: 0,
        };
        tool_result(
            "odinapi_identity_postComment",
            self.client
                .post_token_comment(&p.token_id, &body, Some(&token))
                .await,
        )
    }
}

/// Converts between sats and USD; same-unit requests return the input
pub fn convert_amount(
    amount: f64,
    from: PriceUnit,
    to: PriceUnit,
    btc_price_usd: f64,
) -> crate::error::Result<Value> {
    let (converted, unit) = match (from, to) {
        (PriceUnit::Sats, PriceUnit::Usd) => (sats_to_usd(amount, btc_price_usd), "usd"),
        (PriceUnit::Usd, PriceUnit::Sats) => (usd_to_sats(amount, btc_price_usd)?, "sats"),
        (PriceUnit::Sats, PriceUnit::Sats) => (amount, "sats"),
        (PriceUnit::Usd, PriceUnit::Usd) => (amount, "usd"),
    };
    Ok(json!({ "amount": converted, "unit": unit }))
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for OdinServer {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: Some(ResourcesCapability {
                    subscribe: Some(false),
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "odin-provider".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Odin.fun MCP Provider".to_string()),
                website_url: Some("https://odin.fun".to_string()),
                icons: None,
            },
            instructions: Some(
                "Odin.fun token trading tools. Prices are in 0.001 satoshi units and balances \
                are scaled by 10^11; enhanced responses add price_sats, price_usd and \
                balance_formatted. See odinapi_getPriceUnitInfo."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _params: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            resources: crate::mcp::resources::list_resources(),
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        params: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let contents = crate::mcp::resources::read_resource(&params.uri)?;
        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_sats_to_usd() {
        let out = convert_amount(1000.0, PriceUnit::Sats, PriceUnit::Usd, 50000.0).unwrap();
        assert_eq!(out, json!({"amount": 0.5, "unit": "usd"}));
    }

    #[test]
    fn test_convert_usd_to_sats() {
        let out = convert_amount(0.5, PriceUnit::Usd, PriceUnit::Sats, 50000.0).unwrap();
        assert_eq!(out, json!({"amount": 1000.0, "unit": "sats"}));
    }

    #[test]
    fn test_convert_same_unit_returns_input() {
        let out = convert_amount(42.5, PriceUnit::Usd, PriceUnit::Usd, 50000.0).unwrap();
        assert_eq!(out, json!({"amount": 42.5, "unit": "usd"}));
    }
}
