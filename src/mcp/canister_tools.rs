//! Canister-backed tools
//!
//! Balance queries and trading updates against the Odin canister. Amounts travel as
//! integer strings and are parsed into `Nat` before any call is made.

use crate::canister::{
    metadata_from_json, parse_amount, LiquidityType, MintRequest, TradeAmount, TradeRequest,
    TradeSettings, TradeType, WithdrawProtocol, WithdrawRequest,
};
use crate::enhance::format_token_amount;
use crate::error;
use crate::mcp::server::{tool_result, OdinServer};
use crate::mcp::types::{
    BtcTradeParam, CanisterBalanceParam, CreateTokenParam, LiquidityParam, SlippageParam,
    TokenTradeParam, WithdrawParam,
};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorData};
use rmcp::{tool, tool_router};
use serde_json::{json, Value};

fn trade_settings(slippage: Option<&SlippageParam>) -> error::Result<Option<TradeSettings>> {
    slippage
        .map(|s| {
            Ok(TradeSettings {
                slippage: Some((
                    parse_amount("slippage.amount", &s.amount)?,
                    parse_amount("slippage.tolerance", &s.tolerance)?,
                )),
            })
        })
        .transpose()
}

fn ok_null() -> Value {
    json!({ "ok": null })
}

#[tool_router(router = canister_tool_router, vis = "pub")]
impl OdinServer {
    #[tool(
        name = "canister_getBalance",
        description = "Get a user's on-canister balance for a token (use tokenId \"btc\" for BTC). Returns the raw amount and a formatted value."
    )]
    pub async fn canister_get_balance(
        &self,
        params: Parameters<CanisterBalanceParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let p = params.0;
        let result = self
            .canister
            .get_balance(&p.principal, &p.account, &p.token_id)
            .await
            .map(|balance| {
                json!({
                    "balance": balance.0.to_string(),
                    "balance_formatted": format_token_amount(&balance),
                })
            });
        tool_result("canister_getBalance", result)
    }

    #[tool(
        name = "canister_withdraw",
        description = "Withdraw tokens or BTC to an external address via btc, ckbtc or volt."
    )]
    pub async fn canister_withdraw(
        &self,
        params: Parameters<WithdrawParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self.withdraw(params.0).await;
        tool_result("canister_withdraw", result)
    }

    #[tool(
        name = "canister_createToken",
        description = "Create a new token. Metadata values may be strings, booleans or integers."
    )]
    pub async fn canister_create_token(
        &self,
        params: Parameters<CreateTokenParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self.create_token(params.0).await;
        tool_result("canister_createToken", result)
    }

    #[tool(
        name = "canister_buyTokenWithBtc",
        description = "Buy a token spending a fixed BTC amount (raw units, 1000 = 1 sat)."
    )]
    pub async fn canister_buy_token_with_btc(
        &self,
        params: Parameters<BtcTradeParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self.btc_trade(TradeType::Buy, params.0).await;
        tool_result("canister_buyTokenWithBtc", result)
    }

    #[tool(
        name = "canister_sellTokenForBtc",
        description = "Sell a token for a fixed BTC amount (raw units, 1000 = 1 sat)."
    )]
    pub async fn canister_sell_token_for_btc(
        &self,
        params: Parameters<BtcTradeParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self.btc_trade(TradeType::Sell, params.0).await;
        tool_result("canister_sellTokenForBtc", result)
    }

    #[tool(
        name = "canister_buyTokenAmount",
        description = "Buy a fixed amount of a token (raw units, 10^11 = 1 token)."
    )]
    pub async fn canister_buy_token_amount(
        &self,
        params: Parameters<TokenTradeParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self.token_trade(TradeType::Buy, params.0).await;
        tool_result("canister_buyTokenAmount", result)
    }

    #[tool(
        name = "canister_sellTokenAmount",
        description = "Sell a fixed amount of a token (raw units, 10^11 = 1 token)."
    )]
    pub async fn canister_sell_token_amount(
        &self,
        params: Parameters<TokenTradeParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self.token_trade(TradeType::Sell, params.0).await;
        tool_result("canister_sellTokenAmount", result)
    }

    #[tool(
        name = "canister_addLiquidity",
        description = "Add BTC liquidity to a token pool (raw BTC units)."
    )]
    pub async fn canister_add_liquidity(
        &self,
        params: Parameters<LiquidityParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self.liquidity(LiquidityType::Add, params.0).await;
        tool_result("canister_addLiquidity", result)
    }

    #[tool(
        name = "canister_removeLiquidity",
        description = "Remove liquidity from a token pool (raw LP units)."
    )]
    pub async fn canister_remove_liquidity(
        &self,
        params: Parameters<LiquidityParam>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self.liquidity(LiquidityType::Remove, params.0).await;
        tool_result("canister_removeLiquidity", result)
    }
}

impl OdinServer {
    async fn withdraw(&self, p: WithdrawParam) -> error::Result<Value> {
        let request = WithdrawRequest {
            protocol: p.protocol.parse::<WithdrawProtocol>()?,
            tokenid: p.token_id,
            address: p.address,
            amount: parse_amount("amount", &p.amount)?,
        };
        let ok = self.canister.token_withdraw(request).await?;
        Ok(json!({ "ok": ok }))
    }

    async fn create_token(&self, p: CreateTokenParam) -> error::Result<Value> {
        let request = MintRequest {
            metadata: metadata_from_json(&p.metadata)?,
            code: p.code,
            prebuy_amount: p
                .prebuy_amount
                .as_deref()
                .map(|raw| parse_amount("prebuy_amount", raw))
                .transpose()?,
        };
        self.canister.token_mint(request).await?;
        Ok(ok_null())
    }

    async fn btc_trade(&self, side: TradeType, p: BtcTradeParam) -> error::Result<Value> {
        let request = TradeRequest {
            tokenid: p.token_id,
            trade_type: side,
            settings: trade_settings(p.slippage.as_ref())?,
            amount: TradeAmount::Btc(parse_amount("btcAmount", &p.btc_amount)?),
        };
        self.canister.token_trade(request).await?;
        Ok(ok_null())
    }

    async fn token_trade(&self, side: TradeType, p: TokenTradeParam) -> error::Result<Value> {
        let request = TradeRequest {
            tokenid: p.token_id,
            trade_type: side,
            settings: trade_settings(p.slippage.as_ref())?,
            amount: TradeAmount::Token(parse_amount("tokenAmount", &p.token_amount)?),
        };
        self.canister.token_trade(request).await?;
        Ok(ok_null())
    }

    async fn liquidity(&self, kind: LiquidityType, p: LiquidityParam) -> error::Result<Value> {
        let amount = parse_amount("amount", &p.amount)?;
        self.canister.token_liquidity(p.token_id, kind, amount).await?;
        Ok(ok_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candid::Nat;

    #[test]
    fn test_trade_settings() {
        assert!(trade_settings(None).unwrap().is_none());

        let slippage = SlippageParam {
            amount: "1000".into(),
            tolerance: "50".into(),
        };
        let settings = trade_settings(Some(&slippage)).unwrap().unwrap();
        assert_eq!(
            settings.slippage,
            Some((Nat::from(1000u64), Nat::from(50u64)))
        );

        let bad = SlippageParam {
            amount: "1.5".into(),
            tolerance: "50".into(),
        };
        assert!(trade_settings(Some(&bad)).is_err());
    }
}
