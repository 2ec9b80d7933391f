//! Odin canister client
//!
//! Queries and update calls against the Odin trading canister through `ic-agent`.

use crate::canister::types::{
    LiquidityRequest, LiquidityType, MintRequest, OperationResult, TokenAmount, TokenId,
    TradeRequest, WithdrawRequest, WithdrawResult,
};
use crate::config::CanisterConfig;
use crate::error::{OdinError, Result};
use candid::{Decode, Encode, Principal};
use ic_agent::identity::{BasicIdentity, Secp256k1Identity};
use ic_agent::{Agent, Identity};
use std::path::Path;

/// Client bound to the Odin canister
#[derive(Clone)]
pub struct CanisterClient {
    agent: Agent,
    canister_id: Principal,
}

impl std::fmt::Debug for CanisterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanisterClient")
            .field("canister_id", &self.canister_id.to_text())
            .finish()
    }
}

impl CanisterClient {
    /// Builds the agent; anonymous unless an identity PEM is configured
    ///
    /// No network traffic happens here.
    pub fn from_config(config: &CanisterConfig) -> Result<Self> {
        let builder = Agent::builder().with_url(config.ic_host.as_str());

        let agent = match &config.identity_pem {
            Some(path) => builder.with_identity(load_identity(path)?).build(),
            None => builder.build(),
        }
        .map_err(|e| OdinError::Config(format!("Failed to build IC agent: {}", e)))?;

        tracing::info!(
            canister = %config.canister_id,
            host = %config.ic_host,
            authenticated = config.identity_pem.is_some(),
            "Canister client ready"
        );

        Ok(Self {
            agent,
            canister_id: config.canister_id,
        })
    }

    pub fn canister_id(&self) -> Principal {
        self.canister_id
    }

    /// `getBalance(principal, account, token_id)` query
    pub async fn get_balance(
        &self,
        principal: &str,
        account: &str,
        token_id: &str,
    ) -> Result<TokenAmount> {
        let response = self
            .agent
            .query(&self.canister_id, "getBalance")
            .with_arg(Encode!(&principal, &account, &token_id)?)
            .call()
            .await?;

        Ok(Decode!(&response, TokenAmount)?)
    }

    pub async fn token_trade(&self, request: TradeRequest) -> Result<()> {
        tracing::info!(
            token = %request.tokenid,
            side = ?request.trade_type,
            amount = ?request.amount,
            "Submitting trade"
        );
        let response = self.update("token_trade", Encode!(&request)?).await?;
        Decode!(&response, OperationResult)?.into_result()
    }

    /// Returns the canister's `ok` flag
    pub async fn token_withdraw(&self, request: WithdrawRequest) -> Result<bool> {
        tracing::info!(
            token = %request.tokenid,
            protocol = ?request.protocol,
            "Submitting withdrawal"
        );
        let response = self.update("token_withdraw", Encode!(&request)?).await?;
        Decode!(&response, WithdrawResult)?.into_result()
    }

    pub async fn token_mint(&self, request: MintRequest) -> Result<()> {
        tracing::info!(fields = request.metadata.len(), "Submitting token mint");
        let response = self.update("token_mint", Encode!(&request)?).await?;
        Decode!(&response, OperationResult)?.into_result()
    }

    pub async fn token_liquidity(
        &self,
        token_id: TokenId,
        liquidity_type: LiquidityType,
        amount: TokenAmount,
    ) -> Result<()> {
        let request = LiquidityRequest {
            tokenid: token_id,
            liquidity_type,
            amount,
        };
        tracing::info!(
            token = %request.tokenid,
            kind = ?request.liquidity_type,
            "Submitting liquidity change"
        );
        let response = self.update("token_liquidity", Encode!(&request)?).await?;
        Decode!(&response, OperationResult)?.into_result()
    }

    async fn update(&self, method: &str, arg: Vec<u8>) -> Result<Vec<u8>> {
        Ok(self
            .agent
            .update(&self.canister_id, method)
            .with_arg(arg)
            .call_and_wait()
            .await?)
    }
}

/// Loads a PEM identity, trying secp256k1 first and then Ed25519
fn load_identity(path: &Path) -> Result<Box<dyn Identity>> {
    if let Ok(identity) = Secp256k1Identity::from_pem_file(path) {
        return Ok(Box::new(identity));
    }
    BasicIdentity::from_pem_file(path)
        .map(|identity| Box::new(identity) as Box<dyn Identity>)
        .map_err(|e| {
            OdinError::Config(format!(
                "Failed to load identity from {}: {}",
                path.display(),
                e
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config(pem: Option<std::path::PathBuf>) -> CanisterConfig {
        CanisterConfig {
            ic_host: "https://ic0.app".to_string(),
            canister_id: Principal::from_text("z2vm5-gaaaa-aaaaj-azw6q-cai").unwrap(),
            identity_pem: pem,
        }
    }

    #[test]
    fn test_anonymous_client_builds_offline() {
        let client = CanisterClient::from_config(&config(None)).unwrap();
        assert_eq!(client.canister_id().to_text(), "z2vm5-gaaaa-aaaaj-azw6q-cai");
    }

    #[test]
    fn test_bad_identity_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not a pem").unwrap();

        let err = CanisterClient::from_config(&config(Some(file.path().to_path_buf())))
            .unwrap_err();
        assert!(matches!(err, OdinError::Config(_)));
    }
}
