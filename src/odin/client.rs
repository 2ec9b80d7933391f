//! Odin REST client
//!
//! Thin wrapper over `reqwest::Client` with timeout, user agent and optional bearer token.
//! Every helper issues exactly one HTTP call and returns the response body as JSON.

use crate::config::{OdinConfig, SecretString};
use crate::enhance::BtcPriceSource;
use crate::error::{status_error, OdinError, Result};
use crate::odin::types::{CommentBody, FeedQuery, PageQuery, TokenQuery, TradeQuery};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("odin-provider/", env!("CARGO_PKG_VERSION"));

const NO_QUERY: &[(&str, &str)] = &[];

/// Odin.fun REST API client
#[derive(Clone)]
pub struct OdinClient {
    client: Client,
    base_url: String,
    api_token: Option<SecretString>,
}

impl std::fmt::Debug for OdinClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdinClient")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl OdinClient {
    /// Creates a client without credentials
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| OdinError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
        })
    }

    pub fn from_config(config: &OdinConfig) -> Result<Self> {
        let client = Self::new(config.api_base_url.clone(), config.http_timeout)?;
        Ok(match &config.api_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        })
    }

    /// Attaches a bearer token to every request
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.api_token = Some(token);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }

    /// Builds `{base_url}/{segments...}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            OdinError::Config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                OdinError::Config(format!("Base URL '{}' cannot carry a path", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        url: Url,
        token: Option<&SecretString>,
    ) -> RequestBuilder {
        tracing::debug!(%method, %url, "Odin API request");
        let builder = self.client.request(method, url);
        match token.or(self.api_token.as_ref()) {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// `GET` with query parameters
    pub async fn get_json<Q>(&self, segments: &[&str], query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let request = self.request(Method::GET, url, None).query(query);
        Self::send(request).await
    }

    /// `POST` with a JSON body
    pub async fn post_json<B>(&self, segments: &[&str], body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.post_json_with_token(segments, body, None).await
    }

    /// `POST` with a JSON body, overriding the client token for this call
    pub async fn post_json_with_token<B>(
        &self,
        segments: &[&str],
        body: &B,
        token: Option<&SecretString>,
    ) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let request = self.request(Method::POST, url, token).json(body);
        Self::send(request).await
    }

    async fn send(request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = upstream_message(&body);
            tracing::warn!(
                status = status.as_u16(),
                message = ?message,
                "Odin API returned an error"
            );
            return Err(status_error(status.as_u16(), message));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    // Typed endpoints

    pub async fn get_btc_price(&self) -> Result<Value> {
        self.get_currency("btc").await
    }

    pub async fn get_currency(&self, symbol: &str) -> Result<Value> {
        self.get_json(&["currency", symbol], NO_QUERY).await
    }

    pub async fn get_tokens(&self, query: &TokenQuery) -> Result<Value> {
        self.get_json(&["tokens"], query).await
    }

    pub async fn get_token(&self, token_id: &str, include_holders: bool) -> Result<Value> {
        self.get_json(&["token", token_id], &[("include_holders", include_holders)])
            .await
    }

    pub async fn get_token_owners(&self, token_id: &str, page: PageQuery) -> Result<Value> {
        self.get_json(&["token", token_id, "owners"], &page).await
    }

    pub async fn get_token_liquidity(&self, token_id: &str) -> Result<Value> {
        self.get_json(&["token", token_id, "liquidity"], NO_QUERY)
            .await
    }

    pub async fn get_token_comments(&self, token_id: &str) -> Result<Value> {
        self.get_json(&["token", token_id, "comments"], NO_QUERY)
            .await
    }

    pub async fn get_token_feed(&self, token_id: &str, query: &FeedQuery) -> Result<Value> {
        self.get_json(&["token", token_id, "feed"], query).await
    }

    pub async fn get_trades(&self, query: &TradeQuery) -> Result<Value> {
        self.get_json(&["trades"], query).await
    }

    pub async fn get_users(&self, username: Option<&str>) -> Result<Value> {
        match username {
            Some(name) => self.get_json(&["users"], &[("username", name)]).await,
            None => self.get_json(&["users"], NO_QUERY).await,
        }
    }

    pub async fn get_user(&self, principal: &str) -> Result<Value> {
        self.get_json(&["user", principal], NO_QUERY).await
    }

    pub async fn get_user_balances(&self, principal: &str) -> Result<Value> {
        self.get_json(&["user", principal, "balances"], NO_QUERY)
            .await
    }

    pub async fn get_user_tokens(&self, principal: &str) -> Result<Value> {
        self.get_json(&["user", principal, "tokens"], NO_QUERY)
            .await
    }

    pub async fn get_user_created_tokens(&self, principal: &str) -> Result<Value> {
        self.get_json(&["user", principal, "created"], NO_QUERY)
            .await
    }

    pub async fn get_user_activity(&self, principal: &str) -> Result<Value> {
        self.get_json(&["user", principal, "activity"], NO_QUERY)
            .await
    }

    /// Global search; `types` is sent comma-separated when non-empty
    pub async fn search(&self, query: &str, types: &[String]) -> Result<Value> {
        let mut params: Vec<(&str, String)> = vec![("q", query.to_string())];
        if !types.is_empty() {
            params.push(("types", types.join(",")));
        }
        self.get_json(&["search"], &params).await
    }

    /// Exchanges an identity payload for a session token (`POST /auth`)
    pub async fn authenticate(&self, identity: &Value) -> Result<Value> {
        self.post_json(&["auth"], identity).await
    }

    pub async fn post_token_comment(
        &self,
        token_id: &str,
        body: &CommentBody,
        token: Option<&SecretString>,
    ) -> Result<Value> {
        self.post_json_with_token(&["token", token_id, "comment"], body, token)
            .await
    }
}

#[async_trait]
impl BtcPriceSource for OdinClient {
    async fn fetch_btc_price(&self) -> Result<Value> {
        self.get_btc_price().await
    }
}

/// `message` from a JSON error body, else the trimmed body text
fn upstream_message(body: &str) -> Option<String> {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
    });

    from_json.or_else(|| {
        let trimmed = body.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> OdinClient {
        OdinClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = client("https://api.odin.fun/v1/");
        let url = client.endpoint(&["token", "a b/c", "owners"]).unwrap();
        assert_eq!(url.as_str(), "https://api.odin.fun/v1/token/a%20b%2Fc/owners");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = client("not a url");
        assert!(matches!(
            client.endpoint(&["tokens"]),
            Err(OdinError::Config(_))
        ));
    }

    #[test]
    fn test_debug_masks_token() {
        let client =
            client("https://api.odin.fun/v1").with_token(SecretString::new("supersecrettoken"));
        let debug = format!("{:?}", client);
        assert!(!debug.contains("supersecrettoken"));
        assert!(debug.contains("***"));
        assert!(client.has_token());
    }

    #[test]
    fn test_upstream_message() {
        assert_eq!(
            upstream_message(r#"{"message":"Token not found","code":404}"#),
            Some("Token not found".to_string())
        );
        assert_eq!(upstream_message("Bad Gateway"), Some("Bad Gateway".to_string()));
        assert_eq!(upstream_message("   "), None);
    }
}
