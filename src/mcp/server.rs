//! MCP Server Implementation
//!
//! `OdinServer` holds the REST client, the response enhancer and the canister client.
//! Tool routing lives in `handler` (REST tools) and `canister_tools`.

use crate::canister::CanisterClient;
use crate::config::OdinConfig;
use crate::enhance::ResponseEnhancer;
use crate::error::{OdinError, Result};
use crate::odin::OdinClient;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::model::{CallToolResult, Content, ErrorData};
use serde_json::{json, Value};
use std::sync::Arc;

/// Odin MCP server
#[derive(Clone)]
pub struct OdinServer {
    pub client: Arc<OdinClient>,
    pub enhancer: ResponseEnhancer<OdinClient>,
    pub canister: Arc<CanisterClient>,
    pub tool_router: ToolRouter<Self>,
}

impl OdinServer {
    pub fn new(client: OdinClient, canister: CanisterClient) -> Self {
        let client = Arc::new(client);
        Self {
            enhancer: ResponseEnhancer::new(Arc::clone(&client)),
            client,
            canister: Arc::new(canister),
            tool_router: Self::odin_tool_router() + Self::canister_tool_router(),
        }
    }

    pub fn from_config(config: &OdinConfig) -> Result<Self> {
        let client = OdinClient::from_config(config)?;
        if !client.has_token() {
            tracing::warn!("ODIN_API_TOKEN not set - authenticated REST endpoints will fail");
        }
        let canister = CanisterClient::from_config(&config.canister)?;
        Ok(Self::new(client, canister))
    }

    /// Enriches a successful upstream response
    pub(crate) async fn enhanced(&self, result: Result<Value>) -> Result<Value> {
        match result {
            Ok(value) => Ok(self.enhancer.enhance(&value).await),
            Err(e) => Err(e),
        }
    }
}

/// Converts a tool outcome into an MCP result
///
/// Upstream and canister failures become `{"error": ...}` tool errors so the caller sees
/// the message; invalid arguments become protocol-level `invalid_params`.
pub(crate) fn tool_result(
    tool: &str,
    result: Result<Value>,
) -> std::result::Result<CallToolResult, ErrorData> {
    match result {
        Ok(value) => Ok(CallToolResult::success(vec![Content::text(
            value.to_string(),
        )])),
        Err(OdinError::Validation(msg)) => {
            tracing::debug!(tool, %msg, "Rejected tool arguments");
            Err(ErrorData::invalid_params(msg, None))
        }
        Err(e) => {
            tracing::warn!(
                tool,
                error = %e,
                kind = e.error_type(),
                retryable = e.is_retryable(),
                "Tool call failed"
            );
            let body = json!({ "error": format!("Error in {}: {}", tool, e) });
            Ok(CallToolResult::error(vec![Content::text(body.to_string())]))
        }
    }
}

/// Plain text tool output
pub(crate) fn text_result(text: &str) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_text(result: &CallToolResult) -> String {
        result.content[0]
            .as_text()
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_success_result_is_compact_json() {
        let result = tool_result("t", Ok(json!({"a": 1}))).unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(first_text(&result), r#"{"a":1}"#);
    }

    #[test]
    fn test_upstream_error_is_tool_error() {
        let err = OdinError::Api {
            status: 404,
            message: "Token not found".into(),
        };
        let result = tool_result("odinapi_token_getToken", Err(err)).unwrap();

        assert_eq!(result.is_error, Some(true));
        let body: Value = serde_json::from_str(&first_text(&result)).unwrap();
        assert_eq!(
            body["error"],
            json!("Error in odinapi_token_getToken: Odin API error (404): Token not found")
        );
    }

    #[test]
    fn test_from_config_with_and_without_token() {
        let anonymous = OdinConfig::from_lookup(|_| None).unwrap();
        let server = OdinServer::from_config(&anonymous).unwrap();
        assert!(!server.client.has_token());

        let authed = OdinConfig::from_lookup(|key| {
            (key == "ODIN_API_TOKEN").then(|| "jwt".to_string())
        })
        .unwrap();
        assert!(OdinServer::from_config(&authed).unwrap().client.has_token());
    }

    #[test]
    fn test_retryable_failure_is_still_a_tool_error() {
        let err = OdinError::RateLimit("slow down".into());
        assert!(err.is_retryable());

        let result = tool_result("t", Err(err)).unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(first_text(&result).contains("slow down"));
    }

    #[test]
    fn test_validation_error_is_invalid_params() {
        let err = tool_result("t", Err(OdinError::Validation("bad".into()))).unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }
}
