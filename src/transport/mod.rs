//! MCP transport layer
//!
//! - Stdio: standard I/O for local MCP clients (default)
//! - SSE: Server-Sent Events (`/sse` + `/message`)
//! - Streamable HTTP: rmcp streamable service at `/mcp`
//!
//! Network modes also answer `GET /` with a status object.

pub mod stdio;

#[cfg(feature = "http_transport")]
pub mod sse;

#[cfg(feature = "http_transport")]
pub mod streamable;

use crate::error::OdinError;
use std::fmt;
use std::str::FromStr;

/// Transport mode selection for the MCP server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    /// Standard I/O transport (local MCP connections)
    #[default]
    Stdio,

    /// Server-Sent Events transport
    Sse,

    /// Streamable HTTP transport
    Streamable,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Stdio => "stdio",
            TransportMode::Sse => "sse",
            TransportMode::Streamable => "streamable",
        }
    }

    pub fn is_network(&self) -> bool {
        !matches!(self, TransportMode::Stdio)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = OdinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stdio" => Ok(TransportMode::Stdio),
            "sse" => Ok(TransportMode::Sse),
            "streamable" | "http" => Ok(TransportMode::Streamable),
            other => Err(OdinError::Config(format!(
                "Invalid mode: {} (expected stdio, sse or streamable)",
                other
            ))),
        }
    }
}

/// `GET /` router shared by the network transports
#[cfg(feature = "http_transport")]
pub(crate) fn status_router(mode: TransportMode) -> axum::Router {
    use axum::routing::get;
    use axum::Json;

    axum::Router::new().route(
        "/",
        get(move || async move { Json(status_body(mode)) }),
    )
}

/// Body of the `GET /` status response
pub fn status_body(mode: TransportMode) -> serde_json::Value {
    serde_json::json!({
        "status": "running",
        "name": "odin-provider",
        "version": env!("CARGO_PKG_VERSION"),
        "mode": mode.as_str(),
    })
}
