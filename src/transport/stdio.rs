//! Stdio Transport for MCP Server
//!
//! Messages are read from stdin and responses written to stdout, so nothing else may
//! write to stdout while this runs.

use crate::mcp::OdinServer;
use rmcp::ServiceExt;

/// Serves `server` over stdio until the client disconnects
pub async fn run_stdio_server(server: OdinServer) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting Odin MCP server in stdio mode");

    let service = server.serve(rmcp::transport::stdio()).await?;

    tracing::info!("MCP server ready on stdio");

    service.waiting().await?;

    tracing::info!("MCP server shutdown complete");

    Ok(())
}
