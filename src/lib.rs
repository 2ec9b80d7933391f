// Library exports for odin-provider

pub mod error;
pub mod logging;

// Response enhancement pipeline (BTC price, balances, price annotations)
pub mod enhance;

// Odin integrations
pub mod canister; // IC canister client
pub mod config; // Configuration management
pub mod odin; // REST API client

pub mod mcp; // MCP server implementation
pub mod transport; // MCP transports (stdio, SSE, streamable HTTP)
