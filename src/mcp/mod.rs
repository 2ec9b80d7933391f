//! Model Context Protocol (MCP) server for Odin.fun
//!
//! - REST tools over the Odin API, with enhanced price and balance fields
//! - Canister tools for balances, trading, liquidity and token creation
//! - Static documentation resources under `odin://docs/`

pub mod canister_tools;
pub mod docs;
pub mod extract;
pub mod handler;
pub mod resources;
pub mod server;
pub mod types;

pub use server::OdinServer;
