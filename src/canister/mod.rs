//! Odin trading canister on the Internet Computer

pub mod client;
pub mod types;

pub use client::CanisterClient;
pub use types::{
    metadata_from_json, parse_amount, LiquidityType, Metadata, MetadataValue, MintRequest,
    TradeAmount, TradeRequest, TradeSettings, TradeType, WithdrawProtocol, WithdrawRequest,
};
