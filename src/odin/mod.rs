//! Odin.fun REST API integration
//!
//! - `client`: HTTP client and typed endpoint helpers
//! - `types`: query and body shapes
//! - `units`: satoshi, BTC and USD conversions

pub mod client;
pub mod types;
pub mod units;

pub use client::OdinClient;
pub use types::{CommentBody, FeedQuery, PageQuery, TokenQuery, TradeQuery, FEED_RESOLUTIONS};
