//! Response enhancement
//!
//! Annotates raw Odin API responses with display fields:
//! - `price_sats` / `price_usd` next to every numeric `price`
//! - `balance_formatted` next to every numeric or string `balance`
//!
//! Original fields are never modified. The BTC/USD price is fetched at most once per
//! top-level [`ResponseEnhancer::enhance`] call, and only when the response carries a
//! price field. All conversion failures degrade to fallback strings; the pipeline never
//! returns an error.

pub mod balance;
pub mod oracle;
pub mod price;
pub mod walker;

pub use balance::{
    format_balance, format_balance_str, format_token_amount, BALANCE_DIVISOR_DIGITS,
};
pub use oracle::{current_btc_usd_price, BtcPriceSource};
pub use price::{annotate_price, display_number, PriceAnnotation};
pub use walker::{contains_price_field, enrich, is_truthy, ResponseEnhancer};
