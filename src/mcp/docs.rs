//! Reference text served by the documentation tools and `odin://docs/*` resources

pub const PRICE_UNITS_DOC: &str = r#"# Odin.fun price and amount units

## Prices
Every `price` returned by the Odin.fun API is expressed in **thousandths of a satoshi**.

    satoshis = price * 0.001
    usd      = satoshis * btc_usd / 100000000

Example: `price: 1000` is 1 sat. With BTC at $50,000 that is $0.0005.

Enhanced tool responses add two display fields next to every numeric `price`:
- `price_sats`, e.g. `"1 sats"`
- `price_usd`, e.g. `"$0.00050000 usd"` (8 decimals; `$0.00000000` when the BTC price is unavailable)

## Balances
Token `balance` values are integers scaled by **10^11**.

    display = balance / 100000000000

Enhanced responses add `balance_formatted` (exact decimal, trailing zeros removed;
scientific notation such as `1.000000e+10` at or above ten billion).

## BTC amounts on the canister
Canister BTC amounts use the same millisatoshi scale as prices: 1000 = 1 sat.

## Conversion tool
`odinapi_price_convert` converts between `sats` and `usd` using the live BTC price.
"#;

pub const FAQ_DOC: &str = r#"# Odin.fun FAQ

**What is Odin.fun?**
A Bitcoin token launchpad running on the Internet Computer. Anyone can create a
Rune-backed token and trade it against BTC.

**How is a new token priced?**
New tokens trade on a bonding curve: the price rises as supply is bought and falls as
it is sold. All prices are quoted in thousandths of a satoshi.

**What happens when a token bonds?**
Once the BTC raised on the curve reaches the bonding threshold, the token graduates to
an automated market maker (AMM) pool. From then on the price follows the pool reserves
and users can add or remove liquidity.

**What is the AMM?**
A constant-product pool of BTC and the token. Liquidity providers deposit BTC and earn
a share of trading fees; removing liquidity returns their share of the pool.

**How do I trade?**
Buy or sell against the Odin canister, naming either the BTC amount to spend/receive or
the token amount. An optional slippage setting bounds the execution price.

**How do deposits and withdrawals work?**
BTC is deposited to the user's Odin account and can be withdrawn over the `btc`,
`ckbtc` or `volt` protocols.

**What do holder counts and market cap mean?**
Holder count is the number of principals with a non-zero balance. Market cap is the
current price multiplied by total supply, in the same millisatoshi unit as prices.
"#;
