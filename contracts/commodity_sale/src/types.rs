use soroban_sdk::{contracttype, symbol_short, Address, String, Symbol};

/// Oldest a price observation may be before purchases are refused: one day
/// plus ten minutes of grace for a late oracle round.
pub const FRESHNESS_WINDOW_SECS: u64 = 86_400 + 600;
/// Both feeds landing this close together re-arm the next poll.
pub const COINCIDENCE_WINDOW_SECS: u64 = 300;
/// Delay handed to the oracle when the poll re-arms itself.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 86_400;

pub const CENTS_PER_UNIT: i128 = 100;
pub const COMMODITY_PRECISION: i128 = 100;
/// The commodity feed reports four extra decimal places.
pub const COMMODITY_FEED_DIVISOR: i128 = 10_000;

/// One whole token (7 decimals). Token, payment and value units share it.
pub const ONE_TOKEN: i128 = 10_000_000;

/// Ledgers per day at roughly five seconds a ledger.
pub const DAY_IN_LEDGERS: u32 = 17_280;
pub const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

pub const ORACLE_DATASOURCE: Symbol = symbol_short!("URL");

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleConfig {
    pub token: Address,         // token ledger delivering sale tokens
    pub token_holder: Address,  // account that approved the sale as spender
    pub payment_token: Address, // payment currency, also funds oracle fees
    pub wallet: Address,        // receives forwarded payments
    pub oracle: Address,
    pub reference_query: String,
    pub commodity_query: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Ownership {
    pub owner: Address,
    pub pending_owner: Option<Address>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
#[repr(u32)]
pub enum Feed {
    Reference = 0,
    Commodity = 1,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[contracttype]
pub struct PriceFeed {
    /// Hundredths of a reference currency unit per payment unit.
    pub reference_rate_cents: i128,
    /// Hundredths per commodity unit, after the feed divisor.
    pub commodity_rate_cents: i128,
    pub last_reference_update: Option<u64>,
    pub last_commodity_update: Option<u64>,
}

#[contracttype]
pub enum DataKey {
    Config,
    Ownership,
    Paused,
    Finished,
    TotalPaymentRaised,
    TotalValueRaised,
    PriceFeed,
    Whitelisted(Address),
    PendingQuery(Feed),
}
