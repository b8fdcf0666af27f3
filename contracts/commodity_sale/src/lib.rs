#![no_std]

mod access;
mod contract;
mod errors;
mod events;
mod oracle;
mod price_feed;
mod pricing;
mod storage;
mod types;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use contract::{CommoditySaleContract, CommoditySaleContractClient};
pub use errors::Error;
pub use events::{PriceUpdatedEvent, PurchaseEvent, QueryFailedEvent, SaleFinishedEvent};
pub use oracle::{PriceOracle, PriceOracleClient};
pub use types::{
    Feed, Ownership, PriceFeed, SaleConfig, COINCIDENCE_WINDOW_SECS, COMMODITY_FEED_DIVISOR,
    DAY_IN_LEDGERS, DEFAULT_POLL_INTERVAL_SECS, FRESHNESS_WINDOW_SECS, INSTANCE_TTL_AMOUNT,
    INSTANCE_TTL_THRESHOLD, ONE_TOKEN, ORACLE_DATASOURCE,
};
