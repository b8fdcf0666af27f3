use soroban_sdk::{log, token, Address, BytesN, Env};

use crate::errors::Error;
use crate::events;
use crate::oracle::PriceOracleClient;
use crate::storage::*;
use crate::types::*;

impl Feed {
    pub fn partner(self) -> Feed {
        match self {
            Feed::Reference => Feed::Commodity,
            Feed::Commodity => Feed::Reference,
        }
    }
}

impl PriceFeed {
    /// Both feeds observed and neither older than the freshness window.
    pub fn is_fresh(&self, now: u64) -> bool {
        let within = |at: Option<u64>| match at {
            Some(at) => now.saturating_sub(at) <= FRESHNESS_WINDOW_SECS,
            None => false,
        };
        within(self.last_reference_update) && within(self.last_commodity_update)
    }

    /// Both feeds landed within the coincidence window of each other.
    pub fn is_coincident(&self) -> bool {
        match (self.last_reference_update, self.last_commodity_update) {
            (Some(a), Some(b)) => a.abs_diff(b) <= COINCIDENCE_WINDOW_SECS,
            _ => false,
        }
    }

    /// Stores a delivered raw value and stamps it with `now`.
    pub fn record(&mut self, feed: Feed, raw_value: i128, now: u64) -> Result<(), Error> {
        if raw_value <= 0 {
            return Err(Error::InvalidArgument);
        }
        match feed {
            Feed::Reference => {
                self.reference_rate_cents = raw_value;
                self.last_reference_update = Some(now);
            }
            Feed::Commodity => {
                let scaled = raw_value / COMMODITY_FEED_DIVISOR;
                if scaled == 0 {
                    return Err(Error::InvalidArgument);
                }
                self.commodity_rate_cents = scaled;
                self.last_commodity_update = Some(now);
            }
        }
        Ok(())
    }
}

/// Asks the oracle for both rates. A fee the contract cannot cover is
/// reported through a `qry_fail` event and `false`, never an error, so the
/// next request can simply retry.
pub fn issue_queries(env: &Env, config: &SaleConfig, timeout: u64) -> bool {
    let oracle = PriceOracleClient::new(env, &config.oracle);
    let payment = token::Client::new(env, &config.payment_token);
    let this = env.current_contract_address();

    let fee = oracle.fee(&ORACLE_DATASOURCE);
    let needed = fee.saturating_mul(2);
    let balance = payment.balance(&this);
    if needed > balance {
        log!(env, "oracle query not sent, fee exceeds balance", needed, balance);
        events::emit_query_failed(env, needed, balance);
        return false;
    }

    for (feed, argument) in [
        (Feed::Reference, &config.reference_query),
        (Feed::Commodity, &config.commodity_query),
    ] {
        if fee > 0 {
            payment.transfer(&this, &config.oracle, &fee);
        }
        let query_id = oracle.query(&ORACLE_DATASOURCE, argument, &timeout);
        set_pending_query(env, feed, &query_id);
        events::emit_query_sent(env, feed, query_id, timeout);
    }
    true
}

pub fn request_update(env: &Env, timeout: u64) -> Result<bool, Error> {
    let config = get_config(env)?;
    Ok(issue_queries(env, &config, timeout))
}

/// Scheduler trigger run by the delivery that completes a round, once both
/// feeds agree in time. Keeps the poll loop going without an outside scheduler.
fn schedule_next_poll(env: &Env, config: &SaleConfig) {
    log!(env, "feeds coincide, re-arming poll");
    issue_queries(env, config, DEFAULT_POLL_INTERVAL_SECS);
}

pub fn on_price_delivered(
    env: &Env,
    caller: &Address,
    query_id: &BytesN<32>,
    raw_value: i128,
) -> Result<(), Error> {
    caller.require_auth();
    let config = get_config(env)?;
    if *caller != config.oracle {
        return Err(Error::Unauthorized);
    }
    let feed = find_pending_feed(env, query_id).ok_or(Error::UnknownCallback)?;

    let mut prices = get_price_feed(env);
    prices.record(feed, raw_value, env.ledger().timestamp())?;
    remove_pending_query(env, feed);
    set_price_feed(env, &prices);
    extend_instance_ttl(env);
    events::emit_price_updated(
        env,
        prices.reference_rate_cents,
        prices.commodity_rate_cents,
    );

    // Only the second answer of a round may re-arm; the first one still has
    // its partner outstanding.
    let completes_round = get_pending_query(env, feed.partner()).is_none();
    if completes_round && prices.is_coincident() {
        schedule_next_poll(env, &config);
    }
    Ok(())
}
