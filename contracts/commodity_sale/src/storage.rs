use crate::errors::Error;
use crate::types::*;
use soroban_sdk::{Address, BytesN, Env};

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<SaleConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_ownership(env: &Env) -> Result<Ownership, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Ownership)
        .ok_or(Error::NotInitialized)
}

pub fn set_ownership(env: &Env, ownership: &Ownership) {
    env.storage().instance().set(&DataKey::Ownership, ownership);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn is_finished(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Finished)
        .unwrap_or(false)
}

pub fn set_finished(env: &Env) {
    env.storage().instance().set(&DataKey::Finished, &true);
}

pub fn get_total_payment_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalPaymentRaised)
        .unwrap_or(0)
}

pub fn set_total_payment_raised(env: &Env, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalPaymentRaised, &amount);
}

pub fn get_total_value_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalValueRaised)
        .unwrap_or(0)
}

pub fn set_total_value_raised(env: &Env, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalValueRaised, &amount);
}

pub fn get_price_feed(env: &Env) -> PriceFeed {
    env.storage()
        .instance()
        .get(&DataKey::PriceFeed)
        .unwrap_or_default()
}

pub fn set_price_feed(env: &Env, feed: &PriceFeed) {
    env.storage().instance().set(&DataKey::PriceFeed, feed);
}

pub fn is_whitelisted(env: &Env, who: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Whitelisted(who.clone()))
        .unwrap_or(false)
}

pub fn set_whitelisted(env: &Env, who: &Address, listed: bool) {
    let key = DataKey::Whitelisted(who.clone());
    if listed {
        env.storage().persistent().set(&key, &true);
    } else {
        env.storage().persistent().remove(&key);
    }
}

/// Outstanding query id for `feed`. A new request replaces it, so an id
/// the oracle never answered stops being accepted.
pub fn get_pending_query(env: &Env, feed: Feed) -> Option<BytesN<32>> {
    env.storage().instance().get(&DataKey::PendingQuery(feed))
}

pub fn set_pending_query(env: &Env, feed: Feed, query_id: &BytesN<32>) {
    env.storage()
        .instance()
        .set(&DataKey::PendingQuery(feed), query_id);
}

pub fn remove_pending_query(env: &Env, feed: Feed) {
    env.storage().instance().remove(&DataKey::PendingQuery(feed));
}

pub fn find_pending_feed(env: &Env, query_id: &BytesN<32>) -> Option<Feed> {
    [Feed::Reference, Feed::Commodity]
        .into_iter()
        .find(|feed| get_pending_query(env, *feed).as_ref() == Some(query_id))
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}

pub fn extend_whitelist_ttl(env: &Env, who: &Address) {
    let key = DataKey::Whitelisted(who.clone());
    if env.storage().persistent().has(&key) {
        env.storage()
            .persistent()
            .extend_ttl(&key, INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
    }
}
