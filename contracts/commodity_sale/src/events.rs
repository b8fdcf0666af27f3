use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

use crate::types::Feed;

// Event payloads published under the ("SALE", symbol_short!(..)) topic pair.

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct OwnershipEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct WhitelistEvent {
    pub account: Address,
    pub listed: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct QuerySentEvent {
    pub feed: Feed,
    pub query_id: BytesN<32>,
    pub timeout: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct QueryFailedEvent {
    pub fee_needed: i128,
    pub balance: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PriceUpdatedEvent {
    pub reference_rate_cents: i128,
    pub commodity_rate_cents: i128,
    pub timestamp: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PurchaseEvent {
    pub purchaser: Address,
    pub payment_amount: i128,
    pub token_amount: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleFinishedEvent {
    pub total_payment: i128,
    pub total_value: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FundsEvent {
    pub account: Address,
    pub amount: i128,
}

pub fn emit_initialized(env: &Env, owner: Address) {
    env.events()
        .publish(("SALE", symbol_short!("init")), owner);
}

pub fn emit_ownership_proposed(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        ("SALE", symbol_short!("own_prop")),
        OwnershipEvent {
            previous_owner,
            new_owner,
        },
    );
}

pub fn emit_ownership_cancelled(env: &Env, owner: Address, pending_owner: Address) {
    env.events().publish(
        ("SALE", symbol_short!("own_cncl")),
        OwnershipEvent {
            previous_owner: owner,
            new_owner: pending_owner,
        },
    );
}

pub fn emit_ownership_changed(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        ("SALE", symbol_short!("own_chg")),
        OwnershipEvent {
            previous_owner,
            new_owner,
        },
    );
}

pub fn emit_paused(env: &Env) {
    env.events().publish(("SALE", symbol_short!("paused")), ());
}

pub fn emit_unpaused(env: &Env) {
    env.events().publish(("SALE", symbol_short!("unpaused")), ());
}

pub fn emit_whitelist_changed(env: &Env, account: Address, listed: bool) {
    let topic = if listed {
        symbol_short!("wl_add")
    } else {
        symbol_short!("wl_rm")
    };
    env.events()
        .publish(("SALE", topic), WhitelistEvent { account, listed });
}

pub fn emit_query_sent(env: &Env, feed: Feed, query_id: BytesN<32>, timeout: u64) {
    env.events().publish(
        ("SALE", symbol_short!("qry_sent")),
        QuerySentEvent {
            feed,
            query_id,
            timeout,
        },
    );
}

pub fn emit_query_failed(env: &Env, fee_needed: i128, balance: i128) {
    env.events().publish(
        ("SALE", symbol_short!("qry_fail")),
        QueryFailedEvent {
            fee_needed,
            balance,
        },
    );
}

pub fn emit_price_updated(env: &Env, reference_rate_cents: i128, commodity_rate_cents: i128) {
    env.events().publish(
        ("SALE", symbol_short!("price_upd")),
        PriceUpdatedEvent {
            reference_rate_cents,
            commodity_rate_cents,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn emit_purchase(env: &Env, purchaser: Address, payment_amount: i128, token_amount: i128) {
    env.events().publish(
        ("SALE", symbol_short!("purchase")),
        PurchaseEvent {
            purchaser,
            payment_amount,
            token_amount,
        },
    );
}

pub fn emit_finished(env: &Env, total_payment: i128, total_value: i128) {
    env.events().publish(
        ("SALE", symbol_short!("finished")),
        SaleFinishedEvent {
            total_payment,
            total_value,
        },
    );
}

pub fn emit_withdrawal(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        ("SALE", symbol_short!("withdraw")),
        FundsEvent { account, amount },
    );
}

pub fn emit_credit(env: &Env, account: Address, amount: i128) {
    env.events()
        .publish(("SALE", symbol_short!("credit")), FundsEvent { account, amount });
}

pub fn emit_tokens_transferred(env: &Env, account: Address, amount: i128) {
    env.events().publish(
        ("SALE", symbol_short!("tok_xfer")),
        FundsEvent { account, amount },
    );
}

pub fn emit_wallet_changed(env: &Env, wallet: Address) {
    env.events().publish(("SALE", symbol_short!("wallet")), wallet);
}

pub fn emit_oracle_changed(env: &Env, oracle: Address) {
    env.events().publish(("SALE", symbol_short!("oracle")), oracle);
}
