use crate::access;
use crate::errors::Error;
use crate::events;
use crate::price_feed;
use crate::pricing::check_dust_floor;
use crate::storage::*;
use crate::types::*;
use soroban_sdk::{contract, contractimpl, contractmeta, log, token, Address, BytesN, Env, Vec};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Commodity-priced token sale with oracle fed rates"
);

#[contract]
pub struct CommoditySaleContract;

fn require_open(env: &Env) -> Result<(), Error> {
    if is_finished(env) || is_paused(env) {
        return Err(Error::InvalidState);
    }
    Ok(())
}

/// Prices the payment, books it, then delivers tokens out of the holder's
/// allowance. Totals are written before the ledger is called.
fn process_purchase(
    env: &Env,
    config: &SaleConfig,
    beneficiary: &Address,
    payment_amount: i128,
) -> Result<i128, Error> {
    let this = env.current_contract_address();
    if payment_amount <= 0 || *beneficiary == this {
        return Err(Error::InvalidArgument);
    }

    let prices = get_price_feed(env);
    if !prices.is_fresh(env.ledger().timestamp()) {
        return Err(Error::StalePrice);
    }
    let conversion = prices.convert(payment_amount)?;
    check_dust_floor(&conversion)?;

    let total_payment = get_total_payment_raised(env)
        .checked_add(payment_amount)
        .ok_or(Error::InvalidArgument)?;
    let total_value = get_total_value_raised(env)
        .checked_add(conversion.value_units)
        .ok_or(Error::InvalidArgument)?;
    set_total_payment_raised(env, total_payment);
    set_total_value_raised(env, total_value);
    extend_instance_ttl(env);

    token::Client::new(env, &config.token).transfer_from(
        &this,
        &config.token_holder,
        beneficiary,
        &conversion.token_units,
    );

    events::emit_purchase(
        env,
        beneficiary.clone(),
        payment_amount,
        conversion.token_units,
    );
    Ok(conversion.token_units)
}

#[contractimpl]
impl CommoditySaleContract {
    /// Initialize the sale. The sale starts open and unpaused with empty
    /// price feeds.
    pub fn initialize(env: Env, owner: Address, config: SaleConfig) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();

        set_config(&env, &config);
        set_ownership(&env, &Ownership::new(owner.clone()));
        set_paused(&env, false);
        set_total_payment_raised(&env, 0);
        set_total_value_raised(&env, 0);
        extend_instance_ttl(&env);

        events::emit_initialized(&env, owner);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Access gate
    // ------------------------------------------------------------------

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        access::transfer_ownership(&env, &caller, new_owner)
    }

    pub fn claim_ownership(env: Env, caller: Address) -> Result<(), Error> {
        access::claim_ownership(&env, &caller)
    }

    pub fn cancel_ownership_transfer(env: Env, caller: Address) -> Result<(), Error> {
        access::cancel_ownership_transfer(&env, &caller)
    }

    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        access::pause(&env, &caller)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        access::unpause(&env, &caller)
    }

    pub fn add_to_whitelist(env: Env, caller: Address, account: Address) -> Result<bool, Error> {
        let accounts = Vec::from_array(&env, [account]);
        access::update_whitelist(&env, &caller, &accounts, true)
    }

    pub fn remove_from_whitelist(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<bool, Error> {
        let accounts = Vec::from_array(&env, [account]);
        access::update_whitelist(&env, &caller, &accounts, false)
    }

    /// Returns true if at least one account was newly listed.
    pub fn add_many_to_whitelist(
        env: Env,
        caller: Address,
        accounts: Vec<Address>,
    ) -> Result<bool, Error> {
        access::update_whitelist(&env, &caller, &accounts, true)
    }

    /// Returns true if at least one account was delisted.
    pub fn remove_many_from_whitelist(
        env: Env,
        caller: Address,
        accounts: Vec<Address>,
    ) -> Result<bool, Error> {
        access::update_whitelist(&env, &caller, &accounts, false)
    }

    // ------------------------------------------------------------------
    // Price feed
    // ------------------------------------------------------------------

    /// Queries both rates. Returns false, without failing, when the contract
    /// cannot pay the oracle fee.
    pub fn request_update(env: Env, caller: Address, timeout: u64) -> Result<bool, Error> {
        access::require_owner(&env, &caller)?;
        price_feed::request_update(&env, timeout)
    }

    /// Oracle callback.
    pub fn on_price_delivered(
        env: Env,
        caller: Address,
        query_id: BytesN<32>,
        raw_value: i128,
    ) -> Result<(), Error> {
        price_feed::on_price_delivered(&env, &caller, &query_id, raw_value)
    }

    pub fn set_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        let mut config = get_config(&env)?;
        config.oracle = oracle.clone();
        set_config(&env, &config);
        events::emit_oracle_changed(&env, oracle);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Purchases
    // ------------------------------------------------------------------

    /// Direct purchase: the whitelisted buyer pays `payment_amount`, which is
    /// forwarded to the wallet once the tokens are out.
    pub fn buy(env: Env, buyer: Address, payment_amount: i128) -> Result<i128, Error> {
        buyer.require_auth();
        let config = get_config(&env)?;
        require_open(&env)?;
        if !is_whitelisted(&env, &buyer) {
            return Err(Error::Unauthorized);
        }
        extend_whitelist_ttl(&env, &buyer);

        let tokens = process_purchase(&env, &config, &buyer, payment_amount)?;

        token::Client::new(&env, &config.payment_token).transfer(
            &buyer,
            &config.wallet,
            &payment_amount,
        );
        Ok(tokens)
    }

    /// Owner credit for a payment settled off-channel. No funds move.
    pub fn buy_for(
        env: Env,
        caller: Address,
        beneficiary: Address,
        payment_amount: i128,
    ) -> Result<i128, Error> {
        access::require_owner(&env, &caller)?;
        let config = get_config(&env)?;
        require_open(&env)?;
        process_purchase(&env, &config, &beneficiary, payment_amount)
    }

    pub fn finish_crowdsale(env: Env, caller: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        if is_finished(&env) {
            return Err(Error::InvalidState);
        }
        set_finished(&env);

        let total_payment = get_total_payment_raised(&env);
        let total_value = get_total_value_raised(&env);
        log!(&env, "sale finished", total_payment, total_value);
        events::emit_finished(&env, total_payment, total_value);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Funds
    // ------------------------------------------------------------------

    /// Sends payment currency held by the sale (oracle fee float) to
    /// `beneficiary`.
    pub fn withdraw(
        env: Env,
        caller: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        if amount <= 0 {
            return Err(Error::InvalidArgument);
        }
        let config = get_config(&env)?;
        let payment = token::Client::new(&env, &config.payment_token);
        let this = env.current_contract_address();
        if payment.balance(&this) < amount {
            return Err(Error::InsufficientFunds);
        }

        events::emit_withdrawal(&env, beneficiary.clone(), amount);
        payment.transfer(&this, &beneficiary, &amount);
        Ok(())
    }

    /// Tops up the payment currency float used for oracle fees.
    pub fn credit_balance(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        if amount <= 0 {
            return Err(Error::InvalidArgument);
        }
        let config = get_config(&env)?;
        token::Client::new(&env, &config.payment_token).transfer(
            &caller,
            &env.current_contract_address(),
            &amount,
        );
        events::emit_credit(&env, caller, amount);
        Ok(())
    }

    /// Manual disbursement from the sale's own token balance, outside the
    /// pricing path.
    pub fn transfer_tokens(
        env: Env,
        caller: Address,
        beneficiary: Address,
        amount: i128,
    ) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        let this = env.current_contract_address();
        if amount <= 0 || beneficiary == this {
            return Err(Error::InvalidArgument);
        }
        let config = get_config(&env)?;
        let sale_token = token::Client::new(&env, &config.token);
        if sale_token.balance(&this) < amount {
            return Err(Error::InsufficientFunds);
        }

        events::emit_tokens_transferred(&env, beneficiary.clone(), amount);
        sale_token.transfer(&this, &beneficiary, &amount);
        Ok(())
    }

    pub fn set_wallet(env: Env, caller: Address, wallet: Address) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        let mut config = get_config(&env)?;
        config.wallet = wallet.clone();
        set_config(&env, &config);
        events::emit_wallet_changed(&env, wallet);
        Ok(())
    }

    // View functions
    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(get_ownership(&env)?.owner)
    }

    pub fn pending_owner(env: Env) -> Result<Option<Address>, Error> {
        Ok(get_ownership(&env)?.pending_owner)
    }

    pub fn is_paused(env: Env) -> bool {
        is_paused(&env)
    }

    pub fn is_whitelisted(env: Env, account: Address) -> bool {
        is_whitelisted(&env, &account)
    }

    pub fn is_fresh(env: Env) -> bool {
        get_price_feed(&env).is_fresh(env.ledger().timestamp())
    }

    pub fn price_feed(env: Env) -> PriceFeed {
        get_price_feed(&env)
    }

    pub fn pending_feed(env: Env, query_id: BytesN<32>) -> Option<Feed> {
        find_pending_feed(&env, &query_id)
    }

    pub fn pending_query(env: Env, feed: Feed) -> Option<BytesN<32>> {
        get_pending_query(&env, feed)
    }

    /// Token units `payment_amount` would buy at the stored rates, without
    /// the freshness gate or the dust floor.
    pub fn tokens_for(env: Env, payment_amount: i128) -> Result<i128, Error> {
        Ok(get_price_feed(&env).convert(payment_amount)?.token_units)
    }

    pub fn is_finished(env: Env) -> bool {
        is_finished(&env)
    }

    pub fn total_payment_raised(env: Env) -> i128 {
        get_total_payment_raised(&env)
    }

    pub fn total_value_raised(env: Env) -> i128 {
        get_total_value_raised(&env)
    }

    pub fn config(env: Env) -> Result<SaleConfig, Error> {
        get_config(&env)
    }
}
