use commodity_sale::{Error, FRESHNESS_WINDOW_SECS, ONE_TOKEN};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use crate::utils::constants::*;
use crate::utils::SaleFixture;
use crate::{assert_contract_error, assert_success};

#[test]
fn test_golden_purchase_end_to_end() {
    let f = SaleFixture::new();
    f.deliver_round(REFERENCE_CENTS, COMMODITY_RAW);
    let buyer = f.whitelisted_buyer();

    let tokens = f.sale.buy(&buyer, &ONE_TOKEN);

    assert_eq!(tokens, GOLDEN_TOKENS);
    assert_eq!(f.token.balance(&buyer), GOLDEN_TOKENS);
    assert_eq!(f.token.balance(&f.holder), HOLDER_SUPPLY - GOLDEN_TOKENS);
    assert_eq!(f.payment.balance(&f.wallet), ONE_TOKEN);
    assert_eq!(f.payment.balance(&buyer), BUYER_FUNDS - ONE_TOKEN);
    assert_eq!(f.sale.total_payment_raised(), ONE_TOKEN);
    assert_eq!(f.sale.total_value_raised(), 4_600_000_000);
}

#[test]
fn test_daily_poll_loop_keeps_prices_fresh_until_fees_run_out() {
    let f = SaleFixture::new();
    f.oracle.set_fee(&100);
    f.fund_fees(700);
    let buyer = f.whitelisted_buyer();

    // Day 0: manual round, re-armed on delivery.
    let next = f.deliver_round(REFERENCE_CENTS, COMMODITY_RAW);
    assert_eq!(f.oracle.issued().len(), next + 2);
    assert_eq!(f.oracle.last_timeout(), DAY);
    assert_eq!(f.sale.buy(&buyer, &ONE_TOKEN), GOLDEN_TOKENS);

    // Day 1: the oracle answers the re-armed round, which re-arms again.
    f.advance(DAY);
    f.answer(next, 50_000, 4_000_000);
    assert_eq!(f.oracle.issued().len(), next + 4);
    assert_eq!(f.sale.buy(&buyer, &ONE_TOKEN), 1_250_000_000);

    // Day 2: the float is down to one fee, so the loop stops here.
    f.advance(DAY);
    f.answer(next + 2, 40_000, 5_000_000);
    assert_eq!(f.oracle.issued().len(), next + 4);
    assert_eq!(f.sale.buy(&buyer, &ONE_TOKEN), 800_000_000);

    assert_eq!(f.payment.balance(&f.oracle_id), 600);
    assert_eq!(f.payment.balance(&f.sale_id), 100);
    assert_eq!(f.sale.total_payment_raised(), 3 * ONE_TOKEN);
    assert_eq!(f.sale.total_value_raised(), 13_600_000_000);
    assert_eq!(
        f.token.balance(&buyer),
        GOLDEN_TOKENS + 1_250_000_000 + 800_000_000
    );

    // Nobody answers any more: prices go stale.
    f.advance(FRESHNESS_WINDOW_SECS + 1);
    assert!(!f.sale.is_fresh());
    assert_contract_error!(f.sale.try_buy(&buyer, &ONE_TOKEN), Error::StalePrice);

    // Topping up the float lets the owner restart the loop.
    assert!(!f.sale.request_update(&f.owner, &0));
    f.fund_fees(1_000);
    f.deliver_round(REFERENCE_CENTS, COMMODITY_RAW);
    assert_success!(f.sale.try_buy(&buyer, &ONE_TOKEN));
}

#[test]
fn test_owner_refresh_mid_loop_keeps_a_single_loop() {
    let f = SaleFixture::new();
    let first_rearm = f.deliver_round(REFERENCE_CENTS, COMMODITY_RAW);

    // Owner refreshes a minute later; the re-armed round is superseded.
    f.advance(60);
    let second_rearm = f.deliver_round(REFERENCE_CENTS, COMMODITY_RAW);
    assert_eq!(second_rearm, first_rearm + 4);
    assert_eq!(f.oracle.issued().len(), second_rearm + 2);

    let ids = f.oracle.issued();
    assert_contract_error!(
        f.sale
            .try_on_price_delivered(&f.oracle_id, &ids.get_unchecked(first_rearm), &REFERENCE_CENTS),
        Error::UnknownCallback
    );

    // Next day only the live round answers, and it re-arms exactly once.
    f.advance(DAY);
    f.answer(second_rearm, REFERENCE_CENTS, COMMODITY_RAW);
    assert_eq!(f.oracle.issued().len(), second_rearm + 4);
}

#[test]
fn test_late_commodity_answer_breaks_the_loop() {
    let f = SaleFixture::new();
    let before = f.oracle.issued().len();
    assert!(f.sale.request_update(&f.owner, &0));

    let ids = f.oracle.issued();
    f.sale
        .on_price_delivered(&f.oracle_id, &ids.get_unchecked(before), &REFERENCE_CENTS);
    f.advance(301);
    f.sale.on_price_delivered(
        &f.oracle_id,
        &ids.get_unchecked(before + 1),
        &COMMODITY_RAW,
    );

    assert_eq!(f.oracle.issued().len(), before + 2);
    assert!(f.sale.is_fresh());
}

#[test]
fn test_pause_finish_and_withdraw_float() {
    let f = SaleFixture::new();
    f.fund_fees(500);
    f.deliver_round(REFERENCE_CENTS, COMMODITY_RAW);
    let buyer = f.whitelisted_buyer();

    f.sale.pause(&f.owner);
    assert_contract_error!(f.sale.try_buy(&buyer, &ONE_TOKEN), Error::InvalidState);
    f.sale.unpause(&f.owner);
    f.sale.buy(&buyer, &ONE_TOKEN);

    let partner = Address::generate(&f.env);
    f.sale.buy_for(&f.owner, &partner, &(2 * ONE_TOKEN));
    assert_eq!(f.token.balance(&partner), 2_329_113_924);
    assert_eq!(f.payment.balance(&f.wallet), ONE_TOKEN);

    f.sale.finish_crowdsale(&f.owner);
    assert!(f.sale.is_finished());
    assert_contract_error!(f.sale.try_buy(&buyer, &ONE_TOKEN), Error::InvalidState);
    assert_contract_error!(
        f.sale.try_buy_for(&f.owner, &partner, &ONE_TOKEN),
        Error::InvalidState
    );
    assert_eq!(f.sale.total_payment_raised(), 3 * ONE_TOKEN);

    // Whatever fee float is left can still be recovered.
    assert_contract_error!(
        f.sale.try_withdraw(&f.owner, &f.wallet, &501),
        Error::InsufficientFunds
    );
    f.sale.withdraw(&f.owner, &f.wallet, &500);
    assert_eq!(f.payment.balance(&f.sale_id), 0);
    assert_eq!(f.payment.balance(&f.wallet), ONE_TOKEN + 500);
}

#[test]
fn test_ownership_handover_then_new_owner_finishes() {
    let f = SaleFixture::new();
    let successor = Address::generate(&f.env);

    f.sale.transfer_ownership(&f.owner, &successor);
    assert_eq!(f.sale.owner(), f.owner);
    assert_eq!(f.sale.pending_owner(), Some(successor.clone()));

    f.sale.claim_ownership(&successor);
    assert_eq!(f.sale.owner(), successor);
    assert_eq!(f.sale.pending_owner(), None);

    assert_contract_error!(f.sale.try_pause(&f.owner), Error::Unauthorized);
    assert_contract_error!(
        f.sale.try_finish_crowdsale(&f.owner),
        Error::Unauthorized
    );

    let buyer = Address::generate(&f.env);
    f.sale.add_to_whitelist(&successor, &buyer);
    assert!(f.sale.is_whitelisted(&buyer));

    f.sale.finish_crowdsale(&successor);
    assert!(f.sale.is_finished());
}

#[test]
fn test_removed_buyer_cannot_purchase() {
    let f = SaleFixture::new();
    f.deliver_round(REFERENCE_CENTS, COMMODITY_RAW);
    let buyer = f.whitelisted_buyer();
    f.sale.buy(&buyer, &ONE_TOKEN);

    f.sale.remove_from_whitelist(&f.owner, &buyer);
    assert_contract_error!(f.sale.try_buy(&buyer, &ONE_TOKEN), Error::Unauthorized);
    assert_eq!(f.sale.total_payment_raised(), ONE_TOKEN);
}
