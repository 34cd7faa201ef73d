#![cfg(test)]

use crate::test_helpers::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

#[test]
fn create_derives_debt_terms_from_capacity() {
    let e = Env::default();
    let s = setup(&e);

    let id = s.depository.create(&s.policy, &default_params(&e, &s.quote));
    assert_eq!(id, 0);

    let market = s.depository.get_market(&id);
    assert_eq!(market.capacity, CAPACITY);
    assert_eq!(market.target_debt, CAPACITY);
    assert_eq!(market.total_debt, CAPACITY);
    // capacity * deposit_interval / length
    assert_eq!(market.max_payout, 1_666_666_666_666);
    // target plus the 200% buffer
    assert_eq!(market.max_debt, 30_000_000_000_000);
    assert_eq!(market.sold, 0);
    assert_eq!(market.purchased, 0);

    let terms = s.depository.get_terms(&id);
    assert_eq!(terms.control_variable, INITIAL_PRICE);
    assert_eq!(terms.min_price, INITIAL_PRICE / 2);
    assert_eq!(terms.conclusion, T0 + ONE_DAY);

    let meta = s.depository.get_metadata(&id);
    assert_eq!(meta.last_tune, T0);
    assert_eq!(meta.last_decay, T0);
    assert_eq!(meta.length, ONE_DAY);
    assert_eq!(meta.quote_decimals, 7);
}

#[test]
fn market_ids_are_sequential() {
    let e = Env::default();
    let s = setup(&e);

    assert_eq!(s.depository.create(&s.policy, &default_params(&e, &s.quote)), 0);
    assert_eq!(s.depository.create(&s.policy, &default_params(&e, &s.quote)), 1);
}

#[test]
#[should_panic(expected = "caller is not the policy")]
fn create_rejects_non_policy() {
    let e = Env::default();
    let s = setup(&e);

    let outsider = Address::generate(&e);
    s.depository.create(&outsider, &default_params(&e, &s.quote));
}

#[test]
#[should_panic(expected = "conclusion must be in the future")]
fn create_rejects_past_conclusion() {
    let e = Env::default();
    let s = setup(&e);

    let mut params = default_params(&e, &s.quote);
    params.conclusion = T0;
    s.depository.create(&s.policy, &params);
}

#[test]
#[should_panic(expected = "capacity must be positive")]
fn create_rejects_zero_capacity() {
    let e = Env::default();
    let s = setup(&e);

    let mut params = default_params(&e, &s.quote);
    params.capacity = 0;
    s.depository.create(&s.policy, &params);
}

#[test]
#[should_panic(expected = "capacity must be positive")]
fn create_rejects_quote_capacity_below_one_payout_unit() {
    let e = Env::default();
    let s = setup(&e);

    // One stroop of quote converts to zero base units at the opening
    // price, which would zero the debt-ratio denominator.
    let mut params = default_params(&e, &s.quote);
    params.capacity = 1;
    params.capacity_in_quote = true;
    s.depository.create(&s.policy, &params);
}

#[test]
#[should_panic(expected = "initial price must be positive")]
fn create_rejects_zero_price() {
    let e = Env::default();
    let s = setup(&e);

    let mut params = default_params(&e, &s.quote);
    params.initial_price = 0;
    s.depository.create(&s.policy, &params);
}

#[test]
#[should_panic(expected = "intervals must be positive")]
fn create_rejects_zero_deposit_interval() {
    let e = Env::default();
    let s = setup(&e);

    let mut params = default_params(&e, &s.quote);
    params.deposit_interval = 0;
    s.depository.create(&s.policy, &params);
}

#[test]
fn price_decays_linearly_to_the_floor() {
    let e = Env::default();
    let s = setup(&e);
    let id = s.depository.create(&s.policy, &default_params(&e, &s.quote));

    assert_eq!(s.depository.current_price(&id), 400_000_000_000);

    // A quarter of the window burns a quarter of the debt.
    jump(&e, 21_600);
    assert_eq!(s.depository.current_price(&id), 300_000_000_000);

    // Halfway down the price meets the floor.
    jump(&e, 21_600);
    assert_eq!(s.depository.current_price(&id), 200_000_000_000);

    // The floor holds even as the debt keeps decaying.
    jump(&e, 21_600);
    assert_eq!(s.depository.current_price(&id), 200_000_000_000);
}

#[test]
fn debt_ratio_simulates_pending_decay() {
    let e = Env::default();
    let s = setup(&e);
    let id = s.depository.create(&s.policy, &default_params(&e, &s.quote));

    assert_eq!(s.depository.debt_ratio(&id), 1_000_000_000);
    jump(&e, 21_600);
    assert_eq!(s.depository.debt_ratio(&id), 750_000_000);
}

#[test]
fn close_zeroes_capacity_and_kills_liveness() {
    let e = Env::default();
    let s = setup(&e);
    let id = s.depository.create(&s.policy, &default_params(&e, &s.quote));
    assert!(s.depository.is_live(&id));

    s.depository.close(&s.policy, &id);

    assert_eq!(s.depository.get_market(&id).capacity, 0);
    assert!(!s.depository.is_live(&id));
}

#[test]
#[should_panic(expected = "caller is not the policy")]
fn close_rejects_non_policy() {
    let e = Env::default();
    let s = setup(&e);
    let id = s.depository.create(&s.policy, &default_params(&e, &s.quote));

    s.depository.close(&s.governor, &id);
}

#[test]
fn market_concludes_on_schedule() {
    let e = Env::default();
    let s = setup(&e);
    let id = s.depository.create(&s.policy, &default_params(&e, &s.quote));

    jump(&e, ONE_DAY - 1);
    assert!(s.depository.is_live(&id));
    jump(&e, 1);
    assert!(!s.depository.is_live(&id));
}

#[test]
#[should_panic(expected = "market not found")]
fn unknown_market_panics() {
    let e = Env::default();
    let s = setup(&e);

    s.depository.get_market(&7);
}

#[test]
#[should_panic(expected = "already initialized")]
fn initialize_is_one_shot() {
    let e = Env::default();
    let s = setup(&e);

    s.depository
        .initialize(&s.treasury_id, &s.base, &s.treasury_id);
}
