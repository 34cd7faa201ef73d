#![no_std]

//! # Bond Depository Contract
//!
//! Sells time-vested bonds against independently priced markets. Each
//! market's effective price tracks its debt ratio: outstanding debt decays
//! linearly between touches, and a control variable is retuned at most once
//! per tune interval to keep the remaining capacity on pace to sell out at
//! the market's conclusion. No keeper is required; all time-gated state is
//! recomputed lazily from `(stored state, now)` when a deposit arrives.
//!
//! Quote tokens flow to the treasury, which mints the payout to this
//! contract under its `RewardManager` flag. Payouts vest linearly and are
//! redeemable in partial claims.

use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol};

mod errors;
pub mod pricing;
pub mod types;

use errors::*;
use pricing::{debt_decay, market_price, payout_for, BUFFER_SCALE};
use reserve_authority::ReserveAuthorityClient;
use reserve_treasury::ReserveTreasuryClient;
use types::{Bond, CreateMarketParams, DataKey, Market, Metadata, Terms};


#[cfg(test)]
mod test_market;



// ─── Helpers ───────────────────────────────────────────────────────────────

fn require_policy(e: &Env, caller: &Address) {
    caller.require_auth();
    let authority: Address = e
        .storage()
        .instance()
        .get(&DataKey::Authority)
        .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
    if !ReserveAuthorityClient::new(e, &authority).is_policy(caller) {
        panic!("{}", ERR_NOT_POLICY);
    }
}

fn load_market(e: &Env, id: u32) -> (Market, Terms, Metadata) {
    let market: Market = e
        .storage()
        .persistent()
        .get(&DataKey::Market(id))
        .unwrap_or_else(|| panic!("{}", ERR_MARKET_NOT_FOUND));
    let terms: Terms = e
        .storage()
        .persistent()
        .get(&DataKey::Terms(id))
        .unwrap_or_else(|| panic!("{}", ERR_MARKET_NOT_FOUND));
    let meta: Metadata = e
        .storage()
        .persistent()
        .get(&DataKey::Meta(id))
        .unwrap_or_else(|| panic!("{}", ERR_MARKET_NOT_FOUND));
    (market, terms, meta)
}

fn store_market(e: &Env, id: u32, market: &Market, terms: &Terms, meta: &Metadata) {
    e.storage().persistent().set(&DataKey::Market(id), market);
    e.storage().persistent().set(&DataKey::Terms(id), terms);
    e.storage().persistent().set(&DataKey::Meta(id), meta);
}

/// Remaining capacity expressed in base (payout) units at `price`.
fn base_capacity(market: &Market, price: i128, quote_decimals: u32) -> i128 {
    if market.capacity_in_quote {
        payout_for(market.capacity, price, quote_decimals)
    } else {
        market.capacity
    }
}

/// Retune the control variable so the remaining capacity is on pace to
/// exhaust exactly at conclusion, and re-derive the per-interval payout
/// cap. Called at most once per tune interval.
fn tune(market: &mut Market, terms: &mut Terms, meta: &Metadata, now: u64) {
    let time_remaining = i128::from(terms.conclusion - now);
    let price = market_price(
        terms.control_variable,
        market.total_debt,
        market.target_debt,
        terms.min_price,
    );
    let capacity = base_capacity(market, price, meta.quote_decimals);

    market.max_payout = capacity * i128::from(meta.deposit_interval) / time_remaining;

    // Debt level that would hold the current price if sales were exactly
    // on schedule. Selling behind pace lowers the control variable,
    // selling ahead raises it.
    let tuned_debt = capacity * i128::from(meta.length) / time_remaining;
    if tuned_debt > 0 {
        terms.control_variable = price
            .checked_mul(market.target_debt)
            .expect("tune overflow")
            / tuned_debt;
    }
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct BondDepository;

#[contractimpl]
impl BondDepository {
    /// One-time initialization with the protocol wiring.
    pub fn initialize(e: Env, authority: Address, base_token: Address, treasury: Address) {
        if e.storage().instance().has(&DataKey::Authority) {
            panic!("{}", ERR_ALREADY_INITIALIZED);
        }
        e.storage().instance().set(&DataKey::Authority, &authority);
        e.storage().instance().set(&DataKey::BaseToken, &base_token);
        e.storage().instance().set(&DataKey::Treasury, &treasury);

        e.events().publish(
            (Symbol::new(&e, "depository_initialized"),),
            (authority, base_token, treasury),
        );
    }

    // ── Market lifecycle ───────────────────────────────────────────────────

    /// Open a new market. Policy only.
    pub fn create(e: Env, caller: Address, params: CreateMarketParams) -> u32 {
        require_policy(&e, &caller);

        let now = e.ledger().timestamp();
        if params.conclusion <= now {
            panic!("{}", ERR_INVALID_CONCLUSION);
        }
        if params.capacity <= 0 {
            panic!("{}", ERR_INVALID_CAPACITY);
        }
        if params.initial_price <= 0 {
            panic!("{}", ERR_INVALID_PRICE);
        }
        if params.deposit_interval == 0 || params.tune_interval == 0 {
            panic!("{}", ERR_INVALID_INTERVALS);
        }

        let quote_decimals = token::TokenClient::new(&e, &params.quote_token).decimals();
        let length = params.conclusion - now;

        let target_debt = if params.capacity_in_quote {
            payout_for(params.capacity, params.initial_price, quote_decimals)
        } else {
            params.capacity
        };
        // A quote capacity below one payout unit would leave every debt
        // ratio dividing by zero.
        if target_debt == 0 {
            panic!("{}", ERR_INVALID_CAPACITY);
        }
        let max_debt = target_debt
            + target_debt
                .checked_mul(i128::from(params.buffer))
                .expect("max debt overflow")
                / BUFFER_SCALE;

        let market = Market {
            quote_token: params.quote_token.clone(),
            capacity: params.capacity,
            capacity_in_quote: params.capacity_in_quote,
            // Starting at the target keeps the opening price at
            // initial_price: the debt ratio opens at exactly one.
            total_debt: target_debt,
            target_debt,
            max_payout: target_debt * i128::from(params.deposit_interval) / i128::from(length),
            max_debt,
            sold: 0,
            purchased: 0,
        };
        let terms = Terms {
            control_variable: params.initial_price,
            // Protocol floor: the price never decays below half the
            // opening price.
            min_price: params.initial_price / 2,
            vesting: params.vesting,
            fixed_term: params.fixed_term,
            conclusion: params.conclusion,
        };
        let meta = Metadata {
            last_tune: now,
            last_decay: now,
            length,
            deposit_interval: params.deposit_interval,
            tune_interval: params.tune_interval,
            quote_decimals,
        };

        let id: u32 = e.storage().instance().get(&DataKey::MarketCount).unwrap_or(0);
        e.storage()
            .instance()
            .set(&DataKey::MarketCount, &(id + 1));
        store_market(&e, id, &market, &terms, &meta);

        e.events().publish(
            (Symbol::new(&e, "market_created"), id),
            (params.quote_token, params.capacity, params.initial_price),
        );
        id
    }

    /// Stop a market from selling by zeroing its capacity. Policy only.
    pub fn close(e: Env, caller: Address, market_id: u32) {
        require_policy(&e, &caller);

        let (mut market, terms, meta) = load_market(&e, market_id);
        market.capacity = 0;
        store_market(&e, market_id, &market, &terms, &meta);

        e.events()
            .publish((Symbol::new(&e, "market_closed"), market_id), ());
    }

    // ── Deposits ───────────────────────────────────────────────────────────

    /// Buy a bond from `market_id`. Decays debt for the elapsed time,
    /// retunes if a tune interval has passed, then prices the deposit.
    /// Rejects slippage above `max_price`, deposits above the per-interval
    /// payout cap, capacity exhaustion and debt-ceiling breach. Returns
    /// `(payout, bond_id)`.
    pub fn deposit(
        e: Env,
        depositor: Address,
        recipient: Address,
        market_id: u32,
        amount: i128,
        max_price: i128,
    ) -> (i128, u64) {
        depositor.require_auth();

        let (mut market, mut terms, mut meta) = load_market(&e, market_id);
        let now = e.ledger().timestamp();

        if amount <= 0 {
            panic!("{}", ERR_INVALID_AMOUNT);
        }
        if now >= terms.conclusion {
            panic!("{}", ERR_MARKET_CONCLUDED);
        }

        // Lazy recompute: burn off elapsed debt, then retune at most once
        // per tune interval.
        market.total_debt -= debt_decay(market.total_debt, now - meta.last_decay, meta.length);
        meta.last_decay = now;
        if now >= meta.last_tune + meta.tune_interval {
            tune(&mut market, &mut terms, &meta, now);
            meta.last_tune = now;
        }

        let price = market_price(
            terms.control_variable,
            market.total_debt,
            market.target_debt,
            terms.min_price,
        );
        if price > max_price {
            panic!("{}", ERR_MAX_PRICE);
        }

        let payout = payout_for(amount, price, meta.quote_decimals);
        if payout == 0 {
            panic!("{}", ERR_ZERO_PAYOUT);
        }
        if payout > market.max_payout {
            panic!("{}", ERR_MAX_SIZE);
        }

        let capacity_delta = if market.capacity_in_quote { amount } else { payout };
        if capacity_delta > market.capacity {
            panic!("{}", ERR_CAPACITY_EXCEEDED);
        }
        market.capacity -= capacity_delta;

        market.total_debt = market
            .total_debt
            .checked_add(payout)
            .expect("debt overflow");
        if market.total_debt > market.max_debt {
            panic!("{}", ERR_MAX_DEBT);
        }
        market.sold += payout;
        market.purchased += amount;

        let term = if terms.fixed_term {
            terms.vesting
        } else {
            terms.vesting.saturating_sub(now)
        };
        let bond = Bond {
            owner: recipient.clone(),
            market_id,
            amount,
            payout,
            vesting_start: now,
            term,
            claimed: 0,
        };
        let bond_id: u64 = e.storage().instance().get(&DataKey::BondCount).unwrap_or(0);
        e.storage()
            .instance()
            .set(&DataKey::BondCount, &(bond_id + 1));
        e.storage().persistent().set(&DataKey::Bond(bond_id), &bond);

        // All invariant-critical state is final before the external calls;
        // a re-entrant observer sees a consistent market.
        store_market(&e, market_id, &market, &terms, &meta);

        let me = e.current_contract_address();
        let treasury: Address = e
            .storage()
            .instance()
            .get(&DataKey::Treasury)
            .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
        token::TokenClient::new(&e, &market.quote_token)
            .transfer_from(&me, &depositor, &treasury, &amount);
        ReserveTreasuryClient::new(&e, &treasury).mint_reward(&me, &me, &payout);

        e.events().publish(
            (Symbol::new(&e, "bond_created"), market_id, bond_id),
            (recipient, amount, payout),
        );

        (payout, bond_id)
    }

    // ── Redemption ─────────────────────────────────────────────────────────

    /// Redeem the vested portion of a bond. Vesting is linear over the
    /// bond's term; partial claims are allowed and tracked.
    pub fn redeem(e: Env, bond_id: u64) -> i128 {
        let mut bond: Bond = e
            .storage()
            .persistent()
            .get(&DataKey::Bond(bond_id))
            .unwrap_or_else(|| panic!("{}", ERR_BOND_NOT_FOUND));
        bond.owner.require_auth();

        if bond.claimed >= bond.payout {
            panic!("{}", ERR_FULLY_REDEEMED);
        }

        let now = e.ledger().timestamp();
        let elapsed = now.saturating_sub(bond.vesting_start);
        let vested = if bond.term == 0 || elapsed >= bond.term {
            bond.payout
        } else {
            bond.payout * i128::from(elapsed) / i128::from(bond.term)
        };
        let claimable = vested - bond.claimed;
        if claimable == 0 {
            panic!("{}", ERR_NOTHING_VESTED);
        }

        bond.claimed += claimable;
        e.storage().persistent().set(&DataKey::Bond(bond_id), &bond);

        let me = e.current_contract_address();
        let base: Address = e
            .storage()
            .instance()
            .get(&DataKey::BaseToken)
            .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
        token::TokenClient::new(&e, &base).transfer(&me, &bond.owner, &claimable);

        e.events().publish(
            (Symbol::new(&e, "bond_redeemed"), bond_id),
            (bond.owner.clone(), claimable),
        );

        claimable
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn get_market(e: Env, market_id: u32) -> Market {
        load_market(&e, market_id).0
    }

    pub fn get_terms(e: Env, market_id: u32) -> Terms {
        load_market(&e, market_id).1
    }

    pub fn get_metadata(e: Env, market_id: u32) -> Metadata {
        load_market(&e, market_id).2
    }

    pub fn get_bond(e: Env, bond_id: u64) -> Bond {
        e.storage()
            .persistent()
            .get(&DataKey::Bond(bond_id))
            .unwrap_or_else(|| panic!("{}", ERR_BOND_NOT_FOUND))
    }

    /// Price a deposit would pay right now, simulating the pending decay
    /// without mutating anything.
    pub fn current_price(e: Env, market_id: u32) -> i128 {
        let (market, terms, meta) = load_market(&e, market_id);
        let now = e.ledger().timestamp();
        let debt = market.total_debt
            - debt_decay(
                market.total_debt,
                now.saturating_sub(meta.last_decay),
                meta.length,
            );
        market_price(terms.control_variable, debt, market.target_debt, terms.min_price)
    }

    /// Outstanding debt relative to the sell-out target, 9-decimal fixed
    /// point, after simulating the pending decay.
    pub fn debt_ratio(e: Env, market_id: u32) -> i128 {
        let (market, _terms, meta) = load_market(&e, market_id);
        let now = e.ledger().timestamp();
        let debt = market.total_debt
            - debt_decay(
                market.total_debt,
                now.saturating_sub(meta.last_decay),
                meta.length,
            );
        pricing::debt_ratio(debt, market.target_debt)
    }

    /// True while the market still has capacity and has not concluded.
    pub fn is_live(e: Env, market_id: u32) -> bool {
        let (market, terms, _meta) = load_market(&e, market_id);
        market.capacity > 0 && e.ledger().timestamp() < terms.conclusion
    }
}
