#![no_std]

//! # Reserve Treasury Contract
//!
//! Values heterogeneous deposited assets in protocol-token units, tracks
//! capability flags for assets and actors, holds fungible reserves and
//! collectible custody, and mints the protocol token against deposits.
//!
//! ## Key design decisions
//!
//! - **Flags are a sparse mapping**: a (flag, address) pair that was never
//!   enabled simply does not exist in storage; absence means disabled.
//! - **Valuation dispatch is ordered**: liquidity valuator first, then
//!   risk-off override, then the decimal-rebased peg identity.
//! - **Checks-Effects-Interactions**: ledger totals are written before any
//!   token or collectible transfer leaves the contract.
//! - **Custody is ground truth**: collectible custody is decided by a live
//!   `owner_of` query, so pieces transferred in directly are still
//!   withdrawable by the governor.

use soroban_sdk::{
    contract, contractclient, contractimpl, token, Address, Env, Symbol,
};

mod errors;
pub mod nft;
pub mod types;

use errors::*;
use nft::NftClient;
use reserve_authority::ReserveAuthorityClient;
use types::{DataKey, StatusFlag};






/// Protocol token fixed-point precision.
pub const BASE_DECIMALS: u32 = 9;

/// Protocol tokens backed by one whole unit of the peg asset on the
/// default valuation path.
pub const PEG_RATE: i128 = 1_000;

/// Delegated valuation for liquidity-pool shares. The pool's live reserves
/// make the result time-varying; the treasury treats it as an untrusted
/// numeric input and never caches it across calls.
#[contractclient(name = "LiquidityValuatorClient")]
pub trait LiquidityValuator {
    fn valuation(env: Env, asset: Address, amount: i128) -> i128;
}

// ─── Helpers ───────────────────────────────────────────────────────────────

fn pow10(n: u32) -> i128 {
    10_i128.pow(n)
}

fn require_governor(e: &Env, caller: &Address) {
    caller.require_auth();
    let authority: Address = e
        .storage()
        .instance()
        .get(&DataKey::Authority)
        .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
    if !ReserveAuthorityClient::new(e, &authority).is_governor(caller) {
        panic!("{}", ERR_NOT_GOVERNOR);
    }
}

fn flag_enabled(e: &Env, flag: StatusFlag, subject: &Address) -> bool {
    e.storage()
        .persistent()
        .get(&DataKey::Status(flag, subject.clone()))
        .unwrap_or(false)
}

fn base_token(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&DataKey::BaseToken)
        .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED))
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct ReserveTreasury;

#[contractimpl]
impl ReserveTreasury {
    /// One-time initialization. The treasury must be (or become) the mint
    /// admin of `base_token` for deposits and rewards to work.
    pub fn initialize(e: Env, base_token: Address, authority: Address) {
        if e.storage().instance().has(&DataKey::BaseToken) {
            panic!("{}", ERR_ALREADY_INITIALIZED);
        }
        e.storage().instance().set(&DataKey::BaseToken, &base_token);
        e.storage().instance().set(&DataKey::Authority, &authority);
        e.storage()
            .instance()
            .set(&DataKey::TotalReserves, &0_i128);

        e.events().publish(
            (Symbol::new(&e, "treasury_initialized"),),
            (base_token, authority),
        );
    }

    // ── Status registry ────────────────────────────────────────────────────

    /// Enable a capability flag for `subject`. Governor only; the role is
    /// re-checked on every call. Enabling `LiquidityToken` binds the
    /// mandatory valuator for the pool asset.
    pub fn enable(
        e: Env,
        caller: Address,
        flag: StatusFlag,
        subject: Address,
        valuator: Option<Address>,
    ) {
        require_governor(&e, &caller);

        if flag == StatusFlag::LiquidityToken {
            let bound = valuator.unwrap_or_else(|| panic!("{}", ERR_VALUATOR_REQUIRED));
            e.storage()
                .persistent()
                .set(&DataKey::Valuator(subject.clone()), &bound);
        }

        e.storage()
            .persistent()
            .set(&DataKey::Status(flag.clone(), subject.clone()), &true);

        e.events()
            .publish((Symbol::new(&e, "status_enabled"),), (flag, subject));
    }

    /// Disable a capability flag for `subject`. Revokes all downstream
    /// privileges immediately. Disabling `RiskReserveToken` clears the
    /// stored valuation so a later re-enable starts from a clean slate;
    /// a stale valuator binding is left behind but never consulted while
    /// the flag is off.
    pub fn disable(e: Env, caller: Address, flag: StatusFlag, subject: Address) {
        require_governor(&e, &caller);

        e.storage()
            .persistent()
            .remove(&DataKey::Status(flag.clone(), subject.clone()));

        if flag == StatusFlag::RiskReserveToken {
            e.storage()
                .persistent()
                .remove(&DataKey::RiskOffValuation(subject.clone()));
        }

        e.events()
            .publish((Symbol::new(&e, "status_disabled"),), (flag, subject));
    }

    /// Pure flag lookup. Absence means disabled.
    pub fn is_enabled(e: Env, flag: StatusFlag, subject: Address) -> bool {
        flag_enabled(&e, flag, &subject)
    }

    // ── Valuation engine ───────────────────────────────────────────────────

    /// Set the risk-off valuation for `asset`, in protocol token units per
    /// whole asset unit. Requires the governor role and an enabled
    /// `RiskReserveToken` flag on the asset; the flag requirement holds
    /// both before the first set and after a later disable.
    pub fn set_risk_off_valuation(e: Env, caller: Address, asset: Address, value: i128) {
        require_governor(&e, &caller);

        if !flag_enabled(&e, StatusFlag::RiskReserveToken, &asset) {
            panic!("{}", ERR_RISK_PERMISSION);
        }

        e.storage()
            .persistent()
            .set(&DataKey::RiskOffValuation(asset.clone()), &value);

        e.events()
            .publish((Symbol::new(&e, "risk_off_valuation_set"),), (asset, value));
    }

    /// The last risk-off valuation set for `asset`, or zero if none.
    pub fn risk_off_valuation(e: Env, asset: Address) -> i128 {
        e.storage()
            .persistent()
            .get(&DataKey::RiskOffValuation(asset))
            .unwrap_or(0)
    }

    /// Protocol-token-equivalent value of `amount` of `asset`. Dispatch
    /// order, first match wins:
    ///
    /// 1. liquidity token: delegate to the bound valuator;
    /// 2. risk reserve token with a valuation set: the override price;
    /// 3. otherwise: peg-equivalent decimal rebasing.
    ///
    /// Deterministic for paths 2 and 3; path 1 reads the pool's live
    /// reserves through the valuator. Zero in always yields zero out.
    pub fn token_value(e: Env, asset: Address, amount: i128) -> i128 {
        if amount == 0 {
            return 0;
        }

        if flag_enabled(&e, StatusFlag::LiquidityToken, &asset) {
            let valuator: Address = e
                .storage()
                .persistent()
                .get(&DataKey::Valuator(asset.clone()))
                .unwrap_or_else(|| panic!("{}", ERR_VALUATOR_MISSING));
            return LiquidityValuatorClient::new(&e, &valuator).valuation(&asset, &amount);
        }

        let asset_decimals = token::TokenClient::new(&e, &asset).decimals();

        if flag_enabled(&e, StatusFlag::RiskReserveToken, &asset) {
            if let Some(value) = e
                .storage()
                .persistent()
                .get::<_, i128>(&DataKey::RiskOffValuation(asset.clone()))
            {
                return amount
                    .checked_mul(value)
                    .expect("risk-off valuation overflow")
                    / pow10(asset_decimals);
            }
        }

        // Peg path: one whole asset unit backs PEG_RATE protocol tokens.
        amount
            .checked_mul(PEG_RATE * pow10(BASE_DECIMALS))
            .expect("peg valuation overflow")
            / pow10(asset_decimals)
    }

    // ── Reserve ledger ─────────────────────────────────────────────────────

    /// Deposit `amount` of an accepted reserve or liquidity asset. Mints
    /// `token_value - profit` protocol tokens to the caller; the withheld
    /// `profit` stays in the treasury as excess reserves.
    pub fn deposit(e: Env, caller: Address, amount: i128, asset: Address, profit: i128) -> i128 {
        caller.require_auth();

        if amount <= 0 {
            panic!("{}", ERR_INVALID_AMOUNT);
        }

        if flag_enabled(&e, StatusFlag::ReserveToken, &asset) {
            if !flag_enabled(&e, StatusFlag::ReserveDepositor, &caller) {
                panic!("{}", ERR_NOT_DEPOSITOR);
            }
        } else if flag_enabled(&e, StatusFlag::LiquidityToken, &asset) {
            if !flag_enabled(&e, StatusFlag::LiquidityDepositor, &caller) {
                panic!("{}", ERR_NOT_DEPOSITOR);
            }
        } else {
            panic!("{}", ERR_INVALID_ASSET);
        }

        let value = Self::token_value(e.clone(), asset.clone(), amount);
        if profit < 0 || profit > value {
            panic!("{}", ERR_PROFIT_EXCEEDS_VALUE);
        }
        let send = value - profit;

        // Effects before interactions.
        let reserves: i128 = e
            .storage()
            .instance()
            .get(&DataKey::TotalReserves)
            .unwrap_or(0);
        e.storage().instance().set(
            &DataKey::TotalReserves,
            &reserves.checked_add(value).expect("reserve total overflow"),
        );

        let me = e.current_contract_address();
        token::TokenClient::new(&e, &asset).transfer_from(&me, &caller, &me, &amount);
        token::StellarAssetClient::new(&e, &base_token(&e)).mint(&caller, &send);

        e.events().publish(
            (Symbol::new(&e, "deposit"), caller),
            (asset, amount, value),
        );

        send
    }

    /// Mint protocol tokens as payout funding. Restricted to holders of
    /// the `RewardManager` flag (the bond depository in practice).
    pub fn mint_reward(e: Env, caller: Address, to: Address, amount: i128) {
        caller.require_auth();

        if !flag_enabled(&e, StatusFlag::RewardManager, &caller) {
            panic!("{}", ERR_NOT_REWARD_MANAGER);
        }
        if amount <= 0 {
            panic!("{}", ERR_INVALID_AMOUNT);
        }

        token::StellarAssetClient::new(&e, &base_token(&e)).mint(&to, &amount);

        e.events()
            .publish((Symbol::new(&e, "reward_minted"), caller), (to, amount));
    }

    // ── Collectible custody ────────────────────────────────────────────────

    /// Take a collectible into custody. The depositor must own the piece
    /// and have approved the treasury for it; both are live queries
    /// against the collection contract.
    pub fn deposit_collectible(e: Env, caller: Address, collection: Address, id: u32) {
        caller.require_auth();

        if !flag_enabled(&e, StatusFlag::ReserveDepositor, &caller) {
            panic!("{}", ERR_NOT_DEPOSITOR);
        }

        let me = e.current_contract_address();
        let nft = NftClient::new(&e, &collection);

        if nft.owner_of(&id) != caller {
            panic!("{}", ERR_WRONG_OWNER);
        }
        if !nft.is_approved(&me, &id) {
            panic!("{}", ERR_NOT_APPROVED);
        }

        nft.transfer_from(&me, &caller, &me, &id);

        e.events().publish(
            (Symbol::new(&e, "collectible_deposited"), caller),
            (collection, id),
        );
    }

    /// Release a custodied collectible to the governor. Custody is decided
    /// by the collection's own ownership record, so pieces that arrived
    /// through a direct transfer are withdrawable too.
    pub fn withdraw_collectible(e: Env, caller: Address, collection: Address, id: u32) {
        require_governor(&e, &caller);

        let me = e.current_contract_address();
        let nft = NftClient::new(&e, &collection);

        if nft.owner_of(&id) != me {
            panic!("{}", ERR_NOT_IN_CUSTODY);
        }

        nft.transfer_from(&me, &me, &caller, &id);

        e.events().publish(
            (Symbol::new(&e, "collectible_withdrawn"), caller),
            (collection, id),
        );
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// Cumulative audited value of all deposits, in protocol token units.
    pub fn total_reserves(e: Env) -> i128 {
        e.storage()
            .instance()
            .get(&DataKey::TotalReserves)
            .unwrap_or(0)
    }

    /// The protocol token address.
    pub fn base_token(e: Env) -> Address {
        base_token(&e)
    }
}
