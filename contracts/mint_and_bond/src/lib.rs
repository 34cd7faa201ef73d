#![no_std]

//! # Mint-and-Bond Contract
//!
//! One-call zap over the collectible vaults and the bond depository:
//! deposit collectibles, mint the vault's fungible derivative against them,
//! bond a chosen slice of the minted amount and send the change back. The
//! resulting bond is held by this contract and surfaced to the user as a
//! timelocked note; once the note matures and the bond has fully vested
//! the user claims its full payout in protocol tokens.
//!
//! ## Key design decisions
//!
//! - **Strict checks, then effects**: both `mint_and_bond` and `claim`
//!   validate every item up front and panic before touching state, so a
//!   batch either validates wholly or reverts wholly.
//! - **Already-claimed notes are skipped, not rejected**: the maturity
//!   pre-check is strict, but a note that was claimed earlier is silently
//!   skipped during effects, making claim batches idempotent.
//! - **Collectibles stay in zap custody**: the vault mints its derivative
//!   against pieces held here; the note timelock is what stops a
//!   mint-bond-claim loop from cycling them.

use soroban_sdk::{contract, contractclient, contractimpl, token, Address, Env, Symbol, Vec};

mod errors;
pub mod types;

use bond_depository::BondDepositoryClient;
use errors::*;
use reserve_authority::ReserveAuthorityClient;
use reserve_treasury::nft::NftClient;
use types::{DataKey, Note};

#[cfg(test)]
mod test_helpers;



/// Seconds between bonding and the note becoming claimable.
pub const NOTE_TIMELOCK: u64 = 432_000;

/// Bonded-slice band, in basis points of the minted derivative.
pub const MIN_BOND_BPS: i128 = 500;
pub const MAX_BOND_BPS: i128 = 9_500;
pub const BPS: i128 = 10_000;

/// Collectible vault: custodies pieces of one collection and issues a
/// fungible derivative against them. The vault address doubles as the
/// derivative's token address.
#[contractclient(name = "CollectibleVaultClient")]
pub trait CollectibleVault {
    /// The collection this vault accepts.
    fn asset_address(env: Env) -> Address;
    /// Issue derivative tokens to `minter` against `ids`, returning the
    /// amount minted.
    fn mint(env: Env, minter: Address, ids: Vec<u32>) -> i128;
}

// ─── Helpers ───────────────────────────────────────────────────────────────

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

fn vault_address(e: &Env, vault_id: u32) -> Address {
    e.storage()
        .persistent()
        .get(&DataKey::Vault(vault_id))
        .unwrap_or_else(|| panic!("{}", ERR_UNKNOWN_VAULT))
}

fn load_note(e: &Env, owner: &Address, index: u32) -> Note {
    e.storage()
        .persistent()
        .get(&DataKey::Note(owner.clone(), index))
        .unwrap_or_else(|| panic!("{}", ERR_UNKNOWN_NOTE))
}

// ─── Contract ──────────────────────────────────────────────────────────────

#[contract]
pub struct MintAndBond;

#[contractimpl]
impl MintAndBond {
    /// One-time initialization with the protocol wiring.
    pub fn initialize(e: Env, authority: Address, depository: Address, base_token: Address) {
        if e.storage().instance().has(&DataKey::Authority) {
            panic!("{}", ERR_ALREADY_INITIALIZED);
        }
        e.storage().instance().set(&DataKey::Authority, &authority);
        e.storage().instance().set(&DataKey::Depository, &depository);
        e.storage().instance().set(&DataKey::BaseToken, &base_token);

        e.events().publish(
            (Symbol::new(&e, "zap_initialized"),),
            (authority, depository, base_token),
        );
    }

    // ── Vault registry ─────────────────────────────────────────────────────

    /// Bind a numeric vault id to a collectible vault the zap may mint
    /// through. Governor only; re-binding an id replaces the mapping.
    pub fn register_vault(e: Env, caller: Address, vault_id: u32, vault: Address) {
        require_governor(&e, &caller);

        e.storage()
            .persistent()
            .set(&DataKey::Vault(vault_id), &vault);

        e.events()
            .publish((Symbol::new(&e, "vault_registered"), vault_id), vault);
    }

    pub fn vault(e: Env, vault_id: u32) -> Address {
        vault_address(&e, vault_id)
    }

    // ── Zap ────────────────────────────────────────────────────────────────

    /// Deposit `ids` from the vault's collection, mint the derivative,
    /// bond `amount_to_bond` of it into `market_id` and send the remainder
    /// to `recipient`. The bond is recorded as a timelocked note in the
    /// recipient's ledger. Returns `(payout, note_index)`.
    ///
    /// `amount_to_bond` must land inside the 5%-95% band of the minted
    /// amount.
    pub fn mint_and_bond(
        e: Env,
        caller: Address,
        vault_id: u32,
        ids: Vec<u32>,
        amount_to_bond: i128,
        market_id: u32,
        recipient: Address,
        max_price: i128,
    ) -> (i128, u32) {
        caller.require_auth();

        if ids.is_empty() {
            panic!("{}", ERR_NO_COLLECTIBLES);
        }

        let vault = vault_address(&e, vault_id);
        let vault_client = CollectibleVaultClient::new(&e, &vault);
        let collection = vault_client.asset_address();

        let me = e.current_contract_address();
        let nft = NftClient::new(&e, &collection);

        // Validate the whole batch before moving anything.
        for id in ids.iter() {
            if nft.owner_of(&id) != caller || !nft.is_approved(&me, &id) {
                panic!("{}", ERR_NOT_OWNED);
            }
        }
        for id in ids.iter() {
            nft.transfer_from(&me, &caller, &me, &id);
        }

        let minted = vault_client.mint(&me, &ids);
        if amount_to_bond < minted * MIN_BOND_BPS / BPS
            || amount_to_bond > minted * MAX_BOND_BPS / BPS
        {
            panic!("{}", ERR_BOND_BAND);
        }

        let depository: Address = e
            .storage()
            .instance()
            .get(&DataKey::Depository)
            .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
        let derivative = token::TokenClient::new(&e, &vault);
        derivative.approve(
            &me,
            &depository,
            &amount_to_bond,
            &(e.ledger().sequence() + 1),
        );
        let (payout, bond_id) = BondDepositoryClient::new(&e, &depository).deposit(
            &me,
            &me,
            &market_id,
            &amount_to_bond,
            &max_price,
        );

        let change = minted - amount_to_bond;
        if change > 0 {
            derivative.transfer(&me, &recipient, &change);
        }

        let now = e.ledger().timestamp();
        let note = Note {
            owner: recipient.clone(),
            principal: payout,
            bond_id,
            vault: vault.clone(),
            created: now,
            maturity: now + NOTE_TIMELOCK,
            claimed: false,
        };
        let index: u32 = e
            .storage()
            .persistent()
            .get(&DataKey::NoteCount(recipient.clone()))
            .unwrap_or(0);
        e.storage()
            .persistent()
            .set(&DataKey::NoteCount(recipient.clone()), &(index + 1));
        e.storage()
            .persistent()
            .set(&DataKey::Note(recipient.clone(), index), &note);

        e.events().publish(
            (Symbol::new(&e, "minted_and_bonded"), recipient, index),
            (vault, amount_to_bond, payout),
        );

        (payout, index)
    }

    // ── Claims ─────────────────────────────────────────────────────────────

    /// Claim matured notes. Every index must name a note of `owner` bound
    /// to `vault`, past its maturity, and with its underlying bond fully
    /// vested; notes already claimed are skipped. The underlying bonds are
    /// redeemed and the combined payout is sent to `owner` in protocol
    /// tokens. Returns the amount paid.
    ///
    /// A note is spent in one piece: if the market's vesting term outruns
    /// the note timelock, the claim waits for the bond rather than
    /// collecting a fraction and stranding the rest.
    pub fn claim(e: Env, owner: Address, indexes: Vec<u32>, vault: Address) -> i128 {
        owner.require_auth();

        let now = e.ledger().timestamp();
        let depository: Address = e
            .storage()
            .instance()
            .get(&DataKey::Depository)
            .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
        let depository_client = BondDepositoryClient::new(&e, &depository);

        // Strict pass: any invalid index rejects the whole batch.
        for index in indexes.iter() {
            let note = load_note(&e, &owner, index);
            if note.vault != vault {
                panic!("{}", ERR_WRONG_VAULT);
            }
            if note.claimed {
                continue;
            }
            if now < note.maturity {
                panic!("{}", ERR_NOT_MATURED);
            }
            let bond = depository_client.get_bond(&note.bond_id);
            if now < bond.vesting_start + bond.term {
                panic!("{}", ERR_NOT_MATURED);
            }
        }

        let mut total: i128 = 0;
        for index in indexes.iter() {
            let mut note = load_note(&e, &owner, index);
            if note.claimed {
                continue;
            }
            note.claimed = true;
            e.storage()
                .persistent()
                .set(&DataKey::Note(owner.clone(), index), &note);

            total += depository_client.redeem(&note.bond_id);
        }

        if total > 0 {
            let base: Address = e
                .storage()
                .instance()
                .get(&DataKey::BaseToken)
                .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
            token::TokenClient::new(&e, &base).transfer(
                &e.current_contract_address(),
                &owner,
                &total,
            );
        }

        e.events().publish(
            (Symbol::new(&e, "notes_claimed"), owner),
            (vault, indexes, total),
        );

        total
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn get_note(e: Env, owner: Address, index: u32) -> Note {
        load_note(&e, &owner, index)
    }

    pub fn note_count(e: Env, owner: Address) -> u32 {
        e.storage()
            .persistent()
            .get(&DataKey::NoteCount(owner))
            .unwrap_or(0)
    }
}
