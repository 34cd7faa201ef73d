//! Minimal non-fungible token interface consumed for collectible custody.
//!
//! Ownership and approval are always read live from the collection
//! contract; the treasury keeps no custody counter that could drift from
//! the ground truth.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "NftClient")]
pub trait NonFungibleToken {
    /// Current owner of `id`. Panics in the collection if `id` is unknown.
    fn owner_of(env: Env, id: u32) -> Address;

    /// True if `operator` may move `id` on the owner's behalf.
    fn is_approved(env: Env, operator: Address, id: u32) -> bool;

    /// Move `id` from `from` to `to`. `operator` must be the owner or an
    /// approved operator and must authorize the call.
    fn transfer_from(env: Env, operator: Address, from: Address, to: Address, id: u32);
}
