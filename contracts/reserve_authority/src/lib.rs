#![no_std]

//! # Reserve Authority Contract
//!
//! Single source of truth for the four protocol roles. Every privileged
//! entry point in the treasury, depository and zap contracts asks this
//! contract who currently holds a role before mutating state.
//!
//! - **Governor**: status registry, risk-off valuations, collectible
//!   withdrawals, vault registration.
//! - **Guardian**: emergency operator, reserved for outer-surface tooling.
//! - **Policy**: bond market creation and closure.
//! - **Vault**: the treasury contract itself, recognised as the protocol
//!   token minter.

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};

mod errors;
use errors::*;


/// The four protocol roles.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    Governor,
    Guardian,
    Policy,
    Vault,
}

#[contracttype]
enum DataKey {
    /// Current holder of a role.
    Holder(Role),
}

#[contract]
pub struct ReserveAuthority;

#[contractimpl]
impl ReserveAuthority {
    /// One-time initialization with the initial role holders.
    /// Panics if called again after initialization.
    pub fn initialize(
        e: Env,
        governor: Address,
        guardian: Address,
        policy: Address,
        vault: Address,
    ) {
        if e.storage().instance().has(&DataKey::Holder(Role::Governor)) {
            panic!("{}", ERR_ALREADY_INITIALIZED);
        }
        e.storage()
            .instance()
            .set(&DataKey::Holder(Role::Governor), &governor);
        e.storage()
            .instance()
            .set(&DataKey::Holder(Role::Guardian), &guardian);
        e.storage()
            .instance()
            .set(&DataKey::Holder(Role::Policy), &policy);
        e.storage()
            .instance()
            .set(&DataKey::Holder(Role::Vault), &vault);

        e.events().publish(
            (Symbol::new(&e, "authority_initialized"),),
            (governor, guardian, policy, vault),
        );
    }

    /// Hand a role to a new address. Only the governor may reassign roles,
    /// and the check runs on every call.
    pub fn set_role(e: Env, caller: Address, role: Role, account: Address) {
        caller.require_auth();
        let governor: Address = e
            .storage()
            .instance()
            .get(&DataKey::Holder(Role::Governor))
            .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED));
        if caller != governor {
            panic!("{}", ERR_NOT_GOVERNOR);
        }

        e.storage()
            .instance()
            .set(&DataKey::Holder(role.clone()), &account);

        e.events()
            .publish((Symbol::new(&e, "role_assigned"),), (role, account));
    }

    // ── Queries ────────────────────────────────────────────────────────────

    pub fn governor(e: Env) -> Address {
        Self::holder(&e, Role::Governor)
    }

    pub fn guardian(e: Env) -> Address {
        Self::holder(&e, Role::Guardian)
    }

    pub fn policy(e: Env) -> Address {
        Self::holder(&e, Role::Policy)
    }

    pub fn vault(e: Env) -> Address {
        Self::holder(&e, Role::Vault)
    }

    pub fn is_governor(e: Env, account: Address) -> bool {
        Self::holder(&e, Role::Governor) == account
    }

    pub fn is_guardian(e: Env, account: Address) -> bool {
        Self::holder(&e, Role::Guardian) == account
    }

    pub fn is_policy(e: Env, account: Address) -> bool {
        Self::holder(&e, Role::Policy) == account
    }

    pub fn is_vault(e: Env, account: Address) -> bool {
        Self::holder(&e, Role::Vault) == account
    }

    fn holder(e: &Env, role: Role) -> Address {
        e.storage()
            .instance()
            .get(&DataKey::Holder(role))
            .unwrap_or_else(|| panic!("{}", ERR_NOT_INITIALIZED))
    }
}
