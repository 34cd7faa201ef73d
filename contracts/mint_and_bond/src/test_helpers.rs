//! Shared test wiring for mint_and_bond tests: the full protocol stack
//! (authority, treasury, depository, zap) plus a mock collectible
//! collection and a mock vault whose derivative doubles as the bond
//! market's quote token. Each mock lives in its own module; the generated
//! export symbols collide otherwise.

#![cfg(test)]

use crate::{MintAndBond, MintAndBondClient};
use bond_depository::types::CreateMarketParams;
use bond_depository::{BondDepository, BondDepositoryClient};
use reserve_authority::{ReserveAuthority, ReserveAuthorityClient};
use reserve_treasury::types::StatusFlag;
use reserve_treasury::{ReserveTreasury, ReserveTreasuryClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env, Vec};

pub use mock_nft::{MockNft, MockNftClient};
pub use mock_vault::{MockVault, MockVaultClient};

pub const T0: u64 = 1_000_000;
pub const ONE_DAY: u64 = 86_400;

/// Derivative minted per custodied collectible, 7 decimals.
pub const UNIT: i128 = 10_000_000;
/// 0.4 derivative per base token, 9-decimal fixed point.
pub const MARKET_PRICE: i128 = 400_000_000;

// ─── Mock collectible collection ───────────────────────────────────────────

mod mock_nft {
    use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

    #[contracttype]
    pub enum MockNftKey {
        Owner(u32),
        Approved(u32),
        OperatorAll(Address, Address),
    }

    #[contract]
    pub struct MockNft;

    #[contractimpl]
    impl MockNft {
        pub fn mint(e: Env, to: Address, id: u32) {
            if e.storage().persistent().has(&MockNftKey::Owner(id)) {
                panic!("token already minted");
            }
            e.storage().persistent().set(&MockNftKey::Owner(id), &to);
        }

        pub fn set_approval_for_all(e: Env, owner: Address, operator: Address, approved: bool) {
            owner.require_auth();
            e.storage()
                .persistent()
                .set(&MockNftKey::OperatorAll(owner, operator), &approved);
        }

        pub fn owner_of(e: Env, id: u32) -> Address {
            e.storage()
                .persistent()
                .get(&MockNftKey::Owner(id))
                .unwrap_or_else(|| panic!("unknown token"))
        }

        pub fn is_approved(e: Env, operator: Address, id: u32) -> bool {
            let owner = Self::owner_of(e.clone(), id);
            if owner == operator {
                return true;
            }
            if let Some(approved) = e
                .storage()
                .persistent()
                .get::<_, Address>(&MockNftKey::Approved(id))
            {
                if approved == operator {
                    return true;
                }
            }
            e.storage()
                .persistent()
                .get(&MockNftKey::OperatorAll(owner, operator))
                .unwrap_or(false)
        }

        pub fn transfer_from(e: Env, operator: Address, from: Address, to: Address, id: u32) {
            operator.require_auth();
            if Self::owner_of(e.clone(), id) != from {
                panic!("from does not own token");
            }
            if !Self::is_approved(e.clone(), operator, id) {
                panic!("operator not approved");
            }
            e.storage().persistent().remove(&MockNftKey::Approved(id));
            e.storage().persistent().set(&MockNftKey::Owner(id), &to);
        }
    }
}

// ─── Mock collectible vault ────────────────────────────────────────────────

mod mock_vault {
    use soroban_sdk::token::TokenInterface as _;
    use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, String, Vec};

    use super::UNIT;

    #[contracttype]
    pub enum MockVaultKey {
        Asset,
        Balance(Address),
        Allowance(Address, Address),
    }

    /// Vault issuing one derivative unit per collectible. Implements the
    /// token interface so the derivative can serve as a bond market's
    /// quote token.
    #[contract]
    pub struct MockVault;

    #[contractimpl]
    impl MockVault {
        pub fn init(e: Env, asset: Address) {
            e.storage().instance().set(&MockVaultKey::Asset, &asset);
        }

        pub fn asset_address(e: Env) -> Address {
            e.storage()
                .instance()
                .get(&MockVaultKey::Asset)
                .unwrap_or_else(|| panic!("vault not initialized"))
        }

        pub fn mint(e: Env, minter: Address, ids: Vec<u32>) -> i128 {
            let minted = i128::from(ids.len()) * UNIT;
            let balance: i128 = e
                .storage()
                .persistent()
                .get(&MockVaultKey::Balance(minter.clone()))
                .unwrap_or(0);
            e.storage()
                .persistent()
                .set(&MockVaultKey::Balance(minter), &(balance + minted));
            minted
        }
    }

    #[contractimpl]
    impl token::Interface for MockVault {
        fn allowance(e: Env, from: Address, spender: Address) -> i128 {
            e.storage()
                .persistent()
                .get(&MockVaultKey::Allowance(from, spender))
                .unwrap_or(0)
        }

        fn approve(e: Env, from: Address, spender: Address, amount: i128, _expiration_ledger: u32) {
            from.require_auth();
            e.storage()
                .persistent()
                .set(&MockVaultKey::Allowance(from, spender), &amount);
        }

        fn balance(e: Env, id: Address) -> i128 {
            e.storage()
                .persistent()
                .get(&MockVaultKey::Balance(id))
                .unwrap_or(0)
        }

        fn transfer(e: Env, from: Address, to: Address, amount: i128) {
            from.require_auth();
            Self::move_balance(&e, &from, &to, amount);
        }

        fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128) {
            spender.require_auth();
            let allowance: i128 = e
                .storage()
                .persistent()
                .get(&MockVaultKey::Allowance(from.clone(), spender.clone()))
                .unwrap_or(0);
            if allowance < amount {
                panic!("insufficient allowance");
            }
            e.storage().persistent().set(
                &MockVaultKey::Allowance(from.clone(), spender),
                &(allowance - amount),
            );
            Self::move_balance(&e, &from, &to, amount);
        }

        fn burn(e: Env, from: Address, amount: i128) {
            from.require_auth();
            Self::debit(&e, &from, amount);
        }

        fn burn_from(e: Env, spender: Address, from: Address, amount: i128) {
            spender.require_auth();
            Self::debit(&e, &from, amount);
        }

        fn decimals(_e: Env) -> u32 {
            7
        }

        fn name(e: Env) -> String {
            String::from_str(&e, "Mock Vault Share")
        }

        fn symbol(e: Env) -> String {
            String::from_str(&e, "MVS")
        }
    }

    impl MockVault {
        fn debit(e: &Env, from: &Address, amount: i128) {
            let balance: i128 = e
                .storage()
                .persistent()
                .get(&MockVaultKey::Balance(from.clone()))
                .unwrap_or(0);
            if balance < amount {
                panic!("insufficient balance");
            }
            e.storage()
                .persistent()
                .set(&MockVaultKey::Balance(from.clone()), &(balance - amount));
        }

        fn move_balance(e: &Env, from: &Address, to: &Address, amount: i128) {
            Self::debit(e, from, amount);
            let to_balance: i128 = e
                .storage()
                .persistent()
                .get(&MockVaultKey::Balance(to.clone()))
                .unwrap_or(0);
            e.storage()
                .persistent()
                .set(&MockVaultKey::Balance(to.clone()), &(to_balance + amount));
        }
    }
}

// ─── Environment wiring ────────────────────────────────────────────────────

pub struct Setup<'a> {
    pub zap: MintAndBondClient<'a>,
    pub depository: BondDepositoryClient<'a>,
    pub treasury: ReserveTreasuryClient<'a>,
    pub nft: MockNftClient<'a>,
    pub governor: Address,
    pub policy: Address,
    pub user: Address,
    pub base: Address,
    pub vault: Address,
    pub collection: Address,
    pub vault_id: u32,
    pub market_id: u32,
    pub zap_id: Address,
    pub depository_id: Address,
    pub treasury_id: Address,
}

/// Full stack at timestamp `T0`: one registered vault over a mock
/// collection and one live market quoting the vault's derivative, with
/// bonds vesting in 100 seconds.
pub fn setup(e: &Env) -> Setup<'_> {
    e.mock_all_auths();
    e.ledger().with_mut(|l| l.timestamp = T0);

    let governor = Address::generate(e);
    let guardian = Address::generate(e);
    let policy = Address::generate(e);
    let user = Address::generate(e);

    let authority_id = e.register(ReserveAuthority, ());
    let treasury_id = e.register(ReserveTreasury, ());
    let depository_id = e.register(BondDepository, ());
    let zap_id = e.register(MintAndBond, ());

    ReserveAuthorityClient::new(e, &authority_id).initialize(
        &governor,
        &guardian,
        &policy,
        &treasury_id,
    );

    let base = e
        .register_stellar_asset_contract_v2(governor.clone())
        .address();
    StellarAssetClient::new(e, &base).set_admin(&treasury_id);

    let treasury = ReserveTreasuryClient::new(e, &treasury_id);
    treasury.initialize(&base, &authority_id);
    treasury.enable(&governor, &StatusFlag::RewardManager, &depository_id, &None);

    let collection = e.register(MockNft, ());
    let vault = e.register(MockVault, ());
    MockVaultClient::new(e, &vault).init(&collection);

    let depository = BondDepositoryClient::new(e, &depository_id);
    depository.initialize(&authority_id, &base, &treasury_id);
    let market_id = depository.create(&policy, &market_params(e, &vault, 100));

    let zap = MintAndBondClient::new(e, &zap_id);
    zap.initialize(&authority_id, &depository_id, &base);
    let vault_id = 0;
    zap.register_vault(&governor, &vault_id, &vault);

    let nft = MockNftClient::new(e, &collection);

    Setup {
        zap,
        depository,
        treasury,
        nft,
        governor,
        policy,
        user,
        base,
        vault,
        collection,
        vault_id,
        market_id,
        zap_id,
        depository_id,
        treasury_id,
    }
}

/// Day-long market quoting the vault derivative with the given vesting
/// term.
pub fn market_params(e: &Env, vault: &Address, vesting: u64) -> CreateMarketParams {
    CreateMarketParams {
        quote_token: vault.clone(),
        capacity: 10_000_000_000_000,
        initial_price: MARKET_PRICE,
        buffer: 200_000,
        capacity_in_quote: false,
        fixed_term: true,
        vesting,
        conclusion: e.ledger().timestamp() + ONE_DAY,
        deposit_interval: 14_400,
        tune_interval: 3_600,
    }
}

/// Mints `ids` to `owner` and approves the zap for all of them.
pub fn mint_approved(s: &Setup, e: &Env, owner: &Address, ids: &[u32]) -> Vec<u32> {
    for id in ids {
        s.nft.mint(owner, id);
    }
    s.nft.set_approval_for_all(owner, &s.zap_id, &true);
    Vec::from_slice(e, ids)
}

pub fn jump(e: &Env, secs: u64) {
    e.ledger().with_mut(|l| l.timestamp += secs);
}
