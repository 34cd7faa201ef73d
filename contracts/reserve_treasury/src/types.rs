use soroban_sdk::{contracttype, Address};

// ─── Capability flags ──────────────────────────────────────────────────────

/// Per-asset / per-actor capability kinds. A (flag, address) pair is either
/// enabled or absent; absence always means disabled.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StatusFlag {
    /// Actor may deposit reserve assets and collectibles.
    ReserveDepositor,
    /// Asset is accepted as a reserve deposit.
    ReserveToken,
    /// Actor may deposit liquidity-pool assets.
    LiquidityDepositor,
    /// Asset is a liquidity-pool share valued by a bound valuator.
    LiquidityToken,
    /// Asset carries an administrator-set risk-off valuation.
    RiskReserveToken,
    /// Actor may mint protocol tokens as payout rewards.
    RewardManager,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
pub enum DataKey {
    /// Role registry contract address.
    Authority,
    /// Protocol token (9 decimals, treasury is its mint admin).
    BaseToken,
    /// Running total of audited deposit value, in protocol token units.
    TotalReserves,
    /// Capability flag state: present and true means enabled.
    Status(StatusFlag, Address),
    /// Liquidity valuator bound to a pool asset. Never cleaned up on
    /// disable; the dispatch checks the flag before consulting it.
    Valuator(Address),
    /// Administrator-set risk-off valuation for an asset, in protocol
    /// token units per whole asset unit. Cleared when the risk flag is
    /// disabled so a re-enable cannot resurrect a stale value.
    RiskOffValuation(Address),
}
