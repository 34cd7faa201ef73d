use soroban_sdk::{contracttype, Address};

// ─── Market creation ───────────────────────────────────────────────────────

/// Parameters supplied by policy when opening a market.
#[contracttype]
#[derive(Clone, Debug)]
pub struct CreateMarketParams {
    /// Token paid in by depositors.
    pub quote_token: Address,
    /// Amount left to sell, in quote or base units per `capacity_in_quote`.
    pub capacity: i128,
    /// Opening price, quote units per whole base token scaled to 9 decimals.
    pub initial_price: i128,
    /// Debt ceiling headroom over the sell-out target, in 1e5 units.
    pub buffer: u32,
    /// Whether `capacity` is denominated in the quote token.
    pub capacity_in_quote: bool,
    /// Fixed term (vesting is a duration) vs. fixed expiry (vesting is a
    /// timestamp every bond matures at).
    pub fixed_term: bool,
    pub vesting: u64,
    /// Timestamp at which the market stops selling.
    pub conclusion: u64,
    /// Pace window for the per-deposit payout cap.
    pub deposit_interval: u64,
    /// Minimum seconds between control-variable retunes.
    pub tune_interval: u64,
}

// ─── Market state ──────────────────────────────────────────────────────────

/// Mutable sales state for one market.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Market {
    pub quote_token: Address,
    /// Remaining sellable amount; monotonically non-increasing.
    pub capacity: i128,
    pub capacity_in_quote: bool,
    /// Outstanding payout obligation driving the price; decays over time.
    pub total_debt: i128,
    /// Sell-out target fixed at creation, base units. Debt ratio reference.
    pub target_debt: i128,
    /// Largest payout a single deposit may take this interval.
    pub max_payout: i128,
    /// Hard debt ceiling: `target_debt` plus the buffer headroom.
    pub max_debt: i128,
    /// Base tokens sold to date.
    pub sold: i128,
    /// Quote tokens taken in to date.
    pub purchased: i128,
}

/// Pricing terms for one market. `control_variable` is the only field that
/// changes after creation.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Terms {
    pub control_variable: i128,
    /// Protocol price floor: the price never decays below this.
    pub min_price: i128,
    pub vesting: u64,
    pub fixed_term: bool,
    pub conclusion: u64,
}

/// Bookkeeping for lazy decay and tuning.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Metadata {
    pub last_tune: u64,
    pub last_decay: u64,
    /// Market lifetime at creation, seconds.
    pub length: u64,
    pub deposit_interval: u64,
    pub tune_interval: u64,
    pub quote_decimals: u32,
}

// ─── Bonds ─────────────────────────────────────────────────────────────────

/// A purchase against a market, vesting linearly over `term`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Bond {
    pub owner: Address,
    pub market_id: u32,
    /// Quote tokens paid in.
    pub amount: i128,
    /// Base tokens owed in total.
    pub payout: i128,
    pub vesting_start: u64,
    /// Seconds until fully vested.
    pub term: u64,
    /// Base tokens redeemed so far.
    pub claimed: i128,
}

// ─── Storage keys ──────────────────────────────────────────────────────────

#[contracttype]
pub enum DataKey {
    Authority,
    /// Protocol token paid out to bonders.
    BaseToken,
    /// Treasury receiving quote tokens and minting payouts.
    Treasury,
    MarketCount,
    Market(u32),
    Terms(u32),
    Meta(u32),
    BondCount,
    Bond(u64),
}
