/// All panic messages used by the reserve_treasury contract.
///
/// Using string constants avoids typos in `#[should_panic(expected = "...")]` tests.
pub const ERR_ALREADY_INITIALIZED: &str = "already initialized";
pub const ERR_NOT_INITIALIZED: &str = "not initialized";
pub const ERR_NOT_GOVERNOR: &str = "caller is not the governor";
pub const ERR_NOT_DEPOSITOR: &str = "caller is not an approved depositor";
pub const ERR_NOT_REWARD_MANAGER: &str = "caller is not a reward manager";
pub const ERR_RISK_PERMISSION: &str = "risk reserve permission not given";
pub const ERR_VALUATOR_REQUIRED: &str = "liquidity token requires a valuator";
pub const ERR_VALUATOR_MISSING: &str = "no valuator bound for liquidity token";
pub const ERR_INVALID_ASSET: &str = "asset is not an accepted reserve";
pub const ERR_INVALID_AMOUNT: &str = "amount must be positive";
pub const ERR_PROFIT_EXCEEDS_VALUE: &str = "profit exceeds deposit value";
pub const ERR_WRONG_OWNER: &str = "collectible not owned by depositor";
pub const ERR_NOT_APPROVED: &str = "treasury not approved for collectible";
pub const ERR_NOT_IN_CUSTODY: &str = "collectible not held by treasury";
