/// All panic messages used by the bond_depository contract.
pub const ERR_ALREADY_INITIALIZED: &str = "already initialized";
pub const ERR_NOT_INITIALIZED: &str = "not initialized";
pub const ERR_NOT_POLICY: &str = "caller is not the policy";
pub const ERR_MARKET_NOT_FOUND: &str = "market not found";
pub const ERR_MARKET_CONCLUDED: &str = "market concluded";
pub const ERR_INVALID_CAPACITY: &str = "capacity must be positive";
pub const ERR_INVALID_PRICE: &str = "initial price must be positive";
pub const ERR_INVALID_CONCLUSION: &str = "conclusion must be in the future";
pub const ERR_INVALID_INTERVALS: &str = "intervals must be positive";
pub const ERR_INVALID_AMOUNT: &str = "amount must be positive";
pub const ERR_ZERO_PAYOUT: &str = "deposit too small for any payout";
pub const ERR_MAX_PRICE: &str = "max price exceeded";
pub const ERR_MAX_SIZE: &str = "max size exceeded";
pub const ERR_CAPACITY_EXCEEDED: &str = "capacity exceeded";
pub const ERR_MAX_DEBT: &str = "max debt exceeded";
pub const ERR_BOND_NOT_FOUND: &str = "bond not found";
pub const ERR_FULLY_REDEEMED: &str = "nothing left to redeem";
pub const ERR_NOTHING_VESTED: &str = "no payout vested yet";
