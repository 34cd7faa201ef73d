/// All panic messages used by the mint_and_bond contract.
pub const ERR_ALREADY_INITIALIZED: &str = "already initialized";
pub const ERR_NOT_INITIALIZED: &str = "not initialized";
pub const ERR_NOT_GOVERNOR: &str = "caller is not the governor";
pub const ERR_UNKNOWN_VAULT: &str = "unknown vault";
pub const ERR_NO_COLLECTIBLES: &str = "no collectibles supplied";
pub const ERR_NOT_OWNED: &str = "not owned or approved";
pub const ERR_BOND_BAND: &str = "bond amount out of bounds";
pub const ERR_UNKNOWN_NOTE: &str = "unknown note";
pub const ERR_WRONG_VAULT: &str = "wrong vault for note";
pub const ERR_NOT_MATURED: &str = "note not matured";
