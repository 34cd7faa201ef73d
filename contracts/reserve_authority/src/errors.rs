/// Panic messages used by the reserve_authority contract.
pub const ERR_ALREADY_INITIALIZED: &str = "already initialized";
pub const ERR_NOT_INITIALIZED: &str = "not initialized";
pub const ERR_NOT_GOVERNOR: &str = "caller is not the governor";
