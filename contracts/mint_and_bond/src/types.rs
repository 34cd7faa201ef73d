use soroban_sdk::{contracttype, Address};

/// Timelocked claim on a bond bought through the zap. Lives in the
/// recipient's note ledger; the underlying depository bond is owned by the
/// zap until the note is claimed.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Note {
    pub owner: Address,
    /// Base tokens the underlying bond pays out in total.
    pub principal: i128,
    pub bond_id: u64,
    /// Vault whose derivative funded the bond.
    pub vault: Address,
    pub created: u64,
    /// Earliest claim timestamp.
    pub maturity: u64,
    pub claimed: bool,
}

#[contracttype]
pub enum DataKey {
    Authority,
    Depository,
    /// Protocol token paid out when notes are claimed.
    BaseToken,
    Vault(u32),
    NoteCount(Address),
    Note(Address, u32),
}
