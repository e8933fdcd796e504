/// Seed of the PDA holding the `Launch` record for a mint.
pub const LAUNCH_STATE_SEED: &[u8] = b"launch_state";

/// Seed of the PDA that owns the token vault and signs token transfers out of it.
pub const LAUNCH_AUTHORITY_SEED: &[u8] = b"launch";

/// Seed of the system-owned PDA holding reserves and accrued fees.
pub const VAULT_SOL_SEED: &[u8] = b"vault_sol";

/// Fees are expressed in basis points of this denominator.
pub const BPS_DENOMINATOR: u64 = 10_000;
