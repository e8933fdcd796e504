use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::constants::VAULT_SOL_SEED;

/// Moves `amount` lamports out of the system-owned currency vault of `mint`,
/// signing with the vault PDA seeds.
pub fn pay_from_vault_sol<'info>(
    system_program: AccountInfo<'info>,
    vault_sol: AccountInfo<'info>,
    to: AccountInfo<'info>,
    mint: &Pubkey,
    vault_sol_bump: u8,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let bump = [vault_sol_bump];
    let seeds = &[VAULT_SOL_SEED, mint.as_ref(), &bump];
    let signer_seeds = &[&seeds[..]];

    let cpi_ctx = CpiContext::new_with_signer(
        system_program,
        Transfer { from: vault_sol, to },
        signer_seeds,
    );

    transfer(cpi_ctx, amount)
}

/// Whether paying `amount` to an account holding `balance` leaves it at or above
/// the rent-exempt `floor`. The runtime rejects transfers that would not.
pub fn lands_rent_exempt(balance: u64, amount: u64, floor: u64) -> bool {
    amount == 0 || balance.saturating_add(amount) >= floor
}
