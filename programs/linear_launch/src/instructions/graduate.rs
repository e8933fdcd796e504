use anchor_lang::prelude::*;

use crate::constants::LAUNCH_STATE_SEED;
use crate::events::LaunchGraduated;
use crate::state::Launch;

/// Permissionless graduation check. Trades already run it; this exists for
/// launches whose target is met without a further trade.
#[derive(Accounts)]
pub struct Graduate<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [LAUNCH_STATE_SEED, launch.mint.as_ref()],
        bump = launch.bump,
    )]
    pub launch: Account<'info, Launch>,
}

impl<'info> Graduate<'info> {
    pub fn graduate(&mut self) -> Result<()> {
        if !self.launch.graduate()? {
            msg!(
                "Reserves {} below graduation target {}",
                self.launch.reserves,
                self.launch.graduation_target
            );
            return Ok(());
        }

        msg!("Launch graduated with {} lamports in reserves", self.launch.reserves);

        emit!(LaunchGraduated {
            mint: self.launch.mint,
            reserves: self.launch.reserves,
            tokens_sold: self.launch.tokens_sold,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
