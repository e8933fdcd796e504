use anchor_lang::prelude::*;

use crate::constants::{LAUNCH_STATE_SEED, VAULT_SOL_SEED};
use crate::errors::LaunchError;
use crate::events::FeesWithdrawn;
use crate::instructions::vault::{lands_rent_exempt, pay_from_vault_sol};
use crate::state::Launch;

/// # WithdrawFees Instruction
///
/// Pays accrued platform and creator fees out of the currency vault. Anyone may
/// crank it; the recipients are always the ones stored on the launch. Works
/// before and after graduation.
///
/// A share too small to leave its recipient rent exempt stays accrued until a
/// later withdrawal can land it, so one unfunded recipient never blocks the other.
#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [LAUNCH_STATE_SEED, launch.mint.as_ref()],
        bump = launch.bump,
    )]
    pub launch: Account<'info, Launch>,

    #[account(
        mut,
        seeds = [VAULT_SOL_SEED, launch.mint.as_ref()],
        bump = launch.vault_sol_bump,
    )]
    pub vault_sol: SystemAccount<'info>,

    #[account(
        mut,
        address = launch.creator @ LaunchError::InvalidCreator,
    )]
    pub creator: SystemAccount<'info>,

    #[account(
        mut,
        address = launch.platform_fee_recipient @ LaunchError::InvalidPlatformRecipient,
    )]
    pub platform_fee_recipient: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> WithdrawFees<'info> {
    pub fn withdraw_fees(&mut self) -> Result<()> {
        let floor = Rent::get()?.minimum_balance(0);
        let pay_platform = lands_rent_exempt(
            self.platform_fee_recipient.lamports(),
            self.launch.platform_fee_accrued,
            floor,
        );
        let pay_creator = lands_rent_exempt(self.creator.lamports(), self.launch.creator_fee_accrued, floor);

        let withdrawal = self.launch.take_fee_shares(pay_platform, pay_creator)?;
        if !pay_platform {
            msg!("Platform share {} held until the recipient is rent exempt", self.launch.platform_fee_accrued);
        }
        if !pay_creator {
            msg!("Creator share {} held until the recipient is rent exempt", self.launch.creator_fee_accrued);
        }
        if withdrawal.is_empty() {
            msg!("No fees paid");
            return Ok(());
        }

        let mint = self.launch.mint;
        let vault_sol_bump = self.launch.vault_sol_bump;

        pay_from_vault_sol(
            self.system_program.to_account_info(),
            self.vault_sol.to_account_info(),
            self.platform_fee_recipient.to_account_info(),
            &mint,
            vault_sol_bump,
            withdrawal.platform,
        )?;
        pay_from_vault_sol(
            self.system_program.to_account_info(),
            self.vault_sol.to_account_info(),
            self.creator.to_account_info(),
            &mint,
            vault_sol_bump,
            withdrawal.creator,
        )?;

        msg!(
            "Withdrew fees: platform {}, creator {}",
            withdrawal.platform,
            withdrawal.creator
        );

        emit!(FeesWithdrawn {
            mint,
            platform_fee_recipient: self.platform_fee_recipient.key(),
            platform_paid: withdrawal.platform,
            creator: self.creator.key(),
            creator_paid: withdrawal.creator,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
