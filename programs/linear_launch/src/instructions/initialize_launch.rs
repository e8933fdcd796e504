use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::constants::{LAUNCH_AUTHORITY_SEED, LAUNCH_STATE_SEED, VAULT_SOL_SEED};
use crate::errors::LaunchError;
use crate::events::LaunchInitialized;
use crate::state::{Launch, LaunchParams};
use crate::units;

/// # InitializeLaunch Instruction
///
/// Opens a bonding curve sale for an existing mint. The tokens for sale must
/// already sit in the vault token account owned by the launch authority PDA;
/// this instruction only records the sale and seeds the currency vault.
#[derive(Accounts)]
pub struct InitializeLaunch<'info> {
    /// Pays for the launch record and the vault's rent-exempt floor
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Receives the creator fee share on withdrawal
    pub creator: SystemAccount<'info>,

    /// Receives the platform fee share on withdrawal
    pub platform_fee_recipient: SystemAccount<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: PDA only signs for the token vault
    #[account(
        seeds = [LAUNCH_AUTHORITY_SEED, mint.key().as_ref()],
        bump,
    )]
    pub launch_authority: UncheckedAccount<'info>,

    /// The launch record, one per mint
    #[account(
        init_if_needed,
        payer = payer,
        space = 8 + Launch::INIT_SPACE,
        seeds = [LAUNCH_STATE_SEED, mint.key().as_ref()],
        bump,
    )]
    pub launch: Account<'info, Launch>,

    /// System-owned PDA holding reserves and accrued fees
    #[account(
        mut,
        seeds = [VAULT_SOL_SEED, mint.key().as_ref()],
        bump,
    )]
    pub vault_sol: SystemAccount<'info>,

    /// Holds the supply for sale
    #[account(
        associated_token::mint = mint,
        associated_token::authority = launch_authority,
        associated_token::token_program = token_program,
    )]
    pub vault_token: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> InitializeLaunch<'info> {
    pub fn initialize_launch(&mut self, params: LaunchParams, bumps: InitializeLaunchBumps) -> Result<()> {
        require!(!self.launch.is_initialized(), LaunchError::AlreadyInitialized);

        let required = units::to_raw(params.initial_supply, self.mint.decimals)?;
        require!(self.vault_token.amount >= required, LaunchError::VaultUnderfunded);

        let mint = self.mint.key();
        let creator = self.creator.key();
        let platform_fee_recipient = self.platform_fee_recipient.key();

        self.launch.initialize(&params, mint, creator, platform_fee_recipient)?;
        self.launch.vault_token = self.vault_token.key();
        self.launch.bump = bumps.launch;
        self.launch.authority_bump = bumps.launch_authority;
        self.launch.vault_sol_bump = bumps.vault_sol;

        // payouts must never take the vault below rent exemption
        let floor = Rent::get()?.minimum_balance(0);
        let shortfall = floor.saturating_sub(self.vault_sol.lamports());
        if shortfall > 0 {
            let cpi_ctx = CpiContext::new(
                self.system_program.to_account_info(),
                Transfer {
                    from: self.payer.to_account_info(),
                    to: self.vault_sol.to_account_info(),
                },
            );
            transfer(cpi_ctx, shortfall)?;
        }

        msg!(
            "Launch initialized: {} units, base price {}, slope {}",
            params.initial_supply,
            params.base_price,
            params.slope
        );

        emit!(LaunchInitialized {
            mint,
            launch: self.launch.key(),
            creator,
            platform_fee_recipient,
            base_price: params.base_price,
            slope: params.slope,
            fee_bps: params.fee_bps,
            creator_fee_bps: params.creator_fee_bps,
            graduation_target: params.graduation_target,
            initial_supply: params.initial_supply,
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
