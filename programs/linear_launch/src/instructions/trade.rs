use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::constants::{LAUNCH_AUTHORITY_SEED, LAUNCH_STATE_SEED, VAULT_SOL_SEED};
use crate::errors::LaunchError;
use crate::events::{LaunchGraduated, TokensBought, TokensSold};
use crate::instructions::vault::pay_from_vault_sol;
use crate::state::Launch;
use crate::units;

/// Accounts shared by `buy` and `sell`.
#[derive(Accounts)]
pub struct TradeLaunch<'info> {
    #[account(mut)]
    pub trader: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        seeds = [LAUNCH_STATE_SEED, mint.key().as_ref()],
        bump = launch.bump,
    )]
    pub launch: Account<'info, Launch>,

    #[account(
        mut,
        seeds = [VAULT_SOL_SEED, mint.key().as_ref()],
        bump = launch.vault_sol_bump,
    )]
    pub vault_sol: SystemAccount<'info>,

    /// CHECK: PDA only signs for the token vault
    #[account(
        seeds = [LAUNCH_AUTHORITY_SEED, mint.key().as_ref()],
        bump = launch.authority_bump,
    )]
    pub launch_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        address = launch.vault_token @ LaunchError::InvalidVault,
    )]
    pub vault_token: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = mint,
        associated_token::authority = trader,
        associated_token::token_program = token_program,
    )]
    pub trader_token: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> TradeLaunch<'info> {
    /// Buys `units` whole tokens off the curve, paying at most `max_cost`
    /// lamports including fees.
    pub fn buy(&mut self, units: u64, max_cost: u64) -> Result<()> {
        let outcome = self.launch.apply_buy(units, max_cost)?;
        let raw_amount = units::to_raw(units, self.mint.decimals)?;

        let cpi_ctx = CpiContext::new(
            self.system_program.to_account_info(),
            Transfer {
                from: self.trader.to_account_info(),
                to: self.vault_sol.to_account_info(),
            },
        );
        transfer(cpi_ctx, outcome.quote.gross)?;

        let mint_key = self.mint.key();
        let bump = [self.launch.authority_bump];
        let seeds = &[LAUNCH_AUTHORITY_SEED, mint_key.as_ref(), &bump];
        let signer_seeds = &[&seeds[..]];

        let accounts = TransferChecked {
            from: self.vault_token.to_account_info(),
            mint: self.mint.to_account_info(),
            to: self.trader_token.to_account_info(),
            authority: self.launch_authority.to_account_info(),
        };
        let cpi_ctx = CpiContext::new_with_signer(self.token_program.to_account_info(), accounts, signer_seeds);
        transfer_checked(cpi_ctx, raw_amount, self.mint.decimals)?;

        msg!("Bought {} units for {} lamports", units, outcome.quote.gross);

        let timestamp = Clock::get()?.unix_timestamp;
        emit!(TokensBought {
            mint: mint_key,
            buyer: self.trader.key(),
            units,
            cost: outcome.quote.gross,
            platform_fee: outcome.quote.platform_fee,
            creator_fee: outcome.quote.creator_fee,
            tokens_sold: self.launch.tokens_sold,
            reserves: self.launch.reserves,
            timestamp,
        });

        if outcome.graduated {
            self.emit_graduation(timestamp);
        }

        Ok(())
    }

    /// Sells `units` whole tokens back to the curve, receiving at least
    /// `min_payout` lamports after fees.
    pub fn sell(&mut self, units: u64, min_payout: u64) -> Result<()> {
        let raw_amount = units::to_raw(units, self.mint.decimals)?;
        require!(
            self.trader_token.amount >= raw_amount,
            LaunchError::InsufficientTokenBalance
        );

        let outcome = self.launch.apply_sell(units, min_payout)?;

        let accounts = TransferChecked {
            from: self.trader_token.to_account_info(),
            mint: self.mint.to_account_info(),
            to: self.vault_token.to_account_info(),
            authority: self.trader.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), accounts);
        transfer_checked(cpi_ctx, raw_amount, self.mint.decimals)?;

        let mint_key = self.mint.key();
        pay_from_vault_sol(
            self.system_program.to_account_info(),
            self.vault_sol.to_account_info(),
            self.trader.to_account_info(),
            &mint_key,
            self.launch.vault_sol_bump,
            outcome.quote.net,
        )?;

        msg!("Sold {} units for {} lamports", units, outcome.quote.net);

        let timestamp = Clock::get()?.unix_timestamp;
        emit!(TokensSold {
            mint: mint_key,
            seller: self.trader.key(),
            units,
            payout: outcome.quote.net,
            platform_fee: outcome.quote.platform_fee,
            creator_fee: outcome.quote.creator_fee,
            tokens_sold: self.launch.tokens_sold,
            reserves: self.launch.reserves,
            timestamp,
        });

        if outcome.graduated {
            self.emit_graduation(timestamp);
        }

        Ok(())
    }

    fn emit_graduation(&self, timestamp: i64) {
        msg!("Launch graduated with {} lamports in reserves", self.launch.reserves);

        emit!(LaunchGraduated {
            mint: self.launch.mint,
            reserves: self.launch.reserves,
            tokens_sold: self.launch.tokens_sold,
            timestamp,
        });
    }
}
