use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::curve::{self, TradeQuote};
use crate::errors::LaunchError;

/// Economic parameters fixed when a launch is created.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchParams {
    pub base_price: u64,
    pub slope: u64,
    pub fee_bps: u16,
    pub creator_fee_bps: u16,
    pub graduation_target: u64,
    pub initial_supply: u64,
}

impl LaunchParams {
    pub fn validate(&self) -> Result<()> {
        require!(
            self.fee_bps as u64 + self.creator_fee_bps as u64 <= BPS_DENOMINATOR,
            LaunchError::InvalidFeeConfiguration
        );
        require!(self.initial_supply > 0, LaunchError::InvalidSupply);
        Ok(())
    }
}

/// One bonding curve sale, keyed by its token mint.
///
/// Token amounts are whole units. Currency amounts are in the smallest
/// currency unit. `tokens_sold + supply_remaining == initial_supply` holds
/// after every transition, and `graduated` never goes back to false.
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Launch {
    pub mint: Pubkey,
    pub creator: Pubkey,
    pub platform_fee_recipient: Pubkey,
    pub vault_token: Pubkey,

    pub base_price: u64,
    pub slope: u64,
    pub graduation_target: u64,
    pub initial_supply: u64,
    pub supply_remaining: u64,
    pub tokens_sold: u64,
    pub reserves: u64,
    pub platform_fee_accrued: u64,
    pub creator_fee_accrued: u64,

    pub fee_bps: u16,
    pub creator_fee_bps: u16,

    pub graduated: bool,
    pub bump: u8,
    pub authority_bump: u8,
    pub vault_sol_bump: u8,
}

/// Result of a successful buy or sell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradeOutcome {
    pub quote: TradeQuote,
    /// True if this trade pushed reserves over the graduation target.
    pub graduated: bool,
}

/// Fee balances paid out by `take_fees`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeWithdrawal {
    pub platform: u64,
    pub creator: u64,
}

impl FeeWithdrawal {
    pub fn is_empty(&self) -> bool {
        self.platform == 0 && self.creator == 0
    }
}

impl Launch {
    pub fn is_initialized(&self) -> bool {
        self.initial_supply > 0
    }

    /// Fills a fresh record. Bumps and the vault address are left to the caller.
    pub fn initialize(
        &mut self,
        params: &LaunchParams,
        mint: Pubkey,
        creator: Pubkey,
        platform_fee_recipient: Pubkey,
    ) -> Result<()> {
        require!(!self.is_initialized(), LaunchError::AlreadyInitialized);
        params.validate()?;

        self.mint = mint;
        self.creator = creator;
        self.platform_fee_recipient = platform_fee_recipient;
        self.base_price = params.base_price;
        self.slope = params.slope;
        self.fee_bps = params.fee_bps;
        self.creator_fee_bps = params.creator_fee_bps;
        self.graduation_target = params.graduation_target;
        self.initial_supply = params.initial_supply;
        self.supply_remaining = params.initial_supply;
        self.tokens_sold = 0;
        self.reserves = 0;
        self.platform_fee_accrued = 0;
        self.creator_fee_accrued = 0;
        self.graduated = false;

        Ok(())
    }

    fn ensure_tradable(&self) -> Result<()> {
        require!(self.is_initialized(), LaunchError::NotInitialized);
        require!(!self.graduated, LaunchError::AlreadyGraduated);
        Ok(())
    }

    pub fn quote_buy(&self, units: u64) -> Result<TradeQuote> {
        self.ensure_tradable()?;
        require!(units > 0, LaunchError::ZeroAmount);
        require!(units <= self.supply_remaining, LaunchError::InsufficientSupply);

        let gross = curve::cost(self.base_price, self.slope, self.tokens_sold, units)?;
        curve::split_fees(units, gross, self.fee_bps, self.creator_fee_bps)
    }

    /// Refund for `units` is priced at the curve positions those units occupy,
    /// i.e. starting from `tokens_sold - units`.
    pub fn quote_sell(&self, units: u64) -> Result<TradeQuote> {
        self.ensure_tradable()?;
        require!(units > 0, LaunchError::ZeroAmount);
        require!(units <= self.tokens_sold, LaunchError::InsufficientSold);

        let gross = curve::cost(self.base_price, self.slope, self.tokens_sold - units, units)?;
        curve::split_fees(units, gross, self.fee_bps, self.creator_fee_bps)
    }

    pub fn apply_buy(&mut self, units: u64, max_cost: u64) -> Result<TradeOutcome> {
        let quote = self.quote_buy(units)?;
        require!(quote.gross <= max_cost, LaunchError::SlippageExceeded);

        let tokens_sold = self
            .tokens_sold
            .checked_add(units)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        let supply_remaining = self
            .supply_remaining
            .checked_sub(units)
            .ok_or(LaunchError::InsufficientSupply)?;
        let reserves = self
            .reserves
            .checked_add(quote.net)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        let (platform_fee_accrued, creator_fee_accrued) = self.accrue(&quote)?;

        self.tokens_sold = tokens_sold;
        self.supply_remaining = supply_remaining;
        self.reserves = reserves;
        self.platform_fee_accrued = platform_fee_accrued;
        self.creator_fee_accrued = creator_fee_accrued;

        Ok(TradeOutcome {
            quote,
            graduated: self.check_graduation(),
        })
    }

    pub fn apply_sell(&mut self, units: u64, min_payout: u64) -> Result<TradeOutcome> {
        let quote = self.quote_sell(units)?;
        require!(quote.net >= min_payout, LaunchError::SlippageExceeded);
        require!(quote.gross <= self.reserves, LaunchError::InsufficientReserves);

        let tokens_sold = self
            .tokens_sold
            .checked_sub(units)
            .ok_or(LaunchError::InsufficientSold)?;
        let supply_remaining = self
            .supply_remaining
            .checked_add(units)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        let reserves = self.reserves - quote.gross;
        let (platform_fee_accrued, creator_fee_accrued) = self.accrue(&quote)?;

        self.tokens_sold = tokens_sold;
        self.supply_remaining = supply_remaining;
        self.reserves = reserves;
        self.platform_fee_accrued = platform_fee_accrued;
        self.creator_fee_accrued = creator_fee_accrued;

        Ok(TradeOutcome {
            quote,
            graduated: self.check_graduation(),
        })
    }

    fn accrue(&self, quote: &TradeQuote) -> Result<(u64, u64)> {
        let platform = self
            .platform_fee_accrued
            .checked_add(quote.platform_fee)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        let creator = self
            .creator_fee_accrued
            .checked_add(quote.creator_fee)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        Ok((platform, creator))
    }

    /// Zeroes both fee balances and returns what they held. Allowed after graduation.
    pub fn take_fees(&mut self) -> Result<FeeWithdrawal> {
        self.take_fee_shares(true, true)
    }

    /// Like `take_fees`, but a share that is not selected stays accrued.
    pub fn take_fee_shares(&mut self, platform: bool, creator: bool) -> Result<FeeWithdrawal> {
        require!(self.is_initialized(), LaunchError::NotInitialized);

        let withdrawal = FeeWithdrawal {
            platform: if platform { self.platform_fee_accrued } else { 0 },
            creator: if creator { self.creator_fee_accrued } else { 0 },
        };
        self.platform_fee_accrued -= withdrawal.platform;
        self.creator_fee_accrued -= withdrawal.creator;

        Ok(withdrawal)
    }

    /// One-way transition to graduated. Returns true only on the transition itself.
    pub fn check_graduation(&mut self) -> bool {
        if !self.graduated && self.reserves >= self.graduation_target {
            self.graduated = true;
            return true;
        }
        false
    }

    /// Externally requested graduation check. Returns whether the launch graduated.
    pub fn graduate(&mut self) -> Result<bool> {
        require!(self.is_initialized(), LaunchError::NotInitialized);
        require!(!self.graduated, LaunchError::AlreadyGraduated);
        Ok(self.check_graduation())
    }
}
