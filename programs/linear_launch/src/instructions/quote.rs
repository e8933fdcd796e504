use anchor_lang::prelude::*;

use crate::constants::LAUNCH_STATE_SEED;
use crate::curve::TradeQuote;
use crate::state::Launch;

/// Read-only pricing against the current launch state.
#[derive(Accounts)]
pub struct QuoteLaunch<'info> {
    #[account(
        seeds = [LAUNCH_STATE_SEED, launch.mint.as_ref()],
        bump = launch.bump,
    )]
    pub launch: Account<'info, Launch>,
}

impl<'info> QuoteLaunch<'info> {
    pub fn quote_buy(&self, units: u64) -> Result<TradeQuote> {
        self.launch.quote_buy(units)
    }

    pub fn quote_sell(&self, units: u64) -> Result<TradeQuote> {
        self.launch.quote_sell(units)
    }
}
