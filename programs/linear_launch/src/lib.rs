/*
 ██╗     ██╗███╗   ██╗███████╗ █████╗ ██████╗     ██╗      █████╗ ██╗   ██╗███╗   ██╗ ██████╗██╗  ██╗
 ██║     ██║████╗  ██║██╔════╝██╔══██╗██╔══██╗    ██║     ██╔══██╗██║   ██║████╗  ██║██╔════╝██║  ██║
 ██║     ██║██╔██╗ ██║█████╗  ███████║██████╔╝    ██║     ███████║██║   ██║██╔██╗ ██║██║     ███████║
 ██║     ██║██║╚██╗██║██╔══╝  ██╔══██║██╔══██╗    ██║     ██╔══██║██║   ██║██║╚██╗██║██║     ██╔══██║
 ███████╗██║██║ ╚████║███████╗██║  ██║██║  ██║    ███████╗██║  ██║╚██████╔╝██║ ╚████║╚██████╗██║  ██║
 ╚══════╝╚═╝╚═╝  ╚═══╝╚══════╝╚═╝  ╚═╝╚═╝  ╚═╝    ╚══════╝╚═╝  ╚═╝ ╚═════╝ ╚═╝  ╚═══╝ ╚═════╝╚═╝  ╚═╝

  Linear Bonding Curve Token Launch Ledger for Solana

 Price
   ^
   |                                    /
   |                               /
   |                          /
   |                     /
   |                /
   |           /
   |      /
   | /            price(n) = base_price + slope * n
   +---------------------------------> Tokens Sold

 Launch -> Buy / Sell -> Graduate -> Withdraw Fees
*/

use anchor_lang::prelude::*;

pub mod constants;
pub mod curve;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod units;

use curve::TradeQuote;
use instructions::*;
use state::LaunchParams;

declare_id!("8J1B4J1Ux8eF89vkokvmSyrLHNUYUYVBAxB7h9Vmc47");

#[program]
pub mod linear_launch {
    use super::*;

    pub fn initialize_launch(ctx: Context<InitializeLaunch>, params: LaunchParams) -> Result<()> {
        ctx.accounts.initialize_launch(params, ctx.bumps)
    }

    pub fn buy(ctx: Context<TradeLaunch>, units: u64, max_cost: u64) -> Result<()> {
        ctx.accounts.buy(units, max_cost)
    }

    pub fn sell(ctx: Context<TradeLaunch>, units: u64, min_payout: u64) -> Result<()> {
        ctx.accounts.sell(units, min_payout)
    }

    pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
        ctx.accounts.withdraw_fees()
    }

    pub fn graduate(ctx: Context<Graduate>) -> Result<()> {
        ctx.accounts.graduate()
    }

    pub fn quote_buy(ctx: Context<QuoteLaunch>, units: u64) -> Result<TradeQuote> {
        ctx.accounts.quote_buy(units)
    }

    pub fn quote_sell(ctx: Context<QuoteLaunch>, units: u64) -> Result<TradeQuote> {
        ctx.accounts.quote_sell(units)
    }
}
