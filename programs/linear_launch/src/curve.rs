//! Linear bonding curve pricing.
//!
//! Unit `n` (0-indexed over all units ever sold) is priced at
//! `base_price + slope * n`. Buying `k` units starting at offset `s` costs the
//! arithmetic series
//!
//! ```text
//! cost(s, k) = base_price * k + slope * (s * k + k * (k - 1) / 2)
//! ```
//!
//! Selling `k` units refunds the same series evaluated at `s - k`, so the
//! curve is symmetric and there is no separate discount function.

use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::errors::LaunchError;

/// Amounts for one buy or sell, all in the smallest currency unit.
///
/// For a buy `gross` is what the buyer pays and `net` is what lands in
/// reserves. For a sell `gross` is what leaves reserves and `net` is what
/// the seller receives.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TradeQuote {
    pub units: u64,
    pub gross: u64,
    pub platform_fee: u64,
    pub creator_fee: u64,
    pub net: u64,
}

/// Cost of `units` units starting at curve offset `start`.
///
/// Computed in u128 and rejected with `ArithmeticOverflow` if the result does
/// not fit the u64 currency type.
pub fn cost(base_price: u64, slope: u64, start: u64, units: u64) -> Result<u64> {
    if units == 0 {
        return Ok(0);
    }

    let base_price = base_price as u128;
    let slope = slope as u128;
    let start = start as u128;
    let units = units as u128;

    // units * (units - 1) is always even
    let triangle = units
        .checked_mul(units - 1)
        .map(|v| v / 2)
        .ok_or(LaunchError::ArithmeticOverflow)?;

    let offset = start
        .checked_mul(units)
        .and_then(|v| v.checked_add(triangle))
        .ok_or(LaunchError::ArithmeticOverflow)?;

    let total = base_price
        .checked_mul(units)
        .and_then(|flat| slope.checked_mul(offset).and_then(|ramp| flat.checked_add(ramp)))
        .ok_or(LaunchError::ArithmeticOverflow)?;

    u64::try_from(total).map_err(|_| error!(LaunchError::ArithmeticOverflow))
}

/// Splits `gross` into platform fee, creator fee and the remainder.
///
/// Fees truncate toward zero so any rounding dust stays with `net`.
pub fn split_fees(units: u64, gross: u64, fee_bps: u16, creator_fee_bps: u16) -> Result<TradeQuote> {
    let platform_fee = bps_of(gross, fee_bps)?;
    let creator_fee = bps_of(gross, creator_fee_bps)?;
    let net = gross
        .checked_sub(platform_fee)
        .and_then(|v| v.checked_sub(creator_fee))
        .ok_or(LaunchError::ArithmeticOverflow)?;

    Ok(TradeQuote {
        units,
        gross,
        platform_fee,
        creator_fee,
        net,
    })
}

fn bps_of(amount: u64, bps: u16) -> Result<u64> {
    let share = (amount as u128)
        .checked_mul(bps as u128)
        .ok_or(LaunchError::ArithmeticOverflow)?
        / BPS_DENOMINATOR as u128;

    u64::try_from(share).map_err(|_| error!(LaunchError::ArithmeticOverflow))
}
