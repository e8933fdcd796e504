//! Whole-unit to raw token amount conversion.
//!
//! The ledger counts whole tokens. Token transfers move raw amounts scaled by
//! the mint's decimals.

use anchor_lang::prelude::*;

use crate::errors::LaunchError;

pub fn unit_scale(decimals: u8) -> Result<u64> {
    10u64
        .checked_pow(decimals as u32)
        .ok_or_else(|| error!(LaunchError::ArithmeticOverflow))
}

pub fn to_raw(units: u64, decimals: u8) -> Result<u64> {
    units
        .checked_mul(unit_scale(decimals)?)
        .ok_or_else(|| error!(LaunchError::ArithmeticOverflow))
}
