use anchor_lang::prelude::*;

/// Emitted once when a launch record is created.
#[event]
pub struct LaunchInitialized {
    pub mint: Pubkey,
    pub launch: Pubkey,
    pub creator: Pubkey,
    pub platform_fee_recipient: Pubkey,
    pub base_price: u64,
    pub slope: u64,
    pub fee_bps: u16,
    pub creator_fee_bps: u16,
    pub graduation_target: u64,
    pub initial_supply: u64,
    pub timestamp: i64,
}

#[event]
pub struct TokensBought {
    pub mint: Pubkey,
    pub buyer: Pubkey,
    pub units: u64,
    /// Currency paid by the buyer, fees included.
    pub cost: u64,
    pub platform_fee: u64,
    pub creator_fee: u64,
    pub tokens_sold: u64,
    pub reserves: u64,
    pub timestamp: i64,
}

#[event]
pub struct TokensSold {
    pub mint: Pubkey,
    pub seller: Pubkey,
    pub units: u64,
    /// Currency received by the seller, fees deducted.
    pub payout: u64,
    pub platform_fee: u64,
    pub creator_fee: u64,
    pub tokens_sold: u64,
    pub reserves: u64,
    pub timestamp: i64,
}

#[event]
pub struct FeesWithdrawn {
    pub mint: Pubkey,
    pub platform_fee_recipient: Pubkey,
    pub platform_paid: u64,
    pub creator: Pubkey,
    pub creator_paid: u64,
    pub timestamp: i64,
}

#[event]
pub struct LaunchGraduated {
    pub mint: Pubkey,
    pub reserves: u64,
    pub tokens_sold: u64,
    pub timestamp: i64,
}
