use anchor_lang::prelude::*;

#[error_code]
pub enum LaunchError {
    #[msg("Launch already initialized for this mint")]
    AlreadyInitialized,
    #[msg("Platform and creator fees exceed 100%")]
    InvalidFeeConfiguration,
    #[msg("Launch not initialized")]
    NotInitialized,
    #[msg("Launch has graduated and is closed for trading")]
    AlreadyGraduated,
    #[msg("Quoted cost or payout is outside the caller's bound")]
    SlippageExceeded,
    #[msg("Not enough supply remaining")]
    InsufficientSupply,
    #[msg("Cannot sell more than has been sold")]
    InsufficientSold,
    #[msg("Reserves cannot cover the payout")]
    InsufficientReserves,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Initial supply must be greater than zero")]
    InvalidSupply,
    #[msg("Token vault holds less than the initial supply")]
    VaultUnderfunded,
    #[msg("Token vault does not match the launch")]
    InvalidVault,
    #[msg("Insufficient token balance")]
    InsufficientTokenBalance,
    #[msg("Creator does not match the launch")]
    InvalidCreator,
    #[msg("Platform fee recipient does not match the launch")]
    InvalidPlatformRecipient,
}
