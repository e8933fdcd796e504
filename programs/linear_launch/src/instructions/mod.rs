pub mod graduate;
pub mod initialize_launch;
pub mod quote;
pub mod trade;
pub mod vault;
pub mod withdraw_fees;

pub use graduate::*;
pub use initialize_launch::*;
pub use quote::*;
pub use trade::*;
pub use withdraw_fees::*;
