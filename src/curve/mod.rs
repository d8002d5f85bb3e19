//! Bonding curve program client
//!
//! # WARNING: Layouts track one program build
//! Seeds, discriminators and account layouts must match the deployed
//! program byte for byte. A program upgrade that reorders fields breaks
//! decoding loudly, but a changed seed breaks derivation silently.

pub mod accounts;
pub mod allocation;
pub mod cursor;
pub mod fees;
pub mod launchpad;
pub mod pda;
pub mod price;
pub mod program;
pub mod ratio;

// Re-export commonly used types
pub use accounts::{
    decode_account, decode_any, AccountRecord, BondingCurveState, BondingCurveType,
    CurveConfiguration, ProgramAccount, Recipient,
};
pub use allocation::{Allocation, Vesting};
pub use launchpad::{BuyerAccount, FairLaunchData, WhitelistLaunchData};
pub use pda::{derive_address, DerivedAddress, PoolAddresses};
pub use price::{BuyQuote, CurveParams};
pub use program::{AccountKind, DEFAULT_PROGRAM_ID};
pub use ratio::Ratio;
