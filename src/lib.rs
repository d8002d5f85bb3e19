//! Bonding Curve Client Library
//!
//! Offline client core for a Solana bonding curve program: address
//! derivation, account decoding and curve pricing. Nothing here performs
//! network I/O.

pub mod cli;
pub mod config;
pub mod curve;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
