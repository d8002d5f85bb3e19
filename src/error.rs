//! Error types for the bonding curve client

use thiserror::Error;

use crate::curve::program::AccountKind;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the bonding curve client
#[derive(Error, Debug, Clone)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Address derivation errors
    #[error("Invalid seeds: {0}")]
    InvalidSeeds(String),

    #[error("No off-curve bump found for {seeds} seed(s) under program {program_id}")]
    DerivationExhausted { program_id: String, seeds: usize },

    // Account decode errors
    #[error("Discriminator mismatch for {kind}: expected {expected:?}, got {actual:?}")]
    DiscriminatorMismatch {
        kind: AccountKind,
        expected: [u8; 8],
        actual: [u8; 8],
    },

    #[error("Truncated {kind} account data: need at least {expected} bytes, got {actual}")]
    TruncatedAccountData {
        kind: AccountKind,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid {field} tag {tag} at offset {offset}")]
    InvalidEnumTag {
        field: &'static str,
        tag: u8,
        offset: usize,
    },

    #[error("Read of {needed} bytes at offset {offset} overruns {len}-byte buffer")]
    BufferOverrun {
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("Unknown account discriminator: {0:?}")]
    UnknownDiscriminator([u8; 8]),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // Pricing errors
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid reserve ratio: {0} basis points")]
    InvalidReserveRatio(u16),

    #[error("Arithmetic overflow in {0}")]
    ArithmeticOverflow(&'static str),

    #[error("Unsupported bonding curve type: {0}")]
    UnsupportedCurveType(u8),

    #[error("Insufficient supply: cannot sell {amount} out of {supply}")]
    InsufficientSupply { amount: u64, supply: u64 },
}

impl Error {
    /// Check if this error came from decoding account bytes
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Error::DiscriminatorMismatch { .. }
                | Error::TruncatedAccountData { .. }
                | Error::InvalidEnumTag { .. }
                | Error::BufferOverrun { .. }
                | Error::UnknownDiscriminator(_)
                | Error::InvariantViolation(_)
        )
    }

    /// Check if this error came from a pricing calculation
    pub fn is_pricing_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidAmount(_)
                | Error::InvalidReserveRatio(_)
                | Error::ArithmeticOverflow(_)
                | Error::UnsupportedCurveType(_)
                | Error::InsufficientSupply { .. }
        )
    }
}
