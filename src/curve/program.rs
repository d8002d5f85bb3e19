//! Bonding curve program constants, seed prefixes and account discriminators
//!
//! # WARNING: These constants are a wire contract
//! Every program-derived address is a pure function of the seed bytes
//! below. A single changed byte derives a different address and the only
//! symptom is "account not found" at fetch time.
//!
//! # How discriminators are calculated
//! Anchor prefixes every account with the first 8 bytes of
//! SHA-256("account:<StructName>").

use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Devnet deployment of the bonding curve program
pub const DEFAULT_PROGRAM_ID_STR: &str = "CB18NKSvKunD2xeuvEkKfBxuz4fJFJJ8GPy5w1dMzN1";

/// Token-2022 program ID
pub const TOKEN_2022_PROGRAM_ID_STR: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PQnBb9Fi4vGbMb";

lazy_static::lazy_static! {
    /// Default bonding curve program ID as Pubkey
    pub static ref DEFAULT_PROGRAM_ID: Pubkey =
        Pubkey::from_str(DEFAULT_PROGRAM_ID_STR).expect("Invalid bonding curve program ID");

    /// Token-2022 program ID as Pubkey
    pub static ref TOKEN_2022_PROGRAM_ID: Pubkey =
        Pubkey::from_str(TOKEN_2022_PROGRAM_ID_STR).expect("Invalid Token-2022 program ID");
}

/// Seed prefixes, byte-identical to the on-chain program
#[allow(non_snake_case)]
pub mod SEEDS {
    /// [prefix, mint]
    pub const CURVE_CONFIGURATION: &[u8] = b"curve_configuration";

    /// [prefix, mint]
    pub const BONDING_CURVE: &[u8] = b"bonding_curve";

    /// [prefix, mint]
    pub const SOL_VAULT: &[u8] = b"liquidity_sol_vault";

    /// [prefix, wallet, mint]
    pub const ALLOCATION: &[u8] = b"allocation";

    /// [prefix, launch authority]
    pub const LAUNCHPAD: &[u8] = b"launchpad";

    /// [prefix, mint]
    pub const WHITELIST_DATA: &[u8] = b"whitelist_data";

    /// [prefix, mint]
    pub const FAIR_LAUNCH_DATA: &[u8] = b"fair_launch_data";

    /// [prefix, fair launch data]
    pub const CONTRIBUTION_VAULT: &[u8] = b"fair_launch_vault";

    /// [prefix, launch data, buyer]
    pub const BUYER: &[u8] = b"buyer";
}

/// Account discriminators (first 8 bytes of account data)
#[allow(non_snake_case)]
pub mod ACCOUNT_DISCRIMINATORS {
    /// SHA-256("account:CurveConfiguration")[0..8]
    pub const CURVE_CONFIGURATION: [u8; 8] = [225, 242, 252, 198, 63, 77, 56, 255];

    /// SHA-256("account:BondingCurve")[0..8]
    pub const BONDING_CURVE: [u8; 8] = [23, 183, 248, 55, 96, 216, 172, 96];

    /// SHA-256("account:Allocation")[0..8]
    pub const ALLOCATION: [u8; 8] = [147, 154, 3, 177, 155, 25, 131, 176];

    /// SHA-256("account:FairLaunchData")[0..8]
    pub const FAIR_LAUNCH_DATA: [u8; 8] = [57, 202, 184, 68, 36, 58, 87, 78];

    /// SHA-256("account:WhitelistLaunchData")[0..8]
    pub const WHITELIST_LAUNCH_DATA: [u8; 8] = [51, 40, 81, 92, 105, 169, 42, 41];

    /// SHA-256("account:BuyerAccount")[0..8]
    pub const BUYER_ACCOUNT: [u8; 8] = [132, 99, 140, 101, 194, 67, 194, 66];
}

/// Account types written by the bonding curve program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    CurveConfiguration,
    BondingCurve,
    Allocation,
    FairLaunchData,
    WhitelistLaunchData,
    BuyerAccount,
}

impl AccountKind {
    pub const ALL: [AccountKind; 6] = [
        AccountKind::CurveConfiguration,
        AccountKind::BondingCurve,
        AccountKind::Allocation,
        AccountKind::FairLaunchData,
        AccountKind::WhitelistLaunchData,
        AccountKind::BuyerAccount,
    ];

    /// On-chain struct name, the preimage suffix of the discriminator
    pub fn struct_name(&self) -> &'static str {
        match self {
            AccountKind::CurveConfiguration => "CurveConfiguration",
            AccountKind::BondingCurve => "BondingCurve",
            AccountKind::Allocation => "Allocation",
            AccountKind::FairLaunchData => "FairLaunchData",
            AccountKind::WhitelistLaunchData => "WhitelistLaunchData",
            AccountKind::BuyerAccount => "BuyerAccount",
        }
    }

    /// Expected discriminator for this account kind
    pub fn discriminator(&self) -> [u8; 8] {
        match self {
            AccountKind::CurveConfiguration => ACCOUNT_DISCRIMINATORS::CURVE_CONFIGURATION,
            AccountKind::BondingCurve => ACCOUNT_DISCRIMINATORS::BONDING_CURVE,
            AccountKind::Allocation => ACCOUNT_DISCRIMINATORS::ALLOCATION,
            AccountKind::FairLaunchData => ACCOUNT_DISCRIMINATORS::FAIR_LAUNCH_DATA,
            AccountKind::WhitelistLaunchData => ACCOUNT_DISCRIMINATORS::WHITELIST_LAUNCH_DATA,
            AccountKind::BuyerAccount => ACCOUNT_DISCRIMINATORS::BUYER_ACCOUNT,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::CurveConfiguration => write!(f, "curve-configuration"),
            AccountKind::BondingCurve => write!(f, "bonding-curve"),
            AccountKind::Allocation => write!(f, "allocation"),
            AccountKind::FairLaunchData => write!(f, "fair-launch"),
            AccountKind::WhitelistLaunchData => write!(f, "whitelist-launch"),
            AccountKind::BuyerAccount => write!(f, "buyer"),
        }
    }
}

impl FromStr for AccountKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s || kind.struct_name() == s)
            .ok_or_else(|| Error::Config(format!("Unknown account kind: {}", s)))
    }
}

/// Identify the account kind from the leading discriminator
pub fn match_discriminator(data: &[u8]) -> Option<AccountKind> {
    if data.len() < 8 {
        return None;
    }

    let discriminator: [u8; 8] = data[..8].try_into().ok()?;

    AccountKind::ALL
        .into_iter()
        .find(|kind| kind.discriminator() == discriminator)
}

/// Calculate account discriminator from struct name
/// This follows Anchor's convention: SHA-256("account:<Name>")[0..8]
pub fn calculate_discriminator(struct_name: &str) -> [u8; 8] {
    use sha2::{Digest, Sha256};

    let preimage = format!("account:{}", struct_name);
    let hash = Sha256::digest(preimage.as_bytes());

    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}
