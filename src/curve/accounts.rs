//! Bonding curve account structures and decoding
//!
//! # WARNING: These layouts must match the on-chain program exactly
//! Fields are read in declaration order with a running offset. A layout
//! change on-chain without a matching change here reads garbage, so every
//! decode checks the discriminator and the minimum length implied by the
//! fields read so far.

use borsh::BorshSerialize;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use super::allocation::Allocation;
use super::cursor::AccountCursor;
use super::launchpad::{BuyerAccount, FairLaunchData, WhitelistLaunchData};
use super::pda;
use super::price::{BuyQuote, CurveParams};
use super::program::{match_discriminator, AccountKind};
use super::ratio::Ratio;
use crate::error::{Error, Result};

pub const DISCRIMINATOR_LEN: usize = 8;
pub const PUBKEY_LEN: usize = 32;

/// A record the bonding curve program stores in an account
pub trait AccountRecord: BorshSerialize + Sized {
    const KIND: AccountKind;

    /// Smallest valid account: empty vectors, absent options
    const MIN_LEN: usize;

    /// Read the fields following the discriminator
    fn read_fields(cursor: &mut AccountCursor<'_>) -> Result<Self>;

    /// Decode raw account bytes, discriminator included
    fn decode(data: &[u8]) -> Result<Self> {
        // Discriminator before MIN_LEN: a foreign account is a mismatch at any length
        require_len(Self::KIND, data.len(), DISCRIMINATOR_LEN)?;
        check_discriminator(Self::KIND, data)?;
        require_len(Self::KIND, data.len(), Self::MIN_LEN)?;

        let mut cursor = AccountCursor::new(data);
        cursor.read_bytes(DISCRIMINATOR_LEN)?;
        let record = Self::read_fields(&mut cursor)?;

        debug!(
            kind = %Self::KIND,
            len = data.len(),
            consumed = cursor.offset(),
            "Decoded account"
        );
        Ok(record)
    }

    /// Encode as the program would, discriminator first
    fn to_account_data(&self) -> Result<Vec<u8>> {
        let mut data = Self::KIND.discriminator().to_vec();
        borsh::to_writer(&mut data, self)
            .map_err(|e| Error::Serialization(format!("Borsh encode failed: {}", e)))?;
        Ok(data)
    }
}

/// Fail with `TruncatedAccountData` unless `actual >= expected`
pub(crate) fn require_len(kind: AccountKind, actual: usize, expected: usize) -> Result<()> {
    if actual < expected {
        return Err(Error::TruncatedAccountData {
            kind,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_discriminator(kind: AccountKind, data: &[u8]) -> Result<()> {
    let mut actual = [0u8; DISCRIMINATOR_LEN];
    actual.copy_from_slice(&data[..DISCRIMINATOR_LEN]);

    let expected = kind.discriminator();
    if actual != expected {
        return Err(Error::DiscriminatorMismatch {
            kind,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Pricing formula selected by the curve configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize)]
pub enum BondingCurveType {
    Linear,
    Quadratic,
}

impl BondingCurveType {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(BondingCurveType::Linear),
            1 => Some(BondingCurveType::Quadratic),
            _ => None,
        }
    }
}

impl TryFrom<u8> for BondingCurveType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        BondingCurveType::from_tag(value).ok_or(Error::UnsupportedCurveType(value))
    }
}

impl From<BondingCurveType> for u8 {
    fn from(curve_type: BondingCurveType) -> Self {
        match curve_type {
            BondingCurveType::Linear => 0,
            BondingCurveType::Quadratic => 1,
        }
    }
}

impl std::fmt::Display for BondingCurveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BondingCurveType::Linear => write!(f, "linear"),
            BondingCurveType::Quadratic => write!(f, "quadratic"),
        }
    }
}

impl std::str::FromStr for BondingCurveType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linear" | "0" => Ok(BondingCurveType::Linear),
            "quadratic" | "1" => Ok(BondingCurveType::Quadratic),
            _ => Err(Error::Config(format!("Unknown curve type: {}", s))),
        }
    }
}

/// Fee recipient entry, in distribution order
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct Recipient {
    pub address: Pubkey,
    /// Share of collected fees in basis points
    pub share: u16,
    pub amount: u64,
    /// Absolute unix timestamp before which the share stays locked
    pub locking_period: i64,
}

impl Recipient {
    pub const LEN: usize = 32 + // address
        2 + // share
        8 + // amount
        8; // locking_period

    fn read(cursor: &mut AccountCursor<'_>) -> Result<Self> {
        Ok(Self {
            address: cursor.read_pubkey()?,
            share: cursor.read_u16()?,
            amount: cursor.read_u64()?,
            locking_period: cursor.read_i64()?,
        })
    }

    pub fn is_unlocked(&self, now: i64) -> bool {
        now >= self.locking_period
    }
}

/// Global parameters of one bonding curve instance
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct CurveConfiguration {
    pub global_admin: Pubkey,
    pub fee_admin: Pubkey,
    pub initial_quorum: u64,
    pub use_dao: bool,
    pub governance: Pubkey,
    /// Basis points
    pub dao_quorum: u16,
    pub locked_liquidity: bool,
    /// Reserve balance (lamports) at which the curve stops accepting buys
    pub target_liquidity: u64,
    /// Basis points
    pub fee_percentage: u16,
    pub fees_enabled: bool,
    pub bonding_curve_type: BondingCurveType,
    pub max_token_supply: u64,
    /// Seconds
    pub liquidity_lock_period: i64,
    pub liquidity_pool_percentage: u16,
    pub initial_price: u64,
    pub initial_supply: u64,
    pub fee_recipients: Vec<Recipient>,
    pub total_fees_collected: u64,
    /// Basis points; slope parameter of both curve types
    pub reserve_ratio: u16,
}

impl CurveConfiguration {
    /// Bytes after the fee recipient vector
    const TAIL_LEN: usize = 8 + // total_fees_collected
        2; // reserve_ratio

    pub fn curve_params(&self) -> Result<CurveParams> {
        CurveParams::from_config(self)
    }

    pub fn total_fee_shares(&self) -> u32 {
        self.fee_recipients.iter().map(|r| r.share as u32).sum()
    }

    /// Shares must cover exactly 100% before a fee split means anything
    pub fn validate_fee_shares(&self) -> Result<()> {
        let total = self.total_fee_shares();
        if total != 10_000 {
            return Err(Error::InvariantViolation(format!(
                "fee recipient shares sum to {} basis points, expected 10000",
                total
            )));
        }
        Ok(())
    }
}

impl AccountRecord for CurveConfiguration {
    const KIND: AccountKind = AccountKind::CurveConfiguration;

    const MIN_LEN: usize = DISCRIMINATOR_LEN +
        32 + // global_admin
        32 + // fee_admin
        8 + // initial_quorum
        1 + // use_dao
        32 + // governance
        2 + // dao_quorum
        1 + // locked_liquidity
        8 + // target_liquidity
        2 + // fee_percentage
        1 + // fees_enabled
        1 + // bonding_curve_type
        8 + // max_token_supply
        8 + // liquidity_lock_period
        2 + // liquidity_pool_percentage
        8 + // initial_price
        8 + // initial_supply
        4 + // fee_recipients length
        Self::TAIL_LEN;

    fn read_fields(cursor: &mut AccountCursor<'_>) -> Result<Self> {
        let global_admin = cursor.read_pubkey()?;
        let fee_admin = cursor.read_pubkey()?;
        let initial_quorum = cursor.read_u64()?;
        let use_dao = cursor.read_bool()?;
        let governance = cursor.read_pubkey()?;
        let dao_quorum = cursor.read_u16()?;
        let locked_liquidity = cursor.read_bool()?;
        let target_liquidity = cursor.read_u64()?;
        let fee_percentage = cursor.read_u16()?;
        let fees_enabled = cursor.read_bool()?;

        let tag_offset = cursor.offset();
        let tag = cursor.read_u8()?;
        let bonding_curve_type =
            BondingCurveType::from_tag(tag).ok_or(Error::InvalidEnumTag {
                field: "bonding_curve_type",
                tag,
                offset: tag_offset,
            })?;

        let max_token_supply = cursor.read_u64()?;
        let liquidity_lock_period = cursor.read_i64()?;
        let liquidity_pool_percentage = cursor.read_u16()?;
        let initial_price = cursor.read_u64()?;
        let initial_supply = cursor.read_u64()?;

        // Bound the vector by the buffer before allocating for it
        let count = cursor.read_len()?;
        let needed = count
            .checked_mul(Recipient::LEN)
            .and_then(|n| n.checked_add(cursor.offset()))
            .and_then(|n| n.checked_add(Self::TAIL_LEN))
            .unwrap_or(usize::MAX);
        require_len(Self::KIND, cursor.len(), needed)?;

        let mut fee_recipients = Vec::with_capacity(count);
        for _ in 0..count {
            fee_recipients.push(Recipient::read(cursor)?);
        }

        Ok(Self {
            global_admin,
            fee_admin,
            initial_quorum,
            use_dao,
            governance,
            dao_quorum,
            locked_liquidity,
            target_liquidity,
            fee_percentage,
            fees_enabled,
            bonding_curve_type,
            max_token_supply,
            liquidity_lock_period,
            liquidity_pool_percentage,
            initial_price,
            initial_supply,
            fee_recipients,
            total_fees_collected: cursor.read_u64()?,
            reserve_ratio: cursor.read_u16()?,
        })
    }
}

/// Live state of one bonding curve
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct BondingCurveState {
    pub creator: Pubkey,
    /// Tokens issued so far; the input of every pricing formula
    pub total_supply: u64,
    /// Lamports held by the curve
    pub reserve_balance: u64,
    /// Token smallest units held by the curve's vault
    pub reserve_token: u64,
    pub token: Pubkey,
    pub bump: u8,
}

impl BondingCurveState {
    /// Spot price at the current supply
    pub fn spot_price(&self, config: &CurveConfiguration) -> Result<Ratio> {
        config.curve_params()?.price(self.total_supply)
    }

    pub fn market_cap(&self, config: &CurveConfiguration) -> Result<Ratio> {
        config.curve_params()?.market_cap(self.total_supply)
    }

    /// Estimate buying `amount` tokens from the current supply
    pub fn quote_buy(&self, config: &CurveConfiguration, amount: u64) -> Result<BuyQuote> {
        config.curve_params()?.quote_buy(self.total_supply, amount)
    }

    /// Fraction of the target liquidity already held in reserve
    pub fn liquidity_progress(&self, config: &CurveConfiguration) -> Result<Ratio> {
        if config.target_liquidity == 0 {
            return Err(Error::InvalidAmount(
                "target liquidity is zero".to_string(),
            ));
        }
        Ratio::new(
            self.reserve_balance as i128,
            config.target_liquidity as i128,
        )
    }

    pub fn is_target_liquidity_reached(&self, config: &CurveConfiguration) -> bool {
        self.reserve_balance >= config.target_liquidity
    }

    /// Check the stored bump against this curve's own derivation
    pub fn verify_bump(&self, program_id: &Pubkey) -> Result<bool> {
        Ok(pda::bonding_curve(program_id, &self.token)?.bump == self.bump)
    }
}

impl AccountRecord for BondingCurveState {
    const KIND: AccountKind = AccountKind::BondingCurve;

    const MIN_LEN: usize = DISCRIMINATOR_LEN +
        32 + // creator
        8 + // total_supply
        8 + // reserve_balance
        8 + // reserve_token
        32 + // token
        1; // bump

    fn read_fields(cursor: &mut AccountCursor<'_>) -> Result<Self> {
        Ok(Self {
            creator: cursor.read_pubkey()?,
            total_supply: cursor.read_u64()?,
            reserve_balance: cursor.read_u64()?,
            reserve_token: cursor.read_u64()?,
            token: cursor.read_pubkey()?,
            bump: cursor.read_u8()?,
        })
    }
}

/// Any decoded bonding curve program account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramAccount {
    CurveConfiguration(CurveConfiguration),
    BondingCurve(BondingCurveState),
    Allocation(Allocation),
    FairLaunch(FairLaunchData),
    Whitelist(WhitelistLaunchData),
    Buyer(BuyerAccount),
}

impl ProgramAccount {
    pub fn kind(&self) -> AccountKind {
        match self {
            ProgramAccount::CurveConfiguration(_) => AccountKind::CurveConfiguration,
            ProgramAccount::BondingCurve(_) => AccountKind::BondingCurve,
            ProgramAccount::Allocation(_) => AccountKind::Allocation,
            ProgramAccount::FairLaunch(_) => AccountKind::FairLaunchData,
            ProgramAccount::Whitelist(_) => AccountKind::WhitelistLaunchData,
            ProgramAccount::Buyer(_) => AccountKind::BuyerAccount,
        }
    }
}

/// Decode raw account bytes as the requested kind
pub fn decode_account(data: &[u8], kind: AccountKind) -> Result<ProgramAccount> {
    Ok(match kind {
        AccountKind::CurveConfiguration => {
            ProgramAccount::CurveConfiguration(CurveConfiguration::decode(data)?)
        }
        AccountKind::BondingCurve => ProgramAccount::BondingCurve(BondingCurveState::decode(data)?),
        AccountKind::Allocation => ProgramAccount::Allocation(Allocation::decode(data)?),
        AccountKind::FairLaunchData => ProgramAccount::FairLaunch(FairLaunchData::decode(data)?),
        AccountKind::WhitelistLaunchData => {
            ProgramAccount::Whitelist(WhitelistLaunchData::decode(data)?)
        }
        AccountKind::BuyerAccount => ProgramAccount::Buyer(BuyerAccount::decode(data)?),
    })
}

/// Decode raw account bytes, taking the kind from the discriminator
pub fn decode_any(data: &[u8]) -> Result<ProgramAccount> {
    let kind = match_discriminator(data).ok_or_else(|| {
        let mut actual = [0u8; DISCRIMINATOR_LEN];
        let n = data.len().min(DISCRIMINATOR_LEN);
        actual[..n].copy_from_slice(&data[..n]);
        Error::UnknownDiscriminator(actual)
    })?;
    decode_account(data, kind)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_config(curve_type: BondingCurveType, reserve_ratio: u16) -> CurveConfiguration {
        let admin = Pubkey::new_unique();
        CurveConfiguration {
            global_admin: admin,
            fee_admin: admin,
            initial_quorum: 1_000,
            use_dao: false,
            governance: Pubkey::new_unique(),
            dao_quorum: 500,
            locked_liquidity: false,
            target_liquidity: 85_000_000_000,
            fee_percentage: 100,
            fees_enabled: true,
            bonding_curve_type: curve_type,
            max_token_supply: 1_000_000_000_000_000,
            liquidity_lock_period: -3_600,
            liquidity_pool_percentage: 50,
            initial_price: 1_000,
            initial_supply: 1_000_000_000,
            fee_recipients: vec![
                Recipient {
                    address: Pubkey::new_unique(),
                    share: 7_000,
                    amount: 12,
                    locking_period: 1_700_000_000,
                },
                Recipient {
                    address: Pubkey::new_unique(),
                    share: 3_000,
                    amount: u64::MAX,
                    locking_period: i64::MIN,
                },
            ],
            total_fees_collected: 55,
            reserve_ratio,
        }
    }

    pub(crate) fn sample_curve(total_supply: u64) -> BondingCurveState {
        BondingCurveState {
            creator: Pubkey::new_unique(),
            total_supply,
            reserve_balance: 42_000_000_000,
            reserve_token: u64::MAX - 1,
            token: Pubkey::new_unique(),
            bump: 254,
        }
    }

    #[test]
    fn test_curve_configuration_round_trip() {
        let config = sample_config(BondingCurveType::Quadratic, 5_000);
        let data = config.to_account_data().unwrap();
        assert_eq!(data.len(), CurveConfiguration::MIN_LEN + 2 * Recipient::LEN);
        assert_eq!(CurveConfiguration::decode(&data).unwrap(), config);
    }

    #[test]
    fn test_curve_configuration_without_recipients() {
        let mut config = sample_config(BondingCurveType::Linear, 5_000);
        config.fee_recipients.clear();
        let data = config.to_account_data().unwrap();
        assert_eq!(data.len(), CurveConfiguration::MIN_LEN);
        assert_eq!(CurveConfiguration::decode(&data).unwrap(), config);
    }

    #[test]
    fn test_invalid_curve_tag_is_rejected() {
        let config = sample_config(BondingCurveType::Linear, 5_000);
        let mut data = config.to_account_data().unwrap();
        // discriminator + admins + quorum + use_dao + governance + dao_quorum
        // + locked + target + fee + fees_enabled
        let tag_offset = 8 + 32 + 32 + 8 + 1 + 32 + 2 + 1 + 8 + 2 + 1;
        assert_eq!(data[tag_offset], 0);
        data[tag_offset] = 2;

        match CurveConfiguration::decode(&data).unwrap_err() {
            Error::InvalidEnumTag { field, tag, offset } => {
                assert_eq!(field, "bonding_curve_type");
                assert_eq!(tag, 2);
                assert_eq!(offset, tag_offset);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_truncated_curve_configuration() {
        let mut config = sample_config(BondingCurveType::Linear, 5_000);
        config.fee_recipients.clear();
        let data = config.to_account_data().unwrap();

        let err = CurveConfiguration::decode(&data[..CurveConfiguration::MIN_LEN - 1]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedAccountData { expected, actual, .. }
                if expected == CurveConfiguration::MIN_LEN && actual == CurveConfiguration::MIN_LEN - 1
        ));
    }

    #[test]
    fn test_truncated_fee_recipients() {
        let config = sample_config(BondingCurveType::Linear, 5_000);
        let data = config.to_account_data().unwrap();
        let full = data.len();

        let err = CurveConfiguration::decode(&data[..full - 1]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedAccountData { expected, .. } if expected == full
        ));
    }

    #[test]
    fn test_absurd_recipient_count_is_truncation() {
        let mut config = sample_config(BondingCurveType::Linear, 5_000);
        config.fee_recipients.clear();
        let mut data = config.to_account_data().unwrap();
        let len_offset = CurveConfiguration::MIN_LEN - CurveConfiguration::TAIL_LEN - 4;
        data[len_offset..len_offset + 4].copy_from_slice(&u32::MAX.to_le_bytes());

        assert!(matches!(
            CurveConfiguration::decode(&data),
            Err(Error::TruncatedAccountData { .. })
        ));
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let curve = sample_curve(7);
        let mut data = curve.to_account_data().unwrap();
        data.extend_from_slice(&[0u8; 2]);
        assert_eq!(BondingCurveState::decode(&data).unwrap(), curve);
    }

    #[test]
    fn test_bonding_curve_round_trip() {
        let curve = sample_curve(100_000_000_000);
        let data = curve.to_account_data().unwrap();
        assert_eq!(data.len(), BondingCurveState::MIN_LEN);
        assert_eq!(BondingCurveState::decode(&data).unwrap(), curve);

        let err = BondingCurveState::decode(&data[..BondingCurveState::MIN_LEN - 1]).unwrap_err();
        assert!(matches!(err, Error::TruncatedAccountData { .. }));
    }

    #[test]
    fn test_discriminator_mismatch() {
        let curve = sample_curve(1);
        let data = curve.to_account_data().unwrap();
        // A bonding curve body is long enough to attempt a buyer decode
        let err = BuyerAccount::decode(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::DiscriminatorMismatch { kind: AccountKind::BuyerAccount, .. }
        ));
    }

    #[test]
    fn test_decode_account_by_kind() {
        let config = sample_config(BondingCurveType::Linear, 5_000);
        let data = config.to_account_data().unwrap();

        let decoded = decode_account(&data, AccountKind::CurveConfiguration).unwrap();
        assert_eq!(decoded.kind(), AccountKind::CurveConfiguration);
        assert_eq!(decoded, ProgramAccount::CurveConfiguration(config));

        // Longer than a BondingCurve account
        assert!(matches!(
            decode_account(&data, AccountKind::BondingCurve),
            Err(Error::DiscriminatorMismatch { kind: AccountKind::BondingCurve, .. })
        ));

        // Shorter than a CurveConfiguration account
        let curve_data = sample_curve(9).to_account_data().unwrap();
        assert!(curve_data.len() < CurveConfiguration::MIN_LEN);
        assert!(matches!(
            decode_account(&curve_data, AccountKind::CurveConfiguration),
            Err(Error::DiscriminatorMismatch { kind: AccountKind::CurveConfiguration, .. })
        ));
    }

    #[test]
    fn test_shorter_than_discriminator() {
        assert!(matches!(
            BondingCurveState::decode(&[0u8; 7]),
            Err(Error::TruncatedAccountData { expected: 8, actual: 7, .. })
        ));
    }

    #[test]
    fn test_decode_any() {
        let curve = sample_curve(9);
        let data = curve.to_account_data().unwrap();
        assert_eq!(decode_any(&data).unwrap(), ProgramAccount::BondingCurve(curve));

        let err = decode_any(&[1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownDiscriminator([1, 2, 3, 0, 0, 0, 0, 0])
        ));
    }

    #[test]
    fn test_nonzero_bool_decodes_true() {
        let mut config = sample_config(BondingCurveType::Linear, 5_000);
        config.use_dao = false;
        let mut data = config.to_account_data().unwrap();
        let use_dao_offset = 8 + 32 + 32 + 8;
        data[use_dao_offset] = 7;
        assert!(CurveConfiguration::decode(&data).unwrap().use_dao);
    }

    #[test]
    fn test_fee_share_validation() {
        let mut config = sample_config(BondingCurveType::Linear, 5_000);
        assert!(config.validate_fee_shares().is_ok());

        config.fee_recipients[0].share = 6_999;
        assert!(matches!(
            config.validate_fee_shares(),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_recipient_lock() {
        let config = sample_config(BondingCurveType::Linear, 5_000);
        let locked = &config.fee_recipients[0];
        assert!(!locked.is_unlocked(1_699_999_999));
        assert!(locked.is_unlocked(1_700_000_000));
    }

    #[test]
    fn test_liquidity_progress() {
        let config = sample_config(BondingCurveType::Linear, 5_000);
        let curve = sample_curve(0);
        assert_eq!(
            curve.liquidity_progress(&config).unwrap(),
            Ratio::new(42, 85).unwrap()
        );
        assert!(!curve.is_target_liquidity_reached(&config));

        let mut zero_target = config.clone();
        zero_target.target_liquidity = 0;
        assert!(matches!(
            curve.liquidity_progress(&zero_target),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_verify_bump() {
        let program_id = Pubkey::new_unique();
        let mut curve = sample_curve(0);
        curve.bump = pda::bonding_curve(&program_id, &curve.token).unwrap().bump;
        assert!(curve.verify_bump(&program_id).unwrap());

        curve.bump = curve.bump.wrapping_add(1);
        assert!(!curve.verify_bump(&program_id).unwrap());
    }

    #[test]
    fn test_curve_type_tags() {
        assert_eq!(u8::from(BondingCurveType::Quadratic), 1);
        assert_eq!(BondingCurveType::try_from(0).unwrap(), BondingCurveType::Linear);
        assert!(matches!(
            BondingCurveType::try_from(2),
            Err(Error::UnsupportedCurveType(2))
        ));
        assert_eq!(
            "Quadratic".parse::<BondingCurveType>().unwrap(),
            BondingCurveType::Quadratic
        );
    }
}
