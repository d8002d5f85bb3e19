//! Fair launch and whitelist launch records

use borsh::BorshSerialize;
use solana_sdk::pubkey::Pubkey;

use super::accounts::{require_len, AccountRecord, DISCRIMINATOR_LEN, PUBKEY_LEN};
use super::cursor::AccountCursor;
use super::program::AccountKind;
use crate::error::{Error, Result};

const SECONDS_PER_HOUR: i64 = 3_600;

/// Pooled-contribution sale with soft and hard caps (amounts in lamports)
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct FairLaunchData {
    pub authority: Pubkey,
    pub token_mint: Pubkey,
    pub start_time: i64,
    pub end_time: i64,
    pub vault: Pubkey,
    pub soft_cap: u64,
    pub hard_cap: u64,
    pub min_contribution: u64,
    pub max_contribution: u64,
    pub max_tokens_per_wallet: u64,
    /// Hours after `end_time` before tokens can be distributed
    pub distribution_delay: i64,
    pub total_raised: u64,
    pub paused: bool,
    pub bump: u8,
}

impl FairLaunchData {
    pub fn is_active(&self, now: i64) -> bool {
        !self.paused && now >= self.start_time && now <= self.end_time
    }

    /// Whether a contribution of `amount` would be accepted at `now`
    pub fn accepts_contribution(&self, amount: u64, now: i64) -> bool {
        self.is_active(now)
            && amount >= self.min_contribution
            && self
                .total_raised
                .checked_add(amount)
                .is_some_and(|total| total <= self.hard_cap)
    }

    pub fn soft_cap_reached(&self) -> bool {
        self.total_raised >= self.soft_cap
    }

    pub fn hard_cap_reached(&self) -> bool {
        self.total_raised >= self.hard_cap
    }

    pub fn remaining_capacity(&self) -> u64 {
        self.hard_cap.saturating_sub(self.total_raised)
    }

    /// Earliest timestamp at which distribution is allowed
    pub fn distribution_time(&self) -> Result<i64> {
        self.distribution_delay
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|delay| self.end_time.checked_add(delay))
            .ok_or(Error::ArithmeticOverflow("fair launch distribution time"))
    }

    pub fn can_distribute(&self, now: i64) -> Result<bool> {
        Ok(now > self.end_time && self.soft_cap_reached() && now >= self.distribution_time()?)
    }

    /// Contributors are refunded once the sale ends below the soft cap
    pub fn can_refund(&self, now: i64) -> bool {
        now > self.end_time && !self.soft_cap_reached()
    }
}

impl AccountRecord for FairLaunchData {
    const KIND: AccountKind = AccountKind::FairLaunchData;

    const MIN_LEN: usize = DISCRIMINATOR_LEN +
        32 + // authority
        32 + // token_mint
        8 + // start_time
        8 + // end_time
        32 + // vault
        8 + // soft_cap
        8 + // hard_cap
        8 + // min_contribution
        8 + // max_contribution
        8 + // max_tokens_per_wallet
        8 + // distribution_delay
        8 + // total_raised
        1 + // paused
        1; // bump

    fn read_fields(cursor: &mut AccountCursor<'_>) -> Result<Self> {
        Ok(Self {
            authority: cursor.read_pubkey()?,
            token_mint: cursor.read_pubkey()?,
            start_time: cursor.read_i64()?,
            end_time: cursor.read_i64()?,
            vault: cursor.read_pubkey()?,
            soft_cap: cursor.read_u64()?,
            hard_cap: cursor.read_u64()?,
            min_contribution: cursor.read_u64()?,
            max_contribution: cursor.read_u64()?,
            max_tokens_per_wallet: cursor.read_u64()?,
            distribution_delay: cursor.read_i64()?,
            total_raised: cursor.read_u64()?,
            paused: cursor.read_bool()?,
            bump: cursor.read_u8()?,
        })
    }
}

/// Fixed-price sale restricted to a list of addresses
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct WhitelistLaunchData {
    pub authority: Pubkey,
    pub token_mint: Pubkey,
    pub start_time: i64,
    pub end_time: i64,
    /// Lamports per token
    pub token_price: u64,
    pub purchase_limit_per_wallet: u64,
    pub total_supply: u64,
    pub sold_tokens: u64,
    pub whitelisted_users: Vec<Pubkey>,
    pub buyers: Vec<Pubkey>,
    pub paused: bool,
    /// Absolute unix timestamp after which the list is frozen
    pub whitelist_duration: i64,
    pub bump: u8,
}

impl WhitelistLaunchData {
    /// Bytes after the buyers vector
    const TAIL_LEN: usize = 1 + // paused
        8 + // whitelist_duration
        1; // bump

    pub fn is_whitelisted(&self, user: &Pubkey) -> bool {
        self.whitelisted_users.contains(user)
    }

    pub fn has_bought(&self, user: &Pubkey) -> bool {
        self.buyers.contains(user)
    }

    pub fn remaining_tokens(&self) -> u64 {
        self.total_supply.saturating_sub(self.sold_tokens)
    }

    pub fn is_active(&self, now: i64) -> bool {
        !self.paused && now >= self.start_time && now <= self.end_time
    }

    /// Whether the authority may still add or remove addresses
    pub fn is_whitelist_open(&self, now: i64) -> bool {
        !self.paused && now <= self.whitelist_duration
    }

    fn read_pubkeys(cursor: &mut AccountCursor<'_>, reserve: usize) -> Result<Vec<Pubkey>> {
        let count = cursor.read_len()?;
        let needed = count
            .checked_mul(PUBKEY_LEN)
            .and_then(|n| n.checked_add(cursor.offset()))
            .and_then(|n| n.checked_add(reserve))
            .unwrap_or(usize::MAX);
        require_len(Self::KIND, cursor.len(), needed)?;

        let mut keys = Vec::with_capacity(count);
        for _ in 0..count {
            keys.push(cursor.read_pubkey()?);
        }
        Ok(keys)
    }
}

impl AccountRecord for WhitelistLaunchData {
    const KIND: AccountKind = AccountKind::WhitelistLaunchData;

    const MIN_LEN: usize = DISCRIMINATOR_LEN +
        32 + // authority
        32 + // token_mint
        8 + // start_time
        8 + // end_time
        8 + // token_price
        8 + // purchase_limit_per_wallet
        8 + // total_supply
        8 + // sold_tokens
        4 + // whitelisted_users length
        4 + // buyers length
        Self::TAIL_LEN;

    fn read_fields(cursor: &mut AccountCursor<'_>) -> Result<Self> {
        let authority = cursor.read_pubkey()?;
        let token_mint = cursor.read_pubkey()?;
        let start_time = cursor.read_i64()?;
        let end_time = cursor.read_i64()?;
        let token_price = cursor.read_u64()?;
        let purchase_limit_per_wallet = cursor.read_u64()?;
        let total_supply = cursor.read_u64()?;
        let sold_tokens = cursor.read_u64()?;
        // The buyers length prefix still follows the first vector
        let whitelisted_users = Self::read_pubkeys(cursor, 4 + Self::TAIL_LEN)?;
        let buyers = Self::read_pubkeys(cursor, Self::TAIL_LEN)?;

        Ok(Self {
            authority,
            token_mint,
            start_time,
            end_time,
            token_price,
            purchase_limit_per_wallet,
            total_supply,
            sold_tokens,
            whitelisted_users,
            buyers,
            paused: cursor.read_bool()?,
            whitelist_duration: cursor.read_i64()?,
            bump: cursor.read_u8()?,
        })
    }
}

/// Per-buyer contribution record for either launch type
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct BuyerAccount {
    pub buyer: Pubkey,
    pub amount: u64,
    pub whitelisted: bool,
    pub launchpad: Pubkey,
    pub bump: u8,
}

impl AccountRecord for BuyerAccount {
    const KIND: AccountKind = AccountKind::BuyerAccount;

    const MIN_LEN: usize = DISCRIMINATOR_LEN +
        32 + // buyer
        8 + // amount
        1 + // whitelisted
        32 + // launchpad
        1; // bump

    fn read_fields(cursor: &mut AccountCursor<'_>) -> Result<Self> {
        Ok(Self {
            buyer: cursor.read_pubkey()?,
            amount: cursor.read_u64()?,
            whitelisted: cursor.read_bool()?,
            launchpad: cursor.read_pubkey()?,
            bump: cursor.read_u8()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fair_launch() -> FairLaunchData {
        FairLaunchData {
            authority: Pubkey::new_unique(),
            token_mint: Pubkey::new_unique(),
            start_time: 1_000,
            end_time: 2_000,
            vault: Pubkey::new_unique(),
            soft_cap: 10_000,
            hard_cap: 50_000,
            min_contribution: 100,
            max_contribution: 5_000,
            max_tokens_per_wallet: 1_000_000,
            distribution_delay: 2,
            total_raised: 9_000,
            paused: false,
            bump: 250,
        }
    }

    fn whitelist(users: usize, buyers: usize) -> WhitelistLaunchData {
        WhitelistLaunchData {
            authority: Pubkey::new_unique(),
            token_mint: Pubkey::new_unique(),
            start_time: 1_000,
            end_time: 2_000,
            token_price: 1_000,
            purchase_limit_per_wallet: 10,
            total_supply: 1_000,
            sold_tokens: 400,
            whitelisted_users: (0..users).map(|_| Pubkey::new_unique()).collect(),
            buyers: (0..buyers).map(|_| Pubkey::new_unique()).collect(),
            paused: false,
            whitelist_duration: 1_500,
            bump: 255,
        }
    }

    #[test]
    fn test_fair_launch_round_trip() {
        let launch = fair_launch();
        let data = launch.to_account_data().unwrap();
        assert_eq!(data.len(), FairLaunchData::MIN_LEN);
        assert_eq!(FairLaunchData::MIN_LEN, 178);
        assert_eq!(FairLaunchData::decode(&data).unwrap(), launch);
    }

    #[test]
    fn test_fair_launch_contribution_window() {
        let launch = fair_launch();
        assert!(!launch.is_active(999));
        assert!(launch.is_active(1_000));
        assert!(launch.is_active(2_000));
        assert!(!launch.is_active(2_001));

        assert!(launch.accepts_contribution(100, 1_500));
        assert!(!launch.accepts_contribution(99, 1_500));
        assert!(launch.accepts_contribution(41_000, 1_500));
        assert!(!launch.accepts_contribution(41_001, 1_500));
        assert!(!launch.accepts_contribution(u64::MAX, 1_500));

        let mut paused = launch.clone();
        paused.paused = true;
        assert!(!paused.accepts_contribution(100, 1_500));
    }

    #[test]
    fn test_fair_launch_distribution() {
        let mut launch = fair_launch();
        assert_eq!(launch.distribution_time().unwrap(), 2_000 + 7_200);
        assert_eq!(launch.remaining_capacity(), 41_000);

        // Below soft cap: refunds only
        assert!(!launch.can_distribute(10_000).unwrap());
        assert!(launch.can_refund(2_001));
        assert!(!launch.can_refund(2_000));

        launch.total_raised = 10_000;
        assert!(launch.soft_cap_reached());
        assert!(!launch.can_distribute(9_199).unwrap());
        assert!(launch.can_distribute(9_200).unwrap());
        assert!(!launch.can_refund(9_200));

        launch.distribution_delay = 0;
        assert!(!launch.can_distribute(2_000).unwrap());
        assert!(launch.can_distribute(2_001).unwrap());

        launch.distribution_delay = i64::MAX;
        assert!(launch.distribution_time().is_err());
    }

    #[test]
    fn test_fair_launch_hard_cap() {
        let mut launch = fair_launch();
        assert!(!launch.hard_cap_reached());

        launch.total_raised = launch.hard_cap - 1;
        assert!(!launch.hard_cap_reached());
        assert!(!launch.accepts_contribution(100, 1_500));
        assert_eq!(launch.remaining_capacity(), 1);

        launch.total_raised = launch.hard_cap;
        assert!(launch.hard_cap_reached());
        assert_eq!(launch.remaining_capacity(), 0);
        assert!(!launch.accepts_contribution(1, 1_500));
    }

    #[test]
    fn test_whitelist_round_trip() {
        let empty = whitelist(0, 0);
        let data = empty.to_account_data().unwrap();
        assert_eq!(data.len(), WhitelistLaunchData::MIN_LEN);
        assert_eq!(WhitelistLaunchData::MIN_LEN, 138);
        assert_eq!(WhitelistLaunchData::decode(&data).unwrap(), empty);

        let full = whitelist(3, 2);
        let data = full.to_account_data().unwrap();
        assert_eq!(data.len(), 138 + 5 * 32);
        assert_eq!(WhitelistLaunchData::decode(&data).unwrap(), full);
    }

    #[test]
    fn test_whitelist_truncated_vectors() {
        let data = whitelist(3, 2).to_account_data().unwrap();
        let full = data.len();

        // Cut inside the buyers vector
        let err = WhitelistLaunchData::decode(&data[..full - 20]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedAccountData { expected, .. } if expected == full
        ));

        // Cut inside the whitelisted users vector
        let err = WhitelistLaunchData::decode(&data[..150]).unwrap_err();
        assert!(matches!(err, Error::TruncatedAccountData { .. }));
    }

    #[test]
    fn test_whitelist_one_byte_short() {
        let data = whitelist(0, 0).to_account_data().unwrap();
        assert!(matches!(
            WhitelistLaunchData::decode(&data[..137]),
            Err(Error::TruncatedAccountData { expected: 138, actual: 137, .. })
        ));
    }

    #[test]
    fn test_whitelist_queries() {
        let list = whitelist(2, 1);
        assert!(list.is_whitelisted(&list.whitelisted_users[1]));
        assert!(!list.is_whitelisted(&Pubkey::new_unique()));
        assert!(list.has_bought(&list.buyers[0]));
        assert_eq!(list.remaining_tokens(), 600);
        assert!(list.is_whitelist_open(1_500));
        assert!(!list.is_whitelist_open(1_501));
        assert!(list.is_active(1_501));
    }

    #[test]
    fn test_buyer_round_trip() {
        let buyer = BuyerAccount {
            buyer: Pubkey::new_unique(),
            amount: 5_000,
            whitelisted: true,
            launchpad: Pubkey::new_unique(),
            bump: 1,
        };
        let data = buyer.to_account_data().unwrap();
        assert_eq!(data.len(), 82);
        assert_eq!(BuyerAccount::decode(&data).unwrap(), buyer);
        assert!(matches!(
            BuyerAccount::decode(&data[..81]),
            Err(Error::TruncatedAccountData { expected: 82, actual: 81, .. })
        ));
    }

    #[test]
    fn test_fair_launch_one_byte_short() {
        let data = fair_launch().to_account_data().unwrap();
        assert!(matches!(
            FairLaunchData::decode(&data[..177]),
            Err(Error::TruncatedAccountData { expected: 178, actual: 177, .. })
        ));
    }
}
