//! Token allocations and their optional linear vesting schedule

use borsh::BorshSerialize;
use chrono::{DateTime, Utc};
use solana_sdk::pubkey::Pubkey;

use super::accounts::{require_len, AccountRecord, DISCRIMINATOR_LEN};
use super::cursor::AccountCursor;
use super::program::AccountKind;
use super::ratio::Ratio;
use crate::error::{Error, Result};

/// Linear vesting after a cliff
///
/// Nothing vests before `start_time + cliff_period`. From there the grant
/// vests linearly over `duration` seconds. `interval` is stored but the
/// program never steps releases by it, so neither do we.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct Vesting {
    /// Seconds after `start_time` before anything vests
    pub cliff_period: i64,
    /// Unix timestamp
    pub start_time: i64,
    /// Seconds
    pub duration: i64,
    /// Seconds
    pub interval: i64,
    pub released: u64,
}

impl Vesting {
    pub const LEN: usize = 8 + // cliff_period
        8 + // start_time
        8 + // duration
        8 + // interval
        8; // released

    fn read(cursor: &mut AccountCursor<'_>) -> Result<Self> {
        Ok(Self {
            cliff_period: cursor.read_i64()?,
            start_time: cursor.read_i64()?,
            duration: cursor.read_i64()?,
            interval: cursor.read_i64()?,
            released: cursor.read_u64()?,
        })
    }

    pub fn cliff_end(&self) -> Result<i64> {
        self.start_time
            .checked_add(self.cliff_period)
            .ok_or(Error::ArithmeticOverflow("vesting cliff end"))
    }

    pub fn vesting_end(&self) -> Result<i64> {
        self.cliff_end()?
            .checked_add(self.duration)
            .ok_or(Error::ArithmeticOverflow("vesting end"))
    }

    pub fn cliff_end_datetime(&self) -> Option<DateTime<Utc>> {
        self.cliff_end().ok().and_then(|t| DateTime::from_timestamp(t, 0))
    }

    pub fn vesting_end_datetime(&self) -> Option<DateTime<Utc>> {
        self.vesting_end().ok().and_then(|t| DateTime::from_timestamp(t, 0))
    }

    pub fn is_cliff_reached(&self, now: i64) -> Result<bool> {
        Ok(now >= self.cliff_end()?)
    }

    /// Tokens of `total` vested at `now`, rounded down
    pub fn vested_amount(&self, total: u64, now: i64) -> Result<u64> {
        let cliff_end = self.cliff_end()?;
        if now < cliff_end {
            return Ok(0);
        }

        let elapsed = (now as i128) - (cliff_end as i128);
        if elapsed >= self.duration as i128 {
            return Ok(total);
        }

        // 0 <= elapsed < duration here, so the quotient is below total
        let vested = (total as u128) * (elapsed as u128) / (self.duration as u128);
        Ok(vested as u64)
    }

    /// Vested but not yet released at `now`
    pub fn releasable(&self, total: u64, now: i64) -> Result<u64> {
        Ok(self.vested_amount(total, now)?.saturating_sub(self.released))
    }
}

/// One wallet's token grant
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct Allocation {
    pub wallet: Pubkey,
    /// Percent of total supply
    pub percentage: u8,
    pub total_tokens: u64,
    pub claimed_tokens: u64,
    /// `None` means fully unlocked from creation
    pub vesting: Option<Vesting>,
    pub bump: u8,
}

impl Allocation {
    /// Minimum length when the vesting schedule is present
    pub const MIN_LEN_WITH_VESTING: usize = Self::MIN_LEN + Vesting::LEN;

    pub fn unclaimed_tokens(&self) -> Result<u64> {
        self.total_tokens
            .checked_sub(self.claimed_tokens)
            .ok_or_else(|| {
                Error::InvariantViolation(format!(
                    "allocation for {} claimed {} of {} tokens",
                    self.wallet, self.claimed_tokens, self.total_tokens
                ))
            })
    }

    /// Claimed fraction of the grant, exact
    pub fn claim_progress(&self) -> Result<Ratio> {
        if self.total_tokens == 0 {
            return Err(Error::InvalidAmount(
                "allocation has zero total tokens".to_string(),
            ));
        }
        Ratio::new(self.claimed_tokens as i128, self.total_tokens as i128)
    }

    pub fn claim_progress_pct(&self) -> Result<Ratio> {
        self.claim_progress()?
            .checked_mul(&Ratio::from_integer(100))
    }

    pub fn is_fully_claimed(&self) -> bool {
        self.claimed_tokens >= self.total_tokens
    }

    /// What a claim at `now` would transfer
    pub fn claimable_at(&self, now: i64) -> Result<u64> {
        match &self.vesting {
            Some(vesting) => vesting.releasable(self.total_tokens, now),
            None => self.unclaimed_tokens(),
        }
    }
}

impl AccountRecord for Allocation {
    const KIND: AccountKind = AccountKind::Allocation;

    const MIN_LEN: usize = DISCRIMINATOR_LEN +
        32 + // wallet
        1 + // percentage
        8 + // total_tokens
        8 + // claimed_tokens
        1 + // vesting option flag
        1; // bump

    fn read_fields(cursor: &mut AccountCursor<'_>) -> Result<Self> {
        let wallet = cursor.read_pubkey()?;
        let percentage = cursor.read_u8()?;
        let total_tokens = cursor.read_u64()?;
        let claimed_tokens = cursor.read_u64()?;

        let vesting = if cursor.read_option_flag()? {
            require_len(Self::KIND, cursor.len(), Self::MIN_LEN_WITH_VESTING)?;
            Some(Vesting::read(cursor)?)
        } else {
            None
        };
        let bump = cursor.read_u8()?;

        if claimed_tokens > total_tokens {
            return Err(Error::InvariantViolation(format!(
                "allocation for {} claimed {} of {} tokens",
                wallet, claimed_tokens, total_tokens
            )));
        }

        Ok(Self {
            wallet,
            percentage,
            total_tokens,
            claimed_tokens,
            vesting,
            bump,
        })
    }
}
