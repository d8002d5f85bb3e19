//! Trade fees and their distribution over fee recipients

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use super::accounts::CurveConfiguration;
use super::price::BASIS_POINTS;
use crate::error::{Error, Result};

/// Fee on `amount` at `fee_bps`, rounded down like the program
pub fn fee_amount(amount: u64, fee_bps: u16) -> Result<u64> {
    let fee = (amount as u128) * (fee_bps as u128) / BASIS_POINTS as u128;
    u64::try_from(fee).map_err(|_| Error::ArithmeticOverflow("fee amount"))
}

/// Fee the configuration charges on `amount`, zero while fees are disabled
pub fn effective_fee(config: &CurveConfiguration, amount: u64) -> Result<u64> {
    if !config.fees_enabled {
        return Ok(0);
    }
    fee_amount(amount, config.fee_percentage)
}

/// One recipient's cut of a fee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSplit {
    pub address: Pubkey,
    pub share: u16,
    pub amount: u64,
}

/// Distribute `fee` over the configured recipients in stored order
///
/// Each cut is rounded down, so the cuts may sum to slightly less than
/// `fee`. The remainder stays with the curve, as it does on-chain.
pub fn split_fee(config: &CurveConfiguration, fee: u64) -> Result<Vec<FeeSplit>> {
    config.validate_fee_shares()?;

    let splits = config
        .fee_recipients
        .iter()
        .map(|recipient| {
            Ok(FeeSplit {
                address: recipient.address,
                share: recipient.share,
                amount: fee_amount(fee, recipient.share)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        fee,
        recipients = splits.len(),
        distributed = splits.iter().map(|s| s.amount).sum::<u64>(),
        "Split fee"
    );
    Ok(splits)
}

/// Total of all recipient cuts
pub fn distributed_total(splits: &[FeeSplit]) -> Result<u64> {
    splits.iter().try_fold(0u64, |acc, s| {
        acc.checked_add(s.amount)
            .ok_or(Error::ArithmeticOverflow("fee split total"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::accounts::tests::sample_config;
    use crate::curve::accounts::BondingCurveType;

    #[test]
    fn test_fee_amount_rounds_down() {
        assert_eq!(fee_amount(1_000_000, 100).unwrap(), 10_000);
        assert_eq!(fee_amount(199, 50).unwrap(), 0);
        assert_eq!(fee_amount(u64::MAX, 10_000).unwrap(), u64::MAX);
        assert!(matches!(
            fee_amount(u64::MAX, u16::MAX),
            Err(Error::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn test_effective_fee_respects_toggle() {
        let mut config = sample_config(BondingCurveType::Linear, 5_000);
        assert_eq!(effective_fee(&config, 1_000_000).unwrap(), 10_000);

        config.fees_enabled = false;
        assert_eq!(effective_fee(&config, 1_000_000).unwrap(), 0);
    }

    #[test]
    fn test_split_fee_in_order() {
        let config = sample_config(BondingCurveType::Linear, 5_000);
        let splits = split_fee(&config, 1_001).unwrap();

        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].address, config.fee_recipients[0].address);
        assert_eq!(splits[0].amount, 700);
        assert_eq!(splits[1].amount, 300);
        // One lamport of rounding dust stays undistributed
        assert_eq!(distributed_total(&splits).unwrap(), 1_000);
    }

    #[test]
    fn test_split_fee_requires_full_shares() {
        let mut config = sample_config(BondingCurveType::Linear, 5_000);
        config.fee_recipients.pop();
        assert!(matches!(
            split_fee(&config, 1_000),
            Err(Error::InvariantViolation(_))
        ));

        config.fee_recipients.clear();
        assert!(split_fee(&config, 1_000).is_err());
    }
}
