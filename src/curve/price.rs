//! Bonding curve pricing
//!
//! # WARNING: These are client-side estimates
//! The program computes executed trades with its own integer rounding, so
//! an executed cost can differ from the exact value returned here. Callers
//! should bound trades with the slippage helpers below.
//!
//! All results are exact [`Ratio`]s in lamports per token smallest unit.
//! `reserve_ratio` is in basis points; `r` below means `reserve_ratio`.
//!
//! | curve     | price(s)      | cost(s, n)              |
//! |-----------|---------------|-------------------------|
//! | linear    | 20000·s / r   | 5000·n·(2s + n) / r     |
//! | quadratic | r·s / 10000   | r·n·(2s + n) / 20000    |

use tracing::trace;

use super::accounts::{BondingCurveType, CurveConfiguration};
use super::ratio::Ratio;
use crate::error::{Error, Result};

/// Denominator of every basis-point quantity
pub const BASIS_POINTS: u64 = 10_000;

/// SOL decimals (lamports)
pub const SOL_DECIMALS: u8 = 9;

/// Everything a pricing formula depends on besides supply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParams {
    curve_type: BondingCurveType,
    reserve_ratio: u16,
}

/// Estimate for buying `amount` tokens at supply `supply`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyQuote {
    pub supply: u64,
    pub amount: u64,
    pub spot_price: Ratio,
    pub cost: Ratio,
    pub average_price: Ratio,
    /// Signed; negative when the average is below spot
    pub price_impact_pct: Ratio,
    /// Price at the supply the buy leaves behind
    pub price_after: Ratio,
}

impl BuyQuote {
    /// Whole lamports to offer, rounded up
    pub fn cost_lamports(&self) -> Result<u64> {
        self.cost.ceil_u64()
    }
}

impl CurveParams {
    pub fn new(curve_type: BondingCurveType, reserve_ratio: u16) -> Result<Self> {
        if reserve_ratio == 0 {
            return Err(Error::InvalidReserveRatio(reserve_ratio));
        }
        Ok(Self {
            curve_type,
            reserve_ratio,
        })
    }

    /// Build from an undecoded curve type tag
    pub fn from_raw(curve_type: u8, reserve_ratio: u16) -> Result<Self> {
        Self::new(BondingCurveType::try_from(curve_type)?, reserve_ratio)
    }

    pub fn from_config(config: &CurveConfiguration) -> Result<Self> {
        Self::new(config.bonding_curve_type, config.reserve_ratio)
    }

    pub fn curve_type(&self) -> BondingCurveType {
        self.curve_type
    }

    pub fn reserve_ratio(&self) -> u16 {
        self.reserve_ratio
    }

    fn r(&self) -> Result<i128> {
        if self.reserve_ratio == 0 {
            return Err(Error::InvalidReserveRatio(self.reserve_ratio));
        }
        Ok(self.reserve_ratio as i128)
    }

    /// Instantaneous price at supply `s`
    pub fn price(&self, supply: u64) -> Result<Ratio> {
        let s = Ratio::from_u64(supply);
        let slope = match self.curve_type {
            BondingCurveType::Linear => Ratio::new(2 * BASIS_POINTS as i128, self.r()?)?,
            BondingCurveType::Quadratic => Ratio::new(self.r()?, BASIS_POINTS as i128)?,
        };
        s.checked_mul(&slope)
    }

    /// Price one smallest unit above `supply`
    pub fn next_price(&self, supply: u64) -> Result<Ratio> {
        let next = supply
            .checked_add(1)
            .ok_or(Error::ArithmeticOverflow("next price supply"))?;
        self.price(next)
    }

    pub fn market_cap(&self, supply: u64) -> Result<Ratio> {
        self.price(supply)?.checked_mul(&Ratio::from_u64(supply))
    }

    /// Area under the curve from `supply` to `supply + amount`
    pub fn buy_cost(&self, supply: u64, amount: u64) -> Result<Ratio> {
        if amount == 0 {
            return Err(Error::InvalidAmount("buy amount is zero".to_string()));
        }
        self.integral(supply, amount)
    }

    /// Lamports returned for selling `amount` out of `supply`
    pub fn sell_return(&self, supply: u64, amount: u64) -> Result<Ratio> {
        if amount == 0 {
            return Err(Error::InvalidAmount("sell amount is zero".to_string()));
        }
        if amount > supply {
            return Err(Error::InsufficientSupply { amount, supply });
        }
        self.integral(supply - amount, amount)
    }

    pub fn average_price(&self, supply: u64, amount: u64) -> Result<Ratio> {
        self.buy_cost(supply, amount)?
            .checked_div(&Ratio::from_u64(amount))
    }

    /// `(average − spot) / spot · 100`
    pub fn price_impact_pct(&self, supply: u64, amount: u64) -> Result<Ratio> {
        let spot = self.price(supply)?;
        let average = self.average_price(supply, amount)?;
        impact_pct(&spot, &average)
    }

    pub fn quote_buy(&self, supply: u64, amount: u64) -> Result<BuyQuote> {
        let spot_price = self.price(supply)?;
        let cost = self.buy_cost(supply, amount)?;
        let average_price = cost.checked_div(&Ratio::from_u64(amount))?;
        let price_impact_pct = impact_pct(&spot_price, &average_price)?;
        let after = supply
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow("supply after buy"))?;

        let quote = BuyQuote {
            supply,
            amount,
            spot_price,
            cost,
            average_price,
            price_impact_pct,
            price_after: self.price(after)?,
        };
        trace!(
            curve = %self.curve_type,
            supply,
            amount,
            cost = %quote.cost,
            "Quoted buy"
        );
        Ok(quote)
    }

    fn integral(&self, from: u64, amount: u64) -> Result<Ratio> {
        // n·(2s + n) instead of (s+n)² − s², which overflows far sooner
        let s = from as i128;
        let n = amount as i128;
        let span = s
            .checked_mul(2)
            .and_then(|v| v.checked_add(n))
            .and_then(|v| v.checked_mul(n))
            .ok_or(Error::ArithmeticOverflow("curve cost"))?;

        let factor = match self.curve_type {
            BondingCurveType::Linear => Ratio::new(BASIS_POINTS as i128 / 2, self.r()?)?,
            BondingCurveType::Quadratic => Ratio::new(self.r()?, 2 * BASIS_POINTS as i128)?,
        };
        Ratio::from_integer(span).checked_mul(&factor)
    }
}

fn impact_pct(spot: &Ratio, average: &Ratio) -> Result<Ratio> {
    if spot.is_zero() {
        return Err(Error::InvalidAmount(
            "price impact is undefined at zero spot price".to_string(),
        ));
    }
    average
        .checked_sub(spot)?
        .checked_div(spot)?
        .checked_mul(&Ratio::from_integer(100))
}

/// Reserve the program seeds a pool with at creation
///
/// Supply is converted to whole tokens (truncating) before the market cap
/// is taken, exactly as the program does.
pub fn initial_reserve_amount(
    initial_price: u64,
    initial_supply: u64,
    reserve_ratio: u16,
    token_decimals: u8,
) -> Result<u64> {
    if reserve_ratio == 0 {
        return Err(Error::InvalidAmount("reserve ratio is zero".to_string()));
    }
    if initial_supply == 0 {
        return Err(Error::InvalidAmount("initial supply is zero".to_string()));
    }
    if initial_price == 0 {
        return Err(Error::InvalidAmount("initial price is zero".to_string()));
    }

    let unit = 10u64
        .checked_pow(token_decimals as u32)
        .ok_or(Error::ArithmeticOverflow("token decimals"))?;
    let supply_base = initial_supply / unit;

    let reserve = (initial_price as u128)
        .checked_mul(supply_base as u128)
        .and_then(|cap| cap.checked_mul(reserve_ratio as u128))
        .ok_or(Error::ArithmeticOverflow("initial reserve"))?
        / BASIS_POINTS as u128;

    u64::try_from(reserve).map_err(|_| Error::ArithmeticOverflow("initial reserve"))
}

fn check_slippage(slippage_bps: u16) -> Result<()> {
    if slippage_bps as u64 > BASIS_POINTS {
        return Err(Error::InvalidAmount(format!(
            "slippage {} bps exceeds 100%",
            slippage_bps
        )));
    }
    Ok(())
}

/// Largest cost to accept for a buy quoted at `expected_cost`
pub fn max_cost_with_slippage(expected_cost: u64, slippage_bps: u16) -> Result<u64> {
    check_slippage(slippage_bps)?;
    let max = (expected_cost as u128) * (BASIS_POINTS + slippage_bps as u64) as u128
        / BASIS_POINTS as u128;
    u64::try_from(max).map_err(|_| Error::ArithmeticOverflow("slippage bound"))
}

/// Smallest output to accept for a trade quoted at `expected_output`
pub fn min_output_with_slippage(expected_output: u64, slippage_bps: u16) -> Result<u64> {
    check_slippage(slippage_bps)?;
    let min = (expected_output as u128) * (BASIS_POINTS - slippage_bps as u64) as u128
        / BASIS_POINTS as u128;
    // min <= expected_output
    Ok(min as u64)
}

/// Convert lamports to SOL, for display only
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / 10f64.powi(SOL_DECIMALS as i32)
}

/// Convert token smallest units to whole tokens, for display only
pub fn tokens_to_human(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10f64.powi(decimals as i32)
}
