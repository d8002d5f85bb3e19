//! Exact rational numbers for price and cost results
//!
//! Values are kept reduced with a positive denominator, so derived
//! equality is numeric equality. All arithmetic is checked and reports
//! `ArithmeticOverflow` instead of wrapping.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ratio {
    numer: i128,
    denom: i128,
}

impl Ratio {
    pub const ZERO: Ratio = Ratio { numer: 0, denom: 1 };
    pub const ONE: Ratio = Ratio { numer: 1, denom: 1 };

    pub fn new(numer: i128, denom: i128) -> Result<Self> {
        if denom == 0 {
            return Err(Error::ArithmeticOverflow("ratio with zero denominator"));
        }

        let (numer, denom) = if denom < 0 {
            (
                numer
                    .checked_neg()
                    .ok_or(Error::ArithmeticOverflow("ratio sign normalization"))?,
                denom
                    .checked_neg()
                    .ok_or(Error::ArithmeticOverflow("ratio sign normalization"))?,
            )
        } else {
            (numer, denom)
        };

        // denom > 0 here, so g fits in i128
        let g = gcd(numer.unsigned_abs(), denom.unsigned_abs()) as i128;
        Ok(Self {
            numer: numer / g,
            denom: denom / g,
        })
    }

    pub fn from_integer(value: i128) -> Self {
        Self {
            numer: value,
            denom: 1,
        }
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_integer(value as i128)
    }

    pub fn numer(&self) -> i128 {
        self.numer
    }

    pub fn denom(&self) -> i128 {
        self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer == 0
    }

    pub fn is_negative(&self) -> bool {
        self.numer < 0
    }

    pub fn is_integer(&self) -> bool {
        self.denom == 1
    }

    pub fn checked_add(&self, other: &Ratio) -> Result<Ratio> {
        let g = gcd(self.denom as u128, other.denom as u128) as i128;
        let lhs = self
            .numer
            .checked_mul(other.denom / g)
            .ok_or(Error::ArithmeticOverflow("ratio addition"))?;
        let rhs = other
            .numer
            .checked_mul(self.denom / g)
            .ok_or(Error::ArithmeticOverflow("ratio addition"))?;
        let numer = lhs
            .checked_add(rhs)
            .ok_or(Error::ArithmeticOverflow("ratio addition"))?;
        let denom = self
            .denom
            .checked_mul(other.denom / g)
            .ok_or(Error::ArithmeticOverflow("ratio addition"))?;

        Ratio::new(numer, denom)
    }

    pub fn checked_sub(&self, other: &Ratio) -> Result<Ratio> {
        let negated = Ratio {
            numer: other
                .numer
                .checked_neg()
                .ok_or(Error::ArithmeticOverflow("ratio subtraction"))?,
            denom: other.denom,
        };
        self.checked_add(&negated)
    }

    pub fn checked_mul(&self, other: &Ratio) -> Result<Ratio> {
        // Cross-reduce first to keep intermediates small
        let g1 = gcd(self.numer.unsigned_abs(), other.denom as u128) as i128;
        let g2 = gcd(other.numer.unsigned_abs(), self.denom as u128) as i128;

        let numer = (self.numer / g1)
            .checked_mul(other.numer / g2)
            .ok_or(Error::ArithmeticOverflow("ratio multiplication"))?;
        let denom = (self.denom / g2)
            .checked_mul(other.denom / g1)
            .ok_or(Error::ArithmeticOverflow("ratio multiplication"))?;

        Ratio::new(numer, denom)
    }

    pub fn checked_div(&self, other: &Ratio) -> Result<Ratio> {
        if other.is_zero() {
            return Err(Error::ArithmeticOverflow("ratio division by zero"));
        }
        self.checked_mul(&Ratio::new(other.denom, other.numer)?)
    }

    /// Largest integer not greater than the value
    pub fn floor(&self) -> i128 {
        self.numer.div_euclid(self.denom)
    }

    /// Smallest integer not less than the value
    pub fn ceil(&self) -> i128 {
        let floor = self.floor();
        if self.numer.rem_euclid(self.denom) == 0 {
            floor
        } else {
            floor + 1
        }
    }

    /// Round down to whole smallest units
    pub fn floor_u64(&self) -> Result<u64> {
        u64::try_from(self.floor()).map_err(|_| Error::ArithmeticOverflow("conversion to u64"))
    }

    /// Round up to whole smallest units (use for amounts the caller pays)
    pub fn ceil_u64(&self) -> Result<u64> {
        u64::try_from(self.ceil()).map_err(|_| Error::ArithmeticOverflow("conversion to u64"))
    }

    /// Lossy conversion for display only
    pub fn to_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Ratio::ZERO
    }
}

impl From<u64> for Ratio {
    fn from(value: u64) -> Self {
        Ratio::from_u64(value)
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_fractions(self.numer, self.denom, other.numer, other.denom)
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Compare a/b with c/d (b, d > 0) by continued-fraction expansion,
/// which never multiplies and so cannot overflow.
fn cmp_fractions(mut a: i128, mut b: i128, mut c: i128, mut d: i128) -> Ordering {
    loop {
        let qa = a.div_euclid(b);
        let qc = c.div_euclid(d);
        if qa != qc {
            return qa.cmp(&qc);
        }

        let ra = a.rem_euclid(b);
        let rc = c.rem_euclid(d);
        match (ra == 0, rc == 0) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {
                // ra/b vs rc/d orders the same as d/rc vs b/ra
                let (next_a, next_b, next_c, next_d) = (d, rc, b, ra);
                a = next_a;
                b = next_b;
                c = next_c;
                d = next_d;
            }
        }
    }
}
