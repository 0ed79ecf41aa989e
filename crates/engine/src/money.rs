use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::EngineError;

/// Amount of money in **integer yen**.
///
/// Use this type for every stake and ticket cost. JRA sells points in units
/// of 100 yen, see [`Yen::is_valid_stake`].
///
/// # Examples
///
/// ```rust
/// use engine::Yen;
///
/// let stake = Yen::new(1_200);
/// assert_eq!(stake.to_string(), "¥1,200");
/// assert_eq!("1,000".parse::<Yen>().unwrap(), Yen::new(1_000));
/// assert_eq!("３００円".parse::<Yen>().unwrap(), Yen::new(300));
/// assert!("12.5".parse::<Yen>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Yen(u64);

impl Yen {
    pub const ZERO: Yen = Yen(0);
    /// Smallest purchasable unit per point.
    pub const UNIT: Yen = Yen(100);

    #[must_use]
    pub const fn new(yen: u64) -> Self {
        Self(yen)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns `true` if the amount can be staked on a single point.
    #[must_use]
    pub const fn is_valid_stake(self) -> bool {
        self.0 > 0 && self.0 % Self::UNIT.0 == 0
    }

    /// Checked multiplication by a point count (returns `None` on overflow).
    #[must_use]
    pub fn checked_mul_points(self, points: u32) -> Option<Yen> {
        self.0.checked_mul(u64::from(points)).map(Yen)
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Yen) -> Option<Yen> {
        self.0.checked_add(rhs.0).map(Yen)
    }
}

impl fmt::Display for Yen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "¥{grouped}")
    }
}

impl FromStr for Yen {
    type Err = EngineError;

    /// Parses a whole-yen amount.
    ///
    /// The input is NFKC folded, then an optional leading `¥` and trailing
    /// `円` are stripped and `,` thousands separators are ignored.
    /// Fractions and signs are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidStake(format!("invalid amount: \"{s}\""));

        let folded: String = s.nfkc().collect();
        let trimmed = folded.trim();
        let trimmed = trimmed.strip_prefix('¥').unwrap_or(trimmed);
        let trimmed = trimmed.strip_suffix('円').unwrap_or(trimmed).trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidStake("empty amount".to_string()));
        }

        let digits: String = trimmed.chars().filter(|c| *c != ',').collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        digits
            .parse::<u64>()
            .map(Yen)
            .map_err(|_| EngineError::InvalidStake("amount too large".to_string()))
    }
}
