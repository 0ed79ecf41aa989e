//! Bet taxonomy.
//!
//! The closed set of parimutuel bet types and purchase methods, plus
//! [`BetSpec`], the only way to pair them. A `BetSpec` always holds a pair
//! that can actually be purchased, so the combination counter never sees an
//! illegal one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Kind of wager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetType {
    Win,
    Place,
    BracketQuinella,
    Quinella,
    QuinellaPlace,
    Exacta,
    Trio,
    Trifecta,
}

impl BetType {
    pub const ALL: [BetType; 8] = [
        BetType::Win,
        BetType::Place,
        BetType::BracketQuinella,
        BetType::Quinella,
        BetType::QuinellaPlace,
        BetType::Exacta,
        BetType::Trio,
        BetType::Trifecta,
    ];

    /// Canonical code, as stored and exchanged on the wire.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Win => "WIN",
            Self::Place => "PLACE",
            Self::BracketQuinella => "BRACKET_QUINELLA",
            Self::Quinella => "QUINELLA",
            Self::QuinellaPlace => "QUINELLA_PLACE",
            Self::Exacta => "EXACTA",
            Self::Trio => "TRIO",
            Self::Trifecta => "TRIFECTA",
        }
    }

    /// Label printed on a JRA ticket.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Win => "単勝",
            Self::Place => "複勝",
            Self::BracketQuinella => "枠連",
            Self::Quinella => "馬連",
            Self::QuinellaPlace => "ワイド",
            Self::Exacta => "馬単",
            Self::Trio => "3連複",
            Self::Trifecta => "3連単",
        }
    }

    /// Number of finishing ranks a single point covers.
    #[must_use]
    pub const fn ranks(self) -> usize {
        match self {
            Self::Win | Self::Place => 1,
            Self::BracketQuinella | Self::Quinella | Self::QuinellaPlace | Self::Exacta => 2,
            Self::Trio | Self::Trifecta => 3,
        }
    }

    /// Whether finishing order matters.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, Self::Exacta | Self::Trifecta)
    }

    /// Whether the same number may appear twice in one combination.
    ///
    /// Only brackets repeat: two horses can share a bracket.
    #[must_use]
    pub const fn allows_repeats(self) -> bool {
        matches!(self, Self::BracketQuinella)
    }

    /// Methods that can be purchased for this type.
    #[must_use]
    pub fn methods(self) -> &'static [BetMethod] {
        match self {
            Self::Win | Self::Place => &[BetMethod::Normal],
            _ => &BetMethod::ALL,
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for BetType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(trimmed) || t.label() == trimmed)
            .ok_or_else(|| EngineError::InvalidBetType(trimmed.to_string()))
    }
}

/// How the runners of a ticket are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetMethod {
    /// One explicit combination (or, for WIN/PLACE, independent single bets).
    Normal,
    /// Every combination among a flat set of runners.
    Box,
    /// Cartesian product of per-rank candidate sets.
    Formation,
    /// One or two axis runners combined with partner runners.
    Nagashi,
}

impl BetMethod {
    pub const ALL: [BetMethod; 4] = [
        BetMethod::Normal,
        BetMethod::Box,
        BetMethod::Formation,
        BetMethod::Nagashi,
    ];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Box => "BOX",
            Self::Formation => "FORMATION",
            Self::Nagashi => "NAGASHI",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "通常",
            Self::Box => "ボックス",
            Self::Formation => "フォーメーション",
            Self::Nagashi => "ながし",
        }
    }
}

impl fmt::Display for BetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for BetMethod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(trimmed) || m.label() == trimmed)
            .ok_or_else(|| EngineError::InvalidMethod(trimmed.to_string()))
    }
}

/// A purchasable (type, method) pair.
///
/// ```rust
/// use engine::{BetMethod, BetSpec, BetType};
///
/// assert!(BetSpec::new(BetType::Trifecta, BetMethod::Box).is_ok());
/// assert!(BetSpec::new(BetType::Win, BetMethod::Box).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BetSpec {
    bet_type: BetType,
    method: BetMethod,
}

impl BetSpec {
    pub fn new(bet_type: BetType, method: BetMethod) -> ResultEngine<Self> {
        if !bet_type.methods().contains(&method) {
            return Err(EngineError::UnsupportedMethod(format!(
                "{bet_type} cannot be bought as {method}"
            )));
        }
        Ok(Self { bet_type, method })
    }

    #[must_use]
    pub const fn bet_type(self) -> BetType {
        self.bet_type
    }

    #[must_use]
    pub const fn method(self) -> BetMethod {
        self.method
    }

    /// Whether the form produces one ticket per selected runner.
    #[must_use]
    pub const fn splits_per_runner(self) -> bool {
        self.bet_type.ranks() == 1
    }

    /// Whether the selection rows are packed into one row when stored.
    #[must_use]
    pub const fn packs_rows(self) -> bool {
        matches!(self.method, BetMethod::Normal) && self.bet_type.ranks() > 1
    }
}

impl fmt::Display for BetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bet_type.label(), self.method.label())
    }
}
