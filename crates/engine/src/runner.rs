//! Runner numbers.
//!
//! A [`Runner`] identifies a horse (or, for bracket quinella, a bracket) by
//! its race-relative number. The canonical text form is the two-digit
//! zero-padded string (`"01"`..`"18"`), so numeric ordering and string
//! ordering always agree.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// Number of a runner in a race.
///
/// # Examples
///
/// ```rust
/// use engine::Runner;
///
/// let runner: Runner = "7".parse().unwrap();
/// assert_eq!(runner.to_string(), "07");
/// assert_eq!("１２".parse::<Runner>().unwrap().number(), 12);
/// assert!("19".parse::<Runner>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Runner(u8);

impl Runner {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 18;

    /// Creates a runner, rejecting numbers outside `1..=18`.
    pub fn new(number: u8) -> ResultEngine<Self> {
        if !(Self::MIN..=Self::MAX).contains(&number) {
            return Err(EngineError::InvalidRunner(format!(
                "{number} is outside {}..={}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(number))
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for Runner {
    type Err = EngineError;

    /// Parses a runner number.
    ///
    /// Input is NFKC folded first, so full-width digits produced by OCR or a
    /// Japanese IME are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s.nfkc().collect();
        let trimmed = folded.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(EngineError::InvalidRunner(format!("\"{s}\" is not a number")));
        }
        let number: u8 = trimmed
            .parse()
            .map_err(|_| EngineError::InvalidRunner(format!("\"{s}\" is out of range")))?;
        Self::new(number)
    }
}

impl TryFrom<u8> for Runner {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for Runner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Runner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a list of raw entries, dropping blank and missing ones.
pub(crate) fn parse_entries<I, S>(entries: I) -> ResultEngine<Vec<Runner>>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .flatten()
        .filter(|raw| !raw.as_ref().trim().is_empty())
        .map(|raw| raw.as_ref().parse())
        .collect()
}
