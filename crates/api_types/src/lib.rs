//! Wire shapes exchanged between the ticket engine and its callers (the
//! persistence layer, the UI and the OCR service).
//!
//! These types are deliberately loose: every field of a draft may be missing
//! because an OCR guess is best-effort. Validation happens in the engine.

use serde::{Deserialize, Serialize};

pub mod race {
    use std::fmt;

    use chrono::NaiveDate;

    use super::*;

    /// JRA racecourses.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Venue {
        Sapporo,
        Hakodate,
        Fukushima,
        Niigata,
        Tokyo,
        Nakayama,
        Chukyo,
        Kyoto,
        Hanshin,
        Kokura,
    }

    impl Venue {
        /// Returns the canonical venue string used on the wire.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Sapporo => "sapporo",
                Self::Hakodate => "hakodate",
                Self::Fukushima => "fukushima",
                Self::Niigata => "niigata",
                Self::Tokyo => "tokyo",
                Self::Nakayama => "nakayama",
                Self::Chukyo => "chukyo",
                Self::Kyoto => "kyoto",
                Self::Hanshin => "hanshin",
                Self::Kokura => "kokura",
            }
        }

        /// Name printed on tickets.
        pub fn label(self) -> &'static str {
            match self {
                Self::Sapporo => "札幌",
                Self::Hakodate => "函館",
                Self::Fukushima => "福島",
                Self::Niigata => "新潟",
                Self::Tokyo => "東京",
                Self::Nakayama => "中山",
                Self::Chukyo => "中京",
                Self::Kyoto => "京都",
                Self::Hanshin => "阪神",
                Self::Kokura => "小倉",
            }
        }
    }

    #[derive(Debug, thiserror::Error, PartialEq, Eq)]
    pub enum RaceError {
        #[error("race number {0} is outside 1..={max}", max = RaceKey::MAX_RACE_NUMBER)]
        RaceNumber(u8),
    }

    /// Identifies the race a ticket refers to.
    ///
    /// The persistence layer resolves (or creates) the race from this key.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RaceKey {
        pub date: NaiveDate,
        pub venue: Venue,
        pub race_number: u8,
    }

    impl RaceKey {
        pub const MAX_RACE_NUMBER: u8 = 12;

        pub fn new(date: NaiveDate, venue: Venue, race_number: u8) -> Result<Self, RaceError> {
            let key = Self {
                date,
                venue,
                race_number,
            };
            key.validate()?;
            Ok(key)
        }

        /// Checks a key that came in over the wire.
        pub fn validate(&self) -> Result<(), RaceError> {
            if !(1..=Self::MAX_RACE_NUMBER).contains(&self.race_number) {
                return Err(RaceError::RaceNumber(self.race_number));
            }
            Ok(())
        }
    }

    impl fmt::Display for RaceKey {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "{} {} {}R",
                self.date.format("%Y-%m-%d"),
                self.venue.label(),
                self.race_number
            )
        }
    }
}

pub mod ticket {
    use uuid::Uuid;

    use super::*;
    use crate::race::RaceKey;

    /// A ticket form as submitted by the UI or guessed by the OCR service.
    ///
    /// Bet type and method accept either the canonical code (`"TRIFECTA"`)
    /// or the ticket label (`"3連単"`). Runner entries may be `null` or blank;
    /// those are dropped.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct TicketDraft {
        /// Ticket being replaced, when editing a stored one.
        pub replaces: Option<Uuid>,
        pub race: Option<RaceKey>,
        pub bet_type: Option<String>,
        pub method: Option<String>,
        pub multi: Option<bool>,
        pub selections: Option<Vec<Vec<Option<String>>>>,
        pub axis: Option<Vec<Option<String>>>,
        pub partners: Option<Vec<Option<String>>>,
        pub positions: Option<Vec<u8>>,
        /// Stake per point, in yen.
        pub amount_per_point: Option<u64>,
    }

    /// Live preview shown under the ticket form.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PointsPreview {
        pub total_points: u32,
        /// `None` when the draft has no stake yet.
        pub total_cost: Option<u64>,
        /// `false` while the selection counts zero points.
        pub complete: bool,
    }
}
