//! Selections and the selection normalizer.
//!
//! A [`Selection`] is what a user picked on the ticket form, in whatever
//! order and with whatever repeats the form produced. [`normalize`] turns it
//! into a [`NormalizedSelection`], the canonical shape the counter and the
//! materializer work on.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{BetType, EngineError, ResultEngine, Runner, runner::parse_entries};

/// Raw selection content of a ticket.
///
/// The meaning of `selections` depends on the bet type and method: one row
/// per rank for NORMAL and FORMATION, a single flat row for BOX and for
/// WIN/PLACE. `axis`, `partners`, `positions` and `multi` only matter for
/// NAGASHI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub selections: Vec<Vec<Runner>>,
    pub axis: Vec<Runner>,
    pub partners: Vec<Runner>,
    /// Ranks (1-based) the axis is fixed on, for EXACTA/TRIFECTA NAGASHI.
    pub positions: Vec<u8>,
    pub multi: bool,
}

/// Raw string form of a selection, as submitted by a form or an OCR guess.
///
/// Missing (`None`) and blank entries are allowed everywhere and are dropped
/// by [`Selection::parse`].
#[derive(Clone, Debug, Default)]
pub struct RawSelection<'a> {
    pub selections: Vec<Vec<Option<&'a str>>>,
    pub axis: Vec<Option<&'a str>>,
    pub partners: Vec<Option<&'a str>>,
    pub positions: Vec<u8>,
    pub multi: bool,
}

impl Selection {
    /// Selection with the given rows and nothing else.
    #[must_use]
    pub fn rows(selections: Vec<Vec<Runner>>) -> Self {
        Self {
            selections,
            ..Self::default()
        }
    }

    /// NAGASHI selection.
    #[must_use]
    pub fn nagashi(axis: Vec<Runner>, partners: Vec<Runner>) -> Self {
        Self {
            axis,
            partners,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn positions(mut self, positions: Vec<u8>) -> Self {
        self.positions = positions;
        self
    }

    #[must_use]
    pub fn multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    /// Builds a selection from raw strings.
    ///
    /// Blank and missing entries are dropped; anything else must be a valid
    /// runner number. Positions must be ranks `1..=3`.
    pub fn parse(raw: RawSelection<'_>) -> ResultEngine<Self> {
        if let Some(bad) = raw.positions.iter().find(|p| !(1..=3).contains(*p)) {
            return Err(EngineError::InvalidPosition(format!(
                "rank {bad} is outside 1..=3"
            )));
        }
        Ok(Self {
            selections: raw
                .selections
                .into_iter()
                .map(parse_entries)
                .collect::<ResultEngine<_>>()?,
            axis: parse_entries(raw.axis)?,
            partners: parse_entries(raw.partners)?,
            positions: raw.positions,
            multi: raw.multi,
        })
    }
}

/// Canonical selection produced by [`normalize`].
///
/// Every set is sorted ascending and free of duplicates. Unless the bet type
/// is BRACKET_QUINELLA, `axis` and `partners` are disjoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedSelection {
    selections: Vec<Vec<Runner>>,
    axis: Vec<Runner>,
    partners: Vec<Runner>,
    positions: Vec<u8>,
    multi: bool,
}

impl NormalizedSelection {
    pub fn selections(&self) -> &[Vec<Runner>] {
        &self.selections
    }

    /// Row `index`, or an empty row when the form did not send it.
    pub fn row(&self, index: usize) -> &[Runner] {
        self.selections
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn axis(&self) -> &[Runner] {
        &self.axis
    }

    pub fn partners(&self) -> &[Runner] {
        &self.partners
    }

    pub fn positions(&self) -> &[u8] {
        &self.positions
    }

    pub fn multi(&self) -> bool {
        self.multi
    }
}

impl From<NormalizedSelection> for Selection {
    fn from(normalized: NormalizedSelection) -> Self {
        Self {
            selections: normalized.selections,
            axis: normalized.axis,
            partners: normalized.partners,
            positions: normalized.positions,
            multi: normalized.multi,
        }
    }
}

fn canonical<T: Ord + Copy>(values: &[T]) -> Vec<T> {
    values
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Canonicalizes a selection for counting and storage.
///
/// - every set is de-duplicated and sorted;
/// - rows past the ranks of `bet_type` are dropped;
/// - positions outside the ranks of `bet_type` are dropped;
/// - a runner that is both axis and partner is removed from `partners`,
///   except for BRACKET_QUINELLA where axis and partner may share a bracket.
///
/// Normalization never fails and is idempotent.
pub fn normalize(selection: &Selection, bet_type: BetType) -> NormalizedSelection {
    let axis = canonical(&selection.axis);
    let mut partners = canonical(&selection.partners);
    if !bet_type.allows_repeats() {
        let before = partners.len();
        partners.retain(|p| axis.binary_search(p).is_err());
        if partners.len() != before {
            tracing::debug!(
                bet_type = %bet_type,
                dropped = before - partners.len(),
                "dropped partners overlapping the axis"
            );
        }
    }
    let max_rank = u8::try_from(bet_type.ranks()).unwrap_or(u8::MAX);
    let mut positions = canonical(&selection.positions);
    positions.retain(|p| (1..=max_rank).contains(p));

    NormalizedSelection {
        selections: selection
            .selections
            .iter()
            .take(bet_type.ranks())
            .map(|row| canonical(row))
            .collect(),
        axis,
        partners,
        positions,
        multi: selection.multi,
    }
}
