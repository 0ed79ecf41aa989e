//! Ticket records and the materializer.
//!
//! A [`Ticket`] is the atomic record the caller persists. [`materialize`]
//! turns one ticket form into one or more tickets and [`unflatten`] turns a
//! stored ticket back into an editable [`Selection`].
//!
//! NORMAL tickets of the 2- and 3-rank types hold exactly one runner per
//! rank, so they are stored packed into a single row (`[[A], [B]]` becomes
//! `[[A, B]]`). BOX, FORMATION and NAGASHI rows are never packed: there a
//! single row with several runners means several candidates.

use serde::{Deserialize, Serialize};

use crate::{
    BetMethod, BetSpec, BetType, EngineError, ResultEngine, Runner, Selection, Yen,
    count_points, normalize,
};

/// Persisted form of one ticket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub bet_type: BetType,
    pub method: BetMethod,
    pub multi: bool,
    pub selections: Vec<Vec<Runner>>,
    pub axis: Vec<Runner>,
    pub partners: Vec<Runner>,
    pub positions: Vec<u8>,
    pub total_points: u32,
    pub total_cost: Yen,
}

impl Ticket {
    /// Validated (type, method) pair of the ticket.
    pub fn spec(&self) -> ResultEngine<BetSpec> {
        BetSpec::new(self.bet_type, self.method)
    }

    /// Stake per point, `None` for a ticket without points.
    #[must_use]
    pub fn amount_per_point(&self) -> Option<Yen> {
        (self.total_points > 0)
            .then(|| Yen::new(self.total_cost.get() / u64::from(self.total_points)))
    }
}

/// Points and cost of a ticket form or of a batch of tickets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub points: u32,
    pub cost: Yen,
}

fn cost(points: u32, amount_per_point: Yen) -> ResultEngine<Yen> {
    amount_per_point
        .checked_mul_points(points)
        .ok_or_else(|| EngineError::InvalidStake("total cost too large".to_string()))
}

fn ensure_stake(amount_per_point: Yen) -> ResultEngine<()> {
    if !amount_per_point.is_valid_stake() {
        return Err(EngineError::InvalidStake(format!(
            "{amount_per_point} is not a positive multiple of {}",
            Yen::UNIT
        )));
    }
    Ok(())
}

/// Points and total cost of a ticket form, before materialization.
///
/// A form split into single-runner tickets quotes the sum of those tickets.
pub fn quote(selection: &Selection, spec: BetSpec, amount_per_point: Yen) -> ResultEngine<Quote> {
    ensure_stake(amount_per_point)?;
    let points = count_points(spec, &normalize(selection, spec.bet_type()));
    Ok(Quote {
        points,
        cost: cost(points, amount_per_point)?,
    })
}

/// Totals a batch of tickets.
pub fn summarize(tickets: &[Ticket]) -> ResultEngine<Quote> {
    tickets
        .iter()
        .try_fold(Quote::default(), |acc, ticket| -> ResultEngine<Quote> {
            let points = acc
                .points
                .checked_add(ticket.total_points)
                .ok_or_else(|| EngineError::InvalidStake("too many points".to_string()))?;
            let cost = acc
                .cost
                .checked_add(ticket.total_cost)
                .ok_or_else(|| EngineError::InvalidStake("total cost too large".to_string()))?;
            Ok(Quote { points, cost })
        })
}

/// Turns a ticket form into the records to persist.
///
/// WIN and PLACE forms produce one single-point ticket per selected runner;
/// every other form produces exactly one ticket. The selection is normalized
/// first. A form with zero points still materializes: blocking its
/// submission is up to the caller.
///
/// # Errors
///
/// [`EngineError::InvalidStake`] when `amount_per_point` is not a positive
/// multiple of 100 yen or the total cost overflows.
pub fn materialize(
    selection: &Selection,
    spec: BetSpec,
    amount_per_point: Yen,
) -> ResultEngine<Vec<Ticket>> {
    ensure_stake(amount_per_point)?;
    let bet_type = spec.bet_type();
    let normalized = normalize(selection, bet_type);

    let tickets: Vec<Ticket> = if spec.splits_per_runner() {
        normalized
            .row(0)
            .iter()
            .map(|runner| Ticket {
                bet_type,
                method: spec.method(),
                multi: false,
                selections: vec![vec![*runner]],
                axis: Vec::new(),
                partners: Vec::new(),
                positions: Vec::new(),
                total_points: 1,
                total_cost: amount_per_point,
            })
            .collect()
    } else {
        let total_points = count_points(spec, &normalized);
        let total_cost = cost(total_points, amount_per_point)?;
        let multi = normalized.multi();
        let Selection {
            selections,
            axis,
            partners,
            positions,
            ..
        } = Selection::from(normalized);
        let selections = if spec.packs_rows() {
            flatten(selections, bet_type.ranks())
        } else {
            selections
        };
        vec![Ticket {
            bet_type,
            method: spec.method(),
            multi,
            selections,
            axis,
            partners,
            positions,
            total_points,
            total_cost,
        }]
    };

    tracing::debug!(spec = %spec, tickets = tickets.len(), "materialized ticket form");
    Ok(tickets)
}

/// Packs one-runner-per-rank rows into a single row, in rank order.
///
/// Rows are kept as they are unless every rank holds exactly one runner, so
/// an incomplete form keeps each runner on its rank.
fn flatten(rows: Vec<Vec<Runner>>, ranks: usize) -> Vec<Vec<Runner>> {
    if rows.len() != ranks || rows.iter().any(|row| row.len() != 1) {
        return rows;
    }
    vec![rows.into_iter().flatten().collect()]
}

/// Turns a stored ticket back into an editable selection.
///
/// A packed NORMAL row (one row holding one runner per rank, any other rows
/// empty) is spread back to one runner per rank. Every other ticket keeps
/// its rows as they are.
pub fn unflatten(ticket: &Ticket) -> Selection {
    let ranks = ticket.bet_type.ranks();
    let packed = ticket.method == BetMethod::Normal
        && ranks > 1
        && matches!(
            ticket.selections.split_first(),
            Some((first, rest)) if first.len() == ranks && rest.iter().all(Vec::is_empty)
        );

    let selections = if packed {
        ticket.selections[0].iter().map(|runner| vec![*runner]).collect()
    } else {
        ticket.selections.clone()
    };

    Selection {
        selections,
        axis: ticket.axis.clone(),
        partners: ticket.partners.clone(),
        positions: ticket.positions.clone(),
        multi: ticket.multi,
    }
}
