//! Combination counter.
//!
//! Counts how many individual wagers ("points") a normalized selection
//! stands for. Zero means the selection is incomplete; it is never an error.

use std::collections::BTreeSet;

use crate::{BetMethod, BetSpec, BetType, NormalizedSelection, Runner};

/// Number of ways to pick `k` of `n` items, order ignored.
#[must_use]
pub fn combinations(n: usize, k: usize) -> u32 {
    if k > n {
        return 0;
    }
    // Multiplying before dividing keeps every intermediate value an integer.
    let k = k.min(n - k);
    let mut acc: u64 = 1;
    for i in 0..k {
        acc = acc * (n - i) as u64 / (i + 1) as u64;
    }
    u32::try_from(acc).unwrap_or(u32::MAX)
}

/// Number of ways to pick `k` of `n` items in order.
#[must_use]
pub fn permutations(n: usize, k: usize) -> u32 {
    if k > n {
        return 0;
    }
    let acc = ((n - k + 1)..=n).fold(1u64, |acc, v| acc.saturating_mul(v as u64));
    u32::try_from(acc).unwrap_or(u32::MAX)
}

fn len_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

fn excluding(runners: &[Runner], excluded: &[Runner]) -> usize {
    runners.iter().filter(|r| !excluded.contains(r)).count()
}

/// Counts the points of `selection` for `spec`.
///
/// ```rust
/// use engine::{BetMethod, BetSpec, BetType, Runner, Selection, count_points, normalize};
///
/// let runners = |ns: &[u8]| ns.iter().map(|n| Runner::new(*n).unwrap()).collect::<Vec<_>>();
/// let spec = BetSpec::new(BetType::Trio, BetMethod::Nagashi).unwrap();
/// let selection = Selection::nagashi(runners(&[1]), runners(&[2, 3, 4]));
/// assert_eq!(count_points(spec, &normalize(&selection, spec.bet_type())), 3);
/// ```
pub fn count_points(spec: BetSpec, selection: &NormalizedSelection) -> u32 {
    let bet_type = spec.bet_type();
    let points = match (bet_type, spec.method()) {
        (BetType::Win | BetType::Place, _) => len_u32(selection.row(0).len()),
        (_, BetMethod::Normal) => normal(bet_type, selection),
        (_, BetMethod::Box) => boxed(bet_type, selection.row(0).len()),
        (_, BetMethod::Formation) => formation(bet_type, selection),
        (_, BetMethod::Nagashi) => nagashi(bet_type, selection),
    };
    tracing::trace!(spec = %spec, points, "counted points");
    points
}

fn normal(bet_type: BetType, selection: &NormalizedSelection) -> u32 {
    let mut picked: Vec<Runner> = Vec::with_capacity(bet_type.ranks());
    for rank in 0..bet_type.ranks() {
        let [runner] = selection.row(rank) else {
            return 0;
        };
        if !bet_type.allows_repeats() && picked.contains(runner) {
            return 0;
        }
        picked.push(*runner);
    }
    1
}

fn boxed(bet_type: BetType, n: usize) -> u32 {
    match bet_type {
        BetType::Win | BetType::Place => len_u32(n),
        // JRA boxes never pair a bracket with itself.
        BetType::BracketQuinella | BetType::Quinella | BetType::QuinellaPlace => {
            combinations(n, 2)
        }
        BetType::Exacta => permutations(n, 2),
        BetType::Trio => combinations(n, 3),
        BetType::Trifecta => permutations(n, 3),
    }
}

fn formation(bet_type: BetType, selection: &NormalizedSelection) -> u32 {
    let rows: Vec<&[Runner]> = (0..bet_type.ranks()).map(|i| selection.row(i)).collect();
    if rows.iter().any(|row| row.is_empty()) {
        return 0;
    }

    let mut tuples: Vec<Vec<Runner>> = vec![Vec::new()];
    for row in rows {
        let mut next = Vec::with_capacity(tuples.len() * row.len());
        for prefix in &tuples {
            for runner in row {
                if !bet_type.allows_repeats() && prefix.contains(runner) {
                    continue;
                }
                let mut tuple = prefix.clone();
                tuple.push(*runner);
                next.push(tuple);
            }
        }
        tuples = next;
    }

    let distinct: BTreeSet<Vec<Runner>> = tuples
        .into_iter()
        .map(|mut tuple| {
            if !bet_type.is_ordered() {
                tuple.sort_unstable();
            }
            tuple
        })
        .collect();
    len_u32(distinct.len())
}

fn nagashi(bet_type: BetType, selection: &NormalizedSelection) -> u32 {
    let axis = selection.axis();
    let partners = selection.partners();
    if axis.is_empty() || partners.is_empty() {
        return 0;
    }

    match bet_type {
        BetType::Win | BetType::Place => 0,
        BetType::BracketQuinella | BetType::Quinella | BetType::QuinellaPlace => {
            let pairs: BTreeSet<(Runner, Runner)> = axis
                .iter()
                .flat_map(move |a| partners.iter().map(move |p| (*a, *p)))
                .filter(|(a, p)| bet_type.allows_repeats() || a != p)
                .map(|(a, p)| if a <= p { (a, p) } else { (p, a) })
                .collect();
            len_u32(pairs.len())
        }
        BetType::Exacta => {
            let n = len_u32(excluding(partners, axis));
            let single = len_u32(axis.len()).saturating_mul(n);
            if selection.multi() {
                single.saturating_mul(2)
            } else {
                single
            }
        }
        BetType::Trio => match axis {
            [_] => combinations(excluding(partners, axis), 2),
            [_, _] => len_u32(excluding(partners, axis)),
            _ => 0,
        },
        // Axes are sorted, so only the count is meaningful here, never which
        // axis runner sits on which rank.
        BetType::Trifecta => {
            let n = excluding(partners, axis);
            // Without fixed positions the axis occupies a single rank.
            let single_axis = axis.len() == 1 || selection.positions().is_empty();
            match (single_axis, axis, selection.multi()) {
                (true, _, true) => combinations(n, 2).saturating_mul(6),
                (true, _, false) => permutations(n, 2),
                (false, [_, _], true) => len_u32(n).saturating_mul(6),
                (false, [_, _], false) => len_u32(n),
                _ => 0,
            }
        }
    }
}
