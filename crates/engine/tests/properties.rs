use engine::{
    BetMethod, BetSpec, BetType, Runner, Selection, Yen, count_points, materialize, normalize,
    unflatten,
};
use proptest::prelude::*;

fn runner() -> impl Strategy<Value = Runner> {
    (Runner::MIN..=Runner::MAX).prop_map(|n| Runner::new(n).unwrap())
}

fn all_runners() -> Vec<Runner> {
    (Runner::MIN..=Runner::MAX)
        .map(|n| Runner::new(n).unwrap())
        .collect()
}

fn runner_set(size: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Vec<Runner>> {
    prop::sample::subsequence(all_runners(), size)
}

fn runner_list() -> impl Strategy<Value = Vec<Runner>> {
    prop::collection::vec(runner(), 0..12)
}

fn bet_type() -> impl Strategy<Value = BetType> {
    prop::sample::select(BetType::ALL.to_vec())
}

fn selection() -> impl Strategy<Value = Selection> {
    (
        prop::collection::vec(runner_list(), 0..4),
        runner_list(),
        runner_list(),
        prop::collection::vec(1u8..=3, 0..4),
        any::<bool>(),
    )
        .prop_map(|(selections, axis, partners, positions, multi)| Selection {
            selections,
            axis,
            partners,
            positions,
            multi,
        })
}

fn boxed(bet_type: BetType, set: &[Runner]) -> u32 {
    let spec = BetSpec::new(bet_type, BetMethod::Box).unwrap();
    count_points(spec, &normalize(&Selection::rows(vec![set.to_vec()]), bet_type))
}

proptest! {
    #[test]
    fn box_counts_follow_the_formulas(set in runner_set(0..=18)) {
        let n = set.len() as u32;
        let pairs = n * n.saturating_sub(1);
        let triples = pairs * n.saturating_sub(2);
        prop_assert_eq!(boxed(BetType::Quinella, &set), pairs / 2);
        prop_assert_eq!(boxed(BetType::BracketQuinella, &set), pairs / 2);
        prop_assert_eq!(boxed(BetType::QuinellaPlace, &set), pairs / 2);
        prop_assert_eq!(boxed(BetType::Exacta, &set), pairs);
        prop_assert_eq!(boxed(BetType::Trio, &set), triples / 6);
        prop_assert_eq!(boxed(BetType::Trifecta, &set), triples);
    }

    #[test]
    fn normalize_is_idempotent(selection in selection(), bet_type in bet_type()) {
        let once = normalize(&selection, bet_type);
        let twice = normalize(&Selection::from(once.clone()), bet_type);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalized_sets_are_sorted_and_disjoint(selection in selection(), bet_type in bet_type()) {
        let normalized = normalize(&selection, bet_type);
        for set in normalized.selections().iter().map(Vec::as_slice)
            .chain([normalized.axis(), normalized.partners()])
        {
            prop_assert!(set.windows(2).all(|w| w[0] < w[1]));
        }
        if bet_type != BetType::BracketQuinella {
            prop_assert!(normalized.partners().iter().all(|p| !normalized.axis().contains(p)));
        }
    }

    #[test]
    fn normal_with_a_repeated_runner_is_zero(
        repeated in runner(),
        other in runner(),
        three_ranks in any::<bool>(),
    ) {
        let types: &[BetType] = if three_ranks {
            &[BetType::Trio, BetType::Trifecta]
        } else {
            &[BetType::Quinella, BetType::QuinellaPlace, BetType::Exacta]
        };
        for bet_type in types {
            let mut rows = vec![vec![repeated], vec![repeated]];
            if three_ranks {
                rows.push(vec![other]);
            }
            let spec = BetSpec::new(*bet_type, BetMethod::Normal).unwrap();
            prop_assert_eq!(count_points(spec, &normalize(&Selection::rows(rows), *bet_type)), 0);
        }
    }

    #[test]
    fn normal_round_trip_is_lossless(set in runner_set(3..=18), bet_type in bet_type()) {
        let picks: Vec<Runner> = set.into_iter().rev().collect();
        let spec = BetSpec::new(bet_type, BetMethod::Normal).unwrap();

        if spec.splits_per_runner() {
            let selection = Selection::rows(vec![picks.clone()]);
            let tickets = materialize(&selection, spec, Yen::new(100)).unwrap();
            let restored: Vec<Runner> = tickets
                .iter()
                .flat_map(|t| unflatten(t).selections.concat())
                .collect();
            let mut expected = picks;
            expected.sort();
            prop_assert_eq!(restored, expected);
        } else {
            let rows: Vec<Vec<Runner>> =
                picks.iter().take(bet_type.ranks()).map(|r| vec![*r]).collect();
            let tickets = materialize(&Selection::rows(rows.clone()), spec, Yen::new(100)).unwrap();
            prop_assert_eq!(tickets.len(), 1);
            prop_assert_eq!(&unflatten(&tickets[0]).selections, &rows);
        }
    }

    #[test]
    fn total_cost_is_points_times_stake(
        selection in selection(),
        bet_type in bet_type(),
        hundreds in 1u64..100,
    ) {
        let stake = Yen::new(hundreds * 100);
        for method in bet_type.methods() {
            let spec = BetSpec::new(bet_type, *method).unwrap();
            for ticket in materialize(&selection, spec, stake).unwrap() {
                prop_assert_eq!(ticket.total_cost.get(), u64::from(ticket.total_points) * stake.get());
            }
        }
    }
}
