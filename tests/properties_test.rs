// Property tests over arbitrary arrays

use proptest::prelude::*;
use sortty::algorithms::Algorithm;
use sortty::playback::{BarRow, Player, SpeedLevel, TimerQueue};

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

fn magnitudes() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..500, 0..40)
}

proptest! {
    #[test]
    fn prop_output_is_non_decreasing(algo in algorithm(), input in magnitudes()) {
        let mut array = input.clone();
        algo.run(&mut array);

        let mut expected = input;
        expected.sort_unstable();
        prop_assert_eq!(array, expected);
    }

    #[test]
    fn prop_highlights_are_reverted(algo in algorithm(), input in magnitudes()) {
        let mut array = input;
        let log = algo.run(&mut array);
        let audit = log.audit();
        prop_assert!(
            audit.is_balanced(),
            "unreverted: {:?}, orphan reverts: {:?}",
            audit.unreverted,
            audit.orphan_reverts
        );
    }

    #[test]
    fn prop_resorting_never_relocates(algo in algorithm(), input in magnitudes()) {
        let mut array = input;
        algo.run(&mut array);
        prop_assert_eq!(algo.run(&mut array).relocations(), 0);
    }

    #[test]
    fn prop_playback_ends_on_sorted_display(algo in algorithm(), input in magnitudes()) {
        let mut array = input.clone();
        let log = algo.run(&mut array);

        let mut row = BarRow::from_values(&input);
        let mut queue = TimerQueue::new();
        Player::new()
            .play(log, SpeedLevel::MAX.pace(), &mut row, &mut queue, |_| {})
            .unwrap();
        queue.run_until_idle(&mut row);

        prop_assert_eq!(row.values(), array);
    }
}
