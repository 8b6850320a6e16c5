//! Property tests: splitting the input anywhere and merging the partial
//! accumulators in order gives the sequential result.

use ironfold::testing::collect_split;
use ironfold::*;
use proptest::prelude::*;

fn split_at_cuts<T: Clone>(data: &[T], cuts: &[usize]) -> Vec<Vec<T>> {
    let mut points: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
    points.sort_unstable();
    let mut parts = Vec::with_capacity(points.len() + 1);
    let mut start = 0;
    for p in points {
        parts.push(data[start..p].to_vec());
        start = p;
    }
    parts.push(data[start..].to_vec());
    parts
}

fn sequential<T, C: Collector<T>>(collector: &C, data: Vec<T>) -> C::Output {
    collect_split(collector, vec![data])
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn distinct_split_matches_sequential(
        data in proptest::collection::vec((proptest::option::of(0u8..6), any::<u16>()), 0..64),
        cuts in proptest::collection::vec(any::<usize>(), 0..5),
        last_wins in any::<bool>(),
    ) {
        let c = distinct_by(|p: &(Option<u8>, u16)| p.0, last_wins);
        prop_assert_eq!(
            collect_split(&c, split_at_cuts(&data, &cuts)),
            sequential(&c, data)
        );
    }

    #[test]
    fn averaging_split_matches_sequential(
        data in proptest::collection::vec(proptest::option::of(-1_000i32..1_000), 0..64),
        cuts in proptest::collection::vec(any::<usize>(), 0..5),
    ) {
        let c = averaging(|x: &Option<i32>| *x);
        prop_assert_eq!(
            collect_split(&c, split_at_cuts(&data, &cuts)),
            sequential(&c, data)
        );
    }

    #[test]
    fn joining_split_matches_sequential(
        data in proptest::collection::vec(proptest::option::of("[a-c]{0,3}"), 0..32),
        cuts in proptest::collection::vec(any::<usize>(), 0..5),
    ) {
        let c = joining_with(", ", "{", "}");
        prop_assert_eq!(
            collect_split(&c, split_at_cuts(&data, &cuts)),
            sequential(&c, data)
        );
    }

    #[test]
    fn grouping_split_matches_sequential(
        data in proptest::collection::vec((proptest::option::of(0u8..4), -50i64..50), 0..64),
        cuts in proptest::collection::vec(any::<usize>(), 0..5),
    ) {
        let c = grouping_by_with(
            |p: &(Option<u8>, i64)| p.0,
            averaging(|p: &(Option<u8>, i64)| Some(p.1)),
        );
        prop_assert_eq!(
            collect_split(&c, split_at_cuts(&data, &cuts)),
            sequential(&c, data)
        );
    }

    #[test]
    fn parallel_runner_matches_sequential(
        data in proptest::collection::vec(0u32..20, 0..200),
        partitions in 1usize..12,
        fanout in 2usize..5,
    ) {
        let c = distinct_by_last(|x: &u32| x % 7);
        let par = Runner::parallel(Some(2), Some(partitions))
            .with_merge_fanout(fanout)
            .run_collect(data.clone(), &c)
            .unwrap();
        prop_assert_eq!(par, sequential(&c, data));
    }
}
