use anyhow::Result;
use ironfold::testing::*;
use ironfold::*;

#[derive(Clone, Debug, PartialEq)]
struct Item {
    k: Option<u32>,
    v: &'static str,
}

fn item(k: Option<u32>, v: &'static str) -> Item {
    Item { k, v }
}

#[test]
fn override_keeps_last_seen() {
    let input = vec![item(Some(1), "x"), item(Some(1), "y")];
    let out = input.into_iter().collect_with(distinct_by(|i: &Item| i.k, true));
    assert_eq!(out, vec![item(Some(1), "y")]);
}

#[test]
fn no_override_keeps_first_seen() {
    let input = vec![item(Some(1), "x"), item(Some(1), "y")];
    let out = input.into_iter().collect_with(distinct_by(|i: &Item| i.k, false));
    assert_eq!(out, vec![item(Some(1), "x")]);
}

#[test]
fn override_keeps_first_position() {
    let input = vec![item(Some(1), "a"), item(Some(2), "b"), item(Some(1), "c")];
    let out = input.into_iter().collect_with(distinct_by_last(|i: &Item| i.k));
    assert_collections_equal(&out, &[item(Some(1), "c"), item(Some(2), "b")]);
}

#[test]
fn null_key_appears_exactly_once() {
    let input = vec![
        item(None, "first-null"),
        item(Some(3), "three"),
        item(None, "second-null"),
    ];
    let firsts = input
        .clone()
        .into_iter()
        .collect_with(distinct_by_first(|i: &Item| i.k));
    assert_eq!(firsts, vec![item(None, "first-null"), item(Some(3), "three")]);

    let lasts = input.into_iter().collect_with(distinct_by_last(|i: &Item| i.k));
    assert_eq!(lasts, vec![item(None, "second-null"), item(Some(3), "three")]);
}

#[test]
fn second_pass_is_a_no_op() {
    let input: Vec<u32> = vec![5, 3, 5, 8, 3, 13, 8];
    let once = input.into_iter().collect_with(distinct_by(|x: &u32| x % 4, false));
    let twice = once
        .clone()
        .into_iter()
        .collect_with(distinct_by(|x: &u32| x % 4, false));
    assert_eq!(once, vec![5, 3, 8]);
    assert_eq!(once, twice);
}

#[test]
fn empty_input_gives_empty_output() {
    let c = distinct_by(|x: &i32| *x, true);
    assert_empty_input_defined::<i32, _>(&c, &Vec::new());
    assert!(!distinct_by(|x: &i32| *x, false).overrides());
}

#[test]
fn merge_applies_the_same_policy() {
    let first_wins = distinct_by_first(|i: &Item| i.k);
    let left = vec![item(Some(1), "l1"), item(None, "ln")];
    let right = vec![item(Some(2), "r2"), item(Some(1), "r1"), item(None, "rn")];
    let out = collect_split(&first_wins, vec![left.clone(), right.clone()]);
    assert_eq!(
        out,
        vec![item(Some(1), "l1"), item(None, "ln"), item(Some(2), "r2")]
    );

    let last_wins = distinct_by_last(|i: &Item| i.k);
    let out = collect_split(&last_wins, vec![left, right]);
    assert_eq!(
        out,
        vec![item(Some(1), "r1"), item(None, "rn"), item(Some(2), "r2")]
    );
}

#[test]
fn later_merged_partition_wins_with_override() {
    let last_wins = distinct_by_last(|x: &(u8, char)| x.0);
    let a = vec![(1, 'a')];
    let b = vec![(1, 'b')];
    assert_eq!(collect_split(&last_wins, vec![a.clone(), b.clone()]), vec![(1, 'b')]);
    assert_eq!(collect_split(&last_wins, vec![b, a]), vec![(1, 'a')]);
}

#[test]
fn parallel_runner_preserves_last_wins_in_source_order() -> Result<()> {
    // 1000 elements over 10 keys; the last occurrence of key k is 990 + k.
    let input: Vec<u32> = (0..1000).collect();
    let c = distinct_by_last(|x: &u32| x % 10);
    let out = Runner::parallel(Some(4), Some(16)).run_collect(input, &c)?;
    assert_eq!(out, (990..1000).collect::<Vec<_>>());
    Ok(())
}
