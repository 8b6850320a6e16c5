use anyhow::Result;
use ironfold::*;

fn keyed_input() -> Vec<(u32, u32)> {
    (0..2_000).map(|i| (i % 17, i)).collect()
}

/// Parallel execution must agree with sequential execution for every built-in collector.
#[test]
fn parallel_matches_sequential_for_builtins() -> Result<()> {
    let seq = Runner::sequential();
    let par = Runner::parallel(Some(4), Some(9));

    let distinct = distinct_by_last(|p: &(u32, u32)| p.0);
    assert_eq!(
        seq.run_collect(keyed_input(), &distinct)?,
        par.run_collect(keyed_input(), &distinct)?
    );

    let avg = averaging(|p: &(u32, u32)| Some(f64::from(p.1)));
    assert_eq!(
        seq.run_collect(keyed_input(), &avg)?,
        par.run_collect(keyed_input(), &avg)?
    );

    let join = joining_with(",", "[", "]");
    let words: Vec<String> = (0..300).map(|i| format!("w{i}")).collect();
    assert_eq!(
        seq.run_collect(words.clone(), &join)?,
        par.run_collect(words, &join)?
    );

    let groups = grouping_by_with(|p: &(u32, u32)| p.0, Counting);
    let out = par.run_collect(keyed_input(), &groups)?;
    assert_eq!(out, seq.run_collect(keyed_input(), &groups)?);
    assert_eq!(out.values().sum::<u64>(), 2_000);
    Ok(())
}

#[test]
fn fanout_rounds_preserve_source_order() -> Result<()> {
    let input: Vec<u32> = (0..500).collect();
    let expected = input
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    for fanout in [2, 3, 5, 64] {
        let out = Runner::parallel(None, Some(37))
            .with_merge_fanout(fanout)
            .run_collect(input.clone(), &joining(" "))?;
        assert_eq!(out, expected, "fanout {fanout}");
    }
    Ok(())
}

#[test]
fn fanout_below_two_is_rejected() {
    for fanout in [0, 1] {
        let err = Runner::parallel(None, None)
            .with_merge_fanout(fanout)
            .run_collect(vec![1, 2, 3], &ToVec)
            .unwrap_err();
        assert!(err.to_string().contains("merge fanout"), "{err}");
    }
    let err = Runner::sequential()
        .with_merge_fanout(1)
        .run_collect(vec![1u8], &Counting)
        .unwrap_err();
    assert!(err.to_string().contains("at least 2"));
}

#[test]
fn empty_input_finishes_once() -> Result<()> {
    for runner in [Runner::sequential(), Runner::parallel(Some(2), Some(8))] {
        let out = runner.run_collect(Vec::<i32>::new(), &averaging(|x: &i32| Some(*x)))?;
        assert_eq!(out, None);
        let out = runner.run_collect(Vec::<&str>::new(), &joining_with(",", "<", ">"))?;
        assert_eq!(out, "<>");
        let out = runner.run_collect(Vec::<u8>::new(), &grouping_by(|x: &u8| *x))?;
        assert!(out.is_empty());
    }
    Ok(())
}

#[test]
fn more_partitions_than_elements() -> Result<()> {
    let out = Runner::parallel(None, Some(64)).run_collect(vec![3, 1, 2], &ToVec)?;
    assert_eq!(out, vec![3, 1, 2]);
    Ok(())
}

#[test]
fn default_runner_is_parallel() -> Result<()> {
    let runner = Runner::default();
    assert!(matches!(runner.mode, ExecMode::Parallel { .. }));
    assert!(runner.default_partitions >= 4);
    assert_eq!(runner.merge_fanout, None);

    let out = runner.run_collect((0..100).collect::<Vec<i64>>(), &summing(|x: &i64| Some(*x)))?;
    assert_eq!(out, Some(4950));
    Ok(())
}

#[test]
fn sequential_mode_reports_itself() {
    let runner = Runner::sequential();
    assert_eq!(runner.mode, ExecMode::Sequential);
    let mode = Runner::parallel(Some(3), None).mode;
    assert_eq!(
        mode,
        ExecMode::Parallel {
            threads: Some(3),
            partitions: None
        }
    );
}

#[test]
fn characteristics_do_not_change_merge_order() -> Result<()> {
    let claims_unordered = collector_of(
        String::new,
        |acc: &mut String, c: char| acc.push(c),
        |acc: &mut String, other: String| acc.push_str(&other),
        |acc: String| acc,
        Characteristics::UNORDERED | Characteristics::CONCURRENT,
    );
    let input: Vec<char> = "the quick brown fox jumps over the lazy dog".chars().collect();
    let expected: String = input.iter().collect();
    for runner in [
        Runner::parallel(Some(4), Some(11)),
        Runner::parallel(Some(3), Some(7)).with_merge_fanout(2),
    ] {
        assert_eq!(runner.run_collect(input.clone(), &claims_unordered)?, expected);
    }
    Ok(())
}
