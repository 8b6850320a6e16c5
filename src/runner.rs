//! Reference drivers for collectors.
//!
//! [`Runner`] feeds a `Vec<T>` through a [`Collector`] either sequentially or
//! split into contiguous partitions that are accumulated on a rayon pool.
//! Partition accumulators are always merged in source order (left to right,
//! optionally in rounds of at most `merge_fanout`), so order-sensitive merges
//! such as last-wins distinct see the same order a sequential run would.
//!
//! [`CollectExt`] is the lightweight path: `iter.collect_with(collector)`.

use crate::collector::Collector;
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    Sequential,
    Parallel {
        threads: Option<usize>,
        partitions: Option<usize>,
    },
}

#[derive(Clone, Debug)]
pub struct Runner {
    pub mode: ExecMode,
    pub default_partitions: usize,
    /// Merge at most this many accumulators per round. `None` merges all
    /// partitions in a single left-to-right pass.
    pub merge_fanout: Option<usize>,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads: None,
                partitions: None,
            },
            default_partitions: 2 * num_cpus::get().max(2),
            merge_fanout: None,
        }
    }
}

impl Runner {
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            mode: ExecMode::Sequential,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn parallel(threads: Option<usize>, partitions: Option<usize>) -> Self {
        Self {
            mode: ExecMode::Parallel {
                threads,
                partitions,
            },
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn with_merge_fanout(mut self, fanout: usize) -> Self {
        self.merge_fanout = Some(fanout);
        self
    }

    /// Reduce `data` with `collector`.
    ///
    /// # Errors
    /// Fails on an invalid configuration (a merge fanout below 2) or when a
    /// dedicated thread pool cannot be built. Panics raised by caller-supplied
    /// functions inside the collector propagate unchanged.
    pub fn run_collect<T, C>(&self, data: Vec<T>, collector: &C) -> Result<C::Output>
    where
        T: Send,
        C: Collector<T> + Sync,
        C::Acc: Send,
        C::Output: Send,
    {
        if let Some(fanout) = self.merge_fanout.filter(|f| *f < 2) {
            bail!("merge fanout must be at least 2, got {fanout}");
        }

        match self.mode {
            ExecMode::Sequential => {
                debug!(elements = data.len(), "runner: sequential collect");
                Ok(exec_seq(data, collector))
            }
            ExecMode::Parallel {
                threads,
                partitions,
            } => {
                let parts = partitions.unwrap_or(self.default_partitions).max(1);
                debug!(
                    elements = data.len(),
                    partitions = parts,
                    threads = ?threads,
                    "runner: parallel collect"
                );
                match threads {
                    Some(t) => {
                        let pool = rayon::ThreadPoolBuilder::new()
                            .num_threads(t)
                            .build()
                            .context("building rayon thread pool")?;
                        Ok(pool.install(|| {
                            exec_parallel(data, collector, parts, self.merge_fanout)
                        }))
                    }
                    None => Ok(exec_parallel(data, collector, parts, self.merge_fanout)),
                }
            }
        }
    }
}

/// Single accumulator, fed in order.
fn exec_seq<T, C: Collector<T>>(data: Vec<T>, collector: &C) -> C::Output {
    let mut acc = collector.create();
    for v in data {
        collector.add_input(&mut acc, v);
    }
    collector.finish(acc)
}

/// Partition, accumulate each partition on the pool, merge in order, finish once.
fn exec_parallel<T, C>(
    data: Vec<T>,
    collector: &C,
    partitions: usize,
    fanout: Option<usize>,
) -> C::Output
where
    T: Send,
    C: Collector<T> + Sync,
    C::Acc: Send,
{
    let accs: Vec<C::Acc> = split_partitions(data, partitions)
        .into_par_iter()
        .map(|part| {
            let mut acc = collector.create();
            for v in part {
                collector.add_input(&mut acc, v);
            }
            acc
        })
        .collect();

    let merged = match fanout {
        Some(f) => merge_in_rounds::<T, C>(accs, collector, f),
        None => merge_left::<T, C>(accs, collector),
    };
    collector.finish(merged)
}

/// Split into at most `n` contiguous, order-preserving chunks.
fn split_partitions<T>(data: Vec<T>, n: usize) -> Vec<Vec<T>> {
    let len = data.len();
    if n <= 1 || len <= 1 {
        return vec![data];
    }
    let chunk = len.div_ceil(n);
    let mut parts = Vec::with_capacity(n);
    let mut rest = data.into_iter();
    loop {
        let part: Vec<T> = rest.by_ref().take(chunk).collect();
        if part.is_empty() {
            break;
        }
        parts.push(part);
    }
    parts
}

fn merge_left<T, C: Collector<T>>(accs: Vec<C::Acc>, collector: &C) -> C::Acc {
    let mut it = accs.into_iter();
    let Some(mut acc) = it.next() else {
        return collector.create();
    };
    for other in it {
        collector.merge(&mut acc, other);
    }
    acc
}

fn merge_in_rounds<T, C>(mut accs: Vec<C::Acc>, collector: &C, fanout: usize) -> C::Acc
where
    C: Collector<T> + Sync,
    C::Acc: Send,
{
    let mut round = 0usize;
    while accs.len() > fanout {
        round += 1;
        trace!(round, accumulators = accs.len(), fanout, "runner: merge round");
        let mut groups: Vec<Vec<C::Acc>> = Vec::with_capacity(accs.len().div_ceil(fanout));
        let mut rest = accs.into_iter();
        loop {
            let group: Vec<C::Acc> = rest.by_ref().take(fanout).collect();
            if group.is_empty() {
                break;
            }
            groups.push(group);
        }
        accs = groups
            .into_par_iter()
            .map(|group| merge_left::<T, C>(group, collector))
            .collect();
    }
    merge_left::<T, C>(accs, collector)
}

/* ===================== CollectExt ===================== */

/// Drive any iterator through a collector on the current thread.
pub trait CollectExt: Iterator + Sized {
    fn collect_with<C>(self, collector: C) -> C::Output
    where
        C: Collector<Self::Item>,
    {
        let mut acc = collector.create();
        for v in self {
            collector.add_input(&mut acc, v);
        }
        collector.finish(acc)
    }
}

impl<I: Iterator> CollectExt for I {}

#[cfg(test)]
mod tests {
    use super::split_partitions;

    #[test]
    fn split_keeps_order_and_sizes() {
        let parts = split_partitions((0..10).collect::<Vec<_>>(), 3);
        assert_eq!(parts, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7], vec![8, 9]]);
    }

    #[test]
    fn split_degenerate_inputs() {
        assert_eq!(split_partitions(Vec::<u8>::new(), 4), vec![Vec::<u8>::new()]);
        assert_eq!(split_partitions(vec![1], 4), vec![vec![1]]);
        assert_eq!(split_partitions(vec![1, 2, 3], 1), vec![vec![1, 2, 3]]);
        assert_eq!(split_partitions(vec![1, 2], 8), vec![vec![1], vec![2]]);
    }
}
