//! Grouping collector: `GroupingBy`
//!
//! Classifies each element by key and feeds it to a per-key downstream
//! collector. Keys may be absent: classify into `Option<K>` and `None` forms a
//! group of its own. Groups are tracked in first-seen order while
//! accumulating; the output map is built by a caller-supplied factory, so the
//! final iteration order is whatever that map type provides (insertion order
//! for the default [`IndexMap`]).

use crate::collector::Collector;
use crate::combiners::basic::ToVec;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::hash::Hash;
use std::marker::PhantomData;
use tracing::trace;

/* ===================== GroupingBy ===================== */

/// Group elements by `classifier`, reducing each group with `downstream`.
///
/// - Accumulator: `IndexMap<K, C::Acc>`
/// - Output: `M`, filled from `map_factory()` with `(K, C::Output)` pairs
///
/// Exactly one downstream accumulator exists per distinct key, and each one
/// passes through `downstream.finish` exactly once.
pub struct GroupingBy<K, M, F, C, MF> {
    classifier: F,
    downstream: C,
    map_factory: MF,
    _m: PhantomData<fn() -> (K, M)>,
}

impl<K, M, F, C, MF> Clone for GroupingBy<K, M, F, C, MF>
where
    F: Clone,
    C: Clone,
    MF: Clone,
{
    fn clone(&self) -> Self {
        Self {
            classifier: self.classifier.clone(),
            downstream: self.downstream.clone(),
            map_factory: self.map_factory.clone(),
            _m: PhantomData,
        }
    }
}

impl<K, M, F, C, MF> GroupingBy<K, M, F, C, MF> {
    /// The per-group collector.
    pub const fn downstream(&self) -> &C {
        &self.downstream
    }
}

/// Group into an insertion-ordered map of `Vec<T>`.
///
/// ```
/// use ironfold::{grouping_by, CollectExt};
///
/// let groups = vec![5, 15].into_iter().collect_with(grouping_by(|x: &i32| (*x > 10).then_some(*x)));
/// assert_eq!(groups.get(&None::<i32>), Some(&vec![5]));
/// assert_eq!(groups.get(&Some(15)), Some(&vec![15]));
/// ```
pub fn grouping_by<T, K, F>(
    classifier: F,
) -> GroupingBy<K, IndexMap<K, Vec<T>>, F, ToVec, fn() -> IndexMap<K, Vec<T>>>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    grouping_by_into(classifier, IndexMap::new as fn() -> _, ToVec)
}

/// Group into an insertion-ordered map, reducing each group with `downstream`.
pub fn grouping_by_with<T, K, F, C>(
    classifier: F,
    downstream: C,
) -> GroupingBy<K, IndexMap<K, C::Output>, F, C, fn() -> IndexMap<K, C::Output>>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
    C: Collector<T>,
{
    grouping_by_into(classifier, IndexMap::new as fn() -> _, downstream)
}

/// Group into the map produced by `map_factory`, reducing each group with `downstream`.
///
/// The factory's map only has to accept `(K, D)` pairs through [`Extend`];
/// `HashMap`, `BTreeMap` and `IndexMap` all qualify, and all accept `Option`
/// keys.
pub fn grouping_by_into<T, K, M, F, C, MF>(
    classifier: F,
    map_factory: MF,
    downstream: C,
) -> GroupingBy<K, M, F, C, MF>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
    C: Collector<T>,
    MF: Fn() -> M,
    M: Extend<(K, C::Output)>,
{
    GroupingBy {
        classifier,
        downstream,
        map_factory,
        _m: PhantomData,
    }
}

impl<T, K, M, F, C, MF> Collector<T> for GroupingBy<K, M, F, C, MF>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
    C: Collector<T>,
    MF: Fn() -> M,
    M: Extend<(K, C::Output)>,
{
    type Acc = IndexMap<K, C::Acc>;
    type Output = M;

    fn create(&self) -> IndexMap<K, C::Acc> {
        IndexMap::new()
    }

    fn add_input(&self, acc: &mut IndexMap<K, C::Acc>, v: T) {
        let key = (self.classifier)(&v);
        let slot = acc.entry(key).or_insert_with(|| self.downstream.create());
        self.downstream.add_input(slot, v);
    }

    fn merge(&self, acc: &mut IndexMap<K, C::Acc>, other: IndexMap<K, C::Acc>) {
        for (key, part) in other {
            match acc.entry(key) {
                Entry::Occupied(mut slot) => self.downstream.merge(slot.get_mut(), part),
                Entry::Vacant(slot) => {
                    slot.insert(part);
                }
            }
        }
    }

    fn finish(&self, acc: IndexMap<K, C::Acc>) -> M {
        trace!(groups = acc.len(), "grouping: finishing downstream accumulators");
        let mut out = (self.map_factory)();
        out.extend(
            acc.into_iter()
                .map(|(key, part)| (key, self.downstream.finish(part))),
        );
        out
    }
}
