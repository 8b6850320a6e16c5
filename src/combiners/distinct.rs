//! Distinct-by-key collector: `DistinctBy`

use crate::collector::Collector;
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::hash::Hash;
use std::marker::PhantomData;

/* ===================== DistinctBy<K, F> ===================== */

/// Keep one element per derived key, in first-seen key order.
///
/// - Accumulator: `IndexMap<K, T>`
/// - Output: `Vec<T>`
///
/// With `override_on_duplicate` the last element seen for a key wins (its
/// slot keeps the key's original position); otherwise the first one is kept.
/// The same policy applies when merging partial maps, so with override on the
/// partition merged in later wins. Drivers must merge in source order for
/// "last wins" to mean "last in the input".
///
/// Keys are compared by value. Use `Option<K>` to model absent keys: `None`
/// forms one bucket like any other key.
pub struct DistinctBy<K, F> {
    key_fn: F,
    override_on_duplicate: bool,
    _m: PhantomData<fn() -> K>,
}

impl<K, F: Clone> Clone for DistinctBy<K, F> {
    fn clone(&self) -> Self {
        Self {
            key_fn: self.key_fn.clone(),
            override_on_duplicate: self.override_on_duplicate,
            _m: PhantomData,
        }
    }
}

impl<K, F> DistinctBy<K, F> {
    /// Whether later duplicates replace earlier ones.
    #[must_use]
    pub const fn overrides(&self) -> bool {
        self.override_on_duplicate
    }

    fn place<T>(&self, acc: &mut IndexMap<K, T>, key: K, value: T)
    where
        K: Hash + Eq,
    {
        match acc.entry(key) {
            Entry::Occupied(mut slot) => {
                if self.override_on_duplicate {
                    slot.insert(value);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }
}

/// Deduplicate by `key_fn`, with an explicit duplicate policy.
///
/// ```
/// use ironfold::{distinct_by, CollectExt};
///
/// let pairs = vec![(1, 'a'), (2, 'b'), (1, 'c')];
/// let firsts = pairs.clone().into_iter().collect_with(distinct_by(|p: &(i32, char)| p.0, false));
/// assert_eq!(firsts, vec![(1, 'a'), (2, 'b')]);
/// let lasts = pairs.into_iter().collect_with(distinct_by(|p: &(i32, char)| p.0, true));
/// assert_eq!(lasts, vec![(1, 'c'), (2, 'b')]);
/// ```
pub fn distinct_by<T, K, F>(key_fn: F, override_on_duplicate: bool) -> DistinctBy<K, F>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    DistinctBy {
        key_fn,
        override_on_duplicate,
        _m: PhantomData,
    }
}

/// First element per key wins.
pub fn distinct_by_first<T, K, F>(key_fn: F) -> DistinctBy<K, F>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    distinct_by(key_fn, false)
}

/// Last element per key wins.
pub fn distinct_by_last<T, K, F>(key_fn: F) -> DistinctBy<K, F>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    distinct_by(key_fn, true)
}

impl<T, K, F> Collector<T> for DistinctBy<K, F>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    type Acc = IndexMap<K, T>;
    type Output = Vec<T>;

    fn create(&self) -> IndexMap<K, T> {
        IndexMap::new()
    }

    fn add_input(&self, acc: &mut IndexMap<K, T>, v: T) {
        let key = (self.key_fn)(&v);
        self.place(acc, key, v);
    }

    fn merge(&self, acc: &mut IndexMap<K, T>, other: IndexMap<K, T>) {
        if acc.is_empty() {
            *acc = other;
            return;
        }
        for (key, value) in other {
            self.place(acc, key, value);
        }
    }

    fn finish(&self, acc: IndexMap<K, T>) -> Vec<T> {
        acc.into_values().collect()
    }
}
