#![deny(unused_crate_dependencies)]


pub mod display;

pub use display::{display_mode, set_display_mode, DisplayMode, ParseDisplayModeError, Show};

use fnv::{FnvHashMap, FnvHashSet, FnvHasher};
use log::{debug, trace};
use quickcheck::Arbitrary;
use std::{
    borrow::Borrow,
    collections::{hash_map, hash_map::Entry, BTreeSet, HashSet},
    hash::{Hash, Hasher},
    iter::{self, FromIterator},
};

/// Builds a [`Multiset`] from a list of elements, counting repetitions.
///
/// ```
/// use tally_multiset::multiset;
///
/// let bag = multiset![1, 2, 2];
/// assert_eq!(bag.get(&2), 2);
/// ```
#[macro_export]
macro_rules! multiset {
    () => {
        $crate::Multiset::new()
    };
    ($($item:expr),+ $(,)?) => {
        [$($item),+].into_iter().collect::<$crate::Multiset<_>>()
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("multiplicity must be non-negative, got {multiplicity}")]
pub struct InvalidMultiplicity {
    pub multiplicity: isize,
}

/// An unordered collection in which every element carries a multiplicity.
///
/// The total length saturates at `usize::MAX` rather than overflowing.
/// Entries whose multiplicity drops to zero may stay in the underlying map
/// until [`Multiset::clean`] is called. They are invisible to every other
/// operation: an absent element and a zero entry are the same thing.
#[derive(Clone)]
pub struct Multiset<A> {
    counts: FnvHashMap<A, usize>,
    len: usize,
}

impl<A> Multiset<A> {
    pub fn new() -> Self {
        Multiset {
            counts: FnvHashMap::default(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Multiset {
            counts: FnvHashMap::with_capacity_and_hasher(capacity, Default::default()),
            len: 0,
        }
    }

    /// The total number of elements, counting repetitions.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of elements with a nonzero multiplicity.
    pub fn distinct_len(&self) -> usize {
        self.iter().count()
    }

    /// Iterates over `(element, multiplicity)` pairs in an unspecified order.
    pub fn iter(&self) -> Iter<'_, A> {
        Iter(self.counts.iter())
    }

    /// Iterates over every element, repeating each one once per occurrence.
    pub fn elements(&self) -> impl Iterator<Item = &A> + '_ {
        self.iter()
            .flat_map(|(item, count)| iter::repeat(item).take(count))
    }

    pub fn to_vec(&self) -> Vec<A>
    where
        A: Clone,
    {
        self.elements().cloned().collect()
    }

    pub fn to_sorted_vec(&self) -> Vec<A>
    where
        A: Ord + Clone,
    {
        let mut elements = self.to_vec();
        elements.sort();
        elements
    }
}

impl<A> Default for Multiset<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Eq + Hash> Multiset<A> {
    pub fn get<B: ?Sized>(&self, item: &B) -> usize
    where
        A: Borrow<B>,
        B: Eq + Hash,
    {
        self.counts.get(item).copied().unwrap_or(0)
    }

    pub fn contains<B: ?Sized>(&self, item: &B) -> bool
    where
        A: Borrow<B>,
        B: Eq + Hash,
    {
        self.get(item) > 0
    }

    pub fn insert(&mut self, item: A) -> &mut Self {
        self.insert_many(item, 1)
    }

    /// Adds `incr` to the multiplicity of `item`.
    ///
    /// A negative `incr` removes occurrences. The multiplicity never goes
    /// below zero: removing more occurrences than exist leaves exactly zero.
    pub fn insert_many(&mut self, item: A, incr: isize) -> &mut Self {
        match self.counts.entry(item) {
            Entry::Occupied(mut entry) => {
                let count = entry.get_mut();
                let updated = apply_increment(*count, incr);
                self.len = (self.len - *count).saturating_add(updated);
                *count = updated;
            }
            Entry::Vacant(entry) => {
                if incr > 0 {
                    entry.insert(incr.unsigned_abs());
                    self.len = self.len.saturating_add(incr.unsigned_abs());
                } else if incr < 0 {
                    trace!("decrement by {} of an absent element clamped at zero", incr);
                }
            }
        }
        self
    }

    /// Sets the multiplicity of `item` to exactly `multiplicity`.
    ///
    /// Fails without touching the multiset when `multiplicity` is negative.
    pub fn set(&mut self, item: A, multiplicity: isize) -> Result<&mut Self, InvalidMultiplicity> {
        let count = usize::try_from(multiplicity).map_err(|_| {
            debug!("rejected negative multiplicity {}", multiplicity);
            InvalidMultiplicity { multiplicity }
        })?;
        Ok(self.assign(item, count))
    }

    /// Removes every occurrence of `item`.
    pub fn remove<B: ?Sized>(&mut self, item: &B) -> &mut Self
    where
        A: Borrow<B>,
        B: Eq + Hash,
    {
        if let Some(count) = self.counts.remove(item) {
            self.len -= count;
        }
        self
    }

    /// Drops zero entries from the underlying map, returning how many were dropped.
    pub fn clean(&mut self) -> usize {
        let before = self.counts.len();
        self.counts.retain(|_, count| *count > 0);
        let purged = before - self.counts.len();
        if purged > 0 {
            trace!("purged {} stale entries", purged);
        }
        purged
    }

    /// Pointwise maximum of multiplicities.
    pub fn union(&self, other: &Self) -> Self
    where
        A: Clone,
    {
        let mut result = Multiset::with_capacity(self.counts.len().max(other.counts.len()));
        for (item, count) in self.iter() {
            result.assign(item.clone(), count.max(other.get(item)));
        }
        for (item, count) in other.iter() {
            if !self.contains(item) {
                result.assign(item.clone(), count);
            }
        }
        result
    }

    /// Pointwise minimum of multiplicities.
    pub fn intersection(&self, other: &Self) -> Self
    where
        A: Clone,
    {
        let mut result = Multiset::new();
        for (item, count) in self.iter() {
            let shared = count.min(other.get(item));
            if shared > 0 {
                result.assign(item.clone(), shared);
            }
        }
        result
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|(item, count)| count <= other.get(item))
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// The distinct elements, forgetting multiplicities.
    pub fn to_set(&self) -> FnvHashSet<A>
    where
        A: Clone,
    {
        self.iter().map(|(item, _)| item.clone()).collect()
    }

    fn assign(&mut self, item: A, count: usize) -> &mut Self {
        let previous = self.counts.insert(item, count).unwrap_or(0);
        self.len = (self.len - previous).saturating_add(count);
        self
    }
}

fn apply_increment(count: usize, incr: isize) -> usize {
    if incr >= 0 {
        count.saturating_add(incr.unsigned_abs())
    } else {
        let decrement = incr.unsigned_abs();
        if decrement > count {
            trace!("decrement by {} of multiplicity {} clamped at zero", incr, count);
        }
        count.saturating_sub(decrement)
    }
}

pub struct Iter<'a, A>(hash_map::Iter<'a, A, usize>);

impl<'a, A> Iterator for Iter<'a, A> {
    type Item = (&'a A, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .by_ref()
            .find(|&(_, &count)| count > 0)
            .map(|(item, &count)| (item, count))
    }
}

impl<'a, A> IntoIterator for &'a Multiset<A> {
    type Item = (&'a A, usize);
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A: Eq + Hash> PartialEq for Multiset<A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.is_subset(other)
    }
}

impl<A: Eq + Hash> Eq for Multiset<A> {}

impl<A: Hash> Hash for Multiset<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Entry hashes are summed so that iteration order doesn't matter.
        let (distinct, combined) = self
            .iter()
            .fold((0usize, 0u64), |(distinct, acc), (item, count)| {
                let mut hasher = FnvHasher::default();
                item.hash(&mut hasher);
                count.hash(&mut hasher);
                (distinct + 1, acc.wrapping_add(hasher.finish()))
            });
        state.write_usize(distinct);
        state.write_u64(combined);
    }
}

impl<A: Eq + Hash> FromIterator<A> for Multiset<A> {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        let mut multiset = Self::new();
        multiset.extend(iter);
        multiset
    }
}

impl<A: Eq + Hash> Extend<A> for Multiset<A> {
    fn extend<T: IntoIterator<Item = A>>(&mut self, iter: T) {
        iter.into_iter().for_each(|item| {
            self.insert(item);
        })
    }
}

impl<'a, A: Eq + Hash + Copy + 'a> Extend<&'a A> for Multiset<A> {
    fn extend<T: IntoIterator<Item = &'a A>>(&mut self, iter: T) {
        self.extend(iter.into_iter().copied())
    }
}

impl<A: Eq + Hash> From<Vec<A>> for Multiset<A> {
    fn from(items: Vec<A>) -> Self {
        items.into_iter().collect()
    }
}

impl<A: Eq + Hash, const N: usize> From<[A; N]> for Multiset<A> {
    fn from(items: [A; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<A: Eq + Hash, S> From<HashSet<A, S>> for Multiset<A> {
    fn from(items: HashSet<A, S>) -> Self {
        items.into_iter().collect()
    }
}

impl<A: Eq + Hash> From<BTreeSet<A>> for Multiset<A> {
    fn from(items: BTreeSet<A>) -> Self {
        items.into_iter().collect()
    }
}

impl<A: Arbitrary + Eq + Hash> Arbitrary for Multiset<A> {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut multiset: Self = Vec::<A>::arbitrary(g).into_iter().collect();
        // Leave some zero entries behind, as `insert_many` and `set` can.
        if bool::arbitrary(g) {
            multiset.assign(A::arbitrary(g), 0);
        }
        multiset
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(
            self.to_vec()
                .shrink()
                .map(|items| items.into_iter().collect()),
        )
    }
}
