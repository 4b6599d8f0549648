use std::ops::Range;

use crate::{
    interval::{overlaps, validate, ByLowerBound, Entry, InvalidRange, MaxUpperBound},
    iter::{OverlapsIter, OwnedIter, RefIter},
    node::{remove_recurse, Node, RemoveResult},
};

/// A tree of intervals derived from arbitrary domain values, supporting
/// efficient overlap queries.
///
/// An [`IntervalTree`] is constructed with a *range mapper* (a pure function
/// deriving a `Range<R>` from a value) and stores each value keyed by its
/// derived lower bound (tie-broken by the upper bound) in an AVL tree. The
/// bounds are computed once at insert time, never re-derived on a query.
///
/// Every node additionally tracks the maximum interval upper bound within its
/// subtree, letting [`IntervalTree::overlaps()`] prune whole subtrees that
/// cannot reach the queried range and yield all k matches in O(k + log n).
///
/// Two intervals overlap when each begins strictly before the other ends;
/// intervals that merely share an endpoint do not overlap unless the
/// `_inclusive` query variants are used.
///
/// Every range-taking operation returns [`InvalidRange`] when handed a range
/// whose lower bound exceeds its upper bound.
///
/// ```
/// use arbor::IntervalTree;
///
/// // Values carry their own bounds here, but any mapping works.
/// let mut t = IntervalTree::new(|v: &(u32, u32)| v.0..v.1);
///
/// t.insert((1, 5)).unwrap();
/// t.insert((10, 15)).unwrap();
/// t.insert((12, 18)).unwrap();
///
/// let hits = t
///     .overlaps(&(11..13))
///     .unwrap()
///     .map(|(_range, v)| *v)
///     .collect::<Vec<_>>();
///
/// assert_eq!(hits, [(10, 15), (12, 18)]);
/// ```
#[derive(Debug, Clone)]
pub struct IntervalTree<T, R, M> {
    root: Option<Box<Node<Entry<R, T>, MaxUpperBound<R>>>>,
    len: usize,
    mapper: M,
}

impl<T, R, M> IntervalTree<T, R, M>
where
    R: Ord + Clone,
    M: Fn(&T) -> Range<R>,
{
    /// Initialise an empty [`IntervalTree`] deriving value bounds with
    /// `mapper`.
    ///
    /// The mapper must be pure: deterministic for a given value, with no side
    /// effects.
    pub fn new(mapper: M) -> Self {
        Self {
            root: None,
            len: 0,
            mapper,
        }
    }

    /// Insert `value` into the tree, keyed by the range the mapper derives
    /// for it.
    ///
    /// Values with identical ranges are retained alongside each other.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`] if the derived range has a lower bound greater
    /// than its upper bound; the tree is unchanged.
    pub fn insert(&mut self, value: T) -> Result<(), InvalidRange> {
        let range = (self.mapper)(&value);
        validate(&range)?;

        let entry = Entry { range, value };
        match self.root {
            Some(ref mut v) => v.insert(entry, &ByLowerBound),
            None => self.root = Some(Box::new(Node::new(entry))),
        }

        self.len += 1;
        Ok(())
    }

    /// Remove and return the stored value equal to `value`, or [`None`] if no
    /// such value exists.
    ///
    /// The node is located by re-deriving the value's range, then matched on
    /// value equality, so distinct values sharing identical bounds are
    /// distinguished.
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let range = (self.mapper)(value);
        let key = |e: &Entry<R, T>| {
            range
                .start
                .cmp(&e.range.start)
                .then_with(|| range.end.cmp(&e.range.end))
        };

        let e = match remove_recurse(&mut self.root, &key, &|e: &Entry<R, T>| {
            e.value == *value
        })? {
            RemoveResult::Removed(e) => e,
            RemoveResult::ParentUnlink => unreachable!(),
        };

        self.len -= 1;
        Some(e.value)
    }

    /// An iterator over all `(range, value)` tuples whose interval overlaps
    /// `query`, in ascending order of lower bound.
    ///
    /// Intervals that merely share an endpoint with `query` are not yielded;
    /// use [`IntervalTree::overlaps_inclusive()`] for that.
    ///
    /// The walk is lazy: dropping the iterator early stops the traversal, and
    /// abandoning it has no effect on the tree.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`] if `query.start > query.end`.
    pub fn overlaps<'a>(
        &'a self,
        query: &'a Range<R>,
    ) -> Result<impl Iterator<Item = (&'a Range<R>, &'a T)> + 'a, InvalidRange> {
        validate(query)?;
        Ok(OverlapsIter::new(self.root.as_deref(), query, false).map(|e| (&e.range, &e.value)))
    }

    /// As [`IntervalTree::overlaps()`], additionally yielding intervals that
    /// merely share an endpoint with `query`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`] if `query.start > query.end`.
    pub fn overlaps_inclusive<'a>(
        &'a self,
        query: &'a Range<R>,
    ) -> Result<impl Iterator<Item = (&'a Range<R>, &'a T)> + 'a, InvalidRange> {
        validate(query)?;
        Ok(OverlapsIter::new(self.root.as_deref(), query, true).map(|e| (&e.range, &e.value)))
    }

    /// Returns true if any stored interval overlaps `query`, stopping the
    /// traversal at the first match.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`] if `query.start > query.end`.
    pub fn has_overlap(&self, query: &Range<R>) -> Result<bool, InvalidRange> {
        validate(query)?;
        Ok(OverlapsIter::new(self.root.as_deref(), query, false)
            .next()
            .is_some())
    }

    /// As [`IntervalTree::has_overlap()`], with intervals that merely share an
    /// endpoint counting as overlapping.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`] if `query.start > query.end`.
    pub fn has_overlap_inclusive(&self, query: &Range<R>) -> Result<bool, InvalidRange> {
        validate(query)?;
        Ok(OverlapsIter::new(self.root.as_deref(), query, true)
            .next()
            .is_some())
    }

    /// Remove and return every value whose interval overlaps `query`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRange`] if `query.start > query.end`; the tree is
    /// unchanged.
    pub fn remove_overlapping(&mut self, query: &Range<R>) -> Result<Vec<T>, InvalidRange> {
        validate(query)?;
        Ok(self.retain_entries(|e| !overlaps(&e.range, query)))
    }

    /// Retain only the values for which `pred` returns true, returning the
    /// removed values in ascending order of lower bound.
    pub fn retain<F>(&mut self, mut pred: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.retain_entries(|e| pred(&e.value))
    }

    /// Drain the tree in-order, keep the entries matching `pred`, and rebuild
    /// a minimal-height tree from the kept subsequence in a single O(n) pass.
    fn retain_entries<F>(&mut self, mut pred: F) -> Vec<T>
    where
        F: FnMut(&Entry<R, T>) -> bool,
    {
        let mut kept = Vec::with_capacity(self.len);
        let mut removed = Vec::new();

        for e in OwnedIter::new(self.root.take()) {
            if pred(&e) {
                kept.push(e);
            } else {
                removed.push(e.value);
            }
        }

        self.len = kept.len();
        self.root = Node::from_sorted_vec(kept);

        removed
    }

    /// An in-order iterator over all `(range, value)` tuples, in ascending
    /// order of lower bound (tie-broken by upper bound).
    pub fn iter(&self) -> impl Iterator<Item = (&Range<R>, &T)> {
        RefIter::new(self.root.as_deref()).map(|n| {
            let e = n.value();
            (&e.range, &e.value)
        })
    }

    /// The number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove all values.
    ///
    /// This is O(1) apart from releasing the node allocations.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&Node<Entry<R, T>, MaxUpperBound<R>>> {
        self.root.as_deref()
    }
}

impl<T, R, M> IntoIterator for IntervalTree<T, R, M> {
    type Item = (Range<R>, T);
    type IntoIter = IntoIter<T, R>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(OwnedIter::new(self.root))
    }
}

/// An in-order iterator over owned [`IntervalTree`] ranges and values.
#[derive(Debug)]
pub struct IntoIter<T, R>(OwnedIter<Entry<R, T>, MaxUpperBound<R>>);

impl<T, R> Iterator for IntoIter<T, R> {
    type Item = (Range<R>, T);

    fn next(&mut self) -> Option<Self::Item> {
        let e = self.0.next()?;
        Some((e.range, e.value))
    }
}
