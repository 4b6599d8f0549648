use std::cmp::Ordering;

use crate::{
    cmp::{Comparator, NaturalOrder},
    iter::{OwnedIter, RefIter},
    node::{remove_recurse, Node, RemoveResult},
};

/// An ordered collection of values over a caller-supplied total order, backed
/// by an AVL tree.
///
/// Values that compare as equal are retained rather than replaced, so a
/// [`Tree`] behaves as an ordered multiset. The comparator is captured at
/// construction time: [`NaturalOrder`] (the type's own [`Ord`]) by default, or
/// any [`Comparator`] via [`Tree::with_comparator()`].
///
/// Every mutation rebalances the access path, bounding the tree height (and
/// therefore the cost of `insert`, `remove` and `get`) to O(log n).
///
/// ```
/// use arbor::Tree;
///
/// let mut t = Tree::new();
///
/// for v in [30, 10, 20, 40, 50] {
///     t.insert(v);
/// }
///
/// assert_eq!(t.iter().copied().collect::<Vec<_>>(), [10, 20, 30, 40, 50]);
/// assert_eq!(t.min(), Some(&10));
/// assert_eq!(t.remove(&30), Some(30));
/// assert_eq!(t.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Tree<T, C = NaturalOrder> {
    root: Option<Box<Node<T, ()>>>,
    len: usize,
    comparator: C,
}

impl<T, C> Default for Tree<T, C>
where
    C: Default,
{
    fn default() -> Self {
        Self {
            root: None,
            len: 0,
            comparator: C::default(),
        }
    }
}

impl<T> Tree<T> {
    /// Initialise an empty [`Tree`] ordered by `T`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, C> Tree<T, C>
where
    C: Comparator<T>,
{
    /// Initialise an empty [`Tree`] ordered by `comparator`.
    ///
    /// ```
    /// use arbor::Tree;
    ///
    /// // A tree of reverse-ordered values.
    /// let mut t = Tree::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    ///
    /// t.insert(1);
    /// t.insert(2);
    ///
    /// assert_eq!(t.min(), Some(&2));
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            len: 0,
            comparator,
        }
    }

    /// Construct a minimal-height [`Tree`] from `values`, which must already
    /// be sorted as `comparator` orders them.
    ///
    /// This is an O(n) build that places the median of each sub-range as its
    /// subtree root, needing no rotations. Sortedness of the input is the
    /// caller's responsibility and is not verified.
    pub fn from_sorted_vec(values: Vec<T>, comparator: C) -> Self {
        debug_assert!(values
            .windows(2)
            .all(|w| comparator.compare(&w[0], &w[1]) != Ordering::Greater));

        let len = values.len();
        Self {
            root: Node::from_sorted_vec(values),
            len,
            comparator,
        }
    }

    /// Insert `value` into the tree.
    ///
    /// A value that compares as equal to an existing value is retained
    /// alongside it. Insertion always succeeds.
    pub fn insert(&mut self, value: T) {
        let comparator = &self.comparator;
        match self.root {
            Some(ref mut v) => v.insert(value, comparator),
            None => self.root = Some(Box::new(Node::new(value))),
        }
        self.len += 1;
    }

    /// Remove and return the first value that compares as equal to `value`,
    /// or [`None`] if no such value exists.
    ///
    /// Removing an absent value is a no-op, not an error.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let comparator = &self.comparator;
        let v = match remove_recurse(
            &mut self.root,
            &|v| comparator.compare(value, v),
            &|_| true,
        )? {
            RemoveResult::Removed(v) => v,
            RemoveResult::ParentUnlink => unreachable!(),
        };

        self.len -= 1;
        Some(v)
    }

    /// Return a reference to the first value that compares as equal to
    /// `value`, if any.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.root
            .as_deref()?
            .find(&|v| self.comparator.compare(value, v))
    }

    /// Returns true if a value comparing as equal to `value` exists in the
    /// tree.
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_some()
    }

    /// Return the minimum value in the tree, or [`None`] if it is empty.
    pub fn min(&self) -> Option<&T> {
        let mut n = self.root.as_deref()?;
        while let Some(left) = n.left() {
            n = left;
        }
        Some(n.value())
    }

    /// Return the maximum value in the tree, or [`None`] if it is empty.
    pub fn max(&self) -> Option<&T> {
        let mut n = self.root.as_deref()?;
        while let Some(right) = n.right() {
            n = right;
        }
        Some(n.value())
    }

    /// Retain only the values for which `pred` returns true, returning the
    /// removed values in ascending order.
    ///
    /// The kept values are reassembled into a minimal-height tree in a single
    /// O(n) pass rather than deleted one at a time.
    pub fn retain<F>(&mut self, mut pred: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut kept = Vec::with_capacity(self.len);
        let mut removed = Vec::new();

        // The in-order drain yields the values already sorted, and
        // partitioning preserves that order for both halves.
        for v in OwnedIter::new(self.root.take()) {
            if pred(&v) {
                kept.push(v);
            } else {
                removed.push(v);
            }
        }

        self.len = kept.len();
        self.root = Node::from_sorted_vec(kept);

        removed
    }

    /// Discard the current tree shape and reconstruct a minimal-height tree
    /// from the same values.
    ///
    /// The AVL balancing makes this unnecessary for height purposes, but it
    /// compacts a tree whose shape has drifted from the optimum across a long
    /// run of mutations.
    pub fn rebuild(&mut self) {
        let values = OwnedIter::new(self.root.take()).collect::<Vec<_>>();
        self.root = Node::from_sorted_vec(values);
    }

    /// Remove all values.
    ///
    /// This is O(1) apart from releasing the node allocations.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// The number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// An in-order iterator over the values, yielding them in ascending order
    /// under the tree's comparator.
    ///
    /// The iterator is a read-only snapshot walk and may be restarted at any
    /// time by calling `iter()` again.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter(RefIter::new(self.root.as_deref()))
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&Node<T, ()>> {
        self.root.as_deref()
    }
}

impl<T, C> Extend<T> for Tree<T, C>
where
    C: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T, C> FromIterator<T> for Tree<T, C>
where
    C: Comparator<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut t = Self::with_comparator(C::default());
        t.extend(iter);
        t
    }
}

impl<'a, T, C> IntoIterator for &'a Tree<T, C>
where
    C: Comparator<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for Tree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(OwnedIter::new(self.root))
    }
}

/// An in-order iterator over borrowed [`Tree`] values.
#[derive(Debug)]
pub struct Iter<'a, T>(RefIter<'a, T, ()>);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|n| n.value())
    }
}

/// An in-order iterator over owned [`Tree`] values.
#[derive(Debug)]
pub struct IntoIter<T>(OwnedIter<T, ()>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}
