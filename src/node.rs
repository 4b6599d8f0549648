use std::cmp::Ordering;

use crate::cmp::Comparator;

/// A per-node value derived from a node's own value and the aggregates of its
/// children, kept current across every structural change to the tree.
///
/// The plain ordered tree carries no aggregate (the `()` impl below); the
/// interval tree tracks the maximum interval upper bound within each subtree.
pub(crate) trait Aggregate<T>: Clone {
    /// The aggregate of a single node in isolation.
    fn of(value: &T) -> Self;

    /// Fold a child subtree's aggregate into this one.
    fn merge(&mut self, child: &Self);
}

impl<T> Aggregate<T> for () {
    fn of(_value: &T) -> Self {}
    fn merge(&mut self, _child: &Self) {}
}

#[derive(Debug)]
pub(crate) enum RemoveResult<T> {
    /// The value was removed from the tree.
    Removed(T),

    /// The direct descendent node contains the value, but contains no children
    /// and must be unlinked by the parent.
    ParentUnlink,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<T, A> {
    /// Child node pointers.
    left: Option<Box<Node<T, A>>>,
    right: Option<Box<Node<T, A>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 0.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    height: u8,

    /// The aggregate over the subtree rooted at this [`Node`].
    aggregate: A,

    value: T,
}

impl<T, A> Node<T, A>
where
    A: Aggregate<T>,
{
    pub(crate) fn new(value: T) -> Self {
        Self {
            aggregate: A::of(&value),
            value,
            left: None,
            right: None,
            height: 0,
        }
    }

    /// Insert `value` into the subtree rooted at `self`, ordered by `cmp`.
    ///
    /// Values that compare as equal to an existing node descend into its right
    /// subtree, so duplicates are retained rather than replaced.
    pub(crate) fn insert<C>(self: &mut Box<Self>, value: T, cmp: &C)
    where
        C: Comparator<T>,
    {
        let child = match cmp.compare(&value, &self.value) {
            Ordering::Less => &mut self.left,
            // Equal-ordered values chain into the right subtree.
            Ordering::Equal | Ordering::Greater => &mut self.right,
        };

        match child {
            Some(v) => v.insert(value, cmp),
            None => {
                // Insert the value as a new immediate descendent of self.
                *child = Some(Box::new(Self::new(value)));

                // Inserting this new child node cannot skew the tree in the
                // direction of the new addition such that it requires the tree
                // be rebalanced as, at most, it creates an absolute difference
                // of 1 in this direction (from balanced, or slightly skewed in
                // the opposite direction).
                //
                // Update this node and skip the rebalancing checks.
                update_height(self);
                update_aggregate(self);
                return;
            }
        }

        // Update this node's height.
        update_height(self);

        // Determine the balance factor of the subtree rooted at self and
        // correct it if the absolute difference in height between branches is
        // > 1.
        match (balance(self), self.left(), self.right()) {
            // Left-heavy
            (2, Some(l), _) if balance(l) >= 0 => {
                rotate_right(self);
            }
            (2, Some(_l), _) => {
                rotate_left(self.left_mut().unwrap());
                rotate_right(self);
            }
            // Right-heavy
            (-2, _, Some(r)) if balance(r) < 0 => {
                rotate_left(self);
            }
            (-2, _, Some(_r)) => {
                rotate_right(self.right_mut().unwrap());
                rotate_left(self);
            }
            (-1..=1, _, _) => { /* The tree is well balanced */ }
            _ => unreachable!(),
        };

        update_aggregate(self);

        // Invariant: the absolute difference between tree heights ("balance
        // factor") cannot exceed 1.
        debug_assert!(balance(self).abs() <= 1);
    }

    /// Remove the first value for which `key` reports [`Ordering::Equal`] and
    /// `matches` returns true.
    ///
    /// `key` must be consistent with the comparator the subtree was built
    /// with, partially applied to the probe value. Because equal-ordered
    /// values may sit on either side of an equal-ordered node after rotations,
    /// an equal-ordered non-match searches the right subtree first and falls
    /// back to the left.
    pub(crate) fn remove<K, P>(
        self: &mut Box<Self>,
        key: &K,
        matches: &P,
    ) -> Option<RemoveResult<T>>
    where
        K: Fn(&T) -> Ordering,
        P: Fn(&T) -> bool,
    {
        // Recurse down the subtree rooted at `self`.
        //
        // If the value is not found, or successfully removed, the result is
        // returned. If the direct descendent node contains the value and no
        // children, it returns [`RemoveResult::ParentUnlink`] and the node is
        // unlinked here in the parent before returning the result to the
        // caller.
        match key(&self.value) {
            Ordering::Less => return remove_recurse(&mut self.left, key, matches),
            Ordering::Greater => return remove_recurse(&mut self.right, key, matches),
            Ordering::Equal if !matches(&self.value) => {
                return remove_recurse(&mut self.right, key, matches)
                    .or_else(|| remove_recurse(&mut self.left, key, matches));
            }
            Ordering::Equal => {
                // This node holds the value to be removed from the tree.
            }
        };

        // This node may have 0, 1 or 2 child node(s):
        //
        //                          +----------+
        //                          |  parent  |
        //                          +----------+
        //                                |
        //                                v
        //                          +----------+
        //                     +----|   self   |----+
        //                     |    +----------+    |
        //                     |                    |
        //                     v                    v
        //               +-----------+       +------------+
        //               | self.left |       | self.right |
        //               +-----------+       +------------+
        //
        // The minimum successor child (if any) should move to replace this
        // node.
        //
        // If the "self.right" has a left child, descend the left-most edge to
        // locate the successor to "self" returned in an in-order traversal and
        // use it in place of "self". The right child of "self" after removing
        // this successor (if any) is then linked to this replacement.
        //
        // If there is no left node of "self.right", the "self.right" itself
        // replaces the target node (the minimum subtree successor value).
        //
        // If there is no right child, then "self.left" replaces "self".
        let old = if let Some(mut right) = self.right.take() {
            debug_assert_ne!(self.height, 0);

            // Extract the minimum node in the right subtree, if any.
            match extract_subtree_min(&mut right) {
                Some(mut min) => {
                    // This minimum node "min" should be mutated to link
                    // self.right on the right, and self.left (if any) linked on
                    // the left in order to preserve the binary search property.
                    //
                    // The "min" node is guaranteed to have no child pointers as
                    // it is the left-most / minimum node in the subtree and its
                    // right child (if any) was relinked in its place during
                    // extraction.
                    debug_assert!(min.left.is_none());
                    debug_assert!(min.right.is_none());

                    min.left = self.left.take();
                    min.right = Some(right);

                    std::mem::replace(self, min)
                }

                None => {
                    // Otherwise the extracted "right" is the successor, and can
                    // replace "self".
                    //
                    // It is guaranteed that "right" has no left pointer,
                    // otherwise the above branch would be taken.
                    debug_assert!(right.left.is_none());

                    right.left = self.left.take();
                    std::mem::replace(self, right)
                }
            }
        } else if let Some(left) = self.left.take() {
            // Otherwise, if "self" has a left child only, simply replace "self"
            // with the left child (the minimum subtree value).
            debug_assert!(self.right.is_none());
            debug_assert_ne!(self.height, 0);

            std::mem::replace(self, left)
        } else {
            // Otherwise "self" has no children.
            debug_assert!(self.left.is_none());
            debug_assert!(self.right.is_none());
            debug_assert_eq!(self.height, 0);

            // Parent will unlink this "self" node.
            return Some(RemoveResult::ParentUnlink);
        };

        // Invariant: the node being unlinked contains no subtree.
        debug_assert!(old.right.is_none());
        debug_assert!(old.left.is_none());

        // Invariant: the old node being unlinked does contain a matching
        // value.
        debug_assert_eq!(key(&old.value), Ordering::Equal);
        debug_assert!(matches(&old.value));

        Some(RemoveResult::Removed(old.value))
    }

    /// Construct a height-balanced subtree from `values`, which must already
    /// be in ascending order.
    ///
    /// Each call takes the median of the remaining sub-range as the subtree
    /// root, yielding a minimal-height tree that satisfies the AVL balance
    /// invariant without any rotation, in O(n) time.
    pub(crate) fn from_sorted_vec(values: Vec<T>) -> Option<Box<Self>> {
        fn build<T, A>(values: &mut std::vec::IntoIter<T>, len: usize) -> Option<Box<Node<T, A>>>
        where
            A: Aggregate<T>,
        {
            if len == 0 {
                return None;
            }

            // The median element is reached in the iterator once the left half
            // has been consumed.
            let left = build(values, len / 2);
            let mut n = Box::new(Node::new(values.next().unwrap()));
            n.left = left;
            n.right = build(values, len - len / 2 - 1);

            update_height(&mut n);
            update_aggregate(&mut n);

            debug_assert!(balance(&n).abs() <= 1);
            Some(n)
        }

        let len = values.len();
        build(&mut values.into_iter(), len)
    }
}

impl<T, A> Node<T, A> {
    /// Return the first value for which `key` reports [`Ordering::Equal`].
    ///
    /// `key` must be consistent with the comparator the subtree was built
    /// with, partially applied to the probe value.
    pub(crate) fn find<K>(&self, key: &K) -> Option<&T>
    where
        K: Fn(&T) -> Ordering,
    {
        match key(&self.value) {
            Ordering::Less => self.left()?.find(key),
            Ordering::Equal => Some(&self.value),
            Ordering::Greater => self.right()?.find(key),
        }
    }

    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    pub(crate) fn aggregate(&self) -> &A {
        &self.aggregate
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn left_mut(&mut self) -> Option<&mut Box<Self>> {
        self.left.as_mut()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    pub(crate) fn right_mut(&mut self) -> Option<&mut Box<Self>> {
        self.right.as_mut()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Explode this [`Node`] into the value it contains.
    pub(crate) fn into_value(self) -> T {
        self.value
    }
}

fn height<T, A>(n: Option<&Node<T, A>>) -> u8 {
    n.map(|v| v.height()).unwrap_or_default()
}

fn update_height<T, A>(n: &mut Node<T, A>) {
    n.height = n
        .left()
        .map(|v| v.height() + 1)
        .max(n.right().map(|v| v.height() + 1))
        .unwrap_or_default()
}

fn update_aggregate<T, A>(n: &mut Node<T, A>)
where
    A: Aggregate<T>,
{
    let mut aggregate = A::of(&n.value);

    if let Some(v) = n.left() {
        aggregate.merge(v.aggregate());
    }
    if let Some(v) = n.right() {
        aggregate.merge(v.aggregate());
    }

    n.aggregate = aggregate;
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// left heavy, and a negative number when right heavy.
fn balance<T, A>(n: &Node<T, A>) -> i8 {
    // Correctness: the height is a u8, the maximal value of which fits in an
    // i16 without truncation or sign inversion.
    (height(n.left()) as i16 - height(n.right()) as i16) as i8
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated).
fn rotate_left<T, A>(x: &mut Box<Node<T, A>>)
where
    A: Aggregate<T>,
{
    let mut p = x.right.take().unwrap();
    std::mem::swap(x, &mut p);

    p.right = x.left.take();
    update_height(&mut p);
    update_aggregate(&mut p);

    x.left = Some(p);
    update_height(x);
    update_aggregate(x);
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated).
fn rotate_right<T, A>(y: &mut Box<Node<T, A>>)
where
    A: Aggregate<T>,
{
    let mut p = y.left.take().unwrap();
    std::mem::swap(y, &mut p);

    p.left = y.right.take();
    update_height(&mut p);
    update_aggregate(&mut p);

    y.right = Some(p);
    update_height(y);
    update_aggregate(y);
}

/// Extracts the node holding the minimum subtree value in a descendent of
/// `root`, if any, linking the right subtree of the extracted node in its
/// place.
fn extract_subtree_min<T, A>(root: &mut Box<Node<T, A>>) -> Option<Box<Node<T, A>>>
where
    A: Aggregate<T>,
{
    // Descend left to the leaf.
    let v = match extract_subtree_min(root.left_mut()?) {
        Some(v) => Some(v),
        None => {
            // The left child is the end of the left edge.
            //
            // ```text
            //                 6
            //                / \
            //    here ->   <4>   7
            //              / \
            //             2   5
            //              \
            //               3
            // ```
            //
            // Unlink the right node of the left root, which will become the new
            // left node of "root" (if any).
            let left_right = root.left_mut().and_then(|v| v.right.take());

            std::mem::replace(&mut root.left, left_right)
        }
    };

    rebalance_after_remove(root);
    debug_assert!(balance(root).abs() <= 1);
    v
}

/// Recurse into `node`, calling [`Node::remove()`] to remove the first value
/// matching `key` and `matches` from the subtree rooted at `node`, if it
/// exists.
///
/// Returns [`None`] if the value is not found.
///
/// Clears the `node` pointer if the [`Node::remove()`] call returns
/// [`RemoveResult::ParentUnlink`], returning the extracted value within a
/// [`RemoveResult::Removed`] variant.
pub(crate) fn remove_recurse<T, A, K, P>(
    node: &mut Option<Box<Node<T, A>>>,
    key: &K,
    matches: &P,
) -> Option<RemoveResult<T>>
where
    A: Aggregate<T>,
    K: Fn(&T) -> Ordering,
    P: Fn(&T) -> bool,
{
    // Remove the value (if any) and rebalance the tree.
    let remove_ret = node.as_mut().and_then(|v| {
        let ret = v.remove(key, matches)?;
        rebalance_after_remove(v);
        Some(ret)
    })?;

    let v = match remove_ret {
        RemoveResult::Removed(v) => v,
        RemoveResult::ParentUnlink => {
            let node = node.take().unwrap();
            debug_assert_eq!(key(&node.value), Ordering::Equal);

            node.value
        }
    };

    Some(RemoveResult::Removed(v))
}

fn rebalance_after_remove<T, A>(v: &mut Box<Node<T, A>>)
where
    A: Aggregate<T>,
{
    // Recompute the height of the relocated node.
    update_height(v);

    // And rebalance the subtree.
    match balance(v) {
        (2..) if v.left().map(balance).unwrap_or_default() >= 0 => {
            rotate_right(v);
        }
        (2..) => {
            v.left_mut().map(rotate_left);
            rotate_right(v);
        }
        (..=-2) if v.right().map(balance).unwrap_or_default() <= 0 => {
            rotate_left(v);
        }
        (..=-2) => {
            v.right_mut().map(rotate_right);
            rotate_left(v);
        }

        #[allow(clippy::manual_range_patterns)]
        -1 | 0 | 1 => { /* balanced */ }
    }

    update_aggregate(v);

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1 after removing a value.
    debug_assert!(balance(v).abs() <= 1);
}
