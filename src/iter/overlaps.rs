use std::ops::Range;

use crate::{
    interval::{overlaps, overlaps_inclusive, Entry, MaxUpperBound},
    node::Node,
};

/// A tree node augmented with the maximum interval upper bound of its subtree.
type IntervalNode<R, V> = Node<Entry<R, V>, MaxUpperBound<R>>;

/// An [`Iterator`] that performs a depth-first, in-order walk of a subtree and
/// yields entries whose intervals overlap a query range.
///
/// Subtrees whose maximum upper bound cannot reach the query lower bound are
/// pruned from the walk entirely, as are nodes (and their right subtrees) that
/// begin past the query upper bound.
#[derive(Debug)]
pub(crate) struct OverlapsIter<'a, R, V> {
    query: &'a Range<R>,
    stack: Vec<&'a IntervalNode<R, V>>,

    /// When set, intervals that merely share an endpoint with the query are
    /// yielded too.
    inclusive: bool,
}

impl<'a, R, V> OverlapsIter<'a, R, V>
where
    R: Ord,
{
    pub(crate) fn new(
        root: Option<&'a IntervalNode<R, V>>,
        query: &'a Range<R>,
        inclusive: bool,
    ) -> Self {
        let mut this = Self {
            stack: vec![],
            query,
            inclusive,
        };

        // Descend down the left side of the tree, pushing all the internal
        // nodes onto the stack until the left-most unpruned leaf is reached.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: &'a IntervalNode<R, V>) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            let max = &v.aggregate().0;
            let pruned = match self.inclusive {
                false => *max <= self.query.start,
                true => *max < self.query.start,
            };
            if pruned {
                // Prune the subtree rooted at "v" from the search.
                //
                // No interval in this subtree reaches far enough right to
                // overlap the query range.
                break;
            }

            self.stack.push(v);
            ptr = v.left();
        }
    }
}

impl<'a, R, V> Iterator for OverlapsIter<'a, R, V>
where
    R: Ord,
{
    type Item = &'a Entry<R, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let v = self.stack.pop()?;

            let entry = v.value();
            let past_query = match self.inclusive {
                false => entry.range.start >= self.query.end,
                true => entry.range.start > self.query.end,
            };
            if past_query {
                // Prune this node and the right subtree from the search.
                //
                // All values in the right subtree begin at or after this node,
                // strictly past the query range.
                continue;
            }

            // Push the right subtree to be visited next.
            if let Some(right) = v.right() {
                self.push_subtree(right);
            }

            // Yield this node's entry if it overlaps with the query range.
            let hit = match self.inclusive {
                false => overlaps(&entry.range, self.query),
                true => overlaps_inclusive(&entry.range, self.query),
            };
            if hit {
                return Some(entry);
            }
        }
    }
}
