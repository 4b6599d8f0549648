use std::{cmp::Ordering, ops::Range};

use thiserror::Error;

use crate::{cmp::Comparator, node::Aggregate};

/// The error returned when a range's lower bound exceeds its upper bound.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid range: lower bound exceeds upper bound")]
pub struct InvalidRange;

/// Reject `range` when its lower bound exceeds its upper bound.
///
/// An empty range (`start == end`) is well-formed.
pub(crate) fn validate<R>(range: &Range<R>) -> Result<(), InvalidRange>
where
    R: Ord,
{
    if range.start > range.end {
        return Err(InvalidRange);
    }
    Ok(())
}

/// Returns true when `a` and `b` overlap.
///
/// Ranges that merely share an endpoint do not overlap.
pub(crate) fn overlaps<R>(a: &Range<R>, b: &Range<R>) -> bool
where
    R: Ord,
{
    a.start < b.end && b.start < a.end
}

/// As [`overlaps()`], but ranges that merely share an endpoint are considered
/// overlapping.
pub(crate) fn overlaps_inclusive<R>(a: &Range<R>, b: &Range<R>) -> bool
where
    R: Ord,
{
    a.start <= b.end && b.start <= a.end
}

/// A stored interval and the value it was derived from.
///
/// The bounds are computed from the value once, at insert time, and reused for
/// every subsequent comparison and query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<R, V> {
    pub(crate) range: Range<R>,
    pub(crate) value: V,
}

/// Orders an [`Entry`] by its interval lower bound, tie-broken by the upper
/// bound.
///
/// Entries with identical bounds are equal-ordered regardless of their values,
/// and coexist in the tree as duplicates.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ByLowerBound;

impl<R, V> Comparator<Entry<R, V>> for ByLowerBound
where
    R: Ord,
{
    fn compare(&self, a: &Entry<R, V>, b: &Entry<R, V>) -> Ordering {
        a.range
            .start
            .cmp(&b.range.start)
            .then_with(|| a.range.end.cmp(&b.range.end))
    }
}

/// The maximum interval upper bound within a subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MaxUpperBound<R>(pub(crate) R);

impl<R, V> Aggregate<Entry<R, V>> for MaxUpperBound<R>
where
    R: Ord + Clone,
{
    fn of(value: &Entry<R, V>) -> Self {
        Self(value.range.end.clone())
    }

    fn merge(&mut self, child: &Self) {
        if child.0 > self.0 {
            self.0 = child.0.clone();
        }
    }
}
