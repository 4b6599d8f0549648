mod insert;
mod iter;
mod overlaps;

use std::ops::Range;

use arbor::IntervalTree;
use criterion::{criterion_group, criterion_main};

criterion_main!(benches);
criterion_group!(benches, insert::bench, overlaps::bench, iter::bench);

/// The interval tree variant under test: ranges stored as their own values.
pub type RangeTree = IntervalTree<Range<u16>, u16, fn(&Range<u16>) -> Range<u16>>;

/// Initialise an empty [`RangeTree`].
pub fn new_range_tree() -> RangeTree {
    fn ident(v: &Range<u16>) -> Range<u16> {
        v.clone()
    }
    IntervalTree::new(ident as fn(&Range<u16>) -> Range<u16>)
}

/// Linear-feedback shift register based PRNG.
///
/// Generates 65,535 unique values before cycling.
#[derive(Debug, Clone)]
pub struct Lfsr(u16);

impl Default for Lfsr {
    fn default() -> Self {
        Self(42)
    }
}

impl Lfsr {
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u16 {
        let lsb = self.0 & 1;
        self.0 >>= 1;
        if lsb == 1 {
            self.0 ^= 0xD008;
        }
        assert_ne!(self.0, 42, "LFSR rollover");
        self.0
    }

    /// Return a valid [`Range`] with random bounds.
    pub fn next_range(&mut self) -> Range<u16> {
        let a = self.next();
        let b = self.next();
        Range {
            start: a.min(b),
            end: a.max(b),
        }
    }
}
