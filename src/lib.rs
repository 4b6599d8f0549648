//! Self-balancing ordered-tree data structures with interval-stabbing
//! support, plus a handle-addressed doubly linked list.
//!
//! * [`Tree`]: an ordered collection backed by an AVL tree, with pluggable
//!   ordering via [`Comparator`].
//! * [`IntervalTree`]: an interval-stabbing index over values that map to
//!   half-open ranges, supporting efficient overlap queries.
//! * [`LinkedList`]: a doubly linked list addressed by stable, generation
//!   checked [`NodeRef`] handles.
//!
//! ```
//! use arbor::{IntervalTree, Tree};
//!
//! let mut t = Tree::new();
//! t.insert(42);
//! t.insert(24);
//! assert_eq!(t.iter().copied().collect::<Vec<_>>(), [24, 42]);
//!
//! // Index values by the range they cover, and query for overlaps.
//! let mut idx = IntervalTree::new(|v: &(usize, usize)| v.0..v.1);
//! idx.insert((1, 5)).unwrap();
//! idx.insert((4, 10)).unwrap();
//! idx.insert((20, 30)).unwrap();
//!
//! let hits = idx
//!     .overlaps(&(3..6))
//!     .unwrap()
//!     .map(|(_range, v)| *v)
//!     .collect::<Vec<_>>();
//! assert_eq!(hits, [(1, 5), (4, 10)]);
//! ```

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::todo,
    missing_copy_implementations,
    missing_debug_implementations,
    unused_crate_dependencies,
    missing_docs
)]

mod cmp;
mod interval;
mod interval_tree;
mod iter;
mod list;
mod node;
#[cfg(test)]
mod test_utils;
mod tree;

pub use crate::{
    cmp::{Comparator, NaturalOrder},
    interval::InvalidRange,
    interval_tree::{IntervalTree, IntoIter as IntervalIntoIter},
    list::{Iter as ListIter, LinkedList, NodeRef},
    tree::{IntoIter, Iter, Tree},
};

// Workaround for "unused crate" lints on bench-only dependencies.
#[cfg(test)]
use criterion as _;
#[cfg(test)]
use paste as _;
