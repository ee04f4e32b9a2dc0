//! `rb_ordered_map` is an ordered map and set based on a red-black tree.
//!
//! Keys are unique and kept sorted by a comparator, which defaults to the
//! natural order of the key type and can be swapped for any
//! [`compare::Compare`] implementation. Every insert and remove runs in
//! O(logN), and the minimum and maximum entries are reachable in O(1).
//!
//! Nodes are stored in a vector and refer to each other by index instead of
//! by pointer. A single shared sentinel node stands in for every absent child
//! and for the past-the-end position, so navigation never has to special-case
//! a missing link, and the whole container stays `Send` whenever its keys and
//! values are.
//!
//! [`RbMap`] and [`RbSet`] are thin facades over the same [`RbTree`] engine.
//!
//! # Example
//!
//! ```rust
//! use rb_ordered_map::RbMap;
//!
//! let mut map = RbMap::new();
//! for (k, v) in [(10, "ten"), (20, "twenty"), (5, "five")] {
//!     map.insert(k, v);
//! }
//! assert_eq!(map.get(&10), Some(&"ten"));
//! assert_eq!(map.lower_bound(&12).key(), Some(&20));
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![5, 10, 20]);
//! ```
//!

mod cursor;
mod entry;
mod error;
mod index;
mod map;
mod node;
mod set;
mod tree;

#[cfg(test)]
mod tests;

pub use cursor::{Cursor, IntoIter, Iter, Range};
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use error::Error;
pub use index::{DefaultIx, IndexType, NodeIndex};
pub use map::{Keys, RbMap, Values};
pub use set::RbSet;
pub use tree::RbTree;

/// Iterators over the items of a [`RbSet`].
pub mod set_iter {
    pub use crate::set::{IntoIter, Iter, Range};
}
