//! Indexed binary min-heap with a hash-table side-index.
//!
//! [`Heap`] keeps (priority, element) pairs in min-heap order while a
//! side-index maps each element's byte pattern to its current slot. On top
//! of the usual push/pop it offers O(1) expected membership and priority
//! lookup, and O(log n) priority updates addressed by element value, in
//! either direction rather than decrease-key only.
//!
//! The side-index is a pluggable family behind the [`SideIndex`] trait;
//! [`ChainTable`] from `cairn-table` is the default.

mod heap;
mod side_index;

#[cfg(test)]
mod heap_proptest;

pub use cairn_table::{ChainTable, Identity};
pub use heap::{Heap, COUNT_MAX};
pub use side_index::SideIndex;
