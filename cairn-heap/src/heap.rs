//! Indexed binary min-heap.
//!
//! A contiguous array of (priority, element) pairs in min-heap order, paired
//! with a side-index mapping each element's byte pattern to its current
//! slot. The side-index buys what a plain binary heap cannot offer: O(1)
//! expected membership and priority lookup, and O(log n) priority updates
//! addressed by the element's own value instead of an external handle.
//!
//! Every swap that moves elements in the array issues the compensating
//! side-index upserts, so the index agrees with the array at every statement
//! boundary. The heap never scans its array to locate an element.
//!
//! # Element identity
//!
//! An element's identity is its [`Identity::key_bytes`] span. Pushing two
//! elements with equal byte patterns is a contract violation: the side-index
//! would collapse both onto one slot. Membership can be checked first with
//! [`contains`](Heap::contains).
//!
//! Elements with equal priorities pop in no particular order.
//!
//! # Example
//!
//! ```
//! use cairn_heap::Heap;
//!
//! let mut heap: Heap<u32, u64> = Heap::new();
//!
//! heap.push(3, 100);
//! heap.push(1, 200);
//! heap.push(2, 300);
//!
//! assert_eq!(heap.get(&200), Some(&1));
//!
//! // Priorities may move in either direction.
//! heap.update(5, &200);
//!
//! assert_eq!(heap.pop(), Some((2, 300)));
//! assert_eq!(heap.pop(), Some((3, 100)));
//! assert_eq!(heap.pop(), Some((5, 200)));
//! assert_eq!(heap.pop(), None);
//! ```

use core::borrow::Borrow;

use cairn_table::{ChainTable, Identity};

use crate::side_index::SideIndex;

/// Maximum representable slot count, and the default cap.
pub const COUNT_MAX: usize = usize::MAX;

const DEFAULT_INIT_COUNT: usize = 8;

/// A min-heap with a side-index over element byte patterns.
///
/// # Type Parameters
///
/// - `P`: Priority type, ordered by its `Ord` instance.
/// - `E`: Element type; its byte pattern is its identity.
/// - `S`: Side-index family (defaults to [`ChainTable`]).
///
/// The heap owns its elements; an element's `Drop` runs when it is popped
/// and dropped by the caller, or when the heap itself is dropped.
#[derive(Debug)]
pub struct Heap<P, E, S = ChainTable<Box<[u8]>, usize>>
where
    P: Ord,
    E: Identity,
    S: SideIndex,
{
    pairs: Vec<(P, E)>,
    count: usize,
    count_max: usize,
    index: S,
}

impl<P, E, S> Heap<P, E, S>
where
    P: Ord,
    E: Identity,
    S: SideIndex,
{
    /// Creates an empty heap with a small initial capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INIT_COUNT)
    }

    /// Creates an empty heap with capacity for `init_count` pairs.
    ///
    /// # Panics
    ///
    /// Panics if `init_count` is zero.
    pub fn with_capacity(init_count: usize) -> Self {
        Self::with_count_max(init_count, COUNT_MAX)
    }

    /// Creates an empty heap whose capacity never exceeds `count_max`.
    ///
    /// # Panics
    ///
    /// Panics if `init_count` is zero or exceeds `count_max`.
    pub fn with_count_max(init_count: usize, count_max: usize) -> Self {
        Self::with_index(init_count, count_max, S::default())
    }

    /// Creates an empty heap over a caller-configured side-index instance
    /// (e.g. a [`ChainTable`] with a tuned load factor).
    ///
    /// # Panics
    ///
    /// Panics if `init_count` is zero, `init_count` exceeds `count_max`, or
    /// `index` is not empty.
    pub fn with_index(init_count: usize, count_max: usize, index: S) -> Self {
        assert!(init_count > 0, "initial count must be positive");
        assert!(
            init_count <= count_max,
            "initial count exceeds the count maximum"
        );
        assert!(index.is_empty(), "side-index must start empty");
        Self {
            pairs: Vec::with_capacity(init_count),
            count: init_count,
            count_max,
            index,
        }
    }

    /// Returns the number of pairs in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the current capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.count
    }

    /// Returns the capacity cap.
    #[inline]
    pub fn count_max(&self) -> usize {
        self.count_max
    }

    // ========================================================================
    // Core operations
    // ========================================================================

    /// Pushes an element with a priority.
    ///
    /// The element must not already be in the heap (checkable with
    /// [`contains`](Heap::contains)); pushing a present byte pattern is a
    /// contract violation that corrupts the side-index.
    ///
    /// # Panics
    ///
    /// Panics if the heap is full and already at its count maximum.
    pub fn push(&mut self, pty: P, elt: E) {
        debug_assert!(
            self.index.get(elt.key_bytes()).is_none(),
            "pushed element is already in the heap"
        );
        if self.pairs.len() == self.count {
            self.grow();
        }
        let slot = self.pairs.len();
        self.index.insert(elt.key_bytes(), slot);
        self.pairs.push((pty, elt));
        self.sift_up(slot);
    }

    /// Returns a reference to the priority of an element, or `None` if no
    /// element with the probe's byte pattern is in the heap.
    ///
    /// The borrow ends before the next mutating operation; a later lookup
    /// re-reads the then-current priority.
    pub fn get<Q>(&self, elt: &Q) -> Option<&P>
    where
        E: Borrow<Q>,
        Q: Identity + ?Sized,
    {
        let slot = self.index.get(elt.key_bytes())?;
        Some(&self.pairs[slot].0)
    }

    /// Returns `true` if an element with the probe's byte pattern is in the
    /// heap.
    pub fn contains<Q>(&self, elt: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Identity + ?Sized,
    {
        self.index.get(elt.key_bytes()).is_some()
    }

    /// Returns the minimum pair without removing it.
    #[inline]
    pub fn peek(&self) -> Option<(&P, &E)> {
        self.pairs.first().map(|(p, e)| (p, e))
    }

    /// Replaces the priority of an element already in the heap and restores
    /// heap order. The new priority may be smaller or larger than the
    /// current one.
    ///
    /// Sift-up and sift-down both run from the element's slot; at most one
    /// of the two moves anything, and an equal priority moves nothing.
    ///
    /// # Panics
    ///
    /// Panics if no element with the probe's byte pattern is in the heap.
    pub fn update<Q>(&mut self, pty: P, elt: &Q)
    where
        E: Borrow<Q>,
        Q: Identity + ?Sized,
    {
        let Some(slot) = self.index.get(elt.key_bytes()) else {
            panic!("update of an element not in the heap");
        };
        self.pairs[slot].0 = pty;
        self.sift_up(slot);
        self.sift_down(slot);
    }

    /// Removes and returns the minimum pair, or `None` if the heap is
    /// empty.
    pub fn pop(&mut self) -> Option<(P, E)> {
        if self.pairs.is_empty() {
            return None;
        }
        // Swap-then-remove: the side-index stays consistent with the array
        // at every step.
        let last = self.pairs.len() - 1;
        self.swap_slots(0, last);
        let (pty, elt) = self.pairs.pop()?;
        self.index.remove(elt.key_bytes());
        if !self.pairs.is_empty() {
            self.sift_down(0);
        }
        Some((pty, elt))
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    /// Doubles the capacity, clamping the last step to the count maximum.
    ///
    /// # Panics
    ///
    /// Panics if the capacity already reached the count maximum.
    fn grow(&mut self) {
        if self.count == self.count_max {
            panic!("heap count maximum reached");
        }
        if self.count_max - self.count < self.count {
            self.count = self.count_max;
        } else {
            self.count *= 2;
        }
        self.pairs.reserve_exact(self.count - self.pairs.len());
    }

    /// Swaps two slots and remaps both elements in the side-index.
    fn swap_slots(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.pairs.swap(i, j);
        self.index.insert(self.pairs[i].1.key_bytes(), i);
        self.index.insert(self.pairs[j].1.key_bytes(), j);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.pairs[parent].0 > self.pairs[i].0 {
                self.swap_slots(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.pairs.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            // The left child wins on equal priorities.
            let child = if right < len && self.pairs[right].0 < self.pairs[left].0 {
                right
            } else {
                left
            };
            if self.pairs[i].0 > self.pairs[child].0 {
                self.swap_slots(i, child);
                i = child;
            } else {
                break;
            }
        }
    }
}

impl<P, E, S> Default for Heap<P, E, S>
where
    P: Ord,
    E: Identity,
    S: SideIndex,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl<P, E, S> Heap<P, E, S>
where
    P: Ord,
    E: Identity,
    S: SideIndex,
{
    /// Checks heap order and the array/side-index bijection.
    pub(crate) fn assert_invariants(&self) {
        for i in 1..self.pairs.len() {
            let parent = (i - 1) / 2;
            assert!(
                self.pairs[parent].0 <= self.pairs[i].0,
                "heap order violated between slots {parent} and {i}"
            );
        }
        assert_eq!(self.pairs.len(), self.index.len(), "index size mismatch");
        for (slot, (_, elt)) in self.pairs.iter().enumerate() {
            assert_eq!(
                self.index.get(elt.key_bytes()),
                Some(slot),
                "element at slot {slot} mis-indexed"
            );
        }
    }
}
