//! Bucket chains threaded through a shared node pool.
//!
//! Every chain is a doubly-linked list of key/value nodes, but the nodes of
//! all chains live in one `slab::Slab` pool and are linked by slab indices
//! instead of pointers. A node keeps its pool index for life, so moving it
//! between chains (as a rehash does) is a relink with no copy and no
//! reallocation.
//!
//! A chain itself is just a head index; the pool is passed to every
//! operation, and a chain must always be used with the pool its nodes were
//! created in.

use slab::Slab;

use crate::Identity;

/// Null link. Slab keys are dense indices and never reach `usize::MAX`.
const NIL: usize = usize::MAX;

/// Shared pool of chain nodes.
pub(crate) type NodePool<K, V> = Slab<ChainNode<K, V>>;

/// A key/value node on a bucket chain.
#[derive(Debug)]
pub(crate) struct ChainNode<K, V> {
    pub(crate) key: K,
    pub(crate) val: V,
    prev: usize,
    next: usize,
}

impl<K, V> ChainNode<K, V> {
    #[inline]
    pub(crate) fn new(key: K, val: V) -> Self {
        Self {
            key,
            val,
            prev: NIL,
            next: NIL,
        }
    }
}

/// A bucket chain: the head index of a doubly-linked node list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Chain {
    head: usize,
}

impl Chain {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self { head: NIL }
    }

    /// Returns the head node's index, or `None` if the chain is empty.
    #[inline]
    pub(crate) fn head(&self) -> Option<usize> {
        if self.head == NIL {
            None
        } else {
            Some(self.head)
        }
    }

    /// Links an existing pool node at the head of the chain.
    ///
    /// The node must be unlinked (fresh from the pool or removed from a
    /// chain).
    pub(crate) fn prepend<K, V>(&mut self, pool: &mut NodePool<K, V>, idx: usize) {
        let old_head = self.head;
        {
            let node = &mut pool[idx];
            node.prev = NIL;
            node.next = old_head;
        }
        if old_head != NIL {
            pool[old_head].prev = idx;
        }
        self.head = idx;
    }

    /// Walks the chain for a node whose key bytes equal `probe`.
    pub(crate) fn search<K: Identity, V>(
        &self,
        pool: &NodePool<K, V>,
        probe: &[u8],
    ) -> Option<usize> {
        let mut cur = self.head;
        while cur != NIL {
            let node = &pool[cur];
            if node.key.key_bytes() == probe {
                return Some(cur);
            }
            cur = node.next;
        }
        None
    }

    /// Unlinks a node from the chain, leaving it in the pool.
    pub(crate) fn unlink<K, V>(&mut self, pool: &mut NodePool<K, V>, idx: usize) {
        let (prev, next) = {
            let node = &mut pool[idx];
            let links = (node.prev, node.next);
            node.prev = NIL;
            node.next = NIL;
            links
        };
        if prev != NIL {
            pool[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            pool[next].prev = prev;
        }
    }

    /// Number of nodes on the chain. Linear; used by tests.
    #[cfg(test)]
    pub(crate) fn len<K, V>(&self, pool: &NodePool<K, V>) -> usize {
        let mut n = 0;
        let mut cur = self.head;
        while cur != NIL {
            n += 1;
            cur = pool[cur].next;
        }
        n
    }
}
