//! In-order navigation over the node arena.
//!
//! Nothing in here knows about colors or rebalancing: a cursor only follows
//! parent and child links, so it can be used on any binary search tree laid
//! out in the arena.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::node::Node;

/// Find the node with the minimum key in the subtree rooted at `x`.
pub(crate) fn tree_minimum<K, V, Ix>(nodes: &[Node<K, V, Ix>], mut x: NodeIndex<Ix>) -> NodeIndex<Ix>
where
    Ix: IndexType,
{
    while !nodes[x.index()].left().is_sentinel() {
        x = nodes[x.index()].left();
    }
    x
}

/// Find the node with the maximum key in the subtree rooted at `x`.
pub(crate) fn tree_maximum<K, V, Ix>(nodes: &[Node<K, V, Ix>], mut x: NodeIndex<Ix>) -> NodeIndex<Ix>
where
    Ix: IndexType,
{
    while !nodes[x.index()].right().is_sentinel() {
        x = nodes[x.index()].right();
    }
    x
}

/// In-order successor of the real node `x`, the sentinel if `x` is the maximum.
pub(crate) fn successor<K, V, Ix>(nodes: &[Node<K, V, Ix>], mut x: NodeIndex<Ix>) -> NodeIndex<Ix>
where
    Ix: IndexType,
{
    let right = nodes[x.index()].right();
    if !right.is_sentinel() {
        return tree_minimum(nodes, right);
    }
    let mut p = nodes[x.index()].parent();
    while !p.is_sentinel() && nodes[p.index()].right() == x {
        x = p;
        p = nodes[p.index()].parent();
    }
    p
}

/// In-order predecessor of the real node `x`, the sentinel if `x` is the minimum.
pub(crate) fn predecessor<K, V, Ix>(nodes: &[Node<K, V, Ix>], mut x: NodeIndex<Ix>) -> NodeIndex<Ix>
where
    Ix: IndexType,
{
    let left = nodes[x.index()].left();
    if !left.is_sentinel() {
        return tree_maximum(nodes, left);
    }
    let mut p = nodes[x.index()].parent();
    while !p.is_sentinel() && nodes[p.index()].left() == x {
        x = p;
        p = nodes[p.index()].parent();
    }
    p
}

/// A bidirectional cursor over the entries of a tree, in key order.
///
/// The past-the-end position is the sentinel. It behaves as a ghost element
/// joining both ends: moving forward from it reaches the minimum, moving
/// backward reaches the maximum, and moving backward from the minimum lands
/// on it again.
///
/// A cursor borrows the tree, so it can not outlive a structural change.
pub struct Cursor<'a, K, V, Ix = DefaultIx> {
    nodes: &'a [Node<K, V, Ix>],
    first: NodeIndex<Ix>,
    last: NodeIndex<Ix>,
    node: NodeIndex<Ix>,
}

impl<'a, K, V, Ix> Cursor<'a, K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(
        nodes: &'a [Node<K, V, Ix>],
        first: NodeIndex<Ix>,
        last: NodeIndex<Ix>,
        node: NodeIndex<Ix>,
    ) -> Self {
        Cursor {
            nodes,
            first,
            last,
            node,
        }
    }

    /// Returns the entry under the cursor, `None` at the end position.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        let nodes = self.nodes;
        nodes[self.node.index()].key_value()
    }

    /// Returns the key under the cursor, `None` at the end position.
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.get().map(|(k, _)| k)
    }

    /// Returns the value under the cursor, `None` at the end position.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.get().map(|(_, v)| v)
    }

    /// Checks if the cursor is at the past-the-end position.
    #[inline]
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.node.is_sentinel()
    }

    /// Moves to the in-order successor.
    #[inline]
    pub fn move_next(&mut self) {
        self.node = if self.node.is_sentinel() {
            self.first
        } else {
            successor(self.nodes, self.node)
        };
    }

    /// Moves to the in-order predecessor.
    #[inline]
    pub fn move_prev(&mut self) {
        self.node = if self.node.is_sentinel() {
            self.last
        } else {
            predecessor(self.nodes, self.node)
        };
    }

    /// Returns a cursor at the in-order successor, leaving `self` in place.
    #[inline]
    #[must_use]
    pub fn next_cursor(&self) -> Self {
        let mut c = *self;
        c.move_next();
        c
    }

    /// Returns a cursor at the in-order predecessor, leaving `self` in place.
    #[inline]
    #[must_use]
    pub fn prev_cursor(&self) -> Self {
        let mut c = *self;
        c.move_prev();
        c
    }
}

impl<K, V, Ix: Copy> Clone for Cursor<'_, K, V, Ix> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, Ix: Copy> Copy for Cursor<'_, K, V, Ix> {}

impl<K, V, Ix: PartialEq> PartialEq for Cursor<'_, K, V, Ix> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.node == other.node
    }
}

impl<K, V, Ix: Eq> Eq for Cursor<'_, K, V, Ix> {}

impl<K, V, Ix> fmt::Debug for Cursor<'_, K, V, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// An iterator over the entries of a tree, sorted by key.
pub struct Iter<'a, K, V, Ix = DefaultIx> {
    front: Cursor<'a, K, V, Ix>,
    back: Cursor<'a, K, V, Ix>,
    len: usize,
}

impl<'a, K, V, Ix> Iter<'a, K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(begin: Cursor<'a, K, V, Ix>, end: Cursor<'a, K, V, Ix>, len: usize) -> Self {
        Iter {
            front: begin,
            back: end,
            len,
        }
    }
}

impl<'a, K, V, Ix> Iterator for Iter<'a, K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let item = self.front.get();
        self.front.move_next();
        self.len -= 1;
        item
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V, Ix> DoubleEndedIterator for Iter<'_, K, V, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.back.move_prev();
        self.len -= 1;
        self.back.get()
    }
}

impl<K, V, Ix: IndexType> ExactSizeIterator for Iter<'_, K, V, Ix> {}

impl<K, V, Ix: IndexType> FusedIterator for Iter<'_, K, V, Ix> {}

impl<K, V, Ix: Copy> Clone for Iter<'_, K, V, Ix> {
    fn clone(&self) -> Self {
        Iter {
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<K, V, Ix> fmt::Debug for Iter<'_, K, V, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over a sub-range of the entries of a tree, sorted by key.
///
/// Yields the entries in `[front, back)`, where both ends are cursors.
pub struct Range<'a, K, V, Ix = DefaultIx> {
    front: Cursor<'a, K, V, Ix>,
    back: Cursor<'a, K, V, Ix>,
}

impl<'a, K, V, Ix> Range<'a, K, V, Ix>
where
    Ix: IndexType,
{
    /// `front` must not come after `back` in key order.
    pub(crate) fn new(front: Cursor<'a, K, V, Ix>, back: Cursor<'a, K, V, Ix>) -> Self {
        Range { front, back }
    }
}

impl<'a, K, V, Ix> Iterator for Range<'a, K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = self.front.get()?;
        self.front.move_next();
        Some(item)
    }
}

impl<K, V, Ix> DoubleEndedIterator for Range<'_, K, V, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back.move_prev();
        self.back.get()
    }
}

impl<K, V, Ix: IndexType> FusedIterator for Range<'_, K, V, Ix> {}

impl<K, V, Ix: Copy> Clone for Range<'_, K, V, Ix> {
    fn clone(&self) -> Self {
        Range {
            front: self.front,
            back: self.back,
        }
    }
}

impl<K, V, Ix> fmt::Debug for Range<'_, K, V, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the entries of a tree, sorted by key.
#[derive(Debug)]
pub struct IntoIter<K, V, Ix = DefaultIx> {
    nodes: Vec<Node<K, V, Ix>>,
    front: NodeIndex<Ix>,
    /// One past the next entry yielded from the back
    back: NodeIndex<Ix>,
    last: NodeIndex<Ix>,
    len: usize,
}

impl<K, V, Ix> IntoIter<K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(
        nodes: Vec<Node<K, V, Ix>>,
        first: NodeIndex<Ix>,
        last: NodeIndex<Ix>,
        len: usize,
    ) -> Self {
        IntoIter {
            nodes,
            front: first,
            back: NodeIndex::sentinel(),
            last,
            len,
        }
    }
}

impl<K, V, Ix> Iterator for IntoIter<K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let x = self.front;
        // links stay intact after the payload is taken
        self.front = successor(&self.nodes, x);
        self.len -= 1;
        self.nodes[x.index()].take_entry()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, V, Ix> DoubleEndedIterator for IntoIter<K, V, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        self.back = if self.back.is_sentinel() {
            self.last
        } else {
            predecessor(&self.nodes, self.back)
        };
        self.len -= 1;
        self.nodes[self.back.index()].take_entry()
    }
}

impl<K, V, Ix: IndexType> ExactSizeIterator for IntoIter<K, V, Ix> {}

impl<K, V, Ix: IndexType> FusedIterator for IntoIter<K, V, Ix> {}
