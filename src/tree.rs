use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Bound, RangeBounds};

use compare::{Compare, Natural};
use log::{debug, trace};

use crate::cursor::{self, Cursor, IntoIter, Iter, Range};
use crate::error::Error;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::node::{Color, Node};

/// A red-black tree holding unique keys, ordered by an injected comparator.
///
/// Nodes live in an arena and link to each other by index. Index 0 is the
/// sentinel: every absent child points at it, the root's parent is it, and it
/// doubles as the past-the-end position of cursors. The minimum and maximum
/// nodes are tracked on every insert and remove so that `begin` and
/// decrementing `end` are O(1).
#[derive(Clone)]
pub struct RbTree<K, V, C = Natural<K>, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<K, V, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Node with the minimum key
    pub(crate) first: NodeIndex<Ix>,
    /// Node with the maximum key
    pub(crate) last: NodeIndex<Ix>,
    /// Number of elements in the tree
    pub(crate) len: usize,
    /// Key ordering
    cmp: C,
}

impl<K, V> RbTree<K, V>
where
    K: Ord,
{
    /// Creates an empty tree ordered according to the natural order of its keys.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_cmp(compare::natural())
    }

    /// Creates an empty tree with room for `capacity` nodes.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_cmp(capacity, compare::natural())
    }
}

impl<K, V> Default for RbTree<K, V>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    /// Creates an empty tree ordered according to the given comparator.
    #[inline]
    #[must_use]
    pub fn with_cmp(cmp: C) -> Self {
        Self::with_capacity_and_cmp(0, cmp)
    }

    /// Creates an empty tree ordered according to the given comparator, with
    /// room for `capacity` nodes.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_cmp(capacity: usize, cmp: C) -> Self {
        let mut nodes = vec![Node::new_sentinel()];
        nodes.reserve(capacity);
        RbTree {
            nodes,
            root: NodeIndex::sentinel(),
            first: NodeIndex::sentinel(),
            last: NodeIndex::sentinel(),
            len: 0,
            cmp,
        }
    }

    /// Returns a reference to the tree's comparator.
    #[inline]
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    /// Returns a cursor at the entry with the minimum key, or at the end
    /// position if the tree is empty.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, K, V, Ix> {
        self.cursor_at(self.first)
    }

    /// Returns a cursor at the past-the-end position.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Cursor<'_, K, V, Ix> {
        self.cursor_at(NodeIndex::sentinel())
    }

    /// Returns the entry with the minimum key.
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.nodes[self.first.index()].key_value()
    }

    /// Returns the entry with the maximum key.
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.nodes[self.last.index()].key_value()
    }

    /// Get an iterator over the entries of the tree, sorted by key.
    ///
    /// The iterator is double-ended, so `iter().rev()` walks from the maximum
    /// back to the minimum.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, Ix> {
        Iter::new(self.begin(), self.end(), self.len)
    }

    /// Remove all elements from the tree
    #[inline]
    pub fn clear(&mut self) {
        debug!("clearing tree with {} entries", self.len);
        self.nodes.truncate(1);
        self.root = NodeIndex::sentinel();
        self.first = NodeIndex::sentinel();
        self.last = NodeIndex::sentinel();
        self.len = 0;
    }

    /// Exchange the contents of two trees, comparators included, without
    /// touching individual nodes.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        debug!("swapping trees of {} and {} entries", self.len, other.len);
        mem::swap(self, other);
    }

    /// Return the number of elements in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn cursor_at(&self, node: NodeIndex<Ix>) -> Cursor<'_, K, V, Ix> {
        Cursor::new(&self.nodes, self.first, self.last, node)
    }
}

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    C: Compare<K>,
    Ix: IndexType,
{
    /// Insert a key-value pair into the tree.
    ///
    /// Returns a cursor at the entry holding `key` and whether a new entry
    /// was created. An existing entry is left untouched, and `key` and
    /// `value` are dropped.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes
    /// for its index, or when the node arena can not grow.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> (Cursor<'_, K, V, Ix>, bool) {
        let (node, inserted) = self.insert_or_panic(key, value);
        (self.cursor_at(node), inserted)
    }

    /// Insert a key-value pair into the tree, reporting capacity and
    /// allocation failures instead of panicking.
    ///
    /// On error the tree is unchanged.
    #[inline]
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(Cursor<'_, K, V, Ix>, bool), Error> {
        let (node, inserted) = self.insert_inner(key, value)?;
        Ok((self.cursor_at(node), inserted))
    }

    /// Remove the entry for `key`, returning whether it existed.
    #[inline]
    pub fn erase(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Remove the entry for `key`, returning it if it existed.
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let node = self.search(key);
        if node.is_sentinel() {
            return None;
        }
        Some(self.remove_inner(node))
    }

    /// Remove and return the entry with the minimum key.
    #[inline]
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        if self.first.is_sentinel() {
            return None;
        }
        Some(self.remove_inner(self.first))
    }

    /// Remove and return the entry with the maximum key.
    #[inline]
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        if self.last.is_sentinel() {
            return None;
        }
        Some(self.remove_inner(self.last))
    }

    /// Returns a cursor at the entry for `key`, or at the end position.
    #[inline]
    #[must_use]
    pub fn find(&self, key: &K) -> Cursor<'_, K, V, Ix> {
        self.cursor_at(self.search(key))
    }

    /// Returns a cursor at the first entry whose key is not less than `key`.
    #[inline]
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Cursor<'_, K, V, Ix> {
        self.cursor_at(self.lower_bound_inner(key))
    }

    /// Returns a cursor at the first entry whose key is greater than `key`.
    #[inline]
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Cursor<'_, K, V, Ix> {
        self.cursor_at(self.upper_bound_inner(key))
    }

    /// Return reference to the value corresponding to the key.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.nodes[self.search(key).index()].value.as_ref()
    }

    /// Return a mutable reference to the value corresponding to the key.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let node = self.search(key);
        self.nodes[node.index()].value.as_mut()
    }

    /// Checks if the tree holds an entry for `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        !self.search(key).is_sentinel()
    }

    /// Get an iterator over the entries whose keys fall in `range`, sorted by key.
    ///
    /// A range whose start comes after its end yields nothing.
    #[inline]
    pub fn range<R>(&self, range: R) -> Range<'_, K, V, Ix>
    where
        R: RangeBounds<K>,
    {
        let (front, back) = self.range_inner(&range);
        Range::new(self.cursor_at(front), self.cursor_at(back))
    }

    /// Remove every entry whose key falls in `range`, returning how many were removed.
    #[inline]
    pub fn remove_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<K>,
    {
        let mut removed = 0;
        loop {
            // bounds are recomputed since removal may relocate arena slots
            let (front, back) = self.range_inner(&range);
            if front == back {
                return removed;
            }
            let _ignore = self.remove_inner(front);
            removed += 1;
        }
    }
}

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    C: Compare<K>,
    Ix: IndexType,
{
    pub(crate) fn insert_or_panic(&mut self, key: K, value: V) -> (NodeIndex<Ix>, bool) {
        match self.insert_inner(key, value) {
            Ok(res) => res,
            Err(err) => panic!("{err}"),
        }
    }

    /// Insert a node into the tree.
    ///
    /// The node slot is reserved before any link is touched, so an error
    /// leaves the tree as it was.
    pub(crate) fn insert_inner(&mut self, key: K, value: V) -> Result<(NodeIndex<Ix>, bool), Error> {
        let mut y = NodeIndex::sentinel();
        let mut x = self.root;
        let mut to_left = false;

        while !x.is_sentinel() {
            y = x;
            match self.cmp.compare(&key, self.node_ref(x, Node::key)) {
                Ordering::Less => {
                    to_left = true;
                    x = self.node_ref(x, Node::left);
                }
                Ordering::Greater => {
                    to_left = false;
                    x = self.node_ref(x, Node::right);
                }
                Ordering::Equal => return Ok((x, false)),
            }
        }

        let z = self.allocate(key, value, y)?;
        self.len += 1;
        if y.is_sentinel() {
            self.root = z;
            self.first = z;
            self.last = z;
            self.node_mut(z, Node::set_color(Color::Black));
            return Ok((z, true));
        }
        if to_left {
            self.node_mut(y, Node::set_left(z));
            if y == self.first {
                self.first = z;
            }
        } else {
            self.node_mut(y, Node::set_right(z));
            if y == self.last {
                self.last = z;
            }
        }

        self.insert_fixup(z);
        Ok((z, true))
    }

    /// Remove a real node from the tree and free its slot, returning its entry.
    pub(crate) fn remove_inner(&mut self, z: NodeIndex<Ix>) -> (K, V) {
        let mut z = z;
        if !self.node_ref(z, Node::left).is_sentinel() && !self.node_ref(z, Node::right).is_sentinel() {
            // two children: trade entries with the in-order predecessor, which has at most one
            let pred = cursor::tree_maximum(&self.nodes, self.node_ref(z, Node::left));
            self.swap_entries(z, pred);
            z = pred;
        }

        let was_double_black = self.node_ref(z, Node::is_black)
            && self.left_ref(z, Node::is_black)
            && self.right_ref(z, Node::is_black);
        let parent = self.node_ref(z, Node::parent);

        if z == self.last {
            self.last = cursor::predecessor(&self.nodes, z);
        }
        if z == self.first {
            self.first = cursor::successor(&self.nodes, z);
        }

        let x = if self.node_ref(z, Node::left).is_sentinel() {
            self.node_ref(z, Node::right)
        } else {
            self.node_ref(z, Node::left)
        };
        self.transplant(z, x);
        self.len -= 1;

        self.remove_fixup(x, parent, was_double_black);

        self.free(z)
    }

    /// Search for the node with exactly the given key, the sentinel if there is none.
    pub(crate) fn search(&self, key: &K) -> NodeIndex<Ix> {
        let mut x = self.root;
        while !x.is_sentinel() {
            match self.cmp.compare(key, self.node_ref(x, Node::key)) {
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
                Ordering::Equal => return x,
            }
        }
        x
    }

    fn lower_bound_inner(&self, key: &K) -> NodeIndex<Ix> {
        let mut x = self.root;
        let mut res = NodeIndex::sentinel();
        while !x.is_sentinel() {
            if self.cmp.compares_lt(self.node_ref(x, Node::key), key) {
                x = self.node_ref(x, Node::right);
            } else {
                res = x;
                x = self.node_ref(x, Node::left);
            }
        }
        res
    }

    fn upper_bound_inner(&self, key: &K) -> NodeIndex<Ix> {
        let mut x = self.root;
        let mut res = NodeIndex::sentinel();
        while !x.is_sentinel() {
            if self.cmp.compares_gt(self.node_ref(x, Node::key), key) {
                res = x;
                x = self.node_ref(x, Node::left);
            } else {
                x = self.node_ref(x, Node::right);
            }
        }
        res
    }

    /// Resolve a range into `[front, back)` node positions. Inverted ranges
    /// collapse to `front == back`.
    fn range_inner<R>(&self, range: &R) -> (NodeIndex<Ix>, NodeIndex<Ix>)
    where
        R: RangeBounds<K>,
    {
        let front = match range.start_bound() {
            Bound::Included(k) => self.lower_bound_inner(k),
            Bound::Excluded(k) => self.upper_bound_inner(k),
            Bound::Unbounded => self.first,
        };
        let back = match range.end_bound() {
            Bound::Included(k) => self.upper_bound_inner(k),
            Bound::Excluded(k) => self.lower_bound_inner(k),
            Bound::Unbounded => NodeIndex::sentinel(),
        };
        if front.is_sentinel()
            || (!back.is_sentinel()
                && self.cmp.compares_gt(
                    self.node_ref(front, Node::key),
                    self.node_ref(back, Node::key),
                ))
        {
            return (back, back);
        }
        (front, back)
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        loop {
            if z == self.root {
                self.node_mut(z, Node::set_color(Color::Black));
                return;
            }
            let p = self.node_ref(z, Node::parent);
            if self.node_ref(p, Node::is_black) {
                return;
            }
            // p is red, so it is not the root and has a real parent
            if self.is_left_child(z) != self.is_left_child(p) {
                trace!("insert fixup: straighten zig-zag at {z:?}");
                self.rotate_up(z);
                z = p;
                continue;
            }
            let g = self.node_ref(p, Node::parent);
            let u = self.sibling(p);
            if self.node_ref(u, Node::is_red) {
                trace!("insert fixup: recolor below {g:?}");
                self.node_mut(p, Node::set_color(Color::Black));
                self.node_mut(u, Node::set_color(Color::Black));
                self.node_mut(g, Node::set_color(Color::Red));
                z = g;
            } else {
                trace!("insert fixup: restructure {g:?} under {p:?}");
                self.node_mut(p, Node::set_color(Color::Black));
                self.node_mut(g, Node::set_color(Color::Red));
                self.rotate_up(p);
                return;
            }
        }
    }

    /// Restore red-black tree properties after a remove.
    ///
    /// `x` took the place of the removed node under `parent`; it may be the
    /// sentinel, which is why the parent is passed explicitly.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>, mut parent: NodeIndex<Ix>, was_double_black: bool) {
        if self.node_ref(x, Node::is_red) {
            self.node_mut(x, Node::set_color(Color::Black));
            return;
        }
        if !was_double_black || x == self.root {
            return;
        }
        loop {
            let x_is_left = self.node_ref(parent, Node::left) == x;
            let sibling = if x_is_left {
                self.node_ref(parent, Node::right)
            } else {
                self.node_ref(parent, Node::left)
            };

            if self.node_ref(sibling, Node::is_red) {
                trace!("remove fixup: red sibling {sibling:?}");
                self.node_mut(sibling, Node::set_color(Color::Black));
                self.node_mut(parent, Node::set_color(Color::Red));
                self.rotate_up(sibling);
                continue;
            }

            let (near, far) = if x_is_left {
                (
                    self.node_ref(sibling, Node::left),
                    self.node_ref(sibling, Node::right),
                )
            } else {
                (
                    self.node_ref(sibling, Node::right),
                    self.node_ref(sibling, Node::left),
                )
            };
            let parent_color = self.node_ref(parent, Node::color);

            if self.node_ref(far, Node::is_red) {
                trace!("remove fixup: outer red nephew {far:?}");
                self.node_mut(sibling, Node::set_color(parent_color));
                self.node_mut(far, Node::set_color(Color::Black));
                self.node_mut(parent, Node::set_color(Color::Black));
                self.rotate_up(sibling);
                return;
            }
            if self.node_ref(near, Node::is_red) {
                trace!("remove fixup: inner red nephew {near:?}");
                self.rotate_up(near);
                self.rotate_up(near);
                self.node_mut(near, Node::set_color(parent_color));
                self.node_mut(sibling, Node::set_color(Color::Black));
                self.node_mut(parent, Node::set_color(Color::Black));
                return;
            }

            trace!("remove fixup: black sibling {sibling:?} without red children");
            self.node_mut(sibling, Node::set_color(Color::Red));
            if matches!(parent_color, Color::Red) {
                self.node_mut(parent, Node::set_color(Color::Black));
                return;
            }
            if parent == self.root {
                return;
            }
            x = parent;
            parent = self.node_ref(x, Node::parent);
        }
    }

    /// Rotate `x` above its parent.
    fn rotate_up(&mut self, x: NodeIndex<Ix>) {
        let p = self.node_ref(x, Node::parent);
        if self.is_left_child(x) {
            self.right_rotate(p);
        } else {
            self.left_rotate(p);
        }
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.node_ref(x, Node::right).is_sentinel() {
            return;
        }
        let y = self.node_ref(x, Node::right);
        let y_left = self.node_ref(y, Node::left);
        self.node_mut(x, Node::set_right(y_left));
        if !y_left.is_sentinel() {
            self.node_mut(y_left, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.node_ref(x, Node::left).is_sentinel() {
            return;
        }
        let y = self.node_ref(x, Node::left);
        let y_right = self.node_ref(y, Node::right);
        self.node_mut(x, Node::set_left(y_right));
        if !y_right.is_sentinel() {
            self.node_mut(y_right, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));
    }
}

impl<K, V, C, Ix> RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    /// Reserve a slot and store a fresh red node in it.
    fn allocate(&mut self, key: K, value: V, parent: NodeIndex<Ix>) -> Result<NodeIndex<Ix>, Error> {
        let node_idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        if <Ix as IndexType>::max().index() != !0 && NodeIndex::end() == node_idx {
            return Err(Error::CapacityExceeded);
        }
        self.nodes.try_reserve(1)?;
        self.nodes.push(Node::new(key, value, parent));
        Ok(node_idx)
    }

    /// Release the slot of an unlinked node, moving the last slot into it.
    fn free(&mut self, z: NodeIndex<Ix>) -> (K, V) {
        let node = self.nodes.swap_remove(z.index());
        let old = NodeIndex::new(self.nodes.len());
        self.update_idx(old, z);
        node.into_entry()
    }

    /// Update links after the node at `old` moved to `new`.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if old == new {
            return;
        }
        trace!("relocating {old:?} to {new:?}");
        if self.root == old {
            self.root = new;
        }
        if self.first == old {
            self.first = new;
        }
        if self.last == old {
            self.last = new;
        }
        let parent = self.node_ref(new, Node::parent);
        if !parent.is_sentinel() {
            if self.node_ref(parent, Node::left) == old {
                self.node_mut(parent, Node::set_left(new));
            } else {
                self.node_mut(parent, Node::set_right(new));
            }
        }
        let left = self.node_ref(new, Node::left);
        if !left.is_sentinel() {
            self.node_mut(left, Node::set_parent(new));
        }
        let right = self.node_ref(new, Node::right);
        if !right.is_sentinel() {
            self.node_mut(right, Node::set_parent(new));
        }
    }

    /// Exchange the entries of two distinct nodes, leaving colors and links in place.
    fn swap_entries(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.nodes.split_at_mut(hi.index());
        let (x, y) = (&mut head[lo.index()], &mut tail[0]);
        mem::swap(&mut x.key, &mut y.key);
        mem::swap(&mut x.value, &mut y.value);
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        let p = self.node_ref(x, Node::parent);
        self.node_mut(y, Node::set_parent(p));
        if p.is_sentinel() {
            self.root = y;
        } else if self.node_ref(p, Node::left) == x {
            self.node_mut(p, Node::set_left(y));
        } else {
            self.node_mut(p, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        let p = self.node_ref(u, Node::parent);
        if p.is_sentinel() {
            self.root = v;
        } else if self.node_ref(p, Node::left) == u {
            self.node_mut(p, Node::set_left(v));
        } else {
            self.node_mut(p, Node::set_right(v));
        }
        if !v.is_sentinel() {
            self.node_mut(v, Node::set_parent(p));
        }
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// The other child of `node`'s parent.
    fn sibling(&self, node: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if self.is_left_child(node) {
            self.parent_ref(node, Node::right)
        } else {
            self.parent_ref(node, Node::left)
        }
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, V, C, Ix> RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }
}

impl<K, V, C, Ix> fmt::Debug for RbTree<K, V, C, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C, Ix> IntoIterator for &'a RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C, Ix> IntoIterator for RbTree<K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.nodes, self.first, self.last, self.len)
    }
}
