use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Index, RangeBounds};

use compare::{Compare, Natural};

use crate::cursor::{Cursor, IntoIter, Iter, Range};
use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::error::Error;
use crate::index::{DefaultIx, IndexType};
use crate::node::Node;
use crate::tree::RbTree;

/// An ordered map based on a red-black tree.
///
/// Keys are unique: inserting a key that is already present keeps the
/// existing entry and its value.
///
/// # Example
///
/// ```rust
/// use rb_ordered_map::RbMap;
///
/// let mut map = RbMap::new();
/// map.insert(2, "b");
/// map.insert(1, "a");
/// map.insert(3, "c");
///
/// let mut it = map.iter();
/// assert_eq!(it.next(), Some((&1, &"a")));
/// assert_eq!(it.next(), Some((&2, &"b")));
/// assert_eq!(it.next(), Some((&3, &"c")));
/// assert_eq!(it.next(), None);
/// ```
#[derive(Clone)]
pub struct RbMap<K, V, C = Natural<K>, Ix = DefaultIx> {
    tree: RbTree<K, V, C, Ix>,
}

impl<K, V> RbMap<K, V>
where
    K: Ord,
{
    /// Creates an empty map ordered according to the natural order of its keys.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        RbMap { tree: RbTree::new() }
    }

    /// Creates an empty map with room for `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RbMap {
            tree: RbTree::with_capacity(capacity),
        }
    }
}

impl<K, V> Default for RbMap<K, V>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C, Ix> RbMap<K, V, C, Ix>
where
    Ix: IndexType,
{
    /// Creates an empty map ordered according to the given comparator.
    ///
    /// # Example
    /// ```rust
    /// use compare::{natural, Compare};
    /// use rb_ordered_map::RbMap;
    ///
    /// let mut map: RbMap<_, _, _> = RbMap::with_cmp(natural().rev());
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    /// map.insert(2, "b");
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    #[inline]
    #[must_use]
    pub fn with_cmp(cmp: C) -> Self {
        RbMap {
            tree: RbTree::with_cmp(cmp),
        }
    }

    /// Creates an empty map ordered according to the given comparator, with
    /// room for `capacity` entries.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_cmp(capacity: usize, cmp: C) -> Self {
        RbMap {
            tree: RbTree::with_capacity_and_cmp(capacity, cmp),
        }
    }

    /// Returns a reference to the map's comparator.
    #[inline]
    pub fn cmp(&self) -> &C {
        self.tree.cmp()
    }

    /// Return the number of entries in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Return `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove all entries from the map
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchange the contents of two maps in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Get an iterator over the entries of the map, sorted by key.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, Ix> {
        self.tree.iter()
    }

    /// Get an iterator over the keys of the map, in sorted order.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, Ix> {
        Keys { inner: self.iter() }
    }

    /// Get an iterator over the values of the map, in key order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, Ix> {
        Values { inner: self.iter() }
    }

    /// Returns a cursor at the entry with the minimum key.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, K, V, Ix> {
        self.tree.begin()
    }

    /// Returns a cursor at the past-the-end position.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbMap;
    ///
    /// let map: RbMap<_, _> = [(1, 'a'), (5, 'e')].into_iter().collect();
    /// let mut c = map.end();
    /// c.move_prev();
    /// assert_eq!(c.get(), Some((&5, &'e')));
    /// ```
    #[inline]
    #[must_use]
    pub fn end(&self) -> Cursor<'_, K, V, Ix> {
        self.tree.end()
    }

    /// Returns the entry with the minimum key.
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first_key_value()
    }

    /// Returns the entry with the maximum key.
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last_key_value()
    }
}

impl<K, V, C, Ix> RbMap<K, V, C, Ix>
where
    C: Compare<K>,
    Ix: IndexType,
{
    /// Insert a key-value pair into the map.
    ///
    /// Returns a reference to the value stored under `key` and whether it was
    /// newly inserted. An existing value is never replaced.
    ///
    /// # Panics
    ///
    /// This method panics when the map is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// assert_eq!(map.insert(1, "a"), (&mut "a", true));
    /// assert_eq!(map.insert(1, "b"), (&mut "a", false));
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> (&mut V, bool) {
        let (node, inserted) = self.tree.insert_or_panic(key, value);
        (self.tree.node_mut(node, Node::value_mut), inserted)
    }

    /// Insert a key-value pair into the map, reporting capacity and allocation
    /// failures. On error the map is unchanged.
    #[inline]
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(&mut V, bool), Error> {
        let (node, inserted) = self.tree.insert_inner(key, value)?;
        Ok((self.tree.node_mut(node, Node::value_mut), inserted))
    }

    /// Return reference to the value corresponding to the key.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    /// Return a mutable reference to the value corresponding to the key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(3, 0);
    /// if let Some(v) = map.get_mut(&3) {
    ///     *v += 1;
    /// }
    /// assert_eq!(map.get(&3), Some(&1));
    /// ```
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key)
    }

    /// Return the value for a key that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the map holds no entry for `key`.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Error, RbMap};
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.at(&1), Ok(&"a"));
    /// assert_eq!(map.at(&2), Err(Error::KeyNotFound));
    /// ```
    #[inline]
    pub fn at(&self, key: &K) -> Result<&V, Error> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Return the value for a key that must be present, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the map holds no entry for `key`.
    #[inline]
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, Error> {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Return the value for `key`, inserting `V::default()` first if absent.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbMap;
    ///
    /// let mut map: RbMap<&str, u32> = RbMap::new();
    /// *map.get_or_insert_default("hits") += 1;
    /// *map.get_or_insert_default("hits") += 1;
    /// assert_eq!(map.get(&"hits"), Some(&2));
    /// ```
    #[inline]
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Get the given key's corresponding entry in the map for in-place manipulation.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, RbMap};
    ///
    /// let mut map = RbMap::new();
    ///
    /// assert!(matches!(map.entry(1), Entry::Vacant(_)));
    /// map.entry(1).or_insert(0);
    /// assert!(matches!(map.entry(1), Entry::Occupied(_)));
    /// map.entry(1).and_modify(|v| *v += 1);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    #[inline]
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C, Ix> {
        let node = self.tree.search(&key);
        if node.is_sentinel() {
            Entry::Vacant(VacantEntry {
                tree: &mut self.tree,
                key,
            })
        } else {
            Entry::Occupied(OccupiedEntry {
                tree: &mut self.tree,
                node,
            })
        }
    }

    /// Checks if the map holds an entry for `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Return the number of entries stored under `key`: 1 if present, 0 otherwise.
    #[inline]
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Remove a key from the map, returning the value at the key if the key exists
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbMap;
    ///
    /// let mut map = RbMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.remove(&3), None);
    /// assert_eq!(map.remove(&2), Some("b"));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key).map(|(_, v)| v)
    }

    /// Remove a key from the map, returning the stored key and value if the key exists
    #[inline]
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.tree.remove(key)
    }

    /// Remove every entry whose key falls in `range`, returning how many were removed.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbMap;
    ///
    /// let mut map: RbMap<_, _> = (0..10).map(|i| (i, i * i)).collect();
    /// assert_eq!(map.remove_range(3..7), 4);
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2, 7, 8, 9]);
    /// ```
    #[inline]
    pub fn remove_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<K>,
    {
        self.tree.remove_range(range)
    }

    /// Remove and return the entry with the minimum key.
    #[inline]
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    /// Remove and return the entry with the maximum key.
    #[inline]
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }

    /// Returns a cursor at the entry for `key`, or at the end position.
    #[inline]
    #[must_use]
    pub fn find(&self, key: &K) -> Cursor<'_, K, V, Ix> {
        self.tree.find(key)
    }

    /// Returns a cursor at the first entry whose key is not less than `key`.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbMap;
    ///
    /// let map: RbMap<_, _> = [(10, ()), (20, ()), (5, ())].into_iter().collect();
    /// assert_eq!(map.lower_bound(&12).key(), Some(&20));
    /// assert_eq!(map.lower_bound(&10).key(), Some(&10));
    /// assert!(map.lower_bound(&21).is_end());
    /// ```
    #[inline]
    #[must_use]
    pub fn lower_bound(&self, key: &K) -> Cursor<'_, K, V, Ix> {
        self.tree.lower_bound(key)
    }

    /// Returns a cursor at the first entry whose key is greater than `key`.
    #[inline]
    #[must_use]
    pub fn upper_bound(&self, key: &K) -> Cursor<'_, K, V, Ix> {
        self.tree.upper_bound(key)
    }

    /// Returns the `[lower_bound, upper_bound)` cursor pair for `key`.
    #[inline]
    #[must_use]
    pub fn equal_range(&self, key: &K) -> (Cursor<'_, K, V, Ix>, Cursor<'_, K, V, Ix>) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Get an iterator over the entries whose keys fall in `range`, sorted by key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbMap;
    ///
    /// let map: RbMap<_, _> = (0..10).map(|i| (i, ())).collect();
    /// let keys: Vec<_> = map.range(3..=5).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, vec![3, 4, 5]);
    /// assert_eq!(map.range(7..2).count(), 0);
    /// ```
    #[inline]
    pub fn range<R>(&self, range: R) -> Range<'_, K, V, Ix>
    where
        R: RangeBounds<K>,
    {
        self.tree.range(range)
    }
}

impl<K, V, C, Ix> Index<&K> for RbMap<K, V, C, Ix>
where
    C: Compare<K>,
    Ix: IndexType,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    #[inline]
    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("{}", Error::KeyNotFound),
        }
    }
}

impl<K, V, C, Ix> PartialEq for RbMap<K, V, C, Ix>
where
    K: PartialEq,
    V: PartialEq,
    Ix: IndexType,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, C, Ix> Eq for RbMap<K, V, C, Ix>
where
    K: Eq,
    V: Eq,
    Ix: IndexType,
{
}

impl<K, V, C, Ix> PartialOrd for RbMap<K, V, C, Ix>
where
    K: PartialOrd,
    V: PartialOrd,
    Ix: IndexType,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K, V, C, Ix> Ord for RbMap<K, V, C, Ix>
where
    K: Ord,
    V: Ord,
    Ix: IndexType,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K, V, C, Ix> fmt::Debug for RbMap<K, V, C, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Collects pairs into a map. A repeated key keeps its first value.
impl<K, V> FromIterator<(K, V)> for RbMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = RbMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, C, Ix> Extend<(K, V)> for RbMap<K, V, C, Ix>
where
    C: Compare<K>,
    Ix: IndexType,
{
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            let _ignore = self.tree.insert_or_panic(k, v);
        }
    }
}

impl<'a, K, V, C, Ix> IntoIterator for &'a RbMap<K, V, C, Ix>
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

impl<K, V, C, Ix> IntoIterator for RbMap<K, V, C, Ix>
where
    Ix: IndexType,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

/// An iterator over the keys of a `RbMap`.
pub struct Keys<'a, K, V, Ix = DefaultIx> {
    inner: Iter<'a, K, V, Ix>,
}

impl<'a, K, V, Ix: IndexType> Iterator for Keys<'a, K, V, Ix> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, Ix: IndexType> DoubleEndedIterator for Keys<'_, K, V, Ix> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V, Ix: IndexType> ExactSizeIterator for Keys<'_, K, V, Ix> {}

impl<K, V, Ix: IndexType> FusedIterator for Keys<'_, K, V, Ix> {}

impl<K, V, Ix: Copy> Clone for Keys<'_, K, V, Ix> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over the values of a `RbMap`.
pub struct Values<'a, K, V, Ix = DefaultIx> {
    inner: Iter<'a, K, V, Ix>,
}

impl<'a, K, V, Ix: IndexType> Iterator for Values<'a, K, V, Ix> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, Ix: IndexType> DoubleEndedIterator for Values<'_, K, V, Ix> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V, Ix: IndexType> ExactSizeIterator for Values<'_, K, V, Ix> {}

impl<K, V, Ix: IndexType> FusedIterator for Values<'_, K, V, Ix> {}

impl<K, V, Ix: Copy> Clone for Values<'_, K, V, Ix> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}
