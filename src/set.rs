use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::ops::RangeBounds;

use compare::{Compare, Natural};

use crate::cursor::{self, Cursor};
use crate::error::Error;
use crate::index::{DefaultIx, IndexType};
use crate::tree::RbTree;

/// An ordered set based on a red-black tree.
///
/// # Example
///
/// ```rust
/// use rb_ordered_map::RbSet;
///
/// let mut set = RbSet::new();
/// assert!(set.insert(10));
/// assert!(set.insert(5));
/// assert!(!set.insert(10));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![5, 10]);
/// ```
#[derive(Clone)]
pub struct RbSet<T, C = Natural<T>, Ix = DefaultIx> {
    tree: RbTree<T, (), C, Ix>,
}

impl<T> RbSet<T>
where
    T: Ord,
{
    /// Creates an empty set ordered according to the natural order of its items.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        RbSet { tree: RbTree::new() }
    }

    /// Creates an empty set with room for `capacity` items.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RbSet {
            tree: RbTree::with_capacity(capacity),
        }
    }
}

impl<T> Default for RbSet<T>
where
    T: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C, Ix> RbSet<T, C, Ix>
where
    Ix: IndexType,
{
    /// Creates an empty set ordered according to the given comparator.
    #[inline]
    #[must_use]
    pub fn with_cmp(cmp: C) -> Self {
        RbSet {
            tree: RbTree::with_cmp(cmp),
        }
    }

    /// Creates an empty set ordered according to the given comparator, with
    /// room for `capacity` items.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_cmp(capacity: usize, cmp: C) -> Self {
        RbSet {
            tree: RbTree::with_capacity_and_cmp(capacity, cmp),
        }
    }

    /// Returns a reference to the set's comparator.
    #[inline]
    pub fn cmp(&self) -> &C {
        self.tree.cmp()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchange the contents of two sets in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Get an iterator over the items of the set, in sorted order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, Ix> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Returns a cursor at the minimum item.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T, (), Ix> {
        self.tree.begin()
    }

    /// Returns a cursor at the past-the-end position.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T, (), Ix> {
        self.tree.end()
    }

    /// Returns the minimum item.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.tree.first_key_value().map(|(k, _)| k)
    }

    /// Returns the maximum item.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.tree.last_key_value().map(|(k, _)| k)
    }
}

impl<T, C, Ix> RbSet<T, C, Ix>
where
    C: Compare<T>,
    Ix: IndexType,
{
    /// Adds an item to the set, returning whether it was newly inserted.
    ///
    /// # Panics
    ///
    /// This method panics when the set is at the maximum number of nodes for its index
    #[inline]
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert_or_panic(value, ()).1
    }

    /// Adds an item to the set, reporting capacity and allocation failures.
    /// On error the set is unchanged.
    #[inline]
    pub fn try_insert(&mut self, value: T) -> Result<bool, Error> {
        Ok(self.tree.insert_inner(value, ())?.1)
    }

    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.tree.contains_key(value)
    }

    /// Return 1 if the set holds `value`, 0 otherwise.
    #[inline]
    pub fn count(&self, value: &T) -> usize {
        usize::from(self.contains(value))
    }

    /// Returns the stored item equal to `value`.
    #[inline]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.tree.find(value).key()
    }

    /// Removes an item from the set, returning whether it was present.
    #[inline]
    pub fn remove(&mut self, value: &T) -> bool {
        self.tree.erase(value)
    }

    /// Removes and returns the stored item equal to `value`.
    #[inline]
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.tree.remove(value).map(|(k, _)| k)
    }

    /// Remove every item that falls in `range`, returning how many were removed.
    #[inline]
    pub fn remove_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<T>,
    {
        self.tree.remove_range(range)
    }

    #[inline]
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first().map(|(k, _)| k)
    }

    #[inline]
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last().map(|(k, _)| k)
    }

    /// Returns a cursor at `value`, or at the end position.
    #[inline]
    #[must_use]
    pub fn find(&self, value: &T) -> Cursor<'_, T, (), Ix> {
        self.tree.find(value)
    }

    /// Returns a cursor at the first item not less than `value`.
    #[inline]
    #[must_use]
    pub fn lower_bound(&self, value: &T) -> Cursor<'_, T, (), Ix> {
        self.tree.lower_bound(value)
    }

    /// Returns a cursor at the first item greater than `value`.
    #[inline]
    #[must_use]
    pub fn upper_bound(&self, value: &T) -> Cursor<'_, T, (), Ix> {
        self.tree.upper_bound(value)
    }

    #[inline]
    #[must_use]
    pub fn equal_range(&self, value: &T) -> (Cursor<'_, T, (), Ix>, Cursor<'_, T, (), Ix>) {
        (self.lower_bound(value), self.upper_bound(value))
    }

    /// Get an iterator over the items that fall in `range`, in sorted order.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbSet;
    ///
    /// let set: RbSet<_> = [3, 5, 10, 15, 20].into_iter().collect();
    /// assert_eq!(set.range(5..15).copied().collect::<Vec<_>>(), vec![5, 10]);
    /// assert_eq!(set.range(..).rev().next(), Some(&20));
    /// ```
    #[inline]
    pub fn range<R>(&self, range: R) -> Range<'_, T, Ix>
    where
        R: RangeBounds<T>,
    {
        Range {
            inner: self.tree.range(range),
        }
    }
}

impl<T, C, Ix> PartialEq for RbSet<T, C, Ix>
where
    T: PartialEq,
    Ix: IndexType,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, C, Ix> Eq for RbSet<T, C, Ix>
where
    T: Eq,
    Ix: IndexType,
{
}

impl<T, C, Ix> PartialOrd for RbSet<T, C, Ix>
where
    T: PartialOrd,
    Ix: IndexType,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T, C, Ix> Ord for RbSet<T, C, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T, C, Ix> fmt::Debug for RbSet<T, C, Ix>
where
    T: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for RbSet<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = RbSet::new();
        set.extend(iter);
        set
    }
}

impl<T, C, Ix> Extend<T> for RbSet<T, C, Ix>
where
    C: Compare<T>,
    Ix: IndexType,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            let _ignore = self.insert(value);
        }
    }
}

impl<'a, T, C, Ix> IntoIterator for &'a RbSet<T, C, Ix>
where
    Ix: IndexType,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C, Ix> IntoIterator for RbSet<T, C, Ix>
where
    Ix: IndexType,
{
    type Item = T;
    type IntoIter = IntoIter<T, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

/// An iterator over the items of a `RbSet`, in sorted order.
pub struct Iter<'a, T, Ix = DefaultIx> {
    inner: cursor::Iter<'a, T, (), Ix>,
}

impl<'a, T, Ix: IndexType> Iterator for Iter<'a, T, Ix> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, Ix: IndexType> DoubleEndedIterator for Iter<'_, T, Ix> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<T, Ix: IndexType> ExactSizeIterator for Iter<'_, T, Ix> {}

impl<T, Ix: IndexType> FusedIterator for Iter<'_, T, Ix> {}

impl<T, Ix: Copy> Clone for Iter<'_, T, Ix> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over a sub-range of the items of a `RbSet`.
pub struct Range<'a, T, Ix = DefaultIx> {
    inner: cursor::Range<'a, T, (), Ix>,
}

impl<'a, T, Ix: IndexType> Iterator for Range<'a, T, Ix> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<T, Ix: IndexType> DoubleEndedIterator for Range<'_, T, Ix> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<T, Ix: IndexType> FusedIterator for Range<'_, T, Ix> {}

/// An owning iterator over the items of a `RbSet`, in sorted order.
pub struct IntoIter<T, Ix = DefaultIx> {
    inner: cursor::IntoIter<T, (), Ix>,
}

impl<T, Ix: IndexType> Iterator for IntoIter<T, Ix> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T, Ix: IndexType> DoubleEndedIterator for IntoIter<T, Ix> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<T, Ix: IndexType> ExactSizeIterator for IntoIter<T, Ix> {}

impl<T, Ix: IndexType> FusedIterator for IntoIter<T, Ix> {}
