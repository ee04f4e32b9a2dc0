use std::fmt;

use compare::Compare;

use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::tree::RbTree;

/// A view into a single entry in a map, which may either be vacant or occupied.
pub enum Entry<'a, K, V, C, Ix> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, C, Ix>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, C, Ix>),
}

/// A view into an occupied entry in a `RbMap`.
/// It is part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, V, C, Ix> {
    /// Mutable reference to the tree
    pub(crate) tree: &'a mut RbTree<K, V, C, Ix>,
    /// The entry node
    pub(crate) node: NodeIndex<Ix>,
}

/// A view into a vacant entry in a `RbMap`.
/// It is part of the [`Entry`] enum.
pub struct VacantEntry<'a, K, V, C, Ix> {
    /// Mutable reference to the tree
    pub(crate) tree: &'a mut RbTree<K, V, C, Ix>,
    /// The key of this entry
    pub(crate) key: K,
}

impl<'a, K, V, C, Ix> Entry<'a, K, V, C, Ix>
where
    C: Compare<K>,
    Ix: IndexType,
{
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, RbMap};
    ///
    /// let mut map = RbMap::new();
    /// assert!(matches!(map.entry(1), Entry::Vacant(_)));
    /// map.entry(1).or_insert(3);
    /// assert!(matches!(map.entry(1), Entry::Occupied(_)));
    /// assert_eq!(map.get(&1), Some(&3));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of `default`
    /// if empty, and returns a mutable reference to the value in the entry.
    #[inline]
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::RbMap;
    ///
    /// let mut map = RbMap::new();
    ///
    /// map.insert(6, 3);
    /// map.entry(6).and_modify(|v| *v += 1);
    /// assert_eq!(map.get(&6), Some(&4));
    /// ```
    #[inline]
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V, C, Ix> Entry<'a, K, V, C, Ix>
where
    C: Compare<K>,
    V: Default,
    Ix: IndexType,
{
    /// Ensures a value is in the entry by inserting `V::default()` if empty,
    /// and returns a mutable reference to the value in the entry.
    #[inline]
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

impl<'a, K, V, C, Ix> OccupiedEntry<'a, K, V, C, Ix>
where
    C: Compare<K>,
    Ix: IndexType,
{
    /// Gets a reference to the key in the entry.
    #[inline]
    pub fn key(&self) -> &K {
        self.tree.node_ref(self.node, Node::key)
    }

    /// Gets a reference to the value in the entry.
    #[inline]
    pub fn get(&self) -> &V {
        self.tree.node_ref(self.node, Node::value)
    }

    /// Gets a mutable reference to the value in the entry.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        self.tree.node_mut(self.node, Node::value_mut)
    }

    /// Converts the entry into a mutable reference to its value.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        let tree = self.tree;
        tree.node_mut(self.node, Node::value_mut)
    }

    /// Sets the value of the entry, returning the old value.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        std::mem::replace(self.get_mut(), value)
    }

    /// Takes the value out of the entry, removing it from the map.
    #[inline]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Takes the key and value out of the entry, removing it from the map.
    #[inline]
    pub fn remove_entry(self) -> (K, V) {
        self.tree.remove_inner(self.node)
    }
}

impl<'a, K, V, C, Ix> VacantEntry<'a, K, V, C, Ix>
where
    C: Compare<K>,
    Ix: IndexType,
{
    /// Gets a reference to the key that would be used when inserting.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry, returning a mutable reference to it.
    ///
    /// # Panics
    ///
    /// This method panics when the map is at the maximum number of nodes
    /// for its index.
    #[inline]
    pub fn insert(self, value: V) -> &'a mut V {
        let tree = self.tree;
        let (node, _) = tree.insert_or_panic(self.key, value);
        tree.node_mut(node, Node::value_mut)
    }
}

impl<K, V, C, Ix> fmt::Debug for Entry<'_, K, V, C, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Compare<K>,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Occupied(entry) => f.debug_tuple("Entry").field(entry).finish(),
            Entry::Vacant(entry) => f.debug_tuple("Entry").field(entry).finish(),
        }
    }
}

impl<K, V, C, Ix> fmt::Debug for OccupiedEntry<'_, K, V, C, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Compare<K>,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry")
            .field("key", self.key())
            .field("value", self.get())
            .finish()
    }
}

impl<K, V, C, Ix> fmt::Debug for VacantEntry<'_, K, V, C, Ix>
where
    K: fmt::Debug,
    C: Compare<K>,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VacantEntry").field(self.key()).finish()
    }
}
