use crate::index::{IndexType, NodeIndex};

/// Node of the red-black tree
///
/// Real nodes always carry a key and a value. The sentinel at
/// `NodeIndex::sentinel()` carries neither, is always black and has all of
/// its links pointing back at itself.
#[derive(Debug, Clone)]
pub struct Node<K, V, Ix> {
    /// Left children
    pub left: NodeIndex<Ix>,
    /// Right children
    pub right: NodeIndex<Ix>,
    /// Parent
    pub parent: NodeIndex<Ix>,
    /// Color of the node
    pub color: Color,

    /// Key of the node
    pub key: Option<K>,
    /// Value of the node
    pub value: Option<V>,
}

impl<K, V, Ix> Node<K, V, Ix>
where
    Ix: IndexType,
{
    /// Create the sentinel node
    pub fn new_sentinel() -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent: NodeIndex::sentinel(),
            color: Color::Black,
            key: None,
            value: None,
        }
    }

    /// Create a new red node below `parent` with both children pointing at the sentinel
    pub fn new(key: K, value: V, parent: NodeIndex<Ix>) -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent,
            color: Color::Red,
            key: Some(key),
            value: Some(value),
        }
    }
}

// Convenient getter/setter methods
impl<K, V, Ix> Node<K, V, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    /// # Panics
    ///
    /// Panics on the sentinel, which has no key.
    pub fn key(&self) -> &K {
        self.key.as_ref().expect("sentinel node has no key")
    }

    /// # Panics
    ///
    /// Panics on the sentinel, which has no value.
    pub fn value(&self) -> &V {
        self.value.as_ref().expect("sentinel node has no value")
    }

    pub fn value_mut(&mut self) -> &mut V {
        self.value.as_mut().expect("sentinel node has no value")
    }

    pub fn key_value(&self) -> Option<(&K, &V)> {
        self.key.as_ref().zip(self.value.as_ref())
    }

    /// Consume a detached node, returning its payload.
    ///
    /// # Panics
    ///
    /// Panics on the sentinel, which has no payload.
    pub fn into_entry(self) -> (K, V) {
        match (self.key, self.value) {
            (Some(key), Some(value)) => (key, value),
            _ => panic!("sentinel node has no entry"),
        }
    }

    /// Move the payload out, leaving the links untouched.
    pub fn take_entry(&mut self) -> Option<(K, V)> {
        self.key.take().zip(self.value.take())
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.color = color;
        }
    }

    pub fn set_left(left: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.left = left;
        }
    }

    pub fn set_right(right: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.right = right;
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.parent = parent;
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}
