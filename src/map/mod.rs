//! Ordered map based on an unbalanced binary search tree.
//!
//! This module provides [`OrderedMap`], a mutable ordered map in which every
//! node exclusively owns its two children.
//!
//! # Overview
//!
//! - O(height) get
//! - O(height) insert
//! - O(height) remove
//! - O(height) min/max
//! - O(1) len and `is_empty`
//!
//! No rebalancing is performed. The height is O(log N) for keys inserted in
//! random order and O(N) for keys inserted in sorted order.
//!
//! # Examples
//!
//! ```rust
//! use bstmap::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert(2, "two");
//! map.insert(1, "one");
//! map.insert(5, "five");
//!
//! // Entries are always yielded in sorted order
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &5]);
//! ```
//!
//! # Internal Structure
//!
//! The tree maintains the following invariants:
//! 1. Every key in a node's `less` subtree is strictly smaller than its key
//! 2. Every key in a node's `greater` subtree is strictly larger than its key
//! 3. The stored length equals the number of nodes reachable from the root

mod cursor;
mod iter;
mod node;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

use log::trace;

pub use cursor::{Cursor, CursorMut};
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};

use node::{Link, Node};

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// An ordered map backed by an unbalanced binary search tree.
///
/// Keys must implement `Ord`. Each key is stored at most once; inserting a key
/// that is already present leaves the map unchanged.
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `new`          | O(1)              |
/// | `get`          | O(height)         |
/// | `insert`       | O(height)         |
/// | `remove`       | O(height)         |
/// | `contains_key` | O(height)         |
/// | `min`/`max`    | O(height)         |
/// | `iter`         | O(N) in total     |
/// | `len`/`size`   | O(1)              |
/// | `height`       | O(N)              |
///
/// # Cursor validity
///
/// [`get`](Self::get), [`begin`](Self::begin) and [`end`](Self::end) return a
/// [`Cursor`] that borrows the map. Because `insert` and `remove` take
/// `&mut self`, a cursor can never be used after the tree was structurally
/// modified.
///
/// # Concurrency
///
/// `OrderedMap` is `Send` and `Sync` when its keys and values are. It has no
/// internal synchronization; sharing it between threads for mutation needs an
/// external lock.
///
/// # Examples
///
/// ```rust
/// use bstmap::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert(7, 4);
/// map.insert(3, 4);
/// map.insert(9, 4);
/// assert_eq!(map.size(), 3);
/// assert_eq!(map.get(&3).value(), Some(&4));
///
/// map.remove(&7);
/// assert_eq!(map.size(), 2);
/// assert!(map.get(&7) == map.end());
/// assert_eq!(map.get(&9).value(), Some(&4));
/// ```
pub struct OrderedMap<K, V> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<i32, String> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns the number of entries in the map.
    ///
    /// This is an alias for [`len`](Self::len).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, 4);
    /// map.insert(1, 5);
    /// assert_eq!(map.size(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf, or 0 for an empty map.
    ///
    /// The tree is not rebalanced, so keys inserted in sorted order produce a
    /// height equal to the number of entries.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let ascending: OrderedMap<i32, ()> = (1..=6).map(|key| (key, ())).collect();
    /// assert_eq!(ascending.height(), 6);
    ///
    /// let mixed: OrderedMap<i32, ()> = [4, 2, 6, 1, 3, 5, 7].into_iter().map(|key| (key, ())).collect();
    /// assert_eq!(mixed.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Removes every entry from the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32> = (0..10).map(|key| (key, key)).collect();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert!(map.begin() == map.end());
    /// ```
    pub fn clear(&mut self) {
        let released = node::release(self.root.take());
        trace!("cleared map, released {released} nodes");
        self.length = 0;
    }

    /// Returns a cursor on the entry with the smallest key, or the end cursor
    /// if the map is empty.
    ///
    /// `map.begin() == map.end()` holds exactly when the map is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.begin() == map.end());
    ///
    /// map.insert(5, 5);
    /// map.insert(3, 5);
    /// assert!(map.begin() != map.end());
    /// assert_eq!(map.begin().key(), Some(&3));
    /// ```
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.first_node())
    }

    /// Returns the end cursor, which refers to no entry.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> Cursor<'_, K, V> {
        Cursor::new(None)
    }

    /// Returns the entry with the minimum key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<i32, &str> = [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(map.min(), Some((&1, &"one")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        self.first_node().map(|node| (&node.key, &node.value))
    }

    /// Returns the entry with the maximum key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<i32, &str> = [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    /// assert_eq!(map.max(), Some((&3, &"three")));
    /// ```
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(greater) = node.greater.as_deref() {
            node = greater;
        }
        Some((&node.key, &node.value))
    }

    fn first_node(&self) -> Option<&Node<K, V>> {
        let mut node = self.root.as_deref()?;
        while let Some(less) = node.less.as_deref() {
            node = less;
        }
        Some(node)
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// The iterator is lazy: it holds at most `height` pending nodes and
    /// visits each entry exactly once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = [(2, 5), (1, 4), (5, 5)].into_iter().collect();
    /// let entries: Vec<(&i32, &i32)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &4), (&2, &5), (&5, &5)]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.length)
    }

    /// Returns an iterator over entries in ascending key order, with mutable
    /// references to the values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32> = [(1, 10), (2, 20)].into_iter().collect();
    /// for (key, value) in map.iter_mut() {
    ///     *value += key;
    /// }
    /// assert_eq!(map.get(&2).value(), Some(&22));
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.root, self.length)
    }

    /// Returns an iterator over keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over values in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let map: OrderedMap<i32, i32> = [(1, 10), (2, 20), (3, 30)].into_iter().collect();
    /// let sum: i32 = map.values().sum();
    /// assert_eq!(sum, 60);
    /// ```
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values, in
    /// ascending key order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contains the key, the map is left unchanged and the
    /// given key and value are dropped: the first inserted value wins. To
    /// replace a value use [`get_mut`](Self::get_mut), or `remove` followed by
    /// `insert`.
    ///
    /// Returns `true` if a new entry was added.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.insert(1, "one"));
    /// assert!(!map.insert(1, "ONE"));
    ///
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&1).value(), Some(&"one"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut link = &mut self.root;
        let mut depth = 0_usize;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.less,
                Ordering::Greater => &mut node.greater,
                Ordering::Equal => {
                    trace!("insert ignored: key already present at depth {depth}");
                    return false;
                }
            };
            depth += 1;
        }
        *link = Some(Box::new(Node::leaf(key, value)));
        self.length += 1;
        trace!("attached new node at depth {depth}, {} entries", self.length);
        true
    }

    /// Returns a cursor on the entry for `key`, or the end cursor if the key
    /// is absent.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(map.get("hello").value(), Some(&42));
    /// assert!(map.get("world").is_end());
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(self.find(key))
    }

    /// Returns a cursor with write access to the value for `key`, or the end
    /// cursor if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "one".to_string());
    ///
    /// if let Some(value) = map.get_mut(&1).value_mut() {
    ///     value.push('!');
    /// }
    /// assert_eq!(map.get(&1).value().map(String::as_str), Some("one!"));
    /// assert!(map.get_mut(&2).is_end());
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.less.as_deref_mut(),
                Ordering::Greater => node.greater.as_deref_mut(),
                Ordering::Equal => return CursorMut::new(Some(node)),
            };
        }
        CursorMut::new(None)
    }

    /// Returns `true` if the map contains an entry for `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.less.as_deref(),
                Ordering::Greater => node.greater.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Removes the entry for `key` and returns its value.
    ///
    /// Returns `None`, leaving the map unchanged, if the key is absent.
    ///
    /// A node with at most one child is replaced by that child. A node with
    /// two children takes over the entry of the minimum node of its `greater`
    /// subtree, and that node is unlinked instead. Either way exactly one
    /// node is freed.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32, i32> = [(2, 5), (1, 4), (5, 5)].into_iter().collect();
    ///
    /// assert_eq!(map.remove(&0), None);
    /// assert_eq!(map.size(), 3);
    ///
    /// assert_eq!(map.remove(&2), Some(5));
    /// assert_eq!(map.size(), 2);
    /// assert!(map.get(&2).is_end());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry for `key` and returns the stored key and value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("abc".to_string(), "bcd");
    ///
    /// assert_eq!(map.remove_entry("abc"), Some(("abc".to_string(), "bcd")));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let link = Self::find_link(&mut self.root, key)?;
        let entry = Self::unlink(link)?;
        self.length -= 1;
        Some(entry)
    }

    /// Returns the link that owns the node holding `key`.
    fn find_link<'a, Q>(mut link: &'a mut Link<K, V>, key: &Q) -> Option<&'a mut Link<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        loop {
            let ordering = key.cmp(link.as_deref()?.key.borrow());
            if ordering == Ordering::Equal {
                return Some(link);
            }
            let node = link.as_mut()?;
            link = if ordering == Ordering::Less {
                &mut node.less
            } else {
                &mut node.greater
            };
        }
    }

    /// Removes the node owned by `link` and returns its entry.
    fn unlink(link: &mut Link<K, V>) -> Option<(K, V)> {
        let node = link.as_mut()?;
        if node.less.is_some() && node.greater.is_some() {
            let (key, value) = node::take_min(&mut node.greater)?.into_entry();
            trace!("removed node with two children by minimum extraction");
            return Some((
                mem::replace(&mut node.key, key),
                mem::replace(&mut node.value, value),
            ));
        }

        let mut removed = link.take()?;
        *link = removed.less.take().or_else(|| removed.greater.take());
        trace!("removed node by splicing its only child");
        Some(removed.into_entry())
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for OrderedMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    fn drop(&mut self) {
        node::release(self.root.take());
    }
}

impl<K: Clone, V: Clone> Clone for OrderedMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: node::clone_tree(&self.root),
            length: self.length,
        }
    }
}

/// Builds a map by inserting every pair in order.
///
/// When a key occurs more than once, the first occurrence is kept.
///
/// # Examples
///
/// ```rust
/// use bstmap::OrderedMap;
///
/// let map: OrderedMap<i32, &str> = [(1, "first"), (1, "second")].into_iter().collect();
/// assert_eq!(map.get(&1).value(), Some(&"first"));
/// ```
impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let length = mem::take(&mut self.length);
        IntoIter::new(self.root.take(), length)
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut OrderedMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

/// Hashes the length followed by every entry in key order, so maps holding
/// the same entries hash equally regardless of insertion order.
impl<K: Hash, V: Hash> Hash for OrderedMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for OrderedMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for OrderedMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<K, V> OrderedMapVisitor<K, V> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        // Duplicate keys follow insert: the first occurrence is kept.
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for OrderedMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(test)]
mod send_sync_tests {
    use super::*;

    static_assertions::assert_impl_all!(OrderedMap<i32, String>: Send, Sync);
    static_assertions::assert_impl_all!(Cursor<'static, i32, String>: Send, Sync, Copy);
    static_assertions::assert_not_impl_any!(OrderedMap<std::rc::Rc<i32>, i32>: Send, Sync);
}
