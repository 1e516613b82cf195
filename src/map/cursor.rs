//! Cursors: handles to a located entry, or to the end of the map.
//!
//! A cursor borrows the map it was obtained from. Structural mutation
//! (`insert`, `remove`, `clear`) needs `&mut OrderedMap`, so the borrow checker
//! rejects any use of a cursor after the tree it points into has changed.

use std::fmt;
use std::mem;
use std::ptr;

use super::node::Node;
use crate::error::CursorError;

/// A read-only handle to an entry of an [`OrderedMap`](super::OrderedMap).
///
/// A cursor is either positioned on an entry or is the end cursor. Two cursors
/// compare equal when they refer to the same entry or are both at the end.
///
/// # Examples
///
/// ```rust
/// use bstmap::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("abc", "bcd");
/// map.insert("xyz", "uvw");
///
/// let cursor = map.get("abc");
/// assert!(cursor != map.end());
/// assert_eq!(cursor.key(), Some(&"abc"));
/// assert_eq!(cursor.value(), Some(&"bcd"));
///
/// assert!(map.get("abce") == map.end());
/// ```
pub struct Cursor<'a, K, V> {
    node: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) const fn new(node: Option<&'a Node<K, V>>) -> Self {
        Self { node }
    }

    /// Returns `true` if this cursor does not refer to an entry.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Returns the key of the entry, or `None` for the end cursor.
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.node.map(|node| &node.key)
    }

    /// Returns the value of the entry, or `None` for the end cursor.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.node.map(|node| &node.value)
    }

    /// Returns the key and value of the entry, or `None` for the end cursor.
    #[inline]
    #[must_use]
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        self.node.map(|node| (&node.key, &node.value))
    }

    /// Returns the key and value of the entry.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfMap`] if this is the end cursor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::{CursorError, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "one");
    ///
    /// assert_eq!(map.get(&1).entry(), Ok((&1, &"one")));
    /// assert_eq!(
    ///     map.get(&2).entry(),
    ///     Err(CursorError::EndOfMap { operation: "entry" })
    /// );
    /// ```
    pub fn entry(&self) -> Result<(&'a K, &'a V), CursorError> {
        self.key_value()
            .ok_or(CursorError::EndOfMap { operation: "entry" })
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        match (self.node, other.node) {
            (Some(left), Some(right)) => ptr::eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Some(node) => formatter
                .debug_struct("Cursor")
                .field("key", &node.key)
                .field("value", &node.value)
                .finish(),
            None => formatter.write_str("Cursor(end)"),
        }
    }
}

/// A handle to an entry of an [`OrderedMap`](super::OrderedMap) with write
/// access to the value.
///
/// Keys are never writable: changing a key in place could break the ordering
/// of the tree.
///
/// # Examples
///
/// ```rust
/// use bstmap::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert(7, 4);
///
/// if let Some(value) = map.get_mut(&7).value_mut() {
///     *value += 1;
/// }
/// assert_eq!(map.get(&7).value(), Some(&5));
/// ```
pub struct CursorMut<'a, K, V> {
    node: Option<&'a mut Node<K, V>>,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(crate) const fn new(node: Option<&'a mut Node<K, V>>) -> Self {
        Self { node }
    }

    /// Returns `true` if this cursor does not refer to an entry.
    #[inline]
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Returns the key of the entry, or `None` for the end cursor.
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.node.as_deref().map(|node| &node.key)
    }

    /// Returns the value of the entry, or `None` for the end cursor.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&V> {
        self.node.as_deref().map(|node| &node.value)
    }

    /// Returns a mutable reference to the value, or `None` for the end cursor.
    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.node.as_deref_mut().map(|node| &mut node.value)
    }

    /// Converts the cursor into a mutable reference to the value that lives
    /// as long as the borrow of the map.
    #[inline]
    #[must_use]
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        self.node.map(|node| &mut node.value)
    }

    /// Returns the key and a mutable reference to the value.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfMap`] if this is the end cursor.
    pub fn entry_mut(&mut self) -> Result<(&K, &mut V), CursorError> {
        match self.node.as_deref_mut() {
            Some(node) => Ok((&node.key, &mut node.value)),
            None => Err(CursorError::EndOfMap {
                operation: "entry_mut",
            }),
        }
    }

    /// Replaces the value of the entry and returns the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfMap`] if this is the end cursor; `value` is
    /// dropped in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bstmap::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("key", 1);
    ///
    /// assert_eq!(map.get_mut("key").replace(2), Ok(1));
    /// assert_eq!(map.get("key").value(), Some(&2));
    /// assert!(map.get_mut("missing").replace(3).is_err());
    /// ```
    pub fn replace(&mut self, value: V) -> Result<V, CursorError> {
        match self.node.as_deref_mut() {
            Some(node) => Ok(mem::replace(&mut node.value, value)),
            None => Err(CursorError::EndOfMap {
                operation: "replace",
            }),
        }
    }

    /// Returns a read-only cursor on the same entry.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.node.as_deref())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CursorMut<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.as_deref() {
            Some(node) => formatter
                .debug_struct("CursorMut")
                .field("key", &node.key)
                .field("value", &node.value)
                .finish(),
            None => formatter.write_str("CursorMut(end)"),
        }
    }
}
