//! In-order iterators over an [`OrderedMap`](super::OrderedMap).
//!
//! Each iterator keeps an explicit stack of nodes whose `less` subtree has
//! been entered but whose entry has not been yielded yet. The stack never
//! holds more than `height` nodes.

use std::iter::FusedIterator;

use super::node::{Link, Node, release};

// =============================================================================
// Iter
// =============================================================================

/// An iterator over the entries of an [`OrderedMap`](super::OrderedMap), in
/// ascending key order.
pub struct Iter<'a, K, V> {
    pending: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: &'a Link<K, V>, length: usize) -> Self {
        let mut iter = Self {
            pending: Vec::new(),
            remaining: length,
        };
        iter.descend(root.as_deref());
        iter
    }

    fn descend(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.pending.push(current);
            node = current.less.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.pending.pop()?;
        self.descend(node.greater.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            pending: self.pending.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// IterMut
// =============================================================================

/// An entry whose `less` subtree is being visited: its key, its value and its
/// not yet visited `greater` subtree.
type PendingMut<'a, K, V> = (&'a K, &'a mut V, Option<&'a mut Node<K, V>>);

/// A mutable iterator over the entries of an
/// [`OrderedMap`](super::OrderedMap), in ascending key order.
pub struct IterMut<'a, K, V> {
    pending: Vec<PendingMut<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(root: &'a mut Link<K, V>, length: usize) -> Self {
        let mut iter = Self {
            pending: Vec::new(),
            remaining: length,
        };
        iter.descend(root.as_deref_mut());
        iter
    }

    fn descend(&mut self, mut node: Option<&'a mut Node<K, V>>) {
        while let Some(current) = node {
            let Node {
                key,
                value,
                less,
                greater,
            } = current;
            self.pending.push((&*key, value, greater.as_deref_mut()));
            node = less.as_deref_mut();
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value, greater) = self.pending.pop()?;
        self.descend(greater);
        self.remaining = self.remaining.saturating_sub(1);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

// =============================================================================
// IntoIter
// =============================================================================

/// An owning iterator over the entries of an
/// [`OrderedMap`](super::OrderedMap), in ascending key order.
///
/// Nodes are freed as their entries are yielded. Dropping the iterator early
/// frees the rest without recursion.
pub struct IntoIter<K, V> {
    pending: Vec<Box<Node<K, V>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>, length: usize) -> Self {
        let mut iter = Self {
            pending: Vec::new(),
            remaining: length,
        };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.less.take();
            self.pending.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.pending.pop()?;
        self.descend(node.greater.take());
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.into_entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        for node in self.pending.drain(..) {
            release(Some(node));
        }
    }
}

// =============================================================================
// Projections
// =============================================================================

/// An iterator over the keys of an [`OrderedMap`](super::OrderedMap), in
/// ascending order.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of an [`OrderedMap`](super::OrderedMap), in
/// ascending key order.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of an
/// [`OrderedMap`](super::OrderedMap), in ascending key order.
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
