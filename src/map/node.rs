//! Tree nodes and the structural primitives shared by the map and its
//! iterators.
//!
//! Every node is exclusively owned by the link that points at it: the map's
//! root link or one of its parent's two child links. Nothing here recurses
//! over the tree, so list-shaped trees of any height are handled without
//! growing the call stack.

/// An owning, possibly empty, child slot.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// Internal node of the search tree.
///
/// Every key in `less` is strictly smaller than `key` and every key in
/// `greater` is strictly larger, transitively.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) less: Link<K, V>,
    pub(crate) greater: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a node with no children.
    pub(crate) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            less: None,
            greater: None,
        }
    }

    /// Consumes a detached node and returns its entry.
    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Unlinks the minimum node of the subtree rooted at `link`.
///
/// The minimum node's `greater` child takes its place, so the subtree stays
/// ordered. Returns `None` when the subtree is empty.
pub(crate) fn take_min<K, V>(mut link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    while link.as_ref()?.less.is_some() {
        link = &mut link.as_mut()?.less;
    }
    let mut minimum = link.take()?;
    *link = minimum.greater.take();
    Some(minimum)
}

/// Frees every node reachable from `link` and returns how many were freed.
pub(crate) fn release<K, V>(link: Link<K, V>) -> usize {
    let mut pending: Vec<Box<Node<K, V>>> = link.into_iter().collect();
    let mut released = 0;
    while let Some(mut node) = pending.pop() {
        pending.extend(node.less.take());
        pending.extend(node.greater.take());
        released += 1;
    }
    released
}

/// Number of nodes on the longest root-to-leaf path.
pub(crate) fn height<K, V>(link: &Link<K, V>) -> usize {
    let mut level: Vec<&Node<K, V>> = link.as_deref().into_iter().collect();
    let mut height = 0;
    while !level.is_empty() {
        height += 1;
        level = level
            .into_iter()
            .flat_map(|node| node.less.as_deref().into_iter().chain(node.greater.as_deref()))
            .collect();
    }
    height
}

/// Deep-copies the subtree rooted at `link`, preserving its shape.
pub(crate) fn clone_tree<K: Clone, V: Clone>(link: &Link<K, V>) -> Link<K, V> {
    enum Visit<'a, K, V> {
        Enter(&'a Link<K, V>),
        Build(&'a Node<K, V>),
    }

    let mut work = vec![Visit::Enter(link)];
    // Subtrees that are finished but not yet attached to a parent.
    let mut built: Vec<Link<K, V>> = Vec::new();

    while let Some(visit) = work.pop() {
        match visit {
            Visit::Enter(link) => match link.as_deref() {
                None => built.push(None),
                Some(node) => {
                    work.push(Visit::Build(node));
                    work.push(Visit::Enter(&node.greater));
                    work.push(Visit::Enter(&node.less));
                }
            },
            Visit::Build(node) => {
                let greater = built.pop().flatten();
                let less = built.pop().flatten();
                built.push(Some(Box::new(Node {
                    key: node.key.clone(),
                    value: node.value.clone(),
                    less,
                    greater,
                })));
            }
        }
    }

    built.pop().flatten()
}
