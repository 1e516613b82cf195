//! # bstmap
//!
//! A minimal ordered map backed by an unbalanced binary search tree.
//!
//! ## Overview
//!
//! [`OrderedMap`] maps unique, totally ordered keys to values and supports
//! insertion, lookup, deletion and in-order iteration. It is intended for
//! embedders that want a small, dependency-light ordered map whose behavior
//! is easy to audit.
//!
//! - **Lookup** returns a [`Cursor`], a handle that is either positioned on an
//!   entry or at the end of the map.
//! - **Insertion** of an existing key is a no-op: the first value wins.
//! - **Removal** of a node with two children uses minimum extraction from the
//!   greater subtree.
//! - **Iteration** yields entries in ascending key order.
//!
//! The tree performs no rebalancing, so operations are O(height) and the
//! height is O(n) in the worst case (for example, keys inserted in sorted
//! order). See [`OrderedMap::height`].
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`OrderedMap`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use bstmap::prelude::*;
//!
//! let mut map = OrderedMap::new();
//! map.insert(7, "seven");
//! map.insert(3, "three");
//! map.insert(9, "nine");
//!
//! assert_eq!(map.size(), 3);
//! assert_eq!(map.get(&3).value(), Some(&"three"));
//!
//! map.remove(&7);
//! assert!(map.get(&7) == map.end());
//!
//! let keys: Vec<i32> = map.keys().copied().collect();
//! assert_eq!(keys, vec![3, 9]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use bstmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::CursorError;
    pub use crate::map::{Cursor, CursorMut, OrderedMap};
}

pub mod error;
pub mod map;

pub use error::CursorError;
pub use map::OrderedMap;
