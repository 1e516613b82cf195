//! Error types for cursor access.
//!
//! Map operations themselves never fail: inserting a duplicate key, removing
//! an absent key and looking up an absent key all have defined outcomes. The
//! only misuse is reading an entry through a cursor that is positioned at the
//! end of the map, which [`CursorError`] describes.

/// Represents an attempt to read an entry through an end cursor.
///
/// # Examples
///
/// ```rust
/// use bstmap::{CursorError, OrderedMap};
///
/// let map: OrderedMap<i32, &str> = OrderedMap::new();
/// let error = map.get(&1).entry().unwrap_err();
/// assert_eq!(error, CursorError::EndOfMap { operation: "entry" });
/// assert_eq!(
///     format!("{error}"),
///     "entry: cursor is positioned at the end of the map and has no entry"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The cursor does not refer to an entry.
    EndOfMap {
        /// The name of the accessor that was called.
        operation: &'static str,
    },
}

impl std::fmt::Display for CursorError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndOfMap { operation } => write!(
                formatter,
                "{operation}: cursor is positioned at the end of the map and has no entry"
            ),
        }
    }
}

impl std::error::Error for CursorError {}
