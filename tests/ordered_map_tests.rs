//! Unit tests for OrderedMap.

use bstmap::{CursorError, OrderedMap};
use rstest::rstest;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn populated(keys: &[i32]) -> OrderedMap<i32, i32> {
    keys.iter().map(|&key| (key, key * 10)).collect()
}

fn hash_of(map: &OrderedMap<i32, i32>) -> u64 {
    let mut hasher = DefaultHasher::new();
    map.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Basic Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_map() {
    let map: OrderedMap<i32, String> = OrderedMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.size(), 0);
    assert_eq!(map.height(), 0);
}

#[rstest]
fn test_default_creates_empty_map() {
    let map: OrderedMap<i32, String> = OrderedMap::default();
    assert!(map.is_empty());
}

// =============================================================================
// Insert Tests
// =============================================================================

#[rstest]
fn test_insert_an_element_at_the_root() {
    let mut map = OrderedMap::new();
    assert!(map.insert(1, 4));
    assert_eq!(map.size(), 1);
}

#[rstest]
fn test_keys_are_unique() {
    let mut map = OrderedMap::new();
    assert!(map.insert(1, 4));
    assert!(!map.insert(1, 5));
    assert!(!map.insert(1, 6));

    assert_eq!(map.size(), 1);
    assert_eq!(map.get(&1).value(), Some(&4));
}

#[rstest]
#[case::smaller_key(7, 3)]
#[case::greater_key(7, 9)]
fn test_insert_second_element(#[case] first: i32, #[case] second: i32) {
    let mut map = OrderedMap::new();
    map.insert(first, 4);
    map.insert(second, 4);

    assert_eq!(map.size(), 2);
    assert_eq!(map.get(&first).value(), Some(&4));
    assert_eq!(map.get(&second).value(), Some(&4));
}

#[rstest]
fn test_insert_more_than_five_increasing_keys() {
    let mut map = OrderedMap::new();
    for key in 1..=6 {
        map.insert(key, 2);
    }

    assert_eq!(map.size(), 6);
    assert_eq!(map.height(), 6);
    for key in 1..=6 {
        assert_eq!(map.get(&key).value(), Some(&2));
    }
}

#[rstest]
fn test_insert_string_keys() {
    let mut map = OrderedMap::new();
    map.insert("abc".to_string(), "bcd".to_string());
    map.insert("xyz".to_string(), "bcd".to_string());

    assert_eq!(map.size(), 2);
}

#[rstest]
fn test_duplicate_insert_drops_new_value() {
    let mut map = OrderedMap::new();
    map.insert("key".to_string(), vec![1]);
    map.insert("key".to_string(), vec![2, 3]);

    assert_eq!(map.get("key").value(), Some(&vec![1]));
}

// =============================================================================
// Get / Cursor Tests
// =============================================================================

#[rstest]
fn test_get_cursor_of_an_existing_key() {
    let mut map = OrderedMap::new();
    map.insert("abc".to_string(), "bcd".to_string());
    map.insert("xyz".to_string(), "uvw".to_string());

    let cursor = map.get("abc");
    assert!(cursor != map.end());
    assert_eq!(cursor.key().map(String::as_str), Some("abc"));
    assert_eq!(cursor.value().map(String::as_str), Some("bcd"));
}

#[rstest]
fn test_get_cursor_of_a_missing_key() {
    let mut map = OrderedMap::new();
    map.insert("abc".to_string(), "bcd".to_string());
    map.insert("xyz".to_string(), "bcd".to_string());

    let cursor = map.get("abce");
    assert!(cursor == map.end());
    assert!(cursor.is_end());
    assert_eq!(cursor.key_value(), None);
}

#[rstest]
fn test_get_from_empty_map() {
    let map: OrderedMap<String, String> = OrderedMap::new();
    assert!(map.get("abce") == map.end());
}

#[rstest]
fn test_cursors_on_same_entry_are_equal() {
    let map = populated(&[5, 3, 8]);
    assert!(map.get(&3) == map.get(&3));
    assert!(map.get(&3) != map.get(&8));
    assert!(map.begin() == map.get(&3));
}

#[rstest]
fn test_entry_on_end_cursor_is_an_error() {
    let map = populated(&[1]);
    assert_eq!(map.get(&1).entry(), Ok((&1, &10)));
    assert_eq!(
        map.end().entry(),
        Err(CursorError::EndOfMap { operation: "entry" })
    );
}

#[rstest]
fn test_cursor_debug_format() {
    let map = populated(&[1]);
    assert_eq!(format!("{:?}", map.get(&1)), "Cursor { key: 1, value: 10 }");
    assert_eq!(format!("{:?}", map.get(&2)), "Cursor(end)");
}

#[rstest]
fn test_get_mut_updates_value_in_place() {
    let mut map = populated(&[2, 1, 3]);

    {
        let mut cursor = map.get_mut(&1);
        assert_eq!(cursor.key(), Some(&1));
        if let Some(value) = cursor.value_mut() {
            *value = 99;
        }
    }

    assert_eq!(map.get(&1).value(), Some(&99));
    assert_eq!(map.len(), 3);
}

#[rstest]
fn test_get_mut_entry_mut_and_replace() {
    let mut map = populated(&[4]);

    let mut cursor = map.get_mut(&4);
    if let Ok((key, value)) = cursor.entry_mut() {
        *value += *key;
    }
    assert_eq!(cursor.replace(0), Ok(44));
    assert_eq!(cursor.as_cursor().value(), Some(&0));

    let mut missing = map.get_mut(&5);
    assert!(missing.is_end());
    assert_eq!(
        missing.entry_mut().map(|(key, _)| *key),
        Err(CursorError::EndOfMap {
            operation: "entry_mut"
        })
    );
    assert_eq!(
        missing.replace(1),
        Err(CursorError::EndOfMap {
            operation: "replace"
        })
    );
}

#[rstest]
fn test_into_value_mut_outlives_cursor() {
    let mut map = populated(&[1, 2]);
    let value = map.get_mut(&2).into_value_mut();
    if let Some(value) = value {
        *value = 7;
    }
    assert_eq!(map.get(&2).value(), Some(&7));
}

// =============================================================================
// Contains Key Tests
// =============================================================================

#[rstest]
fn test_contains_key() {
    let map = populated(&[1, 2]);
    assert!(map.contains_key(&1));
    assert!(map.contains_key(&2));
    assert!(!map.contains_key(&3));
}

#[rstest]
fn test_contains_key_with_borrow() {
    let mut map = OrderedMap::new();
    map.insert("hello".to_string(), 42);

    assert!(map.contains_key("hello"));
    assert!(!map.contains_key("world"));
}

// =============================================================================
// Remove Tests
// =============================================================================

#[rstest]
fn test_remove_an_existing_value() {
    let mut map = OrderedMap::new();
    map.insert("abc".to_string(), "bcd".to_string());
    map.insert("xyz".to_string(), "uvw".to_string());

    assert!(map.get("abc") != map.end());
    assert_eq!(map.remove("abc"), Some("bcd".to_string()));
    assert!(map.get("abc") == map.end());
    assert_eq!(map.get("xyz").value().map(String::as_str), Some("uvw"));
}

#[rstest]
fn test_size_after_removing_some_elements() {
    let mut map = OrderedMap::new();
    map.insert(2, 5);
    map.insert(1, 4);
    map.insert(5, 5);
    assert_eq!(map.size(), 3);

    map.remove(&0);
    assert_eq!(map.size(), 3);

    map.remove(&2);
    assert_eq!(map.size(), 2);

    map.remove(&1);
    assert_eq!(map.size(), 1);

    map.remove(&5);
    assert_eq!(map.size(), 0);

    map.remove(&5);
    assert_eq!(map.size(), 0);
}

#[rstest]
fn test_remove_root_keeps_children_reachable() {
    let mut map = OrderedMap::new();
    map.insert(7, 4);
    map.insert(3, 4);
    map.insert(9, 4);
    assert_eq!(map.size(), 3);
    assert_eq!(map.get(&3).value(), Some(&4));

    assert_eq!(map.remove(&7), Some(4));
    assert_eq!(map.size(), 2);
    assert!(map.get(&7) == map.end());
    assert_eq!(map.get(&3).value(), Some(&4));
    assert_eq!(map.get(&9).value(), Some(&4));
}

#[rstest]
fn test_remove_from_empty_map() {
    let mut map: OrderedMap<i32, i32> = OrderedMap::new();
    assert_eq!(map.remove(&1), None);
    assert!(map.is_empty());
}

#[rstest]
fn test_remove_last_entry() {
    let mut map = populated(&[1]);
    assert_eq!(map.remove(&1), Some(10));
    assert!(map.is_empty());
    assert!(map.begin() == map.end());
}

#[rstest]
#[case::leaf(3)]
#[case::one_child(8)]
#[case::two_children(5)]
#[case::root_of_less_subtree(2)]
fn test_remove_node_shapes(#[case] removed: i32) {
    //         5
    //       /   \
    //      2     8
    //     / \     \
    //    1   3     9
    let mut map = populated(&[5, 2, 8, 1, 3, 9]);

    assert_eq!(map.remove(&removed), Some(removed * 10));
    assert_eq!(map.len(), 5);
    assert!(map.get(&removed).is_end());

    let expected: Vec<i32> = [1, 2, 3, 5, 8, 9]
        .into_iter()
        .filter(|&key| key != removed)
        .collect();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), expected);
}

#[rstest]
fn test_remove_entry_returns_stored_key() {
    let mut map = OrderedMap::new();
    map.insert("hello".to_string(), 42);

    assert_eq!(map.remove_entry("hello"), Some(("hello".to_string(), 42)));
    assert_eq!(map.remove_entry("hello"), None);
}

#[rstest]
fn test_many_insertions_and_deletions() {
    let mut map: OrderedMap<i32, i32> = OrderedMap::new();

    for i in 0..500 {
        map.insert((i * 7) % 500, i);
    }
    for i in (0..500).step_by(2) {
        map.remove(&i);
    }

    assert_eq!(map.len(), 250);
    for i in 0..500 {
        assert_eq!(map.contains_key(&i), i % 2 == 1);
    }
}

// =============================================================================
// Clear Tests
// =============================================================================

#[rstest]
fn test_clear_then_reuse() {
    let mut map = populated(&[3, 1, 2]);
    map.clear();

    assert!(map.is_empty());
    assert!(map.get(&1).is_end());

    map.insert(4, 40);
    assert_eq!(map.len(), 1);
    assert_eq!(map.min(), Some((&4, &40)));
}

// =============================================================================
// Min / Max Tests
// =============================================================================

#[rstest]
fn test_min_and_max() {
    let map = populated(&[5, 3, 8, 1, 9]);
    assert_eq!(map.min(), Some((&1, &10)));
    assert_eq!(map.max(), Some((&9, &90)));
}

#[rstest]
fn test_min_and_max_on_empty_map() {
    let map: OrderedMap<i32, i32> = OrderedMap::new();
    assert_eq!(map.min(), None);
    assert_eq!(map.max(), None);
}

#[rstest]
fn test_min_after_remove_min() {
    let mut map = populated(&[5, 3, 8, 1]);
    map.remove(&1);
    assert_eq!(map.min(), Some((&3, &30)));
}

// =============================================================================
// Iterator Tests
// =============================================================================

#[rstest]
fn test_begin_equals_end_when_empty() {
    let map: OrderedMap<i32, i32> = OrderedMap::new();
    assert!(map.end() == map.begin());
}

#[rstest]
fn test_begin_differs_from_end_when_not_empty() {
    let mut map = OrderedMap::new();
    map.insert(3, 5);
    map.insert(5, 5);
    assert!(map.end() != map.begin());
}

#[rstest]
fn test_iter_returns_entries_in_sorted_order() {
    let map = populated(&[2, 1, 5]);
    let entries: Vec<(&i32, &i32)> = map.iter().collect();
    assert_eq!(entries, vec![(&1, &10), (&2, &20), (&5, &50)]);
}

#[rstest]
fn test_iter_empty_map() {
    let map: OrderedMap<i32, i32> = OrderedMap::new();
    assert_eq!(map.iter().next(), None);
}

#[rstest]
fn test_iter_is_restartable() {
    let map = populated(&[4, 2, 6]);
    let first: Vec<_> = map.iter().collect();
    let second: Vec<_> = map.iter().collect();
    assert_eq!(first, second);
}

#[rstest]
fn test_iter_size_hint_and_exact_size() {
    let map = populated(&[4, 2, 6, 1]);
    let mut iter = map.iter();
    assert_eq!(iter.size_hint(), (4, Some(4)));
    iter.next();
    assert_eq!(iter.len(), 3);
    iter.by_ref().for_each(drop);
    assert_eq!(iter.len(), 0);
    assert_eq!(iter.next(), None);
}

#[rstest]
fn test_keys_and_values() {
    let map = populated(&[3, 1, 2]);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(map.values().sum::<i32>(), 60);
}

#[rstest]
fn test_iter_mut_and_values_mut() {
    let mut map = populated(&[3, 1, 2]);

    for (key, value) in &mut map {
        *value += *key;
    }
    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![11, 22, 33]);

    for value in map.values_mut() {
        *value = 0;
    }
    assert!(map.values().all(|&value| value == 0));
}

#[rstest]
fn test_into_iter_yields_owned_entries_in_order() {
    let mut map = OrderedMap::new();
    map.insert("b".to_string(), 2);
    map.insert("c".to_string(), 3);
    map.insert("a".to_string(), 1);

    let entries: Vec<(String, i32)> = map.into_iter().collect();
    assert_eq!(
        entries,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );
}

#[rstest]
fn test_into_iter_partial_consumption() {
    let map = populated(&[5, 3, 8, 1, 4]);
    let mut iter = map.into_iter();
    assert_eq!(iter.next(), Some((1, 10)));
    assert_eq!(iter.next(), Some((3, 30)));
    assert_eq!(iter.len(), 3);
}

#[rstest]
fn test_ref_into_iterator() {
    let map = populated(&[2, 1]);
    let mut keys = Vec::new();
    for (key, _) in &map {
        keys.push(*key);
    }
    assert_eq!(keys, vec![1, 2]);
}

// =============================================================================
// FromIterator / Extend Tests
// =============================================================================

#[rstest]
fn test_from_iter_with_duplicates_keeps_first() {
    let map: OrderedMap<i32, &str> = [(1, "one"), (2, "two"), (1, "uno")]
        .into_iter()
        .collect();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1).value(), Some(&"one"));
}

#[rstest]
fn test_extend() {
    let mut map = populated(&[1]);
    map.extend([(2, 20), (1, 0)]);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1).value(), Some(&10));
}

// =============================================================================
// Equality / Hash / Clone Tests
// =============================================================================

#[rstest]
fn test_eq_ignores_insertion_order() {
    let ascending = populated(&[1, 2, 3]);
    let mixed = populated(&[2, 3, 1]);
    assert_eq!(ascending, mixed);
    assert_eq!(hash_of(&ascending), hash_of(&mixed));
}

#[rstest]
#[case::different_values(populated(&[1, 2]), [(1, 10), (2, 0)].into_iter().collect())]
#[case::different_keys(populated(&[1, 2]), populated(&[1, 3]))]
#[case::different_sizes(populated(&[1, 2]), populated(&[1]))]
fn test_ne(#[case] left: OrderedMap<i32, i32>, #[case] right: OrderedMap<i32, i32>) {
    assert_ne!(left, right);
}

#[rstest]
fn test_clone_is_independent() {
    let original = populated(&[2, 1, 3]);
    let mut copy = original.clone();
    copy.remove(&2);
    copy.insert(4, 40);

    assert_eq!(original.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(copy.keys().copied().collect::<Vec<_>>(), vec![1, 3, 4]);
}

#[rstest]
fn test_debug_format() {
    let map = populated(&[2, 1]);
    assert_eq!(format!("{map:?}"), "{1: 10, 2: 20}");
}

// =============================================================================
// Large Scale Tests
// =============================================================================

#[rstest]
fn test_large_number_of_entries_in_scattered_order() {
    let mut map = OrderedMap::new();
    for i in 0..10_000 {
        map.insert((i * 7_919) % 10_000, i);
    }

    assert_eq!(map.len(), 10_000);
    let keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(keys, (0..10_000).collect::<Vec<_>>());
}

#[rstest]
fn test_sorted_insertion_produces_full_height_and_drops_cleanly() {
    let map: OrderedMap<i32, i32> = (0..5_000).rev().map(|key| (key, key)).collect();
    assert_eq!(map.height(), 5_000);
    assert_eq!(map.min(), Some((&0, &0)));

    let copy = map.clone();
    assert_eq!(copy.height(), 5_000);
    drop(map);
    drop(copy);
}
