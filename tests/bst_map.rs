use std::collections::BTreeMap;

use bst_symtab::bst_map;
use bst_symtab::{BstMap, Error, Rank};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// The insertion trace used throughout: ten distinct keys, three repeats.
const TRACE: [&str; 13] = ["S", "E", "A", "R", "C", "H", "E", "X", "A", "M", "P", "L", "E"];

const SORTED: [&str; 10] = ["A", "C", "E", "H", "L", "M", "P", "R", "S", "X"];

fn trace_map() -> BstMap<&'static str, usize> {
    let mut map = BstMap::new();
    for (value, key) in TRACE.into_iter().enumerate() {
        map.insert(key, value);
    }
    map
}

fn owned_trace_map() -> BstMap<String, String> {
    let mut map = BstMap::new();
    for (value, key) in TRACE.into_iter().enumerate() {
        map.put(key.to_string(), Some(value.to_string()));
    }
    map
}

/// Generates keys in a range small enough relative to TEST_SIZE to cause collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Put(i64, Option<i64>),
    Insert(i64, i64),
    Delete(i64),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    DeleteMin,
    DeleteMax,
    PopFirst,
    PopLast,
    Min,
    Max,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        4 => (key_strategy(), proptest::option::of(value_strategy())).prop_map(|(k, v)| MapOp::Put(k, v)),
        4 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => key_strategy().prop_map(MapOp::Delete),
        2 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => Just(MapOp::DeleteMin),
        1 => Just(MapOp::DeleteMax),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
        1 => Just(MapOp::Min),
        1 => Just(MapOp::Max),
    ]
}

// ─── Canonical trace ─────────────────────────────────────────────────────────

#[test]
fn trace_yields_ten_sorted_keys_with_last_values() {
    let map = trace_map();
    assert_eq!(map.len(), 10);
    assert!(!map.is_empty());

    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, SORTED);

    let values: Vec<_> = map.keys().map(|k| map[k]).collect();
    assert_eq!(values, [8, 4, 12, 5, 11, 9, 10, 3, 0, 7]);
}

#[test]
fn trace_with_owned_strings() {
    let map = owned_trace_map();
    assert_eq!(map.get("E").map(String::as_str), Some("12"));
    assert_eq!(map.get("A").map(String::as_str), Some("8"));
    assert_eq!(map.get("B"), None);
    assert_eq!(map.to_string(), "{A: 8, C: 4, E: 12, H: 5, L: 11, M: 9, P: 10, R: 3, S: 0, X: 7}");
}

#[test]
fn trace_level_order() {
    let map = trace_map();
    let keys: Vec<_> = map.level_order().copied().collect();
    assert_eq!(keys, ["S", "E", "X", "A", "R", "C", "H", "M", "L", "P"]);
    assert_eq!(map.height(), 6);
}

#[test]
fn delete_min_until_empty_visits_keys_ascending() {
    let mut map = trace_map();
    let mut visited = Vec::new();
    while let Some(&min) = map.min() {
        let len = map.len();
        map.delete_min();
        assert_eq!(map.len(), len - 1);
        assert!(!map.contains_key(min));
        for index in 0..map.len() {
            assert_eq!(map.rank(map.select(index).unwrap()), index);
        }
        visited.push(min);
    }
    assert_eq!(visited, SORTED);
    assert!(map.is_empty());

    // a further call on the empty map is a no-op
    map.delete_min();
    assert!(map.is_empty());
}

#[test]
fn delete_max_until_empty_visits_keys_descending() {
    let mut map = trace_map();
    let mut visited = Vec::new();
    while let Some(&max) = map.max() {
        map.delete_max();
        for index in 0..map.len() {
            assert_eq!(map.rank(map.select(index).unwrap()), index);
        }
        visited.push(max);
    }
    let mut expected = SORTED;
    expected.reverse();
    assert_eq!(visited, expected);

    map.delete_max();
    assert!(map.is_empty());
}

#[test]
fn delete_every_key_in_sorted_order() {
    let mut map = owned_trace_map();
    let keys: Vec<String> = map.keys().cloned().collect();
    for key in &keys {
        let len = map.len();
        map.delete(key.as_str());
        assert_eq!(map.len(), len - 1);
        assert!(!map.contains_key(key.as_str()));
    }
    assert!(map.is_empty());
    assert_eq!(map.to_string(), "{}");
}

#[test]
fn delete_absent_key_keeps_len() {
    let mut map = trace_map();
    map.delete("B");
    map.put("Z", None);
    assert_eq!(map.len(), 10);
    assert_eq!(map.remove("B"), None);
}

#[test]
fn put_none_deletes() {
    let mut map = trace_map();
    map.put("H", None);
    assert!(!map.contains_key("H"));
    assert_eq!(map.len(), 9);
    assert_eq!(map.floor("H"), Some(&"E"));

    map.put("H", Some(42));
    assert_eq!(map.get("H"), Some(&42));
    assert_eq!(map.len(), 10);
}

// ─── Boundaries ──────────────────────────────────────────────────────────────

#[test]
fn empty_map_boundaries() {
    let map: BstMap<String, u32> = BstMap::new();
    assert_eq!(map.min(), None);
    assert_eq!(map.max(), None);
    assert_eq!(map.floor("m"), None);
    assert_eq!(map.ceiling("m"), None);
    assert_eq!(map.rank("m"), 0);
    assert_eq!(map.range_count("a", "z"), 0);
    assert_eq!(map.keys().count(), 0);
    assert_eq!(map.level_order().count(), 0);
    assert_eq!(map.select(0), Err(Error::OutOfRange { index: 0, len: 0 }));
    assert_eq!(map.height(), 0);
}

#[test]
fn single_key_is_min_and_max() {
    let mut map = BstMap::new();
    map.insert("only", 1);
    assert_eq!(map.min(), Some(&"only"));
    assert_eq!(map.max(), Some(&"only"));
    assert_eq!(map.select(0), Ok(&"only"));
    assert_eq!(map.rank("only"), 0);
}

#[test]
fn empty_string_key_is_not_confused_with_absence() {
    let mut map = BstMap::new();
    map.insert(String::new(), 0);
    map.insert("b".to_string(), 1);

    assert_eq!(map.floor("a"), Some(&String::new()));
    assert_eq!(map.ceiling(""), Some(&String::new()));
    assert_eq!(map.min().map(String::as_str), Some(""));

    map.delete("");
    assert_eq!(map.floor("a"), None);
}

#[test]
fn select_out_of_range_reports_len() {
    let map = trace_map();
    let err = map.select(10).unwrap_err();
    assert_eq!(err, Error::OutOfRange { index: 10, len: 10 });
    assert_eq!(err.to_string(), "index 10 out of range for map of length 10");
    assert!(map.select(usize::MAX).is_err());
}

#[test]
fn floor_and_ceiling_around_trace_keys() {
    let map = trace_map();
    for key in SORTED {
        assert_eq!(map.floor(key), Some(&key));
        assert_eq!(map.ceiling(key), Some(&key));
    }
    assert_eq!(map.floor("B"), Some(&"A"));
    assert_eq!(map.ceiling("B"), Some(&"C"));
    assert_eq!(map.floor("Q"), Some(&"P"));
    assert_eq!(map.ceiling("Q"), Some(&"R"));
    assert_eq!(map.floor("Y"), Some(&"X"));
    assert_eq!(map.ceiling("Y"), None);
    assert_eq!(map.floor("0"), None);
}

#[test]
fn range_queries_on_trace() {
    let map = trace_map();
    let keys: Vec<_> = map.keys_in("F", "Q").copied().collect();
    assert_eq!(keys, ["H", "L", "M", "P"]);
    assert_eq!(map.range_count("F", "Q"), 4);
    assert_eq!(map.range_count("H", "P"), 4);
    assert_eq!(map.range_count("H", "H"), 1);
    assert_eq!(map.range_count("Q", "F"), 0);
    assert_eq!(map.keys_in("Q", "F").len(), 0);

    let reversed: Vec<_> = map.keys_in("A", "E").rev().copied().collect();
    assert_eq!(reversed, ["E", "C", "A"]);
}

#[test]
fn rank_indexing() {
    let mut map = trace_map();
    assert_eq!(map[Rank(0)], 8);
    map[Rank(9)] += 100;
    assert_eq!(map.get("X"), Some(&107));
    assert_eq!(map.get_by_rank(2), Some((&"E", &12)));
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn rank_index_past_len_panics() {
    let map = trace_map();
    let _ = map[Rank(10)];
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn key_index_on_missing_key_panics() {
    let map = trace_map();
    let _ = map["B"];
}

#[test]
fn sorted_inserts_degrade_without_failing() {
    let map: BstMap<u32, u32> = (0..5_000).map(|i| (i, i)).collect();
    assert_eq!(map.height(), 5_000);
    assert_eq!(map.rank(&4_999), 4_999);
    assert_eq!(map.select(1_234), Ok(&1_234));
    assert_eq!(map.floor(&9_000), Some(&4_999));
    assert_eq!(map.iter().count(), 5_000);
    assert_eq!(map.level_order().last(), Some(&4_999));
}

#[test]
fn iterator_types_are_exported() {
    let map = trace_map();
    let _: bst_map::Iter<'_, &str, usize> = map.iter();
    let _: bst_map::Keys<'_, &str> = map.keys();
    let _: bst_map::LevelOrder<'_, &str, usize> = map.level_order();
}

// ─── Randomized comparison against BTreeMap ──────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both BstMap and BTreeMap
    /// and asserts identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut bst: BstMap<i64, i64> = BstMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Put(k, Some(v)) => {
                    bst.put(*k, Some(*v));
                    model.insert(*k, *v);
                }
                MapOp::Put(k, None) => {
                    bst.put(*k, None);
                    model.remove(k);
                }
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(bst.insert(*k, *v), model.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::Delete(k) => {
                    let had = model.remove(k).is_some();
                    let len = bst.len();
                    bst.delete(k);
                    prop_assert_eq!(bst.len() + usize::from(had), len, "delete({})", k);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(bst.remove(k), model.remove(k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(bst.get(k), model.get(k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(bst.contains_key(k), model.contains_key(k), "contains_key({})", k);
                }
                MapOp::DeleteMin => {
                    bst.delete_min();
                    model.pop_first();
                }
                MapOp::DeleteMax => {
                    bst.delete_max();
                    model.pop_last();
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(bst.pop_first(), model.pop_first(), "pop_first");
                }
                MapOp::PopLast => {
                    prop_assert_eq!(bst.pop_last(), model.pop_last(), "pop_last");
                }
                MapOp::Min => {
                    prop_assert_eq!(bst.min(), model.keys().next(), "min");
                }
                MapOp::Max => {
                    prop_assert_eq!(bst.max(), model.keys().next_back(), "max");
                }
            }
            prop_assert_eq!(bst.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(bst.is_empty(), model.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let entries: Vec<_> = bst.iter().collect();
        let expected: Vec<_> = model.iter().collect();
        prop_assert_eq!(entries, expected);
    }

    /// Tests that iteration, keys, and level order agree with BTreeMap.
    #[test]
    fn traversals_match_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.iter().copied().collect();

        let items: Vec<_> = bst.iter().map(|(&k, &v)| (k, v)).collect();
        let expected: Vec<_> = model.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&items, &expected, "iter() mismatch");
        prop_assert_eq!(bst.iter().len(), model.len());

        let keys: Vec<_> = bst.keys().copied().collect();
        let expected_keys: Vec<_> = model.keys().copied().collect();
        prop_assert_eq!(&keys, &expected_keys, "keys() mismatch");

        // Level order visits every key once, and the first entry inserted is the root.
        let mut level: Vec<_> = bst.level_order().copied().collect();
        prop_assert_eq!(level.first(), entries.first().map(|(k, _)| k));
        level.sort_unstable();
        prop_assert_eq!(&level, &expected_keys, "level_order() is not a permutation of keys()");
    }

    /// Tests rank and select against a sorted Vec oracle.
    #[test]
    fn rank_and_select_match_vec(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let sorted: Vec<i64> = BTreeMap::from_iter(entries.iter().copied()).into_keys().collect();

        for (index, key) in sorted.iter().enumerate() {
            prop_assert_eq!(bst.select(index), Ok(key), "select({})", index);
            prop_assert_eq!(bst.rank(key), index, "rank({})", key);
        }
        prop_assert_eq!(
            bst.select(sorted.len()),
            Err(Error::OutOfRange { index: sorted.len(), len: sorted.len() })
        );

        // Absent probes rank at their insertion point.
        for probe in [-5_000i64, -1, 0, 1, 5_000] {
            prop_assert_eq!(bst.rank(&probe), sorted.partition_point(|k| *k < probe), "rank({})", probe);
        }
    }

    /// Tests floor and ceiling against BTreeMap range queries.
    #[test]
    fn floor_and_ceiling_match_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE),
        probes in proptest::collection::vec(-2_100i64..2_100i64, 1..200),
    ) {
        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.iter().copied().collect();

        for probe in &probes {
            prop_assert_eq!(bst.floor(probe), model.range(..=probe).next_back().map(|(k, _)| k), "floor({})", probe);
            prop_assert_eq!(bst.ceiling(probe), model.range(probe..).next().map(|(k, _)| k), "ceiling({})", probe);
        }
    }

    /// Tests keys_in and range_count against BTreeMap::range.
    #[test]
    fn ranges_match_btreemap(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
        bounds in proptest::collection::vec((key_strategy(), key_strategy()), 1..50),
    ) {
        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let model: BTreeMap<i64, i64> = entries.iter().copied().collect();

        for (lo, hi) in &bounds {
            let expected: Vec<i64> = if lo <= hi {
                model.range(lo..=hi).map(|(k, _)| *k).collect()
            } else {
                Vec::new()
            };
            let keys: Vec<i64> = bst.keys_in(lo, hi).copied().collect();
            prop_assert_eq!(&keys, &expected, "keys_in({}, {})", lo, hi);
            prop_assert_eq!(bst.range_count(lo, hi), expected.len(), "range_count({}, {})", lo, hi);
        }
    }

    /// Tests that get_by_rank_mut writes land on the right key.
    #[test]
    fn get_by_rank_mut_matches_vec(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let sorted: Vec<i64> = BTreeMap::from_iter(entries.iter().copied()).into_keys().collect();

        for (rank, expected_k) in sorted.iter().enumerate() {
            let (k, v) = bst.get_by_rank_mut(rank).unwrap();
            prop_assert_eq!(k, expected_k, "get_by_rank_mut({}) key mismatch", rank);
            *v = i64::try_from(rank).unwrap();
        }
        for (rank, k) in sorted.iter().enumerate() {
            prop_assert_eq!(bst[k], i64::try_from(rank).unwrap(), "mutation at rank {} did not persist", rank);
        }
    }

    /// Tests that clones compare equal and stay independent.
    #[test]
    fn clone_produces_equal_independent_map(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let bst: BstMap<i64, i64> = entries.iter().copied().collect();
        let mut copy = bst.clone();
        prop_assert_eq!(&copy, &bst);

        copy.delete_min();
        prop_assert_eq!(copy.len() + 1, bst.len());
        prop_assert_ne!(&copy, &bst);
    }

    /// Tests that clear empties the map and it can be refilled.
    #[test]
    fn clear_empties_map(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut bst: BstMap<i64, i64> = entries.iter().copied().collect();
        bst.clear();
        prop_assert!(bst.is_empty());
        prop_assert_eq!(bst.iter().next(), None);

        bst.extend(entries.iter().copied());
        let model: BTreeMap<i64, i64> = entries.iter().copied().collect();
        prop_assert_eq!(bst.len(), model.len());
    }
}
