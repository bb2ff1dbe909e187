//! Property-based tests for the collection operations.

use std::collections::HashSet;

use cairn_core::{Collection, Key, MutableCollection, ReadableCollection, Value};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-50i64..50).prop_map(Value::from),
        // Quarters print and parse back exactly
        (-200i32..200).prop_map(|n| Value::from(f64::from(n) / 4.0)),
        "[a-z0-9]{0,4}".prop_map(Value::from),
    ]
}

fn key() -> impl Strategy<Value = Key> {
    prop_oneof![(0i64..20).prop_map(Key::from), "[a-z]{1,3}".prop_map(Key::from)]
}

fn values() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(scalar(), 0..24)
}

fn pairs() -> impl Strategy<Value = Vec<(Key, Value)>> {
    prop::collection::vec((key(), scalar()), 0..24)
}

#[derive(Debug, Clone)]
enum Step {
    Sort,
    KSort,
    Reverse,
    Unique,
    ReIndex,
    Push(Value),
    Unshift(Value),
    Set(Key, Value),
    Remove(Key),
    Filter(i64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Sort),
        Just(Step::KSort),
        Just(Step::Reverse),
        Just(Step::Unique),
        Just(Step::ReIndex),
        scalar().prop_map(Step::Push),
        scalar().prop_map(Step::Unshift),
        (key(), scalar()).prop_map(|(k, v)| Step::Set(k, v)),
        key().prop_map(Step::Remove),
        (0i64..10).prop_map(Step::Filter),
    ]
}

fn keep(value: &Value, threshold: i64) -> bool {
    value.as_int().map_or(true, |n| n >= threshold)
}

fn apply_immutable(collection: &Collection, step: &Step) -> Collection {
    match step {
        Step::Sort => collection.sort(),
        Step::KSort => collection.k_sort(),
        Step::Reverse => collection.reverse(),
        Step::Unique => collection.unique(),
        Step::ReIndex => collection.re_index(),
        Step::Push(value) => collection.push(value).unwrap(),
        Step::Unshift(value) => collection.unshift([value]).unwrap(),
        Step::Set(key, value) => collection.set(key, value).unwrap(),
        Step::Remove(key) => collection.remove([key]),
        Step::Filter(threshold) => collection.filter(|value, _| keep(value, *threshold)),
    }
}

fn apply_mutable(collection: &mut MutableCollection, step: &Step) {
    match step {
        Step::Sort => {
            collection.sort();
        }
        Step::KSort => {
            collection.k_sort();
        }
        Step::Reverse => {
            collection.reverse();
        }
        Step::Unique => {
            collection.unique();
        }
        Step::ReIndex => {
            collection.re_index();
        }
        Step::Push(value) => {
            collection.push(value).unwrap();
        }
        Step::Unshift(value) => {
            collection.unshift([value]).unwrap();
        }
        Step::Set(key, value) => {
            collection.set(key, value).unwrap();
        }
        Step::Remove(key) => {
            collection.remove([key]);
        }
        Step::Filter(threshold) => {
            collection.filter(|value, _| keep(value, *threshold));
        }
    }
}

proptest! {
    /// Property: mapping the identity changes nothing
    #[test]
    fn prop_map_identity(items in pairs()) {
        let collection = Collection::collect(items).unwrap();
        let mapped = collection.map(|value, _| value.clone()).unwrap();
        prop_assert_eq!(mapped.entries(), collection.entries());
    }

    /// Property: union holds every distinct value once, receiver's values first
    #[test]
    fn prop_union_distinct_in_order(left in values(), right in values()) {
        let union = Collection::from_values(left.clone())
            .unwrap()
            .union(&Collection::from_values(right.clone()).unwrap())
            .unwrap();

        let mut seen = HashSet::new();
        let expected: Vec<Value> = left
            .into_iter()
            .chain(right)
            .filter(|value| value.scalar_string().is_some_and(|form| seen.insert(form)))
            .collect();
        prop_assert_eq!(union.values(), expected);
    }

    /// Property: a collection minus itself is empty
    #[test]
    fn prop_diff_self_is_empty(items in pairs()) {
        let collection = Collection::collect(items).unwrap();
        prop_assert!(collection.diff(&collection).is_empty());
    }

    /// Property: unique is idempotent
    #[test]
    fn prop_unique_idempotent(items in pairs()) {
        let once = Collection::collect(items).unwrap().unique();
        let twice = once.unique();
        prop_assert_eq!(twice.entries(), once.entries());
    }

    /// Property: k_sort orders keys and leaves the receiver as it was
    #[test]
    fn prop_k_sort_leaves_receiver(items in pairs()) {
        let collection = Collection::collect(items).unwrap();
        let before = collection.entries().clone();
        let sorted = collection.k_sort();

        prop_assert_eq!(collection.entries(), &before);
        prop_assert_eq!(sorted.count(), before.len());
        let forms: Vec<String> = sorted.keys().iter().map(ToString::to_string).collect();
        prop_assert!(forms.windows(2).all(|pair| pair[0].as_bytes() <= pair[1].as_bytes()));
    }

    /// Property: removing absent keys is a no-op
    #[test]
    fn prop_remove_absent_is_noop(items in values(), extra in 100i64..200) {
        let collection = Collection::from_values(items).unwrap();
        let removed = collection.remove([Key::from(extra), Key::from("absent")]);
        prop_assert_eq!(removed.entries(), collection.entries());
    }

    /// Property: both façades reach the same state for the same steps
    #[test]
    fn prop_facades_agree(items in pairs(), steps in prop::collection::vec(step(), 0..12)) {
        let mut immutable = Collection::collect(items.clone()).unwrap();
        let mut mutable = MutableCollection::collect(items).unwrap();
        let original = immutable.clone();

        for step in &steps {
            let before = immutable.entries().clone();
            let next = apply_immutable(&immutable, step);
            prop_assert_eq!(immutable.entries(), &before);
            immutable = next;
            apply_mutable(&mut mutable, step);
            prop_assert_eq!(immutable.entries(), mutable.entries());
        }

        let replayed = steps
            .iter()
            .fold(original, |collection, step| apply_immutable(&collection, step));
        prop_assert_eq!(replayed.entries(), mutable.entries());
    }

    /// Property: serialized collections load back equal
    #[test]
    fn prop_serialization_round_trip(items in pairs()) {
        let collection = MutableCollection::collect(items).unwrap();
        let text = collection.to_serialized().unwrap();
        let restored = MutableCollection::from_serialized(&text).unwrap();
        prop_assert_eq!(restored.entries(), collection.entries());

        let mut populated = Collection::from_values([1]).unwrap();
        prop_assert!(populated.unserialize(&text).is_err());
    }
}
