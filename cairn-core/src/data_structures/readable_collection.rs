//! Read-only operations shared by both collection façades.
//!
//! Every method starts from [`ReadableCollection::entries`], which resolves a
//! pending deferred source on first use.

use rand::Rng;

use super::comparator::{strict_eq, type_safe};
use super::deferred_source::DeferredSource;
use super::entries::Entries;
use super::key::Key;
use super::options::CollectionOptions;
use super::serialization;
use super::value::Value;
use super::wrappers::collection_iter::Iter;
use crate::error::{CollectionError, Result};

/// Read access to a resolved, ordered key/value mapping.
///
/// Implementors only provide [`entries`](ReadableCollection::entries) and
/// [`options`](ReadableCollection::options); everything else is derived.
///
pub trait ReadableCollection {
    /// Resolved entries. Drains a pending deferred source the first time.
    fn entries(&self) -> &Entries;

    /// Options the collection was built with.
    fn options(&self) -> CollectionOptions;

    /// Alias of [`entries`](ReadableCollection::entries).
    fn all(&self) -> &Entries {
        self.entries()
    }

    fn count(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn first(&self) -> Option<&Value> {
        self.entries().first().map(|(_, value)| value)
    }

    fn last(&self) -> Option<&Value> {
        self.entries().last().map(|(_, value)| value)
    }

    fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries().get(&key.into())
    }

    fn get_or<'a>(&'a self, key: impl Into<Key>, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// True if `key` is a key of the collection (values are not searched).
    fn has(&self, key: impl Into<Key>) -> bool {
        self.entries().contains_key(&key.into())
    }

    /// True if some stored value is strictly equal to `value`.
    ///
    /// Objects match by reference, and `1` does not match `1.0` or `"1"`.
    fn contains(&self, value: impl Into<Value>) -> bool {
        let value = value.into();
        self.entries().values().any(|stored| strict_eq(stored, &value))
    }

    /// Snapshot of the values in order, without keys.
    fn values(&self) -> Vec<Value> {
        self.entries().values().cloned().collect()
    }

    fn keys(&self) -> Vec<Key> {
        self.entries().keys().cloned().collect()
    }

    /// Left fold over the values in order.
    fn reduce<A, F>(&self, initial: A, f: F) -> A
    where
        F: FnMut(A, &Value) -> A,
    {
        self.entries().values().fold(initial, f)
    }

    /// True as soon as `predicate(value, key)` holds for one entry.
    fn some<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.entries().iter().any(|(key, value)| predicate(value, key))
    }

    /// A uniformly chosen value.
    fn rand(&self) -> Result<&Value> {
        self.rand_with(&mut rand::thread_rng())
    }

    fn rand_with<R>(&self, rng: &mut R) -> Result<&Value>
    where
        R: Rng + ?Sized,
    {
        let entries = self.entries();
        if entries.is_empty() {
            return Err(CollectionError::EmptySelection);
        }
        let index = rng.gen_range(0..entries.len());
        entries
            .get_index(index)
            .map(|(_, value)| value)
            .ok_or(CollectionError::EmptySelection)
    }

    /// True if no value of `self` is missing from `other`.
    ///
    /// This is one-directional: `[1]` equals `[1, 2]`, but not the other way
    /// round. Check both directions for set equality.
    fn equals<C>(&self, other: &C) -> bool
    where
        C: ReadableCollection + ?Sized,
    {
        let other = other.entries();
        self.entries().values().all(|value| {
            other
                .values()
                .any(|candidate| type_safe(value, candidate).is_eq())
        })
    }

    fn iter(&self) -> Iter<'_> {
        Iter::new(self.entries())
    }

    /// Snapshot of the entries as a fresh deferred source.
    fn deferred(&self) -> DeferredSource {
        DeferredSource::from_pairs(self.entries().clone())
    }

    /// Envelope form: `{"items": [[key, value], ...]}`.
    fn to_serialized(&self) -> Result<String> {
        serialization::encode(self.entries())
    }

    /// External representation: array for list-like keys, object otherwise.
    fn to_json(&self) -> serde_json::Value {
        serialization::to_json(self.entries())
    }
}
