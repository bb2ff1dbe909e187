use std::cmp::Ordering;

use serde::{Serialize, Serializer};

use super::collection_iter::Iter;
use crate::data_structures::comparator::{key_string, type_safe};
use crate::data_structures::entries::{self, Entries};
use crate::data_structures::serialization;
use crate::data_structures::store::Store;
use crate::data_structures::{
    CollectionOptions, DeferredSource, Key, ReadableCollection, Value,
};
use crate::error::{CollectionError, Result};

/// Immutable ordered collection.
///
/// Every transformation returns a new `Collection` and leaves the receiver's
/// entries untouched. Values are shared, not deep-copied: an object stored in
/// both collections is the same reference.
///
/// Only `later` defers work; every transformation resolves the receiver and
/// validates its result before returning.
///
#[derive(Debug, Clone, Default)]
pub struct Collection {
    store: Store,
}

impl Collection {
    fn from_store(store: Store) -> Self {
        Collection { store }
    }

    fn derive(&self, entries: Entries) -> Self {
        Collection::from_store(Store::resolved(entries, self.store.options()))
    }

    fn derive_with<F>(&self, f: F) -> Self
    where
        F: FnOnce(&mut Entries),
    {
        let mut entries = self.entries().clone();
        f(&mut entries);
        self.derive(entries)
    }

    fn try_derive_with<F>(&self, f: F) -> Result<Self>
    where
        F: FnOnce(&mut Entries) -> Result<()>,
    {
        let mut entries = self.entries().clone();
        f(&mut entries)?;
        Ok(self.derive(entries))
    }

    // ========================================================================
    // Factories
    // ========================================================================

    /// Collection over explicit key/value pairs.
    pub fn collect<I, K, V>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Self::collect_with(items, CollectionOptions::default())
    }

    pub fn collect_with<I, K, V>(items: I, options: CollectionOptions) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Store::collect(items, options).map(Self::from_store)
    }

    /// Collection over bare values, keyed `0, 1, 2, ...`.
    pub fn from_values<I, V>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::collect(values.into_iter().enumerate())
    }

    /// `amount` copies of `value`, keyed from `start`.
    pub fn fill(start: i64, amount: usize, value: impl Into<Value>) -> Result<Self> {
        Self::fill_with(start, amount, value, CollectionOptions::default())
    }

    pub fn fill_with(
        start: i64,
        amount: usize,
        value: impl Into<Value>,
        options: CollectionOptions,
    ) -> Result<Self> {
        let entries = entries::fill(start, amount, value.into(), options.policy)?;
        Ok(Self::from_store(Store::resolved(entries, options)))
    }

    /// Splits `text` on `delimiter` after trimming surrounding whitespace.
    pub fn from_string(text: &str, delimiter: &str) -> Result<Self> {
        Self::from_string_with(text, delimiter, CollectionOptions::default())
    }

    pub fn from_string_with(text: &str, delimiter: &str, options: CollectionOptions) -> Result<Self> {
        let entries = entries::split(text, delimiter)?;
        Ok(Self::from_store(Store::resolved(entries, options)))
    }

    /// Collection backed by a source that is not read until first access.
    pub fn later(source: DeferredSource) -> Self {
        Self::later_with(source, CollectionOptions::default())
    }

    pub fn later_with(source: DeferredSource, options: CollectionOptions) -> Self {
        Self::from_store(Store::deferred(source, options))
    }

    /// Rebuilds a collection from [`ReadableCollection::to_serialized`] output.
    pub fn from_serialized(text: &str) -> Result<Self> {
        let mut collection = Collection::default();
        collection.unserialize(text)?;
        Ok(collection)
    }

    /// Loads serialized entries into a `Collection::default()` instance.
    ///
    /// Fails with [`CollectionError::IllegalReinitialization`] if the instance
    /// already holds resolved entries or a pending source.
    pub fn unserialize(&mut self, text: &str) -> Result<()> {
        if self.store.is_initialized() {
            return Err(CollectionError::IllegalReinitialization);
        }
        let entries = serialization::decode(text)?;
        self.store.restore(entries)
    }

    /// False while a deferred source is still pending.
    pub fn is_materialized(&self) -> bool {
        self.store.is_materialized()
    }

    // ========================================================================
    // Transformations
    // ========================================================================

    pub fn map<F>(&self, f: F) -> Result<Self>
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        let policy = self.options().policy;
        self.try_derive_with(|entries| entries::map_values(entries, policy, f))
    }

    /// Keeps entries where `f(value, key)` holds. Keys are not renumbered.
    pub fn filter<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.derive_with(|entries| entries.retain(|key, value| f(value, key)))
    }

    /// Replaces each value with `f(value, key)`, eagerly and in order.
    ///
    /// Runs over the whole receiver before anything is committed, so a
    /// rejected callback result fails the call the same way the mutable
    /// `each` does.
    pub fn each<F>(&self, f: F) -> Result<Self>
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        self.map(f)
    }

    /// Walks groups of `size` entries, replacing each value with
    /// `f(value, key)`. Keys and order are preserved.
    pub fn chunk<F>(&self, size: usize, f: F) -> Result<Self>
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        let policy = self.options().policy;
        self.try_derive_with(|entries| entries::chunk_values(entries, size, policy, f))
    }

    pub fn reverse(&self) -> Self {
        self.derive_with(entries::reverse)
    }

    pub fn re_index(&self) -> Self {
        self.derive_with(entries::reindex)
    }

    pub fn unique(&self) -> Self {
        self.derive_with(entries::unique)
    }

    /// Values of `self` with no type-safe equal in `other`, keys preserved.
    pub fn diff<C>(&self, other: &C) -> Self
    where
        C: ReadableCollection + ?Sized,
    {
        self.diff_by(other, type_safe)
    }

    pub fn diff_by<C, F>(&self, other: &C, compare: F) -> Self
    where
        C: ReadableCollection + ?Sized,
        F: Fn(&Value, &Value) -> Ordering,
    {
        self.derive_with(|entries| entries::diff_by(entries, other.entries(), compare))
    }

    pub fn merge<C>(&self, other: &C) -> Result<Self>
    where
        C: ReadableCollection + ?Sized,
    {
        let policy = self.options().policy;
        self.try_derive_with(|entries| entries::merge(entries, other.entries(), policy))
    }

    /// `merge` followed by `unique`.
    pub fn union<C>(&self, other: &C) -> Result<Self>
    where
        C: ReadableCollection + ?Sized,
    {
        let policy = self.options().policy;
        self.try_derive_with(|entries| {
            entries::merge(entries, other.entries(), policy)?;
            entries::unique(entries);
            Ok(())
        })
    }

    pub fn intersect<C>(&self, other: &C) -> Self
    where
        C: ReadableCollection + ?Sized,
    {
        self.derive_with(|entries| entries::intersect(entries, other.entries()))
    }

    /// Stable sort by value with the type-safe comparator. Keys stay attached.
    pub fn sort(&self) -> Self {
        self.sort_by(type_safe)
    }

    pub fn sort_by<F>(&self, compare: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering,
    {
        self.derive_with(|entries| entries::sort_by(entries, compare))
    }

    /// Stable sort by key string form.
    pub fn k_sort(&self) -> Self {
        self.k_sort_by(key_string)
    }

    pub fn k_sort_by<F>(&self, compare: F) -> Self
    where
        F: Fn(&Key, &Key) -> Ordering,
    {
        self.derive_with(|entries| entries::k_sort_by(entries, compare))
    }

    /// Drops the given keys; absent keys are ignored.
    pub fn remove<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.derive_with(|entries| entries::remove(entries, keys.into_iter().map(Into::into)))
    }

    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) -> Result<Self> {
        let policy = self.options().policy;
        let (key, value) = (key.into(), value.into());
        self.try_derive_with(|entries| entries::set(entries, key, value, policy))
    }

    pub fn push(&self, value: impl Into<Value>) -> Result<Self> {
        let policy = self.options().policy;
        let value = value.into();
        self.try_derive_with(|entries| entries::push(entries, value, policy))
    }

    /// Prepends `values` in the given order.
    pub fn unshift<I, V>(&self, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let policy = self.options().policy;
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.try_derive_with(|entries| entries::unshift(entries, values, policy))
    }
}

impl ReadableCollection for Collection {
    fn entries(&self) -> &Entries {
        self.store.entries()
    }

    fn options(&self) -> CollectionOptions {
        self.store.options()
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.entries().iter().eq(other.entries().iter())
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialization::serialize_external(self.entries(), serializer)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_each_runs_eagerly_and_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let collection = Collection::from_values([3, 2, 1]).unwrap();

        let iterated = collection
            .each(move |value, key| {
                counter.set(counter.get() + 1);
                Value::from(value.as_int().unwrap_or(0) * key.as_index().unwrap_or(0))
            })
            .unwrap();
        assert_eq!(calls.get(), 3);
        assert!(iterated.is_materialized());

        assert_eq!(iterated.values(), vec![Value::from(0), Value::from(2), Value::from(2)]);
        iterated.count();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_chunk_rejects_containers_without_changes() {
        let collection = Collection::from_values([1, 2, 3]).unwrap();
        let result = collection.chunk(2, |value, _| match value.as_int() {
            Some(3) => Value::from(vec![3]),
            _ => value.clone(),
        });
        assert!(matches!(result, Err(CollectionError::InvalidItemKind { .. })));
        assert_eq!(collection.values(), vec![Value::from(1), Value::from(2), Value::from(3)]);
    }

    #[test]
    fn test_chunk_rejects_zero() {
        let collection = Collection::from_values(["a"]).unwrap();
        assert!(matches!(
            collection.chunk(0, |value, _| value.clone()),
            Err(CollectionError::InvalidChunkSize)
        ));
    }

    #[test]
    fn test_derived_collections_inherit_options() {
        use crate::data_structures::ItemPolicy;

        let options = CollectionOptions::new().with_policy(ItemPolicy::Permissive);
        let collection = Collection::collect_with([(0, 1)], options).unwrap();
        let pushed = collection.push(vec![1, 2]).unwrap();
        assert_eq!(pushed.options(), options);
        assert_eq!(pushed.count(), 2);
        assert_eq!(collection.count(), 1);
    }
}
