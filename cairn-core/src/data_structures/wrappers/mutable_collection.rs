use std::cmp::Ordering;

use serde::{Serialize, Serializer};

use super::collection_iter::Iter;
use crate::data_structures::comparator::{key_string, type_safe};
use crate::data_structures::entries::{self, Entries};
use crate::data_structures::serialization;
use crate::data_structures::store::Store;
use crate::data_structures::{
    Collection, CollectionOptions, DeferredSource, Key, ReadableCollection, Value,
};
use crate::error::{CollectionError, Result};

/// Mutable ordered collection.
///
/// Transformations rewrite the receiver's own entries and return `&mut Self`
/// so calls chain:
///
/// ```
/// use cairn_core::{MutableCollection, ReadableCollection};
///
/// let mut list = MutableCollection::from_values(["a", "b", "c", "d"]).unwrap();
/// list.remove([0, 3]).reverse();
/// assert_eq!(list.values(), vec!["c".into(), "b".into()]);
/// ```
///
/// A failed call (rejected value, zero chunk size) leaves the entries as
/// they were.
///
#[derive(Debug, Clone, Default)]
pub struct MutableCollection {
    store: Store,
}

impl MutableCollection {
    fn from_store(store: Store) -> Self {
        MutableCollection { store }
    }

    fn apply<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Entries),
    {
        f(self.store.entries_mut());
        self
    }

    fn try_apply<F>(&mut self, f: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Entries) -> Result<()>,
    {
        f(self.store.entries_mut())?;
        Ok(self)
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

    pub fn from_string(text: &str, delimiter: &str) -> Result<Self> {
        Self::from_string_with(text, delimiter, CollectionOptions::default())
    }

    pub fn from_string_with(
        text: &str,
        delimiter: &str,
        options: CollectionOptions,
    ) -> Result<Self> {
        let entries = entries::split(text, delimiter)?;
        Ok(Self::from_store(Store::resolved(entries, options)))
    }

    pub fn later(source: DeferredSource) -> Self {
        Self::later_with(source, CollectionOptions::default())
    }

    pub fn later_with(source: DeferredSource, options: CollectionOptions) -> Self {
        Self::from_store(Store::deferred(source, options))
    }

    pub fn from_serialized(text: &str) -> Result<Self> {
        let mut collection = MutableCollection::default();
        collection.unserialize(text)?;
        Ok(collection)
    }

    /// Loads serialized entries into a `MutableCollection::default()` instance.
    ///
    /// Serialized data never overwrites a populated collection; that fails
    /// with [`CollectionError::IllegalReinitialization`].
    pub fn unserialize(&mut self, text: &str) -> Result<()> {
        if self.store.is_initialized() {
            return Err(CollectionError::IllegalReinitialization);
        }
        let entries = serialization::decode(text)?;
        self.store.restore(entries)
    }

    pub fn is_materialized(&self) -> bool {
        self.store.is_materialized()
    }

    /// Immutable copy of the current entries.
    pub fn to_immutable(&self) -> Collection {
        Collection::later_with(self.deferred(), self.options())
    }

    // ========================================================================
    // Transformations
    // ========================================================================

    pub fn map<F>(&mut self, f: F) -> Result<&mut Self>
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        let policy = self.options().policy;
        self.try_apply(|entries| entries::map_values(entries, policy, f))
    }

    pub fn filter<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.apply(|entries| entries.retain(|key, value| f(value, key)))
    }

    /// Replaces each value with `f(value, key)`, eagerly and in order.
    pub fn each<F>(&mut self, f: F) -> Result<&mut Self>
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        self.map(f)
    }

    /// Walks groups of `size` entries, replacing each value with
    /// `f(value, key)`.
    pub fn chunk<F>(&mut self, size: usize, f: F) -> Result<&mut Self>
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        let policy = self.options().policy;
        self.try_apply(|entries| entries::chunk_values(entries, size, policy, f))
    }

    pub fn reverse(&mut self) -> &mut Self {
        self.apply(entries::reverse)
    }

    pub fn re_index(&mut self) -> &mut Self {
        self.apply(entries::reindex)
    }

    pub fn unique(&mut self) -> &mut Self {
        self.apply(entries::unique)
    }

    pub fn diff<C>(&mut self, other: &C) -> &mut Self
    where
        C: ReadableCollection + ?Sized,
    {
        self.diff_by(other, type_safe)
    }

    pub fn diff_by<C, F>(&mut self, other: &C, compare: F) -> &mut Self
    where
        C: ReadableCollection + ?Sized,
        F: Fn(&Value, &Value) -> Ordering,
    {
        self.apply(|entries| entries::diff_by(entries, other.entries(), compare))
    }

    pub fn merge<C>(&mut self, other: &C) -> Result<&mut Self>
    where
        C: ReadableCollection + ?Sized,
    {
        let policy = self.options().policy;
        self.try_apply(|entries| entries::merge(entries, other.entries(), policy))
    }

    pub fn union<C>(&mut self, other: &C) -> Result<&mut Self>
    where
        C: ReadableCollection + ?Sized,
    {
        Ok(self.merge(other)?.unique())
    }

    pub fn intersect<C>(&mut self, other: &C) -> &mut Self
    where
        C: ReadableCollection + ?Sized,
    {
        self.apply(|entries| entries::intersect(entries, other.entries()))
    }

    pub fn sort(&mut self) -> &mut Self {
        self.sort_by(type_safe)
    }

    pub fn sort_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: Fn(&Value, &Value) -> Ordering,
    {
        self.apply(|entries| entries::sort_by(entries, compare))
    }

    pub fn k_sort(&mut self) -> &mut Self {
        self.k_sort_by(key_string)
    }

    pub fn k_sort_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: Fn(&Key, &Key) -> Ordering,
    {
        self.apply(|entries| entries::k_sort_by(entries, compare))
    }

    pub fn remove<I, K>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.apply(|entries| entries::remove(entries, keys.into_iter().map(Into::into)))
    }

    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Result<&mut Self> {
        let policy = self.options().policy;
        let (key, value) = (key.into(), value.into());
        self.try_apply(|entries| entries::set(entries, key, value, policy))
    }

    pub fn push(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
        let policy = self.options().policy;
        let value = value.into();
        self.try_apply(|entries| entries::push(entries, value, policy))
    }

    pub fn unshift<I, V>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let policy = self.options().policy;
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.try_apply(|entries| entries::unshift(entries, values, policy))
    }

    /// Drops every entry and any pending source.
    pub fn clear(&mut self) -> &mut Self {
        self.store.replace(Entries::new());
        self
    }
}

impl ReadableCollection for MutableCollection {
    fn entries(&self) -> &Entries {
        self.store.entries()
    }

    fn options(&self) -> CollectionOptions {
        self.store.options()
    }
}

impl PartialEq for MutableCollection {
    fn eq(&self, other: &Self) -> bool {
        self.entries().iter().eq(other.entries().iter())
    }
}

impl Serialize for MutableCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialization::serialize_external(self.entries(), serializer)
    }
}

impl<'a> IntoIterator for &'a MutableCollection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
