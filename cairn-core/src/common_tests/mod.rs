//! Behaviour shared by both façades, written once against [`CollectionUnderTest`].
//!
//! Integration tests in `tests/` run every function here for `Collection`
//! and `MutableCollection`.


use std::fmt::Debug;

use serde::Serialize;

use crate::data_structures::{
    Collection, DeferredSource, Key, MutableCollection, ReadableCollection, Value,
};
use crate::error::Result;

/// Callback shape used by the shared tests. Plain function pointers satisfy
/// the `'static` bound of the lazy immutable callbacks.
pub type ValueFn = fn(&Value, &Key) -> Value;
pub type PredicateFn = fn(&Value, &Key) -> bool;

/// Uniform by-value view over both façades.
///
/// Each method consumes the collection and returns the transformed one, so a
/// test body reads the same whether the façade copies or mutates.
pub trait CollectionUnderTest:
    ReadableCollection + Serialize + Default + Clone + Debug + Sized
{
    fn with_pairs(pairs: Vec<(Key, Value)>) -> Result<Self>;
    fn with_source(source: DeferredSource) -> Self;
    fn with_fill(start: i64, amount: usize, value: Value) -> Result<Self>;
    fn with_text(text: &str, delimiter: &str) -> Result<Self>;
    fn with_serialized(text: &str) -> Result<Self>;
    fn load(&mut self, text: &str) -> Result<()>;

    fn sorted(self) -> Self;
    fn key_sorted(self) -> Self;
    fn mapped(self, f: ValueFn) -> Result<Self>;
    fn filtered(self, f: PredicateFn) -> Self;
    fn walked(self, f: ValueFn) -> Result<Self>;
    fn walked_in_chunks(self, size: usize, f: ValueFn) -> Result<Self>;
    fn reversed(self) -> Self;
    fn reindexed(self) -> Self;
    fn deduplicated(self) -> Self;
    fn without(self, other: &Self) -> Self;
    fn merged(self, other: &Self) -> Result<Self>;
    fn united(self, other: &Self) -> Result<Self>;
    fn intersected(self, other: &Self) -> Self;
    fn removed(self, keys: Vec<Key>) -> Self;
    fn assigned(self, key: Key, value: Value) -> Result<Self>;
    fn pushed(self, value: Value) -> Result<Self>;
    fn unshifted(self, values: Vec<Value>) -> Result<Self>;
}

impl CollectionUnderTest for Collection {
    fn with_pairs(pairs: Vec<(Key, Value)>) -> Result<Self> {
        Collection::collect(pairs)
    }

    fn with_source(source: DeferredSource) -> Self {
        Collection::later(source)
    }

    fn with_fill(start: i64, amount: usize, value: Value) -> Result<Self> {
        Collection::fill(start, amount, value)
    }

    fn with_text(text: &str, delimiter: &str) -> Result<Self> {
        Collection::from_string(text, delimiter)
    }

    fn with_serialized(text: &str) -> Result<Self> {
        Collection::from_serialized(text)
    }

    fn load(&mut self, text: &str) -> Result<()> {
        self.unserialize(text)
    }

    fn sorted(self) -> Self {
        self.sort()
    }

    fn key_sorted(self) -> Self {
        self.k_sort()
    }

    fn mapped(self, f: ValueFn) -> Result<Self> {
        self.map(f)
    }

    fn filtered(self, f: PredicateFn) -> Self {
        self.filter(f)
    }

    fn walked(self, f: ValueFn) -> Result<Self> {
        self.each(f)
    }

    fn walked_in_chunks(self, size: usize, f: ValueFn) -> Result<Self> {
        self.chunk(size, f)
    }

    fn reversed(self) -> Self {
        self.reverse()
    }

    fn reindexed(self) -> Self {
        self.re_index()
    }

    fn deduplicated(self) -> Self {
        self.unique()
    }

    fn without(self, other: &Self) -> Self {
        self.diff(other)
    }

    fn merged(self, other: &Self) -> Result<Self> {
        self.merge(other)
    }

    fn united(self, other: &Self) -> Result<Self> {
        self.union(other)
    }

    fn intersected(self, other: &Self) -> Self {
        self.intersect(other)
    }

    fn removed(self, keys: Vec<Key>) -> Self {
        self.remove(keys)
    }

    fn assigned(self, key: Key, value: Value) -> Result<Self> {
        self.set(key, value)
    }

    fn pushed(self, value: Value) -> Result<Self> {
        self.push(value)
    }

    fn unshifted(self, values: Vec<Value>) -> Result<Self> {
        self.unshift(values)
    }
}

impl CollectionUnderTest for MutableCollection {
    fn with_pairs(pairs: Vec<(Key, Value)>) -> Result<Self> {
        MutableCollection::collect(pairs)
    }

    fn with_source(source: DeferredSource) -> Self {
        MutableCollection::later(source)
    }

    fn with_fill(start: i64, amount: usize, value: Value) -> Result<Self> {
        MutableCollection::fill(start, amount, value)
    }

    fn with_text(text: &str, delimiter: &str) -> Result<Self> {
        MutableCollection::from_string(text, delimiter)
    }

    fn with_serialized(text: &str) -> Result<Self> {
        MutableCollection::from_serialized(text)
    }

    fn load(&mut self, text: &str) -> Result<()> {
        self.unserialize(text)
    }

    fn sorted(mut self) -> Self {
        self.sort();
        self
    }

    fn key_sorted(mut self) -> Self {
        self.k_sort();
        self
    }

    fn mapped(mut self, f: ValueFn) -> Result<Self> {
        self.map(f)?;
        Ok(self)
    }

    fn filtered(mut self, f: PredicateFn) -> Self {
        self.filter(f);
        self
    }

    fn walked(mut self, f: ValueFn) -> Result<Self> {
        self.each(f)?;
        Ok(self)
    }

    fn walked_in_chunks(mut self, size: usize, f: ValueFn) -> Result<Self> {
        self.chunk(size, f)?;
        Ok(self)
    }

    fn reversed(mut self) -> Self {
        self.reverse();
        self
    }

    fn reindexed(mut self) -> Self {
        self.re_index();
        self
    }

    fn deduplicated(mut self) -> Self {
        self.unique();
        self
    }

    fn without(mut self, other: &Self) -> Self {
        self.diff(other);
        self
    }

    fn merged(mut self, other: &Self) -> Result<Self> {
        self.merge(other)?;
        Ok(self)
    }

    fn united(mut self, other: &Self) -> Result<Self> {
        self.union(other)?;
        Ok(self)
    }

    fn intersected(mut self, other: &Self) -> Self {
        self.intersect(other);
        self
    }

    fn removed(mut self, keys: Vec<Key>) -> Self {
        self.remove(keys);
        self
    }

    fn assigned(mut self, key: Key, value: Value) -> Result<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    fn pushed(mut self, value: Value) -> Result<Self> {
        self.push(value)?;
        Ok(self)
    }

    fn unshifted(mut self, values: Vec<Value>) -> Result<Self> {
        self.unshift(values)?;
        Ok(self)
    }
}
