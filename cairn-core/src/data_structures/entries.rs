//! In-place operations on resolved entries.
//!
//! Both façades funnel through these: the mutable one applies them to its own
//! store, the immutable one to a copy. Every fallible operation validates its
//! whole input before touching `entries`.

use std::cmp::Ordering;
use std::collections::HashSet;

use indexmap::IndexMap;

use super::comparator::loose_eq;
use super::key::Key;
use super::options::ItemPolicy;
use super::value::Value;
use crate::error::{CollectionError, Result};

/// Resolved key/value pairs in insertion order.
pub type Entries = IndexMap<Key, Value>;

/// Next index used by `push`: one past the largest integer key, or 0.
pub(crate) fn next_index(entries: &Entries) -> Result<i64> {
    match entries.keys().filter_map(Key::as_index).max() {
        Some(max) => max.checked_add(1).ok_or(CollectionError::IndexOverflow),
        None => Ok(0),
    }
}

/// Rebuilds entries with integer keys renumbered from 0.
///
/// String keys keep their name; a repeated name keeps its first position and
/// takes the later value.
pub(crate) fn renumber<I>(pairs: I) -> Entries
where
    I: IntoIterator<Item = (Key, Value)>,
{
    let mut next = 0i64;
    let mut entries = Entries::new();
    for (key, value) in pairs {
        let key = match key {
            Key::Index(_) => {
                next += 1;
                Key::Index(next - 1)
            }
            name => name,
        };
        entries.insert(key, value);
    }
    entries
}

/// Returns true if the keys are exactly `0, 1, .., n-1` in order.
pub(crate) fn is_list(entries: &Entries) -> bool {
    entries
        .keys()
        .enumerate()
        .all(|(position, key)| key.as_index() == Some(position as i64))
}

pub(crate) fn map_values<F>(entries: &mut Entries, policy: ItemPolicy, mut f: F) -> Result<()>
where
    F: FnMut(&Value, &Key) -> Value,
{
    let mapped: Vec<Value> = entries.iter().map(|(key, value)| f(value, key)).collect();
    policy.check_all(&mapped)?;
    for (slot, value) in entries.values_mut().zip(mapped) {
        *slot = value;
    }
    Ok(())
}

/// Splits an iterator into groups of `size`, the last one possibly shorter.
pub(crate) fn chunked<I>(iter: I, size: usize) -> impl Iterator<Item = Vec<I::Item>>
where
    I: Iterator,
{
    let mut iter = iter.peekable();
    std::iter::from_fn(move || {
        iter.peek()?;
        Some(iter.by_ref().take(size).collect())
    })
}

pub(crate) fn chunk_values<F>(
    entries: &mut Entries,
    size: usize,
    policy: ItemPolicy,
    mut f: F,
) -> Result<()>
where
    F: FnMut(&Value, &Key) -> Value,
{
    if size == 0 {
        return Err(CollectionError::InvalidChunkSize);
    }
    let mapped: Vec<Value> = chunked(entries.iter(), size)
        .flatten()
        .map(|(key, value)| f(value, key))
        .collect();
    policy.check_all(&mapped)?;
    for (slot, value) in entries.values_mut().zip(mapped) {
        *slot = value;
    }
    Ok(())
}

pub(crate) fn reverse(entries: &mut Entries) {
    let taken = std::mem::take(entries);
    *entries = renumber(taken.into_iter().rev());
}

pub(crate) fn reindex(entries: &mut Entries) {
    let taken = std::mem::take(entries);
    *entries = taken
        .into_values()
        .enumerate()
        .map(|(index, value)| (Key::from(index), value))
        .collect();
}

/// First occurrence wins under loose equality; keys of kept entries survive.
pub(crate) fn unique(entries: &mut Entries) {
    let mut seen_scalars = HashSet::new();
    let mut seen_others: Vec<Value> = Vec::new();
    entries.retain(|_, value| match value.scalar_string() {
        Some(form) => seen_scalars.insert(form),
        None => {
            if seen_others.iter().any(|seen| loose_eq(seen, value)) {
                false
            } else {
                seen_others.push(value.clone());
                true
            }
        }
    });
}

/// Keeps entries whose value loosely equals some value of `other`.
pub(crate) fn intersect(entries: &mut Entries, other: &Entries) {
    let scalars: HashSet<String> = other.values().filter_map(Value::scalar_string).collect();
    let others: Vec<&Value> = other
        .values()
        .filter(|value| value.scalar_string().is_none())
        .collect();
    entries.retain(|_, value| match value.scalar_string() {
        Some(form) => scalars.contains(&form),
        None => others.iter().any(|candidate| loose_eq(candidate, value)),
    });
}

/// Keeps entries with no `Equal` counterpart in `other` under `compare`.
pub(crate) fn diff_by<F>(entries: &mut Entries, other: &Entries, compare: F)
where
    F: Fn(&Value, &Value) -> Ordering,
{
    entries.retain(|_, value| {
        !other
            .values()
            .any(|candidate| compare(value, candidate) == Ordering::Equal)
    });
}

/// Appends `other`, renumbering integer keys; named keys from `other` win.
pub(crate) fn merge(entries: &mut Entries, other: &Entries, policy: ItemPolicy) -> Result<()> {
    policy.check_all(other.values())?;
    let taken = std::mem::take(entries);
    let appended = other.iter().map(|(key, value)| (key.clone(), value.clone()));
    *entries = renumber(taken.into_iter().chain(appended));
    Ok(())
}

pub(crate) fn sort_by<F>(entries: &mut Entries, compare: F)
where
    F: Fn(&Value, &Value) -> Ordering,
{
    entries.sort_by(|_, a, _, b| compare(a, b));
}

pub(crate) fn k_sort_by<F>(entries: &mut Entries, compare: F)
where
    F: Fn(&Key, &Key) -> Ordering,
{
    entries.sort_by(|a, _, b, _| compare(a, b));
}

pub(crate) fn remove<I>(entries: &mut Entries, keys: I)
where
    I: IntoIterator<Item = Key>,
{
    for key in keys {
        entries.shift_remove(&key);
    }
}

pub(crate) fn set(entries: &mut Entries, key: Key, value: Value, policy: ItemPolicy) -> Result<()> {
    policy.check(&value)?;
    entries.insert(key, value);
    Ok(())
}

pub(crate) fn push(entries: &mut Entries, value: Value, policy: ItemPolicy) -> Result<()> {
    policy.check(&value)?;
    let key = Key::Index(next_index(entries)?);
    entries.insert(key, value);
    Ok(())
}

pub(crate) fn unshift(entries: &mut Entries, values: Vec<Value>, policy: ItemPolicy) -> Result<()> {
    policy.check_all(&values)?;
    let taken = std::mem::take(entries);
    let prefix = values.into_iter().map(|value| (Key::Index(0), value));
    *entries = renumber(prefix.chain(taken));
    Ok(())
}

pub(crate) fn fill(start: i64, amount: usize, value: Value, policy: ItemPolicy) -> Result<Entries> {
    policy.check(&value)?;
    if amount == 0 {
        return Ok(Entries::new());
    }
    let end = i64::try_from(amount - 1)
        .ok()
        .and_then(|last| start.checked_add(last))
        .ok_or(CollectionError::IndexOverflow)?;
    Ok((start..=end).map(|index| (Key::Index(index), value.clone())).collect())
}

const TRIMMED: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

pub(crate) fn split(text: &str, delimiter: &str) -> Result<Entries> {
    if delimiter.is_empty() {
        return Err(CollectionError::EmptyDelimiter);
    }
    Ok(text
        .trim_matches(TRIMMED)
        .split(delimiter)
        .enumerate()
        .map(|(index, part)| (Key::from(index), Value::from(part)))
        .collect())
}
