//! Backing store with one-shot materialization of a deferred source.

use std::cell::{OnceCell, RefCell};

use tracing::{debug, warn};

use super::deferred_source::DeferredSource;
use super::entries::Entries;
use super::key::Key;
use super::options::CollectionOptions;
use super::value::Value;
use crate::error::{CollectionError, Result};

/// Resolved entries or a pending source, never both authoritative.
///
/// State transitions:
///
/// ```text
/// uninitialized ──read──────────────▶ resolved(empty)
/// uninitialized ──restore───────────▶ resolved(decoded)
/// pending(source) ──first read──────▶ resolved(drained)   (source dropped)
/// resolved ──replace / entries_mut──▶ resolved
/// ```
///
/// Reads go through [`Store::entries`], which drains the pending source the
/// first time and caches the result. The source is taken out of the store
/// before it is pulled, so it can never run twice.
///
#[derive(Debug, Default)]
pub(crate) struct Store {
    resolved: OnceCell<Entries>,
    pending: RefCell<Option<DeferredSource>>,
    options: CollectionOptions,
}

impl Store {
    /// Store over entries that have already passed the item policy.
    pub(crate) fn resolved(entries: Entries, options: CollectionOptions) -> Self {
        Store {
            resolved: OnceCell::from(entries),
            pending: RefCell::new(None),
            options,
        }
    }

    /// Store over caller-supplied pairs, checked against the item policy.
    pub(crate) fn collect<I, K, V>(items: I, options: CollectionOptions) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        let entries: Entries = items
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        options.policy.check_all(entries.values())?;
        Ok(Store::resolved(entries, options))
    }

    /// Store whose entries come from `source` on first read.
    pub(crate) fn deferred(source: DeferredSource, options: CollectionOptions) -> Self {
        Store {
            resolved: OnceCell::new(),
            pending: RefCell::new(Some(source)),
            options,
        }
    }

    pub(crate) fn options(&self) -> CollectionOptions {
        self.options
    }

    pub(crate) fn entries(&self) -> &Entries {
        self.resolved.get_or_init(|| self.drain())
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Entries {
        if self.resolved.get().is_none() {
            let drained = self.drain();
            self.resolved = OnceCell::from(drained);
        }
        self.resolved
            .get_mut()
            .expect("store is resolved after draining")
    }

    /// Swaps in new entries, discarding anything pending.
    pub(crate) fn replace(&mut self, entries: Entries) {
        self.pending.get_mut().take();
        self.resolved = OnceCell::from(entries);
    }

    pub(crate) fn is_materialized(&self) -> bool {
        self.resolved.get().is_some()
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.resolved.get().is_some() || self.pending.borrow().is_some()
    }

    /// Fills an uninitialized store with entries decoded elsewhere.
    pub(crate) fn restore(&mut self, entries: Entries) -> Result<()> {
        if self.is_initialized() {
            return Err(CollectionError::IllegalReinitialization);
        }
        self.options.policy.check_all(entries.values())?;
        self.resolved = OnceCell::from(entries);
        Ok(())
    }

    fn drain(&self) -> Entries {
        let Some(source) = self.pending.borrow_mut().take() else {
            return Entries::new();
        };

        let policy = self.options.policy;
        let mut entries = Entries::with_capacity(source.size_hint().0);
        let mut skipped = 0usize;
        for (key, value) in source {
            match policy.check(&value) {
                Ok(()) => {
                    entries.insert(key, value);
                }
                Err(error) => {
                    warn!(%key, %error, "skipping deferred entry");
                    skipped += 1;
                }
            }
        }

        debug!(count = entries.len(), skipped, "materialized deferred source");
        entries
    }
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Store::resolved(self.entries().clone(), self.options)
    }
}
