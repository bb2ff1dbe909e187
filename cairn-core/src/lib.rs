//! Ordered key-value collections with lazy materialization.
//!
//! Two façades share one model:
//!
//! - [`Collection`] never changes once built; every transformation returns a
//!   new instance.
//! - [`MutableCollection`] rewrites its own backing store and returns
//!   `&mut Self` so calls chain.
//!
//! Either can be built from a [`DeferredSource`]; the source is drained on
//! the first read and never touched again.

pub mod common_tests;
pub mod data_structures;
pub mod error;

pub use data_structures::{
    Collection, CollectionOptions, DeferredSource, Entries, ItemPolicy, Key, MutableCollection,
    ObjectRef, ReadableCollection, Value, ValueKind,
};
pub use error::{CollectionError, Result};
