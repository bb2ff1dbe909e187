//! Ordered collection model.
//!
//! # Organization
//!
//! - [`key`] and [`value`] - what a collection stores
//! - [`comparator`] - the orderings and equalities the operations use
//! - [`deferred_source`] - producers drained on first read
//! - [`readable_collection`] - read operations shared by both façades
//! - [`wrappers`] - the immutable and mutable façades

pub mod comparator;
pub mod deferred_source;
pub mod key;
pub mod options;
pub mod readable_collection;
pub mod value;
pub mod wrappers;

pub(crate) mod entries;
pub(crate) mod serialization;
pub(crate) mod store;

pub use deferred_source::DeferredSource;
pub use entries::Entries;
pub use key::Key;
pub use options::{CollectionOptions, ItemPolicy};
pub use readable_collection::ReadableCollection;
pub use value::{ObjectRef, Value, ValueKind};
pub use wrappers::{Collection, Iter, MutableCollection};
