//! Collection façades over the shared store.

pub mod collection;
pub mod collection_iter;
pub mod mutable_collection;

pub use collection::Collection;
pub use collection_iter::Iter;
pub use mutable_collection::MutableCollection;
