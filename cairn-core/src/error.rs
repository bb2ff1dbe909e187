use thiserror::Error;

use crate::data_structures::ValueKind;

/// Errors raised by collection construction, mutation and serialization.
///
/// All of them are reported at the call that broke the contract; the backing
/// store is left exactly as it was before the call.
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("A collection may only contain numbers, strings, or objects (got {kind})")]
    InvalidItemKind { kind: ValueKind },

    #[error("A collection may only contain finite numbers (got {value})")]
    NonFiniteNumber { value: f64 },

    #[error("Integer key would exceed the largest index")]
    IndexOverflow,

    #[error("Cannot unserialize instance of collection")]
    IllegalReinitialization,

    #[error("Cannot select an item from an empty collection")]
    EmptySelection,

    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("Delimiter must not be empty")]
    EmptyDelimiter,

    #[error("Malformed serialized collection: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
