use crate::data_structures::value::Value;
use crate::error::{CollectionError, Result};

/// Which values a collection accepts.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemPolicy {
    /// Numbers, strings and objects only; nested containers are rejected.
    #[default]
    ScalarsOnly,
    /// Anything, including nested lists.
    Permissive,
}

impl ItemPolicy {
    /// Fails on a container under `ScalarsOnly`, and on a NaN or infinite
    /// float anywhere in the value under either policy.
    pub fn check(self, value: &Value) -> Result<()> {
        if let Some(number) = value.non_finite() {
            return Err(CollectionError::NonFiniteNumber { value: number });
        }
        match self {
            ItemPolicy::ScalarsOnly if value.kind().is_container() => {
                Err(CollectionError::InvalidItemKind { kind: value.kind() })
            }
            _ => Ok(()),
        }
    }

    /// Checks every value before anything is committed.
    pub fn check_all<'a, I>(self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        values.into_iter().try_for_each(|value| self.check(value))
    }
}

/// Construction-time settings carried by a collection.
///
/// Collections derived from another one (every immutable transformation)
/// inherit its options.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionOptions {
    pub policy: ItemPolicy,
}

impl CollectionOptions {
    pub fn new() -> Self {
        CollectionOptions::default()
    }

    pub fn with_policy(mut self, policy: ItemPolicy) -> Self {
        self.policy = policy;
        self
    }
}
