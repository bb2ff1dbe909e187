//! Collection keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A key in a collection: either an integer index or a string name.
///
/// Strings holding a canonical decimal integer (`"23"`, `"-4"`) are stored as
/// [`Key::Index`], so `Key::from("23") == Key::from(23)`. Anything else
/// (`"023"`, `"+1"`, `" 1"`) stays a [`Key::Name`].
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged, from = "RawKey")]
pub enum Key {
    Index(i64),
    Name(String),
}

// Decoded names go through the same normalization as `Key::from`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Index(i64),
    Name(String),
}

impl From<RawKey> for Key {
    fn from(raw: RawKey) -> Self {
        match raw {
            RawKey::Index(index) => Key::Index(index),
            RawKey::Name(name) => Key::normalize(name),
        }
    }
}

impl Key {
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }

    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    fn normalize(name: String) -> Key {
        match parse_canonical_index(&name) {
            Some(index) => Key::Index(index),
            None => Key::Name(name),
        }
    }
}

fn parse_canonical_index(text: &str) -> Option<i64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // "0" is canonical, "00", "01" and "-0" are not.
    if (digits.len() > 1 && digits.starts_with('0')) || text == "-0" {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{}", index),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(index.into())
    }
}

/// Saturates at `i64::MAX`.
impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::normalize(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::normalize(name)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}
