//! One-shot lazy sources of key/value pairs.

use std::fmt;

use super::key::Key;
use super::value::Value;

/// A lazy sequence of `(Key, Value)` pairs consumed at most once.
///
/// The collection owns the source and pulls it to the end the first time
/// anything reads the collection. Nothing runs before that: building a
/// collection from a source does not call the underlying iterator.
///
/// A source may be infinite; reading a collection built from one does not
/// return.
///
pub struct DeferredSource {
    inner: Box<dyn Iterator<Item = (Key, Value)>>,
}

impl DeferredSource {
    /// Source of explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)> + 'static,
        I::IntoIter: 'static,
        K: Into<Key> + 'static,
        V: Into<Value> + 'static,
    {
        DeferredSource {
            inner: Box::new(
                pairs
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into())),
            ),
        }
    }

    /// Source of bare values, keyed `0, 1, 2, ...`.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V> + 'static,
        I::IntoIter: 'static,
        V: Into<Value> + 'static,
    {
        DeferredSource {
            inner: Box::new(
                values
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| (Key::from(index), value.into())),
            ),
        }
    }

    /// Source that yields nothing.
    pub fn empty() -> Self {
        DeferredSource {
            inner: Box::new(std::iter::empty()),
        }
    }
}

impl Iterator for DeferredSource {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl fmt::Debug for DeferredSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeferredSource {{ size_hint: {:?} }}", self.inner.size_hint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_keys_sequentially() {
        let pairs: Vec<_> = DeferredSource::from_values(["a", "b"]).collect();
        assert_eq!(
            pairs,
            vec![(Key::from(0), Value::from("a")), (Key::from(1), Value::from("b"))]
        );
    }

    #[test]
    fn test_exhausted_source_stays_empty() {
        let mut source = DeferredSource::from_pairs(vec![("x", 1)]);
        assert_eq!(source.next(), Some((Key::from("x"), Value::from(1))));
        assert_eq!(source.next(), None);
        assert_eq!(source.next(), None);
    }

    #[test]
    fn test_empty() {
        assert_eq!(DeferredSource::empty().count(), 0);
    }
}
