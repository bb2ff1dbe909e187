use std::iter::FusedIterator;

use crate::data_structures::entries::Entries;
use crate::data_structures::{Key, Value};

/// Iterator over `(key, value)` pairs in insertion order.
///
/// Each call to `iter()` starts a new cursor; cursors never share position.
///
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: indexmap::map::Iter<'a, Key, Value>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(entries: &'a Entries) -> Self {
        Iter {
            inner: entries.iter(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursors_are_independent() {
        let entries: Entries = [(Key::from(0), Value::from(1)), (Key::from(1), Value::from(2))]
            .into_iter()
            .collect();

        let mut first = Iter::new(&entries);
        let second = Iter::new(&entries);
        assert_eq!(first.next(), Some((&Key::from(0), &Value::from(1))));
        assert_eq!(second.len(), 2);
        assert_eq!(first.len(), 1);
        assert_eq!(Iter::new(&entries).rev().next().map(|(k, _)| k), Some(&Key::from(1)));
    }
}
